//! End-to-end exercises against real files, complementing the unit tests
//! colocated with each module that drive the same scenarios over
//! `std::io::Cursor`.

use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};

use fortio::{array_get, array_put, get, put, sizeof, skip, FortioError, KeywordList, Options};

fn temp_file() -> (tempfile::NamedTempFile, std::fs::File) {
    let named = tempfile::NamedTempFile::new().unwrap();
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(named.path())
        .unwrap();
    (named, file)
}

#[test]
fn put_then_get_round_trips_over_a_real_file() {
    let (_guard, mut file) = temp_file();
    let opts = Options::parse("e");
    let values: Vec<i32> = vec![10, -20, 30, 40];
    let raw: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();

    put(&mut file, &opts, &raw).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let n = sizeof(&mut file, &opts).unwrap();
    assert_eq!(n, values.len() as u64);

    let mut buf = vec![0u8; raw.len()];
    let n = get(&mut file, &opts, Some(&mut buf)).unwrap();
    assert_eq!(n, values.len() as u64);
    assert_eq!(buf, raw);

    // The stream is exhausted: one more get is an orderly EOF.
    let err = get(&mut file, &opts, None).unwrap_err();
    assert!(matches!(err, FortioError::Eof));
}

#[test]
fn skip_then_get_lands_on_the_second_record() {
    let (_guard, mut file) = temp_file();
    let opts = Options::parse("e");

    put(&mut file, &opts, &1i32.to_ne_bytes()).unwrap();
    put(&mut file, &opts, &2i32.to_ne_bytes()).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    skip(&mut file, &opts, 1).unwrap();

    let mut buf = [0u8; 4];
    get(&mut file, &opts, Some(&mut buf)).unwrap();
    assert_eq!(i32::from_ne_bytes(buf), 2);
}

#[test]
fn array_round_trips_with_a_short_final_block() {
    let (_guard, mut file) = temp_file();
    let opts = Options::parse("e");
    let values: Vec<i32> = (0..13).collect();
    let raw: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();

    array_put(&mut file, &opts, 1, 13, 5, &raw).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let mut out = vec![0u8; raw.len()];
    let n = array_get(&mut file, &opts, 1, 13, 5, &mut out).unwrap();
    assert_eq!(n, 13);
    assert_eq!(out, raw);
}

#[test]
fn keyword_list_persists_alongside_records_in_the_same_file() {
    let (_guard, mut file) = temp_file();

    let mut keywords = KeywordList::new();
    keywords.append("SWAT");
    keywords.append("PRESSURE");
    keywords.persist(&mut file).unwrap();

    let opts = Options::parse("e");
    put(&mut file, &opts, &42i32.to_ne_bytes()).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let mut loaded = KeywordList::new();
    loaded.load(&mut file).unwrap();
    assert_eq!(loaded.first(), Some("SWAT"));
    assert_eq!(loaded.next(), Some("PRESSURE"));

    let mut buf = [0u8; 4];
    let n = get(&mut file, &opts, Some(&mut buf)).unwrap();
    assert_eq!(n, 1);
    assert_eq!(i32::from_ne_bytes(buf), 42);
}

#[test]
fn truncated_stream_restores_position_and_dirty_buffer_is_expected() {
    let (_guard, mut file) = temp_file();
    // A head claiming 8 bytes, but only 2 bytes of payload follow.
    file.write_all(&8i32.to_be_bytes()).unwrap();
    file.write_all(&[0xAA, 0xBB]).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let opts = Options::parse("E");
    let mut buf = [0xFFu8; 8];
    let err = get(&mut file, &opts, Some(&mut buf)).unwrap_err();
    assert!(matches!(err, FortioError::UnexpectedEof));
    assert_eq!(file.stream_position().unwrap(), 0);
}
