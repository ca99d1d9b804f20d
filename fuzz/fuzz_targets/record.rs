#![no_main]

use std::io::{Cursor, Seek};

use fortio::{get, FortioError, Options};
use libfuzzer_sys::fuzz_target;

const OPT_STRINGS: &[&str] = &["e", "E", "e$", "e~", "s", "f", "d", "b", "e#"];

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let opts = Options::parse(OPT_STRINGS[data[0] as usize % OPT_STRINGS.len()]);
    let mut stream = Cursor::new(data[1..].to_vec());
    let mut buf = vec![0u8; 4096];

    loop {
        let before = stream.stream_position().unwrap();
        match get(&mut stream, &opts, Some(&mut buf)) {
            Ok(_) => continue,
            Err(FortioError::Eof) => break,
            Err(FortioError::InconsistentState) | Err(FortioError::Seek(_)) => break,
            Err(_) => {
                // Every other failure must restore the cursor exactly.
                assert_eq!(stream.stream_position().unwrap(), before);
                break;
            }
        }
    }
});
