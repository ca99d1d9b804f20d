use std::fs::File;
use std::io::BufReader;

use fortio::{sizeof, skip, FortioError, Options};

use crate::args::OpError;

/// Prints `index, size (elements), byte offset` for every record in `path`,
/// stopping cleanly at `EOF`. A record that fails validation is reported and
/// the dump stops there, since the cursor position at that point is no
/// longer trustworthy for a record boundary.
pub fn dump(path: &str, opts_str: &str) -> Result<(), OpError> {
    let file = File::open(path)?;
    let mut stream = BufReader::new(file);
    let opts = Options::parse(opts_str);

    let mut index = 0u64;
    loop {
        let offset = stream.stream_position()?;

        match sizeof(&mut stream, &opts) {
            Ok(n) => {
                println!("{} {} {}", index, n, offset);
                skip(&mut stream, &opts, 1)?;
                index += 1;
            }
            Err(FortioError::Eof) => break,
            Err(err) => return Err(OpError::from(err)),
        }
    }

    log::info!("{}: {} record(s)", path, index);
    Ok(())
}
