#![forbid(unsafe_code)]

mod args;
mod dump;
mod logger;

#[macro_use]
extern crate clap;

use clap::AppSettings;
use logger::PedanticLogger;
use std::process;

fn main() {
    let matches = clap_app!(app =>
        (name: "fortio")
        (version: crate_version!())
        (about: "Inspects Fortran 77 unformatted sequential record files")
        (setting: AppSettings::SubcommandRequiredElseHelp)
        (@arg pedantic: -p --pedantic "Print per-record tracing")
        (@subcommand dump =>
            (about: "List every record in a file")
            (@arg path: +required +takes_value "File to read")
            (@arg opts: -o --opts +takes_value default_value("e") "Record options string (e.g. \"e\" for little-endian, \"$\" to allow a missing tail)")
            (settings: &[AppSettings::DisableVersion])
        )
    )
    .get_matches();

    PedanticLogger::setup(matches.is_present("pedantic"));

    let result = match matches.subcommand() {
        ("dump", Some(sub)) => dump::dump(
            sub.value_of("path").unwrap(),
            sub.value_of("opts").unwrap(),
        ),
        _ => unreachable!(),
    };

    if let Err(err) = result {
        eprintln!("fortio: {}", err);
        process::exit(1);
    }
}
