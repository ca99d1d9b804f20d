use log::{Level, LevelFilter, Log, Metadata, Record};

static LOGGER: PedanticLogger = PedanticLogger;

/// A custom logger that just works.
///
/// Basic coloring, supports the levels `fortio` actually emits, and doesn't
/// require a time-formatting dependency to print a log line.
pub struct PedanticLogger;

impl PedanticLogger {
    /// Installs the logger at `Info` level, or `Debug` under `-p`/`--pedantic`.
    pub fn setup(pedantic: bool) {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(if pedantic {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        });
    }
}

impl Log for PedanticLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        let md = record.metadata();

        if self.enabled(md) {
            let module = record.module_path().unwrap_or_default();

            match md.level() {
                Level::Info => println!("\x1b[0;37m{}: {}\x1b[0m", module, record.args()),
                Level::Warn => eprintln!("\x1b[1;33m{}: {}\x1b[0m", module, record.args()),
                Level::Error => eprintln!(" \x1b[0;31m{}: {}\x1b[0m", module, record.args()),
                _ => println!("\x1b[1;30m{}: {}\x1b[0m", module, record.args()),
            }
        }
    }

    fn flush(&self) {}
}
