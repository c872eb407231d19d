use std::io::Write;

use time_format::{ DateFormat, TimeStampMs };

// Console logger
//
// Info and debug records go to stdout, warnings and errors to stderr.
// Each line is stamped with local wall-clock time.

struct Logger;

fn format_time(time: TimeStampMs) -> String {
    time_format::format_common_ms_local(time, DateFormat::Custom("%H:%M:%S.{ms}"))
        .unwrap_or_else(|_| "???".to_string())
}

fn format_entry(time: &str, level: log::Level, message: &std::fmt::Arguments) -> String {
    format!("{time} {level:<5} {message}")
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let time = time_format::now_ms()
            .map(format_time)
            .unwrap_or_else(|_| "???".to_string());
        let line = format_entry(&time, record.level(), record.args());
        match record.level() {
            log::Level::Error | log::Level::Warn => eprintln!("{line}"),
            _ => println!("{line}"),
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: Logger = Logger;

/// Initialise the global logger.
pub fn init(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_max_level(level);
    log::set_logger(&LOGGER)
}

#[cfg(test)]
mod test_logger {
    use super::format_entry;

    #[test]
    fn entry_layout() {
        let line = format_entry("12:00:00.5", log::Level::Warn, &format_args!("{} not found", "a.mtl"));
        assert_eq!(line, "12:00:00.5 WARN  a.mtl not found");
    }
}
