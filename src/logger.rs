use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fmt::{Arguments, Debug, Display};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

pub use log::{error, info, warn};

const LOG_FILE_PATH: &str = "./log.txt";

struct FileLogger {
    file: Mutex<Option<File>>,
}
impl FileLogger {
    fn new(path: &'static str) -> FileLogger {
        //Logging should never stop the app from starting, we just won't have a log
        let file = OpenOptions::new().create(true).append(true).open(path).ok();
        FileLogger { file: Mutex::new(file) }
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let time = chrono::Local::now();
        let message = format_entry(record.level(), time.format("%x %X"), record.args());
        if let Ok(mut file) = self.file.lock() {
            if let Some(file) = file.as_mut() {
                let _ = file.write_all(message.as_bytes());
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            if let Some(file) = file.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

lazy_static::lazy_static! {
    static ref LOGGER: FileLogger = FileLogger::new(LOG_FILE_PATH);
}

fn format_entry(level: Level, time: impl Display, args: &Arguments) -> String {
    match level {
        Level::Error => format!("Error [{time}]: {args}\n"),
        Level::Warn => format!("Warning [{time}]: {args}\n"),
        Level::Info | Level::Debug | Level::Trace => format!("[{time}]: {args}\n"),
    }
}

fn parse_level(level: &str) -> LevelFilter { level.trim().parse().unwrap_or(LevelFilter::Info) }

/// Installs the file logger. Defaults to `Info` until settings are loaded
pub fn init() {
    if log::set_logger(&*LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

/// Sets the log level from a settings string (`trace`, `debug`, `info`, `warn`, `error`, `off`)
/// Unknown values fall back to `info`
pub fn set_log_level(level: &str) { log::set_max_level(parse_level(level)); }

pub trait PanicLogEntry<T> {
    fn log_message_and_panic(self, message: &str) -> T;
}
pub trait LogEntry<T: Default> {
    fn log(self, message: &str) -> T;
}

impl<T, E: Debug> PanicLogEntry<T> for std::result::Result<T, E> {
    /// Logs the type with an additional message if it is `Err` then panics
    fn log_message_and_panic(self, message: &str) -> T {
        match self {
            Err(e) => {
                error!("{e:?} - {message}");
                panic!("encountered unexpected error");
            }
            Ok(r) => r,
        }
    }
}

impl<T> PanicLogEntry<T> for Option<T> {
    /// Logs the message if it is `None` then panics
    fn log_message_and_panic(self, message: &str) -> T {
        match self {
            Some(t) => t,
            None => {
                error!("None - {message}");
                panic!("encountered unexpected error");
            }
        }
    }
}

impl<T: Default, E: Debug> LogEntry<T> for std::result::Result<T, E> {
    fn log(self, message: &str) -> T {
        match self {
            Err(e) => {
                warn!("{e:?} - {message}");
                T::default()
            }
            Ok(r) => r,
        }
    }
}
