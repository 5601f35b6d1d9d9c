//! `log` backend setup.
//!
//! Console and file output are chosen explicitly through [`LogSettings`]; `RUST_LOG` still
//! overrides the level filter.

use crate::settings::{LogSettings, Settings};
use chrono::{DateTime, Local};
use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const LINE_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";
const FILE_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H-%M-%S";

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("failed to create log directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to open log file {}: {source}", path.display())]
    OpenFile { path: PathBuf, source: io::Error },
    #[error("a logger is already installed")]
    AlreadyInitialized,
}

/// Installs the global logger. Returns the log file path when file output is enabled.
pub fn init(settings: &Settings) -> Result<Option<PathBuf>, LoggingError> {
    let (mut builder, path) = builder(settings, Local::now())?;
    builder
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;
    Ok(path)
}

/// Configures a logger for `settings` without installing it.
pub fn builder(
    settings: &Settings,
    now: DateTime<Local>,
) -> Result<(Builder, Option<PathBuf>), LoggingError> {
    let LogSettings {
        console,
        file,
        directory,
    } = &settings.log;

    let mut builder = Builder::new();

    if !console && !file {
        builder.filter_level(LevelFilter::Off);
        return Ok((builder, None));
    }

    let level = if settings.test_mode {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    builder
        .filter_level(level)
        .parse_default_env()
        .format(format_line);

    if !file {
        builder.target(Target::Stderr);
        return Ok((builder, None));
    }

    let dir = directory.clone().unwrap_or_else(|| PathBuf::from("."));
    let (log_file, path) = open_log_file(&dir, now)?;
    let target: Box<dyn Write + Send> = if *console {
        Box::new(Tee {
            first: io::stderr(),
            second: log_file,
        })
    } else {
        Box::new(log_file)
    };
    builder
        .target(Target::Pipe(target))
        .write_style(WriteStyle::Never);

    Ok((builder, Some(path)))
}

/// `dd-mm-YYYY HH-MM-SS.log`, named after the session start.
pub fn log_file_name(now: DateTime<Local>) -> String {
    format!("{}.log", now.format(FILE_TIMESTAMP_FORMAT))
}

/// Creates `dir` if needed and opens the session's log file for appending.
pub fn open_log_file(dir: &Path, now: DateTime<Local>) -> Result<(File, PathBuf), LoggingError> {
    fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(log_file_name(now));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.clone(),
            source,
        })?;
    Ok((file, path))
}

fn format_line(buf: &mut env_logger::fmt::Formatter, record: &log::Record<'_>) -> io::Result<()> {
    writeln!(
        buf,
        "{} [{}]: {}",
        Local::now().format(LINE_TIMESTAMP_FORMAT),
        record.level(),
        record.args()
    )
}

/// Writes everything to both sinks.
struct Tee<A, B> {
    first: A,
    second: B,
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.first.write_all(buf)?;
        self.second.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.first.flush()?;
        self.second.flush()
    }
}
