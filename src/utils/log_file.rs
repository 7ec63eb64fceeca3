use chrono::{Local, NaiveDate};
use regex::Regex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const LOG_FILE_PREFIX: &str = "app_";
const DATE_FORMAT: &str = "%Y%m%d";

fn log_file_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^app_(\d{8})\.log$").expect("static regex"))
}

/// A dated log file found in the log directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub date: NaiveDate,
}

impl LogFile {
    /// Parses `app_<YYYYMMDD>.log`. Returns `None` for any other name or an
    /// impossible calendar date.
    pub fn parse(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let captures = log_file_pattern().captures(name)?;
        let date = NaiveDate::parse_from_str(&captures[1], DATE_FORMAT).ok()?;

        Some(Self {
            path: path.to_path_buf(),
            date,
        })
    }

    pub fn file_name_for(date: NaiveDate) -> String {
        format!("{}{}.log", LOG_FILE_PREFIX, date.format(DATE_FORMAT))
    }
}

/// Appends to `app_<YYYYMMDD>.log`, reopening when the local date changes.
#[derive(Debug)]
pub struct DailyLogWriter {
    directory: PathBuf,
    current_date: NaiveDate,
    file: File,
}

impl DailyLogWriter {
    /// Opens today's file eagerly so permission problems surface at startup.
    pub fn new(directory: impl Into<PathBuf>) -> io::Result<Self> {
        let directory = directory.into();
        let today = Local::now().date_naive();
        let file = open_for(&directory, today)?;

        Ok(Self {
            directory,
            current_date: today,
            file,
        })
    }

    pub fn current_path(&self) -> PathBuf {
        self.directory.join(LogFile::file_name_for(self.current_date))
    }

    /// Writes `buf` to the file for `date`, switching files first when the
    /// date differs from the one currently open.
    pub fn write_as_of(&mut self, date: NaiveDate, buf: &[u8]) -> io::Result<usize> {
        if date != self.current_date {
            self.file.flush()?;
            self.file = open_for(&self.directory, date)?;
            self.current_date = date;
        }
        self.file.write(buf)
    }
}

fn open_for(directory: &Path, date: NaiveDate) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(directory.join(LogFile::file_name_for(date)))
}

impl Write for DailyLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_as_of(Local::now().date_naive(), buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Lists candidate log files. Entries named `app_*` that do not parse are
/// returned in the second vector so the caller can report them.
pub fn scan_log_directory(directory: &Path) -> io::Result<(Vec<LogFile>, Vec<PathBuf>)> {
    let mut parsed = Vec::new();
    let mut unparsed = Vec::new();

    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let is_candidate = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX));
        if !is_candidate {
            continue;
        }

        match LogFile::parse(&path) {
            Some(log_file) => parsed.push(log_file),
            None => unparsed.push(path),
        }
    }

    parsed.sort_by_key(|log_file| log_file.date);
    Ok((parsed, unparsed))
}
