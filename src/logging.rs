use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const LOG_FILE: &str = "neptunes-hooks.log";
/// A log file past this size is rotated at startup.
const MAX_BYTES: u64 = 100 * 1024 * 1024;
const BACKUPS: usize = 3;

/// Set up `env_logger`, writing to stderr and, when it can be opened, to
/// `<log_dir>/neptunes-hooks.log`.
pub fn init(debug: bool, log_dir: &Path) {
    let default_level = if debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    builder.format_timestamp_secs();

    let path = log_dir.join(LOG_FILE);
    let file_logging = open_log_file(log_dir, MAX_BYTES).map(|file| {
        builder.target(env_logger::Target::Pipe(Box::new(Tee { file: Some(file) })));
    });
    builder.init();

    match file_logging {
        Ok(()) => log::debug!("logging to {}", path.display()),
        Err(e) => log::warn!("file logging disabled, cannot open {}: {e}", path.display()),
    }
}

/// Open the log file for appending, rotating it first if it has grown past `max_bytes`.
fn open_log_file(log_dir: &Path, max_bytes: u64) -> io::Result<File> {
    fs::create_dir_all(log_dir)?;
    let path = log_dir.join(LOG_FILE);
    if fs::metadata(&path).map(|m| m.len() >= max_bytes).unwrap_or(false) {
        rotate(&path)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// `x.log` → `x.log.1` → `x.log.2` …, dropping the oldest backup.
fn rotate(path: &Path) -> io::Result<()> {
    let _ = fs::remove_file(backup(path, BACKUPS));
    for n in (1..BACKUPS).rev() {
        let from = backup(path, n);
        if from.exists() {
            fs::rename(&from, backup(path, n + 1))?;
        }
    }
    fs::rename(path, backup(path, 1))
}

fn backup(path: &Path, n: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{n}"));
    PathBuf::from(name)
}

/// Copies every record to stderr and the log file.
struct Tee {
    file: Option<File>,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(file) = &mut self.file
            && file.write_all(buf).is_err()
        {
            self.file = None;
        }
        io::stderr().write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(file) = &mut self.file {
            let _ = file.flush();
        }
        io::stderr().flush()
    }
}
