use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name of the journal log inside the data directory
pub const LOG_FILE: &str = "tradejournal.log";

/// Maximum log file size before rotation (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Size to keep after rotation (1 MB of most recent logs)
const KEEP_SIZE: u64 = 1024 * 1024;

const ROTATION_MARKER: &[u8] = b"--- Log rotated (older entries removed) ---\n";

/// Trim the log to its most recent `KEEP_SIZE` bytes once it grows past
/// `MAX_LOG_SIZE`. The cut is moved forward to the next line boundary.
fn rotate_log_if_needed(log_path: &Path) -> std::io::Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let size = fs::metadata(log_path)?.len();
    if size <= MAX_LOG_SIZE {
        return Ok(());
    }

    // Read the most recent KEEP_SIZE bytes
    let mut file = File::open(log_path)?;
    file.seek(SeekFrom::Start(size.saturating_sub(KEEP_SIZE)))?;
    let mut tail = Vec::new();
    file.read_to_end(&mut tail)?;
    drop(file);

    // Start at the first full line of the tail
    let skip = tail
        .iter()
        .position(|&b| b == b'\n')
        .map(|i| i + 1)
        .unwrap_or(0);

    // Replace the file with the marker and the kept tail
    let mut file = File::create(log_path)?;
    file.write_all(ROTATION_MARKER)?;
    file.write_all(&tail[skip..])?;

    Ok(())
}

/// Hands out writers that share one append-mode log file
#[derive(Clone)]
struct LogWriterFactory {
    file: Arc<Mutex<File>>,
}

impl LogWriterFactory {
    fn new(file: File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct LogWriter {
    file: Arc<Mutex<File>>,
}

impl LogWriter {
    // A panic mid-write must not silence every later log line
    fn lock(&self) -> MutexGuard<'_, File> {
        self.file.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.lock().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.lock().flush()
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            file: self.file.clone(),
        }
    }
}

/// Initialize logging to a file in the data directory.
///
/// The terminal belongs to the TUI, so nothing is written to stdout or stderr
/// after this returns. Logs go to `{data_dir}/tradejournal.log`, which is
/// trimmed to its last 1MB whenever it exceeds 5MB at startup. `RUST_LOG`
/// overrides `level` when set.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    // Ensure data directory exists
    fs::create_dir_all(data_dir)?;

    let log_path = data_dir.join(LOG_FILE);

    // Rotate before opening so the append handle sees the trimmed file
    if let Err(e) = rotate_log_if_needed(&log_path) {
        eprintln!("Warning: Failed to rotate log file: {}", e);
    }

    // Open log file for appending
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // RUST_LOG wins over the CLI level; core stays quiet unless asked
    let default_filter = format!("tradejournal={level},tradejournal_core=warn");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    // File-only subscriber, no ANSI colours in the log
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(LogWriterFactory::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .init();

    tracing::info!(
        "Trade journal logging initialized (log_path={})",
        log_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_small_log_is_left_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);
        fs::write(&path, "line one\nline two\n").unwrap();

        rotate_log_if_needed(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "line one\nline two\n");
    }

    #[test]
    fn test_missing_log_is_ok() {
        let dir = tempdir().unwrap();
        rotate_log_if_needed(&dir.path().join(LOG_FILE)).unwrap();
    }

    #[test]
    fn test_oversized_log_keeps_recent_whole_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);

        let line = "x".repeat(99) + "\n";
        let lines = (MAX_LOG_SIZE / 100 + 10) as usize;
        fs::write(&path, line.repeat(lines)).unwrap();

        rotate_log_if_needed(&path).unwrap();

        let rotated = fs::read(&path).unwrap();
        assert!(rotated.starts_with(ROTATION_MARKER));
        let body = &rotated[ROTATION_MARKER.len()..];
        assert!(body.len() as u64 <= KEEP_SIZE);
        assert_eq!(body.len() % 100, 0);
    }
}
