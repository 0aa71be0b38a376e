use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const ROTATION_MARKER: &[u8] = b"--- Log rotated (older entries removed) ---\n";

/// When a log file is trimmed and how much of its tail survives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RotationPolicy {
    max_size: u64,
    keep_size: u64,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_size: 5 * 1024 * 1024,
            keep_size: 1024 * 1024,
        }
    }
}

impl RotationPolicy {
    /// Trim `path` to its last `keep_size` bytes, starting at a line boundary, once it
    /// is larger than `max_size`. Returns whether the file was rotated.
    fn apply(&self, path: &Path) -> io::Result<bool> {
        let len = match fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        if len <= self.max_size {
            return Ok(false);
        }

        let mut tail = Vec::new();
        let mut file = File::open(path)?;
        file.seek(SeekFrom::Start(len.saturating_sub(self.keep_size)))?;
        file.read_to_end(&mut tail)?;
        drop(file);

        let mut file = File::create(path)?;
        file.write_all(ROTATION_MARKER)?;
        file.write_all(whole_lines(&tail))?;
        Ok(true)
    }
}

/// `tail` without the partial line it starts with
fn whole_lines(tail: &[u8]) -> &[u8] {
    match tail.iter().position(|&b| b == b'\n') {
        Some(i) => &tail[i + 1..],
        None => tail,
    }
}

/// Filter used when `RUST_LOG` is not set
fn default_filter(level: &str) -> String {
    format!("efp={level},efp_core=warn")
}

/// Initialize logging.
///
/// Without a log file, events go to stderr so they never mix with the report on
/// stdout. With one, they are appended to it and the file is trimmed to its last
/// 1 MB once it exceeds 5 MB. `RUST_LOG` overrides `level`.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> color_eyre::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));
    let registry = tracing_subscriber::registry().with(env_filter);

    let Some(log_path) = log_file else {
        registry
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .init();
        return Ok(());
    };

    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let rotated = RotationPolicy::default().apply(log_path).unwrap_or_else(|e| {
        eprintln!("Warning: failed to rotate {}: {e}", log_path.display());
        false
    });

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    // A Mutex<File> is itself a MakeWriter shared by every event
    registry
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!(log_path = %log_path.display(), rotated, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SMALL: RotationPolicy = RotationPolicy {
        max_size: 1_000,
        keep_size: 250,
    };

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter("debug"), "efp=debug,efp_core=warn");
    }

    #[test]
    fn test_default_policy_sizes() {
        let policy = RotationPolicy::default();
        assert_eq!(policy.max_size, 5 * 1024 * 1024);
        assert_eq!(policy.keep_size, 1024 * 1024);
    }

    #[test]
    fn test_whole_lines() {
        assert_eq!(whole_lines(b"tial\nfull line\n"), b"full line\n");
        assert_eq!(whole_lines(b"no newline"), b"no newline");
        assert_eq!(whole_lines(b""), b"");
    }

    #[test]
    fn test_small_log_left_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("efp.log");
        fs::write(&path, "line one\nline two\n").unwrap();

        assert!(!SMALL.apply(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "line one\nline two\n");
    }

    #[test]
    fn test_large_log_rotated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("efp.log");
        let line = "x".repeat(19) + "\n";
        fs::write(&path, line.repeat(60)).unwrap();

        assert!(SMALL.apply(&path).unwrap());

        let rotated = fs::read(&path).unwrap();
        assert!(rotated.starts_with(ROTATION_MARKER));
        let body = std::str::from_utf8(&rotated[ROTATION_MARKER.len()..]).unwrap();
        assert!(body.len() as u64 <= SMALL.keep_size);
        assert!(body.lines().all(|l| l.len() == 19));
        assert_eq!(body.lines().count(), 12);
    }

    #[test]
    fn test_missing_log_is_not_an_error() {
        let dir = tempdir().unwrap();
        assert!(!SMALL.apply(&dir.path().join("absent.log")).unwrap());
    }
}
