//! I/O utility functions

use std::fs;
use std::io;
use std::path::Path;

/// Write bytes to a file atomically using the write-then-rename pattern.
///
/// The content goes to a sibling `.tmp` file first, which is then renamed over the
/// target, so a reader never sees a half-written table.
///
/// # Example
/// ```ignore
/// atomic_write_bytes(Path::new("out/global_sobol.csv"), &bytes)?;
/// ```
pub fn atomic_write_bytes(path: &Path, content: &[u8]) -> io::Result<()> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}
