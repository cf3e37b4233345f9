//! File emitters for the aggregator source file and the binstub scripts.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::{BinstubsError, Result};

pub use self::aggregator::{render_aggregator, write_aggregator};
pub use self::binstub::{render_binstub, write_binstubs};

mod aggregator;
mod binstub;

/// Name written into every generated-file marker.
pub const GENERATOR_NAME: &str = "gotools-binstubs";

/// Permission bits of a binstub script.
pub const BINSTUB_MODE: u32 = 0o755;

/// Marker text following the comment leader.
pub fn generated_marker() -> String {
    format!("Code generated by {}. DO NOT EDIT.", GENERATOR_NAME)
}

/// Create or truncate `path` and write `content`, optionally with Unix mode bits.
fn write_file(path: &Path, content: &str, mode: Option<u32>) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        if let Some(mode) = mode {
            options.mode(mode);
        }
    }

    let mut file = options.open(path).map_err(|e| BinstubsError::io(path, e))?;
    file.write_all(content.as_bytes()).map_err(|e| BinstubsError::io(path, e))?;

    // `mode` only applies on creation; an existing file keeps its old bits.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Some(mode) = mode {
            fs::set_permissions(path, fs::Permissions::from_mode(mode))
                .map_err(|e| BinstubsError::io(path, e))?;
        }
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(())
}
