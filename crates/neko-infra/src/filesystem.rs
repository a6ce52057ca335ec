//! Data directory layout for NekoNet.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "NEKO_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `NEKO_DATA_DIR` environment variable
/// 2. `~/.neko` under the user's home directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".neko");
    }

    // Last resort: current directory
    PathBuf::from(".neko")
}

/// Default directory for session exports: `{data_dir}/exports/`.
pub fn exports_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("exports")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exports_dir_path() {
        let data_dir = PathBuf::from("/home/user/.neko");
        assert_eq!(exports_dir(&data_dir), PathBuf::from("/home/user/.neko/exports"));
    }

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: This test is the only one touching NEKO_DATA_DIR and restores it immediately.
        unsafe {
            std::env::set_var(DATA_DIR_ENV, "/tmp/test-neko");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-neko"));
        unsafe {
            std::env::remove_var(DATA_DIR_ENV);
        }
    }
}
