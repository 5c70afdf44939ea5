//! A session's durable store is a portable directory; this module is the
//! single source of truth for its layout.
//!
//! ```text
//! <root>/
//! ├── ENTITIES        # bincode-encoded Vec<Entity>, written once by start()
//! ├── LOG              # append-only operation log
//! └── SNAPSHOTS/
//!     ├── snap-0000000000000042.bin
//!     └── ...
//! ```

use std::path::{Path, PathBuf};

/// Paths within a session's durable store directory.
#[derive(Debug, Clone)]
pub struct SessionPaths {
    root: PathBuf,
}

impl SessionPaths {
    /// Anchor paths at `root` (not created or validated here).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The persisted entity list.
    pub fn entities_file(&self) -> PathBuf {
        self.root.join("ENTITIES")
    }

    /// The append-only operation log file.
    pub fn log_file(&self) -> PathBuf {
        self.root.join("LOG")
    }

    /// The directory holding one file per retained snapshot.
    pub fn snapshots_dir(&self) -> PathBuf {
        self.root.join("SNAPSHOTS")
    }

    /// Create the root and `SNAPSHOTS/` directories if they don't exist.
    pub fn create_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(self.snapshots_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_rooted_correctly() {
        let paths = SessionPaths::new("/tmp/example");
        assert_eq!(paths.entities_file(), Path::new("/tmp/example/ENTITIES"));
        assert_eq!(paths.log_file(), Path::new("/tmp/example/LOG"));
        assert_eq!(paths.snapshots_dir(), Path::new("/tmp/example/SNAPSHOTS"));
    }

    #[test]
    fn create_directories_makes_snapshots_dir() {
        let dir = tempfile::tempdir().unwrap();
        let paths = SessionPaths::new(dir.path());
        paths.create_directories().unwrap();
        assert!(paths.snapshots_dir().is_dir());
    }
}
