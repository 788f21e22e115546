use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::traits::Filesystem;

/// HostFs is a [`Filesystem`] implementation backed by a directory on the
/// host filesystem. It stands in for the device flash mount in host builds
/// and tests; mounting creates the root directory, unmounting just drops
/// the mounted flag.
pub struct HostFs {
    root: PathBuf,
    mounted: bool,
}

impl HostFs {
    /// Create a HostFs rooted at `root`. Nothing touches the disk until
    /// [`mount`](Filesystem::mount).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            mounted: false,
        }
    }

    /// Resolve a store path (e.g. `config.json`) under the root.
    fn resolve(&self, path: &str) -> PathBuf {
        // Store paths are flash-absolute ("/config.json"); strip the
        // leading slash so they land under the root directory.
        self.root.join(path.trim_start_matches('/'))
    }

    /// The directory this filesystem is rooted at.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Filesystem for HostFs {
    type Reader = File;
    type Writer = File;

    fn mount(&mut self) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        self.mounted = true;
        debug!("HostFs: mounted at {:?}", self.root);
        Ok(())
    }

    fn unmount(&mut self) {
        self.mounted = false;
        debug!("HostFs: unmounted {:?}", self.root);
    }

    fn exists(&mut self, path: &str) -> bool {
        self.mounted && self.resolve(path).is_file()
    }

    fn open_read(&mut self, path: &str) -> io::Result<Self::Reader> {
        if !self.mounted {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "not mounted"));
        }
        File::open(self.resolve(path))
    }

    fn create(&mut self, path: &str) -> io::Result<Self::Writer> {
        if !self.mounted {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "not mounted"));
        }
        File::create(self.resolve(path))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn write_then_read_back() {
        let tmp = TempDir::new().unwrap();
        let mut fs = HostFs::new(tmp.path());
        fs.mount().unwrap();

        assert!(!fs.exists("config.json"));
        let mut w = fs.create("config.json").unwrap();
        w.write_all(b"{}").unwrap();
        drop(w);

        assert!(fs.exists("config.json"));
        let mut contents = String::new();
        fs.open_read("config.json")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "{}");
    }

    #[test]
    fn leading_slash_resolves_under_root() {
        let tmp = TempDir::new().unwrap();
        let mut fs = HostFs::new(tmp.path());
        fs.mount().unwrap();

        fs.create("/config.json").unwrap().write_all(b"{}").unwrap();
        assert!(fs.exists("config.json"));
        assert!(tmp.path().join("config.json").is_file());
    }

    #[test]
    fn unmounted_refuses_io() {
        let tmp = TempDir::new().unwrap();
        let mut fs = HostFs::new(tmp.path());

        assert!(!fs.exists("config.json"));
        assert!(fs.open_read("config.json").is_err());
        assert!(fs.create("config.json").is_err());

        fs.mount().unwrap();
        fs.create("config.json").unwrap().write_all(b"{}").unwrap();
        fs.unmount();
        assert!(fs.open_read("config.json").is_err());
    }
}
