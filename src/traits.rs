use std::io;

/// Filesystem provides the narrow storage contract the store runs against:
/// mount/unmount, an existence check, and whole-file read/write streams on
/// a fixed path.
///
/// The default implementation ([`HostFs`](crate::HostFs)) maps paths into a
/// directory on the host filesystem. Firmware targets implement this trait
/// over their flash filesystem driver; any backend providing these five
/// operations is sufficient.
pub trait Filesystem {
    /// Stream type returned by [`open_read`](Filesystem::open_read).
    type Reader: io::Read;
    /// Stream type returned by [`create`](Filesystem::create).
    type Writer: io::Write;

    /// Bring the filesystem up. Called once by `ConfigStore::start`.
    fn mount(&mut self) -> io::Result<()>;

    /// Bring the filesystem down. Called by `ConfigStore::stop`; must not fail.
    fn unmount(&mut self);

    /// Check whether a file exists at `path`.
    fn exists(&mut self, path: &str) -> bool;

    /// Open the file at `path` for reading.
    fn open_read(&mut self, path: &str) -> io::Result<Self::Reader>;

    /// Open the file at `path` for writing, truncating any existing content.
    fn create(&mut self, path: &str) -> io::Result<Self::Writer>;
}
