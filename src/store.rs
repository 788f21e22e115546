use std::io::Write;

use tracing::{debug, warn};

use crate::error::ErrorKind;
use crate::traits::Filesystem;
use crate::value::{self, ConfigValue, Document};

/// Fixed path of the configuration file on the backing filesystem.
const CONFIG_PATH: &str = "/config.json";

/// Default ceiling on the serialized document length, in bytes.
const DEFAULT_MAX_FILE_SIZE: usize = 2048;

/// Smallest accepted size limit: `{}` plus one minimal entry.
const MIN_FILE_SIZE: usize = 9;

/// Largest accepted size limit, bounding parse memory on small devices.
const MAX_FILE_SIZE: usize = 4096;

/// ConfigStore is a key-value configuration store persisted as a single
/// JSON object on a backing [`Filesystem`].
///
/// Every accessor performs a full read-modify-write cycle against the file:
/// there is no cross-call cache, so each call costs O(file size) and related
/// mutations are cheaper batched (see [`delete_keys`](ConfigStore::delete_keys))
/// than issued one key at a time.
///
/// Operations return `bool` (or the value/fallback for getters) and record
/// their outcome in a last-error channel readable via
/// [`last_error`](ConfigStore::last_error). A successful `set` always leaves
/// a well-formed, size-bounded document on disk; a failed `set` leaves the
/// prior file untouched.
///
/// One instance per file, one caller per instance. The store is not
/// internally synchronized and makes no multi-writer guarantee.
pub struct ConfigStore<F: Filesystem> {
    fs: F,
    initialized: bool,
    max_file_size: usize,
    last_error: ErrorKind,
}

impl<F: Filesystem> ConfigStore<F> {
    /// Create a store over the given filesystem. The store starts
    /// uninitialized; call [`start`](ConfigStore::start) before using the
    /// accessors.
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            initialized: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            last_error: ErrorKind::None,
        }
    }

    /// Mount the filesystem and ensure the configuration file exists,
    /// creating it as an empty object if absent.
    pub fn start(&mut self) -> bool {
        if self.initialized {
            return self.fail(ErrorKind::FsAlreadyRunning);
        }
        if let Err(e) = self.fs.mount() {
            warn!("config store: mount failed: {}", e);
            return self.fail(ErrorKind::FsInitFailed);
        }
        if !self.fs.exists(CONFIG_PATH) && !self.reset_config() {
            return self.fail(ErrorKind::FileCreateFailed);
        }
        self.initialized = true;
        self.ok()
    }

    /// Unmount the filesystem and return to the uninitialized state.
    pub fn stop(&mut self) -> bool {
        if !self.initialized {
            return self.fail(ErrorKind::FsNotRunning);
        }
        self.fs.unmount();
        self.initialized = false;
        self.ok()
    }

    /// Reset the configuration file to an empty JSON object.
    ///
    /// Note: unlike every other mutator this does not require the store to
    /// be running — it goes straight to the filesystem, so it can bootstrap
    /// a fresh file on backends that accept writes before `start`.
    pub fn reset_config(&mut self) -> bool {
        let mut writer = match self.fs.create(CONFIG_PATH) {
            Ok(w) => w,
            Err(e) => {
                debug!("config store: reset could not open file: {}", e);
                return self.fail(ErrorKind::FileCreateFailed);
            }
        };
        if writer.write_all(b"{}").and_then(|_| writer.flush()).is_err() {
            return self.fail(ErrorKind::FileCreateFailed);
        }
        self.ok()
    }

    /// Set the ceiling on the serialized document length, in bytes.
    ///
    /// Accepts 9..=4096 inclusive; out-of-range values are rejected and the
    /// existing limit stays in force. The limit applies to subsequent `set`
    /// calls only — it never rewrites or truncates the existing file.
    pub fn set_max_file_size(&mut self, bytes: usize) -> bool {
        if bytes < MIN_FILE_SIZE {
            return self.fail(ErrorKind::FileSizeTooSmall);
        }
        if bytes > MAX_FILE_SIZE {
            return self.fail(ErrorKind::FileSizeTooLarge);
        }
        self.max_file_size = bytes;
        self.ok()
    }

    /// Outcome of the most recent operation.
    pub fn last_error(&self) -> ErrorKind {
        self.last_error
    }

    /// Human-readable form of [`last_error`](ConfigStore::last_error).
    pub fn last_error_string(&self) -> String {
        self.last_error.to_string()
    }

    /// Set or overwrite `key`. Accepts integers, floats, and strings; an
    /// existing value is replaced regardless of its prior type.
    ///
    /// The mutated document is serialized in memory first and measured
    /// against the size limit: if it does not fit, the call fails with
    /// `FileSizeTooLarge` and the on-disk file is left untouched.
    pub fn set(&mut self, key: &str, value: impl Into<ConfigValue>) -> bool {
        if !self.initialized {
            return self.fail(ErrorKind::FsNotRunning);
        }
        let Some(mut doc) = self.load_document() else {
            return false;
        };
        doc.insert(key.to_string(), value.into().into_json());
        let serialized = match serde_json::to_string(&doc) {
            Ok(s) => s,
            Err(_) => return self.fail(ErrorKind::JsonSerializeFailed),
        };
        if serialized.len() > self.max_file_size {
            debug!(
                "config store: rejecting set of {:?}, {} bytes exceeds limit of {}",
                key,
                serialized.len(),
                self.max_file_size
            );
            return self.fail(ErrorKind::FileSizeTooLarge);
        }
        if !self.save_document(&doc) {
            return false;
        }
        self.ok()
    }

    /// Read `key` as an integer, or `fallback` if the key is absent, not
    /// numeric, or any error occurred. Floats truncate. A missing key is
    /// not an error: the last error is cleared to `None`.
    pub fn get_int(&mut self, key: &str, fallback: i64) -> i64 {
        if !self.initialized {
            self.last_error = ErrorKind::FsNotRunning;
            return fallback;
        }
        let Some(doc) = self.load_document() else {
            return fallback;
        };
        doc.get(key).and_then(value::as_int).unwrap_or(fallback)
    }

    /// Read `key` as a float, or `fallback`. Integers widen. Same error
    /// contract as [`get_int`](ConfigStore::get_int).
    pub fn get_float(&mut self, key: &str, fallback: f64) -> f64 {
        if !self.initialized {
            self.last_error = ErrorKind::FsNotRunning;
            return fallback;
        }
        let Some(doc) = self.load_document() else {
            return fallback;
        };
        doc.get(key).and_then(value::as_float).unwrap_or(fallback)
    }

    /// Read `key` as a string, or `fallback`. Strict: numeric values do not
    /// stringify. Same error contract as [`get_int`](ConfigStore::get_int).
    pub fn get_string(&mut self, key: &str, fallback: &str) -> String {
        if !self.initialized {
            self.last_error = ErrorKind::FsNotRunning;
            return fallback.to_string();
        }
        let Some(doc) = self.load_document() else {
            return fallback.to_string();
        };
        doc.get(key)
            .and_then(value::as_text)
            .unwrap_or(fallback)
            .to_string()
    }

    /// Serialize the whole document to a JSON string, or `fallback` on any
    /// failure.
    pub fn get_all(&mut self, fallback: &str) -> String {
        if !self.initialized {
            self.last_error = ErrorKind::FsNotRunning;
            return fallback.to_string();
        }
        let Some(doc) = self.load_document() else {
            return fallback.to_string();
        };
        match serde_json::to_string(&doc) {
            Ok(s) if !s.is_empty() => {
                self.last_error = ErrorKind::None;
                s
            }
            _ => {
                self.last_error = ErrorKind::JsonSerializeFailed;
                fallback.to_string()
            }
        }
    }

    /// Return the whole parsed document, or an empty document on any
    /// failure path (the last error reports what went wrong).
    pub fn get_all_json(&mut self) -> Document {
        if !self.initialized {
            self.last_error = ErrorKind::FsNotRunning;
            return Document::new();
        }
        self.load_document().unwrap_or_default()
    }

    /// Remove `key` and persist. Returns `true` only when an actual removal
    /// and successful save occurred; an absent key returns `false` with the
    /// last error cleared to `None` (absence is not a failure).
    pub fn delete_key(&mut self, key: &str) -> bool {
        if !self.initialized {
            return self.fail(ErrorKind::FsNotRunning);
        }
        let Some(mut doc) = self.load_document() else {
            return false;
        };
        if !doc.contains_key(key) {
            self.last_error = ErrorKind::None;
            return false;
        }
        doc.remove(key);
        if !self.save_document(&doc) {
            return false;
        }
        self.ok()
    }

    /// Remove every present key from `keys` in one load/save cycle,
    /// persisting once iff at least one removal occurred. Returns whether
    /// anything was removed. Takes any slice of string-likes, so fixed
    /// arrays and `Vec<String>` both work.
    pub fn delete_keys<S: AsRef<str>>(&mut self, keys: &[S]) -> bool {
        if !self.initialized {
            return self.fail(ErrorKind::FsNotRunning);
        }
        let Some(mut doc) = self.load_document() else {
            return false;
        };
        let mut removed = false;
        for key in keys {
            if doc.remove(key.as_ref()).is_some() {
                removed = true;
            }
        }
        if removed && !self.save_document(&doc) {
            return false;
        }
        self.last_error = ErrorKind::None;
        removed
    }

    /// Read and parse the whole file. Sole read path; callers check
    /// `initialized` first. Clears the last error on success.
    fn load_document(&mut self) -> Option<Document> {
        let reader = match self.fs.open_read(CONFIG_PATH) {
            Ok(r) => r,
            Err(e) => {
                debug!("config store: open for read failed: {}", e);
                self.last_error = ErrorKind::FileOpenFailed;
                return None;
            }
        };
        match serde_json::from_reader::<_, serde_json::Value>(reader) {
            Ok(serde_json::Value::Object(doc)) => {
                self.last_error = ErrorKind::None;
                Some(doc)
            }
            Ok(_) => {
                warn!("config store: top-level JSON value is not an object");
                self.last_error = ErrorKind::JsonParseFailed;
                None
            }
            Err(e) => {
                warn!("config store: parse failed: {}", e);
                self.last_error = ErrorKind::JsonParseFailed;
                None
            }
        }
    }

    /// Serialize the whole document over the file. Sole on-disk mutation
    /// point: the document is written whole, so no partial-key state is
    /// observable through the public surface.
    fn save_document(&mut self, doc: &Document) -> bool {
        let mut writer = match self.fs.create(CONFIG_PATH) {
            Ok(w) => w,
            Err(e) => {
                debug!("config store: open for write failed: {}", e);
                return self.fail(ErrorKind::FileOpenFailed);
            }
        };
        if serde_json::to_writer(&mut writer, doc).is_err() {
            return self.fail(ErrorKind::FileWriteFailed);
        }
        if let Err(e) = writer.flush() {
            debug!("config store: flush failed: {}", e);
            return self.fail(ErrorKind::FileWriteFailed);
        }
        self.ok()
    }

    fn fail(&mut self, kind: ErrorKind) -> bool {
        self.last_error = kind;
        false
    }

    fn ok(&mut self) -> bool {
        self.last_error = ErrorKind::None;
        true
    }
}
