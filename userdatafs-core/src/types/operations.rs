use std::fmt;
use crate::types::FileType;

/// A numeric handle to a file opened through a handle-based provider.
///
/// Handles are owned by the provider that issued them; wrappers only pass
/// them through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileHandle(u64);

impl FileHandle {
    /// Creates a new FileHandle with the given ID.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying handle ID.
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileHandle({})", self.0)
    }
}

/// Options for `open`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileOpenOptions {
    /// Open for writing, creating the file if needed
    pub create: bool,
    /// Remove a write lock before opening for writing
    pub unlock: bool,
}

impl FileOpenOptions {
    pub fn read() -> Self {
        Self::default()
    }

    pub fn write() -> Self {
        Self { create: true, unlock: false }
    }
}

/// Options for `write_file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileWriteOptions {
    /// Create the file if it does not exist
    pub create: bool,
    /// Replace the file if it exists
    pub overwrite: bool,
    /// Remove a write lock before writing
    pub unlock: bool,
}

impl Default for FileWriteOptions {
    fn default() -> Self {
        Self {
            create: true,
            overwrite: true,
            unlock: false,
        }
    }
}

/// Options for `rename`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileOverwriteOptions {
    pub overwrite: bool,
}

/// Options for `delete`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileDeleteOptions {
    /// Delete directories with their contents
    pub recursive: bool,
    /// Move to the trash instead of deleting, if the provider supports it
    pub use_trash: bool,
}

/// Options for `read_file_stream`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileReadStreamOptions {
    /// Byte offset to start reading from
    pub position: Option<u64>,
    /// Maximum number of bytes to read
    pub length: Option<u64>,
}

/// Options for `watch`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchOptions {
    /// Report changes in nested directories too
    pub recursive: bool,
    /// Glob patterns of paths to ignore
    pub excludes: Vec<String>,
}

impl WatchOptions {
    /// Non-recursive watch with no exclusions.
    pub fn shallow() -> Self {
        Self::default()
    }
}

/// Represents a single entry in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// The name of the file or directory
    pub name: String,
    /// The type of the entry
    pub file_type: FileType,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, file_type: FileType) -> Self {
        Self {
            name: name.into(),
            file_type,
        }
    }

    /// Returns true if this entry is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self.file_type, FileType::Directory)
    }
}
