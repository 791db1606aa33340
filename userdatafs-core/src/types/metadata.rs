use std::time::SystemTime;

/// Represents the type of a file system entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FileType {
    /// Type could not be determined
    Unknown,
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Symbolic link
    SymbolicLink,
}

/// Permissions a provider reports for an entry, beyond plain read access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FilePermissions {
    /// Whether the entry cannot be written
    pub readonly: bool,
    /// Whether the entry is write-locked but may be unlocked on write
    pub locked: bool,
}

/// Metadata returned by `stat`.
#[derive(Debug, Clone, PartialEq)]
pub struct FileStat {
    /// Type of file system entry
    pub file_type: FileType,
    /// Creation time
    pub ctime: SystemTime,
    /// Last modification time
    pub mtime: SystemTime,
    /// Size in bytes
    pub size: u64,
    /// Permissions, if the provider reports any
    pub permissions: Option<FilePermissions>,
}

impl FileStat {
    pub fn new(file_type: FileType, size: u64) -> Self {
        let now = SystemTime::now();
        Self {
            file_type,
            ctime: now,
            mtime: now,
            size,
            permissions: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    pub fn is_directory(&self) -> bool {
        self.file_type == FileType::Directory
    }
}
