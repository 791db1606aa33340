// Module declarations
pub mod uri;
pub mod metadata;
pub mod operations;
pub mod capabilities;
pub mod change;
pub mod error;
pub mod config;

// Re-export all types from submodules
pub use uri::{ResourceUri, UriComparer, FILE_SCHEME};
pub use metadata::{FileType, FilePermissions, FileStat};
pub use operations::{
    FileHandle, FileOpenOptions, FileWriteOptions, FileOverwriteOptions, FileDeleteOptions,
    FileReadStreamOptions, WatchOptions, DirectoryEntry,
};
pub use capabilities::{FileSystemCapabilities, Capability};
pub use change::{FileChange, FileChangeType};
pub use error::{FileSystemError, OperationResult};
pub use config::{UserDataLayout, BACKUPS_SEGMENT};
