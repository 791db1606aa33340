use std::fmt;
use crate::types::ResourceUri;

/// The kind of mutation a change record reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileChangeType {
    /// Contents or metadata changed
    Updated,
    /// The resource was created
    Added,
    /// The resource was removed
    Deleted,
}

impl fmt::Display for FileChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileChangeType::Updated => write!(f, "updated"),
            FileChangeType::Added => write!(f, "added"),
            FileChangeType::Deleted => write!(f, "deleted"),
        }
    }
}

/// One reported mutation at a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileChange {
    pub resource: ResourceUri,
    pub change_type: FileChangeType,
}

impl FileChange {
    pub fn new(resource: ResourceUri, change_type: FileChangeType) -> Self {
        Self { resource, change_type }
    }

    pub fn added(resource: ResourceUri) -> Self {
        Self::new(resource, FileChangeType::Added)
    }

    pub fn updated(resource: ResourceUri) -> Self {
        Self::new(resource, FileChangeType::Updated)
    }

    pub fn deleted(resource: ResourceUri) -> Self {
        Self::new(resource, FileChangeType::Deleted)
    }

    /// Returns the same change reported at a different resource.
    pub fn with_resource(&self, resource: ResourceUri) -> Self {
        Self {
            resource,
            change_type: self.change_type,
        }
    }
}
