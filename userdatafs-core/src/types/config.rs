//! Layout configuration for the user data namespace.

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::types::{FileSystemError, OperationResult, ResourceUri, UriComparer};

/// Leading logical segment that selects the backups subtree.
pub const BACKUPS_SEGMENT: &str = "backups";

/// The three roots that define the logical-to-physical mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDataLayout {
    /// Virtual root presented to consumers
    pub logical_root: ResourceUri,

    /// Physical directory holding most user data
    pub data_root: ResourceUri,

    /// Physical directory holding backups, outside `data_root`
    pub backups_root: ResourceUri,
}

impl UserDataLayout {
    pub fn new(
        logical_root: impl Into<ResourceUri>,
        data_root: impl Into<ResourceUri>,
        backups_root: impl Into<ResourceUri>,
    ) -> Self {
        Self {
            logical_root: logical_root.into(),
            data_root: data_root.into(),
            backups_root: backups_root.into(),
        }
    }

    /// Parses a layout from JSON.
    pub fn from_json_str(json: &str) -> OperationResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FileSystemError::Other(format!("Invalid user data layout: {}", e)))
    }

    /// Reads a layout from a JSON file.
    pub fn load(path: &Path) -> OperationResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Returns true if the backups root ends in the backups segment, which
    /// the sibling-of-parent reconstruction relies on.
    pub fn backups_root_is_conventional(&self, comparer: UriComparer) -> bool {
        comparer.segment_eq(self.backups_root.basename(), BACKUPS_SEGMENT)
    }

    /// Validates the layout, reporting every problem found.
    pub fn validate(&self, comparer: UriComparer) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !self.data_root.scheme().eq_ignore_ascii_case(self.backups_root.scheme())
            || !self.data_root.authority().eq_ignore_ascii_case(self.backups_root.authority())
        {
            errors.push(format!(
                "Data root {} and backups root {} must share scheme and authority",
                self.data_root, self.backups_root
            ));
        }

        if self.backups_root.is_root() {
            errors.push("Backups root must have a parent directory".to_string());
        } else if !self.backups_root_is_conventional(comparer) {
            errors.push(format!(
                "Backups root {} must end in '{}'",
                self.backups_root, BACKUPS_SEGMENT
            ));
        }

        if comparer.is_equal_or_parent(&self.backups_root, &self.data_root) {
            errors.push(format!(
                "Backups root {} must not be inside data root {}",
                self.backups_root, self.data_root
            ));
        } else if comparer.is_equal_or_parent(&self.data_root, &self.backups_root) {
            errors.push(format!(
                "Data root {} must not be inside backups root {}",
                self.data_root, self.backups_root
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
