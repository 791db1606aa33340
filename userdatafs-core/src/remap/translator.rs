//! Bidirectional mapping between the logical user data namespace and the
//! physical layout of the delegate.
//!
//! Logical resources under `backups/` live next to the physical data root's
//! parent rather than inside the data root:
//!
//! ```text
//! logical                      physical
//! /u                      ->   /data
//! /u/settings.json        ->   /data/settings.json
//! /u/backups/ws1/e.json   ->   /store/backups/ws1/e.json
//! ```

use crate::types::{ResourceUri, UriComparer, UserDataLayout, BACKUPS_SEGMENT};

/// Translates resources between the logical and physical namespaces.
///
/// Pure function of the three roots; holds no other state.
#[derive(Debug, Clone)]
pub struct PathTranslator {
    logical_root: ResourceUri,
    data_root: ResourceUri,
    backups_root: ResourceUri,
    comparer: UriComparer,
}

impl PathTranslator {
    pub fn new(layout: UserDataLayout, comparer: UriComparer) -> Self {
        Self {
            logical_root: layout.logical_root,
            data_root: layout.data_root,
            backups_root: layout.backups_root,
            comparer,
        }
    }

    pub fn logical_root(&self) -> &ResourceUri {
        &self.logical_root
    }

    pub fn data_root(&self) -> &ResourceUri {
        &self.data_root
    }

    pub fn backups_root(&self) -> &ResourceUri {
        &self.backups_root
    }

    pub fn comparer(&self) -> UriComparer {
        self.comparer
    }

    /// Returns true if `resource` is the logical root or lies below it.
    pub fn is_logical(&self, resource: &ResourceUri) -> bool {
        self.comparer.is_equal_or_parent(resource, &self.logical_root)
    }

    /// Maps a logical resource to the physical resource the delegate uses.
    ///
    /// # Panics
    ///
    /// Panics if `resource` is not inside the logical root. Callers only hand
    /// out logical resources, so this is a contract violation.
    pub fn to_physical(&self, resource: &ResourceUri) -> ResourceUri {
        let relative = match self.comparer.relative_path(&self.logical_root, resource) {
            Some(relative) => relative,
            None => panic!(
                "resource {} is outside the user data root {}",
                resource, self.logical_root
            ),
        };

        debug_assert!(self.is_logical(resource));

        let leading = relative.split('/').next().unwrap_or("");
        if self.comparer.segment_eq(leading, BACKUPS_SEGMENT) {
            self.backups_root.parent().join(&relative)
        } else {
            self.data_root.join(&relative)
        }
    }

    /// Maps a physical resource back into the logical namespace.
    ///
    /// Returns `None` for resources outside both the data root and the
    /// backups root.
    pub fn to_logical(&self, resource: &ResourceUri) -> Option<ResourceUri> {
        if let Some(relative) = self.comparer.relative_path(&self.data_root, resource) {
            return Some(self.logical_root.join(&relative));
        }
        if let Some(relative) = self.comparer.relative_path(&self.backups_root, resource) {
            return Some(self.logical_root.join(BACKUPS_SEGMENT).join(&relative));
        }
        None
    }
}
