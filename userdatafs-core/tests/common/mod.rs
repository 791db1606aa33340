//! A minimal in-memory delegate built only on the public API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use userdatafs_core::event::{Emitter, Registration};
use userdatafs_core::traits::{BufferedFileAccess, CapabilityListener, ChangeListener, FileSystemProvider};
use userdatafs_core::types::{
    DirectoryEntry, FileChange, FileDeleteOptions, FileOverwriteOptions, FileStat,
    FileSystemCapabilities, FileSystemError, FileType, FileWriteOptions, OperationResult,
    ResourceUri, WatchOptions,
};

#[derive(Default)]
pub struct MemoryDisk {
    files: Mutex<HashMap<String, Bytes>>,
    changes: Emitter<Vec<FileChange>>,
    capability_changes: Emitter<FileSystemCapabilities>,
    operations: AtomicUsize,
}

impl MemoryDisk {
    pub fn emit(&self, batch: Vec<FileChange>) {
        self.changes.fire(&batch);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.lock().contains_key(path)
    }

    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl FileSystemProvider for MemoryDisk {
    fn capabilities(&self) -> FileSystemCapabilities {
        FileSystemCapabilities::FILE_READ_WRITE | FileSystemCapabilities::PATH_CASE_SENSITIVE
    }

    fn on_did_change_capabilities(&self, listener: CapabilityListener) -> Registration {
        self.capability_changes.subscribe(move |caps: &FileSystemCapabilities| listener(caps))
    }

    fn on_did_change_file(&self, listener: ChangeListener) -> Registration {
        self.changes.subscribe(move |batch: &Vec<FileChange>| listener(batch.as_slice()))
    }

    fn watch(&self, _resource: &ResourceUri, _options: WatchOptions) -> OperationResult<Registration> {
        Ok(Registration::empty())
    }

    async fn stat(&self, resource: &ResourceUri) -> OperationResult<FileStat> {
        self.touch();
        match self.files.lock().get(resource.path()) {
            Some(content) => Ok(FileStat::new(FileType::File, content.len() as u64)),
            None => Err(FileSystemError::NotFound { resource: resource.clone() }),
        }
    }

    async fn mkdir(&self, _resource: &ResourceUri) -> OperationResult<()> {
        self.touch();
        Ok(())
    }

    async fn readdir(&self, resource: &ResourceUri) -> OperationResult<Vec<DirectoryEntry>> {
        self.touch();
        let prefix = format!("{}/", resource.path().trim_end_matches('/'));
        let mut entries: Vec<DirectoryEntry> = self
            .files
            .lock()
            .keys()
            .filter_map(|path| path.strip_prefix(&prefix))
            .filter(|rest| !rest.contains('/'))
            .map(|name| DirectoryEntry::new(name, FileType::File))
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn delete(&self, resource: &ResourceUri, _options: FileDeleteOptions) -> OperationResult<()> {
        self.touch();
        self.files
            .lock()
            .remove(resource.path())
            .map(|_| ())
            .ok_or_else(|| FileSystemError::NotFound { resource: resource.clone() })
    }

    async fn rename(&self, from: &ResourceUri, to: &ResourceUri, _options: FileOverwriteOptions) -> OperationResult<()> {
        self.touch();
        let mut files = self.files.lock();
        let content = files
            .remove(from.path())
            .ok_or_else(|| FileSystemError::NotFound { resource: from.clone() })?;
        files.insert(to.path().to_string(), content);
        Ok(())
    }

    fn as_buffered(&self) -> Option<&dyn BufferedFileAccess> {
        Some(self)
    }
}

#[async_trait]
impl BufferedFileAccess for MemoryDisk {
    async fn read_file(&self, resource: &ResourceUri) -> OperationResult<Bytes> {
        self.touch();
        self.files
            .lock()
            .get(resource.path())
            .cloned()
            .ok_or_else(|| FileSystemError::NotFound { resource: resource.clone() })
    }

    async fn write_file(&self, resource: &ResourceUri, content: Bytes, _options: FileWriteOptions) -> OperationResult<()> {
        self.touch();
        self.files.lock().insert(resource.path().to_string(), content);
        Ok(())
    }
}
