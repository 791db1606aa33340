//! In-memory delegate that records every call it receives.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::stream::{self, StreamExt};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use crate::event::{Emitter, Registration};
use crate::traits::{
    BufferedFileAccess, CapabilityListener, ChangeListener, FileSystemProvider,
    HandleFileAccess, ReadStream, StreamedFileAccess,
};
use crate::types::{
    DirectoryEntry, FileChange, FileDeleteOptions, FileHandle, FileOpenOptions,
    FileOverwriteOptions, FileReadStreamOptions, FileStat, FileSystemCapabilities,
    FileSystemError, FileType, FileWriteOptions, OperationResult, ResourceUri, WatchOptions,
};

pub(crate) struct SpyProvider {
    capabilities: FileSystemCapabilities,
    fail_watch: bool,
    calls: Mutex<Vec<String>>,
    files: Mutex<HashMap<ResourceUri, Bytes>>,
    dirs: Mutex<HashSet<ResourceUri>>,
    handles: Mutex<HashMap<u64, ResourceUri>>,
    next_handle: AtomicU64,
    changes: Emitter<Vec<FileChange>>,
    capability_changes: Emitter<FileSystemCapabilities>,
    watches: Mutex<Vec<(ResourceUri, WatchOptions)>>,
    active_watches: Arc<AtomicUsize>,
    watch_releases: Arc<AtomicUsize>,
    last_stream_token: Mutex<Option<CancellationToken>>,
}

impl SpyProvider {
    pub(crate) fn new(capabilities: FileSystemCapabilities) -> Self {
        Self {
            capabilities,
            fail_watch: false,
            calls: Mutex::new(Vec::new()),
            files: Mutex::new(HashMap::new()),
            dirs: Mutex::new(HashSet::new()),
            handles: Mutex::new(HashMap::new()),
            next_handle: AtomicU64::new(1),
            changes: Emitter::new(),
            capability_changes: Emitter::new(),
            watches: Mutex::new(Vec::new()),
            active_watches: Arc::new(AtomicUsize::new(0)),
            watch_releases: Arc::new(AtomicUsize::new(0)),
            last_stream_token: Mutex::new(None),
        }
    }

    /// Makes every `watch` call fail with `NotFound`.
    pub(crate) fn failing_watch(mut self) -> Self {
        self.fail_watch = true;
        self
    }

    pub(crate) fn fire(&self, batch: Vec<FileChange>) {
        self.changes.fire(&batch);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub(crate) fn watches(&self) -> Vec<(ResourceUri, WatchOptions)> {
        self.watches.lock().clone()
    }

    pub(crate) fn active_watches(&self) -> usize {
        self.active_watches.load(Ordering::SeqCst)
    }

    pub(crate) fn watch_releases(&self) -> usize {
        self.watch_releases.load(Ordering::SeqCst)
    }

    pub(crate) fn change_listeners(&self) -> usize {
        self.changes.listener_count()
    }

    pub(crate) fn put_file(&self, resource: ResourceUri, content: Bytes) {
        self.files.lock().insert(resource, content);
    }

    pub(crate) fn file(&self, resource: &ResourceUri) -> Option<Bytes> {
        self.files.lock().get(resource).cloned()
    }

    pub(crate) fn last_stream_token(&self) -> Option<CancellationToken> {
        self.last_stream_token.lock().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }

    fn resource_for(&self, handle: FileHandle) -> OperationResult<ResourceUri> {
        self.handles
            .lock()
            .get(&handle.id())
            .cloned()
            .ok_or_else(|| FileSystemError::Other(format!("unknown {}", handle)))
    }
}

#[async_trait]
impl FileSystemProvider for SpyProvider {
    fn capabilities(&self) -> FileSystemCapabilities {
        self.capabilities
    }

    fn on_did_change_capabilities(&self, listener: CapabilityListener) -> Registration {
        self.capability_changes.subscribe(move |caps: &FileSystemCapabilities| listener(caps))
    }

    fn on_did_change_file(&self, listener: ChangeListener) -> Registration {
        self.changes.subscribe(move |changes: &Vec<FileChange>| listener(changes.as_slice()))
    }

    fn watch(&self, resource: &ResourceUri, options: WatchOptions) -> OperationResult<Registration> {
        self.record(format!(
            "watch {} recursive={} excludes={}",
            resource,
            options.recursive,
            options.excludes.len()
        ));
        if self.fail_watch {
            return Err(FileSystemError::NotFound { resource: resource.clone() });
        }
        self.watches.lock().push((resource.clone(), options));
        self.active_watches.fetch_add(1, Ordering::SeqCst);

        let active = self.active_watches.clone();
        let releases = self.watch_releases.clone();
        Ok(Registration::new(move || {
            active.fetch_sub(1, Ordering::SeqCst);
            releases.fetch_add(1, Ordering::SeqCst);
        }))
    }

    async fn stat(&self, resource: &ResourceUri) -> OperationResult<FileStat> {
        self.record(format!("stat {}", resource));
        if let Some(content) = self.files.lock().get(resource) {
            return Ok(FileStat::new(FileType::File, content.len() as u64));
        }
        if self.dirs.lock().contains(resource) {
            return Ok(FileStat::new(FileType::Directory, 0));
        }
        Err(FileSystemError::NotFound { resource: resource.clone() })
    }

    async fn mkdir(&self, resource: &ResourceUri) -> OperationResult<()> {
        self.record(format!("mkdir {}", resource));
        self.dirs.lock().insert(resource.clone());
        Ok(())
    }

    async fn readdir(&self, resource: &ResourceUri) -> OperationResult<Vec<DirectoryEntry>> {
        self.record(format!("readdir {}", resource));
        let entries = self
            .files
            .lock()
            .keys()
            .filter(|file| file.parent() == *resource)
            .map(|file| DirectoryEntry::new(file.basename(), FileType::File))
            .collect();
        Ok(entries)
    }

    async fn delete(&self, resource: &ResourceUri, options: FileDeleteOptions) -> OperationResult<()> {
        self.record(format!("delete {} recursive={}", resource, options.recursive));
        self.files.lock().remove(resource);
        self.dirs.lock().remove(resource);
        Ok(())
    }

    async fn rename(
        &self,
        from: &ResourceUri,
        to: &ResourceUri,
        options: FileOverwriteOptions,
    ) -> OperationResult<()> {
        self.record(format!("rename {} -> {} overwrite={}", from, to, options.overwrite));
        let mut files = self.files.lock();
        if let Some(content) = files.remove(from) {
            files.insert(to.clone(), content);
        }
        Ok(())
    }

    fn as_buffered(&self) -> Option<&dyn BufferedFileAccess> {
        self.capabilities
            .contains(FileSystemCapabilities::FILE_READ_WRITE)
            .then_some(self as &dyn BufferedFileAccess)
    }

    fn as_handle_based(&self) -> Option<&dyn HandleFileAccess> {
        self.capabilities
            .contains(FileSystemCapabilities::FILE_OPEN_READ_WRITE_CLOSE)
            .then_some(self as &dyn HandleFileAccess)
    }

    fn as_streamed(&self) -> Option<&dyn StreamedFileAccess> {
        self.capabilities
            .contains(FileSystemCapabilities::FILE_READ_STREAM)
            .then_some(self as &dyn StreamedFileAccess)
    }
}

#[async_trait]
impl BufferedFileAccess for SpyProvider {
    async fn read_file(&self, resource: &ResourceUri) -> OperationResult<Bytes> {
        self.record(format!("read_file {}", resource));
        self.file(resource)
            .ok_or_else(|| FileSystemError::NotFound { resource: resource.clone() })
    }

    async fn write_file(
        &self,
        resource: &ResourceUri,
        content: Bytes,
        _options: FileWriteOptions,
    ) -> OperationResult<()> {
        self.record(format!("write_file {} len={}", resource, content.len()));
        self.put_file(resource.clone(), content);
        Ok(())
    }
}

#[async_trait]
impl HandleFileAccess for SpyProvider {
    async fn open(&self, resource: &ResourceUri, options: FileOpenOptions) -> OperationResult<FileHandle> {
        self.record(format!("open {} create={}", resource, options.create));
        let id = self.next_handle.fetch_add(1, Ordering::SeqCst);
        self.handles.lock().insert(id, resource.clone());
        Ok(FileHandle::new(id))
    }

    async fn close(&self, handle: FileHandle) -> OperationResult<()> {
        self.record(format!("close {}", handle.id()));
        self.handles.lock().remove(&handle.id());
        Ok(())
    }

    async fn read(&self, handle: FileHandle, position: u64, buffer: &mut [u8]) -> OperationResult<usize> {
        self.record(format!("read {} @{} len={}", handle.id(), position, buffer.len()));
        let resource = self.resource_for(handle)?;
        let content = self.file(&resource).unwrap_or_default();
        let start = (position as usize).min(content.len());
        let end = (start + buffer.len()).min(content.len());
        buffer[..end - start].copy_from_slice(&content[start..end]);
        Ok(end - start)
    }

    async fn write(&self, handle: FileHandle, position: u64, data: &[u8]) -> OperationResult<usize> {
        self.record(format!("write {} @{} len={}", handle.id(), position, data.len()));
        let resource = self.resource_for(handle)?;
        let mut content = BytesMut::from(&self.file(&resource).unwrap_or_default()[..]);
        let start = position as usize;
        if content.len() < start + data.len() {
            content.resize(start + data.len(), 0);
        }
        content[start..start + data.len()].copy_from_slice(data);
        self.put_file(resource, content.freeze());
        Ok(data.len())
    }
}

impl StreamedFileAccess for SpyProvider {
    fn read_file_stream(
        &self,
        resource: &ResourceUri,
        options: FileReadStreamOptions,
        cancellation: CancellationToken,
    ) -> OperationResult<ReadStream> {
        self.record(format!("read_file_stream {}", resource));
        *self.last_stream_token.lock() = Some(cancellation);
        let result = match self.file(resource) {
            Some(content) => {
                let start = (options.position.unwrap_or(0) as usize).min(content.len());
                let end = options
                    .length
                    .map_or(content.len(), |len| (start + len as usize).min(content.len()));
                Ok(content.slice(start..end))
            }
            None => Err(FileSystemError::NotFound { resource: resource.clone() }),
        };
        Ok(stream::iter(vec![result]).boxed())
    }
}
