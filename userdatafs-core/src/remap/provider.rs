//! A provider that presents the user data namespace on top of a delegate
//! provider with a different physical layout.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, trace, warn};
use crate::event::{Emitter, Registration};
use crate::remap::PathTranslator;
use crate::stats::{ForwardingStats, OperationType, StatsSnapshot};
use crate::traits::{
    BufferedFileAccess, CapabilityListener, ChangeListener, FileSystemProvider,
    HandleFileAccess, ReadStream, StreamedFileAccess,
};
use crate::types::{
    Capability, DirectoryEntry, FileChange, FileDeleteOptions, FileHandle, FileOpenOptions,
    FileOverwriteOptions, FileReadStreamOptions, FileStat, FileSystemCapabilities,
    FileSystemError, FileWriteOptions, OperationResult, ResourceUri, UriComparer,
    UserDataLayout, WatchOptions,
};

/// Exposes a logical user data root backed by a delegate provider.
///
/// Every resource argument is translated to the delegate's physical layout
/// before forwarding. Change records reported by the delegate are mapped
/// back into the logical namespace; records outside the data and backups
/// roots are dropped. Capability flags mirror the delegate's, and gated
/// operations fail with [`FileSystemError::Unsupported`] without touching
/// the delegate when it lacks them.
///
/// The provider watches the physical data root (non-recursively) and
/// listens to the delegate's change stream from construction until
/// [`dispose`](Self::dispose) or drop.
pub struct UserDataFileSystemProvider {
    translator: Arc<PathTranslator>,
    delegate: Arc<dyn FileSystemProvider>,
    capabilities: FileSystemCapabilities,
    on_did_change_file: Arc<Emitter<Vec<FileChange>>>,
    on_did_change_capabilities: Emitter<FileSystemCapabilities>,
    stats: Arc<ForwardingStats>,
    registrations: Mutex<Vec<Registration>>,
    disposed: AtomicBool,
}

impl UserDataFileSystemProvider {
    /// Wraps `delegate`, subscribing to its changes and watching the
    /// physical data root.
    ///
    /// The data root is assumed to exist; no check is made. An error from
    /// the delegate's `watch` is returned unchanged.
    #[instrument(skip_all, fields(logical_root = %layout.logical_root))]
    pub fn new(
        layout: UserDataLayout,
        delegate: Arc<dyn FileSystemProvider>,
    ) -> OperationResult<Self> {
        let capabilities = delegate.capabilities();
        let comparer = UriComparer::new(
            !capabilities.contains(FileSystemCapabilities::PATH_CASE_SENSITIVE),
        );
        if !layout.backups_root_is_conventional(comparer) {
            warn!(
                "Backups root {} does not end in the backups segment; backups will not round-trip",
                layout.backups_root
            );
        }

        let translator = Arc::new(PathTranslator::new(layout, comparer));
        let on_did_change_file = Arc::new(Emitter::new());
        let stats = Arc::new(ForwardingStats::new());

        let subscription = {
            let translator = translator.clone();
            let emitter = on_did_change_file.clone();
            let stats = stats.clone();
            delegate.on_did_change_file(Box::new(move |changes: &[FileChange]| {
                republish(&translator, &emitter, &stats, changes);
            }))
        };
        let watch = delegate.watch(translator.data_root(), WatchOptions::shallow())?;

        info!(
            "User data provider ready: data root {}, backups root {}",
            translator.data_root(),
            translator.backups_root()
        );

        Ok(Self {
            translator,
            delegate,
            capabilities,
            on_did_change_file,
            on_did_change_capabilities: Emitter::new(),
            stats,
            registrations: Mutex::new(vec![subscription, watch]),
            disposed: AtomicBool::new(false),
        })
    }

    /// Convenience constructor taking the three roots directly.
    pub fn with_roots(
        logical_root: ResourceUri,
        data_root: ResourceUri,
        backups_root: ResourceUri,
        delegate: Arc<dyn FileSystemProvider>,
    ) -> OperationResult<Self> {
        Self::new(
            UserDataLayout {
                logical_root,
                data_root,
                backups_root,
            },
            delegate,
        )
    }

    pub fn translator(&self) -> &PathTranslator {
        &self.translator
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Releases the data root watch and the delegate subscription. Only the
    /// first call has an effect.
    ///
    /// Operations keep forwarding afterwards; only change republication stops.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        let registrations = std::mem::take(&mut *self.registrations.lock());
        for mut registration in registrations {
            registration.dispose();
        }
        info!("User data provider for {} disposed", self.translator.logical_root());
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn to_physical(&self, op_type: OperationType, resource: &ResourceUri) -> ResourceUri {
        let physical = self.translator.to_physical(resource);
        trace!("{} {} -> {}", op_type.name(), resource, physical);
        self.stats.record_forwarded(op_type);
        physical
    }

    fn to_physical_pair(
        &self,
        op_type: OperationType,
        from: &ResourceUri,
        to: &ResourceUri,
    ) -> (ResourceUri, ResourceUri) {
        let physical_from = self.translator.to_physical(from);
        let physical_to = self.translator.to_physical(to);
        trace!("{} {} -> {}, {} -> {}", op_type.name(), from, physical_from, to, physical_to);
        self.stats.record_forwarded(op_type);
        (physical_from, physical_to)
    }

    fn reject(&self, operation: OperationType, capability: Capability) -> FileSystemError {
        warn!("{} rejected: delegate lacks {} capability", operation.name(), capability);
        self.stats.record_unsupported();
        FileSystemError::unsupported(operation.name(), capability)
    }

    fn buffered(&self, operation: OperationType) -> OperationResult<&dyn BufferedFileAccess> {
        self.capabilities
            .supports(Capability::Buffered)
            .then(|| self.delegate.as_buffered())
            .flatten()
            .ok_or_else(|| self.reject(operation, Capability::Buffered))
    }

    fn handle_based(&self, operation: OperationType) -> OperationResult<&dyn HandleFileAccess> {
        self.capabilities
            .supports(Capability::HandleBased)
            .then(|| self.delegate.as_handle_based())
            .flatten()
            .ok_or_else(|| self.reject(operation, Capability::HandleBased))
    }

    fn streamed(&self, operation: OperationType) -> OperationResult<&dyn StreamedFileAccess> {
        self.capabilities
            .supports(Capability::Streamed)
            .then(|| self.delegate.as_streamed())
            .flatten()
            .ok_or_else(|| self.reject(operation, Capability::Streamed))
    }

    fn record_handle_op(&self, op_type: OperationType, handle: FileHandle) {
        trace!("{} {}", op_type.name(), handle);
        self.stats.record_forwarded(op_type);
    }
}

/// Maps one physical batch into the logical namespace and emits it, unless
/// nothing in it maps.
fn republish(
    translator: &PathTranslator,
    emitter: &Emitter<Vec<FileChange>>,
    stats: &ForwardingStats,
    changes: &[FileChange],
) {
    let logical: Vec<FileChange> = changes
        .iter()
        .filter_map(|change| match translator.to_logical(&change.resource) {
            Some(resource) => Some(change.with_resource(resource)),
            None => {
                debug!("Dropping {} change outside user data: {}", change.change_type, change.resource);
                None
            }
        })
        .collect();

    stats.record_batch(logical.len(), changes.len() - logical.len());
    if logical.is_empty() {
        return;
    }
    debug!("Republishing {} of {} changes", logical.len(), changes.len());
    emitter.fire(&logical);
}

impl Drop for UserDataFileSystemProvider {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[async_trait]
impl FileSystemProvider for UserDataFileSystemProvider {
    fn capabilities(&self) -> FileSystemCapabilities {
        self.capabilities
    }

    fn on_did_change_capabilities(&self, listener: CapabilityListener) -> Registration {
        self.on_did_change_capabilities.subscribe(move |caps: &FileSystemCapabilities| listener(caps))
    }

    fn on_did_change_file(&self, listener: ChangeListener) -> Registration {
        self.on_did_change_file.subscribe(move |changes: &Vec<FileChange>| listener(changes.as_slice()))
    }

    fn watch(&self, resource: &ResourceUri, options: WatchOptions) -> OperationResult<Registration> {
        let physical = self.to_physical(OperationType::Watch, resource);
        self.delegate.watch(&physical, options)
    }

    async fn stat(&self, resource: &ResourceUri) -> OperationResult<FileStat> {
        let physical = self.to_physical(OperationType::Stat, resource);
        self.delegate.stat(&physical).await
    }

    async fn mkdir(&self, resource: &ResourceUri) -> OperationResult<()> {
        let physical = self.to_physical(OperationType::Mkdir, resource);
        self.delegate.mkdir(&physical).await
    }

    async fn readdir(&self, resource: &ResourceUri) -> OperationResult<Vec<DirectoryEntry>> {
        let physical = self.to_physical(OperationType::ReadDir, resource);
        self.delegate.readdir(&physical).await
    }

    async fn delete(&self, resource: &ResourceUri, options: FileDeleteOptions) -> OperationResult<()> {
        let physical = self.to_physical(OperationType::Delete, resource);
        self.delegate.delete(&physical, options).await
    }

    async fn rename(
        &self,
        from: &ResourceUri,
        to: &ResourceUri,
        options: FileOverwriteOptions,
    ) -> OperationResult<()> {
        let (physical_from, physical_to) = self.to_physical_pair(OperationType::Rename, from, to);
        self.delegate.rename(&physical_from, &physical_to, options).await
    }

    fn as_buffered(&self) -> Option<&dyn BufferedFileAccess> {
        let supported = self.capabilities.supports(Capability::Buffered)
            && self.delegate.as_buffered().is_some();
        supported.then_some(self as &dyn BufferedFileAccess)
    }

    fn as_handle_based(&self) -> Option<&dyn HandleFileAccess> {
        let supported = self.capabilities.supports(Capability::HandleBased)
            && self.delegate.as_handle_based().is_some();
        supported.then_some(self as &dyn HandleFileAccess)
    }

    fn as_streamed(&self) -> Option<&dyn StreamedFileAccess> {
        let supported = self.capabilities.supports(Capability::Streamed)
            && self.delegate.as_streamed().is_some();
        supported.then_some(self as &dyn StreamedFileAccess)
    }
}

#[async_trait]
impl BufferedFileAccess for UserDataFileSystemProvider {
    async fn read_file(&self, resource: &ResourceUri) -> OperationResult<Bytes> {
        let delegate = self.buffered(OperationType::ReadFile)?;
        let physical = self.to_physical(OperationType::ReadFile, resource);
        delegate.read_file(&physical).await
    }

    async fn write_file(
        &self,
        resource: &ResourceUri,
        content: Bytes,
        options: FileWriteOptions,
    ) -> OperationResult<()> {
        let delegate = self.buffered(OperationType::WriteFile)?;
        let physical = self.to_physical(OperationType::WriteFile, resource);
        delegate.write_file(&physical, content, options).await
    }
}

#[async_trait]
impl HandleFileAccess for UserDataFileSystemProvider {
    async fn open(&self, resource: &ResourceUri, options: FileOpenOptions) -> OperationResult<FileHandle> {
        let delegate = self.handle_based(OperationType::Open)?;
        let physical = self.to_physical(OperationType::Open, resource);
        delegate.open(&physical, options).await
    }

    async fn close(&self, handle: FileHandle) -> OperationResult<()> {
        let delegate = self.handle_based(OperationType::Close)?;
        self.record_handle_op(OperationType::Close, handle);
        delegate.close(handle).await
    }

    async fn read(&self, handle: FileHandle, position: u64, buffer: &mut [u8]) -> OperationResult<usize> {
        let delegate = self.handle_based(OperationType::Read)?;
        self.record_handle_op(OperationType::Read, handle);
        delegate.read(handle, position, buffer).await
    }

    async fn write(&self, handle: FileHandle, position: u64, data: &[u8]) -> OperationResult<usize> {
        let delegate = self.handle_based(OperationType::Write)?;
        self.record_handle_op(OperationType::Write, handle);
        delegate.write(handle, position, data).await
    }
}

impl StreamedFileAccess for UserDataFileSystemProvider {
    fn read_file_stream(
        &self,
        resource: &ResourceUri,
        options: FileReadStreamOptions,
        cancellation: CancellationToken,
    ) -> OperationResult<ReadStream> {
        let delegate = self.streamed(OperationType::ReadFileStream)?;
        let physical = self.to_physical(OperationType::ReadFileStream, resource);
        delegate.read_file_stream(&physical, options, cancellation)
    }
}
