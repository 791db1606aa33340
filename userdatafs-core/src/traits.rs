//! Core traits that define the file system provider interface.
//!
//! A provider always implements [`FileSystemProvider`]. The optional
//! operation groups live in separate traits and are reached through the
//! `as_*` accessors, so callers check for a capability instead of probing
//! for methods at runtime.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use tokio_util::sync::CancellationToken;
use crate::event::Registration;
use crate::types::{
    ResourceUri, FileStat, DirectoryEntry, FileChange, FileSystemCapabilities, FileHandle,
    FileOpenOptions, FileWriteOptions, FileOverwriteOptions, FileDeleteOptions,
    FileReadStreamOptions, WatchOptions, OperationResult,
};

/// Chunks produced by a streamed read. The stream ends after the last chunk
/// or after the first error.
pub type ReadStream = BoxStream<'static, OperationResult<Bytes>>;

/// Listener for batches of change records.
pub type ChangeListener = Box<dyn Fn(&[FileChange]) + Send + Sync>;

/// Listener for capability changes.
pub type CapabilityListener = Box<dyn Fn(&FileSystemCapabilities) + Send + Sync>;

/// The operations every provider implements.
#[async_trait]
pub trait FileSystemProvider: Send + Sync {
    /// The fixed capability flags of this provider.
    fn capabilities(&self) -> FileSystemCapabilities;

    /// Subscribes to capability changes.
    fn on_did_change_capabilities(&self, listener: CapabilityListener) -> Registration;

    /// Subscribes to batches of change records for watched resources.
    fn on_did_change_file(&self, listener: ChangeListener) -> Registration;

    /// Starts watching `resource`. Changes arrive through
    /// [`on_did_change_file`](Self::on_did_change_file) until the returned
    /// registration is released.
    fn watch(&self, resource: &ResourceUri, options: WatchOptions) -> OperationResult<Registration>;

    /// Gets metadata for a file or directory.
    async fn stat(&self, resource: &ResourceUri) -> OperationResult<FileStat>;

    /// Creates a directory. The parent must exist.
    async fn mkdir(&self, resource: &ResourceUri) -> OperationResult<()>;

    /// Reads the entries of a directory.
    async fn readdir(&self, resource: &ResourceUri) -> OperationResult<Vec<DirectoryEntry>>;

    /// Deletes a file or directory.
    async fn delete(&self, resource: &ResourceUri, options: FileDeleteOptions) -> OperationResult<()>;

    /// Moves a file or directory.
    async fn rename(
        &self,
        from: &ResourceUri,
        to: &ResourceUri,
        options: FileOverwriteOptions,
    ) -> OperationResult<()>;

    /// Whole-file read/write, if implemented.
    fn as_buffered(&self) -> Option<&dyn BufferedFileAccess> {
        None
    }

    /// Handle-based read/write, if implemented.
    fn as_handle_based(&self) -> Option<&dyn HandleFileAccess> {
        None
    }

    /// Streamed reads, if implemented.
    fn as_streamed(&self) -> Option<&dyn StreamedFileAccess> {
        None
    }
}

/// Whole-file reads and writes (`FILE_READ_WRITE`).
#[async_trait]
pub trait BufferedFileAccess: Send + Sync {
    async fn read_file(&self, resource: &ResourceUri) -> OperationResult<Bytes>;

    async fn write_file(
        &self,
        resource: &ResourceUri,
        content: Bytes,
        options: FileWriteOptions,
    ) -> OperationResult<()>;
}

/// Handle-based file access (`FILE_OPEN_READ_WRITE_CLOSE`).
#[async_trait]
pub trait HandleFileAccess: Send + Sync {
    async fn open(&self, resource: &ResourceUri, options: FileOpenOptions) -> OperationResult<FileHandle>;

    async fn close(&self, handle: FileHandle) -> OperationResult<()>;

    /// Reads into `buffer` from `position`. Returns the number of bytes read.
    async fn read(&self, handle: FileHandle, position: u64, buffer: &mut [u8]) -> OperationResult<usize>;

    /// Writes `data` at `position`. Returns the number of bytes written.
    async fn write(&self, handle: FileHandle, position: u64, data: &[u8]) -> OperationResult<usize>;
}

/// Streamed reads (`FILE_READ_STREAM`).
pub trait StreamedFileAccess: Send + Sync {
    /// Opens a stream of the file's contents. Implementations stop producing
    /// chunks once `cancellation` fires.
    ///
    /// Failures known before any data is read are returned directly rather
    /// than as the stream's first item.
    fn read_file_stream(
        &self,
        resource: &ResourceUri,
        options: FileReadStreamOptions,
        cancellation: CancellationToken,
    ) -> OperationResult<ReadStream>;
}
