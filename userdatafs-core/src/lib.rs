//! # UserDataFS Core
//!
//! A file system provider that presents a single logical "user data" root on
//! top of a delegate provider whose physical layout differs: backups live in
//! a directory next to the data directory's parent instead of inside it.
//!
//! ## Overview
//!
//! [`UserDataFileSystemProvider`](remap::UserDataFileSystemProvider) wraps any
//! [`FileSystemProvider`](traits::FileSystemProvider) and:
//!
//! - translates every logical resource to its physical location before
//!   forwarding the operation,
//! - maps the delegate's change records back into the logical namespace and
//!   drops the ones that fall outside it,
//! - mirrors the delegate's capabilities, failing gated operations the
//!   delegate cannot serve.
//!
//! ## Basic Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use userdatafs_core::remap::UserDataFileSystemProvider;
//! use userdatafs_core::traits::BufferedFileAccess;
//! use userdatafs_core::types::{ResourceUri, UserDataLayout};
//!
//! async fn example(disk: Arc<dyn userdatafs_core::traits::FileSystemProvider>) -> userdatafs_core::types::OperationResult<()> {
//!     let layout = UserDataLayout::new(
//!         "vscode-userdata:///User",
//!         "file:///home/me/.config/Code/User",
//!         "file:///home/me/.config/Code/backups",
//!     );
//!     let provider = UserDataFileSystemProvider::new(layout, disk)?;
//!
//!     // Reads file:///home/me/.config/Code/User/settings.json
//!     let settings = provider
//!         .read_file(&ResourceUri::parse("vscode-userdata:///User/settings.json"))
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`]: resource identifiers, metadata, capabilities, errors, layout
//! - [`traits`]: the provider contract and its optional capability groups
//! - [`event`]: observer lists and one-shot registrations
//! - [`remap`]: path translation and the remapping provider
//! - [`stats`]: forwarding counters

pub mod types;
pub mod traits;
pub mod event;
pub mod remap;
pub mod stats;
