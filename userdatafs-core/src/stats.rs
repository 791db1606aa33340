//! Counters for forwarded operations and republished change records.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Operations a remapping provider forwards to its delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Watch,
    Stat,
    Mkdir,
    Rename,
    ReadDir,
    Delete,
    ReadFile,
    WriteFile,
    ReadFileStream,
    Open,
    Close,
    Read,
    Write,
}

impl OperationType {
    pub const ALL: [OperationType; 13] = [
        OperationType::Watch,
        OperationType::Stat,
        OperationType::Mkdir,
        OperationType::Rename,
        OperationType::ReadDir,
        OperationType::Delete,
        OperationType::ReadFile,
        OperationType::WriteFile,
        OperationType::ReadFileStream,
        OperationType::Open,
        OperationType::Close,
        OperationType::Read,
        OperationType::Write,
    ];

    /// Returns a human-readable name for the operation type.
    pub fn name(&self) -> &'static str {
        match self {
            OperationType::Watch => "watch",
            OperationType::Stat => "stat",
            OperationType::Mkdir => "mkdir",
            OperationType::Rename => "rename",
            OperationType::ReadDir => "readdir",
            OperationType::Delete => "delete",
            OperationType::ReadFile => "read_file",
            OperationType::WriteFile => "write_file",
            OperationType::ReadFileStream => "read_file_stream",
            OperationType::Open => "open",
            OperationType::Close => "close",
            OperationType::Read => "read",
            OperationType::Write => "write",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Point-in-time copy of [`ForwardingStats`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub forwarded: HashMap<OperationType, u64>,
    pub rejected_unsupported: u64,
    pub changes_republished: u64,
    pub changes_dropped: u64,
    pub batches_emitted: u64,
}

impl StatsSnapshot {
    /// Total operations forwarded to the delegate.
    pub fn total_forwarded(&self) -> u64 {
        self.forwarded.values().sum()
    }
}

/// Lock-free counters kept by a remapping provider.
#[derive(Debug, Default)]
pub struct ForwardingStats {
    forwarded: [AtomicU64; 13],
    rejected_unsupported: AtomicU64,
    changes_republished: AtomicU64,
    changes_dropped: AtomicU64,
    batches_emitted: AtomicU64,
}

impl ForwardingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_forwarded(&self, op_type: OperationType) {
        self.forwarded[op_type.index()].fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unsupported(&self) {
        self.rejected_unsupported.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one filtered batch: `kept` records republished, `dropped` discarded.
    pub fn record_batch(&self, kept: usize, dropped: usize) {
        self.changes_republished.fetch_add(kept as u64, Ordering::Relaxed);
        self.changes_dropped.fetch_add(dropped as u64, Ordering::Relaxed);
        if kept > 0 {
            self.batches_emitted.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Gets the count for a specific operation type.
    pub fn forwarded_count(&self, op_type: OperationType) -> u64 {
        self.forwarded[op_type.index()].load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            forwarded: OperationType::ALL
                .iter()
                .map(|op| (*op, self.forwarded_count(*op)))
                .collect(),
            rejected_unsupported: self.rejected_unsupported.load(Ordering::Relaxed),
            changes_republished: self.changes_republished.load(Ordering::Relaxed),
            changes_dropped: self.changes_dropped.load(Ordering::Relaxed),
            batches_emitted: self.batches_emitted.load(Ordering::Relaxed),
        }
    }

    /// Resets all statistics to zero.
    pub fn reset(&self) {
        for counter in &self.forwarded {
            counter.store(0, Ordering::Relaxed);
        }
        self.rejected_unsupported.store(0, Ordering::Relaxed);
        self.changes_republished.store(0, Ordering::Relaxed);
        self.changes_dropped.store(0, Ordering::Relaxed);
        self.batches_emitted.store(0, Ordering::Relaxed);
    }
}
