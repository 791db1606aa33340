use std::fmt;

/// Capability flags a file system provider advertises.
///
/// Flags are fixed for the lifetime of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileSystemCapabilities(u32);

impl FileSystemCapabilities {
    /// Whole-file `read_file` / `write_file`
    pub const FILE_READ_WRITE: Self = Self(1 << 1);
    /// Handle-based `open` / `read` / `write` / `close`
    pub const FILE_OPEN_READ_WRITE_CLOSE: Self = Self(1 << 2);
    /// Streamed `read_file_stream`
    pub const FILE_READ_STREAM: Self = Self(1 << 4);
    /// Native folder copy
    pub const FILE_FOLDER_COPY: Self = Self(1 << 3);
    /// Paths compare case-sensitively
    pub const PATH_CASE_SENSITIVE: Self = Self(1 << 10);
    /// All resources are read-only
    pub const READONLY: Self = Self(1 << 11);
    /// Deleting can move to the trash
    pub const TRASH: Self = Self(1 << 12);
    /// Writes can remove a write lock
    pub const FILE_WRITE_UNLOCK: Self = Self(1 << 13);

    /// Creates an empty set of flags.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Creates a set containing all flags.
    pub const fn all() -> Self {
        Self(
            Self::FILE_READ_WRITE.0
                | Self::FILE_OPEN_READ_WRITE_CLOSE.0
                | Self::FILE_READ_STREAM.0
                | Self::FILE_FOLDER_COPY.0
                | Self::PATH_CASE_SENSITIVE.0
                | Self::READONLY.0
                | Self::TRASH.0
                | Self::FILE_WRITE_UNLOCK.0,
        )
    }

    /// Returns the raw value of the flags.
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Creates flags from raw bits, truncating unknown bits.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::all().0)
    }

    /// Returns true if no flags are set.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if all flags in `other` are set.
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of the flags.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns the intersection of the flags.
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns the difference of the flags.
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Returns true if the flag backing `capability` is advertised.
    pub const fn supports(&self, capability: Capability) -> bool {
        self.contains(capability.flag())
    }
}

impl Default for FileSystemCapabilities {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::ops::BitOr for FileSystemCapabilities {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for FileSystemCapabilities {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl std::ops::BitAnd for FileSystemCapabilities {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl std::ops::Sub for FileSystemCapabilities {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.difference(rhs)
    }
}

/// An optional operation group that gates forwarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `read_file` / `write_file`
    Buffered,
    /// `open` / `read` / `write` / `close`
    HandleBased,
    /// `read_file_stream`
    Streamed,
}

impl Capability {
    /// The capability flag that advertises this group.
    pub const fn flag(&self) -> FileSystemCapabilities {
        match self {
            Capability::Buffered => FileSystemCapabilities::FILE_READ_WRITE,
            Capability::HandleBased => FileSystemCapabilities::FILE_OPEN_READ_WRITE_CLOSE,
            Capability::Streamed => FileSystemCapabilities::FILE_READ_STREAM,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Buffered => "buffered read/write",
            Capability::HandleBased => "handle-based read/write",
            Capability::Streamed => "streamed read",
        };
        f.write_str(name)
    }
}
