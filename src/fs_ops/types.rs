//! Value types shared by the operations: file status, permission bits,
//! copy options and filesystem space.

use bitflags::bitflags;
use std::fmt;

/// Kind of filesystem object a probe found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// Status could not be determined because the probe failed.
    None,
    NotFound,
    Regular,
    Directory,
    Symlink,
    Block,
    Character,
    Fifo,
    Socket,
    Unknown,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileType::None => "none",
            FileType::NotFound => "not_found",
            FileType::Regular => "regular",
            FileType::Directory => "directory",
            FileType::Symlink => "symlink",
            FileType::Block => "block",
            FileType::Character => "character",
            FileType::Fifo => "fifo",
            FileType::Socket => "socket",
            FileType::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

bitflags! {
    /// POSIX permission bits plus the modifiers accepted by `permissions`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Perms: u32 {
        const OWNER_READ = 0o400;
        const OWNER_WRITE = 0o200;
        const OWNER_EXEC = 0o100;
        const OWNER_ALL = 0o700;
        const GROUP_READ = 0o040;
        const GROUP_WRITE = 0o020;
        const GROUP_EXEC = 0o010;
        const GROUP_ALL = 0o070;
        const OTHERS_READ = 0o004;
        const OTHERS_WRITE = 0o002;
        const OTHERS_EXEC = 0o001;
        const OTHERS_ALL = 0o007;
        const ALL = 0o777;
        const SET_UID = 0o4000;
        const SET_GID = 0o2000;
        const STICKY_BIT = 0o1000;
        const MASK = 0o7777;

        /// OR the given bits into the current permissions.
        const ADD_PERMS = 0x1_0000;
        /// Clear the given bits from the current permissions.
        const REMOVE_PERMS = 0x2_0000;
        /// Apply to the symlink target rather than the link itself.
        const RESOLVE_SYMLINKS = 0x4_0000;
    }
}

impl Perms {
    /// Permission bits from a raw `st_mode`.
    pub fn from_mode(mode: u32) -> Self {
        Perms::from_bits_truncate(mode & Perms::MASK.bits())
    }

    /// Raw mode for chmod/mkdir (modifier bits dropped).
    pub fn mode(self) -> u32 {
        (self & Perms::MASK).bits()
    }
}

bitflags! {
    /// Controls `copy` and `copy_file`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CopyOptions: u32 {
        const SKIP_EXISTING = 1;
        const OVERWRITE_EXISTING = 1 << 1;
        const UPDATE_EXISTING = 1 << 2;
        const RECURSIVE = 1 << 3;
        const COPY_SYMLINKS = 1 << 4;
        const SKIP_SYMLINKS = 1 << 5;
        const DIRECTORIES_ONLY = 1 << 6;
        const CREATE_SYMLINKS = 1 << 7;
        const CREATE_HARD_LINKS = 1 << 8;
    }
}

impl CopyOptions {
    /// Parse a single option name as used in config files and the CLI
    /// (`recursive`, `skip_existing`, `overwrite-existing`, ...).
    pub fn parse_name(name: &str) -> Option<Self> {
        let opt = match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "none" => CopyOptions::empty(),
            "skip_existing" => CopyOptions::SKIP_EXISTING,
            "overwrite_existing" => CopyOptions::OVERWRITE_EXISTING,
            "update_existing" => CopyOptions::UPDATE_EXISTING,
            "recursive" => CopyOptions::RECURSIVE,
            "copy_symlinks" => CopyOptions::COPY_SYMLINKS,
            "skip_symlinks" => CopyOptions::SKIP_SYMLINKS,
            "directories_only" => CopyOptions::DIRECTORIES_ONLY,
            "create_symlinks" => CopyOptions::CREATE_SYMLINKS,
            "create_hard_links" => CopyOptions::CREATE_HARD_LINKS,
            _ => return None,
        };
        Some(opt)
    }

    /// Parse a comma-separated list of option names.
    pub fn parse_list(list: &str) -> Option<Self> {
        list.split(',')
            .filter(|s| !s.trim().is_empty())
            .try_fold(CopyOptions::empty(), |acc, name| {
                Self::parse_name(name).map(|o| acc | o)
            })
    }
}

/// Result of a probe: file type plus permission bits. Statuses are compared
/// for equality only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStatus {
    file_type: FileType,
    perms: Perms,
}

impl FileStatus {
    pub fn new(file_type: FileType, perms: Perms) -> Self {
        Self { file_type, perms }
    }

    /// Status of a path known not to exist.
    pub fn not_found() -> Self {
        Self::new(FileType::NotFound, Perms::empty())
    }

    /// Status that could not be determined.
    pub fn none() -> Self {
        Self::new(FileType::None, Perms::empty())
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn permissions(&self) -> Perms {
        self.perms
    }

    pub fn status_known(&self) -> bool {
        self.file_type != FileType::None
    }

    pub fn exists(&self) -> bool {
        self.status_known() && self.file_type != FileType::NotFound
    }

    pub fn is_regular_file(&self) -> bool {
        self.file_type == FileType::Regular
    }

    pub fn is_directory(&self) -> bool {
        self.file_type == FileType::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.file_type == FileType::Symlink
    }

    pub fn is_block_file(&self) -> bool {
        self.file_type == FileType::Block
    }

    pub fn is_character_file(&self) -> bool {
        self.file_type == FileType::Character
    }

    pub fn is_fifo(&self) -> bool {
        self.file_type == FileType::Fifo
    }

    pub fn is_socket(&self) -> bool {
        self.file_type == FileType::Socket
    }

    /// Exists but is none of regular file, directory or symlink.
    pub fn is_other(&self) -> bool {
        self.exists() && !self.is_regular_file() && !self.is_directory() && !self.is_symlink()
    }
}

/// Filesystem capacity in bytes, as reported by statvfs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceInfo {
    pub capacity: u64,
    pub free: u64,
    pub available: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perms_from_mode_keeps_only_mask_bits() {
        let p = Perms::from_mode(0o100644);
        assert_eq!(p.mode(), 0o644);
        assert!(p.contains(Perms::OWNER_READ | Perms::OWNER_WRITE));
        assert!(!p.contains(Perms::OWNER_EXEC));
    }

    #[test]
    fn mode_drops_modifiers() {
        let p = Perms::OWNER_ALL | Perms::ADD_PERMS | Perms::RESOLVE_SYMLINKS;
        assert_eq!(p.mode(), 0o700);
    }

    #[test]
    fn status_predicates() {
        assert!(!FileStatus::none().status_known());
        assert!(!FileStatus::none().exists());
        assert!(FileStatus::not_found().status_known());
        assert!(!FileStatus::not_found().exists());
        let fifo = FileStatus::new(FileType::Fifo, Perms::empty());
        assert!(fifo.is_other());
        assert!(fifo.is_fifo());
        let dir = FileStatus::new(FileType::Directory, Perms::ALL);
        assert!(!dir.is_other());
        assert!(dir.exists());
    }

    #[test]
    fn copy_options_parse_list() {
        let o = CopyOptions::parse_list("recursive, skip-symlinks,overwrite_existing").unwrap();
        assert_eq!(
            o,
            CopyOptions::RECURSIVE | CopyOptions::SKIP_SYMLINKS | CopyOptions::OVERWRITE_EXISTING
        );
        assert_eq!(CopyOptions::parse_list(""), Some(CopyOptions::empty()));
        assert!(CopyOptions::parse_list("recursive,bogus").is_none());
    }
}
