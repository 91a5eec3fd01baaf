//! Generic slash-delimited path grammar.
//!
//! `FsPath` owns a native (byte) path and interprets it lazily as
//! `root-name? root-directory? relative-path`:
//! - a root-name is `//name` (exactly two leading slashes followed by a
//!   non-slash) or a bare `//`;
//! - a root-directory is the first slash after the root-name (three or more
//!   leading slashes are a root-directory with redundant separators);
//! - iteration yields the root-name, then `/` for the root-directory, then each
//!   segment of the relative part, and a final `.` when the path ends in a
//!   separator.
//!
//! Drive letters (`c:`) and backslashes are ordinary filename characters.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::ops::Div;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};

const SEP: u8 = b'/';

/// Owned path value with generic decomposition semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FsPath {
    inner: OsString,
}

/// Position of one element inside the path buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Span {
    RootName(usize, usize),
    RootDir(usize),
    Name(usize, usize),
    /// Synthetic "." for a trailing separator.
    TrailingDot,
}

impl FsPath {
    pub fn new(s: impl AsRef<OsStr>) -> Self {
        Self { inner: s.as_ref().to_os_string() }
    }

    fn from_bytes(b: &[u8]) -> Self {
        Self { inner: OsString::from_vec(b.to_vec()) }
    }

    fn bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }

    pub fn as_os_str(&self) -> &OsStr {
        &self.inner
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.inner)
    }

    pub fn into_path_buf(self) -> PathBuf {
        PathBuf::from(self.inner)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// End offset of the root-name, 0 if there is none.
    fn root_name_end(&self) -> usize {
        let b = self.bytes();
        if b.len() >= 2 && b[0] == SEP && b[1] == SEP && b.get(2) != Some(&SEP) {
            b[2..]
                .iter()
                .position(|&c| c == SEP)
                .map_or(b.len(), |i| i + 2)
        } else {
            0
        }
    }

    /// Offset of the root-directory separator, if any.
    fn root_dir_pos(&self) -> Option<usize> {
        let rn = self.root_name_end();
        (self.bytes().get(rn) == Some(&SEP)).then_some(rn)
    }

    fn relative_start(&self) -> usize {
        let b = self.bytes();
        let mut i = self.root_name_end();
        while i < b.len() && b[i] == SEP {
            i += 1;
        }
        i
    }

    fn spans(&self) -> Vec<Span> {
        let b = self.bytes();
        let mut out = Vec::new();
        let rn = self.root_name_end();
        if rn > 0 {
            out.push(Span::RootName(0, rn));
        }
        if let Some(rd) = self.root_dir_pos() {
            out.push(Span::RootDir(rd));
        }
        let mut pos = self.relative_start();
        while pos < b.len() {
            let end = b[pos..].iter().position(|&c| c == SEP).map_or(b.len(), |i| pos + i);
            out.push(Span::Name(pos, end));
            let mut next = end;
            while next < b.len() && b[next] == SEP {
                next += 1;
            }
            if next > end && next == b.len() {
                out.push(Span::TrailingDot);
            }
            pos = next;
        }
        out
    }

    fn span_bytes(&self, span: Span) -> &[u8] {
        let b = self.bytes();
        match span {
            Span::RootName(s, e) | Span::Name(s, e) => &b[s..e],
            Span::RootDir(p) => &b[p..p + 1],
            Span::TrailingDot => b".",
        }
    }

    fn span_end(span: Span, len: usize) -> usize {
        match span {
            Span::RootName(_, e) | Span::Name(_, e) => e,
            Span::RootDir(p) => p + 1,
            Span::TrailingDot => len,
        }
    }

    pub fn root_name(&self) -> FsPath {
        Self::from_bytes(&self.bytes()[..self.root_name_end()])
    }

    pub fn root_directory(&self) -> FsPath {
        match self.root_dir_pos() {
            Some(_) => Self::from_bytes(b"/"),
            None => FsPath::default(),
        }
    }

    /// `root_name + root_directory`.
    pub fn root_path(&self) -> FsPath {
        let end = self.root_dir_pos().map_or(self.root_name_end(), |p| p + 1);
        Self::from_bytes(&self.bytes()[..end])
    }

    pub fn relative_path(&self) -> FsPath {
        Self::from_bytes(&self.bytes()[self.relative_start()..])
    }

    /// Everything up to the end of the element before the filename.
    pub fn parent_path(&self) -> FsPath {
        let spans = self.spans();
        if spans.len() < 2 {
            return FsPath::default();
        }
        let end = Self::span_end(spans[spans.len() - 2], self.bytes().len());
        Self::from_bytes(&self.bytes()[..end])
    }

    /// Last element of the path.
    pub fn filename(&self) -> FsPath {
        match self.spans().last() {
            Some(&span) => Self::from_bytes(self.span_bytes(span)),
            None => FsPath::default(),
        }
    }

    fn split_filename(&self) -> (FsPath, FsPath) {
        let name = self.filename();
        let b = name.bytes();
        if b == b"." || b == b".." {
            return (name.clone(), FsPath::default());
        }
        match b.iter().rposition(|&c| c == b'.') {
            Some(dot) if dot > 0 => (Self::from_bytes(&b[..dot]), Self::from_bytes(&b[dot..])),
            _ => (name.clone(), FsPath::default()),
        }
    }

    /// Filename without its extension.
    pub fn stem(&self) -> FsPath {
        self.split_filename().0
    }

    /// Extension including the leading dot.
    pub fn extension(&self) -> FsPath {
        self.split_filename().1
    }

    pub fn has_root_name(&self) -> bool {
        self.root_name_end() > 0
    }

    pub fn has_root_directory(&self) -> bool {
        self.root_dir_pos().is_some()
    }

    pub fn has_root_path(&self) -> bool {
        self.has_root_name() || self.has_root_directory()
    }

    pub fn has_relative_path(&self) -> bool {
        self.relative_start() < self.bytes().len()
    }

    pub fn has_parent_path(&self) -> bool {
        !self.parent_path().is_empty()
    }

    pub fn has_filename(&self) -> bool {
        !self.is_empty()
    }

    pub fn has_stem(&self) -> bool {
        !self.stem().is_empty()
    }

    pub fn has_extension(&self) -> bool {
        !self.extension().is_empty()
    }

    pub fn is_absolute(&self) -> bool {
        self.has_root_directory()
    }

    pub fn is_relative(&self) -> bool {
        !self.is_absolute()
    }

    /// Append `other`, inserting a separator unless it would be redundant,
    /// `other` is empty, or `self` is empty.
    pub fn push(&mut self, other: impl AsRef<OsStr>) {
        let other = other.as_ref().as_bytes();
        if other.is_empty() {
            return;
        }
        let mut buf = std::mem::take(&mut self.inner).into_vec();
        if !buf.is_empty() && buf.last() != Some(&SEP) && other[0] != SEP {
            buf.push(SEP);
        }
        buf.extend_from_slice(other);
        self.inner = OsString::from_vec(buf);
    }

    pub fn join(&self, other: impl AsRef<OsStr>) -> FsPath {
        let mut p = self.clone();
        p.push(other);
        p
    }

    /// Elements in order, see the module docs.
    pub fn iter(&self) -> Iter<'_> {
        Iter { path: self, spans: self.spans().into_iter() }
    }
}

/// Iterator over the elements of an [`FsPath`].
pub struct Iter<'a> {
    path: &'a FsPath,
    spans: std::vec::IntoIter<Span>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a OsStr;

    fn next(&mut self) -> Option<Self::Item> {
        let span = self.spans.next()?;
        Some(OsStr::from_bytes(self.path.span_bytes(span)))
    }
}

impl<'a> IntoIterator for &'a FsPath {
    type Item = &'a OsStr;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl AsRef<Path> for FsPath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl AsRef<OsStr> for FsPath {
    fn as_ref(&self) -> &OsStr {
        &self.inner
    }
}

impl From<&str> for FsPath {
    fn from(s: &str) -> Self {
        FsPath::new(s)
    }
}

impl From<String> for FsPath {
    fn from(s: String) -> Self {
        Self { inner: s.into() }
    }
}

impl From<&Path> for FsPath {
    fn from(p: &Path) -> Self {
        FsPath::new(p)
    }
}

impl From<PathBuf> for FsPath {
    fn from(p: PathBuf) -> Self {
        Self { inner: p.into_os_string() }
    }
}

impl From<FsPath> for PathBuf {
    fn from(p: FsPath) -> Self {
        p.into_path_buf()
    }
}

impl PartialEq<str> for FsPath {
    fn eq(&self, other: &str) -> bool {
        self.bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for FsPath {
    fn eq(&self, other: &&str) -> bool {
        self.bytes() == other.as_bytes()
    }
}

impl fmt::Display for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_path().display())
    }
}

impl<T: AsRef<OsStr>> Div<T> for &FsPath {
    type Output = FsPath;

    fn div(self, rhs: T) -> FsPath {
        self.join(rhs)
    }
}

impl<T: AsRef<OsStr>> Div<T> for FsPath {
    type Output = FsPath;

    fn div(mut self, rhs: T) -> FsPath {
        self.push(rhs);
        self
    }
}
