use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::path_utils;
use crate::platform::{self, Access};

mod directory;
mod file;
mod filter;
mod link;
mod move_to;
mod stat;

pub use directory::Directory;
pub use file::File;
pub use filter::Children;
pub use link::Link;
pub use stat::NodeStat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Directory,
    File,
    Link,
}

impl NodeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
            Self::Link => "link",
        }
    }

    /// Classify whatever is at `path` without following a final symlink.
    ///
    /// Symlinks (dangling or not) win over directories, directories over everything else. Any
    /// other existing entry (FIFO, socket, device) is treated as a file. Returns `None` when
    /// nothing can be found at `path`.
    pub fn of_path(path: &Path) -> Option<Self> {
        let meta = fs::symlink_metadata(path).ok()?;
        Some(Self::from_file_type(meta.file_type()))
    }

    pub(crate) fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            Self::Link
        } else if file_type.is_dir() {
            Self::Directory
        } else {
            Self::File
        }
    }
}

/// Capabilities shared by every node type.
///
/// Provided methods describe the generic behaviour; [`Link`] and [`Directory`] override the
/// pieces where their semantics differ.
pub trait FsNode {
    fn pathname(&self) -> &Path;

    fn kind(&self) -> NodeKind;

    /// Whether the pathname resolves on disk (following symlinks).
    fn exists(&self) -> bool {
        self.pathname().exists()
    }

    /// The directory containing this node, or `None` for `/` and `.`.
    fn parent(&self) -> Option<Directory> {
        path_utils::parent_path(self.pathname()).map(Directory::from_raw)
    }

    fn basename(&self) -> &OsStr {
        path_utils::basename(self.pathname())
    }

    fn extension(&self) -> Option<String> {
        path_utils::extension(self.pathname())
    }

    fn is_readable(&self) -> bool {
        platform::has_access(self.pathname(), Access::Read)
    }

    fn is_writable(&self) -> bool {
        platform::has_access(self.pathname(), Access::Write)
    }

    fn is_executable(&self) -> bool {
        platform::has_access(self.pathname(), Access::Execute)
    }

    fn is_dir(&self) -> bool {
        self.pathname().is_dir()
    }

    fn is_file(&self) -> bool {
        self.pathname().is_file()
    }

    fn is_deletable(&self) -> bool {
        parent_allows_delete(self)
    }

    /// Apply a permission mask (follows symlinks, like `chmod`).
    fn set_perms(&self, mode: u32) -> Result<()> {
        set_mode(self.pathname(), mode)
    }

    fn stat(&self) -> Result<NodeStat> {
        stat::stat_path(self.pathname())
    }

    fn delete(&self) -> Result<()>;

    /// Move this node to `target`, returning the node at the new location.
    ///
    /// When `target` is an existing directory the node lands inside it under its own basename,
    /// as with `mv <src> <dir>`.
    fn move_to(&self, target: &Node) -> Result<Node>;
}

/// Creation of a node of a concrete type.
pub trait Create: FsNode {
    type Options;

    fn create(&self, options: &Self::Options) -> Result<()>;
}

/// The generic deletability rule: the node exists and its parent is writable and traversable.
pub(crate) fn parent_allows_delete<N: FsNode + ?Sized>(node: &N) -> bool {
    if !node.exists() {
        return false;
    }
    match node.parent() {
        Some(parent) => parent.is_writable() && parent.is_executable(),
        None => false,
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|err| Error::io_path("set_permissions", path, err))?;
    tracing::debug!(path = %path.display(), mode = format_args!("{mode:o}"), "set permissions");
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    let mut permissions = fs::metadata(path)
        .map_err(|err| Error::io_path("metadata", path, err))?
        .permissions();
    permissions.set_readonly(mode & 0o222 == 0);
    fs::set_permissions(path, permissions)
        .map_err(|err| Error::io_path("set_permissions", path, err))?;
    tracing::debug!(path = %path.display(), mode = format_args!("{mode:o}"), "set permissions");
    Ok(())
}

/// Any node, typed by what was found on disk (or requested, for nodes that do not exist yet).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Directory(Directory),
    File(File),
    Link(Link),
}

impl Node {
    /// Build a correctly typed node for an existing pathname.
    ///
    /// A leading `~/` is expanded. Fails with [`Error::NoSuchNode`] when nothing (not even a
    /// dangling symlink) exists at the path.
    pub fn from_pathname(pathname: impl AsRef<Path>) -> Result<Self> {
        let pathname = path_utils::expand_home(pathname.as_ref());
        let kind = NodeKind::of_path(&pathname).ok_or_else(|| {
            Error::no_such_node("create node object for", &pathname, "No such path")
        })?;
        tracing::trace!(path = %pathname.display(), kind = kind.as_str(), "classified node");
        Ok(Self::from_kind(kind, pathname))
    }

    pub(crate) fn from_kind(kind: NodeKind, pathname: PathBuf) -> Self {
        match kind {
            NodeKind::Directory => Self::Directory(Directory::from_raw(pathname)),
            NodeKind::File => Self::File(File::from_raw(pathname)),
            NodeKind::Link => Self::Link(Link::from_raw(pathname)),
        }
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            Self::Directory(dir) => Some(dir),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            Self::File(file) => Some(file),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Self::Link(link) => Some(link),
            _ => None,
        }
    }

    pub fn into_directory(self) -> Option<Directory> {
        match self {
            Self::Directory(dir) => Some(dir),
            _ => None,
        }
    }

    pub fn into_file(self) -> Option<File> {
        match self {
            Self::File(file) => Some(file),
            _ => None,
        }
    }

    pub fn into_link(self) -> Option<Link> {
        match self {
            Self::Link(link) => Some(link),
            _ => None,
        }
    }

    fn as_dyn(&self) -> &dyn FsNode {
        match self {
            Self::Directory(dir) => dir,
            Self::File(file) => file,
            Self::Link(link) => link,
        }
    }
}

impl FsNode for Node {
    fn pathname(&self) -> &Path {
        self.as_dyn().pathname()
    }

    fn kind(&self) -> NodeKind {
        self.as_dyn().kind()
    }

    fn exists(&self) -> bool {
        self.as_dyn().exists()
    }

    fn parent(&self) -> Option<Directory> {
        self.as_dyn().parent()
    }

    fn is_readable(&self) -> bool {
        self.as_dyn().is_readable()
    }

    fn is_writable(&self) -> bool {
        self.as_dyn().is_writable()
    }

    fn is_executable(&self) -> bool {
        self.as_dyn().is_executable()
    }

    fn is_dir(&self) -> bool {
        self.as_dyn().is_dir()
    }

    fn is_file(&self) -> bool {
        self.as_dyn().is_file()
    }

    fn is_deletable(&self) -> bool {
        self.as_dyn().is_deletable()
    }

    fn set_perms(&self, mode: u32) -> Result<()> {
        self.as_dyn().set_perms(mode)
    }

    fn stat(&self) -> Result<NodeStat> {
        self.as_dyn().stat()
    }

    fn delete(&self) -> Result<()> {
        self.as_dyn().delete()
    }

    fn move_to(&self, target: &Node) -> Result<Node> {
        self.as_dyn().move_to(target)
    }
}

impl From<Directory> for Node {
    fn from(dir: Directory) -> Self {
        Self::Directory(dir)
    }
}

impl From<File> for Node {
    fn from(file: File) -> Self {
        Self::File(file)
    }
}

impl From<Link> for Node {
    fn from(link: Link) -> Self {
        Self::Link(link)
    }
}
