use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::options::DirectoryOptions;
use crate::path_utils;

use super::filter::Children;
use super::{Create, FsNode, Node, NodeKind, move_to, parent_allows_delete};

const GET_CHILDREN: &str = "retrieve children of";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Directory {
    pathname: PathBuf,
}

impl Directory {
    /// A directory node for `pathname`, expanding a leading `~/`. Nothing is touched on disk.
    pub fn new(pathname: impl AsRef<Path>) -> Self {
        Self::from_raw(path_utils::expand_home(pathname.as_ref()))
    }

    pub(crate) fn from_raw(pathname: PathBuf) -> Self {
        Self { pathname }
    }

    /// The node for `name` inside this directory.
    ///
    /// An existing entry is typed by what is on disk and `kind` is ignored. For a missing entry
    /// `kind` decides the type, and leaving it out fails with [`Error::MissingChildType`].
    pub fn child(&self, name: impl AsRef<Path>, kind: Option<NodeKind>) -> Result<Node> {
        let name = name.as_ref();
        if name.as_os_str().is_empty() || name.has_root() {
            return Err(Error::invalid_target(
                "get child of",
                &self.pathname,
                "Child name must be a relative path",
            ));
        }
        let child_path = self.pathname.join(name);

        if let Some(on_disk) = NodeKind::of_path(&child_path) {
            return Ok(Node::from_kind(on_disk, child_path));
        }
        match kind {
            Some(kind) => Ok(Node::from_kind(kind, child_path)),
            None => Err(Error::missing_child_type(child_path)),
        }
    }

    /// Start enumerating the entries of this directory.
    ///
    /// Fails with [`Error::NoSuchNode`] if the directory is missing and
    /// [`Error::PermissionDenied`] if it cannot be read.
    pub fn iter_children(&self) -> Result<Children<'static>> {
        if !self.exists() {
            return Err(Error::no_such_node(
                GET_CHILDREN,
                &self.pathname,
                "No such directory",
            ));
        }
        if !self.is_readable() {
            return Err(Error::permission_denied(GET_CHILDREN, &self.pathname));
        }
        Children::open(&self.pathname)
    }

    pub fn children(&self) -> Result<Vec<Node>> {
        self.iter_children()?.collect()
    }

    /// Entries for which `filter` returns `true`, in directory order.
    pub fn children_filtered<F>(&self, filter: F) -> Result<Vec<Node>>
    where
        F: FnMut(&Node) -> bool,
    {
        self.iter_children()?.filter_nodes(filter).collect()
    }

    /// Entries whose extension is one of `extensions` (exact, case-sensitive match).
    pub fn children_by_file_extension<I, S>(&self, extensions: I) -> Result<Vec<Node>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extensions = extensions.into_iter().map(Into::into).collect::<HashSet<String>>();
        self.children_filtered(|node| {
            node.extension()
                .is_some_and(|extension| extensions.contains(&extension))
        })
    }

    /// Whether this directory is a strict ancestor of `node`.
    ///
    /// Compares pathnames only; symlinks are not resolved.
    pub fn is_parent_of_node<N: FsNode + ?Sized>(&self, node: &N) -> bool {
        let mut current = node.parent();
        while let Some(parent) = current {
            if parent.pathname() == self.pathname() {
                return true;
            }
            current = parent.parent();
        }
        false
    }
}

impl FsNode for Directory {
    fn pathname(&self) -> &Path {
        &self.pathname
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Directory
    }

    /// Deletable when the parent allows it and every descendant is deletable too.
    fn is_deletable(&self) -> bool {
        if !parent_allows_delete(self) {
            return false;
        }
        match self.children() {
            Ok(children) => children.iter().all(|child| child.is_deletable()),
            Err(_) => false,
        }
    }

    /// Delete every descendant depth-first, then the directory itself.
    fn delete(&self) -> Result<()> {
        if !self.is_deletable() {
            if !self.exists() {
                return Err(Error::no_such_node(
                    "delete",
                    &self.pathname,
                    "No such directory",
                ));
            }
            return Err(Error::permission_denied("delete", &self.pathname));
        }

        for child in self.children()? {
            child.delete()?;
        }
        fs::remove_dir(&self.pathname)
            .map_err(|err| Error::io_path("remove_dir", &self.pathname, err))?;
        tracing::debug!(path = %self.pathname.display(), "deleted directory");
        Ok(())
    }

    /// A directory can only move to a directory, and never into itself or a descendant.
    fn move_to(&self, target: &Node) -> Result<Node> {
        let Node::Directory(target_dir) = target else {
            return Err(Error::invalid_target(
                "move",
                &self.pathname,
                "Invalid destination",
            ));
        };
        if target_dir.pathname() == self.pathname() || self.is_parent_of_node(target_dir) {
            return Err(Error::invalid_target(
                "move",
                &self.pathname,
                "Destination is the directory itself or one of its children",
            ));
        }
        move_to::move_node(self, target)
    }
}

impl Create for Directory {
    type Options = DirectoryOptions;

    /// `mkdir`, or `mkdir -p` when `options.recursive` is set.
    ///
    /// An existing directory is accepted only in recursive mode. Without `recursive`, a missing
    /// parent fails with [`Error::InvalidTarget`]; an existing but unwritable parent always
    /// fails with [`Error::PermissionDenied`].
    fn create(&self, options: &DirectoryOptions) -> Result<()> {
        if self.exists() {
            if !self.is_dir() {
                return Err(Error::node_exists("create", &self.pathname, "File exists"));
            }
            if options.recursive {
                return Ok(());
            }
            return Err(Error::node_exists(
                "create",
                &self.pathname,
                "Directory exists",
            ));
        }

        match self.parent() {
            Some(parent) if parent.exists() => {
                if !parent.is_writable() {
                    return Err(Error::permission_denied("create", &self.pathname));
                }
            }
            _ => {
                if !options.recursive {
                    return Err(Error::invalid_target(
                        "create",
                        &self.pathname,
                        "Parent directory does not exist",
                    ));
                }
            }
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(options.recursive);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(options.mode);
        }
        builder
            .create(&self.pathname)
            .map_err(|err| Error::io_path("create_dir", &self.pathname, err))?;
        tracing::debug!(
            path = %self.pathname.display(),
            recursive = options.recursive,
            "created directory"
        );
        Ok(())
    }
}
