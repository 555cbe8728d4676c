use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::options::LinkOptions;
use crate::path_utils;

use super::{Create, FsNode, Node, NodeKind, move_to};

/// A symbolic link. Never reported as a file or directory; probe the target instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    pathname: PathBuf,
}

impl Link {
    /// A link node for `pathname`, expanding a leading `~/`. Nothing is touched on disk.
    pub fn new(pathname: impl AsRef<Path>) -> Self {
        Self::from_raw(path_utils::expand_home(pathname.as_ref()))
    }

    pub(crate) fn from_raw(pathname: PathBuf) -> Self {
        Self { pathname }
    }

    /// The raw content of the link, exactly as stored.
    pub fn read_target(&self) -> Result<PathBuf> {
        fs::read_link(&self.pathname)
            .map_err(|err| Error::io_path("read_link", &self.pathname, err))
    }

    /// The immediate target, with a relative target resolved against the link's directory.
    ///
    /// Only one hop is taken: if the target is itself a link, that link is returned.
    pub fn target_path(&self) -> Option<PathBuf> {
        let target = fs::read_link(&self.pathname).ok()?;
        if target.is_absolute() {
            return Some(target);
        }
        let base = self
            .pathname
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Some(base.join(target))
    }

    pub fn target_is_link(&self) -> bool {
        self.target_path().is_some_and(|target| target.is_symlink())
    }

    pub fn target_is_dir(&self) -> bool {
        self.target_path().is_some_and(|target| !target.is_symlink() && target.is_dir())
    }

    pub fn target_is_file(&self) -> bool {
        self.target_path().is_some_and(|target| !target.is_symlink() && target.is_file())
    }
}

impl FsNode for Link {
    fn pathname(&self) -> &Path {
        &self.pathname
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Link
    }

    /// Whether a symlink is present at the path, whatever its target.
    fn exists(&self) -> bool {
        self.pathname.is_symlink()
    }

    fn is_dir(&self) -> bool {
        false
    }

    fn is_file(&self) -> bool {
        false
    }

    /// Unlink the symlink itself; the target is never touched.
    fn delete(&self) -> Result<()> {
        if !self.is_deletable() {
            if !self.exists() {
                return Err(Error::no_such_node("delete", &self.pathname, "No such link"));
            }
            return Err(Error::permission_denied("delete", &self.pathname));
        }
        fs::remove_file(&self.pathname)
            .map_err(|err| Error::io_path("unlink_symlink", &self.pathname, err))?;
        tracing::debug!(path = %self.pathname.display(), "deleted link");
        Ok(())
    }

    fn move_to(&self, target: &Node) -> Result<Node> {
        move_to::move_node(self, target)
    }
}

impl Create for Link {
    type Options = LinkOptions;

    /// Create a symlink pointing at `options.target`, which may be dangling.
    fn create(&self, options: &LinkOptions) -> Result<()> {
        if options.target.as_os_str().is_empty() {
            return Err(Error::invalid_target(
                "create",
                &self.pathname,
                "Empty link target",
            ));
        }
        if self.exists() || self.pathname.exists() {
            return Err(Error::node_exists("create", &self.pathname, "File exists"));
        }
        match self.parent() {
            Some(parent) if parent.exists() => {
                if !parent.is_writable() {
                    return Err(Error::permission_denied("create", &self.pathname));
                }
            }
            _ => {
                return Err(Error::invalid_target(
                    "create",
                    &self.pathname,
                    "Parent does not exist",
                ));
            }
        }

        symlink(&options.target, &self.pathname)
            .map_err(|err| Error::io_path("symlink", &self.pathname, err))?;
        tracing::debug!(
            path = %self.pathname.display(),
            target = %options.target.display(),
            "created link"
        );
        Ok(())
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn symlink(_target: &Path, _link: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "symlink creation is only supported on unix",
    ))
}
