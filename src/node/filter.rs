use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::{Node, NodeKind};

type Accept<'a> = Box<dyn FnMut(&Node) -> bool + 'a>;

/// Lazily enumerates the entries of one directory as typed [`Node`]s.
///
/// Entries come back in native directory order; `.` and `..` are never yielded. Each
/// `Children` holds its own listing handle, so two enumerations of the same directory never
/// share state.
pub struct Children<'a> {
    dir: PathBuf,
    entries: fs::ReadDir,
    accept: Option<Accept<'a>>,
}

impl std::fmt::Debug for Children<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Children")
            .field("dir", &self.dir)
            .field("filtered", &self.accept.is_some())
            .finish_non_exhaustive()
    }
}

impl<'a> Children<'a> {
    pub(crate) fn open(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir).map_err(|err| Error::io_path("read_dir", dir, err))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            entries,
            accept: None,
        })
    }

    /// Only yield nodes for which `accept` returns `true`.
    ///
    /// Stacks with any filter already installed: a node must pass both.
    pub fn filter_nodes<F>(self, mut accept: F) -> Children<'a>
    where
        F: FnMut(&Node) -> bool + 'a,
    {
        let accept: Accept<'a> = match self.accept {
            Some(mut previous) => Box::new(move |node: &Node| previous(node) && accept(node)),
            None => Box::new(accept),
        };
        Children {
            dir: self.dir,
            entries: self.entries,
            accept: Some(accept),
        }
    }
}

impl Iterator for Children<'_> {
    type Item = Result<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(Error::io_path("read_dir", &self.dir, err))),
            };
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => return Some(Err(Error::io_path("file_type", &path, err))),
            };
            let node = Node::from_kind(NodeKind::from_file_type(file_type), path);
            if let Some(accept) = self.accept.as_mut()
                && !accept(&node)
            {
                continue;
            }
            return Some(Ok(node));
        }
    }
}
