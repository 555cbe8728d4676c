use std::fs;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{Error, Result};
use crate::options::{DirectoryOptions, FileOptions, ReadOptions, WriteOptions};
use crate::path_utils;
use crate::platform;

use super::{Create, FsNode, Node, NodeKind, move_to};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct File {
    pathname: PathBuf,
}

impl File {
    /// A file node for `pathname`, expanding a leading `~/`. Nothing is touched on disk.
    pub fn new(pathname: impl AsRef<Path>) -> Self {
        Self::from_raw(path_utils::expand_home(pathname.as_ref()))
    }

    pub(crate) fn from_raw(pathname: PathBuf) -> Self {
        Self { pathname }
    }

    /// Read the file from `options.offset`, at most `options.max_length` bytes.
    pub fn get_contents(&self, options: &ReadOptions) -> Result<Vec<u8>> {
        const OP: &str = "get contents of file";
        if !self.exists() {
            return Err(Error::no_such_node(OP, &self.pathname, "No such file"));
        }
        if !self.is_readable() {
            return Err(Error::permission_denied(OP, &self.pathname));
        }

        let mut file = fs::File::open(&self.pathname)
            .map_err(|err| Error::io_path("open", &self.pathname, err))?;
        if options.offset > 0 {
            file.seek(SeekFrom::Start(options.offset))
                .map_err(|err| Error::io_path("seek", &self.pathname, err))?;
        }
        let mut bytes = Vec::<u8>::new();
        file.take(options.max_length.unwrap_or(u64::MAX))
            .read_to_end(&mut bytes)
            .map_err(|err| Error::io_path("read", &self.pathname, err))?;
        Ok(bytes)
    }

    /// Write `data` to the file, creating it when missing. Returns the number of bytes written.
    pub fn put_contents(&self, data: impl AsRef<[u8]>, options: &WriteOptions) -> Result<usize> {
        const OP: &str = "write to file";
        if self.exists() {
            if !self.is_writable() {
                return Err(Error::permission_denied(OP, &self.pathname));
            }
        } else {
            match self.parent() {
                Some(parent) if parent.is_writable() => {}
                Some(parent) => return Err(Error::permission_denied(OP, parent.pathname())),
                None => return Err(Error::permission_denied(OP, &self.pathname)),
            }
        }

        let data = data.as_ref();
        let mut open_options = fs::OpenOptions::new();
        open_options.create(true);
        if options.append {
            open_options.append(true);
        } else {
            // Truncation waits until the lock (if any) is held.
            open_options.write(true).truncate(false);
        }
        let mut file = open_options
            .open(&self.pathname)
            .map_err(|err| Error::io_path("open", &self.pathname, err))?;
        if options.lock {
            platform::lock_exclusive(&file)
                .map_err(|err| Error::io_path("lock", &self.pathname, err))?;
        }
        if !options.append {
            file.set_len(0)
                .map_err(|err| Error::io_path("truncate", &self.pathname, err))?;
        }
        file.write_all(data)
            .map_err(|err| Error::io_path("write", &self.pathname, err))?;
        tracing::debug!(
            path = %self.pathname.display(),
            bytes = data.len(),
            append = options.append,
            "wrote file"
        );
        Ok(data.len())
    }

    fn touch(&self, options: &FileOptions) -> Result<()> {
        if !self.pathname.exists() {
            fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(false)
                .open(&self.pathname)
                .map_err(|err| Error::io_path("open", &self.pathname, err))?;
        }

        let modified = options.modified.unwrap_or_else(SystemTime::now);
        let accessed = options.accessed.unwrap_or(modified);
        platform::set_path_times(&self.pathname, accessed, modified)
            .map_err(|err| Error::io_path("set_times", &self.pathname, err))
    }
}

impl FsNode for File {
    fn pathname(&self) -> &Path {
        &self.pathname
    }

    fn kind(&self) -> NodeKind {
        NodeKind::File
    }

    fn delete(&self) -> Result<()> {
        if !self.is_deletable() {
            if !self.exists() {
                return Err(Error::no_such_node("delete", &self.pathname, "No such file"));
            }
            return Err(Error::permission_denied("delete", &self.pathname));
        }
        fs::remove_file(&self.pathname)
            .map_err(|err| Error::io_path("remove_file", &self.pathname, err))?;
        tracing::debug!(path = %self.pathname.display(), "deleted file");
        Ok(())
    }

    fn move_to(&self, target: &Node) -> Result<Node> {
        match target {
            Node::File(target_file) => {
                match target_file.parent() {
                    Some(parent) if parent.is_writable() => {}
                    Some(parent) => return Err(Error::permission_denied("move", parent.pathname())),
                    None => return Err(Error::permission_denied("move", target_file.pathname())),
                }
            }
            Node::Directory(target_dir) if !target_dir.exists() => {
                return Err(Error::no_such_node(
                    "move",
                    target_dir.pathname(),
                    "No such file or directory",
                ));
            }
            Node::Directory(_) | Node::Link(_) => {}
        }
        move_to::move_node(self, target)
    }
}

impl Create for File {
    type Options = FileOptions;

    /// Create the file (or refresh its timestamps), like `touch`.
    ///
    /// A missing parent is created with `mkdir -p` semantics when `options.recursive` is set,
    /// otherwise the call fails with [`Error::InvalidTarget`].
    fn create(&self, options: &FileOptions) -> Result<()> {
        if let Some(parent) = self.parent()
            && !parent.exists()
        {
            if !options.recursive {
                return Err(Error::invalid_target(
                    "create",
                    &self.pathname,
                    "Parent does not exist",
                ));
            }
            parent.create(&DirectoryOptions::recursive())?;
        }

        self.touch(options)?;
        tracing::debug!(path = %self.pathname.display(), "created file");
        Ok(())
    }
}
