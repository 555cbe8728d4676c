mod access;
mod lock;
mod rename;
mod times;

pub(crate) use access::{Access, has_access};
pub(crate) use lock::lock_exclusive;
pub(crate) use rename::rename_node;
pub(crate) use times::set_path_times;
