//! `fs-nodes` models filesystem entries as typed nodes: [`Directory`], [`File`] and [`Link`].
//!
//! Each operation validates its preconditions (existence, permissions, parent existence) before
//! calling into the OS, and reports failures through a small, stable [`Error`] taxonomy.
//! Creation follows `mkdir -p`/`touch` conventions and moves follow `mv` target-directory
//! resolution.

mod error;
pub mod node;
pub mod options;
mod path_utils;
mod platform;

pub use error::{Error, Result};

pub use node::{Children, Create, Directory, File, FsNode, Link, Node, NodeKind, NodeStat};
pub use options::{DirectoryOptions, FileOptions, LinkOptions, ReadOptions, WriteOptions};
