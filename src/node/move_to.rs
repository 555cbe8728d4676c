use crate::error::{Error, Result};
use crate::platform;

use super::{FsNode, Node};

const OP: &str = "move";
const NO_SUCH: &str = "No such file or directory";

/// Move `source` to `target` with `mv` semantics.
///
/// Type-specific checks run before this in the `move_to` of each node type. Every check here
/// happens before the rename, so a rejected move leaves the filesystem untouched.
pub(crate) fn move_node<S: FsNode + ?Sized>(source: &S, target: &Node) -> Result<Node> {
    let source_path = source.pathname();
    if !source.exists() {
        return Err(Error::no_such_node(OP, source_path, NO_SUCH));
    }

    if target.exists() {
        if !target.is_writable() {
            return Err(Error::permission_denied(OP, target.pathname()));
        }
    } else {
        let parent = target
            .parent()
            .filter(|parent| parent.exists())
            .ok_or_else(|| Error::no_such_node(OP, target.pathname(), NO_SUCH))?;
        if !parent.is_writable() {
            return Err(Error::permission_denied(OP, target.pathname()));
        }
    }

    let destination = match target {
        Node::Directory(dir) if dir.exists() => Node::from_kind(
            source.kind(),
            dir.pathname().join(source.basename()),
        ),
        _ => target.clone(),
    };

    platform::rename_node(source_path, destination.pathname())
        .map_err(|err| Error::io_path("rename", destination.pathname(), err))?;
    tracing::debug!(
        from = %source_path.display(),
        to = %destination.pathname().display(),
        "moved node"
    );
    Ok(destination)
}
