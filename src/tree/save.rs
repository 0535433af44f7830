//! Save engine: makes a directory tree match a loaded node tree.

use crate::error::NodeError;
use crate::tree::cancel::CancelToken;
use crate::tree::node::Node;
use crate::value::Codec;
use tracing::{debug, trace};

/// Save `node` and its descendants, overwriting the directory at its path.
///
/// Every node in the subtree must be loaded and every value must encode
/// under `codec`; both are checked before the filesystem is touched. A
/// failure during writing leaves the directory partially written.
pub(crate) fn save_node(node: &Node, codec: &Codec, cancel: &CancelToken) -> Result<(), NodeError> {
    let plan = plan_node(node, codec)?;
    write_node(&plan, cancel)
}

/// A node paired with the chunk filenames of its value.
struct SavePlan<'a> {
    node: &'a Node,
    names: Vec<String>,
    children: Vec<SavePlan<'a>>,
}

fn plan_node<'a>(node: &'a Node, codec: &Codec) -> Result<SavePlan<'a>, NodeError> {
    let contents = node.contents()?;
    let names = codec.encode(&contents.value)?;
    let children = contents
        .children
        .values()
        .map(|child| plan_node(child, codec))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SavePlan {
        node,
        names,
        children,
    })
}

fn write_node(plan: &SavePlan<'_>, cancel: &CancelToken) -> Result<(), NodeError> {
    let conn = plan.node.connection();

    conn.remove_all()?;
    conn.create_dir()?;

    for child in &plan.children {
        cancel.check()?;
        write_node(child, cancel)?;
    }

    for name in &plan.names {
        trace!(path = %conn.path().display(), name = %name, "Creating chunk file");
        conn.create_file(name)?;
    }

    debug!(
        path = %conn.path().display(),
        chunks = plan.names.len(),
        children = plan.children.len(),
        "Saved node"
    );
    Ok(())
}
