//! Minimal DOM for editor markup: an index arena filled by html5ever.

mod arena;
mod tree_sink;

pub use arena::{ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Children};
pub use tree_sink::{DomSink, NodeHandle, parse_html};
