//! Graphviz dump of a trie, for debugging and for comparing tree shapes.
//!
//! Node ids are assigned in depth-first order, so two tries with the same
//! shape and contents produce byte-identical output.

use std::fmt::{self, Debug, Write};

use crate::node::Node;
use crate::trie::Trie;

/// Renders `trie` as a Graphviz `digraph`.
#[must_use]
pub fn to_dot<K: Debug, V: Debug>(trie: &Trie<K, V>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_dot(trie, &mut out);
    out
}

/// Writes `trie` as a Graphviz `digraph` into `out`.
///
/// # Errors
///
/// Propagates errors of `out`.
pub fn write_dot<K: Debug, V: Debug, W: Write>(trie: &Trie<K, V>, out: &mut W) -> fmt::Result {
    writeln!(out, "digraph champ {{")?;
    writeln!(out, "  node [shape=record, fontname=monospace];")?;
    let mut next_id = 0;
    write_node(trie.root(), out, &mut next_id)?;
    writeln!(out, "}}")
}

fn write_node<K: Debug, V: Debug, W: Write>(node: &Node<K, V>, out: &mut W, next_id: &mut usize) -> fmt::Result {
    let id = *next_id;
    *next_id += 1;

    let header = match node.collision_hash() {
        Some(hash) => format!("collision {hash:#010x}"),
        None => format!("data {:#010x}\\nnodes {:#010x}", node.data_map(), node.node_map()),
    };
    write!(out, "  n{id} [label=\"{{{header}")?;
    for entry in node.entries() {
        let text = format!("{:?}: {:?} #{}", entry.key(), entry.value(), entry.sequence());
        write!(out, "|{}", escape(&text))?;
    }
    writeln!(out, "}}\"];")?;

    for i in 0..node.node_arity() {
        let child_id = *next_id;
        write_node(node.child(i), out, next_id)?;
        writeln!(out, "  n{id} -> n{child_id};")?;
    }
    Ok(())
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '"' | '{' | '}' | '|' | '<' | '>' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
