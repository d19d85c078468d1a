//! Treeviz formatter for parse trees
//!
//! One line per node, with the nesting drawn as tree connectors:
//!
//!   <prefix><connector> <icon> <label> (truncated)
//!
//! Example, `S <- ("+" / "-")? [0-9]+` on `-42`:
//!
//!   ⋯ "-42"
//!   ├─ ☰ "-"
//!   │ └─ ◦ "-"
//!   └─ ☰ "42"
//!     ├─ • '4'
//!     └─ • '2'
//!
//! Icons
//!     Generic nodes:
//!         Sequence: ⋯
//!         Repetition: ☰
//!         Literal: ◦
//!         Char: •
//!     Lambda terms:
//!         Abs: λ
//!         App: @
//!         If: ?
//!     Anything else: ○

use super::registry::{FormatError, Formatter};
use crate::snapshot::NodeSnapshot;

/// Default number of label characters shown before truncating
pub const DEFAULT_LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Get the icon for a node type
fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Sequence" => "⋯",
        "Repetition" => "☰",
        "Literal" => "◦",
        "Char" => "•",
        "Abs" => "λ",
        "App" => "@",
        "If" => "?",
        _ => "○",
    }
}

fn format_snapshot(
    snapshot: &NodeSnapshot,
    prefix: &str,
    is_last: bool,
    label_width: usize,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        get_icon(&snapshot.node_type),
        truncate(&snapshot.label, label_width)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    format_children(snapshot, &child_prefix, label_width, output);
}

fn format_children(snapshot: &NodeSnapshot, prefix: &str, label_width: usize, output: &mut String) {
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        format_snapshot(child, prefix, i + 1 == child_count, label_width, output);
    }
}

/// Render a snapshot tree with the given label width
pub fn to_treeviz_str(snapshot: &NodeSnapshot, label_width: usize) -> String {
    let mut output = format!(
        "{} {}\n",
        get_icon(&snapshot.node_type),
        truncate(&snapshot.label, label_width)
    );
    format_children(snapshot, "", label_width, &mut output);
    output
}

/// Formatter implementation for treeviz format
#[derive(Debug, Clone, Copy)]
pub struct TreevizFormatter {
    label_width: usize,
}

impl TreevizFormatter {
    pub fn new(label_width: usize) -> Self {
        TreevizFormatter { label_width }
    }
}

impl Default for TreevizFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL_WIDTH)
    }
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, snapshot: &NodeSnapshot) -> Result<String, FormatError> {
        Ok(to_treeviz_str(snapshot, self.label_width))
    }

    fn description(&self) -> &str {
        "Visual tree representation with connectors and Unicode icons"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_number() -> NodeSnapshot {
        NodeSnapshot::new("Sequence", "\"-42\"")
            .with_child(
                NodeSnapshot::new("Repetition", "\"-\"").with_child(NodeSnapshot::new("Literal", "\"-\"")),
            )
            .with_child(NodeSnapshot::new("Repetition", "\"42\"").with_children(vec![
                NodeSnapshot::new("Char", "'4'"),
                NodeSnapshot::new("Char", "'2'"),
            ]))
    }

    #[test]
    fn test_nested_tree() {
        insta::assert_snapshot!(to_treeviz_str(&signed_number(), 30), @r###"
        ⋯ "-42"
        ├─ ☰ "-"
        │ └─ ◦ "-"
        └─ ☰ "42"
          ├─ • '4'
          └─ • '2'
        "###);
    }

    #[test]
    fn test_single_node() {
        let snapshot = NodeSnapshot::new("Zero", "0");
        assert_eq!(to_treeviz_str(&snapshot, 30), "○ 0\n");
    }

    #[test]
    fn test_labels_are_truncated() {
        let snapshot = NodeSnapshot::new("Literal", "abcdefgh");
        assert_eq!(to_treeviz_str(&snapshot, 4), "◦ abcd...\n");
    }

    #[test]
    fn test_truncation_counts_characters() {
        assert_eq!(truncate("λλλλ", 2), "λλ...");
        assert_eq!(truncate("λλ", 2), "λλ");
    }
}
