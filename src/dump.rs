//! Human-readable renderings of intermediate stages
//!
//! - [`tokens`]: line-numbered token listing, `Kind[text]` per token
//! - [`tree`]: node kinds indented by depth
//! - [`dot`]: Graphviz digraph of the tree; empty primary/secondary slots are
//!   drawn as invisible placeholders so the layout keeps its shape

use crate::parser::ast::{NodeId, NodeKind, SyntaxTree};
use crate::parser::lexer::{SourceFile, TokenKind};
use rustc_hash::FxHashMap;
use std::fmt::Write;

/// Token listing for one file, one source line per output line.
pub fn tokens(source: &SourceFile) -> String {
    let mut out = String::from("1:");

    for token in source.tokens() {
        match token.kind {
            TokenKind::NewLine => {
                let next_line = source.location(token.end()).line;
                let _ = write!(out, " {}\n{}:", token.kind.name(), next_line);
            }
            // Comment text may span lines
            TokenKind::Comment => {
                let _ = write!(out, " {}", token.kind.name());
            }
            kind => {
                let _ = write!(out, " {}[{}]", kind.name(), token.text(source.text()));
            }
        }
    }

    out.push('\n');
    out
}

/// Indented rendering of every node, two spaces per level of depth.
pub fn tree(tree: &SyntaxTree) -> String {
    let mut out = String::new();
    if let Some(root) = tree.root() {
        for id in tree.subtree(root) {
            let _ = writeln!(out, "{}{}", "  ".repeat(tree.depth(id)), tree.kind(id));
        }
    }
    out
}

/// Graphviz description of the tree.
pub fn dot(tree: &SyntaxTree, source: &SourceFile) -> String {
    let mut writer = DotWriter {
        tree,
        source,
        out: String::from("digraph g {\n"),
        numbers: FxHashMap::default(),
        empty_count: 0,
    };
    if let Some(root) = tree.root() {
        writer.node(root, None);
    }
    writer.out.push_str("}\n");
    writer.out
}

struct DotWriter<'a> {
    tree: &'a SyntaxTree,
    source: &'a SourceFile,
    out: String,
    /// Next number per kind, so names read Constant0, Constant1, ...
    numbers: FxHashMap<NodeKind, usize>,
    empty_count: usize,
}

impl DotWriter<'_> {
    fn node(&mut self, id: NodeId, parent: Option<&str>) {
        let (tree, source) = (self.tree, self.source);
        let node = tree.node(id);
        let number = self.numbers.entry(node.kind).or_insert(0);
        let name = format!("{}{}", node.kind, number);
        *number += 1;

        let mut label = node.kind.name().to_string();
        if let Some(token) = node.token.and_then(|t| source.token(t)) {
            let _ = write!(
                label,
                "\\n({})\\n[{}]",
                token.kind.name(),
                escape(token.text(source.text()))
            );
        }

        let _ = writeln!(self.out, "    {}[label=\"{}\"];", name, label);
        if let Some(parent) = parent {
            let _ = writeln!(self.out, "    {} -> {};", parent, name);
        }

        match node.primary() {
            Some(child) => self.node(child, Some(&name)),
            None => self.empty(&name),
        }
        if let Some(next) = node.continuation() {
            self.node(next, Some(&name));
        }
        match node.secondary() {
            Some(child) => self.node(child, Some(&name)),
            None => self.empty(&name),
        }
    }

    fn empty(&mut self, parent: &str) {
        let name = format!("{}_empty{}", parent, self.empty_count);
        self.empty_count += 1;
        let _ = writeln!(self.out, "    {}[label=\"\", shape=plain, style=invis];", name);
        let _ = writeln!(self.out, "    {} -> {}[style=invis];", parent, name);
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
