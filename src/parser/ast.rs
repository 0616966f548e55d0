// AST (Abstract Syntax Tree) definitions for the compiler
//
// Nodes are stored in an arena owned by `SyntaxTree` and refer to each other by
// `NodeId`. Terminal nodes point back into the token sequence by `TokenId`.

use std::fmt;

/// Index of a node inside its `SyntaxTree` arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of a token inside its file's token sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId(pub usize);

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Kinds of syntax-tree nodes produced by the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    Function,
    Statement,
    Return,
    Expression,
    Constant,
    DataType,
}

impl NodeKind {
    pub const ALL: [NodeKind; 7] = [
        NodeKind::Program,
        NodeKind::Function,
        NodeKind::Statement,
        NodeKind::Return,
        NodeKind::Expression,
        NodeKind::Constant,
        NodeKind::DataType,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Program => "Program",
            NodeKind::Function => "Function",
            NodeKind::Statement => "Statement",
            NodeKind::Return => "Return",
            NodeKind::Expression => "Expression",
            NodeKind::Constant => "Constant",
            NodeKind::DataType => "DataType",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The three child relations a node can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Structural annotation, e.g. a function's declared return type
    Primary,
    /// Reserved; the current grammar never fills it
    Secondary,
    /// Next node in derivation/evaluation order
    Continuation,
}

/// A single syntax-tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub token: Option<TokenId>,
    parent: Option<NodeId>,
    primary: Option<NodeId>,
    secondary: Option<NodeId>,
    continuation: Option<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, token: Option<TokenId>) -> Self {
        Node {
            kind,
            token,
            parent: None,
            primary: None,
            secondary: None,
            continuation: None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn primary(&self) -> Option<NodeId> {
        self.primary
    }

    pub fn secondary(&self) -> Option<NodeId> {
        self.secondary
    }

    pub fn continuation(&self) -> Option<NodeId> {
        self.continuation
    }

    pub fn child(&self, slot: Slot) -> Option<NodeId> {
        match slot {
            Slot::Primary => self.primary,
            Slot::Secondary => self.secondary,
            Slot::Continuation => self.continuation,
        }
    }

    fn child_mut(&mut self, slot: Slot) -> &mut Option<NodeId> {
        match slot {
            Slot::Primary => &mut self.primary,
            Slot::Secondary => &mut self.secondary,
            Slot::Continuation => &mut self.continuation,
        }
    }

    /// Which of this node's slots holds `child`, if any
    fn slot_of(&self, child: NodeId) -> Option<Slot> {
        [Slot::Primary, Slot::Secondary, Slot::Continuation]
            .into_iter()
            .find(|&slot| self.child(slot) == Some(child))
    }
}

/// Arena that owns every node of one parse
///
/// The parser builds the tree in a single top-down pass, so every node
/// allocated after a given node belongs to that node's subtree until the
/// production that created it returns. [`SyntaxTree::discard`] relies on this
/// to release a failed production by truncating the arena.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
}

impl SyntaxTree {
    pub fn new() -> Self {
        SyntaxTree::default()
    }

    /// Allocate a detached node
    pub fn add(&mut self, kind: NodeKind, token: Option<TokenId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, token));
        id
    }

    /// The first node allocated; the parser always allocates Program first.
    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId(0))
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Link `child` into `parent`'s `slot`.
    ///
    /// The child must be detached and the slot empty; a node can never be
    /// linked to itself.
    pub fn attach(&mut self, parent: NodeId, slot: Slot, child: NodeId) {
        debug_assert_ne!(parent, child, "node linked to itself");
        debug_assert!(
            self.nodes[child.0].parent.is_none(),
            "node {:?} already has a parent",
            child
        );
        debug_assert!(
            self.nodes[parent.0].child(slot).is_none(),
            "{:?} slot of {:?} already occupied",
            slot,
            parent
        );

        *self.nodes[parent.0].child_mut(slot) = Some(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Unlink `child` from its parent, leaving it in the arena.
    pub fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.nodes[child.0].parent.take() else {
            return;
        };
        if let Some(slot) = self.nodes[parent.0].slot_of(child) {
            *self.nodes[parent.0].child_mut(slot) = None;
        }
    }

    /// Detach `id` from its parent and release it together with its subtree.
    ///
    /// Only valid for the most recently started production: `id` and every
    /// node allocated after it must form one subtree.
    pub fn discard(&mut self, id: NodeId) {
        debug_assert!(
            self.subtree(id).count() == self.nodes.len() - id.0,
            "discarded node {:?} is not the arena tail",
            id
        );
        self.detach(id);
        self.nodes.truncate(id.0);
    }

    /// Walk the continuation chain starting at `start`.
    pub fn chain(&self, start: Option<NodeId>) -> Chain<'_> {
        Chain {
            tree: self,
            next: start,
        }
    }

    /// Pre-order walk over every node reachable from `id`
    /// (primary, then secondary, then continuation).
    pub fn subtree(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![id];
        std::iter::from_fn(move || {
            let current = stack.pop()?;
            let node = &self.nodes[current.0];
            stack.extend(
                [node.continuation, node.secondary, node.primary]
                    .into_iter()
                    .flatten(),
            );
            Some(current)
        })
    }

    /// Number of ancestors of `id`
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent.0].parent;
        }
        depth
    }
}

/// Iterator over a continuation chain
pub struct Chain<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Chain<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.node(current).continuation;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program_with_function(tree: &mut SyntaxTree) -> (NodeId, NodeId) {
        let program = tree.add(NodeKind::Program, None);
        let function = tree.add(NodeKind::Function, Some(TokenId(1)));
        tree.attach(program, Slot::Continuation, function);
        (program, function)
    }

    #[test]
    fn test_attach_links_both_directions() {
        let mut tree = SyntaxTree::new();
        let (program, function) = program_with_function(&mut tree);
        let data_type = tree.add(NodeKind::DataType, Some(TokenId(0)));
        tree.attach(function, Slot::Primary, data_type);

        assert_eq!(tree.node(program).continuation(), Some(function));
        assert_eq!(tree.node(function).parent(), Some(program));
        assert_eq!(tree.node(function).primary(), Some(data_type));
        assert_eq!(tree.node(data_type).parent(), Some(function));
        assert_eq!(tree.node(function).secondary(), None);
        assert_eq!(tree.root(), Some(program));
    }

    #[test]
    fn test_discard_releases_subtree() {
        let mut tree = SyntaxTree::new();
        let (program, function) = program_with_function(&mut tree);
        let data_type = tree.add(NodeKind::DataType, Some(TokenId(0)));
        tree.attach(function, Slot::Primary, data_type);
        let statement = tree.add(NodeKind::Statement, None);
        tree.attach(function, Slot::Continuation, statement);

        tree.discard(function);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(program).continuation(), None);
        assert_eq!(tree.chain(tree.root()).count(), 1);
    }

    #[test]
    fn test_detach_keeps_node() {
        let mut tree = SyntaxTree::new();
        let (program, function) = program_with_function(&mut tree);

        tree.detach(function);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.node(program).continuation(), None);
        assert_eq!(tree.node(function).parent(), None);
    }

    #[test]
    fn test_chain_and_depth() {
        let mut tree = SyntaxTree::new();
        let mut previous = tree.add(NodeKind::Program, None);
        for kind in [NodeKind::Function, NodeKind::Statement, NodeKind::Expression] {
            let next = tree.add(kind, None);
            tree.attach(previous, Slot::Continuation, next);
            previous = next;
        }

        let kinds: Vec<_> = tree.chain(tree.root()).map(|id| tree.kind(id)).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Program,
                NodeKind::Function,
                NodeKind::Statement,
                NodeKind::Expression
            ]
        );
        assert_eq!(tree.depth(previous), 3);
        assert_eq!(tree.subtree(NodeId(0)).count(), 4);
    }

    #[test]
    #[should_panic(expected = "linked to itself")]
    #[cfg(debug_assertions)]
    fn test_self_link_is_rejected() {
        let mut tree = SyntaxTree::new();
        let program = tree.add(NodeKind::Program, None);
        tree.attach(program, Slot::Continuation, program);
    }
}
