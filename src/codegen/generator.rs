// Tree walk that emits assembly for a parsed program

use crate::codegen::errors::GenerationFault;
use crate::codegen::target::Target;
use crate::parser::ast::{NodeId, NodeKind, SyntaxTree};
use crate::parser::lexer::{SourceFile, Token, TokenKind};
use tracing::debug;

/// Lower a syntax tree to assembly text for `target`.
///
/// An absent or empty tree produces empty text. `source` must be the token
/// table entry the tree was parsed from.
pub fn generate(
    tree: Option<&SyntaxTree>,
    source: &SourceFile,
    target: Target,
) -> Result<String, GenerationFault> {
    let Some(tree) = tree else {
        return Ok(String::new());
    };
    let Some(root) = tree.root() else {
        return Ok(String::new());
    };

    let mut generator = Generator {
        tree,
        source,
        target,
        asm: String::new(),
        epilogue_emitted: false,
    };
    generator.visit(Some(root))?;

    let asm = generator.finish();
    debug!(file = source.name(), %target, bytes = asm.len(), "generated assembly");
    Ok(asm)
}

/// Integer value of a literal under the radix its kind implies.
///
/// Returns `None` for non-integer kinds, malformed digits, or values wider than
/// 64 bits. Binary literals carry a leading `b`, hex literals `0x`/`0X`.
pub fn literal_value(kind: TokenKind, text: &str) -> Option<u64> {
    let radix = kind.radix()?;
    let digits = match kind {
        TokenKind::BinaryLiteral => text.strip_prefix('b')?,
        TokenKind::HexLiteral => text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))?,
        _ => text,
    };
    u64::from_str_radix(digits, radix).ok()
}

struct Generator<'a> {
    tree: &'a SyntaxTree,
    source: &'a SourceFile,
    target: Target,
    asm: String,
    epilogue_emitted: bool,
}

impl<'a> Generator<'a> {
    /// Walk the continuation chain from `start`.
    ///
    /// Function and Return nodes walk the rest of the chain themselves, so the
    /// loop stops after dispatching to them.
    fn visit(&mut self, start: Option<NodeId>) -> Result<(), GenerationFault> {
        let tree = self.tree;
        let mut current = start;

        while let Some(id) = current {
            let node = tree.node(id);
            match node.kind {
                NodeKind::Program => self.program_start(id),
                NodeKind::Function => return self.function(id),
                NodeKind::Statement | NodeKind::Expression => {}
                NodeKind::Return => return self.return_value(id),
                NodeKind::Constant => self.constant(id)?,
                NodeKind::DataType => {
                    return Err(GenerationFault::UnexpectedNode { kind: node.kind });
                }
            }
            current = node.continuation();
        }

        Ok(())
    }

    fn program_start(&mut self, id: NodeId) {
        self.asm.push_str("# generated by minicc\n\n");
        self.asm.push_str("    .text\n");
        self.asm.push_str("    .align 4\n");

        // Export the function the program leads to
        let (tree, source) = (self.tree, self.source);
        let entry = tree
            .node(id)
            .continuation()
            .filter(|&next| tree.kind(next) == NodeKind::Function)
            .and_then(|function| tree.node(function).token)
            .and_then(|token| source.token_text(token));
        if let Some(name) = entry {
            self.asm.push_str(&format!("    .globl {}\n", name));
            self.asm.push_str(&format!("    .type {}, @function\n", name));
        }
    }

    fn function(&mut self, id: NodeId) -> Result<(), GenerationFault> {
        let tree = self.tree;
        let node = tree.node(id);
        let (_, name) = self.terminal(id)?;

        self.epilogue_emitted = false;
        self.asm.push_str(&format!("{}:\n", name));
        self.asm.push_str("    # prologue\n");
        self.asm.push_str(self.target.prologue());

        self.visit(node.continuation())?;

        if !self.epilogue_emitted {
            self.epilogue();
        }
        Ok(())
    }

    /// Evaluate the returned expression, then leave the function.
    fn return_value(&mut self, id: NodeId) -> Result<(), GenerationFault> {
        let operand = self.tree.node(id).continuation();
        self.visit(operand)?;

        self.asm.push_str("    # return\n");
        self.asm.push_str(self.target.pop_return());
        self.epilogue();
        Ok(())
    }

    fn constant(&mut self, id: NodeId) -> Result<(), GenerationFault> {
        let (token, text) = self.terminal(id)?;
        let location = self.source.location(token.offset);

        if token.kind.radix().is_none() {
            return Err(GenerationFault::UnsupportedLiteral {
                kind: token.kind,
                text: text.to_string(),
                location,
            });
        }

        let value = literal_value(token.kind, text).ok_or_else(|| GenerationFault::InvalidLiteral {
            text: text.to_string(),
            location,
        })?;
        let push = self
            .target
            .push_constant(value)
            .ok_or_else(|| GenerationFault::LiteralOutOfRange {
                text: text.to_string(),
                target: self.target,
                location,
            })?;

        self.asm.push_str("    # constant\n");
        self.asm.push_str(&push);
        Ok(())
    }

    fn epilogue(&mut self) {
        self.epilogue_emitted = true;
        self.asm.push_str("    # epilogue\n");
        self.asm.push_str(self.target.epilogue());
    }

    /// Token and text of a terminal node.
    fn terminal(&self, id: NodeId) -> Result<(Token, &'a str), GenerationFault> {
        let (tree, source) = (self.tree, self.source);
        let node = tree.node(id);
        let missing = || GenerationFault::MissingToken { kind: node.kind };
        let token_id = node.token.ok_or_else(missing)?;
        let token = *source.token(token_id).ok_or_else(missing)?;
        Ok((token, token.text(source.text())))
    }

    fn finish(mut self) -> String {
        if !self.asm.is_empty() {
            self.asm.push_str("\n    .section .note.GNU-stack,\"\",@progbits\n");
        }
        self.asm
    }
}
