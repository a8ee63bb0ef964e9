use std::fmt::Write;

use crate::error::Result;
use crate::expr::{BinaryOp, ExprArena, ExprId, Node};

/// Fully parenthesized infix form of `expr`, e.g. `(x * (x + 2.0))`.
pub fn render(arena: &ExprArena, expr: ExprId) -> Result<String> {
    Renderer::new().render(arena, expr)
}

#[derive(Clone, Debug)]
pub struct Renderer {
    symbol: String,
    precision: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            symbol: "x".to_string(),
            precision: 1,
        }
    }
}

enum Piece {
    Expr(ExprId),
    Op(BinaryOp),
    Close,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name printed for the variable.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Digits after the decimal point for constants.
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn render(&self, arena: &ExprArena, expr: ExprId) -> Result<String> {
        let mut out = String::new();
        self.write_to(arena, expr, &mut out)?;
        Ok(out)
    }

    pub fn write_to(&self, arena: &ExprArena, expr: ExprId, out: &mut impl Write) -> Result<()> {
        let mut pending = vec![Piece::Expr(expr)];
        while let Some(piece) = pending.pop() {
            let written = match piece {
                Piece::Op(op) => write!(out, " {} ", op.symbol()),
                Piece::Close => out.write_str(")"),
                Piece::Expr(id) => match arena.node(id)? {
                    Node::Constant(c) => write!(out, "{:.*}", self.precision, c),
                    Node::Variable => out.write_str(&self.symbol),
                    Node::Add(l, r) => self.open(out, &mut pending, BinaryOp::Add, l, r),
                    Node::Mul(l, r) => self.open(out, &mut pending, BinaryOp::Mul, l, r),
                },
            };
            written?;
        }
        Ok(())
    }

    fn open(
        &self,
        out: &mut impl Write,
        pending: &mut Vec<Piece>,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    ) -> std::fmt::Result {
        pending.push(Piece::Close);
        pending.push(Piece::Expr(right));
        pending.push(Piece::Op(op));
        pending.push(Piece::Expr(left));
        out.write_str("(")
    }
}
