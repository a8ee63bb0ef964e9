//! Everything needed to build, differentiate and print an expression.

pub use crate::calculus::{Differentiator, differentiate};
pub use crate::error::{DiffError, Result};
pub use crate::expr::{BinaryOp, ExprArena, ExprId, Node};
pub use crate::format::{Renderer, render};
