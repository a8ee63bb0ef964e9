//! Symbolic differentiation of single-variable expressions built from
//! constants, the variable, addition and multiplication.
//!
//! Trees live in an [`ExprArena`]; a derivative is built in the same arena and
//! shares the operands of the original, so both can be rendered side by side
//! and released together.
//!
//! ```
//! use symdiff::{ExprArena, differentiate, render};
//!
//! let mut arena = ExprArena::new();
//! let x = arena.variable()?;
//! let two = arena.constant(2.0)?;
//! let sum = arena.add(x, two)?;
//! let f = arena.mul(x, sum)?;
//! let df = differentiate(&mut arena, f)?;
//!
//! assert_eq!(render(&arena, f)?, "(x * (x + 2.0))");
//! assert_eq!(render(&arena, df)?, "((1.0 * (x + 2.0)) + (x * (1.0 + 0.0)))");
//! # Ok::<(), symdiff::DiffError>(())
//! ```

pub mod calculus;
pub mod error;
pub mod expr;
pub mod format;
mod lifecycle;
pub mod prelude;

pub use calculus::{Differentiator, differentiate};
pub use error::{AllocReason, DiffError, Result};
pub use expr::{BinaryOp, ExprArena, ExprId, Node};
pub use format::{Renderer, render};
