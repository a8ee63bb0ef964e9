//! Calculus routines.

pub mod differentiate;

pub use differentiate::{Differentiator, differentiate};
