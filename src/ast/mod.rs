//! Target-neutral code representation.
//!
//! Drivers build declarations out of these nodes; a separate printer
//! (see [`crate::fmt`]) turns them into target source text. Nothing in here
//! knows about C# syntax.

pub mod decl;
pub mod expr;
pub mod stmt;
pub mod types;

pub use decl::*;
pub use expr::*;
pub use stmt::*;
pub use types::*;
