//! # sqlc-csharp
//!
//! Turns parsed query metadata into C# data-access code.
//!
//! The host parses SQL and schema; this crate maps column types, names
//! fields, and builds one async accessor per query, shaped by the query's
//! kind:
//!
//! | Kind   | Generated return type |
//! |--------|-----------------------|
//! | `one`  | `Task<Row?>`          |
//! | `many` | `Task<List<Row>>`     |
//! | `exec` | `Task`                |
//!
//! ## Quick Example
//!
//! ```
//! use sqlc_csharp::prelude::*;
//!
//! let query = Query::new("GetAuthor", "SELECT id, name FROM authors WHERE id = ?", QueryKind::One)
//!     .param(Column::new("id", "bigint", true))
//!     .column(Column::new("id", "bigint", true))
//!     .column(Column::new("name", "varchar", false));
//!
//! let generated = sqlc_csharp::generate(Config::default(), &[query]).unwrap();
//! assert!(generated.file.contents.contains("public async Task<GetAuthorRow?> GetAuthor("));
//! ```

pub mod ast;
pub mod codegen;
pub mod config;
pub mod drivers;
pub mod error;
pub mod fmt;
pub mod naming;
pub mod plugin;
pub mod query;
pub mod types;

pub mod prelude {
    pub use crate::codegen::{Generated, Generator, QueryDeclarations, SkippedQuery};
    pub use crate::config::{Config, ConfigOverrides, FailurePolicy};
    pub use crate::drivers::{DbDriver, Engine};
    pub use crate::error::*;
    pub use crate::plugin::{GenerateRequest, GenerateResponse};
    pub use crate::query::{Column, Parameter, Query, QueryKind};
    pub use crate::types::TypeFamily;
}

/// Generate the accessor file for `queries` with the given configuration.
pub fn generate(config: config::Config, queries: &[query::Query]) -> error::GenResult<codegen::Generated> {
    config.validate()?;
    codegen::Generator::new(config).generate(queries)
}
