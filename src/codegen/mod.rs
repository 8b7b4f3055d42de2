//! Generation pipeline.
//!
//! Selects the driver once, dispatches each query to its shape, and
//! assembles everything into a single source file in input order.

pub mod placeholders;
pub mod records;
pub mod shapes;

use crate::ast::{Class, CompilationUnit, Member, Method, Preamble, Visibility};
use crate::config::{Config, FailurePolicy};
use crate::drivers::DbDriver;
use crate::error::{GenError, GenResult};
use crate::fmt::Formatter;
use crate::plugin::File;
use crate::query::{Query, QueryKind};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// First line of every generated file.
pub const HEADER: &str = "Code generated by sqlc-csharp. DO NOT EDIT.";

/// Everything generated for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDeclarations {
    pub row: Option<Class>,
    pub args: Option<Class>,
    pub method: Method,
}

/// A query left out under [`FailurePolicy::Skip`].
#[derive(Debug)]
pub struct SkippedQuery {
    pub name: String,
    pub error: GenError,
}

#[derive(Debug)]
pub struct Generated {
    pub file: File,
    pub skipped: Vec<SkippedQuery>,
}

pub struct Generator {
    config: Config,
    driver: Box<dyn DbDriver>,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        let driver = config.engine.driver();
        Self { config, driver }
    }

    pub fn driver(&self) -> &dyn DbDriver {
        self.driver.as_ref()
    }

    pub fn row_type_name(query: &Query) -> String {
        format!("{}Row", query.name)
    }

    pub fn arg_type_name(query: &Query) -> String {
        format!("{}Args", query.name)
    }

    /// Generate the declarations for a single query.
    pub fn declare(&self, query: &Query) -> GenResult<QueryDeclarations> {
        let driver = self.driver();
        let arg_type = Self::arg_type_name(query);
        let row_type = Self::row_type_name(query);

        let method = match query.kind {
            QueryKind::One => driver.one_declare(query, &arg_type, &row_type)?,
            QueryKind::Many => driver.many_declare(query, &arg_type, &row_type)?,
            QueryKind::Exec => driver.exec_declare(query, &arg_type)?,
        };

        let row = if query.kind.returns_rows() {
            Some(records::row_class(driver, &row_type, &query.columns)?)
        } else {
            None
        };
        let args = if shapes::takes_args(query, &arg_type) {
            Some(records::args_class(driver, &arg_type, &query.params)?)
        } else {
            None
        };

        debug!(query = %query.name, kind = %query.kind, "declared query");
        Ok(QueryDeclarations { row, args, method })
    }

    /// Build the file's code tree.
    pub fn build(&self, queries: &[Query]) -> GenResult<(CompilationUnit, Vec<SkippedQuery>)> {
        let preamble = self.driver.preamble(queries);
        check_names(queries, &self.config.class_name, &preamble)?;

        let mut records = Vec::new();
        let mut methods = Vec::new();
        let mut skipped = Vec::new();

        for query in queries {
            match self.declare(query) {
                Ok(decls) => {
                    records.extend(decls.row.map(Member::Class));
                    records.extend(decls.args.map(Member::Class));
                    methods.push(Member::Method(decls.method));
                }
                Err(err) => match self.config.on_error {
                    FailurePolicy::Abort => return Err(err.in_query(&query.name)),
                    FailurePolicy::Skip => {
                        warn!(query = %query.name, error = %err, "skipping query");
                        skipped.push(SkippedQuery {
                            name: query.name.clone(),
                            error: err,
                        });
                    }
                },
            }
        }

        let mut members = preamble.members;
        members.extend(methods);
        records.push(Member::Class(Class {
            visibility: Visibility::Public,
            name: self.config.class_name.clone(),
            members,
        }));

        let unit = CompilationUnit {
            header: vec![
                HEADER.to_string(),
                format!("engine: {}", self.driver.engine()),
            ],
            usings: preamble.usings,
            namespace: Some(self.config.namespace.clone()),
            members: records,
        };
        Ok((unit, skipped))
    }

    /// Generate and render the output file.
    pub fn generate(&self, queries: &[Query]) -> GenResult<Generated> {
        info!(
            engine = %self.driver.engine(),
            queries = queries.len(),
            "generating accessors"
        );
        let (unit, skipped) = self.build(queries)?;
        let contents = Formatter::new().format(&unit)?;
        Ok(Generated {
            file: File {
                name: self.config.output_file.clone(),
                contents,
            },
            skipped,
        })
    }
}

/// Query names must be unique and must not clash with the enclosing class,
/// its preamble members, or the record classes beside it.
fn check_names(queries: &[Query], class_name: &str, preamble: &Preamble) -> GenResult<()> {
    let mut seen = HashSet::new();
    for query in queries {
        if !seen.insert(query.name.as_str()) {
            return Err(GenError::contract(
                &query.name,
                "query name declared more than once",
            ));
        }
        if query.name == class_name {
            return Err(GenError::contract(
                &query.name,
                format!("query name collides with the enclosing class '{}'", class_name),
            ));
        }
        if preamble.members.iter().any(|m| m.name() == query.name) {
            return Err(GenError::contract(
                &query.name,
                format!("query name collides with the generated member '{}'", query.name),
            ));
        }
        let row_clash = query.kind.returns_rows() && Generator::row_type_name(query) == class_name;
        let args_clash = !query.params.is_empty() && Generator::arg_type_name(query) == class_name;
        if row_clash || args_clash {
            return Err(GenError::contract(
                &query.name,
                format!("record class collides with the enclosing class '{}'", class_name),
            ));
        }
    }
    Ok(())
}
