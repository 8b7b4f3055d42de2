//! Method builders for the three query shapes.
//!
//! Every method is public and asynchronous, takes the client handle first,
//! and takes the bundled arguments second only when the query has parameters
//! and the host named a bundle type.

use super::placeholders;
use crate::ast::{Expr, Method, Param, Primitive, Stmt, TypeRef, Visibility, ident, new_object, string};
use crate::drivers::DbDriver;
use crate::error::{GenError, GenResult};
use crate::naming;
use crate::query::{Column, Parameter, Query};

const CLIENT: &str = "client";
const ARGS: &str = "args";
const SQL: &str = "sql";
const COMMAND: &str = "command";
const READER: &str = "reader";
const ROWS: &str = "rows";

/// Whether a method for `query` gets the bundled-arguments parameter.
pub fn takes_args(query: &Query, arg_type: &str) -> bool {
    !query.params.is_empty() && !arg_type.is_empty()
}

/// Parameter list shared by all shapes.
pub fn func_params<D: DbDriver + ?Sized>(driver: &D, query: &Query, arg_type: &str) -> Vec<Param> {
    let mut params = vec![Param::new(CLIENT, TypeRef::named(driver.client_type()))];
    if takes_args(query, arg_type) {
        params.push(Param::new(ARGS, TypeRef::named(arg_type)));
    }
    params
}

/// Target type of a result column.
pub fn column_type<D: DbDriver + ?Sized>(driver: &D, column: &Column) -> GenResult<TypeRef> {
    driver.type_map(&column.raw_type, column.not_null)
}

/// Target type of a parameter. Parameters without a known column are opaque.
pub fn param_type<D: DbDriver + ?Sized>(driver: &D, param: &Parameter) -> GenResult<TypeRef> {
    match &param.column {
        Some(column) => column_type(driver, column),
        None => driver.type_map("", false),
    }
}

pub fn one_declare<D: DbDriver + ?Sized>(
    driver: &D,
    query: &Query,
    arg_type: &str,
    row_type: &str,
) -> GenResult<Method> {
    check_rows(query, row_type)?;
    let row = row_initializer(driver, row_type, &query.columns)?;

    let mut body = command_setup(driver, query, arg_type)?;
    body.push(open_reader());
    body.push(Stmt::If {
        cond: read_next(),
        then: vec![Stmt::ret(row)],
    });
    body.push(Stmt::ret(Expr::Null));

    Ok(method(
        driver,
        query,
        arg_type,
        TypeRef::named(row_type).optional().asynchronous(),
        body,
    ))
}

pub fn many_declare<D: DbDriver + ?Sized>(
    driver: &D,
    query: &Query,
    arg_type: &str,
    row_type: &str,
) -> GenResult<Method> {
    check_rows(query, row_type)?;
    let row = row_initializer(driver, row_type, &query.columns)?;
    let list = TypeRef::named(row_type).list();

    let mut body = command_setup(driver, query, arg_type)?;
    body.push(open_reader());
    body.push(Stmt::var(ROWS, new_object(list.clone(), Vec::new())));
    body.push(Stmt::While {
        cond: read_next(),
        body: vec![Stmt::Expr(ident(ROWS).member("Add").call(vec![row]))],
    });
    body.push(Stmt::ret(ident(ROWS)));

    Ok(method(driver, query, arg_type, list.asynchronous(), body))
}

pub fn exec_declare<D: DbDriver + ?Sized>(
    driver: &D,
    query: &Query,
    arg_type: &str,
) -> GenResult<Method> {
    let mut body = command_setup(driver, query, arg_type)?;
    body.push(Stmt::Expr(
        ident(COMMAND)
            .member("ExecuteNonQueryAsync")
            .call(Vec::new())
            .awaited(),
    ));

    Ok(method(driver, query, arg_type, TypeRef::Unit.asynchronous(), body))
}

fn method<D: DbDriver + ?Sized>(
    driver: &D,
    query: &Query,
    arg_type: &str,
    return_type: TypeRef,
    body: Vec<Stmt>,
) -> Method {
    Method {
        visibility: Visibility::Public,
        is_async: true,
        return_type,
        name: query.name.clone(),
        params: func_params(driver, query, arg_type),
        body,
    }
}

fn check_query(query: &Query) -> GenResult<()> {
    if query.name.trim().is_empty() {
        return Err(GenError::contract(&query.name, "query name is empty"));
    }
    if query.text.trim().is_empty() {
        return Err(GenError::contract(&query.name, "query text is empty"));
    }
    Ok(())
}

fn check_rows(query: &Query, row_type: &str) -> GenResult<()> {
    if query.columns.is_empty() {
        return Err(GenError::contract(
            &query.name,
            format!("'{}' query declares no result columns", query.kind),
        ));
    }
    if row_type.is_empty() {
        return Err(GenError::contract(&query.name, "no row type name supplied"));
    }
    Ok(())
}

/// SQL constant, command construction and parameter bindings.
///
/// When arguments are bound, the engine's positional placeholders are
/// rewritten to the same `@name` each binding uses. Parameter types are
/// resolved even when no bundle is bound, so an unsupported parameter column
/// fails the query either way.
fn command_setup<D: DbDriver + ?Sized>(
    driver: &D,
    query: &Query,
    arg_type: &str,
) -> GenResult<Vec<Stmt>> {
    check_query(query)?;

    let bound = takes_args(query, arg_type);
    let names = naming::param_field_names(&query.params);
    let sql = if bound {
        placeholders::rewrite(query, driver.placeholder_style(), &names)?
    } else {
        query.text.clone()
    };

    let mut body = vec![
        Stmt::Const {
            ty: TypeRef::Primitive(Primitive::String),
            name: SQL.to_string(),
            value: string(sql),
        },
        Stmt::using(
            COMMAND,
            new_object(
                TypeRef::named(driver.command_type()),
                vec![ident(SQL), ident(CLIENT)],
            ),
        ),
    ];

    for (param, name) in query.params.iter().zip(names) {
        let ty = param_type(driver, param)?;
        if !bound {
            continue;
        }
        let nullable = ty.is_optional() || param.column.as_ref().is_none_or(|c| !c.not_null);
        let mut value = ident(ARGS).member(&name);
        if nullable {
            value = value
                .cast(TypeRef::Primitive(Primitive::Object).optional())
                .or_else(ident("DBNull").member("Value"));
        }
        body.push(Stmt::Expr(
            ident(COMMAND)
                .member("Parameters")
                .member("AddWithValue")
                .call(vec![string(format!("@{}", name)), value]),
        ));
    }

    Ok(body)
}

fn open_reader() -> Stmt {
    Stmt::using(
        READER,
        ident(COMMAND)
            .member("ExecuteReaderAsync")
            .call(Vec::new())
            .awaited(),
    )
}

fn read_next() -> Expr {
    ident(READER).member("ReadAsync").call(Vec::new()).awaited()
}

/// Convert the reader's current record into a `row_type` instance.
///
/// Textual columns cover temporal, decimal and uuid types the providers will
/// not hand back as `string`, so they are read untyped and formatted with the
/// invariant culture.
fn row_initializer<D: DbDriver + ?Sized>(
    driver: &D,
    row_type: &str,
    columns: &[Column],
) -> GenResult<Expr> {
    let names = naming::column_field_names(columns);
    let mut fields = Vec::with_capacity(columns.len());

    for (i, (column, name)) in columns.iter().zip(names).enumerate() {
        let ty = column_type(driver, column)?;
        let ordinal = Expr::Int(i as i64);
        let target = ty.non_optional();
        let read = if *target == TypeRef::Primitive(Primitive::String) {
            ident("Convert").member("ToString").call(vec![
                ident(READER).member("GetValue").call(vec![ordinal.clone()]),
                ident("CultureInfo").member("InvariantCulture"),
            ])
        } else {
            ident(READER)
                .member("GetFieldValue")
                .call_generic(vec![target.clone()], vec![ordinal.clone()])
        };
        let value = if ty.is_optional() || !column.not_null {
            ident(READER)
                .member("IsDBNull")
                .call(vec![ordinal])
                .if_else(Expr::Null, read)
        } else {
            read
        };
        fields.push((name, value));
    }

    Ok(Expr::New {
        ty: TypeRef::named(row_type),
        args: Vec::new(),
        fields,
    })
}
