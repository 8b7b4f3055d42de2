//! Identifier normalization for generated fields and arguments.
//!
//! Everything here is a pure function of its inputs: no counters, no locale.

use crate::query::{Column, Parameter};
use once_cell::sync::Lazy;
use regex::Regex;

static UNDERSCORE_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_[a-z]").expect("static pattern is valid"));

/// Lower-case `name`, then fold every `_x` into `X`.
///
/// ```
/// use sqlc_csharp::naming::camel_case;
///
/// assert_eq!(camel_case("USER_ID"), "userId");
/// assert_eq!(camel_case("col_1"), "col_1");
/// ```
pub fn camel_case(name: &str) -> String {
    let lower = name.to_lowercase();
    UNDERSCORE_LETTER
        .replace_all(&lower, |caps: &regex::Captures| caps[0][1..].to_uppercase())
        .into_owned()
}

/// Name a field: the column name when known, otherwise `prefix` + `index`.
pub fn field_name(prefix: &str, index: usize, column: Option<&Column>) -> String {
    match column {
        Some(col) => camel_case(&col.name),
        None => camel_case(&format!("{}{}", prefix, index)),
    }
}

pub fn arg_name(index: usize, column: Option<&Column>) -> String {
    field_name("arg", index, column)
}

pub fn col_name(index: usize, column: Option<&Column>) -> String {
    field_name("col", index, column)
}

/// Name every item of an ordered list, disambiguating repeats.
///
/// An item whose name is already taken gets a numeric suffix, starting at its
/// own index and counting up until the name is free. The result depends only
/// on the list itself.
pub fn field_names<'a>(
    prefix: &str,
    items: impl IntoIterator<Item = (usize, Option<&'a Column>)>,
) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (index, column) in items {
        let base = field_name(prefix, index, column);
        let mut name = base.clone();
        let mut suffix = index;
        while names.contains(&name) {
            name = format!("{}{}", base, suffix);
            suffix += 1;
        }
        names.push(name);
    }
    names
}

/// Field names for a query's result columns, positional index from 0.
pub fn column_field_names(columns: &[Column]) -> Vec<String> {
    field_names("col", columns.iter().enumerate().map(|(i, c)| (i, Some(c))))
}

/// Field names for a query's parameters, using each parameter's own index.
pub fn param_field_names(params: &[Parameter]) -> Vec<String> {
    field_names("arg", params.iter().map(|p| (p.index, p.column.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_without_column() {
        assert_eq!(field_name("arg", 0, None), "arg0");
        assert_eq!(arg_name(3, None), "arg3");
        assert_eq!(col_name(2, None), "col2");
    }

    #[test]
    fn test_field_name_with_column() {
        let col = Column::new("user_id", "bigint", true);
        assert_eq!(field_name("col", 2, Some(&col)), "userId");
    }

    #[test]
    fn test_camel_case_rules() {
        assert_eq!(camel_case("created_at_utc"), "createdAtUtc");
        assert_eq!(camel_case("Author_Name"), "authorName");
        assert_eq!(camel_case("id"), "id");
        // Only underscore + letter folds.
        assert_eq!(camel_case("line_2"), "line_2");
        assert_eq!(camel_case("a__b"), "a_B");
        assert_eq!(camel_case("_private"), "Private");
    }

    #[test]
    fn test_deterministic() {
        let col = Column::new("Some_Mixed_NAME", "", false);
        let first = field_name("col", 7, Some(&col));
        for _ in 0..10 {
            assert_eq!(field_name("col", 7, Some(&col)), first);
        }
    }

    #[test]
    fn test_field_names_disambiguates_repeats() {
        let columns = vec![
            Column::new("id", "int", true),
            Column::new("ID", "int", true),
            Column::new("name", "text", false),
        ];
        assert_eq!(column_field_names(&columns), vec!["id", "id1", "name"]);
    }

    #[test]
    fn test_field_names_suffix_skips_taken_names() {
        let columns = vec![
            Column::new("a", "int", true),
            Column::new("a2", "int", true),
            Column::new("a", "int", true),
        ];
        let names = column_field_names(&columns);
        assert_eq!(names, vec!["a", "a2", "a3"]);

        let columns = vec![
            Column::new("a", "int", true),
            Column::new("a", "int", true),
            Column::new("a1", "int", true),
        ];
        assert_eq!(column_field_names(&columns), vec!["a", "a1", "a12"]);
    }

    #[test]
    fn test_param_field_names_use_param_index() {
        let params = vec![
            Parameter::new(1, Some(Column::new("author_id", "int", true))),
            Parameter::new(2, None),
        ];
        assert_eq!(param_field_names(&params), vec!["authorId", "arg2"]);
    }
}
