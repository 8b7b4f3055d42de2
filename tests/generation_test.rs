use pretty_assertions::assert_eq;
use sqlc_csharp::prelude::*;

const REQUEST: &str = r#"{
    "queries": [
        {
            "name": "GetAuthor",
            "text": "SELECT id, name, bio FROM authors WHERE id = ? LIMIT 1",
            "cmd": ":one",
            "params": [{"index": 1, "column": {"name": "id", "type": "bigint", "not_null": true}}],
            "columns": [
                {"name": "id", "type": "bigint", "not_null": true},
                {"name": "name", "type": "varchar", "not_null": true},
                {"name": "bio", "type": "text"}
            ]
        },
        {
            "name": "ListAuthors",
            "text": "SELECT id, name FROM authors ORDER BY name",
            "cmd": ":many",
            "columns": [
                {"name": "id", "type": "bigint", "not_null": true},
                {"name": "name", "type": "varchar", "not_null": true}
            ]
        },
        {
            "name": "DeleteAuthor",
            "text": "DELETE FROM authors WHERE id = ?",
            "cmd": ":exec",
            "params": [{"index": 1, "column": {"name": "id", "type": "bigint", "not_null": true}}]
        }
    ]
}"#;

fn run(request: &GenerateRequest) -> GenResult<Generated> {
    let mut config = Config::default();
    config.apply(&request.options);
    sqlc_csharp::generate(config, &request.queries)
}

fn method_order(contents: &str) -> Vec<String> {
    contents
        .lines()
        .filter(|l| l.trim_start().starts_with("public async "))
        .filter_map(|l| l.split('(').next())
        .filter_map(|head| head.rsplit(' ').next())
        .map(str::to_string)
        .collect()
}

#[test]
fn test_full_file_mysql() {
    let request = GenerateRequest::from_json(REQUEST).unwrap();
    let generated = run(&request).unwrap();
    assert_eq!(generated.file.name, "Queries.cs");
    assert!(generated.skipped.is_empty());

    let expected = r#"
// Code generated by sqlc-csharp. DO NOT EDIT.
// engine: mysql

using System;
using System.Collections.Generic;
using System.Globalization;
using System.Threading.Tasks;
using MySqlConnector;

namespace Generated;

public class GetAuthorRow
{
    public long id { get; init; }
    public string name { get; init; }
    public string bio { get; init; }
}

public class GetAuthorArgs
{
    public long id { get; init; }
}

public class ListAuthorsRow
{
    public long id { get; init; }
    public string name { get; init; }
}

public class DeleteAuthorArgs
{
    public long id { get; init; }
}

public class Queries
{
    private const string ConnectionString = "server=localhost;user=root;database=mydb;port=3306;password=";

    public async Task<GetAuthorRow?> GetAuthor(MySqlConnection client, GetAuthorArgs args)
    {
        const string sql = "SELECT id, name, bio FROM authors WHERE id = @id LIMIT 1";
        await using var command = new MySqlCommand(sql, client);
        command.Parameters.AddWithValue("@id", args.id);
        await using var reader = await command.ExecuteReaderAsync();
        if (await reader.ReadAsync())
        {
            return new GetAuthorRow { id = reader.GetFieldValue<long>(0), name = Convert.ToString(reader.GetValue(1), CultureInfo.InvariantCulture), bio = reader.IsDBNull(2) ? null : Convert.ToString(reader.GetValue(2), CultureInfo.InvariantCulture) };
        }
        return null;
    }

    public async Task<List<ListAuthorsRow>> ListAuthors(MySqlConnection client)
    {
        const string sql = "SELECT id, name FROM authors ORDER BY name";
        await using var command = new MySqlCommand(sql, client);
        await using var reader = await command.ExecuteReaderAsync();
        var rows = new List<ListAuthorsRow>();
        while (await reader.ReadAsync())
        {
            rows.Add(new ListAuthorsRow { id = reader.GetFieldValue<long>(0), name = Convert.ToString(reader.GetValue(1), CultureInfo.InvariantCulture) });
        }
        return rows;
    }

    public async Task DeleteAuthor(MySqlConnection client, DeleteAuthorArgs args)
    {
        const string sql = "DELETE FROM authors WHERE id = @id";
        await using var command = new MySqlCommand(sql, client);
        command.Parameters.AddWithValue("@id", args.id);
        await command.ExecuteNonQueryAsync();
    }
}
"#;
    assert_eq!(generated.file.contents, expected.trim_start());
}

#[test]
fn test_reproducible_output() {
    let request = GenerateRequest::from_json(REQUEST).unwrap();
    for engine in Engine::ALL {
        let config = Config {
            engine,
            ..Default::default()
        };
        let first = sqlc_csharp::generate(config.clone(), &request.queries).unwrap();
        let second = sqlc_csharp::generate(config, &request.queries).unwrap();
        assert_eq!(first.file, second.file);
    }
}

#[test]
fn test_input_order_preserved() {
    let mut request = GenerateRequest::from_json(REQUEST).unwrap();
    let forward = run(&request).unwrap();
    assert_eq!(
        method_order(&forward.file.contents),
        vec!["GetAuthor", "ListAuthors", "DeleteAuthor"]
    );

    request.queries.reverse();
    let backward = run(&request).unwrap();
    assert_eq!(
        method_order(&backward.file.contents),
        vec!["DeleteAuthor", "ListAuthors", "GetAuthor"]
    );
}

#[test]
fn test_request_options_select_engine() {
    let request = GenerateRequest::from_json(
        r#"{
            "options": {"engine": "postgresql", "namespace": "Acme.Data", "class_name": "AuthorQueries"},
            "queries": [{
                "name": "CountAuthors",
                "text": "SELECT count(*) AS total FROM authors",
                "cmd": ":one",
                "columns": [{"name": "total", "type": "pg_catalog.int8", "not_null": true}]
            }]
        }"#,
    )
    .unwrap();
    let contents = run(&request).unwrap().file.contents;

    assert!(contents.contains("using Npgsql;\n"));
    assert!(contents.contains("namespace Acme.Data;\n"));
    assert!(contents.contains("public class AuthorQueries\n"));
    assert!(contents.contains(
        "public async Task<CountAuthorsRow?> CountAuthors(NpgsqlConnection client)\n"
    ));
    assert!(contents.contains("await using var command = new NpgsqlCommand(sql, client);"));
    assert!(contents.contains("total = reader.GetFieldValue<long>(0)"));
}

#[test]
fn test_sqlite_nullable_params_coalesce() {
    let query = Query::new(
        "SetNote",
        "UPDATE notes SET body = ?, rank = ? WHERE id = ?",
        QueryKind::Exec,
    )
    .param(Column::new("body", "text", false))
    .param(Column::new("rank", "integer", false))
    .untyped_param();
    let config = Config {
        engine: Engine::Sqlite,
        ..Default::default()
    };
    let contents = sqlc_csharp::generate(config, &[query]).unwrap().file.contents;

    assert!(contents.contains("public class SetNoteArgs\n"));
    assert!(contents.contains(
        r#"const string sql = "UPDATE notes SET body = @body, rank = @rank WHERE id = @arg3";"#
    ));
    assert!(contents.contains("    public long? rank { get; init; }\n"));
    assert!(contents.contains("    public object? arg3 { get; init; }\n"));
    assert!(contents.contains(
        r#"command.Parameters.AddWithValue("@rank", (object?)args.rank ?? DBNull.Value);"#
    ));
    assert!(contents.contains(
        r#"command.Parameters.AddWithValue("@arg3", (object?)args.arg3 ?? DBNull.Value);"#
    ));
}

#[test]
fn test_unsupported_type_aborts_run() {
    let query = Query::new("GetColor", "SELECT c FROM t", QueryKind::One)
        .column(Column::new("c", "enum_color", true));
    let err = sqlc_csharp::generate(Config::default(), &[query]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Query 'GetColor': Unsupported column type: 'enum_color'"
    );
}

#[test]
fn test_skip_policy_reports_failures() {
    let mut request = GenerateRequest::from_json(REQUEST).unwrap();
    request.queries.insert(
        1,
        Query::new("Broken", "SELECT 1", QueryKind::Many),
    );
    let config = Config {
        on_error: FailurePolicy::Skip,
        ..Default::default()
    };
    let generated = sqlc_csharp::generate(config, &request.queries).unwrap();

    assert_eq!(generated.skipped.len(), 1);
    assert!(matches!(
        generated.skipped[0].error,
        GenError::ContractViolation { .. }
    ));
    assert_eq!(
        method_order(&generated.file.contents),
        vec!["GetAuthor", "ListAuthors", "DeleteAuthor"]
    );
    assert!(!generated.file.contents.contains("Broken"));
}

#[test]
fn test_invalid_config_rejected() {
    let config = Config {
        class_name: "class name".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        sqlc_csharp::generate(config, &[]),
        Err(GenError::Config(_))
    ));
}

#[test]
fn test_empty_run_still_has_preamble() {
    let contents = sqlc_csharp::generate(Config::default(), &[])
        .unwrap()
        .file
        .contents;
    assert!(contents.contains("using MySqlConnector;\n"));
    assert!(contents.contains("private const string ConnectionString = "));
    assert!(method_order(&contents).is_empty());
}

#[test]
fn test_postgres_positional_params_bound_by_name() {
    let query = Query::new(
        "MoveAuthor",
        "UPDATE authors SET city = $2 WHERE id = $1",
        QueryKind::Exec,
    )
    .param(Column::new("id", "int8", true))
    .param(Column::new("city", "text", true));
    let config = Config {
        engine: Engine::Postgres,
        ..Default::default()
    };
    let contents = sqlc_csharp::generate(config, &[query]).unwrap().file.contents;

    assert!(contents.contains(
        r#"const string sql = "UPDATE authors SET city = @city WHERE id = @id";"#
    ));
    assert!(contents.contains(r#"command.Parameters.AddWithValue("@id", args.id);"#));
    assert!(contents.contains(r#"command.Parameters.AddWithValue("@city", args.city);"#));
    assert!(!contents.contains("$1"));
}

#[test]
fn test_repeated_column_names_stay_distinct() {
    let query = Query::new("Pairs", "SELECT a, a2, a FROM t", QueryKind::Many)
        .column(Column::new("a", "int", true))
        .column(Column::new("a2", "int", true))
        .column(Column::new("a", "int", true));
    let contents = sqlc_csharp::generate(Config::default(), &[query])
        .unwrap()
        .file
        .contents;

    let row = "public class PairsRow\n{\n    public int a { get; init; }\n    public int a2 { get; init; }\n    public int a3 { get; init; }\n}\n";
    assert!(contents.contains(row), "{}", contents);
}

#[test]
fn test_query_named_like_class_rejected() {
    let query = Query::new("Queries", "DELETE FROM authors", QueryKind::Exec);
    let err = sqlc_csharp::generate(Config::default(), &[query]).unwrap_err();
    assert!(matches!(err, GenError::ContractViolation { .. }));
}

#[test]
fn test_keyword_namespace_escaped() {
    let config = Config {
        namespace: "Acme.namespace".to_string(),
        ..Default::default()
    };
    let contents = sqlc_csharp::generate(config, &[]).unwrap().file.contents;
    assert!(contents.contains("namespace Acme.@namespace;\n"));
}
