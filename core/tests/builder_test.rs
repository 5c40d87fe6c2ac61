//! End-to-end statement building across dialects.

use polysql_core::prelude::*;
use pretty_assertions::assert_eq;

/// The canonical query: two columns, one predicate, ordered, paginated.
/// Every dialect must select the same ten logical rows.
fn paged(dialect: Dialect) -> Result<SelectBuilder> {
    SelectBuilder::new(dialect)
        .column("id")?
        .column("name")?
        .from("users")?
        .filter("age", ">", 18)?
        .order_by("name", "ASC")?
        .limit(10)?
        .offset(20)
}

#[test]
fn test_every_dialect_renders_the_canonical_query() {
    let expectations = [
        (
            Dialect::MySql,
            "SELECT `id`, `name` FROM `users` WHERE `age` > 18 ORDER BY `name` ASC LIMIT 10 OFFSET 20;",
        ),
        (
            Dialect::Drizzle,
            "SELECT `id`, `name` FROM `users` WHERE `age` > 18 ORDER BY `name` ASC LIMIT 10 OFFSET 20;",
        ),
        (
            Dialect::PostgreSql,
            "SELECT \"id\", \"name\" FROM \"users\" WHERE \"age\" > 18 ORDER BY \"name\" ASC LIMIT 10 OFFSET 20;",
        ),
        (
            Dialect::Sqlite,
            "SELECT \"id\", \"name\" FROM \"users\" WHERE \"age\" > 18 ORDER BY \"name\" ASC LIMIT 10 OFFSET 20;",
        ),
        (
            Dialect::MsSql,
            "SELECT [outer].* FROM (SELECT ROW_NUMBER() OVER(ORDER BY [name] ASC) AS [ROW_NUMBER], \
             [id], [name] FROM [users] WHERE [age] > 18) AS [outer] \
             WHERE [outer].[ROW_NUMBER] BETWEEN 21 AND 30 ORDER BY [outer].[ROW_NUMBER];",
        ),
        (
            Dialect::Oracle,
            "SELECT * FROM (SELECT \"t0\".*, ROWNUM AS \"rn\" FROM \
             (SELECT \"id\", \"name\" FROM \"users\" WHERE \"age\" > 18 ORDER BY \"name\" ASC) \"t0\" \
             WHERE ROWNUM <= 29) WHERE \"rn\" >= 20;",
        ),
        (
            Dialect::Firebird,
            "SELECT FIRST 10 SKIP 20 \"id\", \"name\" FROM \"users\" WHERE \"age\" > 18 ORDER BY \"name\" ASC;",
        ),
    ];
    for (dialect, expected) in expectations {
        let cmd = paged(dialect).unwrap().statement(true);
        assert_eq!(cmd.text(), expected, "dialect {dialect:?}");
    }
}

#[test]
fn test_nested_blocks_never_strand_a_connector() {
    // (a = 1 OR b = 2) AND (c = 3 OR (d = 4 AND e = 5))
    let cmd = SelectBuilder::new(Dialect::PostgreSql)
        .from("t")
        .unwrap()
        .filter_block("(")
        .unwrap()
        .filter("a", "=", 1)
        .unwrap()
        .or_filter("b", "=", 2)
        .unwrap()
        .filter_block(")")
        .unwrap()
        .filter_block("(")
        .unwrap()
        .filter("c", "=", 3)
        .unwrap()
        .or_filter_block("(")
        .unwrap()
        .filter("d", "=", 4)
        .unwrap()
        .filter("e", "=", 5)
        .unwrap()
        .filter_block(")")
        .unwrap()
        .filter_block(")")
        .unwrap()
        .statement(false);
    let text = cmd.text();
    assert_eq!(
        text,
        "SELECT * FROM \"t\" WHERE (\"a\" = 1 OR \"b\" = 2) AND \
         (\"c\" = 3 OR (\"d\" = 4 AND \"e\" = 5))"
    );
    // No connector hugs a parenthesis on the wrong side.
    for stranded in ["( AND", "( OR", "AND )", "OR )"] {
        assert!(!text.contains(stranded), "found '{stranded}' in {text}");
    }
}

#[test]
fn test_subqueries_render_in_identifier_and_value_position() {
    let newest = SelectBuilder::new(Dialect::PostgreSql)
        .column("id")
        .unwrap()
        .from("orders")
        .unwrap()
        .order_by("created_at", "DESC")
        .unwrap()
        .limit(1)
        .unwrap();

    let cmd = SelectBuilder::new(Dialect::PostgreSql)
        .column("name")
        .unwrap()
        .from("users")
        .unwrap()
        .filter("last_order_id", "IN", newest)
        .unwrap()
        .statement(false);
    assert_eq!(
        cmd.text(),
        "SELECT \"name\" FROM \"users\" WHERE \"last_order_id\" IN \
         (SELECT \"id\" FROM \"orders\" ORDER BY \"created_at\" DESC LIMIT 1)"
    );
}

#[test]
fn test_oracle_except_spelling_follows_the_dialect() {
    let archived = SelectBuilder::new(Dialect::Oracle)
        .column("id")
        .unwrap()
        .from("archived_users")
        .unwrap();
    let cmd = SelectBuilder::new(Dialect::Oracle)
        .column("id")
        .unwrap()
        .from("users")
        .unwrap()
        .combine("EXCEPT", &archived)
        .unwrap()
        .statement(false);
    assert_eq!(
        cmd.text(),
        "SELECT \"id\" FROM \"users\" MINUS (SELECT \"id\" FROM \"archived_users\")"
    );
}

#[test]
fn test_combine_accepts_raw_commands() {
    let raw = Command::new("SELECT id FROM legacy_users;", true);
    let cmd = SelectBuilder::new(Dialect::PostgreSql)
        .column("id")
        .unwrap()
        .from("users")
        .unwrap()
        .combine("UNION ALL", &raw)
        .unwrap()
        .statement(false);
    assert_eq!(
        cmd.text(),
        "SELECT \"id\" FROM \"users\" UNION ALL (SELECT id FROM legacy_users)"
    );
}

#[test]
fn test_statement_family_round_trip() {
    let insert = InsertBuilder::new(Dialect::PostgreSql)
        .into("users")
        .unwrap()
        .column("name", "it's Bob")
        .unwrap()
        .column("age", 42)
        .unwrap()
        .statement(true);
    assert_eq!(
        insert.text(),
        "INSERT INTO \"users\" (\"name\", \"age\") VALUES ('it''s Bob', 42);"
    );

    let update = UpdateBuilder::new(Dialect::PostgreSql)
        .table("users")
        .unwrap()
        .set("age", 43)
        .unwrap()
        .filter("name", "=", "it's Bob")
        .unwrap()
        .statement(true);
    assert_eq!(
        update.text(),
        "UPDATE \"users\" SET \"age\" = 43 WHERE \"name\" = 'it''s Bob';"
    );

    let delete = DeleteBuilder::new(Dialect::PostgreSql)
        .from("users")
        .unwrap()
        .filter("age", ">=", 43)
        .unwrap()
        .statement(true);
    assert_eq!(delete.text(), "DELETE FROM \"users\" WHERE \"age\" >= 43;");
}

#[test]
fn test_joins_with_using_and_aliases() {
    let cmd = SelectBuilder::new(Dialect::MySql)
        .column("u.name")
        .unwrap()
        .column_as("o.total", "order_total")
        .unwrap()
        .from_as("users", "u")
        .unwrap()
        .join_as("INNER", "orders", "o")
        .unwrap()
        .on("o.user_id", "=", "u.id")
        .unwrap()
        .join("LEFT", "payments")
        .unwrap()
        .using("order_id")
        .unwrap()
        .statement(false);
    assert_eq!(
        cmd.text(),
        "SELECT `u`.`name`, `o`.`total` AS `order_total` FROM `users` `u` \
         INNER JOIN `orders` `o` ON (`o`.`user_id` = `u`.`id`) \
         LEFT JOIN `payments` USING (`order_id`)"
    );
}

#[test]
fn test_raw_expressions_pass_through_unescaped() {
    let cmd = SelectBuilder::new(Dialect::PostgreSql)
        .column(Expr::Raw("count(*)".to_string()))
        .unwrap()
        .from("users")
        .unwrap()
        .filter("created_at", ">", Value::Raw("now() - interval '1 day'".to_string()))
        .unwrap()
        .statement(false);
    assert_eq!(
        cmd.text(),
        "SELECT count(*) FROM \"users\" WHERE \"created_at\" > now() - interval '1 day'"
    );
}

#[test]
fn test_wildcard_survives_until_columns_arrive() {
    let bare = SelectBuilder::new(Dialect::Sqlite).from("t").unwrap();
    assert_eq!(bare.statement(false).text(), "SELECT * FROM \"t\"");

    let scoped = SelectBuilder::new(Dialect::Sqlite)
        .all("t.*")
        .unwrap()
        .from("t")
        .unwrap();
    assert_eq!(scoped.statement(false).text(), "SELECT \"t\".* FROM \"t\"");
}
