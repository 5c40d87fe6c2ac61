//! SELECT assembly, including the per-dialect pagination strategies.

use super::{append_conditions, append_joins};
use crate::ast::SelectBuilder;
use crate::command::Command;
use crate::dialect::Dialect;

pub(crate) fn assemble(builder: &SelectBuilder, terminated: bool) -> Command {
    let text = match builder.dialect() {
        Dialect::MsSql => mssql(builder),
        Dialect::Oracle => oracle(builder),
        Dialect::Firebird => firebird(builder),
        Dialect::MySql | Dialect::Drizzle | Dialect::PostgreSql | Dialect::Sqlite => {
            limit_offset(builder)
        }
    };
    Command::new(text, terminated)
}

fn column_list(b: &SelectBuilder) -> String {
    if b.columns.is_empty() {
        b.wildcard.clone()
    } else {
        b.columns.join(", ")
    }
}

/// FROM, joins, WHERE, GROUP BY, HAVING - shared by every strategy.
fn append_core(sql: &mut String, b: &SelectBuilder) {
    if let Some(from) = &b.from {
        sql.push_str(" FROM ");
        sql.push_str(from);
    }
    append_joins(sql, &b.joins);
    if !b.where_list.is_empty() {
        sql.push_str(" WHERE ");
        append_conditions(sql, &b.where_list.entries);
    }
    if !b.group_by.is_empty() {
        sql.push_str(" GROUP BY ");
        sql.push_str(&b.group_by.join(", "));
    }
    if !b.having_list.is_empty() {
        sql.push_str(" HAVING ");
        append_conditions(sql, &b.having_list.entries);
    }
}

fn append_order_by(sql: &mut String, b: &SelectBuilder) {
    if !b.order_by.is_empty() {
        sql.push_str(" ORDER BY ");
        sql.push_str(&b.order_by.join(", "));
    }
}

/// Combine clauses are stored fully rendered; append them verbatim.
fn append_combine(sql: &mut String, b: &SelectBuilder) {
    for combine in &b.combine {
        sql.push(' ');
        sql.push_str(combine);
    }
}

/// Native `LIMIT n OFFSET m` dialects.
fn limit_offset(b: &SelectBuilder) -> String {
    let mut sql = String::from("SELECT ");
    if b.distinct {
        sql.push_str("DISTINCT ");
    }
    sql.push_str(&column_list(b));
    append_core(&mut sql, b);
    append_order_by(&mut sql, b);
    if b.limit > 0 {
        sql.push_str(&format!(" LIMIT {}", b.limit));
    }
    if b.offset > 0 {
        sql.push_str(&format!(" OFFSET {}", b.offset));
    }
    append_combine(&mut sql, b);
    sql
}

/// `TOP n` carries the limit; a requested offset forces the windowed
/// rewrite, which is only expressible when an ORDER BY fixes row order.
fn mssql(b: &SelectBuilder) -> String {
    if b.offset > 0 && b.limit > 0 && !b.order_by.is_empty() {
        // Number the rows of the pre-limit statement, keep the requested
        // range, and re-sort by the row number so result order is stable.
        let mut inner = format!(
            "SELECT ROW_NUMBER() OVER(ORDER BY {}) AS [ROW_NUMBER], {}",
            b.order_by.join(", "),
            column_list(b)
        );
        append_core(&mut inner, b);
        let lower = b.offset + 1;
        let upper = b.offset + b.limit;
        let mut sql = format!(
            "SELECT [outer].* FROM ({inner}) AS [outer] \
             WHERE [outer].[ROW_NUMBER] BETWEEN {lower} AND {upper} \
             ORDER BY [outer].[ROW_NUMBER]"
        );
        append_combine(&mut sql, b);
        return sql;
    }

    let mut sql = String::from("SELECT ");
    if b.distinct {
        sql.push_str("DISTINCT ");
    }
    if b.limit > 0 {
        sql.push_str(&format!("TOP {} ", b.limit));
    }
    sql.push_str(&column_list(b));
    append_core(&mut sql, b);
    append_order_by(&mut sql, b);
    append_combine(&mut sql, b);
    sql
}

/// ROWNUM subquery wrapping. Combine clauses keep their legacy position
/// before ORDER BY, inside the wrap.
fn oracle(b: &SelectBuilder) -> String {
    let mut sql = String::from("SELECT ");
    if b.distinct {
        sql.push_str("DISTINCT ");
    }
    sql.push_str(&column_list(b));
    append_core(&mut sql, b);
    append_combine(&mut sql, b);
    append_order_by(&mut sql, b);

    if b.limit > 0 && b.offset > 0 {
        let upper = b.offset + b.limit - 1;
        let lower = b.offset;
        format!(
            "SELECT * FROM (SELECT \"t0\".*, ROWNUM AS \"rn\" FROM ({sql}) \"t0\" \
             WHERE ROWNUM <= {upper}) WHERE \"rn\" >= {lower}"
        )
    } else if b.limit > 0 {
        format!("SELECT * FROM ({sql}) WHERE ROWNUM <= {}", b.limit)
    } else if b.offset > 0 {
        format!("SELECT * FROM ({sql}) WHERE ROWNUM >= {}", b.offset)
    } else {
        sql
    }
}

/// `FIRST n SKIP m` sit between SELECT and the column list.
fn firebird(b: &SelectBuilder) -> String {
    let mut sql = String::from("SELECT ");
    if b.limit > 0 {
        sql.push_str(&format!("FIRST {} ", b.limit));
    }
    if b.offset > 0 {
        sql.push_str(&format!("SKIP {} ", b.offset));
    }
    if b.distinct {
        sql.push_str("DISTINCT ");
    }
    sql.push_str(&column_list(b));
    append_core(&mut sql, b);
    append_order_by(&mut sql, b);
    append_combine(&mut sql, b);
    sql
}
