//! INSERT/UPDATE/DELETE assembly.

use super::append_conditions;
use crate::ast::{DeleteBuilder, InsertBuilder, UpdateBuilder};
use crate::command::Command;

pub(crate) fn assemble_insert(b: &InsertBuilder, terminated: bool) -> Command {
    let mut sql = String::from("INSERT INTO ");
    if let Some(into) = &b.into {
        sql.push_str(into);
    }
    sql.push_str(&format!(
        " ({}) VALUES ({})",
        b.columns.join(", "),
        b.values.join(", ")
    ));
    Command::new(sql, terminated)
}

pub(crate) fn assemble_update(b: &UpdateBuilder, terminated: bool) -> Command {
    let mut sql = String::from("UPDATE ");
    if let Some(table) = &b.table {
        sql.push_str(table);
    }
    sql.push_str(" SET ");
    sql.push_str(&b.set_clauses.join(", "));
    if !b.where_list.is_empty() {
        sql.push_str(" WHERE ");
        append_conditions(&mut sql, &b.where_list.entries);
    }
    // ORDER BY/LIMIT on UPDATE are MySQL-family grammar.
    if b.dialect.is_mysql_family() {
        if !b.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&b.order_by.join(", "));
        }
        if b.limit > 0 {
            sql.push_str(&format!(" LIMIT {}", b.limit));
        }
    }
    Command::new(sql, terminated)
}

pub(crate) fn assemble_delete(b: &DeleteBuilder, terminated: bool) -> Command {
    let mut sql = String::from("DELETE FROM ");
    if let Some(from) = &b.from {
        sql.push_str(from);
    }
    if !b.where_list.is_empty() {
        sql.push_str(" WHERE ");
        append_conditions(&mut sql, &b.where_list.entries);
    }
    if b.dialect.is_mysql_family() {
        if !b.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&b.order_by.join(", "));
        }
        if b.limit > 0 {
            sql.push_str(&format!(" LIMIT {}", b.limit));
        }
    }
    Command::new(sql, terminated)
}
