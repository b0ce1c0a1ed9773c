//! SQL statement builders for write units and random-parent mutations.

use crate::ddl::{CHILD_TABLE, PARENT_TABLE};
use crate::value::MySqlValue;
use mysql_async::{Params, Value};
use workload_generator::{FieldValue, Record};

/// A statement with its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    pub fn params(&self) -> Params {
        if self.params.is_empty() {
            Params::Empty
        } else {
            Params::Positional(self.params.clone())
        }
    }
}

/// Picks one random parent id. The derived table sidesteps MySQL's ban on
/// selecting from the table being modified.
const RANDOM_PARENT_ID: &str =
    "(SELECT `id` FROM (SELECT `id` FROM `parent_records` ORDER BY RAND() LIMIT 1) AS tmp)";

fn quoted(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| format!("`{c}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn insert(table: &str, leading: Vec<(&str, Value)>, record: &Record) -> Statement {
    let mut columns: Vec<&str> = vec!["id"];
    let mut params: Vec<Value> = Vec::with_capacity(1 + leading.len() + record.fields.len());
    params.push(Value::Int(record.id));

    for (column, value) in leading {
        columns.push(column);
        params.push(value);
    }
    for (name, value) in &record.fields {
        columns.push(name.as_str());
        params.push(MySqlValue::from(value).into_inner());
    }

    let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
    let sql = format!(
        "INSERT INTO `{}` ({}) VALUES ({})",
        table,
        quoted(&columns),
        placeholders.join(", ")
    );

    Statement { sql, params }
}

/// INSERT for one parent row.
pub fn insert_parent(parent: &Record) -> Statement {
    insert(PARENT_TABLE, Vec::new(), parent)
}

/// INSERT for one child row linked to `parent_id`.
pub fn insert_child(parent_id: i64, child: &Record) -> Statement {
    insert(CHILD_TABLE, vec![("parent_id", Value::Int(parent_id))], child)
}

/// UPDATE applying `assignments` to one random parent.
pub fn update_random_parent(assignments: &[(String, FieldValue)]) -> Statement {
    let set = assignments
        .iter()
        .map(|(column, _)| format!("`{column}` = ?"))
        .collect::<Vec<_>>()
        .join(", ");
    let params = assignments
        .iter()
        .map(|(_, value)| MySqlValue::from(value).into_inner())
        .collect();

    Statement {
        sql: format!("UPDATE `{PARENT_TABLE}` SET {set} WHERE `id` = {RANDOM_PARENT_ID}"),
        params,
    }
}

/// DELETE of one random parent. Its children go with it through the
/// cascading foreign key.
pub fn delete_random_parent() -> Statement {
    Statement {
        sql: format!("DELETE FROM `{PARENT_TABLE}` WHERE `id` = {RANDOM_PARENT_ID}"),
        params: Vec::new(),
    }
}
