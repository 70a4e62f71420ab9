//! SET clause construction for partial updates.
//!
//! Column names come from the patch types in each accessor module and are
//! always `'static` literals; only values travel as parameters.

use nile_client::Statement;
use serde::Serialize;
use serde_json::Value;

/// Assignments collected from a patch, numbered after a fixed set of
/// leading parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetClause {
    leading: usize,
    columns: Vec<&'static str>,
    values: Vec<Result<Value, String>>,
}

impl SetClause {
    /// Start a clause whose first placeholder follows `leading` parameters.
    pub fn new(leading: usize) -> Self {
        Self {
            leading,
            ..Self::default()
        }
    }

    /// Assign `value` to `column`.
    ///
    /// An encoding failure is carried into the statement by
    /// [`SetClause::bind_to`] and stops it from running.
    pub fn set<T: Serialize>(&mut self, column: &'static str, value: T) {
        self.columns.push(column);
        self.values.push(
            serde_json::to_value(value).map_err(|e| format!("{}: {}", column, e)),
        );
    }

    /// Assign `value` to `column` when present.
    pub fn set_some<T: Serialize>(&mut self, column: &'static str, value: Option<T>) {
        if let Some(value) = value {
            self.set(column, value);
        }
    }

    /// Columns assigned so far.
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// True when the patch carried no fields.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", self.leading + index + 1)
    }

    /// `col = $n, ...` followed by the `updated_at` refresh.
    pub fn assignments(&self) -> String {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = {}", column, self.placeholder(i)))
            .chain(std::iter::once("updated_at = CURRENT_TIMESTAMP".to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `, col, ...` for appending to an INSERT column list.
    pub fn insert_columns(&self) -> String {
        self.columns
            .iter()
            .map(|column| format!(", {}", column))
            .collect()
    }

    /// `, $n, ...` matching [`SetClause::insert_columns`].
    pub fn insert_placeholders(&self) -> String {
        (0..self.columns.len())
            .map(|i| format!(", {}", self.placeholder(i)))
            .collect()
    }

    /// `col = EXCLUDED.col, ...` followed by the `updated_at` refresh.
    pub fn excluded_assignments(&self) -> String {
        self.columns
            .iter()
            .map(|column| format!("{column} = EXCLUDED.{column}"))
            .chain(std::iter::once("updated_at = CURRENT_TIMESTAMP".to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Bind the collected values after the statement's leading parameters.
    pub fn bind_to(self, statement: Statement) -> Statement {
        self.values
            .into_iter()
            .fold(statement, |stmt, value| match value {
                Ok(value) => stmt.bind_value(value),
                Err(message) => stmt.with_bind_error(message),
            })
    }
}
