//! Helpers for dynamically built WHERE clauses.

use sqlx::query::{QueryAs, QueryScalar};
use sqlx::sqlite::SqliteArguments;
use sqlx::Sqlite;
use tathya_core::types::Timestamp;

/// Typed bind value for dynamically built queries.
pub(crate) enum BindValue {
    BigInt(i64),
    Text(String),
    Timestamp(Timestamp),
}

/// Accumulates `AND`-joined conditions with `$N` placeholders.
pub(crate) struct Filter {
    conditions: Vec<String>,
    pub(crate) values: Vec<BindValue>,
}

impl Filter {
    pub(crate) fn new() -> Self {
        Self {
            conditions: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Next placeholder index.
    pub(crate) fn next_idx(&self) -> usize {
        self.values.len() + 1
    }

    /// Push a condition where `{}` is replaced by the placeholder.
    pub(crate) fn push(&mut self, condition: &str, value: BindValue) {
        let placeholder = format!("${}", self.next_idx());
        self.conditions.push(condition.replace("{}", &placeholder));
        self.values.push(value);
    }

    /// Push an OR of `LIKE` matches across `columns`, all bound to one value.
    pub(crate) fn push_text_search(&mut self, columns: &[&str], text: &str) {
        let placeholder = format!("${}", self.next_idx());
        let ors: Vec<String> = columns
            .iter()
            .map(|c| format!("{c} LIKE {placeholder}"))
            .collect();
        self.conditions.push(format!("({})", ors.join(" OR ")));
        self.values.push(BindValue::Text(format!("%{text}%")));
    }

    /// `WHERE ...` or an empty string.
    pub(crate) fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }
}

pub(crate) fn bind_values<'q, O>(
    mut q: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    values: &'q [BindValue],
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for val in values {
        q = match val {
            BindValue::BigInt(v) => q.bind(*v),
            BindValue::Text(v) => q.bind(v.as_str()),
            BindValue::Timestamp(v) => q.bind(*v),
        };
    }
    q
}

pub(crate) fn bind_values_scalar<'q>(
    mut q: QueryScalar<'q, Sqlite, i64, SqliteArguments<'q>>,
    values: &'q [BindValue],
) -> QueryScalar<'q, Sqlite, i64, SqliteArguments<'q>> {
    for val in values {
        q = match val {
            BindValue::BigInt(v) => q.bind(*v),
            BindValue::Text(v) => q.bind(v.as_str()),
            BindValue::Timestamp(v) => q.bind(*v),
        };
    }
    q
}
