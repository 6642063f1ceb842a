//! Generic record mapping between SQLite rows and typed records.
//!
//! A record type describes itself once with a [`RecordDescription`]: the table, the ordered
//! `field -> column` pairs, and a constructor that reads fields through a [`RowReader`].
//! [`query_list`], [`query_object`] and [`query_optional`] then work for any [`Record`] without
//! per-entity scan code. Arguments bind positionally as [`SqlArg`] values.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteQueryResult, SqliteRow};
use sqlx::{Column, Decode, Row, Sqlite, SqlitePool, Type};
use tracing::debug;

use crate::error::StorageError;

/// A type that can be built from a result row using its [`RecordDescription`].
pub trait Record: Sized + Send + Unpin + 'static {
    /// The description for this type, built once per process.
    fn description() -> &'static RecordDescription<Self>;
}

/// One `field -> column` correspondence.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldMapping {
    field: &'static str,
    column: &'static str,
}

/// Constructor reading a record out of a row.
pub type Constructor<T> = fn(&RowReader<'_, T>) -> Result<T, StorageError>;

/// Table name, field/column mapping and constructor for one record type.
pub struct RecordDescription<T> {
    table: &'static str,
    fields: Vec<FieldMapping>,
    construct: Constructor<T>,
}

impl<T> RecordDescription<T> {
    pub fn builder(table: &'static str) -> RecordDescriptionBuilder<T> {
        RecordDescriptionBuilder {
            table,
            fields: Vec::new(),
            _marker: PhantomData,
        }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Column mapped to `field`, if described.
    pub fn column_for(&self, field: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|m| m.field == field)
            .map(|m| m.column)
    }

    /// Comma-separated column list in description order, for SELECT clauses.
    pub fn column_list(&self) -> String {
        self.fields
            .iter()
            .map(|m| m.column)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Builds one record from `row`. Every described column must be present in the row.
    pub fn map_row(&self, row: &SqliteRow) -> Result<T, StorageError> {
        for mapping in &self.fields {
            let present = row.columns().iter().any(|c| c.name() == mapping.column);
            if !present {
                return Err(StorageError::Mapping(format!(
                    "{}: column '{}' for field '{}' missing from result row",
                    self.table, mapping.column, mapping.field
                )));
            }
        }
        (self.construct)(&RowReader {
            row,
            description: self,
        })
    }
}

/// Builder for [`RecordDescription`]; fields keep the order they are added in.
pub struct RecordDescriptionBuilder<T> {
    table: &'static str,
    fields: Vec<FieldMapping>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RecordDescriptionBuilder<T> {
    /// Maps semantic `field` to store `column`. Re-adding a field replaces its column.
    pub fn field(mut self, field: &'static str, column: &'static str) -> Self {
        match self.fields.iter_mut().find(|m| m.field == field) {
            Some(existing) => existing.column = column,
            None => self.fields.push(FieldMapping { field, column }),
        }
        self
    }

    pub fn build(self, construct: Constructor<T>) -> RecordDescription<T> {
        RecordDescription {
            table: self.table,
            fields: self.fields,
            construct,
        }
    }
}

/// Row access by semantic field name, handed to a record constructor.
pub struct RowReader<'r, T> {
    row: &'r SqliteRow,
    description: &'r RecordDescription<T>,
}

impl<'r, T> RowReader<'r, T> {
    /// Decodes the column mapped to `field`.
    pub fn get<V>(&self, field: &str) -> Result<V, StorageError>
    where
        V: Decode<'r, Sqlite> + Type<Sqlite>,
    {
        let column = self.description.column_for(field).ok_or_else(|| {
            StorageError::Mapping(format!(
                "{}: no column mapped for field '{}'",
                self.description.table, field
            ))
        })?;
        let row: &'r SqliteRow = self.row;
        Ok(row.try_get(column)?)
    }
}

/// Positional query argument.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    Int(i64),
    Text(String),
    /// Binds NULL when `None`.
    OptText(Option<String>),
    Timestamp(DateTime<Utc>),
}

impl From<i64> for SqlArg {
    fn from(v: i64) -> Self {
        SqlArg::Int(v)
    }
}

impl From<&str> for SqlArg {
    fn from(v: &str) -> Self {
        SqlArg::Text(v.to_string())
    }
}

impl From<String> for SqlArg {
    fn from(v: String) -> Self {
        SqlArg::Text(v)
    }
}

impl From<Option<String>> for SqlArg {
    fn from(v: Option<String>) -> Self {
        SqlArg::OptText(v)
    }
}

impl From<DateTime<Utc>> for SqlArg {
    fn from(v: DateTime<Utc>) -> Self {
        SqlArg::Timestamp(v)
    }
}

fn bind_args<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    args: &'q [SqlArg],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for arg in args {
        query = match arg {
            SqlArg::Int(v) => query.bind(*v),
            SqlArg::Text(v) => query.bind(v.as_str()),
            SqlArg::OptText(v) => query.bind(v.as_deref()),
            SqlArg::Timestamp(v) => query.bind(*v),
        };
    }
    query
}

/// `"?, ?, ?"` with exactly `n` markers, for `IN (...)` predicates.
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// Runs `sql` and maps every row to a new `T`, in the order the store returns them.
///
/// Zero rows is an empty vec, not an error. Callers add `ORDER BY` when order matters.
pub async fn query_list<T: Record>(
    pool: &SqlitePool,
    sql: &str,
    args: &[SqlArg],
) -> Result<Vec<T>, StorageError> {
    let description = T::description();
    let rows = bind_args(sqlx::query(sql), args).fetch_all(pool).await?;
    let records = rows
        .iter()
        .map(|row| description.map_row(row))
        .collect::<Result<Vec<T>, _>>()?;
    debug!(table = description.table(), rows = records.len(), "query_list");
    Ok(records)
}

/// Runs `sql` and maps the first row, or returns `None` when nothing matched.
pub async fn query_optional<T: Record>(
    pool: &SqlitePool,
    sql: &str,
    args: &[SqlArg],
) -> Result<Option<T>, StorageError> {
    let description = T::description();
    let row = bind_args(sqlx::query(sql), args)
        .fetch_optional(pool)
        .await?;
    debug!(table = description.table(), found = row.is_some(), "query_optional");
    row.map(|r| description.map_row(&r)).transpose()
}

/// Runs `sql` and maps the first row; when nothing matched returns `T::default()` and no error.
///
/// Not-found is only visible through the returned value, so callers must check the record's
/// discriminating field (for [`crate::Groupchat`], an empty `state`). Use [`query_optional`]
/// for an explicit outcome.
pub async fn query_object<T: Record + Default>(
    pool: &SqlitePool,
    sql: &str,
    args: &[SqlArg],
) -> Result<T, StorageError> {
    Ok(query_optional::<T>(pool, sql, args)
        .await?
        .unwrap_or_default())
}

/// Runs an INSERT/UPDATE/DELETE with positional arguments.
pub async fn execute(
    pool: &SqlitePool,
    sql: &str,
    args: &[SqlArg],
) -> Result<SqliteQueryResult, StorageError> {
    Ok(bind_args(sqlx::query(sql), args).execute(pool).await?)
}
