//! Generic SQLite repository.
//!
//! One implementation serves every entity kind. Statement text comes from the
//! entity's table descriptor, values are bound through `?N` markers produced
//! by the placeholder rewriter.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool};
use uuid::Uuid;

use bookstore_core::entity::ValidationError;
use bookstore_core::query::{
    rewrite, template, FieldMap, Rewritten, SqlValue, TableDescriptor, CREATED_AT, UPDATED_AT,
};
use bookstore_core::storage::{
    CrudRepository, ListRequest, ListResponse, LookupKey, RepositoryError, Result,
};

use super::conversions::{format_datetime, parse_uuid, SqliteEntity};
use super::error::{map_sqlx_error, map_sqlx_error_with_key};

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Builds an executable query from a rewritten statement.
fn bind_all(statement: &Rewritten<SqlValue>) -> SqliteQuery<'_> {
    statement
        .args
        .iter()
        .cloned()
        .fold(sqlx::query(&statement.sql), bind_value)
}

fn bind_value(query: SqliteQuery<'_>, value: SqlValue) -> SqliteQuery<'_> {
    match value {
        SqlValue::Null => query.bind(None::<String>),
        SqlValue::Integer(v) => query.bind(v),
        SqlValue::Real(v) => query.bind(v),
        SqlValue::Text(v) => query.bind(v),
    }
}

/// Parameters for statements keyed by a single id.
fn id_params(table: &TableDescriptor, id: Uuid) -> BTreeMap<&'static str, SqlValue> {
    BTreeMap::from([(table.id_column, SqlValue::Text(id.to_string()))])
}

/// Splits one row of a paged list into the total count and the entity, if any.
///
/// The left join yields a single row with all entity columns `NULL` when the
/// page window holds no rows.
fn decode_page_row<E: SqliteEntity>(
    row: &SqliteRow,
    id_column: &str,
) -> sqlx::Result<(i64, Option<E>)> {
    let total_count: i64 = row.try_get(template::TOTAL_COUNT)?;
    let id: Option<String> = row.try_get(id_column)?;
    let item = id.map(|_| E::from_row(row)).transpose()?;
    Ok((total_count, item))
}

/// SQLite-based repository for one entity kind.
///
/// Cheap to construct; holds only a handle to the shared pool.
pub struct SqliteRepository<E> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: SqliteEntity> SqliteRepository<E> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    fn table() -> &'static TableDescriptor {
        E::descriptor()
    }

    async fn execute(&self, statement: &Rewritten<SqlValue>) -> sqlx::Result<u64> {
        let result = bind_all(statement).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn fetch_optional(
        &self,
        statement: &Rewritten<SqlValue>,
    ) -> sqlx::Result<Option<SqliteRow>> {
        bind_all(statement).fetch_optional(&self.pool).await
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<E> {
        let table = Self::table();
        let statement = rewrite(&template::select_by_id(table), &id_params(table, id))?;

        let row = self
            .fetch_optional(&statement)
            .await
            .map_err(|e| map_sqlx_error_with_key(e, table.entity_type, id.to_string()))?
            .ok_or_else(|| RepositoryError::not_found(table.entity_type, id))?;

        E::from_row(&row).map_err(|e| map_sqlx_error_with_key(e, table.entity_type, id.to_string()))
    }

    /// Resolves an alternate key value to the row's id.
    async fn resolve_alternate(&self, value: &str) -> Result<Uuid> {
        let table = Self::table();
        let column = table
            .alternate_key
            .ok_or(ValidationError::NoAlternateKey {
                entity_type: table.entity_type,
            })?;

        let params = BTreeMap::from([(column, SqlValue::from(value))]);
        let statement = rewrite(&template::select_id_by(table, column), &params)?;

        let row = self
            .fetch_optional(&statement)
            .await
            .map_err(|e| map_sqlx_error_with_key(e, table.entity_type, value))?
            .ok_or_else(|| RepositoryError::not_found(table.entity_type, value))?;

        parse_uuid(&row, table.id_column).map_err(|e| map_sqlx_error(e, table.entity_type))
    }

    /// Key reported when an insert collides with an existing row.
    fn conflict_key(table: &TableDescriptor, fields: &FieldMap, id: Uuid) -> String {
        match table.alternate_key.and_then(|column| fields.get(column)) {
            Some(SqlValue::Text(value)) => value.clone(),
            _ => id.to_string(),
        }
    }
}

#[async_trait]
impl<E: SqliteEntity> CrudRepository<E> for SqliteRepository<E> {
    async fn create(&self, input: &E::Create) -> Result<Uuid> {
        let table = Self::table();
        let mut fields = E::insert_fields(input)?;
        table.ensure_writable(&fields)?;

        let id = Uuid::now_v7();
        let now = format_datetime(&Utc::now());
        let columns: Vec<&str> = fields.keys().copied().collect();
        let conflict_key = Self::conflict_key(table, &fields, id);

        fields.insert(table.id_column, id.to_string().into());
        fields.insert(CREATED_AT, now.clone().into());
        fields.insert(UPDATED_AT, now.into());

        let statement = rewrite(&template::insert(table, &columns), &fields)?;
        self.execute(&statement)
            .await
            .map_err(|e| map_sqlx_error_with_key(e, table.entity_type, conflict_key))?;

        tracing::debug!(entity = table.entity_type, %id, "Row created");
        Ok(id)
    }

    async fn get_by_pkey(&self, key: &LookupKey) -> Result<E> {
        let id = match key {
            LookupKey::Primary(id) => *id,
            LookupKey::Alternate(value) => self.resolve_alternate(value).await?,
        };
        self.fetch_by_id(id).await
    }

    async fn get_list(&self, request: ListRequest) -> Result<ListResponse<E>> {
        let table = Self::table();
        let (limit, offset) = request.window(table.default_page_size);

        let params = BTreeMap::from([
            (template::LIMIT, SqlValue::Integer(limit)),
            (template::OFFSET, SqlValue::Integer(offset)),
        ]);
        let statement = rewrite(&template::paged_list(table), &params)?;

        let rows = bind_all(&statement)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, table.entity_type))?;

        let mut total_count = 0;
        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            let (count, item) = decode_page_row::<E>(row, table.id_column)
                .map_err(|e| map_sqlx_error(e, table.entity_type))?;
            total_count = count;
            items.extend(item);
        }

        Ok(ListResponse { total_count, items })
    }

    async fn update(&self, id: Uuid, patch: &E::Patch) -> Result<u64> {
        let table = Self::table();
        let mut fields = E::patch_fields(patch)?;
        if fields.is_empty() {
            return Err(ValidationError::EmptyPatch.into());
        }
        table.ensure_writable(&fields)?;

        let columns: Vec<&str> = fields.keys().copied().collect();
        fields.insert(table.id_column, id.to_string().into());
        fields.insert(UPDATED_AT, format_datetime(&Utc::now()).into());

        let statement = rewrite(&template::update(table, &columns), &fields)?;
        let rows = self
            .execute(&statement)
            .await
            .map_err(|e| map_sqlx_error_with_key(e, table.entity_type, id.to_string()))?;

        tracing::debug!(entity = table.entity_type, %id, rows, "Row updated");
        Ok(rows)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let table = Self::table();
        let statement = rewrite(&template::delete(table), &id_params(table, id))?;

        let rows = self
            .execute(&statement)
            .await
            .map_err(|e| map_sqlx_error_with_key(e, table.entity_type, id.to_string()))?;

        if rows == 0 {
            return Err(RepositoryError::not_found(table.entity_type, id));
        }

        tracing::debug!(entity = table.entity_type, %id, "Row deleted");
        Ok(())
    }
}
