use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use medialib_model::EntityKind;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, postgres::PgRow};
use tracing::trace;

use crate::pagination::{ColumnValue, KeysetExecutor, KeysetQuery, RequestContext, ValueType};

/// Row-level visibility rules appended to every listing query.
///
/// Implementations push a complete ` AND ...` clause (or nothing). They are
/// not consulted for contexts with `bypass_access` set.
pub trait AccessPolicy: Send + Sync {
    fn push_filter(
        &self,
        entity: EntityKind,
        context: &RequestContext,
        builder: &mut QueryBuilder<'_, Postgres>,
    );
}

/// Every row is visible to every requester.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unrestricted;

impl AccessPolicy for Unrestricted {
    fn push_filter(&self, _: EntityKind, _: &RequestContext, _: &mut QueryBuilder<'_, Postgres>) {}
}

/// Restricts account-owned collections (API keys, lists) to the
/// requester's own rows; anonymous requesters see none of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountOwnership;

impl AccessPolicy for AccountOwnership {
    fn push_filter(
        &self,
        entity: EntityKind,
        context: &RequestContext,
        builder: &mut QueryBuilder<'_, Postgres>,
    ) {
        if !matches!(entity, EntityKind::ApiKeys | EntityKind::Lists) {
            return;
        }
        match context.requester {
            Some(account_id) => {
                builder.push(" AND account_id = ");
                builder.push_bind(account_id);
            }
            None => {
                builder.push(" AND FALSE");
            }
        }
    }
}

pub struct PostgresKeysetExecutor {
    pool: PgPool,
    policy: Arc<dyn AccessPolicy>,
}

impl PostgresKeysetExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            policy: Arc::new(Unrestricted),
        }
    }

    pub fn with_policy(mut self, policy: Arc<dyn AccessPolicy>) -> Self {
        self.policy = policy;
        self
    }
}

impl fmt::Debug for PostgresKeysetExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresKeysetExecutor")
            .field("pool_size", &self.pool.size())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<R> KeysetExecutor<R> for PostgresKeysetExecutor
where
    R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    type Error = sqlx::Error;

    async fn fetch(&self, query: &KeysetQuery<'_, R>) -> Result<Vec<R>, sqlx::Error> {
        let mut builder = build_select(query, self.policy.as_ref());
        trace!(entity = %query.entity, sql = builder.sql(), "keyset select");
        builder.build_query_as::<R>().fetch_all(&self.pool).await
    }
}

/// Sort expression for a column. Text sorts bytewise so database order
/// matches `ColumnValue` order.
fn sort_expression(column: &str, value_type: ValueType) -> String {
    match value_type {
        ValueType::Text => format!("{column} COLLATE \"C\""),
        ValueType::Timestamp | ValueType::Int32 | ValueType::Int64 => column.to_string(),
    }
}

fn push_value(builder: &mut QueryBuilder<'_, Postgres>, value: &ColumnValue) {
    match value {
        ColumnValue::Timestamp(at) => builder.push_bind(*at),
        ColumnValue::Text(text) => builder.push_bind(text.clone()),
        ColumnValue::Int32(value) => builder.push_bind(*value),
        ColumnValue::Int64(value) => builder.push_bind(*value),
    };
}

/// `SELECT` for one keyset page:
///
/// ```sql
/// SELECT * FROM <table> WHERE TRUE [<access filter>]
///   [AND (<sort>, <id>) <op> ($value, $id)]
///   ORDER BY <sort> <dir>, <id> <dir> LIMIT $limit
/// ```
pub fn build_select<'args, R>(
    query: &KeysetQuery<'_, R>,
    policy: &dyn AccessPolicy,
) -> QueryBuilder<'args, Postgres> {
    let sort = sort_expression(query.sort_column, query.value_type);
    let id = query.id_column;

    let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM ");
    builder.push(query.table);
    builder.push(" WHERE TRUE");

    if !query.context.bypass_access {
        policy.push_filter(query.entity, query.context, &mut builder);
    }

    if let Some(boundary) = query.boundary {
        builder.push(format!(" AND ({sort}, {id}) {} (", query.comparison()));
        push_value(&mut builder, &boundary.value);
        builder.push(", ");
        builder.push_bind(boundary.id);
        builder.push(")");
    }

    let direction = query.direction();
    builder.push(format!(" ORDER BY {sort} {direction}, {id} {direction} LIMIT "));
    builder.push_bind(i64::from(query.limit));

    builder
}
