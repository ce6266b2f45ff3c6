use std::convert::Infallible;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use super::context::RequestContext;
use super::keyset::{KeysetExecutor, KeysetQuery};

type AccessFn<R> = Arc<dyn Fn(&RequestContext, &R) -> bool + Send + Sync>;

/// In-process keyset executor over a vector of rows.
///
/// Orders rows with the same `(value, id)` comparison the SQL executor
/// uses, so pages match what Postgres would return for the same data.
/// Used by tests and by callers that page over already-loaded collections.
pub struct MemoryExecutor<R> {
    rows: RwLock<Vec<R>>,
    access: Option<AccessFn<R>>,
}

impl<R> MemoryExecutor<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows: RwLock::new(rows),
            access: None,
        }
    }

    /// Row-level visibility check, skipped for `bypass_access` contexts.
    pub fn with_access<F>(mut self, access: F) -> Self
    where
        F: Fn(&RequestContext, &R) -> bool + Send + Sync + 'static,
    {
        self.access = Some(Arc::new(access));
        self
    }

    pub fn insert(&self, row: R) {
        self.rows
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(row);
    }

    pub fn retain(&self, keep: impl FnMut(&R) -> bool) {
        self.rows
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(keep);
    }

    pub fn len(&self) -> usize {
        self.rows.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn visible(&self, context: &RequestContext, row: &R) -> bool {
        context.bypass_access
            || self
                .access
                .as_ref()
                .is_none_or(|access| access(context, row))
    }
}

impl<R> fmt::Debug for MemoryExecutor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryExecutor")
            .field("rows", &self.len())
            .field("access_filter", &self.access.is_some())
            .finish()
    }
}

#[async_trait]
impl<R> KeysetExecutor<R> for MemoryExecutor<R>
where
    R: Clone + Send + Sync,
{
    type Error = Infallible;

    async fn fetch(&self, query: &KeysetQuery<'_, R>) -> Result<Vec<R>, Infallible> {
        let mut matched: Vec<R> = {
            let rows = self.rows.read().unwrap_or_else(PoisonError::into_inner);
            rows.iter()
                .filter(|row| self.visible(query.context, row))
                .filter(|row| query.is_past_boundary(row))
                .cloned()
                .collect()
        };
        matched.sort_by(|a, b| query.cmp_rows(a, b));
        matched.truncate(query.limit as usize);
        Ok(matched)
    }
}
