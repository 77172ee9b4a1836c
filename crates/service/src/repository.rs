//! Entity-agnostic persistence on top of SeaORM.
//!
//! `Repository<E>` implements paging, lookup, create, partial update,
//! soft-delete/restore/hard-delete and counting once for every entity that
//! implements [`BaseRecord`]. Reads exclude soft-deleted rows unless asked
//! otherwise; missing rows are `None`, never errors.

use std::future::Future;
use std::time::Duration;

use models::base::{now, BaseRecord, MergeIntoActiveModel};
use models::errors::StorageError;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    AccessMode, ActiveModelTrait, Condition, ConnectionTrait, DatabaseBackend, DatabaseConnection,
    DatabaseTransaction, IntoActiveModel, IsolationLevel, Order, QueryOrder, QuerySelect, Select,
    TransactionTrait, Value,
};
use tracing::{debug, error, info};

use crate::pagination::{PageLimits, PageResult, Pagination};

/// Sort specification: columns applied in order.
pub type OrderBy<E> = Vec<(<E as EntityTrait>::Column, Order)>;

pub struct RepositoryConfig<E: EntityTrait> {
    /// Used when a caller supplies no order; `id` ascending is always
    /// appended as a final tiebreaker.
    pub default_order: OrderBy<E>,
    pub limits: PageLimits,
    /// Bound for one repository call, pool acquisition included.
    pub timeout: Duration,
}

impl<E: BaseRecord> RepositoryConfig<E> {
    pub fn new(limits: PageLimits, timeout: Duration) -> Self {
        Self { default_order: vec![(E::created_at_column(), Order::Desc)], limits, timeout }
    }

    pub fn with_default_order(mut self, order: OrderBy<E>) -> Self {
        self.default_order = order;
        self
    }
}

impl<E: BaseRecord> Default for RepositoryConfig<E> {
    fn default() -> Self {
        Self::new(PageLimits::default(), Duration::from_secs(15))
    }
}

impl<E: EntityTrait> Clone for RepositoryConfig<E> {
    fn clone(&self) -> Self {
        Self { default_order: self.default_order.clone(), limits: self.limits, timeout: self.timeout }
    }
}

/// Lookup switches for [`Repository::find_one`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FindOptions {
    pub include_deleted: bool,
}

pub struct Repository<E: BaseRecord> {
    db: DatabaseConnection,
    config: RepositoryConfig<E>,
    table: String,
}

impl<E: BaseRecord> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self { db: self.db.clone(), config: self.config.clone(), table: self.table.clone() }
    }
}

impl<E> Repository<E>
where
    E: BaseRecord,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: Send,
{
    pub fn new(db: DatabaseConnection, config: RepositoryConfig<E>) -> Self {
        let table = E::default().table_name().to_string();
        Self { db, config, table }
    }

    pub fn with_defaults(db: DatabaseConnection) -> Self {
        Self::new(db, RepositoryConfig::default())
    }

    /// Run one storage call under the configured timeout and classify its
    /// failure.
    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, StorageError>
    where
        F: Future<Output = Result<T, DbErr>>,
    {
        match tokio::time::timeout(self.config.timeout, fut).await {
            Ok(Ok(v)) => Ok(v),
            Ok(Err(e)) => {
                let err = StorageError::from(e);
                error!(table = %self.table, op, error = %err, "storage call failed");
                Err(err)
            }
            Err(_) => {
                error!(table = %self.table, op, timeout_ms = self.config.timeout.as_millis() as u64, "storage call timed out");
                Err(StorageError::timeout(op))
            }
        }
    }

    fn live() -> Condition {
        Condition::all().add(E::deleted_at_column().is_null())
    }

    fn ordered(&self, mut query: Select<E>, order: Option<OrderBy<E>>) -> Select<E> {
        let order = order
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| self.config.default_order.clone());
        for (col, dir) in order {
            query = query.order_by(col, dir);
        }
        query.order_by_asc(E::id_column())
    }

    /// Count and window in one transaction; servers that support it run it
    /// as a read-only REPEATABLE READ snapshot.
    async fn begin_snapshot(&self) -> Result<DatabaseTransaction, DbErr> {
        match self.db.get_database_backend() {
            DatabaseBackend::Sqlite => self.db.begin().await,
            _ => {
                self.db
                    .begin_with_config(Some(IsolationLevel::RepeatableRead), Some(AccessMode::ReadOnly))
                    .await
            }
        }
    }

    /// One page of live rows matching `filter`, plus the total match count.
    pub async fn find_paged(
        &self,
        pagination: Pagination,
        filter: Option<Condition>,
        order: Option<OrderBy<E>>,
    ) -> Result<PageResult<E::Model>, StorageError> {
        let window = pagination.normalize(self.config.limits);
        let mut cond = Self::live();
        if let Some(f) = filter {
            cond = cond.add(f);
        }
        let base = E::find().filter(cond);
        let offset = window.offset();
        let windowed = self
            .ordered(base.clone(), order)
            .offset(offset)
            .limit(window.page_size);

        let (items, total) = self
            .bounded("find_paged", async {
                let txn = self.begin_snapshot().await?;
                let total = base.count(&txn).await?;
                // past the last page
                let items = if offset >= total { Vec::new() } else { windowed.all(&txn).await? };
                txn.commit().await?;
                Ok::<_, DbErr>((items, total))
            })
            .await?;

        debug!(table = %self.table, page = window.page, page_size = window.page_size, total, returned = items.len(), "find_paged");
        Ok(PageResult::new(items, window, total))
    }

    /// Live row by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<E::Model>, StorageError> {
        self.find_one(Condition::all().add(E::id_column().eq(id)), FindOptions::default())
            .await
    }

    /// First row matching `filter` under the default order.
    pub async fn find_one(
        &self,
        filter: Condition,
        options: FindOptions,
    ) -> Result<Option<E::Model>, StorageError> {
        let mut query = E::find().filter(filter);
        if !options.include_deleted {
            query = query.filter(Self::live());
        }
        let query = self.ordered(query, None);
        self.bounded("find_one", query.one(&self.db)).await
    }

    /// Insert a new record. `id`, `created_at`, `updated_at` and `deleted_at`
    /// are always assigned here, whatever the payload set.
    pub async fn create_one<D>(&self, data: D) -> Result<E::Model, StorageError>
    where
        D: MergeIntoActiveModel<E::ActiveModel>,
    {
        let ts = now();
        let mut am = <E::ActiveModel as ActiveModelTrait>::default();
        data.merge_into_active_model(&mut am);
        am.set(E::id_column(), Uuid::new_v4().into());
        am.set(E::created_at_column(), ts.into());
        am.set(E::updated_at_column(), ts.into());
        am.set(E::deleted_at_column(), Value::from(Option::<DateTimeWithTimeZone>::None));

        let created = self.bounded("create_one", am.insert(&self.db)).await?;
        info!(table = %self.table, "record created");
        Ok(created)
    }

    /// Shallow-merge `patch` onto the live record and refresh `updated_at`.
    /// `None` when no live record has this id, including one soft-deleted
    /// concurrently.
    pub async fn update_one<D>(&self, id: Uuid, patch: D) -> Result<Option<E::Model>, StorageError>
    where
        D: MergeIntoActiveModel<E::ActiveModel>,
    {
        let mut am = <E::ActiveModel as ActiveModelTrait>::default();
        patch.merge_into_active_model(&mut am);
        am.set(E::updated_at_column(), now().into());

        let updated = self
            .bounded("update_one", async {
                let txn = self.db.begin().await?;
                let res = E::update_many()
                    .set(am)
                    .filter(E::id_column().eq(id))
                    .filter(E::deleted_at_column().is_null())
                    .exec(&txn)
                    .await?;
                if res.rows_affected == 0 {
                    txn.rollback().await?;
                    return Ok(None);
                }
                let row = E::find().filter(E::id_column().eq(id)).one(&txn).await?;
                txn.commit().await?;
                Ok::<_, DbErr>(row)
            })
            .await?;
        if updated.is_some() {
            info!(table = %self.table, %id, "record updated");
        }
        Ok(updated)
    }

    /// Mark the row deleted. Already-deleted and unknown ids are a no-op.
    pub async fn soft_delete(&self, id: Uuid) -> Result<(), StorageError> {
        let res = self
            .bounded(
                "soft_delete",
                E::update_many()
                    .col_expr(E::deleted_at_column(), Expr::value(Value::from(now())))
                    .filter(E::id_column().eq(id))
                    .filter(E::deleted_at_column().is_null())
                    .exec(&self.db),
            )
            .await?;
        info!(table = %self.table, %id, rows = res.rows_affected, "soft delete");
        Ok(())
    }

    /// Clear `deleted_at`. Live and unknown ids are a no-op.
    pub async fn restore(&self, id: Uuid) -> Result<(), StorageError> {
        let res = self
            .bounded(
                "restore",
                E::update_many()
                    .col_expr(
                        E::deleted_at_column(),
                        Expr::value(Value::from(Option::<DateTimeWithTimeZone>::None)),
                    )
                    .filter(E::id_column().eq(id))
                    .filter(E::deleted_at_column().is_not_null())
                    .exec(&self.db),
            )
            .await?;
        info!(table = %self.table, %id, rows = res.rows_affected, "restore");
        Ok(())
    }

    /// Remove the row permanently, live or soft-deleted.
    pub async fn hard_delete(&self, id: Uuid) -> Result<(), StorageError> {
        let res = self
            .bounded(
                "hard_delete",
                E::delete_many().filter(E::id_column().eq(id)).exec(&self.db),
            )
            .await?;
        info!(table = %self.table, %id, rows = res.rows_affected, "hard delete");
        Ok(())
    }

    /// Live rows matching `filter`.
    pub async fn count(&self, filter: Option<Condition>) -> Result<u64, StorageError> {
        let mut cond = Self::live();
        if let Some(f) = filter {
            cond = cond.add(f);
        }
        self.bounded("count", E::find().filter(cond).count(&self.db)).await
    }
}
