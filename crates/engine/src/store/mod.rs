//! Entity Store contract consumed by the engine.
//!
//! Every lookup is scoped to an owner: a record owned by someone else is
//! reported exactly like a missing one. The shared CRUD surface is
//! [`OwnedStore`], generic over the record type; each record type then adds
//! the few queries its rules need ([`GroupStore`], [`CategoryStore`],
//! [`CashStore`]).
//!
//! Implementations must carry a uniqueness constraint on (owner, name) for
//! groups and categories and must refuse to delete a record that still has
//! children. The engine checks both beforehand, but only the store can make
//! them hold under concurrent requests.

use async_trait::async_trait;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::{Cash, Category, EntityKind, Group};

pub use database::DatabaseStore;
pub use memory::MemoryStore;

mod database;
mod memory;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures an Entity Store can report.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),
    #[error("{kind} {id} vanished before the write")]
    Missing { kind: EntityKind, id: i32 },
    #[error("invalid row: {0}")]
    InvalidRow(String),
    #[error(transparent)]
    Database(DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::UniqueViolation(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::ForeignKeyViolation(msg),
            _ => Self::Database(err),
        }
    }
}

/// A record kept by an Entity Store.
pub trait Record: Clone + Send + Sync + 'static {
    /// Fields required to insert the record, without the generated id.
    type New: Send + 'static;

    const KIND: EntityKind;

    fn id(&self) -> i32;
    fn name(&self) -> &str;
    fn owner_id(&self) -> &str;
}

/// Ownership-scoped CRUD shared by every record type.
#[async_trait]
pub trait OwnedStore<R: Record>: Send + Sync {
    async fn get_by_id(&self, id: i32, owner_id: &str) -> StoreResult<Option<R>>;

    async fn get_by_name(&self, name: &str, owner_id: &str) -> StoreResult<Option<R>>;

    /// All records of the owner, ordered by id.
    async fn list_all(&self, owner_id: &str) -> StoreResult<Vec<R>>;

    /// Persists a new record and returns it with its generated id.
    async fn insert(&self, new: R::New) -> StoreResult<R>;

    /// Writes the mutable fields of `record` back.
    async fn update(&self, record: &R) -> StoreResult<()>;

    /// Removes the record and returns the snapshot taken just before.
    async fn delete_by_id(&self, id: i32) -> StoreResult<R>;
}

#[async_trait]
pub trait GroupStore: OwnedStore<Group> {
    async fn has_categories(&self, group_id: i32) -> StoreResult<bool>;
}

#[async_trait]
pub trait CategoryStore: OwnedStore<Category> {
    /// Parent group lookup, scoped to the owner.
    async fn group_by_id(&self, group_id: i32, owner_id: &str) -> StoreResult<Option<Group>>;

    async fn has_cash(&self, category_id: i32) -> StoreResult<bool>;
}

#[async_trait]
pub trait CashStore: OwnedStore<Cash> {
    /// Parent category lookup, scoped to the owner.
    async fn category_by_id(
        &self,
        category_id: i32,
        owner_id: &str,
    ) -> StoreResult<Option<Category>>;
}

/// Everything the engine needs from a backing store.
pub trait LedgerStore: GroupStore + CategoryStore + CashStore {}

impl<T> LedgerStore for T where T: GroupStore + CategoryStore + CashStore {}
