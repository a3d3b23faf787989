//! Entity Store backed by a sea-orm `DatabaseConnection`.
//!
//! The schema (see the `migration` crate) carries the unique (owner, name)
//! indexes and the restricting foreign keys; violations surface here as
//! [`StoreError::UniqueViolation`] and [`StoreError::ForeignKeyViolation`].

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr, PaginatorTrait, QueryFilter, QueryOrder, prelude::*};

use crate::{Cash, Category, Group, cash, categories, groups};

use super::{CashStore, CategoryStore, GroupStore, OwnedStore, Record, StoreError, StoreResult};

#[derive(Clone, Debug)]
pub struct DatabaseStore {
    database: DatabaseConnection,
}

impl DatabaseStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.database
    }
}

/// Implements [`OwnedStore`] for a record whose entity module exposes
/// `OwnerId`, `Name` and `Id` columns plus the model conversions.
macro_rules! impl_owned_store {
    ($record:ty, $module:ident) => {
        #[async_trait]
        impl OwnedStore<$record> for DatabaseStore {
            async fn get_by_id(&self, id: i32, owner_id: &str) -> StoreResult<Option<$record>> {
                $module::Entity::find_by_id(id)
                    .filter($module::Column::OwnerId.eq(owner_id))
                    .one(&self.database)
                    .await?
                    .map(<$record>::try_from)
                    .transpose()
            }

            async fn get_by_name(
                &self,
                name: &str,
                owner_id: &str,
            ) -> StoreResult<Option<$record>> {
                $module::Entity::find()
                    .filter($module::Column::OwnerId.eq(owner_id))
                    .filter($module::Column::Name.eq(name))
                    .one(&self.database)
                    .await?
                    .map(<$record>::try_from)
                    .transpose()
            }

            async fn list_all(&self, owner_id: &str) -> StoreResult<Vec<$record>> {
                $module::Entity::find()
                    .filter($module::Column::OwnerId.eq(owner_id))
                    .order_by_asc($module::Column::Id)
                    .all(&self.database)
                    .await?
                    .into_iter()
                    .map(<$record>::try_from)
                    .collect()
            }

            async fn insert(&self, new: <$record as Record>::New) -> StoreResult<$record> {
                let model = $module::ActiveModel::from(new)
                    .insert(&self.database)
                    .await?;
                <$record>::try_from(model)
            }

            async fn update(&self, record: &$record) -> StoreResult<()> {
                $module::ActiveModel::from(record)
                    .update(&self.database)
                    .await
                    .map_err(|err| match err {
                        DbErr::RecordNotUpdated => StoreError::Missing {
                            kind: <$record as Record>::KIND,
                            id: record.id,
                        },
                        other => other.into(),
                    })?;
                Ok(())
            }

            async fn delete_by_id(&self, id: i32) -> StoreResult<$record> {
                let missing = || StoreError::Missing {
                    kind: <$record as Record>::KIND,
                    id,
                };
                let model = $module::Entity::find_by_id(id)
                    .one(&self.database)
                    .await?
                    .ok_or_else(missing)?;
                let result = $module::Entity::delete_by_id(id)
                    .exec(&self.database)
                    .await?;
                if result.rows_affected == 0 {
                    return Err(missing());
                }
                <$record>::try_from(model)
            }
        }
    };
}

impl_owned_store!(Group, groups);
impl_owned_store!(Category, categories);
impl_owned_store!(Cash, cash);

#[async_trait]
impl GroupStore for DatabaseStore {
    async fn has_categories(&self, group_id: i32) -> StoreResult<bool> {
        let count = categories::Entity::find()
            .filter(categories::Column::GroupId.eq(group_id))
            .count(&self.database)
            .await?;
        Ok(count > 0)
    }
}

#[async_trait]
impl CategoryStore for DatabaseStore {
    async fn group_by_id(&self, group_id: i32, owner_id: &str) -> StoreResult<Option<Group>> {
        OwnedStore::<Group>::get_by_id(self, group_id, owner_id).await
    }

    async fn has_cash(&self, category_id: i32) -> StoreResult<bool> {
        let count = cash::Entity::find()
            .filter(cash::Column::CategoryId.eq(category_id))
            .count(&self.database)
            .await?;
        Ok(count > 0)
    }
}

#[async_trait]
impl CashStore for DatabaseStore {
    async fn category_by_id(
        &self,
        category_id: i32,
        owner_id: &str,
    ) -> StoreResult<Option<Category>> {
        OwnedStore::<Category>::get_by_id(self, category_id, owner_id).await
    }
}
