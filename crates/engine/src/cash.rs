//! The module contains `Cash`, a dated money movement filed under a category.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    EntityKind, MoneyCents,
    store::{Record, StoreError},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cash {
    pub id: i32,
    pub name: String,
    pub value: MoneyCents,
    /// Set by the engine when the entry is created; never changed afterwards.
    pub created_at: DateTime<Utc>,
    pub category_id: i32,
    pub owner_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCash {
    pub name: String,
    pub value: MoneyCents,
    pub created_at: DateTime<Utc>,
    pub category_id: i32,
    pub owner_id: String,
}

impl Record for Cash {
    type New = NewCash;
    const KIND: EntityKind = EntityKind::Cash;

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cashes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub value_cents: i64,
    pub created_at: DateTimeUtc,
    pub category_id: i32,
    pub owner_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Category,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Cash {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            value: MoneyCents::new(model.value_cents),
            created_at: model.created_at,
            category_id: model.category_id,
            owner_id: model.owner_id,
        })
    }
}

impl From<NewCash> for ActiveModel {
    fn from(value: NewCash) -> Self {
        Self {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(value.name),
            value_cents: ActiveValue::Set(value.value.cents()),
            created_at: ActiveValue::Set(value.created_at),
            category_id: ActiveValue::Set(value.category_id),
            owner_id: ActiveValue::Set(value.owner_id),
        }
    }
}

impl From<&Cash> for ActiveModel {
    fn from(value: &Cash) -> Self {
        Self {
            id: ActiveValue::Unchanged(value.id),
            name: ActiveValue::Set(value.name.clone()),
            value_cents: ActiveValue::Set(value.value.cents()),
            ..Default::default()
        }
    }
}
