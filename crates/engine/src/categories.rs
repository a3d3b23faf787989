//! Categories subdivide a group and carry the same flow.

use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    EntityKind, Flow, Group,
    store::{Record, StoreError},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub abbr: String,
    pub flow: Flow,
    pub group_id: i32,
    pub owner_id: String,
    /// Parent group, populated when the category is returned from a create.
    pub group: Option<Group>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub abbr: String,
    pub flow: Flow,
    pub group_id: i32,
    pub owner_id: String,
}

impl Record for Category {
    type New = NewCategory;
    const KIND: EntityKind = EntityKind::Category;

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
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub abbr: String,
    pub flow: String,
    pub group_id: i32,
    pub owner_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::groups::Entity",
        from = "Column::GroupId",
        to = "super::groups::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Group,
    #[sea_orm(has_many = "super::cash::Entity")]
    Cash,
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::cash::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cash.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Category {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let flow = Flow::parse(&model.flow).ok_or_else(|| {
            StoreError::InvalidRow(format!("categories.flow holds \"{}\"", model.flow))
        })?;
        Ok(Self {
            id: model.id,
            name: model.name,
            abbr: model.abbr,
            flow,
            group_id: model.group_id,
            owner_id: model.owner_id,
            group: None,
        })
    }
}

impl From<NewCategory> for ActiveModel {
    fn from(value: NewCategory) -> Self {
        Self {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(value.name),
            abbr: ActiveValue::Set(value.abbr),
            flow: ActiveValue::Set(value.flow.as_str().to_string()),
            group_id: ActiveValue::Set(value.group_id),
            owner_id: ActiveValue::Set(value.owner_id),
        }
    }
}

impl From<&Category> for ActiveModel {
    fn from(value: &Category) -> Self {
        Self {
            id: ActiveValue::Unchanged(value.id),
            name: ActiveValue::Set(value.name.clone()),
            abbr: ActiveValue::Set(value.abbr.clone()),
            ..Default::default()
        }
    }
}
