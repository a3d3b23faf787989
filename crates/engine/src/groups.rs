//! The module contains `Group` and its database entity.

use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    EntityKind, Flow,
    store::{Record, StoreError},
};

/// An income/expense bucket.
///
/// The flow is fixed at creation: it is the evidence every child category
/// is validated against, so no operation ever rewrites it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub id: i32,
    pub name: String,
    pub abbr: String,
    pub flow: Flow,
    pub owner_id: String,
}

/// Fields needed to insert a group; the store assigns the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewGroup {
    pub name: String,
    pub abbr: String,
    pub flow: Flow,
    pub owner_id: String,
}

impl Record for Group {
    type New = NewGroup;
    const KIND: EntityKind = EntityKind::Group;

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
#[sea_orm(table_name = "groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub abbr: String,
    pub flow: String,
    pub owner_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::categories::Entity")]
    Categories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Group {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let flow = Flow::parse(&model.flow).ok_or_else(|| {
            StoreError::InvalidRow(format!("groups.flow holds \"{}\"", model.flow))
        })?;
        Ok(Self {
            id: model.id,
            name: model.name,
            abbr: model.abbr,
            flow,
            owner_id: model.owner_id,
        })
    }
}

impl From<NewGroup> for ActiveModel {
    fn from(value: NewGroup) -> Self {
        Self {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(value.name),
            abbr: ActiveValue::Set(value.abbr),
            flow: ActiveValue::Set(value.flow.as_str().to_string()),
            owner_id: ActiveValue::Set(value.owner_id),
        }
    }
}

impl From<&Group> for ActiveModel {
    /// Only the mutable columns are set, so an update can never touch the
    /// flow or the owner.
    fn from(value: &Group) -> Self {
        Self {
            id: ActiveValue::Unchanged(value.id),
            name: ActiveValue::Set(value.name.clone()),
            abbr: ActiveValue::Set(value.abbr.clone()),
            flow: ActiveValue::NotSet,
            owner_id: ActiveValue::NotSet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(flow: &str) -> Model {
        Model {
            id: 7,
            name: "Salary".to_string(),
            abbr: "SAL".to_string(),
            flow: flow.to_string(),
            owner_id: "alice".to_string(),
        }
    }

    #[test]
    fn model_converts_to_group() {
        let group = Group::try_from(model("In")).unwrap();
        assert_eq!(group.id, 7);
        assert_eq!(group.flow, Flow::In);
    }

    #[test]
    fn unknown_stored_flow_is_a_store_error() {
        assert!(matches!(
            Group::try_from(model("Sideways")),
            Err(StoreError::InvalidRow(_))
        ));
    }
}
