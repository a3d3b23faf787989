//! Command structs for engine operations.
//!
//! Every command carries the owner id resolved by the caller; the engine
//! never looks at credentials. Flow and money arrive as raw text and are
//! validated by the engine.

/// Create a group.
#[derive(Clone, Debug)]
pub struct CreateGroup {
    pub owner_id: String,
    pub name: String,
    pub abbr: String,
    pub flow: String,
}

impl CreateGroup {
    #[must_use]
    pub fn new(
        owner_id: impl Into<String>,
        name: impl Into<String>,
        abbr: impl Into<String>,
        flow: impl Into<String>,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            name: name.into(),
            abbr: abbr.into(),
            flow: flow.into(),
        }
    }
}

/// Rename a group and/or change its abbreviation.
#[derive(Clone, Debug)]
pub struct UpdateGroup {
    pub owner_id: String,
    pub id: i32,
    pub name: String,
    pub abbr: String,
}

impl UpdateGroup {
    #[must_use]
    pub fn new(
        owner_id: impl Into<String>,
        id: i32,
        name: impl Into<String>,
        abbr: impl Into<String>,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            id,
            name: name.into(),
            abbr: abbr.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DeleteGroup {
    pub owner_id: String,
    pub id: i32,
}

impl DeleteGroup {
    #[must_use]
    pub fn new(owner_id: impl Into<String>, id: i32) -> Self {
        Self {
            owner_id: owner_id.into(),
            id,
        }
    }
}

/// Create a category under an existing group.
#[derive(Clone, Debug)]
pub struct CreateCategory {
    pub owner_id: String,
    pub name: String,
    pub abbr: String,
    pub flow: String,
    pub group_id: i32,
}

impl CreateCategory {
    #[must_use]
    pub fn new(
        owner_id: impl Into<String>,
        name: impl Into<String>,
        abbr: impl Into<String>,
        flow: impl Into<String>,
        group_id: i32,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            name: name.into(),
            abbr: abbr.into(),
            flow: flow.into(),
            group_id,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateCategory {
    pub owner_id: String,
    pub id: i32,
    pub name: String,
    pub abbr: String,
}

impl UpdateCategory {
    #[must_use]
    pub fn new(
        owner_id: impl Into<String>,
        id: i32,
        name: impl Into<String>,
        abbr: impl Into<String>,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            id,
            name: name.into(),
            abbr: abbr.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DeleteCategory {
    pub owner_id: String,
    pub id: i32,
}

impl DeleteCategory {
    #[must_use]
    pub fn new(owner_id: impl Into<String>, id: i32) -> Self {
        Self {
            owner_id: owner_id.into(),
            id,
        }
    }
}

/// Record a cash entry. `value` is a decimal string such as `"-12.30"`.
#[derive(Clone, Debug)]
pub struct CreateCash {
    pub owner_id: String,
    pub name: String,
    pub value: String,
    pub category_id: i32,
}

impl CreateCash {
    #[must_use]
    pub fn new(
        owner_id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
        category_id: i32,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            name: name.into(),
            value: value.into(),
            category_id,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UpdateCash {
    pub owner_id: String,
    pub id: i32,
    pub name: String,
    pub value: String,
}

impl UpdateCash {
    #[must_use]
    pub fn new(
        owner_id: impl Into<String>,
        id: i32,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            id,
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DeleteCash {
    pub owner_id: String,
    pub id: i32,
}

impl DeleteCash {
    #[must_use]
    pub fn new(owner_id: impl Into<String>, id: i32) -> Self {
        Self {
            owner_id: owner_id.into(),
            id,
        }
    }
}
