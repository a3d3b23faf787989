use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of money shared by a group and its categories.
///
/// Serialized as `"In"` / `"Out"`; any other token is rejected while the
/// request body is decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flow {
    In,
    Out,
}

impl Flow {
    /// Returns the token understood by the engine.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "In",
            Self::Out => "Out",
        }
    }
}

pub mod group {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupNew {
        pub name: String,
        pub abbr: String,
        pub flow: Flow,
    }

    /// Request body for renaming a group. The flow cannot be changed.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupUpdate {
        pub name: String,
        pub abbr: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct GroupView {
        pub id: i32,
        pub name: String,
        pub abbr: String,
        pub flow: Flow,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupListResponse {
        pub groups: Vec<GroupView>,
    }
}

pub mod category {
    use super::*;
    use crate::group::GroupView;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
        pub abbr: String,
        /// Must equal the flow of the parent group.
        pub flow: Flow,
        pub group_id: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryUpdate {
        pub name: String,
        pub abbr: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: i32,
        pub name: String,
        pub abbr: String,
        pub flow: Flow,
        pub group_id: i32,
        /// Parent group, only sent back by the create call.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub group: Option<GroupView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryListResponse {
        pub categories: Vec<CategoryView>,
    }
}

pub mod cash {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CashNew {
        pub name: String,
        /// Decimal amount, e.g. `"-12.30"` or `"4,5"`.
        pub value: String,
        pub category_id: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CashUpdate {
        pub name: String,
        pub value: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CashView {
        pub id: i32,
        pub name: String,
        /// Decimal amount with two fractional digits.
        pub value: String,
        /// RFC3339 timestamp set by the server.
        pub created_at: DateTime<Utc>,
        pub category_id: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CashListResponse {
        pub cash: Vec<CashView>,
    }
}
