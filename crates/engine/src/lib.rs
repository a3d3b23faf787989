//! Ledger engine: groups, categories and cash entries scoped to an owner.
//!
//! [`Engine`] validates every command against an Entity Store (see
//! [`store`]) before writing: names are unique per owner, a category shares
//! its group's flow, and a record with children cannot be deleted. A record
//! owned by someone else is always reported as not found.

pub use cash::{Cash, NewCash};
pub use categories::{Category, NewCategory};
pub use commands::{
    CreateCash, CreateCategory, CreateGroup, DeleteCash, DeleteCategory, DeleteGroup, UpdateCash,
    UpdateCategory, UpdateGroup,
};
pub use error::{EngineError, EntityKind};
pub use flow::Flow;
pub use groups::{Group, NewGroup};
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder};
pub use store::{DatabaseStore, MemoryStore, StoreError};

pub mod store;

mod cash;
mod categories;
mod commands;
mod error;
mod flow;
mod groups;
mod money;
mod ops;

type ResultEngine<T> = Result<T, EngineError>;
