//! In-process Entity Store.
//!
//! Mirrors the guarantees of the database schema: (owner, name) is unique for
//! groups and categories, a row must point at an existing parent, and a
//! record with children cannot be deleted.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    Cash, Category, Group,
    cash::NewCash,
    categories::NewCategory,
    groups::NewGroup,
};

use super::{CashStore, CategoryStore, GroupStore, OwnedStore, Record, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    next_id: i32,
    groups: BTreeMap<i32, Group>,
    categories: BTreeMap<i32, Category>,
    cash: BTreeMap<i32, Cash>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Access to one table of [`Tables`] and its constraints.
trait Table: Record {
    /// Whether names must be unique per owner.
    const UNIQUE_NAME: bool;

    fn rows(tables: &Tables) -> &BTreeMap<i32, Self>;
    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<i32, Self>;
    /// Owner and name of a row about to be inserted.
    fn key(new: &Self::New) -> (&str, &str);
    fn build(id: i32, new: Self::New) -> Self;
    /// Copies the mutable fields of `from` onto `self`.
    fn apply(&mut self, from: &Self);
    fn has_children(&self, tables: &Tables) -> bool;
    /// Whether the parent row referenced by `new` exists.
    fn parent_exists(new: &Self::New, tables: &Tables) -> bool;
}

impl Table for Group {
    const UNIQUE_NAME: bool = true;

    fn rows(tables: &Tables) -> &BTreeMap<i32, Self> {
        &tables.groups
    }

    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<i32, Self> {
        &mut tables.groups
    }

    fn key(new: &NewGroup) -> (&str, &str) {
        (&new.owner_id, &new.name)
    }

    fn build(id: i32, new: NewGroup) -> Self {
        Self {
            id,
            name: new.name,
            abbr: new.abbr,
            flow: new.flow,
            owner_id: new.owner_id,
        }
    }

    fn apply(&mut self, from: &Self) {
        self.name.clone_from(&from.name);
        self.abbr.clone_from(&from.abbr);
    }

    fn has_children(&self, tables: &Tables) -> bool {
        tables.categories.values().any(|c| c.group_id == self.id)
    }

    fn parent_exists(_new: &NewGroup, _tables: &Tables) -> bool {
        true
    }
}

impl Table for Category {
    const UNIQUE_NAME: bool = true;

    fn rows(tables: &Tables) -> &BTreeMap<i32, Self> {
        &tables.categories
    }

    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<i32, Self> {
        &mut tables.categories
    }

    fn key(new: &NewCategory) -> (&str, &str) {
        (&new.owner_id, &new.name)
    }

    fn build(id: i32, new: NewCategory) -> Self {
        Self {
            id,
            name: new.name,
            abbr: new.abbr,
            flow: new.flow,
            group_id: new.group_id,
            owner_id: new.owner_id,
            group: None,
        }
    }

    fn apply(&mut self, from: &Self) {
        self.name.clone_from(&from.name);
        self.abbr.clone_from(&from.abbr);
    }

    fn has_children(&self, tables: &Tables) -> bool {
        tables.cash.values().any(|c| c.category_id == self.id)
    }

    fn parent_exists(new: &NewCategory, tables: &Tables) -> bool {
        tables.groups.contains_key(&new.group_id)
    }
}

impl Table for Cash {
    const UNIQUE_NAME: bool = false;

    fn rows(tables: &Tables) -> &BTreeMap<i32, Self> {
        &tables.cash
    }

    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<i32, Self> {
        &mut tables.cash
    }

    fn key(new: &NewCash) -> (&str, &str) {
        (&new.owner_id, &new.name)
    }

    fn build(id: i32, new: NewCash) -> Self {
        Self {
            id,
            name: new.name,
            value: new.value,
            created_at: new.created_at,
            category_id: new.category_id,
            owner_id: new.owner_id,
        }
    }

    fn apply(&mut self, from: &Self) {
        self.name.clone_from(&from.name);
        self.value = from.value;
    }

    fn has_children(&self, _tables: &Tables) -> bool {
        false
    }

    fn parent_exists(new: &NewCash, tables: &Tables) -> bool {
        tables.categories.contains_key(&new.category_id)
    }
}

fn ensure_unique<R: Table>(
    tables: &Tables,
    owner_id: &str,
    name: &str,
    except: Option<i32>,
) -> StoreResult<()> {
    if !R::UNIQUE_NAME {
        return Ok(());
    }
    let taken = R::rows(tables).values().any(|row| {
        row.owner_id() == owner_id && row.name() == name && Some(row.id()) != except
    });
    if taken {
        return Err(StoreError::UniqueViolation(format!(
            "{} ({owner_id}, {name})",
            R::KIND
        )));
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn get<R: Table>(&self, id: i32, owner_id: &str) -> Option<R> {
        let tables = self.tables.lock().await;
        R::rows(&tables)
            .get(&id)
            .filter(|row| row.owner_id() == owner_id)
            .cloned()
    }
}

#[async_trait]
impl<R: Table> OwnedStore<R> for MemoryStore {
    async fn get_by_id(&self, id: i32, owner_id: &str) -> StoreResult<Option<R>> {
        Ok(self.get(id, owner_id).await)
    }

    async fn get_by_name(&self, name: &str, owner_id: &str) -> StoreResult<Option<R>> {
        let tables = self.tables.lock().await;
        Ok(R::rows(&tables)
            .values()
            .find(|row| row.owner_id() == owner_id && row.name() == name)
            .cloned())
    }

    async fn list_all(&self, owner_id: &str) -> StoreResult<Vec<R>> {
        let tables = self.tables.lock().await;
        Ok(R::rows(&tables)
            .values()
            .filter(|row| row.owner_id() == owner_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, new: R::New) -> StoreResult<R> {
        let mut tables = self.tables.lock().await;
        let (owner_id, name) = R::key(&new);
        ensure_unique::<R>(&tables, owner_id, name, None)?;
        if !R::parent_exists(&new, &tables) {
            return Err(StoreError::ForeignKeyViolation(format!(
                "{} ({owner_id}, {name}) references a missing parent",
                R::KIND
            )));
        }
        let id = tables.next_id();
        let row = R::build(id, new);
        R::rows_mut(&mut tables).insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, record: &R) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        let owner_id = R::rows(&tables)
            .get(&record.id())
            .map(|row| row.owner_id().to_string())
            .ok_or(StoreError::Missing {
                kind: R::KIND,
                id: record.id(),
            })?;
        ensure_unique::<R>(&tables, &owner_id, record.name(), Some(record.id()))?;
        if let Some(row) = R::rows_mut(&mut tables).get_mut(&record.id()) {
            row.apply(record);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i32) -> StoreResult<R> {
        let mut tables = self.tables.lock().await;
        let row = R::rows(&tables)
            .get(&id)
            .ok_or(StoreError::Missing { kind: R::KIND, id })?;
        if row.has_children(&tables) {
            return Err(StoreError::ForeignKeyViolation(format!(
                "{} {id} is still referenced",
                R::KIND
            )));
        }
        R::rows_mut(&mut tables)
            .remove(&id)
            .ok_or(StoreError::Missing { kind: R::KIND, id })
    }
}

#[async_trait]
impl GroupStore for MemoryStore {
    async fn has_categories(&self, group_id: i32) -> StoreResult<bool> {
        let tables = self.tables.lock().await;
        Ok(tables.categories.values().any(|c| c.group_id == group_id))
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn group_by_id(&self, group_id: i32, owner_id: &str) -> StoreResult<Option<Group>> {
        Ok(self.get(group_id, owner_id).await)
    }

    async fn has_cash(&self, category_id: i32) -> StoreResult<bool> {
        let tables = self.tables.lock().await;
        Ok(tables.cash.values().any(|c| c.category_id == category_id))
    }
}

#[async_trait]
impl CashStore for MemoryStore {
    async fn category_by_id(
        &self,
        category_id: i32,
        owner_id: &str,
    ) -> StoreResult<Option<Category>> {
        Ok(self.get(category_id, owner_id).await)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::{Flow, MoneyCents};

    use super::*;

    fn new_group(name: &str, owner_id: &str) -> NewGroup {
        NewGroup {
            name: name.to_string(),
            abbr: "G".to_string(),
            flow: Flow::In,
            owner_id: owner_id.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let first = OwnedStore::<Group>::insert(&store, new_group("Salary", "alice"))
            .await
            .unwrap();
        let second = OwnedStore::<Group>::insert(&store, new_group("Bonus", "alice"))
            .await
            .unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn names_are_unique_per_owner_only() {
        let store = MemoryStore::new();
        for owner in ["alice", "bob"] {
            OwnedStore::<Group>::insert(&store, new_group("Food", owner))
                .await
                .unwrap();
        }

        let err = OwnedStore::<Group>::insert(&store, new_group("Food", "alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn lookups_hide_other_owners() {
        let store = MemoryStore::new();
        let group = OwnedStore::<Group>::insert(&store, new_group("Food", "alice"))
            .await
            .unwrap();

        let seen = OwnedStore::<Group>::get_by_id(&store, group.id, "bob")
            .await
            .unwrap();
        assert!(seen.is_none());
        let listed = OwnedStore::<Group>::list_all(&store, "bob").await.unwrap();
        assert!(listed.is_empty());
    }

    fn new_category(name: &str, group_id: i32) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            abbr: "GR".to_string(),
            flow: Flow::In,
            group_id,
            owner_id: "alice".to_string(),
        }
    }

    #[tokio::test]
    async fn delete_refuses_referenced_group() {
        let store = MemoryStore::new();
        let group = OwnedStore::<Group>::insert(&store, new_group("Food", "alice"))
            .await
            .unwrap();
        OwnedStore::<Category>::insert(&store, new_category("Groceries", group.id))
            .await
            .unwrap();

        let err = OwnedStore::<Group>::delete_by_id(&store, group.id)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
        assert!(store.has_categories(group.id).await.unwrap());
    }

    #[tokio::test]
    async fn insert_refuses_missing_parent() {
        let store = MemoryStore::new();
        let err = OwnedStore::<Category>::insert(&store, new_category("Groceries", 999))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));

        let cash = NewCash {
            name: "Milk".to_string(),
            value: MoneyCents::from(250),
            created_at: Utc::now(),
            category_id: 999,
            owner_id: "alice".to_string(),
        };
        let err = OwnedStore::<Cash>::insert(&store, cash).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
        assert!(OwnedStore::<Cash>::list_all(&store, "alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_under_deleted_group_is_refused() {
        let store = MemoryStore::new();
        let group = OwnedStore::<Group>::insert(&store, new_group("Food", "alice"))
            .await
            .unwrap();
        OwnedStore::<Group>::delete_by_id(&store, group.id)
            .await
            .unwrap();

        let err = OwnedStore::<Category>::insert(&store, new_category("Groceries", group.id))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
        assert!(!store.has_categories(group.id).await.unwrap());
    }
}
