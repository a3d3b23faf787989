use sea_orm::DatabaseConnection;

use crate::{
    EngineError, EntityKind, ResultEngine,
    store::{DatabaseStore, LedgerStore, OwnedStore, Record, StoreError},
};

mod cash;
mod categories;
mod groups;

/// The domain validation engine.
///
/// Every operation is a single pass of lookups followed by at most one write,
/// so a rejected command leaves the store untouched. The engine keeps no state
/// of its own besides the store handle.
#[derive(Debug)]
pub struct Engine<S = DatabaseStore> {
    store: S,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

impl<S: LedgerStore> Engine<S> {
    /// Build an engine on top of any ledger store.
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn find_owned<R: Record>(&self, id: i32, owner_id: &str) -> ResultEngine<R>
    where
        S: OwnedStore<R>,
    {
        let ctx = StoreContext::new(R::KIND, owner_id);
        OwnedStore::<R>::get_by_id(&self.store, id, owner_id)
            .await
            .map_err(|err| ctx.fail(err))?
            .ok_or(EngineError::NotFound(R::KIND))
    }

    async fn list_owned<R: Record>(&self, owner_id: &str) -> ResultEngine<Vec<R>>
    where
        S: OwnedStore<R>,
    {
        let ctx = StoreContext::new(R::KIND, owner_id);
        OwnedStore::<R>::list_all(&self.store, owner_id)
            .await
            .map_err(|err| ctx.fail(err))
    }

    /// Whether `name` is free for the owner among records of kind `R`.
    ///
    /// A record whose id equals `excluding` does not count, so renaming a
    /// record to its own name is always allowed.
    async fn name_available<R: Record>(
        &self,
        name: &str,
        owner_id: &str,
        excluding: Option<i32>,
    ) -> ResultEngine<bool>
    where
        S: OwnedStore<R>,
    {
        let ctx = StoreContext::new(R::KIND, owner_id).named(name);
        let existing = OwnedStore::<R>::get_by_name(&self.store, name, owner_id)
            .await
            .map_err(|err| ctx.fail(err))?;
        Ok(match existing {
            Some(record) => Some(record.id()) == excluding,
            None => true,
        })
    }
}

/// What an operation was touching when the store failed.
///
/// Translates store failures into engine errors: constraint violations become
/// the matching domain error, everything else is logged here and reported as
/// [`EngineError::Storage`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct StoreContext<'a> {
    kind: EntityKind,
    owner_id: &'a str,
    name: Option<&'a str>,
    parent: Option<EntityKind>,
}

impl<'a> StoreContext<'a> {
    pub(crate) fn new(kind: EntityKind, owner_id: &'a str) -> Self {
        Self {
            kind,
            owner_id,
            name: None,
            parent: None,
        }
    }

    pub(crate) fn named(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    /// Marks an insert that references a record of kind `parent`.
    pub(crate) fn under(mut self, parent: EntityKind) -> Self {
        self.parent = Some(parent);
        self
    }

    pub(crate) fn fail(&self, err: StoreError) -> EngineError {
        match err {
            StoreError::UniqueViolation(_) => EngineError::DuplicateName(self.kind),
            StoreError::ForeignKeyViolation(_) => match self.parent {
                Some(parent) => EngineError::NotFound(parent),
                None => EngineError::HasDependents(self.kind),
            },
            StoreError::Missing { kind, .. } => EngineError::NotFound(kind),
            err => {
                tracing::error!(
                    entity = %self.kind,
                    owner_id = self.owner_id,
                    name = self.name.unwrap_or_default(),
                    error = %err,
                    "store operation failed"
                );
                EngineError::Storage(err)
            }
        }
    }
}

fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            store: DatabaseStore::new(self.database),
        })
    }
}
