use chrono::Utc;

use crate::{
    Cash, CreateCash, DeleteCash, EngineError, EntityKind, MoneyCents, ResultEngine, UpdateCash,
    cash::NewCash,
    store::{LedgerStore, OwnedStore},
};

use super::{Engine, StoreContext, normalize_required_name};

impl<S: LedgerStore> Engine<S> {
    /// Return a cash entry of the owner.
    pub async fn cash(&self, id: i32, owner_id: &str) -> ResultEngine<Cash> {
        self.find_owned::<Cash>(id, owner_id).await
    }

    /// Return all the cash entries of the owner, ordered by id.
    pub async fn cash_entries(&self, owner_id: &str) -> ResultEngine<Vec<Cash>> {
        self.list_owned::<Cash>(owner_id).await
    }

    /// Record a cash entry under a category of the owner.
    ///
    /// `created_at` is taken from the clock here, never from the caller.
    pub async fn create_cash(&self, cmd: CreateCash) -> ResultEngine<Cash> {
        let name = normalize_required_name(&cmd.name, "cash name")?;

        let ctx = StoreContext::new(EntityKind::Cash, &cmd.owner_id)
            .named(&name)
            .under(EntityKind::Category);
        let category = self
            .store
            .category_by_id(cmd.category_id, &cmd.owner_id)
            .await
            .map_err(|err| ctx.fail(err))?
            .ok_or(EngineError::NotFound(EntityKind::Category))?;

        let value: MoneyCents = cmd.value.parse()?;

        let new = NewCash {
            name: name.clone(),
            value,
            created_at: Utc::now(),
            category_id: category.id,
            owner_id: cmd.owner_id.clone(),
        };
        let cash = OwnedStore::<Cash>::insert(&self.store, new)
            .await
            .map_err(|err| ctx.fail(err))?;

        tracing::debug!(
            owner_id = %cash.owner_id,
            cash_id = cash.id,
            category_id = cash.category_id,
            "cash entry created"
        );
        Ok(cash)
    }

    /// Change the name and value of a cash entry.
    ///
    /// Category and creation time stay as they are.
    pub async fn update_cash(&self, cmd: UpdateCash) -> ResultEngine<Cash> {
        let name = normalize_required_name(&cmd.name, "cash name")?;

        let mut cash = self.find_owned::<Cash>(cmd.id, &cmd.owner_id).await?;
        cash.value = cmd.value.parse()?;
        cash.name = name;

        let ctx = StoreContext::new(EntityKind::Cash, &cmd.owner_id).named(&cash.name);
        OwnedStore::<Cash>::update(&self.store, &cash)
            .await
            .map_err(|err| ctx.fail(err))?;

        Ok(cash)
    }

    /// Delete a cash entry, returning its last snapshot.
    pub async fn delete_cash(&self, cmd: DeleteCash) -> ResultEngine<Cash> {
        let cash = self.find_owned::<Cash>(cmd.id, &cmd.owner_id).await?;

        let ctx = StoreContext::new(EntityKind::Cash, &cmd.owner_id).named(&cash.name);
        let removed = OwnedStore::<Cash>::delete_by_id(&self.store, cash.id)
            .await
            .map_err(|err| ctx.fail(err))?;

        tracing::debug!(owner_id = %removed.owner_id, cash_id = removed.id, "cash entry deleted");
        Ok(removed)
    }
}
