use crate::{
    Category, CreateCategory, DeleteCategory, EngineError, EntityKind, Flow, ResultEngine,
    UpdateCategory,
    categories::NewCategory,
    store::{LedgerStore, OwnedStore},
};

use super::{Engine, StoreContext, normalize_required_name};

impl<S: LedgerStore> Engine<S> {
    /// Return a category of the owner.
    pub async fn category(&self, id: i32, owner_id: &str) -> ResultEngine<Category> {
        self.find_owned::<Category>(id, owner_id).await
    }

    /// Return all the categories of the owner, ordered by id.
    pub async fn categories(&self, owner_id: &str) -> ResultEngine<Vec<Category>> {
        self.list_owned::<Category>(owner_id).await
    }

    /// Create a new category inside a group.
    ///
    /// The checks run in a fixed order and the first failure wins:
    ///
    /// 1. the flow token parses ([`EngineError::InvalidFlow`]);
    /// 2. the name is free for the owner ([`EngineError::DuplicateName`]);
    /// 3. the group exists for the owner ([`EngineError::NotFound`]);
    /// 4. the flow equals the group's flow ([`EngineError::FlowMismatch`]).
    ///
    /// The returned category has its `group` populated.
    pub async fn create_category(&self, cmd: CreateCategory) -> ResultEngine<Category> {
        let name = normalize_required_name(&cmd.name, "category name")?;
        let abbr = normalize_required_name(&cmd.abbr, "category abbreviation")?;
        let flow = Flow::try_from(cmd.flow.as_str())?;

        if !self
            .name_available::<Category>(&name, &cmd.owner_id, None)
            .await?
        {
            return Err(EngineError::DuplicateName(EntityKind::Category));
        }

        let ctx = StoreContext::new(EntityKind::Category, &cmd.owner_id)
            .named(&name)
            .under(EntityKind::Group);
        let group = self
            .store
            .group_by_id(cmd.group_id, &cmd.owner_id)
            .await
            .map_err(|err| ctx.fail(err))?
            .ok_or(EngineError::NotFound(EntityKind::Group))?;

        if group.flow != flow {
            return Err(EngineError::FlowMismatch);
        }

        let new = NewCategory {
            name: name.clone(),
            abbr,
            flow,
            group_id: group.id,
            owner_id: cmd.owner_id.clone(),
        };
        let mut category = OwnedStore::<Category>::insert(&self.store, new)
            .await
            .map_err(|err| ctx.fail(err))?;
        category.group = Some(group);

        tracing::debug!(
            owner_id = %category.owner_id,
            category_id = category.id,
            group_id = category.group_id,
            "category created"
        );
        Ok(category)
    }

    /// Rename a category and/or change its abbreviation.
    pub async fn update_category(&self, cmd: UpdateCategory) -> ResultEngine<Category> {
        let name = normalize_required_name(&cmd.name, "category name")?;
        let abbr = normalize_required_name(&cmd.abbr, "category abbreviation")?;

        let mut category = self.find_owned::<Category>(cmd.id, &cmd.owner_id).await?;
        if name != category.name
            && !self
                .name_available::<Category>(&name, &cmd.owner_id, Some(category.id))
                .await?
        {
            return Err(EngineError::DuplicateName(EntityKind::Category));
        }

        category.name = name;
        category.abbr = abbr;

        let ctx = StoreContext::new(EntityKind::Category, &cmd.owner_id).named(&category.name);
        OwnedStore::<Category>::update(&self.store, &category)
            .await
            .map_err(|err| ctx.fail(err))?;

        Ok(category)
    }

    /// Delete a category without cash entries, returning its last snapshot.
    pub async fn delete_category(&self, cmd: DeleteCategory) -> ResultEngine<Category> {
        let category = self.find_owned::<Category>(cmd.id, &cmd.owner_id).await?;

        let ctx = StoreContext::new(EntityKind::Category, &cmd.owner_id).named(&category.name);
        if self
            .store
            .has_cash(category.id)
            .await
            .map_err(|err| ctx.fail(err))?
        {
            return Err(EngineError::HasDependents(EntityKind::Category));
        }

        let removed = OwnedStore::<Category>::delete_by_id(&self.store, category.id)
            .await
            .map_err(|err| ctx.fail(err))?;

        tracing::debug!(
            owner_id = %removed.owner_id,
            category_id = removed.id,
            "category deleted"
        );
        Ok(removed)
    }
}
