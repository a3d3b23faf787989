use crate::{
    CreateGroup, DeleteGroup, EngineError, EntityKind, Flow, Group, ResultEngine, UpdateGroup,
    groups::NewGroup,
    store::{LedgerStore, OwnedStore},
};

use super::{Engine, StoreContext, normalize_required_name};

impl<S: LedgerStore> Engine<S> {
    /// Return a group of the owner.
    pub async fn group(&self, id: i32, owner_id: &str) -> ResultEngine<Group> {
        self.find_owned::<Group>(id, owner_id).await
    }

    /// Return all the groups of the owner, ordered by id.
    pub async fn groups(&self, owner_id: &str) -> ResultEngine<Vec<Group>> {
        self.list_owned::<Group>(owner_id).await
    }

    /// Create a new group.
    ///
    /// Fails with:
    /// - [`EngineError::InvalidFlow`] if the flow is not `In` or `Out`;
    /// - [`EngineError::DuplicateName`] if the owner already has a group
    ///   with this name.
    pub async fn create_group(&self, cmd: CreateGroup) -> ResultEngine<Group> {
        let name = normalize_required_name(&cmd.name, "group name")?;
        let abbr = normalize_required_name(&cmd.abbr, "group abbreviation")?;
        let flow = Flow::try_from(cmd.flow.as_str())?;

        if !self
            .name_available::<Group>(&name, &cmd.owner_id, None)
            .await?
        {
            return Err(EngineError::DuplicateName(EntityKind::Group));
        }

        let ctx = StoreContext::new(EntityKind::Group, &cmd.owner_id).named(&name);
        let new = NewGroup {
            name: name.clone(),
            abbr,
            flow,
            owner_id: cmd.owner_id.clone(),
        };
        let group = OwnedStore::<Group>::insert(&self.store, new)
            .await
            .map_err(|err| ctx.fail(err))?;

        tracing::debug!(owner_id = %group.owner_id, group_id = group.id, "group created");
        Ok(group)
    }

    /// Rename a group and/or change its abbreviation.
    ///
    /// The flow never changes: categories were validated against it.
    pub async fn update_group(&self, cmd: UpdateGroup) -> ResultEngine<Group> {
        let name = normalize_required_name(&cmd.name, "group name")?;
        let abbr = normalize_required_name(&cmd.abbr, "group abbreviation")?;

        let mut group = self.find_owned::<Group>(cmd.id, &cmd.owner_id).await?;
        if name != group.name
            && !self
                .name_available::<Group>(&name, &cmd.owner_id, Some(group.id))
                .await?
        {
            return Err(EngineError::DuplicateName(EntityKind::Group));
        }

        group.name = name;
        group.abbr = abbr;

        let ctx = StoreContext::new(EntityKind::Group, &cmd.owner_id).named(&group.name);
        OwnedStore::<Group>::update(&self.store, &group)
            .await
            .map_err(|err| ctx.fail(err))?;

        Ok(group)
    }

    /// Delete a group that has no categories, returning its last snapshot.
    pub async fn delete_group(&self, cmd: DeleteGroup) -> ResultEngine<Group> {
        let group = self.find_owned::<Group>(cmd.id, &cmd.owner_id).await?;

        let ctx = StoreContext::new(EntityKind::Group, &cmd.owner_id).named(&group.name);
        if self
            .store
            .has_categories(group.id)
            .await
            .map_err(|err| ctx.fail(err))?
        {
            return Err(EngineError::HasDependents(EntityKind::Group));
        }

        let removed = OwnedStore::<Group>::delete_by_id(&self.store, group.id)
            .await
            .map_err(|err| ctx.fail(err))?;

        tracing::debug!(owner_id = %removed.owner_id, group_id = removed.id, "group deleted");
        Ok(removed)
    }
}
