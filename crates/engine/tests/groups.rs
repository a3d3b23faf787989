mod common;

use engine::{CreateGroup, DeleteGroup, EngineError, EntityKind, Flow, UpdateGroup};

use common::{category, count_rows, engine_with_db, group};

#[tokio::test]
async fn create_group_returns_generated_id_and_flow() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_group(CreateGroup::new("alice", "Salary", "SAL", "In"))
        .await
        .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.name, "Salary");
    assert_eq!(created.abbr, "SAL");
    assert_eq!(created.flow, Flow::In);
    assert_eq!(created.owner_id, "alice");
    assert_eq!(engine.group(created.id, "alice").await.unwrap(), created);
}

#[tokio::test]
async fn create_group_twice_is_duplicate_name() {
    let (engine, db) = engine_with_db().await;
    group(&engine, "alice", "Salary", "In").await;

    let err = engine
        .create_group(CreateGroup::new("alice", "Salary", "SAL2", "In"))
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::DuplicateName(EntityKind::Group));
    assert_eq!(
        err.to_string(),
        "a group with this name already exists for this owner"
    );
    assert_eq!(count_rows(&db, "groups").await, 1);
}

#[tokio::test]
async fn group_names_are_unique_per_owner_only() {
    let (engine, _db) = engine_with_db().await;

    let alice = group(&engine, "alice", "Food", "Out").await;
    let bob = group(&engine, "bob", "Food", "Out").await;

    assert_ne!(alice.id, bob.id);
    assert_eq!(engine.groups("alice").await.unwrap(), vec![alice]);
    assert_eq!(engine.groups("bob").await.unwrap(), vec![bob]);
}

#[tokio::test]
async fn unknown_flow_is_rejected() {
    let (engine, db) = engine_with_db().await;

    for token in ["Sideways", "in", "OUT", ""] {
        let err = engine
            .create_group(CreateGroup::new("alice", "Salary", "SAL", token))
            .await
            .unwrap_err();
        assert_eq!(err, EngineError::InvalidFlow(token.to_string()));
    }
    assert_eq!(count_rows(&db, "groups").await, 0);
}

#[tokio::test]
async fn blank_names_are_rejected_before_anything_else() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_group(CreateGroup::new("alice", "  ", "SAL", "Sideways"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));

    let err = engine
        .create_group(CreateGroup::new("alice", "Salary", "", "In"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
}

#[tokio::test]
async fn groups_of_other_owners_are_not_found() {
    let (engine, _db) = engine_with_db().await;
    let salary = group(&engine, "alice", "Salary", "In").await;
    let missing = EngineError::NotFound(EntityKind::Group);

    assert_eq!(engine.group(salary.id, "bob").await.unwrap_err(), missing);
    assert_eq!(
        engine
            .update_group(UpdateGroup::new("bob", salary.id, "Stolen", "ST"))
            .await
            .unwrap_err(),
        missing
    );
    assert_eq!(
        engine
            .delete_group(DeleteGroup::new("bob", salary.id))
            .await
            .unwrap_err(),
        missing
    );
    assert_eq!(engine.group(salary.id, "alice").await.unwrap(), salary);
}

#[tokio::test]
async fn update_group_renames_and_keeps_flow() {
    let (engine, _db) = engine_with_db().await;
    let salary = group(&engine, "alice", "Salary", "In").await;

    let updated = engine
        .update_group(UpdateGroup::new("alice", salary.id, "Wages", "WG"))
        .await
        .unwrap();

    assert_eq!(updated.name, "Wages");
    assert_eq!(updated.abbr, "WG");
    assert_eq!(updated.flow, Flow::In);
    assert_eq!(engine.group(salary.id, "alice").await.unwrap(), updated);
}

#[tokio::test]
async fn update_group_to_its_own_name_is_allowed() {
    let (engine, _db) = engine_with_db().await;
    let salary = group(&engine, "alice", "Salary", "In").await;

    let updated = engine
        .update_group(UpdateGroup::new("alice", salary.id, "Salary", "NEW"))
        .await
        .unwrap();

    assert_eq!(updated.name, "Salary");
    assert_eq!(updated.abbr, "NEW");
}

#[tokio::test]
async fn update_group_to_a_taken_name_is_duplicate() {
    let (engine, _db) = engine_with_db().await;
    group(&engine, "alice", "Salary", "In").await;
    let bonus = group(&engine, "alice", "Bonus", "In").await;

    let err = engine
        .update_group(UpdateGroup::new("alice", bonus.id, "Salary", "B"))
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::DuplicateName(EntityKind::Group));
    assert_eq!(engine.group(bonus.id, "alice").await.unwrap(), bonus);
}

#[tokio::test]
async fn delete_group_with_category_is_blocked_until_it_is_removed() {
    let (engine, db) = engine_with_db().await;
    let salary = group(&engine, "alice", "Salary", "In").await;
    let monthly = category(&engine, "alice", "Monthly", &salary).await;

    let err = engine
        .delete_group(DeleteGroup::new("alice", salary.id))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::HasDependents(EntityKind::Group));
    assert_eq!(
        err.to_string(),
        "this group cannot be removed because dependents exist"
    );
    assert_eq!(count_rows(&db, "groups").await, 1);

    engine
        .delete_category(engine::DeleteCategory::new("alice", monthly.id))
        .await
        .unwrap();
    let removed = engine
        .delete_group(DeleteGroup::new("alice", salary.id))
        .await
        .unwrap();

    assert_eq!(removed, salary);
    assert_eq!(count_rows(&db, "groups").await, 0);
    assert_eq!(
        engine.group(salary.id, "alice").await.unwrap_err(),
        EngineError::NotFound(EntityKind::Group)
    );
}

#[tokio::test]
async fn groups_are_listed_by_id() {
    let (engine, _db) = engine_with_db().await;
    let first = group(&engine, "alice", "Salary", "In").await;
    let second = group(&engine, "alice", "Food", "Out").await;

    let listed = engine.groups("alice").await.unwrap();

    assert_eq!(listed, vec![first, second]);
    assert!(engine.groups("carol").await.unwrap().is_empty());
}
