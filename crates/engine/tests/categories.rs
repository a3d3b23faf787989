mod common;

use engine::{
    CreateCash, CreateCategory, DeleteCash, DeleteCategory, EngineError, EntityKind, Flow,
    UpdateCategory,
};

use common::{category, count_rows, engine_with_db, group};

#[tokio::test]
async fn create_category_inside_a_group() {
    let (engine, _db) = engine_with_db().await;
    let salary = group(&engine, "alice", "Salary", "In").await;

    let created = engine
        .create_category(CreateCategory::new(
            "alice", "Monthly", "MON", "In", salary.id,
        ))
        .await
        .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.flow, Flow::In);
    assert_eq!(created.group_id, salary.id);
    assert_eq!(created.group, Some(salary));

    let stored = engine.category(created.id, "alice").await.unwrap();
    assert_eq!(stored.name, "Monthly");
    assert_eq!(stored.group, None);
}

#[tokio::test]
async fn flow_must_match_the_group() {
    let (engine, db) = engine_with_db().await;
    let salary = group(&engine, "alice", "Salary", "In").await;

    let err = engine
        .create_category(CreateCategory::new("alice", "Food", "FD", "Out", salary.id))
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::FlowMismatch);
    assert_eq!(count_rows(&db, "categories").await, 0);
}

#[tokio::test]
async fn missing_group_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_category(CreateCategory::new("alice", "Food", "FD", "Out", 999))
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::NotFound(EntityKind::Group));
    assert_eq!(err.to_string(), "group not found");
}

#[tokio::test]
async fn group_of_another_owner_is_not_found() {
    let (engine, _db) = engine_with_db().await;
    let bobs = group(&engine, "bob", "Food", "Out").await;

    let err = engine
        .create_category(CreateCategory::new("alice", "Food", "FD", "Out", bobs.id))
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::NotFound(EntityKind::Group));
}

#[tokio::test]
async fn invalid_flow_wins_over_every_other_failure() {
    let (engine, _db) = engine_with_db().await;
    let salary = group(&engine, "alice", "Salary", "In").await;
    category(&engine, "alice", "Monthly", &salary).await;

    let err = engine
        .create_category(CreateCategory::new("alice", "Monthly", "M", "Up", 999))
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::InvalidFlow("Up".to_string()));
}

#[tokio::test]
async fn duplicate_name_wins_over_missing_group() {
    let (engine, _db) = engine_with_db().await;
    let salary = group(&engine, "alice", "Salary", "In").await;
    category(&engine, "alice", "Monthly", &salary).await;

    let err = engine
        .create_category(CreateCategory::new("alice", "Monthly", "M", "In", 999))
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::DuplicateName(EntityKind::Category));
}

#[tokio::test]
async fn missing_group_wins_over_flow_mismatch() {
    let (engine, _db) = engine_with_db().await;
    group(&engine, "alice", "Salary", "In").await;

    let err = engine
        .create_category(CreateCategory::new("alice", "Food", "FD", "Out", 999))
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::NotFound(EntityKind::Group));
}

#[tokio::test]
async fn category_names_are_unique_per_owner_across_groups() {
    let (engine, _db) = engine_with_db().await;
    let salary = group(&engine, "alice", "Salary", "In").await;
    let bonus = group(&engine, "alice", "Bonus", "In").await;
    category(&engine, "alice", "Monthly", &salary).await;

    let err = engine
        .create_category(CreateCategory::new("alice", "Monthly", "M", "In", bonus.id))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::DuplicateName(EntityKind::Category));

    let bobs = group(&engine, "bob", "Salary", "In").await;
    category(&engine, "bob", "Monthly", &bobs).await;
}

#[tokio::test]
async fn update_category_to_a_taken_name_is_duplicate() {
    let (engine, _db) = engine_with_db().await;
    let salary = group(&engine, "alice", "Salary", "In").await;
    category(&engine, "alice", "Monthly", &salary).await;
    let yearly = category(&engine, "alice", "Yearly", &salary).await;

    let err = engine
        .update_category(UpdateCategory::new("alice", yearly.id, "Monthly", "Y"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::DuplicateName(EntityKind::Category));

    let same = engine
        .update_category(UpdateCategory::new("alice", yearly.id, "Yearly", "YR"))
        .await
        .unwrap();
    assert_eq!(same.name, "Yearly");
    assert_eq!(same.abbr, "YR");
    assert_eq!(same.group_id, salary.id);
    assert_eq!(same.flow, Flow::In);
}

#[tokio::test]
async fn categories_of_other_owners_are_not_found() {
    let (engine, _db) = engine_with_db().await;
    let salary = group(&engine, "alice", "Salary", "In").await;
    let monthly = category(&engine, "alice", "Monthly", &salary).await;
    let missing = EngineError::NotFound(EntityKind::Category);

    assert_eq!(
        engine.category(monthly.id, "bob").await.unwrap_err(),
        missing
    );
    assert_eq!(
        engine
            .update_category(UpdateCategory::new("bob", monthly.id, "X", "X"))
            .await
            .unwrap_err(),
        missing
    );
    assert_eq!(
        engine
            .delete_category(DeleteCategory::new("bob", monthly.id))
            .await
            .unwrap_err(),
        missing
    );
    assert!(engine.categories("bob").await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_category_with_cash_is_blocked() {
    let (engine, db) = engine_with_db().await;
    let salary = group(&engine, "alice", "Salary", "In").await;
    let monthly = category(&engine, "alice", "Monthly", &salary).await;
    let pay = engine
        .create_cash(CreateCash::new("alice", "March", "1500.00", monthly.id))
        .await
        .unwrap();

    let err = engine
        .delete_category(DeleteCategory::new("alice", monthly.id))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::HasDependents(EntityKind::Category));
    assert_eq!(
        err.to_string(),
        "this category cannot be removed because dependents exist"
    );

    engine
        .delete_cash(DeleteCash::new("alice", pay.id))
        .await
        .unwrap();
    let removed = engine
        .delete_category(DeleteCategory::new("alice", monthly.id))
        .await
        .unwrap();
    assert_eq!(removed.id, monthly.id);
    assert_eq!(count_rows(&db, "categories").await, 0);
}
