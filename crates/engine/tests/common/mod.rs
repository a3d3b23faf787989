#![allow(dead_code)]

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Category, CreateCategory, CreateGroup, Engine, Group};
use migration::MigratorTrait;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    for user in ["alice", "bob"] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password) VALUES (?, ?)",
            vec![user.into(), "password".into()],
        ))
        .await
        .unwrap();
    }
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

pub async fn group(engine: &Engine, owner: &str, name: &str, flow: &str) -> Group {
    engine
        .create_group(CreateGroup::new(owner, name, &name[..1], flow))
        .await
        .unwrap()
}

pub async fn category(engine: &Engine, owner: &str, name: &str, group: &Group) -> Category {
    engine
        .create_category(CreateCategory::new(
            owner,
            name,
            &name[..1],
            group.flow.as_str(),
            group.id,
        ))
        .await
        .unwrap()
}

pub async fn count_rows(db: &DatabaseConnection, table: &str) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            format!("SELECT COUNT(*) AS n FROM {table}"),
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "n").unwrap()
}
