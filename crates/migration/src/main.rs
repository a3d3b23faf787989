//! Applies the ledger schema without starting the app.
//!
//! `migration [up|down|fresh|status]`, against `DATABASE_URL`.

use sea_orm::Database;
use sea_orm_migration::prelude::*;

use migration::Migrator;

const DEFAULT_DATABASE_URL: &str = "sqlite:./mybudget.db?mode=rwc";

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Up,
    /// Rolls back the latest migration only.
    Down,
    Fresh,
    Status,
}

impl Action {
    fn parse(arg: Option<&str>) -> Option<Self> {
        match arg.unwrap_or("up") {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "fresh" => Some(Self::Fresh),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), DbErr> {
    let arg = std::env::args().nth(1);
    let Some(action) = Action::parse(arg.as_deref()) else {
        eprintln!("usage: migration [up|down|fresh|status]");
        eprintln!("DATABASE_URL defaults to {DEFAULT_DATABASE_URL}");
        std::process::exit(2);
    };

    let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let db = Database::connect(&url).await?;

    match action {
        Action::Up => Migrator::up(&db, None).await,
        Action::Down => Migrator::down(&db, Some(1)).await,
        Action::Fresh => Migrator::fresh(&db).await,
        Action::Status => Migrator::status(&db).await,
    }
}
