use std::{error::Error, io::Stderr};

use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::{CreateCategory, CreateGroup, Engine};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection, EntityTrait, Set};

mod users {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub username: String,
        pub password: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Parser, Debug)]
#[command(name = "mybudget_admin")]
#[command(about = "Admin utilities for MyBudget (bootstrap users, groups and categories)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./mybudget.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Group(Group),
    Category(Category),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Flow {
    #[value(name = "In")]
    In,
    #[value(name = "Out")]
    Out,
}

impl Flow {
    fn as_str(self) -> &'static str {
        match self {
            Self::In => "In",
            Self::Out => "Out",
        }
    }
}

#[derive(Args, Debug)]
struct Group {
    #[command(subcommand)]
    command: GroupCommand,
}

#[derive(Subcommand, Debug)]
enum GroupCommand {
    Create(GroupCreateArgs),
    List(OwnerArgs),
}

#[derive(Args, Debug)]
struct GroupCreateArgs {
    #[arg(long)]
    owner: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    abbr: String,
    #[arg(long, value_enum)]
    flow: Flow,
}

#[derive(Args, Debug)]
struct Category {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    Create(CategoryCreateArgs),
    List(OwnerArgs),
}

#[derive(Args, Debug)]
struct CategoryCreateArgs {
    #[arg(long)]
    owner: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    abbr: String,
    #[arg(long, value_enum)]
    flow: Flow,
    #[arg(long)]
    group_id: i32,
}

#[derive(Args, Debug)]
struct OwnerArgs {
    #[arg(long)]
    owner: String,
}

/// Raw-mode session on stderr for one masked prompt. Leaving it moves to a
/// fresh line and restores the terminal.
struct MaskedPrompt {
    out: Stderr,
}

impl MaskedPrompt {
    fn open(prompt: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        let mut session = Self {
            out: std::io::stderr(),
        };
        execute!(
            session.out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print(prompt)
        )?;
        Ok(session)
    }

    fn star(&mut self) -> std::io::Result<()> {
        execute!(self.out, Print('*'))
    }

    fn unstar(&mut self) -> std::io::Result<()> {
        execute!(self.out, cursor::MoveLeft(1), Print(' '), cursor::MoveLeft(1))
    }
}

impl Drop for MaskedPrompt {
    fn drop(&mut self) {
        let _ = execute!(self.out, Print("\r\n"));
        let _ = terminal::disable_raw_mode();
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Keystroke {
    Submit,
    Erase,
    Cancel,
    Char(char),
    Ignored,
}

impl From<KeyEvent> for Keystroke {
    fn from(key: KeyEvent) -> Self {
        if key.kind == KeyEventKind::Release {
            return Self::Ignored;
        }
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => Self::Submit,
            KeyCode::Backspace => Self::Erase,
            KeyCode::Esc => Self::Cancel,
            KeyCode::Char('c' | 'd') if control => Self::Cancel,
            KeyCode::Char(ch) if !control => Self::Char(ch),
            _ => Self::Ignored,
        }
    }
}

fn read_password(prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut session = MaskedPrompt::open(prompt)?;
    let mut password = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match Keystroke::from(key) {
            Keystroke::Submit => return Ok(password),
            Keystroke::Cancel => return Err("password entry cancelled".into()),
            Keystroke::Erase => {
                if password.pop().is_some() {
                    session.unstar()?;
                }
            }
            Keystroke::Char(ch) => {
                password.push(ch);
                session.star()?;
            }
            Keystroke::Ignored => {}
        }
    }
}

const PASSWORD_ATTEMPTS: usize = 3;

fn say(out: &mut Stderr, line: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(line),
        Print("\r\n")
    )?;
    Ok(())
}

/// Asks for a new password and its confirmation.
fn prompt_new_password() -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut out = std::io::stderr();
    for _ in 0..PASSWORD_ATTEMPTS {
        let password = read_password("Password: ")?;
        if password.is_empty() {
            say(&mut out, "Password must not be empty.")?;
            continue;
        }

        if read_password("Confirm password: ")? == password {
            return Ok(password);
        }
        say(&mut out, "Passwords do not match. Try again.")?;
    }

    Err("too many attempts".into())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Groups and categories may only be bootstrapped for existing users.
async fn require_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    if users::Entity::find_by_id(username.to_string())
        .one(db)
        .await?
        .is_none()
    {
        return Err(format!("user not found: {username}").into());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db.clone()).build().await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            if users::Entity::find_by_id(args.username.clone())
                .one(&db)
                .await?
                .is_some()
            {
                return Err(format!("user already exists: {}", args.username).into());
            }

            let password = prompt_new_password()?;

            let user = users::ActiveModel {
                username: Set(args.username.clone()),
                password: Set(password),
            };
            users::Entity::insert(user).exec(&db).await?;

            println!("created user: {}", args.username);
        }
        Command::Group(Group {
            command: GroupCommand::Create(args),
        }) => {
            require_user(&db, &args.owner).await?;
            let group = engine
                .create_group(CreateGroup::new(
                    &args.owner,
                    args.name,
                    args.abbr,
                    args.flow.as_str(),
                ))
                .await?;
            println!("created group: {} ({})", group.name, group.id);
        }
        Command::Group(Group {
            command: GroupCommand::List(args),
        }) => {
            for group in engine.groups(&args.owner).await? {
                println!(
                    "{}\t{}\t{}\t{}",
                    group.id, group.name, group.abbr, group.flow
                );
            }
        }
        Command::Category(Category {
            command: CategoryCommand::Create(args),
        }) => {
            require_user(&db, &args.owner).await?;
            let category = engine
                .create_category(CreateCategory::new(
                    &args.owner,
                    args.name,
                    args.abbr,
                    args.flow.as_str(),
                    args.group_id,
                ))
                .await?;
            println!("created category: {} ({})", category.name, category.id);
        }
        Command::Category(Category {
            command: CategoryCommand::List(args),
        }) => {
            for category in engine.categories(&args.owner).await? {
                println!(
                    "{}\t{}\t{}\t{}\tgroup {}",
                    category.id, category.name, category.abbr, category.flow, category.group_id
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Keystroke {
        Keystroke::from(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn typed_characters_are_kept() {
        assert_eq!(key(KeyCode::Char('s'), KeyModifiers::NONE), Keystroke::Char('s'));
        assert_eq!(key(KeyCode::Char('S'), KeyModifiers::SHIFT), Keystroke::Char('S'));
        assert_eq!(key(KeyCode::Enter, KeyModifiers::NONE), Keystroke::Submit);
        assert_eq!(key(KeyCode::Backspace, KeyModifiers::NONE), Keystroke::Erase);
    }

    #[test]
    fn control_keys_cancel_or_are_ignored() {
        assert_eq!(key(KeyCode::Char('c'), KeyModifiers::CONTROL), Keystroke::Cancel);
        assert_eq!(key(KeyCode::Char('d'), KeyModifiers::CONTROL), Keystroke::Cancel);
        assert_eq!(key(KeyCode::Esc, KeyModifiers::NONE), Keystroke::Cancel);
        assert_eq!(key(KeyCode::Char('u'), KeyModifiers::CONTROL), Keystroke::Ignored);
        assert_eq!(key(KeyCode::Tab, KeyModifiers::NONE), Keystroke::Ignored);
    }

    #[test]
    fn key_releases_are_ignored() {
        let release =
            KeyEvent::new_with_kind(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(Keystroke::from(release), Keystroke::Ignored);
    }
}
