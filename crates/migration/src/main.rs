use std::{process::ExitCode, str::FromStr};

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};

const USAGE: &str = "usage: migration [up|down|fresh|status], with DATABASE_URL set";

/// Schema action requested on the command line. Defaults to `up`.
#[derive(Debug, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Up,
    Down,
    Fresh,
    Status,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "fresh" => Ok(Self::Fresh),
            "status" => Ok(Self::Status),
            other => Err(format!("unknown command {other:?}")),
        }
    }
}

impl Command {
    fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        match args.next() {
            Some(arg) => arg.parse(),
            None => Ok(Self::default()),
        }
    }

    async fn run(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        match self {
            Self::Up => Migrator::up(db, None).await,
            Self::Down => Migrator::down(db, None).await,
            Self::Fresh => Migrator::fresh(db).await,
            Self::Status => Migrator::status(db).await,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter("migration=info,sea_orm_migration=info")
        .init();

    let command = match Command::from_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            tracing::error!("{err}; {USAGE}");
            return ExitCode::from(2);
        }
    };

    let Ok(db_url) = std::env::var("DATABASE_URL") else {
        tracing::error!("DATABASE_URL is not set; {USAGE}");
        return ExitCode::from(2);
    };

    let db = match Database::connect(&db_url).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!("can't connect to the expenses database: {err}");
            return ExitCode::FAILURE;
        }
    };

    match command.run(&db).await {
        Ok(()) => {
            tracing::info!("migration {command:?} finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("migration {command:?} failed: {err}");
            ExitCode::FAILURE
        }
    }
}
