use sea_orm::DatabaseConnection;

use crate::{EngineError, ResultEngine};

mod expenses;

/// Storage client shared by every request.
///
/// Holds no state besides the connection; each operation is a single
/// statement.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn database(&self) -> &DatabaseConnection {
        &self.database
    }
}

/// Path ids are checked for presence only; the database decides whether
/// they name a row.
fn require_id(id: &str) -> ResultEngine<&str> {
    if id.is_empty() {
        return Err(EngineError::InvalidInput(
            "Invalid request, missing param id".to_string(),
        ));
    }
    Ok(id)
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
            database: self.database,
        })
    }
}
