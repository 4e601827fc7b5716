use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Statement};

use crate::{EngineError, Expense, ExpenseFields, ResultEngine, expenses};

use super::{Engine, require_id};

// The id is bound as text and cast by the database, so a malformed id is
// reported by storage rather than rejected here.
const SELECT_BY_ID: &str =
    "SELECT id, title, amount, note, tags FROM expenses WHERE id = CAST($1 AS INTEGER)";
const UPDATE_BY_ID: &str = "UPDATE expenses SET title = $1, amount = $2, note = $3, tags = $4 \
     WHERE id = CAST($5 AS INTEGER) RETURNING id";

const NOT_FOUND: &str = "expense not found";
const NO_ROWS: &str = "no rows in result set";

impl Engine {
    /// Insert a new expense and return it with the id assigned by storage.
    pub async fn create_expense(&self, fields: ExpenseFields) -> ResultEngine<Expense> {
        let created = expenses::ActiveModel::from(&fields)
            .insert(&self.database)
            .await
            .map_err(|err| {
                tracing::warn!("failed to insert expense: {err}");
                EngineError::WriteRejected(err.to_string())
            })?;

        tracing::debug!("created expense {}", created.id);
        Ok(fields.with_id(created.id))
    }

    /// Look up a single expense by the id taken from the request path.
    pub async fn expense(&self, id: &str) -> ResultEngine<Expense> {
        let id = require_id(id)?;
        let backend = self.database.get_database_backend();

        expenses::Entity::find()
            .from_raw_sql(Statement::from_sql_and_values(
                backend,
                SELECT_BY_ID,
                [id.into()],
            ))
            .one(&self.database)
            .await
            .map_err(|err| {
                tracing::error!("failed to read expense {id}: {err}");
                EngineError::Scan(err)
            })?
            .ok_or_else(|| EngineError::NotFound(NOT_FOUND.to_string()))
    }

    /// Return every stored expense in the order storage yields them.
    ///
    /// An empty table is reported as [`EngineError::NotFound`].
    pub async fn expenses(&self) -> ResultEngine<Vec<Expense>> {
        let expenses = expenses::Entity::find()
            .all(&self.database)
            .await
            .map_err(|err| {
                tracing::error!("failed to read expenses: {err}");
                EngineError::from(err)
            })?;

        if expenses.is_empty() {
            return Err(EngineError::NotFound(NOT_FOUND.to_string()));
        }
        Ok(expenses)
    }

    /// Replace every field of an expense except its id.
    ///
    /// A missing row is a [`EngineError::WriteRejected`], not a
    /// [`EngineError::NotFound`].
    pub async fn update_expense(&self, id: &str, fields: ExpenseFields) -> ResultEngine<Expense> {
        let id = require_id(id)?;
        let backend = self.database.get_database_backend();

        let mut values = fields.values();
        values.push(id.into());

        let row = self
            .database
            .query_one(Statement::from_sql_and_values(backend, UPDATE_BY_ID, values))
            .await
            .map_err(|err| {
                tracing::warn!("failed to update expense {id}: {err}");
                EngineError::WriteRejected(err.to_string())
            })?
            .ok_or_else(|| {
                tracing::debug!("update matched no expense with id {id}");
                EngineError::WriteRejected(NO_ROWS.to_string())
            })?;

        let updated: i32 = row
            .try_get("", "id")
            .map_err(|err| EngineError::WriteRejected(err.to_string()))?;
        Ok(fields.with_id(updated))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{
        DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, Transaction, Value,
    };

    use super::*;

    fn fields() -> ExpenseFields {
        ExpenseFields {
            title: "strawberry smoothie".to_string(),
            amount: 79.0,
            note: "night market promotion discount 10 bath".to_string(),
            tags: vec!["food".to_string(), "beverage".to_string()],
        }
    }

    fn stored(id: i32, title: &str, tags: &[&str]) -> expenses::Model {
        expenses::Model {
            id,
            title: title.to_string(),
            amount: 10.0,
            note: title.to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    fn id_row(id: i32) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("id", Value::Int(Some(id)))])
    }

    fn cancelled() -> DbErr {
        DbErr::Custom("canceling query due to user request".to_string())
    }

    async fn engine(database: DatabaseConnection) -> Engine {
        Engine::builder().database(database).build().await.unwrap()
    }

    #[tokio::test]
    async fn create_returns_storage_id_and_echoes_fields() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![fields().with_id(1)]])
            .into_connection();
        let engine = engine(database).await;

        let created = engine.create_expense(fields()).await.unwrap();

        assert_eq!(created, fields().with_id(1));
    }

    #[tokio::test]
    async fn create_reports_insert_failure_as_rejected_write() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([cancelled()])
            .into_connection();
        let engine = engine(database).await;

        let err = engine.create_expense(fields()).await.unwrap_err();

        assert_eq!(err, EngineError::WriteRejected(cancelled().to_string()));
    }

    #[tokio::test]
    async fn get_one_returns_stored_expense() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored(1, "test", &["foo", "bar"])]])
            .into_connection();
        let engine = engine(database).await;

        let expense = engine.expense("1").await.unwrap();

        assert_eq!(expense, stored(1, "test", &["foo", "bar"]));
    }

    #[tokio::test]
    async fn get_one_binds_path_id_as_text() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored(1, "test", &["foo"])]])
            .into_connection();
        let engine = engine(database).await;

        engine.expense("1").await.unwrap();

        let Engine { database } = engine;
        assert_eq!(
            database.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                SELECT_BY_ID,
                ["1".into()],
            )]
        );
    }

    #[tokio::test]
    async fn get_one_without_rows_is_not_found() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<expenses::Model>::new()])
            .into_connection();
        let engine = engine(database).await;

        let err = engine.expense("9999999").await.unwrap_err();

        assert_eq!(err, EngineError::NotFound("expense not found".to_string()));
    }

    #[tokio::test]
    async fn get_one_storage_failure_is_scan_error() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([cancelled()])
            .into_connection();
        let engine = engine(database).await;

        let err = engine.expense("1").await.unwrap_err();

        assert_eq!(err, EngineError::Scan(cancelled()));
    }

    #[tokio::test]
    async fn get_one_with_empty_id_runs_no_statement() {
        let database = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let engine = engine(database).await;

        let err = engine.expense("").await.unwrap_err();

        assert!(matches!(err, EngineError::InvalidInput(_)));
        let Engine { database } = engine;
        assert!(database.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn get_all_keeps_storage_order() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                stored(2, "test2", &["foo2", "bar2"]),
                stored(1, "test", &["foo", "bar"]),
            ]])
            .into_connection();
        let engine = engine(database).await;

        let expenses = engine.expenses().await.unwrap();

        assert_eq!(
            expenses,
            vec![
                stored(2, "test2", &["foo2", "bar2"]),
                stored(1, "test", &["foo", "bar"]),
            ]
        );
    }

    #[tokio::test]
    async fn get_all_on_empty_table_is_not_found() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<expenses::Model>::new()])
            .into_connection();
        let engine = engine(database).await;

        let err = engine.expenses().await.unwrap_err();

        assert_eq!(err, EngineError::NotFound("expense not found".to_string()));
    }

    #[tokio::test]
    async fn get_all_storage_failure_is_database_error() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([cancelled()])
            .into_connection();
        let engine = engine(database).await;

        let err = engine.expenses().await.unwrap_err();

        assert_eq!(err, EngineError::Database(cancelled()));
    }

    #[tokio::test]
    async fn update_echoes_path_id() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[id_row(1)]])
            .into_connection();
        let engine = engine(database).await;

        let updated = engine.update_expense("1", fields()).await.unwrap();

        assert_eq!(updated, fields().with_id(1));
        let Engine { database } = engine;
        let tags: Vec<String> = vec!["food".to_string(), "beverage".to_string()];
        assert_eq!(
            database.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                UPDATE_BY_ID,
                [
                    "strawberry smoothie".into(),
                    79.0_f64.into(),
                    "night market promotion discount 10 bath".into(),
                    tags.into(),
                    "1".into(),
                ],
            )]
        );
    }

    #[tokio::test]
    async fn update_without_matching_row_is_rejected() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&'static str, Value>>::new()])
            .into_connection();
        let engine = engine(database).await;

        let err = engine.update_expense("9999999", fields()).await.unwrap_err();

        assert_eq!(
            err,
            EngineError::WriteRejected("no rows in result set".to_string())
        );
    }

    #[tokio::test]
    async fn update_storage_failure_is_rejected_with_storage_text() {
        let database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([cancelled()])
            .into_connection();
        let engine = engine(database).await;

        let err = engine.update_expense("1", fields()).await.unwrap_err();

        assert_eq!(err, EngineError::WriteRejected(cancelled().to_string()));
    }

    #[tokio::test]
    async fn update_with_empty_id_runs_no_statement() {
        let database = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let engine = engine(database).await;

        let err = engine.update_expense("", fields()).await.unwrap_err();

        assert!(matches!(err, EngineError::InvalidInput(_)));
        let Engine { database } = engine;
        assert!(database.into_transaction_log().is_empty());
    }
}
