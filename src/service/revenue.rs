use sqlx::{Pool, Postgres};

use crate::{
    dao::revenue::RevenueDao,
    model::{
        apperror::{ApplicationError, ErrorType},
        models::RevenueRecord,
    },
};

/**
 * Represents the service for seeding the revenue table.
 */
pub struct SeederService {
    /**
     * The DAO for revenue operations.
     */
    revenue_dao: RevenueDao,
    /**
     * Optional connection pool for database operations. Optional for test purposes until we have a better way to mock the database.
     */
    connection_pool: Option<Pool<Postgres>>,
}

impl SeederService {
    /**
     * Creates a new instance of `SeederService`.
     *
     * # Arguments
     * `revenue_dao`: The DAO for revenue operations.
     * `connection_pool`: Optional connection pool for database operations.
     *
     * # Returns
     * A new instance of `SeederService`.
     */
    pub fn new(revenue_dao: RevenueDao, connection_pool: Option<Pool<Postgres>>) -> Self {
        SeederService { revenue_dao, connection_pool }
    }

    /**
     * Recreates the revenue table and inserts the dataset within a single
     * transaction. On any failure the transaction is rolled back and the
     * table is left as the failure found it.
     *
     * # Arguments
     * `records`: The dataset to persist.
     *
     * # Returns
     * A Result containing the number of inserted rows, or an `ApplicationError`.
     */
    pub async fn seed(&self, records: &[RevenueRecord]) -> Result<u64, ApplicationError> {
        let Some(connection_pool) = &self.connection_pool else {
            return Err(ApplicationError::new(ErrorType::DatabaseError, "No database connection available".to_string()));
        };
        let mut transaction = connection_pool.begin().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to begin transaction: {err}")))?;
        let result = async {
            self.revenue_dao.recreate_table(&mut transaction).await?;
            self.revenue_dao.insert_records(&mut transaction, records).await
        }
        .await;
        match result {
            Ok(inserted) => {
                transaction.commit().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to commit transaction: {err}")))?;
                Ok(inserted)
            }
            Err(err) => {
                transaction.rollback().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to rollback transaction: {err}")))?;
                Err(err)
            }
        }
    }

    /**
     * Counts the rows currently in the revenue table.
     *
     * # Returns
     * A Result containing the row count, or an `ApplicationError`.
     */
    pub async fn count(&self) -> Result<i64, ApplicationError> {
        let Some(connection_pool) = &self.connection_pool else {
            return Err(ApplicationError::new(ErrorType::DatabaseError, "No database connection available".to_string()));
        };
        let mut connection = connection_pool.acquire().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to acquire connection: {err}")))?;
        self.revenue_dao.count_records(&mut connection).await
    }
}
