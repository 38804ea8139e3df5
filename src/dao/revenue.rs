use std::borrow::Cow;

use chrono::NaiveDate;
use sqlx::PgConnection;
use tracing::{Instrument, instrument};

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    models::RevenueRecord,
};

/**
 * SQL statement to drop the revenue table.
 */
const DROP_TABLE: &str = "DROP TABLE IF EXISTS branch_revenue";

/**
 * SQL statement to create the revenue table. One row per branch and report
 * date, enforced by the unique constraint.
 */
const CREATE_TABLE: &str = "CREATE TABLE branch_revenue (
                                id SERIAL PRIMARY KEY,
                                branch_code VARCHAR(3) NOT NULL,
                                branch_name VARCHAR(50) NOT NULL,
                                report_date DATE NOT NULL,
                                revenue_vnd BIGINT NOT NULL,
                                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                                UNIQUE(branch_code, report_date))";

/**
 * SQL statement to index the revenue table by report date.
 */
const CREATE_DATE_INDEX: &str = "CREATE INDEX idx_branch_revenue_date ON branch_revenue(report_date)";

/**
 * SQL statement to index the revenue table by branch code.
 */
const CREATE_BRANCH_INDEX: &str = "CREATE INDEX idx_branch_revenue_branch ON branch_revenue(branch_code)";

/**
 * SQL statement to insert all records as one batched statement from column
 * arrays.
 */
const INSERT_RECORDS: &str = "INSERT INTO branch_revenue (branch_code, branch_name, report_date, revenue_vnd)
                              SELECT * FROM UNNEST($1::varchar[], $2::varchar[], $3::date[], $4::bigint[])";

/**
 * SQL statement to count rows in the revenue table.
 */
const COUNT_RECORDS: &str = "SELECT COUNT(*) FROM branch_revenue";

/**
 * DAO for revenue-related database operations.
 */
pub struct RevenueDao {}

impl RevenueDao {
    /**
     * Creates a new instance of `RevenueDao`.
     *
     * # Returns
     * A new instance of `RevenueDao`.
     */
    pub fn new() -> Self {
        RevenueDao {}
    }

    /**
     * Drops and recreates the revenue table with its indexes. Destructive:
     * any previously seeded rows are lost.
     *
     * # Arguments
     * `transaction`: The database transaction to execute the statements within.
     *
     * # Returns
     * A result indicating success or failure of the operation.
     */
    #[instrument(skip(self, transaction), fields(result))]
    pub async fn recreate_table(&self, transaction: &mut PgConnection) -> Result<(), ApplicationError> {
        let span = tracing::Span::current();
        for statement in [DROP_TABLE, CREATE_TABLE, CREATE_DATE_INDEX, CREATE_BRANCH_INDEX] {
            sqlx::query(statement)
                .execute(&mut *transaction)
                .instrument(span.clone())
                .await
                .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to recreate revenue table: {err}")))?;
        }
        tracing::info!("Recreated table branch_revenue");
        Ok(())
    }

    /**
     * Inserts all revenue records in a single batched statement.
     *
     * # Arguments
     * `transaction`: The database transaction to execute the query within.
     * `records`: The records to insert.
     *
     * # Returns
     * A result containing the number of inserted rows, or an `ApplicationError`.
     */
    #[instrument(skip(self, transaction, records), fields(result))]
    pub async fn insert_records(&self, transaction: &mut PgConnection, records: &[RevenueRecord]) -> Result<u64, ApplicationError> {
        let span = tracing::Span::current();
        let mut branch_codes: Vec<String> = Vec::with_capacity(records.len());
        let mut branch_names: Vec<String> = Vec::with_capacity(records.len());
        let mut report_dates: Vec<NaiveDate> = Vec::with_capacity(records.len());
        let mut revenues: Vec<i64> = Vec::with_capacity(records.len());
        for record in records {
            branch_codes.push(record.branch_code.clone());
            branch_names.push(record.branch_name.clone());
            report_dates.push(record.report_date);
            revenues.push(record.revenue_vnd);
        }
        let result = sqlx::query(INSERT_RECORDS)
            .bind(branch_codes)
            .bind(branch_names)
            .bind(report_dates)
            .bind(revenues)
            .execute(transaction)
            .instrument(span)
            .await
            .map_err(|err| Self::handle_database_error(err.as_database_error()))?;
        Ok(result.rows_affected())
    }

    /**
     * Counts the rows currently in the revenue table.
     *
     * # Arguments
     * `connection`: The database connection to execute the query on.
     *
     * # Returns
     * A result containing the row count, or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn count_records(&self, connection: &mut PgConnection) -> Result<i64, ApplicationError> {
        let span = tracing::Span::current();
        let count: (i64,) = sqlx::query_as(COUNT_RECORDS)
            .fetch_one(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to count revenue records: {err}")))?;
        Ok(count.0)
    }

    /**
     * Handles database errors and maps them to application errors.
     *
     * # Arguments
     * `error`: The database error to handle.
     *
     * # Returns
     * An `ApplicationError` corresponding to the database error.
     */
    fn handle_database_error(error: Option<&dyn sqlx::error::DatabaseError>) -> ApplicationError {
        if let Some(db_error) = error {
            tracing::debug!("Database error: {}", db_error);
            if db_error.code() == Some(Cow::Borrowed("23505")) {
                // Unique violation
                return ApplicationError::new(ErrorType::ConstraintViolation, "Already exists".to_string());
            } else if db_error.code() == Some(Cow::Borrowed("22001")) {
                // Value too long
                return ApplicationError::new(ErrorType::Validation, "Value too long".to_string());
            }
            tracing::error!("Unhandled database error: {}", db_error);
            return ApplicationError::new(ErrorType::DatabaseError, "Unhandled database error".to_string());
        }
        ApplicationError::new(ErrorType::DatabaseError, "Failed to execute database operation".to_string())
    }
}


#[cfg(feature = "integration-test")]
#[cfg(test)]
mod integration_test {
    use super::*;
    use sqlx::PgPool;

    use crate::generator::revenue::{build_dataset, seeded_rng};
    use crate::model::models::{BRANCHES, YEARS};

    #[sqlx::test]
    async fn test_recreate_then_insert() {
        let pool = init_db().await;
        let dao = RevenueDao::new();
        let mut transaction = pool.begin().await.unwrap();
        dao.recreate_table(&mut transaction).await.unwrap();
        let records = build_dataset(&YEARS, &BRANCHES, &mut seeded_rng(Some(42))).unwrap();
        let inserted = dao.insert_records(&mut transaction, &records).await.unwrap();
        assert_eq!(inserted, 72);
        let count = dao.count_records(&mut transaction).await.unwrap();
        assert_eq!(count, 72);
        transaction.rollback().await.unwrap(); // Rollback the transaction to avoid leaving test data in the database
    }

    #[sqlx::test]
    async fn test_reseed_yields_same_row_count() {
        let pool = init_db().await;
        let dao = RevenueDao::new();
        let mut transaction = pool.begin().await.unwrap();
        let records = build_dataset(&YEARS, &BRANCHES, &mut seeded_rng(Some(42))).unwrap();
        dao.recreate_table(&mut transaction).await.unwrap();
        dao.insert_records(&mut transaction, &records).await.unwrap();
        dao.recreate_table(&mut transaction).await.unwrap();
        dao.insert_records(&mut transaction, &records).await.unwrap();
        let count = dao.count_records(&mut transaction).await.unwrap();
        assert_eq!(count, 72);
        transaction.rollback().await.unwrap(); // Rollback the transaction to avoid leaving test data in the database
    }

    #[sqlx::test]
    async fn test_duplicate_batch_violates_unique_constraint() {
        let pool = init_db().await;
        let dao = RevenueDao::new();
        let mut transaction = pool.begin().await.unwrap();
        dao.recreate_table(&mut transaction).await.unwrap();
        let records = build_dataset(&YEARS, &BRANCHES, &mut seeded_rng(Some(42))).unwrap();
        dao.insert_records(&mut transaction, &records).await.unwrap();
        let duplicate = dao.insert_records(&mut transaction, &records).await;
        assert!(duplicate.is_err());
        transaction.rollback().await.unwrap(); // Rollback the transaction to avoid leaving test data in the database
    }

    /**
     * Initialize the database connection pool.
     */
    async fn init_db() -> PgPool {
        dotenv::from_filename(".env-test").ok();
        PgPool::connect(dotenv::var("DATABASE_URL").unwrap().as_str()).await.unwrap()
    }
}
