//! Persistence port for employee records.

mod database;
mod memory;

use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

use crate::model::{Department, Employee, EmployeeId, EmployeeRecord};

pub use self::database::SeaOrmEmployeeStore;
pub use self::memory::MemoryEmployeeStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The write collided with the national-id unique constraint.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage operations the employee service relies on. Listing operations
/// return employees in ascending id order.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find_all(&self) -> StoreResult<Vec<Employee>>;

    async fn find_by_id(&self, id: EmployeeId) -> StoreResult<Option<Employee>>;

    async fn find_by_national_id(&self, national_id: &str) -> StoreResult<Option<Employee>>;

    /// `None` filters match every value; present filters are combined with AND.
    async fn find_by_department_and_enabled(
        &self,
        department: Option<Department>,
        enabled: Option<bool>,
    ) -> StoreResult<Vec<Employee>>;

    /// Insert when `record.id` is `None`, otherwise overwrite that row.
    async fn save(&self, record: EmployeeRecord) -> StoreResult<Employee>;

    async fn delete_by_id(&self, id: EmployeeId) -> StoreResult<()>;
}
