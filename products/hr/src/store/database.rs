use async_trait::async_trait;
use entity::employees;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, SqlErr,
};
use tracing::debug;

use super::{EmployeeStore, StoreError, StoreResult};
use crate::model::{Department, Employee, EmployeeId, EmployeeRecord};

/// [`EmployeeStore`] backed by the `employees` table. Share it behind an
/// `Arc`; the connection itself is pooled.
#[derive(Debug)]
pub struct SeaOrmEmployeeStore {
    db: DatabaseConnection,
}

impl SeaOrmEmployeeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn write_error(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::UniqueViolation(detail),
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl EmployeeStore for SeaOrmEmployeeStore {
    async fn find_all(&self) -> StoreResult<Vec<Employee>> {
        let rows = employees::Entity::find()
            .order_by_asc(employees::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn find_by_id(&self, id: EmployeeId) -> StoreResult<Option<Employee>> {
        let row = employees::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Employee::from))
    }

    async fn find_by_national_id(&self, national_id: &str) -> StoreResult<Option<Employee>> {
        let row = employees::Entity::find()
            .filter(employees::Column::NationalId.eq(national_id))
            .one(&self.db)
            .await?;
        Ok(row.map(Employee::from))
    }

    async fn find_by_department_and_enabled(
        &self,
        department: Option<Department>,
        enabled: Option<bool>,
    ) -> StoreResult<Vec<Employee>> {
        let mut query = employees::Entity::find();
        if let Some(department) = department {
            query = query.filter(
                employees::Column::Department.eq(employees::Department::from(department)),
            );
        }
        if let Some(enabled) = enabled {
            query = query.filter(employees::Column::Enabled.eq(enabled));
        }
        let rows = query
            .order_by_asc(employees::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn save(&self, record: EmployeeRecord) -> StoreResult<Employee> {
        let existing_id = record.id;
        let active = record.into_active_model();
        let model = match existing_id {
            Some(_) => active.update(&self.db).await.map_err(write_error)?,
            None => active.insert(&self.db).await.map_err(write_error)?,
        };
        debug!(employee_id = model.id, "employee row written");
        Ok(model.into())
    }

    async fn delete_by_id(&self, id: EmployeeId) -> StoreResult<()> {
        let result = employees::Entity::delete_by_id(id).exec(&self.db).await?;
        debug!(employee_id = id, rows = result.rows_affected, "employee row deleted");
        Ok(())
    }
}
