use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{EmployeeStore, StoreError, StoreResult};
use crate::model::{Department, Employee, EmployeeId, EmployeeRecord};

/// Process-local [`EmployeeStore`]. Ids start at 1 and are never reused;
/// national ids are kept unique like the database index does.
#[derive(Debug, Default)]
pub struct MemoryEmployeeStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: EmployeeId,
    rows: BTreeMap<EmployeeId, Employee>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }
}

impl Inner {
    fn national_id_taken(&self, national_id: &str, except: Option<EmployeeId>) -> bool {
        self.rows
            .values()
            .any(|row| row.national_id == national_id && Some(row.id) != except)
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn find_all(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: EmployeeId) -> StoreResult<Option<Employee>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn find_by_national_id(&self, national_id: &str) -> StoreResult<Option<Employee>> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .values()
            .find(|row| row.national_id == national_id)
            .cloned())
    }

    async fn find_by_department_and_enabled(
        &self,
        department: Option<Department>,
        enabled: Option<bool>,
    ) -> StoreResult<Vec<Employee>> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .values()
            .filter(|row| department.is_none_or(|d| row.department == d))
            .filter(|row| enabled.is_none_or(|e| row.enabled == e))
            .cloned()
            .collect())
    }

    async fn save(&self, record: EmployeeRecord) -> StoreResult<Employee> {
        let mut inner = self.inner.write().await;
        if inner.national_id_taken(&record.national_id, record.id) {
            return Err(StoreError::UniqueViolation(format!(
                "national_id {} already stored",
                record.national_id
            )));
        }
        let id = match record.id {
            Some(id) => id,
            None => {
                inner.last_id += 1;
                inner.last_id
            }
        };
        if id > inner.last_id {
            inner.last_id = id;
        }
        let employee = Employee {
            id,
            name: record.name,
            national_id: record.national_id,
            department: record.department,
            enabled: record.enabled,
        };
        inner.rows.insert(id, employee.clone());
        Ok(employee)
    }

    async fn delete_by_id(&self, id: EmployeeId) -> StoreResult<()> {
        self.inner.write().await.rows.remove(&id);
        Ok(())
    }
}
