use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    model::{
        Department, Employee, EmployeeId, EmployeeInput, EmployeeQueryResult, EmployeeRecord,
        EmployeeResponse,
    },
    page::{Page, PageRequest},
    store::{EmployeeStore, StoreError},
};

#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("Employee {0} not found")]
    NotFound(EmployeeId),
    #[error("national id already registered")]
    Conflict,
    #[error("storage failure: {0}")]
    Store(StoreError),
}

/// A unique-constraint violation raised by the store is the same conflict the
/// pre-write lookup reports; it only surfaces when two writers race.
impl From<StoreError> for EmployeeError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::UniqueViolation(_) => EmployeeError::Conflict,
            other => EmployeeError::Store(other),
        }
    }
}

pub type EmployeeResult<T> = Result<T, EmployeeError>;

/// Employee lifecycle and query operations. Holds no state besides the store
/// handle, so clones can be shared freely across requests.
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    #[instrument(
        name = "hr.employees.list",
        skip_all,
        fields(page = page.page(), size = page.size())
    )]
    pub async fn list_all(&self, page: PageRequest) -> EmployeeResult<Page<EmployeeResponse>> {
        let all: Vec<EmployeeResponse> = self
            .store
            .find_all()
            .await?
            .into_iter()
            .map(EmployeeResponse::from)
            .collect();
        Ok(Page::slice(all, page))
    }

    #[instrument(
        name = "hr.employees.filter",
        skip_all,
        fields(
            department = department.map(Department::as_str).unwrap_or(""),
            enabled = ?enabled,
            page = page.page(),
            size = page.size()
        )
    )]
    pub async fn list_by_filters(
        &self,
        department: Option<Department>,
        enabled: Option<bool>,
        page: PageRequest,
    ) -> EmployeeResult<EmployeeQueryResult> {
        let matched: Vec<EmployeeResponse> = self
            .store
            .find_by_department_and_enabled(department, enabled)
            .await?
            .into_iter()
            .map(EmployeeResponse::from)
            .collect();

        let total_active = matched.iter().filter(|employee| employee.enabled).count() as u64;
        let total_inactive = matched.iter().filter(|employee| !employee.enabled).count() as u64;

        Ok(EmployeeQueryResult {
            total_active,
            total_inactive,
            employees: Page::slice(matched, page),
        })
    }

    #[instrument(name = "hr.employees.get", skip(self))]
    pub async fn get_by_id(&self, id: EmployeeId) -> EmployeeResult<EmployeeResponse> {
        self.existing(id).await.map(EmployeeResponse::from)
    }

    #[instrument(name = "hr.employees.create", skip_all, fields(department = %input.department))]
    pub async fn create(&self, input: EmployeeInput) -> EmployeeResult<Employee> {
        self.ensure_national_id_free(&input.national_id, None).await?;
        let created = self.store.save(EmployeeRecord::from(input)).await?;
        info!(employee_id = created.id, "employee created");
        Ok(created)
    }

    #[instrument(name = "hr.employees.update_status", skip(self))]
    pub async fn update_status(&self, id: EmployeeId, enabled: bool) -> EmployeeResult<()> {
        let mut record = EmployeeRecord::from(self.existing(id).await?);
        record.enabled = enabled;
        self.store.save(record.with_id(id)).await?;
        info!(employee_id = id, enabled, "employee status updated");
        Ok(())
    }

    #[instrument(name = "hr.employees.update", skip(self, input))]
    pub async fn update(&self, id: EmployeeId, input: EmployeeInput) -> EmployeeResult<()> {
        self.existing(id).await?;
        self.ensure_national_id_free(&input.national_id, Some(id)).await?;
        self.store.save(EmployeeRecord::from(input).with_id(id)).await?;
        info!(employee_id = id, "employee updated");
        Ok(())
    }

    #[instrument(name = "hr.employees.delete", skip(self))]
    pub async fn delete(&self, id: EmployeeId) -> EmployeeResult<()> {
        self.existing(id).await?;
        self.store.delete_by_id(id).await?;
        info!(employee_id = id, "employee deleted");
        Ok(())
    }

    async fn existing(&self, id: EmployeeId) -> EmployeeResult<Employee> {
        self.store.find_by_id(id).await?.ok_or(EmployeeError::NotFound(id))
    }

    /// Conflict when another employee already holds `national_id`. The row
    /// identified by `owner` is allowed to keep its own id.
    async fn ensure_national_id_free(
        &self,
        national_id: &str,
        owner: Option<EmployeeId>,
    ) -> EmployeeResult<()> {
        match self.store.find_by_national_id(national_id).await? {
            Some(holder) if Some(holder.id) != owner => Err(EmployeeError::Conflict),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryEmployeeStore, StoreResult};
    use async_trait::async_trait;
    use sea_orm::DbErr;

    fn input(
        name: &str,
        national_id: &str,
        department: Department,
        enabled: bool,
    ) -> EmployeeInput {
        EmployeeInput {
            name: name.into(),
            national_id: national_id.into(),
            department,
            enabled,
        }
    }

    fn service() -> (EmployeeService, Arc<MemoryEmployeeStore>) {
        let store = Arc::new(MemoryEmployeeStore::new());
        (EmployeeService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn create_assigns_id_and_rejects_duplicate_national_id() {
        let (service, store) = service();
        let created = service
            .create(input("Test", "88888888888", Department::It, true))
            .await
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.name, "Test");

        let err = service
            .create(input("Other", "88888888888", Department::Hr, false))
            .await
            .unwrap_err();
        assert!(matches!(err, EmployeeError::Conflict));
        assert_eq!(err.to_string(), "national id already registered");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn get_missing_employee_is_not_found() {
        let (service, _) = service();
        let err = service.get_by_id(999).await.unwrap_err();
        assert!(matches!(err, EmployeeError::NotFound(999)));
        assert_eq!(err.to_string(), "Employee 999 not found");
    }

    #[tokio::test]
    async fn update_status_only_touches_enabled() {
        let (service, _) = service();
        let created = service
            .create(input("Test", "88888888888", Department::It, true))
            .await
            .unwrap();

        service.update_status(created.id, false).await.unwrap();

        let fetched = service.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched.name, "Test");
        assert_eq!(fetched.national_id, "88888888888");
        assert_eq!(fetched.department, Department::It);
        assert!(!fetched.enabled);
    }

    #[tokio::test]
    async fn update_may_keep_its_own_national_id() {
        let (service, _) = service();
        let created = service
            .create(input("Test", "88888888888", Department::It, true))
            .await
            .unwrap();

        service
            .update(
                created.id,
                input("Renamed", "88888888888", Department::Finance, false),
            )
            .await
            .unwrap();

        let fetched = service.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, "Renamed");
        assert_eq!(fetched.department, Department::Finance);
        assert!(!fetched.enabled);
    }

    #[tokio::test]
    async fn update_overwrites_national_id_with_an_unused_one() {
        let (service, store) = service();
        let created = service
            .create(input("Test", "88888888888", Department::It, true))
            .await
            .unwrap();

        service
            .update(created.id, input("Test", "33333333333", Department::It, true))
            .await
            .unwrap();

        let fetched = service.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched.national_id, "33333333333");
        assert!(store.find_by_national_id("88888888888").await.unwrap().is_none());

        // the old id is free again
        service
            .create(input("Other", "88888888888", Department::Hr, false))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_rejects_national_id_of_another_employee() {
        let (service, _) = service();
        service
            .create(input("Test", "88888888888", Department::It, true))
            .await
            .unwrap();
        let other = service
            .create(input("Other", "00000000000", Department::It, true))
            .await
            .unwrap();

        let err = service
            .update(other.id, input("Other", "88888888888", Department::It, true))
            .await
            .unwrap_err();
        assert!(matches!(err, EmployeeError::Conflict));

        let unchanged = service.get_by_id(other.id).await.unwrap();
        assert_eq!(unchanged.national_id, "00000000000");
    }

    #[tokio::test]
    async fn missing_ids_fail_without_mutating() {
        let (service, store) = service();
        service
            .create(input("Test", "88888888888", Department::It, true))
            .await
            .unwrap();
        let before = store.find_all().await.unwrap();

        assert!(matches!(
            service.update_status(999, false).await,
            Err(EmployeeError::NotFound(999))
        ));
        assert!(matches!(
            service
                .update(999, input("X", "11111111111", Department::Hr, true))
                .await,
            Err(EmployeeError::NotFound(999))
        ));
        assert!(matches!(
            service.delete(999).await,
            Err(EmployeeError::NotFound(999))
        ));

        assert_eq!(store.find_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_removes_employee() {
        let (service, _) = service();
        let created = service
            .create(input("Test", "88888888888", Department::It, true))
            .await
            .unwrap();
        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.get_by_id(created.id).await,
            Err(EmployeeError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_all_paginates_full_set() {
        let (service, _) = service();
        for n in 0..5 {
            service
                .create(input(&format!("E{n}"), &format!("0000000000{n}"), Department::It, true))
                .await
                .unwrap();
        }

        let page = service.list_all(PageRequest::new(1, 2)).await.unwrap();
        let names: Vec<_> = page.content.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["E2", "E3"]);
        assert_eq!(page.total_elements, 5);

        let beyond = service.list_all(PageRequest::new(10, 2)).await.unwrap();
        assert!(beyond.content.is_empty());
        assert_eq!(beyond.total_elements, 5);
    }

    #[tokio::test]
    async fn filter_counts_cover_whole_filtered_set() {
        let (service, _) = service();
        let rows = [
            ("00000000001", Department::It, true),
            ("00000000002", Department::It, false),
            ("00000000003", Department::It, true),
            ("00000000004", Department::Hr, true),
            ("00000000005", Department::It, false),
        ];
        for (national_id, department, enabled) in rows {
            service
                .create(input("E", national_id, department, enabled))
                .await
                .unwrap();
        }

        let result = service
            .list_by_filters(Some(Department::It), None, PageRequest::new(0, 1))
            .await
            .unwrap();
        assert_eq!(result.total_active, 2);
        assert_eq!(result.total_inactive, 2);
        assert_eq!(result.employees.content.len(), 1);
        assert_eq!(result.employees.total_elements, 4);

        let enabled_only = service
            .list_by_filters(None, Some(true), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(enabled_only.total_active, 3);
        assert_eq!(enabled_only.total_inactive, 0);

        let none = service
            .list_by_filters(Some(Department::Legal), None, PageRequest::default())
            .await
            .unwrap();
        assert_eq!((none.total_active, none.total_inactive), (0, 0));
        assert!(none.employees.content.is_empty());
    }

    /// Store whose lookups succeed but whose writes hit the unique index, as
    /// when a concurrent writer wins the race after the pre-check.
    struct RacingStore;

    #[async_trait]
    impl EmployeeStore for RacingStore {
        async fn find_all(&self) -> StoreResult<Vec<Employee>> {
            Ok(Vec::new())
        }
        async fn find_by_id(&self, id: EmployeeId) -> StoreResult<Option<Employee>> {
            Ok(Some(Employee {
                id,
                name: "Existing".into(),
                national_id: "00000000000".into(),
                department: Department::Hr,
                enabled: true,
            }))
        }
        async fn find_by_national_id(&self, _national_id: &str) -> StoreResult<Option<Employee>> {
            Ok(None)
        }
        async fn find_by_department_and_enabled(
            &self,
            _department: Option<Department>,
            _enabled: Option<bool>,
        ) -> StoreResult<Vec<Employee>> {
            Err(StoreError::Database(DbErr::Custom("connection reset".into())))
        }
        async fn save(&self, _record: EmployeeRecord) -> StoreResult<Employee> {
            Err(StoreError::UniqueViolation("idx_employees_national_id".into()))
        }
        async fn delete_by_id(&self, _id: EmployeeId) -> StoreResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn unique_violation_from_store_is_a_conflict() {
        let service = EmployeeService::new(Arc::new(RacingStore));
        let err = service
            .create(input("Test", "88888888888", Department::It, true))
            .await
            .unwrap_err();
        assert!(matches!(err, EmployeeError::Conflict));
    }

    #[tokio::test]
    async fn unique_violation_during_update_is_a_conflict() {
        let service = EmployeeService::new(Arc::new(RacingStore));
        let err = service
            .update(4, input("Test", "88888888888", Department::It, true))
            .await
            .unwrap_err();
        assert!(matches!(err, EmployeeError::Conflict));
        assert_eq!(err.to_string(), "national id already registered");
    }

    #[tokio::test]
    async fn storage_failures_are_reported_as_store_errors() {
        let service = EmployeeService::new(Arc::new(RacingStore));
        let err = service
            .list_by_filters(None, None, PageRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, EmployeeError::Store(StoreError::Database(_))));
        assert!(err.to_string().contains("connection reset"));
    }
}
