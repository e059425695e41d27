//! HR vertical slice: employee records, their validation, and the query service.
//!
//! The [`EmployeeService`] is stateless; persistence goes through an
//! [`EmployeeStore`], with a sea-orm implementation for real databases and an
//! in-memory one for development and tests.

pub mod mapper;
pub mod model;
pub mod page;
pub mod service;
pub mod store;
pub mod validation;

pub use model::{
    Department, Employee, EmployeeId, EmployeeInput, EmployeeQueryResult, EmployeeRecord,
    EmployeeRequest, EmployeeResponse, EmployeeStatusRequest,
};
pub use page::{Page, PageRequest, PaginationSettings};
pub use service::{EmployeeError, EmployeeResult, EmployeeService};
pub use store::{EmployeeStore, MemoryEmployeeStore, SeaOrmEmployeeStore, StoreError, StoreResult};
pub use validation::{FieldError, ValidationErrors};
