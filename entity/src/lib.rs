//! sea-orm entities for the employee records service.

pub mod employees;
