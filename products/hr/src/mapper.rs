//! Conversions between request, stored record, and response shapes.

use entity::employees;
use sea_orm::{
    ActiveValue::{NotSet, Set},
    IntoActiveModel,
};

use crate::model::{Department, Employee, EmployeeInput, EmployeeRecord, EmployeeResponse};

impl From<employees::Department> for Department {
    fn from(value: employees::Department) -> Self {
        match value {
            employees::Department::It => Department::It,
            employees::Department::Hr => Department::Hr,
            employees::Department::Finance => Department::Finance,
            employees::Department::Sales => Department::Sales,
            employees::Department::Marketing => Department::Marketing,
            employees::Department::Operations => Department::Operations,
            employees::Department::Legal => Department::Legal,
        }
    }
}

impl From<Department> for employees::Department {
    fn from(value: Department) -> Self {
        match value {
            Department::It => employees::Department::It,
            Department::Hr => employees::Department::Hr,
            Department::Finance => employees::Department::Finance,
            Department::Sales => employees::Department::Sales,
            Department::Marketing => employees::Department::Marketing,
            Department::Operations => employees::Department::Operations,
            Department::Legal => employees::Department::Legal,
        }
    }
}

impl From<employees::Model> for Employee {
    fn from(model: employees::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            national_id: model.national_id,
            department: model.department.into(),
            enabled: model.enabled,
        }
    }
}

impl IntoActiveModel<employees::ActiveModel> for EmployeeRecord {
    fn into_active_model(self) -> employees::ActiveModel {
        employees::ActiveModel {
            id: self.id.map_or(NotSet, Set),
            name: Set(self.name),
            national_id: Set(self.national_id),
            department: Set(self.department.into()),
            enabled: Set(self.enabled),
        }
    }
}

/// New record from validated input; the store assigns the id.
impl From<EmployeeInput> for EmployeeRecord {
    fn from(input: EmployeeInput) -> Self {
        Self {
            id: None,
            name: input.name,
            national_id: input.national_id,
            department: input.department,
            enabled: input.enabled,
        }
    }
}

impl From<Employee> for EmployeeRecord {
    fn from(employee: Employee) -> Self {
        Self {
            id: Some(employee.id),
            name: employee.name,
            national_id: employee.national_id,
            department: employee.department,
            enabled: employee.enabled,
        }
    }
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            national_id: employee.national_id,
            department: employee.department,
            enabled: employee.enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    fn employee() -> Employee {
        Employee {
            id: 3,
            name: "Test".into(),
            national_id: "88888888888".into(),
            department: Department::Finance,
            enabled: false,
        }
    }

    #[test]
    fn every_department_survives_the_entity_enum() {
        for department in Department::ALL {
            let stored: employees::Department = department.into();
            assert_eq!(Department::from(stored), department);
        }
    }

    #[test]
    fn new_records_leave_id_unset() {
        let record = EmployeeRecord::from(EmployeeInput {
            name: "Test".into(),
            national_id: "88888888888".into(),
            department: Department::It,
            enabled: true,
        });
        assert_eq!(record.id, None);
        let active = record.into_active_model();
        assert!(matches!(active.id, ActiveValue::NotSet));
        assert_eq!(active.department, Set(employees::Department::It));
    }

    #[test]
    fn existing_records_carry_their_id() {
        let active = EmployeeRecord::from(employee()).into_active_model();
        assert_eq!(active.id, Set(3));
        assert_eq!(active.enabled, Set(false));
    }

    #[test]
    fn response_copies_every_field() {
        let response = EmployeeResponse::from(employee());
        assert_eq!(response.id, 3);
        assert_eq!(response.national_id, "88888888888");
        assert_eq!(response.department, Department::Finance);
        assert!(!response.enabled);
    }
}
