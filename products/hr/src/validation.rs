//! Field-level preconditions checked before a request reaches the service.

use thiserror::Error;

use crate::model::{EmployeeInput, EmployeeRequest};

/// Required length of a national id.
pub const NATIONAL_ID_LEN: usize = 11;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Error)]
#[error("{} invalid field(s)", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl EmployeeRequest {
    /// Check every field and return all failures at once.
    pub fn validate(self) -> Result<EmployeeInput, ValidationErrors> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "must not be blank"));
        }

        if self.national_id.trim().is_empty() {
            errors.push(FieldError::new("nationalId", "must not be blank"));
        } else if self.national_id.chars().count() != NATIONAL_ID_LEN {
            errors.push(FieldError::new(
                "nationalId",
                format!("size must be {NATIONAL_ID_LEN}"),
            ));
        }

        if self.department.is_none() {
            errors.push(FieldError::new("department", "must not be null"));
        }

        match self.department {
            Some(department) if errors.is_empty() => Ok(EmployeeInput {
                name: self.name,
                national_id: self.national_id,
                department,
                enabled: self.enabled,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Department;

    fn request(name: &str, national_id: &str, department: Option<Department>) -> EmployeeRequest {
        EmployeeRequest {
            name: name.into(),
            national_id: national_id.into(),
            department,
            enabled: true,
        }
    }

    #[test]
    fn valid_request_becomes_input() {
        let input = request("Test", "88888888888", Some(Department::It))
            .validate()
            .unwrap();
        assert_eq!(input.name, "Test");
        assert_eq!(input.national_id, "88888888888");
        assert_eq!(input.department, Department::It);
        assert!(input.enabled);
    }

    #[test]
    fn collects_every_failure() {
        let errors = request(" ", "", None).validate().unwrap_err();
        assert_eq!(
            errors.messages(),
            vec![
                "name: must not be blank",
                "nationalId: must not be blank",
                "department: must not be null",
            ]
        );
    }

    #[test]
    fn national_id_must_have_exact_length() {
        let errors = request("Test", "123", Some(Department::Hr))
            .validate()
            .unwrap_err();
        let fields: Vec<_> = errors.fields().map(|e| e.field).collect();
        assert_eq!(fields, vec!["nationalId"]);
        assert_eq!(errors.messages(), vec!["nationalId: size must be 11"]);
    }
}
