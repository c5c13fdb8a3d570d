//! Employee Model
//!
//! The record itself, the request body accepted by create/replace, and the
//! list filter. `EmployeeInput::into_fields` is the schema validation step
//! every write goes through before it reaches the store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Entity names (employee name, role title)
pub const MAX_NAME_LEN: usize = 200;

// ── Enumerations ────────────────────────────────────────────────────

/// Department an employee belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Marketing,
    HR,
    Finance,
    Sales,
    Operations,
}

impl Department {
    pub const ALL: [Department; 6] = [
        Department::Engineering,
        Department::Marketing,
        Department::HR,
        Department::Finance,
        Department::Sales,
        Department::Operations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Marketing => "Marketing",
            Department::HR => "HR",
            Department::Finance => "Finance",
            Department::Sales => "Sales",
            Department::Operations => "Operations",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("department", s))
    }
}

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub const ALL: [EmployeeStatus; 2] = [EmployeeStatus::Active, EmployeeStatus::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmployeeStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("status", s))
    }
}

/// A string that is not a member of an enumerated field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{value}` is not a valid {field}")]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

// ── Record ──────────────────────────────────────────────────────────

/// Stored employee record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub department: Department,
    pub role: String,
    pub salary: f64,
    #[serde(default)]
    pub status: EmployeeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Write payloads ──────────────────────────────────────────────────

/// Create / replace request body
///
/// Every field is optional on the wire so that a missing field is reported
/// as a validation problem rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<SalaryValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Salary as sent by a client: a JSON number or a numeric string (`"50000"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SalaryValue {
    Number(f64),
    Text(String),
}

impl SalaryValue {
    /// `None` for blank text
    fn to_number(&self) -> Option<Result<f64, std::num::ParseFloatError>> {
        match self {
            SalaryValue::Number(v) => Some(Ok(*v)),
            SalaryValue::Text(raw) => {
                let raw = raw.trim();
                (!raw.is_empty()).then(|| raw.parse())
            }
        }
    }
}

impl From<f64> for SalaryValue {
    fn from(value: f64) -> Self {
        SalaryValue::Number(value)
    }
}

/// Validated mutable fields of an employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EmployeeFields {
    #[validate(
        length(max = 200, message = "name is too long"),
        custom(function = "validate_not_blank", message = "name must not be empty")
    )]
    pub name: String,
    pub department: Department,
    #[validate(
        length(max = 200, message = "role is too long"),
        custom(function = "validate_not_blank", message = "role must not be empty")
    )]
    pub role: String,
    #[validate(range(min = 0.0, message = "salary must not be negative"))]
    pub salary: f64,
    pub status: EmployeeStatus,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// One or more schema violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Employee validation failed: {}", .problems.join("; "))]
pub struct SchemaError {
    pub problems: Vec<String>,
}

impl SchemaError {
    pub fn new(problems: Vec<String>) -> Self {
        Self { problems }
    }
}

impl From<validator::ValidationErrors> for SchemaError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut problems: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        problems.sort();
        Self { problems }
    }
}

impl EmployeeInput {
    /// Check required fields, enum membership and bounds
    pub fn into_fields(self) -> Result<EmployeeFields, SchemaError> {
        let mut problems = Vec::new();

        let name = required(self.name, "name", &mut problems);
        let role = required(self.role, "role", &mut problems);
        let department = match required(self.department, "department", &mut problems) {
            Some(raw) => raw
                .parse::<Department>()
                .map_err(|e| problems.push(e.to_string()))
                .ok(),
            None => None,
        };
        let salary = match self.salary.as_ref().and_then(SalaryValue::to_number) {
            Some(Ok(v)) if v.is_finite() => Some(v),
            Some(Ok(_)) => {
                problems.push("salary must be a finite number".to_string());
                None
            }
            Some(Err(_)) => {
                problems.push("salary must be a number".to_string());
                None
            }
            None => {
                problems.push("salary is required".to_string());
                None
            }
        };
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => Some(EmployeeStatus::default()),
            Some(raw) => raw
                .parse::<EmployeeStatus>()
                .map_err(|e| problems.push(e.to_string()))
                .ok(),
        };

        let (Some(name), Some(department), Some(role), Some(salary), Some(status)) =
            (name, department, role, salary, status)
        else {
            return Err(SchemaError::new(problems));
        };

        let fields = EmployeeFields {
            name,
            department,
            role,
            salary,
            status,
        };
        fields.validate()?;
        Ok(fields)
    }
}

fn required(value: Option<String>, field: &str, problems: &mut Vec<String>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            problems.push(format!("{field} is required"));
            None
        }
    }
}

impl From<EmployeeFields> for EmployeeInput {
    fn from(fields: EmployeeFields) -> Self {
        Self {
            name: Some(fields.name),
            department: Some(fields.department.to_string()),
            role: Some(fields.role),
            salary: Some(SalaryValue::Number(fields.salary)),
            status: Some(fields.status.to_string()),
        }
    }
}

// ── Listing filter ──────────────────────────────────────────────────

/// Optional predicates for the list operation, ANDed together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFilter {
    /// Case-insensitive substring of the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
}

/// Raw query-string form of [`EmployeeFilter`]
///
/// Empty values mean "no constraint".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeQuery {
    pub name: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
}

impl EmployeeQuery {
    pub fn into_filter(self) -> Result<EmployeeFilter, SchemaError> {
        let mut problems = Vec::new();

        let name = non_empty(self.name);
        let department = non_empty(self.department).and_then(|raw| {
            raw.parse::<Department>()
                .map_err(|e| problems.push(e.to_string()))
                .ok()
        });
        let status = non_empty(self.status).and_then(|raw| {
            raw.parse::<EmployeeStatus>()
                .map_err(|e| problems.push(e.to_string()))
                .ok()
        });

        if !problems.is_empty() {
            return Err(SchemaError::new(problems));
        }
        Ok(EmployeeFilter {
            name,
            department,
            status,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> EmployeeInput {
        EmployeeInput {
            name: Some("Jane".into()),
            department: Some("Sales".into()),
            role: Some("Rep".into()),
            salary: Some(SalaryValue::Number(50000.0)),
            status: None,
        }
    }

    #[test]
    fn test_valid_input_defaults_status_to_active() {
        let fields = jane().into_fields().unwrap();
        assert_eq!(fields.name, "Jane");
        assert_eq!(fields.department, Department::Sales);
        assert_eq!(fields.status, EmployeeStatus::Active);
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let err = EmployeeInput::default().into_fields().unwrap_err();
        assert_eq!(
            err.problems,
            vec![
                "name is required",
                "role is required",
                "department is required",
                "salary is required",
            ]
        );
    }

    #[test]
    fn test_unknown_department_rejected() {
        let input = EmployeeInput {
            department: Some("Legal".into()),
            ..jane()
        };
        let err = input.into_fields().unwrap_err();
        assert_eq!(err.problems, vec!["`Legal` is not a valid department"]);
    }

    #[test]
    fn test_department_match_is_case_sensitive() {
        assert!("sales".parse::<Department>().is_err());
        assert_eq!("HR".parse::<Department>().unwrap(), Department::HR);
    }

    #[test]
    fn test_negative_salary_rejected() {
        let input = EmployeeInput {
            salary: Some(SalaryValue::Number(-1.0)),
            ..jane()
        };
        let err = input.into_fields().unwrap_err();
        assert_eq!(err.problems, vec!["salary must not be negative"]);
        assert!(err.to_string().starts_with("Employee validation failed"));
    }

    #[test]
    fn test_zero_salary_allowed() {
        let input = EmployeeInput {
            salary: Some(SalaryValue::Number(0.0)),
            ..jane()
        };
        assert!(input.into_fields().is_ok());
    }

    #[test]
    fn test_numeric_string_salary_accepted() {
        let input: EmployeeInput = serde_json::from_str(
            r#"{"name":"Jane","department":"Sales","role":"Rep","salary":"50000","status":"Active"}"#,
        )
        .unwrap();
        assert_eq!(input.salary, Some(SalaryValue::Text("50000".into())));
        assert_eq!(input.into_fields().unwrap().salary, 50000.0);
    }

    #[test]
    fn test_text_salary_problems() {
        let with_salary = |raw: &str| EmployeeInput {
            salary: Some(SalaryValue::Text(raw.into())),
            ..jane()
        };
        let err = with_salary("lots").into_fields().unwrap_err();
        assert_eq!(err.problems, vec!["salary must be a number"]);
        let err = with_salary("  ").into_fields().unwrap_err();
        assert_eq!(err.problems, vec!["salary is required"]);
        let err = with_salary("inf").into_fields().unwrap_err();
        assert_eq!(err.problems, vec!["salary must be a finite number"]);
    }

    #[test]
    fn test_blank_name_rejected() {
        let input = EmployeeInput {
            name: Some("   ".into()),
            ..jane()
        };
        let err = input.into_fields().unwrap_err();
        assert_eq!(err.problems, vec!["name is required"]);
    }

    #[test]
    fn test_overlong_role_rejected() {
        let input = EmployeeInput {
            role: Some("x".repeat(MAX_NAME_LEN + 1)),
            ..jane()
        };
        let err = input.into_fields().unwrap_err();
        assert_eq!(err.problems, vec!["role is too long"]);
    }

    #[test]
    fn test_bad_status_rejected() {
        let input = EmployeeInput {
            status: Some("Retired".into()),
            ..jane()
        };
        assert!(input.into_fields().is_err());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let now = Utc::now();
        let employee = Employee {
            id: "abc".into(),
            name: "Ann".into(),
            department: Department::HR,
            role: "Recruiter".into(),
            salary: 42000.0,
            status: EmployeeStatus::Inactive,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["department"], "HR");
        assert_eq!(json["status"], "Inactive");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }

    #[test]
    fn test_query_ignores_empty_values() {
        let query = EmployeeQuery {
            name: Some(String::new()),
            department: Some(String::new()),
            status: Some("Active".into()),
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.name, None);
        assert_eq!(filter.department, None);
        assert_eq!(filter.status, Some(EmployeeStatus::Active));
    }

    #[test]
    fn test_query_rejects_unknown_department() {
        let query = EmployeeQuery {
            department: Some("Legal".into()),
            ..Default::default()
        };
        assert!(query.into_filter().is_err());
    }
}
