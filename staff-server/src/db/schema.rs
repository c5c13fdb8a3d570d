//! SurrealDB schema
//!
//! The Rust-side validation in `EmployeeInput::into_fields` runs before every
//! write; the `ASSERT` clauses here hold the same invariants at the storage
//! layer. `created_at` keeps its first value across updates, `updated_at` is
//! recomputed on every write.

use shared::{Department, EmployeeStatus};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

pub const EMPLOYEE_TABLE: &str = "employee";

fn quoted<T: ToString>(values: impl IntoIterator<Item = T>) -> String {
    values
        .into_iter()
        .map(|v| format!("'{}'", v.to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the `DEFINE` statements for the employee table
pub fn employee_schema() -> String {
    let departments = quoted(Department::ALL);
    let statuses = quoted(EmployeeStatus::ALL);
    let default_status = EmployeeStatus::default();

    format!(
        r#"
DEFINE TABLE IF NOT EXISTS {EMPLOYEE_TABLE} SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS name ON {EMPLOYEE_TABLE} TYPE string
    ASSERT string::len(string::trim($value)) > 0;
DEFINE FIELD IF NOT EXISTS department ON {EMPLOYEE_TABLE} TYPE string
    ASSERT $value INSIDE [{departments}];
DEFINE FIELD IF NOT EXISTS role ON {EMPLOYEE_TABLE} TYPE string
    ASSERT string::len(string::trim($value)) > 0;
DEFINE FIELD IF NOT EXISTS salary ON {EMPLOYEE_TABLE} TYPE number
    ASSERT $value >= 0;
DEFINE FIELD IF NOT EXISTS status ON {EMPLOYEE_TABLE} TYPE string
    DEFAULT '{default_status}'
    ASSERT $value INSIDE [{statuses}];
DEFINE FIELD IF NOT EXISTS created_at ON {EMPLOYEE_TABLE} TYPE datetime
    VALUE $before OR time::now();
DEFINE FIELD IF NOT EXISTS updated_at ON {EMPLOYEE_TABLE} TYPE datetime
    VALUE time::now();
DEFINE INDEX IF NOT EXISTS {EMPLOYEE_TABLE}_department ON {EMPLOYEE_TABLE} FIELDS department;
DEFINE INDEX IF NOT EXISTS {EMPLOYEE_TABLE}_status ON {EMPLOYEE_TABLE} FIELDS status;
"#
    )
}

/// Apply the schema; safe to run on every startup
pub async fn apply(db: &Surreal<Any>) -> Result<(), surrealdb::Error> {
    db.query(employee_schema()).await?.check()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_every_department() {
        let schema = employee_schema();
        for department in Department::ALL {
            assert!(schema.contains(&format!("'{department}'")));
        }
        assert!(schema.contains("DEFAULT 'Active'"));
    }
}
