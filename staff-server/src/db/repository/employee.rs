//! Employee Repository

use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared::{Department, Employee, EmployeeFields, EmployeeFilter, EmployeeInput, EmployeeStatus};
use surrealdb::engine::any::Any;
use surrealdb::{RecordId, Surreal};
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::schema::EMPLOYEE_TABLE;

/// Projection shared by every read; flattens the record id to its key and
/// datetimes to RFC 3339 strings.
const EMPLOYEE_FIELDS: &str = "record::id(id) AS id, name, department, role, salary, status, \
     <string>created_at AS created_at, <string>updated_at AS updated_at";

/// Employee row as projected by [`EMPLOYEE_FIELDS`]
#[derive(Debug, Deserialize)]
struct EmployeeRow {
    id: String,
    name: String,
    department: String,
    role: String,
    salary: f64,
    status: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = RepoError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let corrupt = |e: String| RepoError::Database(format!("Corrupt employee {}: {}", row.id, e));
        let department: Department = row.department.parse().map_err(|e| corrupt(format!("{e}")))?;
        let status: EmployeeStatus = row.status.parse().map_err(|e| corrupt(format!("{e}")))?;
        let created_at = parse_timestamp(&row.created_at).map_err(&corrupt)?;
        let updated_at = parse_timestamp(&row.updated_at).map_err(&corrupt)?;

        Ok(Employee {
            id: row.id,
            name: row.name,
            department,
            role: row.role,
            salary: row.salary,
            status,
            created_at,
            updated_at,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("bad timestamp `{value}`: {e}"))
}

fn record_id(id: &str) -> RecordId {
    RecordId::from_table_key(EMPLOYEE_TABLE, id.to_string())
}

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Any>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find employees matching every present predicate
    ///
    /// Name matches as a case-insensitive substring, department and status
    /// exactly. Results come back in store order.
    pub async fn find_all(&self, filter: EmployeeFilter) -> RepoResult<Vec<Employee>> {
        let mut conditions = Vec::new();
        if filter.name.is_some() {
            conditions.push("string::contains(string::lowercase(name), $name)");
        }
        if filter.department.is_some() {
            conditions.push("department = $department");
        }
        if filter.status.is_some() {
            conditions.push("status = $status");
        }

        let mut sql = format!("SELECT {EMPLOYEE_FIELDS} FROM {EMPLOYEE_TABLE}");
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        let mut query = self.base.db().query(sql);
        if let Some(name) = filter.name {
            query = query.bind(("name", name.to_lowercase()));
        }
        if let Some(department) = filter.department {
            query = query.bind(("department", department.as_str()));
        }
        if let Some(status) = filter.status {
            query = query.bind(("status", status.as_str()));
        }

        let rows: Vec<EmployeeRow> = query.await?.take(0)?;
        rows.into_iter().map(Employee::try_from).collect()
    }

    /// Find employee by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let rows: Vec<EmployeeRow> = self
            .base
            .db()
            .query(format!("SELECT {EMPLOYEE_FIELDS} FROM $thing"))
            .bind(("thing", record_id(id)))
            .await?
            .take(0)?;
        rows.into_iter().next().map(Employee::try_from).transpose()
    }

    /// Validate and create a new employee
    ///
    /// The store assigns the id and both timestamps.
    pub async fn create(&self, data: EmployeeInput) -> RepoResult<Employee> {
        let fields = data.into_fields()?;
        let id = Uuid::new_v4().simple().to_string();

        self.write("CREATE", &id, fields).await?;

        let created = self
            .find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))?;
        tracing::debug!(id = %created.id, "Employee created");
        Ok(created)
    }

    /// Replace all mutable fields of an existing employee
    ///
    /// `id` and `created_at` are preserved; `updated_at` is refreshed.
    pub async fn replace(&self, id: &str, data: EmployeeInput) -> RepoResult<Employee> {
        let fields = data.into_fields()?;
        self.ensure_exists(id).await?;

        self.write("UPDATE", id, fields).await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
    }

    /// Hard delete an employee
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        self.ensure_exists(id).await?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", record_id(id)))
            .await?
            .check()?;
        Ok(())
    }

    async fn ensure_exists(&self, id: &str) -> RepoResult<()> {
        match self.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound(format!("Employee {} not found", id))),
        }
    }

    /// `CREATE` or `UPDATE` the record, setting every mutable field
    async fn write(&self, verb: &'static str, id: &str, fields: EmployeeFields) -> RepoResult<()> {
        self.base
            .db()
            .query(format!(
                r#"{verb} $thing SET
                    name = $name,
                    department = $department,
                    role = $role,
                    salary = $salary,
                    status = $status
                RETURN NONE"#
            ))
            .bind(("thing", record_id(id)))
            .bind(("name", fields.name))
            .bind(("department", fields.department.as_str()))
            .bind(("role", fields.role))
            .bind(("salary", fields.salary))
            .bind(("status", fields.status.as_str()))
            .await?
            .check()?;
        Ok(())
    }
}
