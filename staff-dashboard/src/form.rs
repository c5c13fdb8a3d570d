//! Create / edit overlay form

use crossterm::event::{Event, KeyCode, KeyEvent};
use shared::{Department, Employee, EmployeeInput, EmployeeStatus, SalaryValue};
use thiserror::Error;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::app::cycle_department;

/// Form field order (Tab / Shift-Tab)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Department,
    Role,
    Salary,
    Status,
}

impl FormField {
    const ORDER: [FormField; 5] = [
        FormField::Name,
        FormField::Department,
        FormField::Role,
        FormField::Salary,
        FormField::Status,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Department => "Department",
            FormField::Role => "Role",
            FormField::Salary => "Salary",
            FormField::Status => "Status",
        }
    }
}

/// Rejected before anything is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all required fields")]
    MissingFields,
    #[error("Salary must be a number")]
    InvalidSalary,
}

#[derive(Debug, Clone)]
pub struct EmployeeForm {
    pub name: Input,
    /// `None` = "Select Department"
    pub department: Option<Department>,
    pub role: Input,
    pub salary: Input,
    pub status: EmployeeStatus,
    pub focus: FormField,
}

impl EmployeeForm {
    /// Blank form, status Active
    pub fn empty() -> Self {
        Self {
            name: Input::default(),
            department: None,
            role: Input::default(),
            salary: Input::default(),
            status: EmployeeStatus::Active,
            focus: FormField::Name,
        }
    }

    /// Form pre-filled from an existing record
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            name: Input::new(employee.name.clone()),
            department: Some(employee.department),
            role: Input::new(employee.role.clone()),
            salary: Input::new(employee.salary.to_string()),
            status: employee.status,
            focus: FormField::Name,
        }
    }

    fn focused_input(&mut self) -> Option<&mut Input> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Role => Some(&mut self.role),
            FormField::Salary => Some(&mut self.salary),
            FormField::Department | FormField::Status => None,
        }
    }

    /// Field navigation and editing; Enter / Esc are handled by the caller
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Left | KeyCode::Right
                if matches!(self.focus, FormField::Department | FormField::Status) =>
            {
                let forward = key.code == KeyCode::Right;
                match self.focus {
                    FormField::Department => {
                        self.department = cycle_department(self.department, forward);
                    }
                    _ => {
                        self.status = match self.status {
                            EmployeeStatus::Active => EmployeeStatus::Inactive,
                            EmployeeStatus::Inactive => EmployeeStatus::Active,
                        };
                    }
                }
            }
            _ => {
                if let Some(input) = self.focused_input() {
                    input.handle_event(&Event::Key(key));
                }
            }
        }
    }

    /// Request body for create / replace
    pub fn to_input(&self) -> Result<EmployeeInput, FormError> {
        let name = self.name.value();
        let role = self.role.value();
        let salary = self.salary.value().trim();

        let Some(department) = self.department else {
            return Err(FormError::MissingFields);
        };
        if name.is_empty() || role.is_empty() || salary.is_empty() {
            return Err(FormError::MissingFields);
        }
        let salary = salary
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or(FormError::InvalidSalary)?;

        Ok(EmployeeInput {
            name: Some(name.to_string()),
            department: Some(department.to_string()),
            role: Some(role.to_string()),
            salary: Some(SalaryValue::Number(salary)),
            status: Some(self.status.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn ann() -> Employee {
        let now = "2024-01-01T00:00:00Z".parse().unwrap();
        Employee {
            id: "abc".into(),
            name: "Ann".into(),
            department: Department::HR,
            role: "Recruiter".into(),
            salary: 42000.0,
            status: EmployeeStatus::Inactive,
            created_at: now,
            updated_at: now,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut EmployeeForm, text: &str) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_empty_form_defaults() {
        let form = EmployeeForm::empty();
        assert_eq!(form.status, EmployeeStatus::Active);
        assert_eq!(form.department, None);
        assert_eq!(form.focus, FormField::Name);
        assert_eq!(form.to_input(), Err(FormError::MissingFields));
    }

    #[test]
    fn test_from_employee_prefills() {
        let form = EmployeeForm::from_employee(&ann());
        assert_eq!(form.name.value(), "Ann");
        assert_eq!(form.department, Some(Department::HR));
        assert_eq!(form.role.value(), "Recruiter");
        assert_eq!(form.salary.value(), "42000");
        assert_eq!(form.status, EmployeeStatus::Inactive);

        let input = form.to_input().unwrap();
        assert_eq!(input.salary, Some(SalaryValue::Number(42000.0)));
        assert_eq!(input.status.as_deref(), Some("Inactive"));
    }

    #[test]
    fn test_typing_and_cycling() {
        let mut form = EmployeeForm::empty();
        type_text(&mut form, "Jane");
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus, FormField::Department);
        // Engineering, Marketing, HR, Finance, Sales
        for _ in 0..5 {
            form.handle_key(key(KeyCode::Right));
        }
        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, "Rep");
        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, "50000");

        let input = form.to_input().unwrap();
        assert_eq!(input.name.as_deref(), Some("Jane"));
        assert_eq!(input.department.as_deref(), Some("Sales"));
        assert_eq!(input.role.as_deref(), Some("Rep"));
        assert_eq!(input.salary, Some(SalaryValue::Number(50000.0)));
        assert_eq!(input.status.as_deref(), Some("Active"));
    }

    #[test]
    fn test_back_tab_wraps() {
        let mut form = EmployeeForm::empty();
        form.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(form.focus, FormField::Status);
        form.handle_key(key(KeyCode::Left));
        assert_eq!(form.status, EmployeeStatus::Inactive);
    }

    #[test]
    fn test_non_numeric_salary_rejected() {
        let mut form = EmployeeForm::from_employee(&ann());
        for raw in ["lots", "NaN", "inf", "-infinity"] {
            form.salary = Input::new(raw.into());
            assert_eq!(form.to_input(), Err(FormError::InvalidSalary), "{raw}");
        }
    }

    #[test]
    fn test_zero_salary_counts_as_filled() {
        let mut form = EmployeeForm::from_employee(&ann());
        form.salary = Input::new("0".into());
        assert_eq!(
            form.to_input().unwrap().salary,
            Some(SalaryValue::Number(0.0))
        );
    }
}
