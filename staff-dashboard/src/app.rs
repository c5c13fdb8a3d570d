//! Dashboard state machine
//!
//! Key presses and request outcomes go in, [`Command`]s come out. Nothing in
//! here touches the network or the terminal.
//!
//! # 状态
//!
//! - 过滤条件: 姓名子串 / 部门 / 状态 (All / Active / Inactive)
//! - 当前记录集与选中行
//! - 弹窗: 关闭，或打开并持有表单和正在编辑的记录 id
//! - 最近一条通知

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use shared::{Department, Employee, EmployeeFilter, EmployeeInput, EmployeeStatus};
use staff_client::ClientError;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::form::EmployeeForm;

/// Side effect requested by the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fetch(EmployeeFilter),
    Create(EmployeeInput),
    Update(String, EmployeeInput),
    Delete(String),
}

/// Result of a [`Command`], fed back through [`Dashboard::apply`]
#[derive(Debug)]
pub enum Outcome {
    Fetched(Result<Vec<Employee>, ClientError>),
    Created(Result<Employee, ClientError>),
    Updated(Result<Employee, ClientError>),
    Deleted(Result<(), ClientError>),
}

/// Status filter selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Inactive,
            StatusFilter::Inactive => StatusFilter::All,
        }
    }

    pub fn as_status(self) -> Option<EmployeeStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Active => Some(EmployeeStatus::Active),
            StatusFilter::Inactive => Some(EmployeeStatus::Inactive),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Active => "Active only",
            StatusFilter::Inactive => "Inactive only",
        }
    }
}

/// `None` → Engineering → … → Operations → `None`
pub fn cycle_department(current: Option<Department>, forward: bool) -> Option<Department> {
    let options: Vec<Option<Department>> = std::iter::once(None)
        .chain(Department::ALL.into_iter().map(Some))
        .collect();
    let len = options.len();
    let pos = options.iter().position(|d| *d == current).unwrap_or(0);
    let next = if forward { pos + 1 } else { pos + len - 1 };
    options[next % len]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Create / edit overlay
#[derive(Debug, Clone)]
pub struct Overlay {
    pub form: EmployeeForm,
    /// Id of the record being edited; `None` when adding
    pub editing: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browse,
    /// Typing into the name filter
    Search,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    pub name_filter: Input,
    pub department: Option<Department>,
    pub status: StatusFilter,
    pub employees: Vec<Employee>,
    pub selected: Option<usize>,
    pub overlay: Option<Overlay>,
    pub notice: Option<Notice>,
    pub mode: Mode,
    /// Fetches sent but not yet answered
    pub pending_fetches: usize,
    quit: bool,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial load
    pub fn start(&mut self) -> Vec<Command> {
        vec![self.fetch()]
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Filter built from the current controls; empty controls are omitted
    pub fn filter(&self) -> EmployeeFilter {
        let name = self.name_filter.value();
        EmployeeFilter {
            name: (!name.is_empty()).then(|| name.to_string()),
            department: self.department,
            status: self.status.as_status(),
        }
    }

    fn fetch(&mut self) -> Command {
        self.pending_fetches += 1;
        Command::Fetch(self.filter())
    }

    pub fn selected_employee(&self) -> Option<&Employee> {
        self.selected.and_then(|i| self.employees.get(i))
    }

    // ========== Input ==========

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return Vec::new();
        }

        if self.overlay.is_some() {
            return self.handle_overlay_key(key);
        }

        match self.mode {
            Mode::Search => self.handle_search_key(key),
            Mode::Browse => self.handle_browse_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Vec<Command> {
        match key.code {
            KeyCode::Char('q') => {
                self.quit = true;
                Vec::new()
            }
            KeyCode::Char('/') => {
                self.mode = Mode::Search;
                Vec::new()
            }
            KeyCode::Char('d') => self.set_department(cycle_department(self.department, true)),
            KeyCode::Char('D') => self.set_department(cycle_department(self.department, false)),
            KeyCode::Char('s') => {
                self.status = self.status.next();
                vec![self.fetch()]
            }
            KeyCode::Char('r') => vec![self.fetch()],
            KeyCode::Char('a') => {
                self.open_overlay(None);
                Vec::new()
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(employee) = self.selected_employee().cloned() {
                    self.open_overlay(Some(&employee));
                }
                Vec::new()
            }
            KeyCode::Char('x') | KeyCode::Delete => match self.selected_employee() {
                Some(employee) => vec![Command::Delete(employee.id.clone())],
                None => Vec::new(),
            },
            KeyCode::Up => {
                self.move_selection(-1);
                Vec::new()
            }
            KeyCode::Down => {
                self.move_selection(1);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Vec<Command> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.mode = Mode::Browse;
                Vec::new()
            }
            _ => {
                let before = self.name_filter.value().to_string();
                self.name_filter.handle_event(&Event::Key(key));
                if self.name_filter.value() != before {
                    vec![self.fetch()]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) -> Vec<Command> {
        match key.code {
            KeyCode::Esc => {
                self.overlay = None;
                Vec::new()
            }
            KeyCode::Enter => self.submit(),
            _ => {
                if let Some(overlay) = self.overlay.as_mut() {
                    overlay.form.handle_key(key);
                }
                Vec::new()
            }
        }
    }

    fn set_department(&mut self, department: Option<Department>) -> Vec<Command> {
        self.department = department;
        vec![self.fetch()]
    }

    fn move_selection(&mut self, delta: isize) {
        if self.employees.is_empty() {
            self.selected = None;
            return;
        }
        let last = self.employees.len() as isize - 1;
        let current = self.selected.map(|i| i as isize).unwrap_or(-1);
        self.selected = Some((current + delta).clamp(0, last) as usize);
    }

    // ========== Overlay ==========

    /// Empty form for `None`, pre-filled form for an existing record
    pub fn open_overlay(&mut self, employee: Option<&Employee>) {
        self.overlay = Some(match employee {
            Some(e) => Overlay {
                form: EmployeeForm::from_employee(e),
                editing: Some(e.id.clone()),
            },
            None => Overlay {
                form: EmployeeForm::empty(),
                editing: None,
            },
        });
    }

    /// Validate locally and emit a create or update
    pub fn submit(&mut self) -> Vec<Command> {
        let Some(overlay) = self.overlay.as_ref() else {
            return Vec::new();
        };

        match overlay.form.to_input() {
            Ok(input) => match &overlay.editing {
                Some(id) => vec![Command::Update(id.clone(), input)],
                None => vec![Command::Create(input)],
            },
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
                Vec::new()
            }
        }
    }

    // ========== Outcomes ==========

    pub fn apply(&mut self, outcome: Outcome) -> Vec<Command> {
        match outcome {
            Outcome::Fetched(result) => {
                self.pending_fetches = self.pending_fetches.saturating_sub(1);
                match result {
                    Ok(employees) => {
                        tracing::debug!(count = employees.len(), "Employees loaded");
                        self.set_employees(employees);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Fetch failed");
                        self.notice = Some(Notice::error("Error fetching employees"));
                    }
                }
                Vec::new()
            }
            Outcome::Created(result) => self.saved(result, "Employee added"),
            Outcome::Updated(result) => self.saved(result, "Employee updated"),
            Outcome::Deleted(Ok(())) => {
                tracing::info!("Employee deleted");
                self.notice = Some(Notice::info("Employee deleted"));
                vec![self.fetch()]
            }
            Outcome::Deleted(Err(e)) => {
                tracing::warn!(error = %e, "Delete failed");
                self.notice = Some(Notice::error("Delete failed"));
                Vec::new()
            }
        }
    }

    fn saved(&mut self, result: Result<Employee, ClientError>, message: &str) -> Vec<Command> {
        match result {
            Ok(employee) => {
                tracing::info!(id = %employee.id, name = %employee.name, "{}", message);
                self.overlay = None;
                self.notice = Some(Notice::info(message));
                vec![self.fetch()]
            }
            Err(e) => {
                tracing::warn!(error = %e, "Save failed");
                self.notice = Some(Notice::error("Failed to save employee"));
                Vec::new()
            }
        }
    }

    fn set_employees(&mut self, employees: Vec<Employee>) {
        self.employees = employees;
        self.selected = if self.employees.is_empty() {
            None
        } else {
            Some(self.selected.unwrap_or(0).min(self.employees.len() - 1))
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::SalaryValue;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn employee(id: &str, name: &str, department: Department) -> Employee {
        let now = "2024-01-01T00:00:00Z".parse().unwrap();
        Employee {
            id: id.into(),
            name: name.into(),
            department,
            role: "Rep".into(),
            salary: 50000.0,
            status: EmployeeStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    fn loaded() -> Dashboard {
        let mut app = Dashboard::new();
        app.start();
        app.apply(Outcome::Fetched(Ok(vec![
            employee("1", "Ann", Department::HR),
            employee("2", "Bob", Department::Engineering),
        ])));
        app
    }

    #[test]
    fn test_start_fetches_unfiltered() {
        let mut app = Dashboard::new();
        assert_eq!(app.start(), vec![Command::Fetch(EmployeeFilter::default())]);
        assert_eq!(app.pending_fetches, 1);
    }

    #[test]
    fn test_typing_in_search_fetches_each_change() {
        let mut app = loaded();
        assert!(app.handle_key(key(KeyCode::Char('/'))).is_empty());
        assert_eq!(app.mode, Mode::Search);

        let cmds = app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(
            cmds,
            vec![Command::Fetch(EmployeeFilter {
                name: Some("a".into()),
                ..Default::default()
            })]
        );
        let cmds = app.handle_key(key(KeyCode::Char('n')));
        assert!(matches!(&cmds[..], [Command::Fetch(f)] if f.name.as_deref() == Some("an")));

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Browse);
    }

    #[test]
    fn test_department_and_status_changes_fetch() {
        let mut app = loaded();

        let cmds = app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(
            cmds,
            vec![Command::Fetch(EmployeeFilter {
                department: Some(Department::Engineering),
                ..Default::default()
            })]
        );

        let cmds = app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(
            cmds,
            vec![Command::Fetch(EmployeeFilter {
                department: Some(Department::Engineering),
                status: Some(EmployeeStatus::Active),
                ..Default::default()
            })]
        );

        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.filter().status, Some(EmployeeStatus::Inactive));
        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.filter().status, None);
    }

    #[test]
    fn test_cycle_department_wraps_through_all() {
        assert_eq!(cycle_department(None, true), Some(Department::Engineering));
        assert_eq!(cycle_department(Some(Department::Operations), true), None);
        assert_eq!(cycle_department(None, false), Some(Department::Operations));
        assert_eq!(cycle_department(Some(Department::Engineering), false), None);
        assert_eq!(
            cycle_department(Some(Department::HR), false),
            Some(Department::Marketing)
        );
    }

    #[test]
    fn test_incomplete_form_shows_message_and_emits_nothing() {
        let mut app = loaded();
        app.handle_key(key(KeyCode::Char('a')));
        assert!(app.overlay.is_some());

        let cmds = app.handle_key(key(KeyCode::Enter));
        assert!(cmds.is_empty());
        assert_eq!(
            app.notice,
            Some(Notice::error("Please fill in all required fields"))
        );
        assert!(app.overlay.is_some());
    }

    #[test]
    fn test_edit_prefills_and_submits_update() {
        let mut app = loaded();
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected, Some(1));

        app.handle_key(key(KeyCode::Char('e')));
        let overlay = app.overlay.as_ref().unwrap();
        assert_eq!(overlay.editing.as_deref(), Some("2"));
        assert_eq!(overlay.form.name.value(), "Bob");
        assert_eq!(overlay.form.department, Some(Department::Engineering));

        let cmds = app.handle_key(key(KeyCode::Enter));
        match &cmds[..] {
            [Command::Update(id, input)] => {
                assert_eq!(id, "2");
                assert_eq!(input.name.as_deref(), Some("Bob"));
                assert_eq!(input.salary, Some(SalaryValue::Number(50000.0)));
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn test_successful_save_closes_overlay_and_refetches() {
        let mut app = loaded();
        app.open_overlay(None);

        let cmds = app.apply(Outcome::Created(Ok(employee("3", "Jane", Department::Sales))));
        assert!(app.overlay.is_none());
        assert_eq!(app.notice, Some(Notice::info("Employee added")));
        assert_eq!(cmds, vec![Command::Fetch(EmployeeFilter::default())]);

        let employee = app.employees[0].clone();
        app.open_overlay(Some(&employee));
        app.apply(Outcome::Updated(Ok(employee)));
        assert_eq!(app.notice, Some(Notice::info("Employee updated")));
    }

    #[test]
    fn test_failed_save_keeps_overlay_open() {
        let mut app = loaded();
        app.open_overlay(None);

        let cmds = app.apply(Outcome::Created(Err(ClientError::Validation(
            "salary must not be negative".into(),
        ))));
        assert!(cmds.is_empty());
        assert!(app.overlay.is_some());
        assert_eq!(app.notice, Some(Notice::error("Failed to save employee")));
    }

    #[test]
    fn test_delete_selected() {
        let mut app = loaded();
        let cmds = app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(cmds, vec![Command::Delete("1".into())]);

        let cmds = app.apply(Outcome::Deleted(Ok(())));
        assert_eq!(app.notice, Some(Notice::info("Employee deleted")));
        assert!(matches!(&cmds[..], [Command::Fetch(_)]));

        let cmds = app.apply(Outcome::Deleted(Err(ClientError::NotFound("gone".into()))));
        assert!(cmds.is_empty());
        assert_eq!(app.notice, Some(Notice::error("Delete failed")));
    }

    #[test]
    fn test_fetch_failure_shows_generic_message_and_keeps_rows() {
        let mut app = loaded();
        app.apply(Outcome::Fetched(Err(ClientError::Internal("boom".into()))));
        assert_eq!(app.notice, Some(Notice::error("Error fetching employees")));
        assert_eq!(app.employees.len(), 2);
    }

    #[test]
    fn test_last_response_wins() {
        let mut app = loaded();
        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Char('d')));

        // Responses arrive out of order; whichever lands last is shown
        app.apply(Outcome::Fetched(Ok(vec![employee("9", "Zed", Department::Marketing)])));
        app.apply(Outcome::Fetched(Ok(vec![employee("2", "Bob", Department::Engineering)])));
        assert_eq!(app.employees.len(), 1);
        assert_eq!(app.employees[0].name, "Bob");
        assert_eq!(app.pending_fetches, 0);
    }

    #[test]
    fn test_selection_clamps_after_fetch() {
        let mut app = loaded();
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected, Some(1));

        app.apply(Outcome::Fetched(Ok(vec![employee("1", "Ann", Department::HR)])));
        assert_eq!(app.selected, Some(0));

        app.apply(Outcome::Fetched(Ok(Vec::new())));
        assert_eq!(app.selected, None);
        assert!(app.handle_key(key(KeyCode::Char('x'))).is_empty());
    }

    #[test]
    fn test_quit() {
        let mut app = loaded();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }
}
