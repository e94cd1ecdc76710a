use super::{Confirm, FormErrors, LoadState, page_error};
use crate::api::HrmsApi;
use crate::models::{Employee, NewEmployee, RecordId};
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct EmployeeForm {
    pub open: bool,
    pub submitting: bool,
    pub values: NewEmployee,
    pub errors: FormErrors,
}

/// The row a delete acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub id: RecordId,
    pub employee_id: String,
    pub full_name: String,
}

impl DeleteTarget {
    pub fn prompt(&self) -> String {
        format!("Delete employee \"{}\" ({})?", self.full_name, self.employee_id)
    }
}

impl From<&Employee> for DeleteTarget {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            employee_id: employee.employee_id.clone(),
            full_name: employee.full_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Declined,
    Busy,
    Deleted,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct EmployeesPage {
    pub employees: Vec<Employee>,
    pub status: LoadState,
    pub error: Option<String>,
    pub form: EmployeeForm,
    pub deleting: Option<RecordId>,
}

impl EmployeesPage {
    pub fn is_loading(&self) -> bool {
        self.status == LoadState::Loading
    }

    pub async fn fetch_employees<A: HrmsApi>(&mut self, api: &A) {
        self.status = LoadState::Loading;
        self.error = None;
        match api.list_employees().await {
            Ok(employees) => {
                self.employees = employees;
                self.status = LoadState::Ready;
            }
            Err(err) => {
                self.error = Some(page_error(&err, "Failed to load employees."));
                self.status = LoadState::Failed;
            }
        }
    }

    pub fn toggle_form(&mut self) {
        self.form.open = !self.form.open;
    }

    /// Updates one form field and clears its inline error.
    pub fn handle_change(&mut self, field: &str, value: String) {
        let values = &mut self.form.values;
        let slot = match field {
            "employee_id" => &mut values.employee_id,
            "full_name" => &mut values.full_name,
            "email" => &mut values.email,
            "department" => &mut values.department,
            _ => return,
        };
        *slot = value;
        self.form.errors.clear_field(field);
    }

    /// Creates an employee from the form values. Returns whether it succeeded.
    pub async fn submit<A: HrmsApi>(&mut self, api: &A) -> bool {
        if self.form.submitting {
            return false;
        }
        self.form.errors.clear();
        self.form.submitting = true;
        let result = api.create_employee(&self.form.values).await;
        self.form.submitting = false;

        match result {
            Ok(()) => {
                info!(employee_id = %self.form.values.employee_id, "employee created");
                self.form.values = NewEmployee::default();
                self.form.open = false;
                self.fetch_employees(api).await;
                true
            }
            Err(err) => {
                warn!(error = %err, "employee create rejected");
                self.form.errors = FormErrors::from_error(&err);
                false
            }
        }
    }

    pub async fn delete<A: HrmsApi>(
        &mut self,
        api: &A,
        target: &DeleteTarget,
        confirm: &impl Confirm,
    ) -> DeleteOutcome {
        if self.deleting.is_some() {
            return DeleteOutcome::Busy;
        }
        if !confirm.confirm(&target.prompt()) {
            return DeleteOutcome::Declined;
        }

        self.deleting = Some(target.id.clone());
        let outcome = match api.delete_employee(&target.id).await {
            Ok(()) => {
                info!(id = %target.id, employee_id = %target.employee_id, "employee deleted");
                self.fetch_employees(api).await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                warn!(id = %target.id, error = %err, "employee delete failed");
                self.error = Some(page_error(&err, "Failed to delete employee."));
                DeleteOutcome::Failed
            }
        };
        self.deleting = None;
        outcome
    }
}
