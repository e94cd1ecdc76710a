use crate::api::HrmsApi;
use crate::api::client::with_query;
use crate::errors::ApiError;
use crate::models::{
    AttendanceQuery, AttendanceRecord, AttendanceStatus, Employee, NewAttendance, NewEmployee,
    RecordId,
};
use crate::stats::{PresentDays, present_days_by_employee};
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Mutex;

#[derive(Default)]
struct Store {
    employees: Vec<Employee>,
    records: Vec<AttendanceRecord>,
    next_id: u64,
    calls: Vec<String>,
    fail_lists: bool,
    fail_employees: bool,
}

/// In-memory backend for view-model tests.
#[derive(Default)]
pub(crate) struct FakeApi {
    store: Mutex<Store>,
}

impl FakeApi {
    pub(crate) fn seeded() -> Self {
        let api = Self::default();
        {
            let mut store = api.store.lock().unwrap();
            store.next_id = 100;
            store.employees = vec![
                employee(1, "E001", "Ada Lovelace"),
                employee(2, "E002", "Grace Hopper"),
            ];
        }
        api
    }

    /// Five `Present` days for E001, two of them on 2024-01-01's filter, plus
    /// one `Absent` day for E002.
    pub(crate) fn with_history() -> Self {
        let api = Self::seeded();
        {
            let mut store = api.store.lock().unwrap();
            let day = |d: u32| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
            store.records = vec![
                record(10, "E001", day(1), AttendanceStatus::Present),
                record(11, "E001", day(1), AttendanceStatus::Present),
                record(12, "E001", day(2), AttendanceStatus::Present),
                record(13, "E001", day(3), AttendanceStatus::Present),
                record(14, "E001", day(4), AttendanceStatus::Present),
                record(15, "E002", day(4), AttendanceStatus::Absent),
            ];
        }
        api
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.store.lock().unwrap().calls.clone()
    }

    pub(crate) fn all_records(&self) -> Vec<AttendanceRecord> {
        self.store.lock().unwrap().records.clone()
    }

    pub(crate) fn fail_lists(&self, fail: bool) {
        self.store.lock().unwrap().fail_lists = fail;
    }

    pub(crate) fn fail_employees(&self, fail: bool) {
        self.store.lock().unwrap().fail_employees = fail;
    }
}

fn employee(id: u64, code: &str, name: &str) -> Employee {
    Employee {
        id: RecordId::new(id.to_string()),
        employee_id: code.to_string(),
        full_name: name.to_string(),
        email: format!("{}@example.com", code.to_lowercase()),
        department: "Engineering".to_string(),
    }
}

fn record(id: u64, code: &str, date: NaiveDate, status: AttendanceStatus) -> AttendanceRecord {
    AttendanceRecord {
        id: RecordId::new(id.to_string()),
        employee_id: code.to_string(),
        date,
        status,
        employee_name: String::new(),
    }
}

fn unavailable() -> ApiError {
    ApiError::Server {
        status: StatusCode::SERVICE_UNAVAILABLE,
        message: "backend unavailable".to_string(),
        details: None,
    }
}

fn required(fields: &[&str]) -> ApiError {
    let details: serde_json::Map<String, serde_json::Value> = fields
        .iter()
        .map(|field| (field.to_string(), json!("required")))
        .collect();
    ApiError::from_response(
        StatusCode::BAD_REQUEST,
        &json!({ "error": "Invalid", "details": details }),
    )
}

impl HrmsApi for FakeApi {
    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        let mut store = self.store.lock().unwrap();
        store.calls.push("GET employees".to_string());
        if store.fail_lists || store.fail_employees {
            return Err(unavailable());
        }
        Ok(store.employees.clone())
    }

    async fn create_employee(&self, new: &NewEmployee) -> Result<(), ApiError> {
        let mut store = self.store.lock().unwrap();
        store.calls.push("POST employees".to_string());
        let missing: Vec<&str> = [
            ("employee_id", &new.employee_id),
            ("full_name", &new.full_name),
            ("email", &new.email),
            ("department", &new.department),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();
        if !missing.is_empty() {
            return Err(required(&missing));
        }
        store.next_id += 1;
        let id = store.next_id;
        store.employees.push(Employee {
            id: RecordId::new(id.to_string()),
            employee_id: new.employee_id.clone(),
            full_name: new.full_name.clone(),
            email: new.email.clone(),
            department: new.department.clone(),
        });
        Ok(())
    }

    async fn delete_employee(&self, id: &RecordId) -> Result<(), ApiError> {
        let mut store = self.store.lock().unwrap();
        store.calls.push(format!("DELETE employees/{id}"));
        let before = store.employees.len();
        store.employees.retain(|employee| &employee.id != id);
        if store.employees.len() == before {
            return Err(ApiError::from_response(
                StatusCode::NOT_FOUND,
                &json!({ "error": "Not found" }),
            ));
        }
        Ok(())
    }

    async fn list_attendance(
        &self,
        query: &AttendanceQuery,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let mut store = self.store.lock().unwrap();
        store
            .calls
            .push(format!("GET {}", with_query("attendance", &query.params())));
        if store.fail_lists {
            return Err(unavailable());
        }
        let date = query.date();
        let code = query.employee_id();
        Ok(store
            .records
            .iter()
            .filter(|r| date.is_empty() || r.date.to_string() == date)
            .filter(|r| code.is_empty() || r.employee_id == code)
            .cloned()
            .collect())
    }

    async fn create_attendance(&self, new: &NewAttendance) -> Result<(), ApiError> {
        let mut store = self.store.lock().unwrap();
        store.calls.push("POST attendance".to_string());
        let Ok(date) = new.date.parse::<NaiveDate>() else {
            return Err(required(&["date"]));
        };
        if !store.employees.iter().any(|e| e.employee_id == new.employee_id) {
            return Err(ApiError::from_response(
                StatusCode::BAD_REQUEST,
                &json!({ "error": "Invalid", "details": { "employee_id": "Employee not found." } }),
            ));
        }
        store.next_id += 1;
        let id = store.next_id;
        store.records.push(record(id, &new.employee_id, date, new.status));
        Ok(())
    }

    async fn present_day_counts(&self) -> Result<PresentDays, ApiError> {
        let mut store = self.store.lock().unwrap();
        store.calls.push("GET attendance (all)".to_string());
        if store.fail_lists {
            return Err(unavailable());
        }
        Ok(present_days_by_employee(&store.records))
    }
}
