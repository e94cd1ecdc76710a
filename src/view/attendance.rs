use super::{FormErrors, page_error};
use crate::api::HrmsApi;
use crate::errors::ApiError;
use crate::models::{
    AttendanceQuery, AttendanceRecord, AttendanceStatus, Employee, NewAttendance,
};
use crate::stats::{PresentDays, SummaryRow, build_summary};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct AttendanceForm {
    pub open: bool,
    pub submitting: bool,
    pub values: NewAttendance,
    pub errors: FormErrors,
}

/// Identifies one attendance list request; only the latest one may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone)]
pub struct AttendancePage {
    pub employees: Vec<Employee>,
    /// Records matching the active filters.
    pub records: Vec<AttendanceRecord>,
    /// Present-day counts over all records, independent of the filters.
    pub present_days: PresentDays,
    pub filters: AttendanceQuery,
    pub loading: bool,
    pub records_loading: bool,
    pub error: Option<String>,
    pub form: AttendanceForm,
    latest_ticket: u64,
}

impl AttendancePage {
    pub fn new(today: NaiveDate, filters: AttendanceQuery) -> Self {
        Self {
            employees: Vec::new(),
            records: Vec::new(),
            present_days: PresentDays::new(),
            filters,
            loading: true,
            records_loading: false,
            error: None,
            form: AttendanceForm {
                open: false,
                submitting: false,
                values: NewAttendance::for_date(today),
                errors: FormErrors::default(),
            },
            latest_ticket: 0,
        }
    }

    /// Initial load: employees and filtered records concurrently, then the
    /// present-day counts once both have settled.
    pub async fn load<A: HrmsApi>(&mut self, api: &A) {
        self.loading = true;
        let (ticket, query) = self.begin_records_fetch();
        let (employees, records) =
            tokio::join!(api.list_employees(), api.list_attendance(&query));
        self.apply_employees(employees);
        self.finish_records_fetch(ticket, records);
        self.loading = false;
        self.refresh_present_days(api).await;
    }

    /// Starts a filtered list request and returns its ticket and query.
    pub fn begin_records_fetch(&mut self) -> (FetchTicket, AttendanceQuery) {
        self.latest_ticket += 1;
        self.records_loading = true;
        self.error = None;
        (FetchTicket(self.latest_ticket), self.filters.clone())
    }

    /// Applies a list response. Responses to superseded tickets are dropped;
    /// returns whether this one was applied.
    pub fn finish_records_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<AttendanceRecord>, ApiError>,
    ) -> bool {
        if ticket.0 != self.latest_ticket {
            debug!(ticket = ticket.0, latest = self.latest_ticket, "dropping stale attendance response");
            return false;
        }
        self.records_loading = false;
        match result {
            Ok(records) => self.records = records,
            Err(err) => self.error = Some(page_error(&err, "Failed to load attendance.")),
        }
        true
    }

    pub async fn fetch_attendance<A: HrmsApi>(&mut self, api: &A) {
        let (ticket, query) = self.begin_records_fetch();
        let result = api.list_attendance(&query).await;
        self.finish_records_fetch(ticket, result);
    }

    pub async fn refresh_present_days<A: HrmsApi>(&mut self, api: &A) {
        match api.present_day_counts().await {
            Ok(counts) => self.present_days = counts,
            Err(err) => warn!(error = %err, "present-day counts unavailable"),
        }
    }

    /// Replaces the filters and re-fetches the visible list when they changed.
    pub async fn set_filters<A: HrmsApi>(&mut self, api: &A, filters: AttendanceQuery) {
        if filters == self.filters {
            return;
        }
        self.filters = filters;
        if !self.loading {
            self.fetch_attendance(api).await;
        }
    }

    pub async fn set_filter_date<A: HrmsApi>(&mut self, api: &A, date: String) {
        let filters = AttendanceQuery {
            date: Some(date).filter(|date| !date.trim().is_empty()),
            ..self.filters.clone()
        };
        self.set_filters(api, filters).await;
    }

    pub async fn set_filter_employee<A: HrmsApi>(&mut self, api: &A, employee_id: String) {
        let filters = AttendanceQuery {
            employee_id: Some(employee_id).filter(|code| !code.trim().is_empty()),
            ..self.filters.clone()
        };
        self.set_filters(api, filters).await;
    }

    pub fn toggle_form(&mut self) {
        self.form.open = !self.form.open;
    }

    /// Updates one form field and clears its inline error. Unknown status
    /// values are ignored.
    pub fn handle_change(&mut self, field: &str, value: String) {
        let values = &mut self.form.values;
        match field {
            "employee_id" => values.employee_id = value,
            "date" => values.date = value,
            "status" => match AttendanceStatus::ALL
                .into_iter()
                .find(|status| status.as_str() == value)
            {
                Some(status) => values.status = status,
                None => return,
            },
            _ => return,
        }
        self.form.errors.clear_field(field);
    }

    /// Marks attendance from the form values. Returns whether it succeeded.
    pub async fn submit<A: HrmsApi>(&mut self, api: &A, today: NaiveDate) -> bool {
        if self.form.submitting {
            return false;
        }
        self.form.errors.clear();
        self.form.submitting = true;
        let payload = NewAttendance {
            employee_id: self.form.values.employee_id.trim().to_string(),
            ..self.form.values.clone()
        };
        let result = api.create_attendance(&payload).await;
        self.form.submitting = false;

        if let Err(err) = result {
            warn!(error = %err, "attendance create rejected");
            self.form.errors = FormErrors::from_error(&err);
            return false;
        }

        info!(employee_id = %payload.employee_id, date = %payload.date, status = %payload.status, "attendance marked");
        self.form.values = NewAttendance::for_date(today);
        self.form.open = false;

        let (ticket, query) = self.begin_records_fetch();
        let (records, counts) = tokio::join!(api.list_attendance(&query), api.present_day_counts());
        self.finish_records_fetch(ticket, records);
        match counts {
            Ok(counts) => self.present_days = counts,
            Err(err) => warn!(error = %err, "present-day counts unavailable"),
        }
        true
    }

    pub fn summary(&self) -> Vec<SummaryRow> {
        build_summary(&self.employees, &self.present_days)
    }

    fn apply_employees(&mut self, result: Result<Vec<Employee>, ApiError>) {
        match result {
            Ok(employees) => self.employees = employees,
            Err(err) => self.error = Some(page_error(&err, "Failed to load employees.")),
        }
    }
}
