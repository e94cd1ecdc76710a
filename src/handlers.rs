use crate::models::{AttendanceQuery, NewEmployee, RecordId};
use crate::state::AppState;
use crate::ui::{render_attendance_page, render_delete_confirm, render_employees_page};
use crate::view::{AttendancePage, Decision, DeleteOutcome, DeleteTarget, EmployeesPage};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
pub struct EmployeesParams {
    #[serde(default)]
    form: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AttendanceParams {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    employee_id: Option<String>,
    #[serde(default)]
    form: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    confirm: String,
    #[serde(default)]
    employee_id: String,
    #[serde(default)]
    full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct MarkAttendanceForm {
    #[serde(default)]
    employee_id: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    filter_date: Option<String>,
    #[serde(default)]
    filter_employee_id: Option<String>,
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn employees_index(
    State(state): State<AppState>,
    Query(params): Query<EmployeesParams>,
) -> Html<String> {
    let mut page = EmployeesPage::default();
    page.form.open = is_open(params.form.as_deref());
    page.fetch_employees(&state.api).await;
    Html(render_employees_page(&page))
}

pub async fn create_employee(
    State(state): State<AppState>,
    Form(values): Form<NewEmployee>,
) -> (StatusCode, Html<String>) {
    let mut page = EmployeesPage::default();
    page.form.open = true;
    page.form.values = values;

    if page.submit(&state.api).await {
        return (StatusCode::OK, Html(render_employees_page(&page)));
    }
    page.fetch_employees(&state.api).await;
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(render_employees_page(&page)),
    )
}

pub async fn confirm_delete(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = RecordId::new(id);
    match state.api.employees().get(&id).await {
        Ok(employee) => Html(render_delete_confirm(&DeleteTarget::from(&employee))).into_response(),
        Err(err) => {
            let mut page = EmployeesPage::default();
            page.fetch_employees(&state.api).await;
            page.error = Some(err.to_string());
            let status = err.status().unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Html(render_employees_page(&page))).into_response()
        }
    }
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Response {
    let target = DeleteTarget {
        id: RecordId::new(id),
        employee_id: form.employee_id,
        full_name: form.full_name,
    };
    let mut page = EmployeesPage::default();
    let decision = Decision(form.confirm == "yes");

    match page.delete(&state.api, &target, &decision).await {
        DeleteOutcome::Declined | DeleteOutcome::Busy => {
            debug!(id = %target.id, "delete declined");
            Redirect::to("/").into_response()
        }
        DeleteOutcome::Deleted => Html(render_employees_page(&page)).into_response(),
        DeleteOutcome::Failed => {
            let error = page.error.take();
            page.fetch_employees(&state.api).await;
            page.error = error.or(page.error);
            Html(render_employees_page(&page)).into_response()
        }
    }
}

pub async fn attendance_index(
    State(state): State<AppState>,
    Query(params): Query<AttendanceParams>,
) -> Html<String> {
    let filters = AttendanceQuery {
        date: params.date,
        employee_id: params.employee_id,
    };
    let mut page = AttendancePage::new(today(), filters);
    page.form.open = is_open(params.form.as_deref());
    page.load(&state.api).await;
    Html(render_attendance_page(&page))
}

pub async fn mark_attendance(
    State(state): State<AppState>,
    Form(form): Form<MarkAttendanceForm>,
) -> (StatusCode, Html<String>) {
    let filters = AttendanceQuery {
        date: form.filter_date,
        employee_id: form.filter_employee_id,
    };
    let today = today();
    let mut page = AttendancePage::new(today, filters);
    page.load(&state.api).await;

    page.form.open = true;
    page.handle_change("employee_id", form.employee_id);
    page.handle_change("date", form.date);
    page.handle_change("status", form.status);

    let status = if page.submit(&state.api, today).await {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Html(render_attendance_page(&page)))
}

fn is_open(form: Option<&str>) -> bool {
    form == Some("open")
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
