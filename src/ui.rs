use crate::models::{AttendanceQuery, AttendanceStatus};
use crate::view::{AttendancePage, DeleteTarget, EmployeesPage, FormErrors};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Employees,
    Attendance,
}

impl Route {
    fn href(self) -> &'static str {
        match self {
            Route::Employees => "/",
            Route::Attendance => "/attendance",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Route::Employees => "Employees",
            Route::Attendance => "Attendance",
        }
    }
}

pub const NO_EMPLOYEES: &str = "No employees yet. Add one using the button above.";
pub const NO_ATTENDANCE: &str =
    "No attendance records. Mark attendance using the button above or adjust filters.";

pub fn render_employees_page(page: &EmployeesPage) -> String {
    let mut content = page_header(
        "Employees",
        if page.form.open {
            link_button("Cancel", "/", "secondary")
        } else {
            link_button("Add Employee", "/?form=open", "primary")
        },
    );

    if page.form.open {
        let values = &page.form.values;
        let errors = &page.form.errors;
        let mut form = String::from(r#"<form method="post" action="/employees" class="form">"#);
        form.push_str(&general_error(errors));
        form.push_str(r#"<div class="form-grid">"#);
        form.push_str(&input(InputProps {
            label: "Employee ID",
            name: "employee_id",
            kind: "text",
            value: &values.employee_id,
            placeholder: "e.g. E001",
            error: errors.get("employee_id"),
            required: true,
        }));
        form.push_str(&input(InputProps {
            label: "Full Name",
            name: "full_name",
            kind: "text",
            value: &values.full_name,
            placeholder: "John Doe",
            error: errors.get("full_name"),
            required: true,
        }));
        form.push_str(&input(InputProps {
            label: "Email",
            name: "email",
            kind: "email",
            value: &values.email,
            placeholder: "john@company.com",
            error: errors.get("email"),
            required: true,
        }));
        form.push_str(&input(InputProps {
            label: "Department",
            name: "department",
            kind: "text",
            value: &values.department,
            placeholder: "Engineering",
            error: errors.get("department"),
            required: true,
        }));
        form.push_str("</div>");
        form.push_str(&submit_button(
            if page.form.submitting { "Adding…" } else { "Add Employee" },
            page.form.submitting,
        ));
        form.push_str("</form>");
        content.push_str(&card(Some("Add new employee"), &form));
    }

    let body = if page.is_loading() {
        spinner("Loading employees…")
    } else if let Some(error) = &page.error {
        page_error(error, "/")
    } else if page.employees.is_empty() {
        empty_state(NO_EMPLOYEES)
    } else {
        employees_table(page)
    };
    content.push_str(&card(Some("All employees"), &body));

    layout(Route::Employees, "Employees", &content)
}

fn employees_table(page: &EmployeesPage) -> String {
    let mut rows = String::new();
    for employee in &page.employees {
        let action = if page.deleting.as_ref() == Some(&employee.id) {
            r#"<button class="btn btn-danger" disabled>Deleting…</button>"#.to_string()
        } else {
            let href = format!("/employees/{}/delete", escape(&employee.id.path_segment()));
            link_button("Delete", &href, "danger")
        };
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&employee.employee_id),
            escape(&employee.full_name),
            escape(&employee.email),
            escape(&employee.department),
            action,
        );
    }
    table(&["Employee ID", "Name", "Email", "Department", ""], &rows)
}

pub fn render_delete_confirm(target: &DeleteTarget) -> String {
    let body = format!(
        r#"<p class="prompt">{prompt}</p>
<form method="post" action="/employees/{id}/delete" class="confirm">
  <input type="hidden" name="employee_id" value="{code}" />
  <input type="hidden" name="full_name" value="{name}" />
  <button type="submit" name="confirm" value="yes" class="btn btn-danger">Delete</button>
  <button type="submit" name="confirm" value="no" class="btn btn-secondary">Cancel</button>
</form>"#,
        prompt = escape(&target.prompt()),
        id = escape(&target.id.path_segment()),
        code = escape(&target.employee_id),
        name = escape(&target.full_name),
    );
    let content = card(Some("Delete employee"), &body);
    layout(Route::Employees, "Delete employee", &content)
}

pub fn render_attendance_page(page: &AttendancePage) -> String {
    let filters_query = filter_query(&page.filters);
    let toggle = if page.form.open {
        link_button("Cancel", &attendance_href(&filters_query, false), "secondary")
    } else {
        link_button("Mark Attendance", &attendance_href(&filters_query, true), "primary")
    };
    let mut content = page_header("Attendance", toggle);

    if page.form.open {
        let values = &page.form.values;
        let errors = &page.form.errors;
        let mut form = String::from(r#"<form method="post" action="/attendance" class="form">"#);
        let _ = write!(
            form,
            r#"<input type="hidden" name="filter_date" value="{}" /><input type="hidden" name="filter_employee_id" value="{}" />"#,
            escape(page.filters.date()),
            escape(page.filters.employee_id()),
        );
        form.push_str(&general_error(errors));
        form.push_str(r#"<div class="form-row">"#);
        form.push_str(&input(InputProps {
            label: "Employee ID",
            name: "employee_id",
            kind: "text",
            value: &values.employee_id,
            placeholder: "e.g. E001",
            error: errors.get("employee_id"),
            required: true,
        }));
        form.push_str(&input(InputProps {
            label: "Date",
            name: "date",
            kind: "date",
            value: &values.date,
            placeholder: "",
            error: errors.get("date"),
            required: true,
        }));
        form.push_str(&status_select(values.status, errors.get("status")));
        form.push_str("</div>");
        form.push_str(&submit_button(
            if page.form.submitting { "Saving…" } else { "Save" },
            page.form.submitting,
        ));
        form.push_str("</form>");
        content.push_str(&card(Some("Mark attendance"), &form));
    }

    let mut filters = String::from(r#"<form method="get" action="/attendance" class="filters">"#);
    filters.push_str(&input(InputProps {
        label: "Filter by date",
        name: "date",
        kind: "date",
        value: page.filters.date(),
        placeholder: "",
        error: None,
        required: false,
    }));
    filters.push_str(&input(InputProps {
        label: "Filter by Employee ID",
        name: "employee_id",
        kind: "text",
        value: page.filters.employee_id(),
        placeholder: "e.g. E001",
        error: None,
        required: false,
    }));
    filters.push_str(&submit_button("Apply", false));
    filters.push_str("</form>");
    content.push_str(&card(Some("Filters"), &filters));

    let body = if page.loading || page.records_loading {
        spinner("Loading…")
    } else if let Some(error) = &page.error {
        page_error(error, &attendance_href(&filters_query, false))
    } else if page.records.is_empty() {
        empty_state(NO_ATTENDANCE)
    } else {
        attendance_table(page)
    };
    content.push_str(&card(Some("Attendance records"), &body));

    if !page.loading && page.error.is_none() && !page.employees.is_empty() {
        let mut summary = String::from(r#"<div class="summary">"#);
        for row in page.summary() {
            let _ = write!(
                summary,
                r#"<div class="summary-item"><span class="summary-name">{}</span><span class="badge" data-employee="{}">{} present</span></div>"#,
                escape(&row.full_name),
                escape(&row.employee_id),
                row.present_days,
            );
        }
        summary.push_str("</div>");
        content.push_str(&card(Some("Summary – Present days per employee"), &summary));
    }

    layout(Route::Attendance, "Attendance", &content)
}

fn attendance_table(page: &AttendancePage) -> String {
    let mut rows = String::new();
    for record in &page.records {
        let class = match record.status {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        };
        let _ = write!(
            rows,
            r#"<tr><td>{}</td><td>{}</td><td>{}</td><td><span class="status {class}">{}</span></td></tr>"#,
            record.date,
            escape(&record.employee_id),
            escape(&record.employee_name),
            record.status,
        );
    }
    table(&["Date", "Employee ID", "Name", "Status"], &rows)
}

fn filter_query(filters: &AttendanceQuery) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(filters.params())
        .finish()
}

fn attendance_href(filters_query: &str, open_form: bool) -> String {
    match (filters_query.is_empty(), open_form) {
        (true, false) => "/attendance".to_string(),
        (true, true) => "/attendance?form=open".to_string(),
        (false, false) => format!("/attendance?{filters_query}"),
        (false, true) => format!("/attendance?{filters_query}&form=open"),
    }
}

fn page_header(title: &str, action: String) -> String {
    format!(
        r#"<div class="page-header"><h1 class="page-title">{}</h1>{action}</div>"#,
        escape(title)
    )
}

pub fn card(title: Option<&str>, body: &str) -> String {
    let heading = title
        .map(|title| format!(r#"<h2 class="card-title">{}</h2>"#, escape(title)))
        .unwrap_or_default();
    format!(r#"<section class="card">{heading}{body}</section>"#)
}

pub struct InputProps<'a> {
    pub label: &'a str,
    pub name: &'a str,
    pub kind: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub error: Option<&'a str>,
    pub required: bool,
}

pub fn input(props: InputProps<'_>) -> String {
    let mut html = String::from(r#"<div class="field">"#);
    let _ = write!(
        html,
        r#"<label for="{name}" class="label">{label}</label><input id="{name}" name="{name}" type="{kind}" value="{value}" class="input""#,
        name = escape(props.name),
        label = escape(props.label),
        kind = escape(props.kind),
        value = escape(props.value),
    );
    if !props.placeholder.is_empty() {
        let _ = write!(html, r#" placeholder="{}""#, escape(props.placeholder));
    }
    if props.required {
        html.push_str(" required");
    }
    html.push_str(" />");
    if let Some(error) = props.error.filter(|error| !error.is_empty()) {
        let _ = write!(html, r#"<p class="field-error">{}</p>"#, escape(error));
    }
    html.push_str("</div>");
    html
}

fn status_select(selected: AttendanceStatus, error: Option<&str>) -> String {
    let mut html = String::from(
        r#"<div class="field"><label for="status" class="label">Status</label><select id="status" name="status" class="input">"#,
    );
    for status in AttendanceStatus::ALL {
        let marker = if status == selected { " selected" } else { "" };
        let _ = write!(html, r#"<option value="{status}"{marker}>{status}</option>"#);
    }
    html.push_str("</select>");
    if let Some(error) = error {
        let _ = write!(html, r#"<p class="field-error">{}</p>"#, escape(error));
    }
    html.push_str("</div>");
    html
}

fn general_error(errors: &FormErrors) -> String {
    errors
        .general()
        .map(|message| format!(r#"<p class="form-error">{}</p>"#, escape(message)))
        .unwrap_or_default()
}

pub fn submit_button(label: &str, disabled: bool) -> String {
    format!(
        r#"<button type="submit" class="btn btn-primary"{}>{}</button>"#,
        if disabled { " disabled" } else { "" },
        escape(label)
    )
}

pub fn link_button(label: &str, href: &str, variant: &str) -> String {
    format!(
        r#"<a class="btn btn-{variant}" href="{href}">{}</a>"#,
        escape(label)
    )
}

pub fn spinner(label: &str) -> String {
    format!(
        r#"<div class="loading"><span class="spinner" aria-hidden="true"></span><span>{}</span></div>"#,
        escape(label)
    )
}

pub fn empty_state(message: &str) -> String {
    format!(r#"<div class="empty"><p class="empty-message">{}</p></div>"#, escape(message))
}

fn page_error(message: &str, retry_href: &str) -> String {
    format!(
        r#"<div class="error">{}{}</div>"#,
        escape(message),
        link_button("Retry", retry_href, "secondary")
    )
}

fn table(headers: &[&str], rows: &str) -> String {
    let mut head = String::new();
    for header in headers {
        let _ = write!(head, "<th>{}</th>", escape(header));
    }
    format!(
        r#"<div class="table-wrap"><table class="table"><thead><tr>{head}</tr></thead><tbody>{rows}</tbody></table></div>"#
    )
}

fn nav(active: Route) -> String {
    [Route::Employees, Route::Attendance]
        .into_iter()
        .map(|route| {
            let class = if route == active { "link active" } else { "link" };
            format!(
                r#"<a class="{class}" href="{}">{}</a>"#,
                route.href(),
                route.label()
            )
        })
        .collect()
}

pub fn layout(active: Route, title: &str, content: &str) -> String {
    LAYOUT_HTML
        .replace("{{TITLE}}", &escape(title))
        .replace("{{NAV}}", &nav(active))
        .replace("{{CONTENT}}", content)
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}} · HRMS Lite</title>
  <style>
    :root {
      --bg: #f4f6fb;
      --ink: #1f2937;
      --muted: #6b7280;
      --accent: #2563eb;
      --danger: #dc2626;
      --ok: #15803d;
      --card: #ffffff;
      --border: #e5e7eb;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
    }

    .container {
      width: min(1040px, 100%);
      margin: 0 auto;
      padding: 0 20px;
    }

    header {
      background: var(--card);
      border-bottom: 1px solid var(--border);
    }

    header .container {
      display: flex;
      align-items: center;
      justify-content: space-between;
      height: 64px;
    }

    .logo {
      margin: 0;
      font-size: 1.25rem;
    }

    nav {
      display: flex;
      gap: 8px;
    }

    .link {
      padding: 8px 14px;
      border-radius: 8px;
      color: var(--muted);
      text-decoration: none;
      font-weight: 500;
    }

    .link.active {
      background: rgba(37, 99, 235, 0.1);
      color: var(--accent);
    }

    main {
      padding: 28px 0 48px;
    }

    .page-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      margin-bottom: 20px;
    }

    .page-title {
      margin: 0;
      font-size: 1.6rem;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 12px;
      padding: 20px;
      margin-bottom: 20px;
    }

    .card-title {
      margin: 0 0 16px;
      font-size: 1.05rem;
    }

    .form-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 16px;
      margin-bottom: 16px;
    }

    .form-row,
    .filters {
      display: flex;
      flex-wrap: wrap;
      align-items: flex-end;
      gap: 16px;
      margin-bottom: 16px;
    }

    .field {
      display: grid;
      gap: 6px;
    }

    .label {
      font-size: 0.85rem;
      color: var(--muted);
    }

    .input {
      padding: 9px 12px;
      border: 1px solid var(--border);
      border-radius: 8px;
      font: inherit;
    }

    .field-error,
    .form-error {
      margin: 0;
      color: var(--danger);
      font-size: 0.85rem;
    }

    .btn {
      display: inline-flex;
      align-items: center;
      border: none;
      border-radius: 8px;
      padding: 9px 16px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      text-decoration: none;
    }

    .btn[disabled] {
      opacity: 0.6;
      cursor: default;
    }

    .btn-primary {
      background: var(--accent);
      color: white;
    }

    .btn-secondary {
      background: var(--border);
      color: var(--ink);
    }

    .btn-danger {
      background: var(--danger);
      color: white;
    }

    .table-wrap {
      overflow-x: auto;
    }

    .table {
      width: 100%;
      border-collapse: collapse;
    }

    .table th,
    .table td {
      text-align: left;
      padding: 10px 12px;
      border-bottom: 1px solid var(--border);
    }

    .status {
      padding: 2px 10px;
      border-radius: 999px;
      font-size: 0.8rem;
      font-weight: 600;
    }

    .status.present {
      background: rgba(21, 128, 61, 0.12);
      color: var(--ok);
    }

    .status.absent {
      background: rgba(220, 38, 38, 0.12);
      color: var(--danger);
    }

    .loading,
    .error {
      display: flex;
      align-items: center;
      gap: 12px;
      padding: 16px 0;
    }

    .error {
      color: var(--danger);
    }

    .spinner {
      width: 18px;
      height: 18px;
      border: 2px solid var(--border);
      border-top-color: var(--accent);
      border-radius: 50%;
      animation: spin 800ms linear infinite;
    }

    .empty {
      text-align: center;
      padding: 32px 0;
      color: var(--muted);
    }

    .summary {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
      gap: 12px;
    }

    .summary-item {
      display: flex;
      justify-content: space-between;
      padding: 10px 12px;
      border: 1px solid var(--border);
      border-radius: 8px;
    }

    .badge {
      font-weight: 600;
      color: var(--accent);
    }

    @keyframes spin {
      to {
        transform: rotate(360deg);
      }
    }
  </style>
</head>
<body>
  <header>
    <div class="container">
      <h1 class="logo">HRMS Lite</h1>
      <nav>{{NAV}}</nav>
    </div>
  </header>
  <main>
    <div class="container">
{{CONTENT}}
    </div>
  </main>
</body>
</html>
"#;
