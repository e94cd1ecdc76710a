use super::client::{ApiClient, RequestOptions, with_query};
use crate::errors::ApiError;
use crate::models::{
    AttendanceQuery, AttendanceRecord, Employee, NewAttendance, NewEmployee, RecordId,
};
use crate::stats::{PresentDays, present_days_by_employee};
use reqwest::Method;
use serde_json::Value;
use std::future::Future;

const EMPLOYEES_PATH: &str = "/api/employees/";
const ATTENDANCE_PATH: &str = "/api/attendance/";

/// Backend operations the view-models depend on.
pub trait HrmsApi {
    fn list_employees(&self) -> impl Future<Output = Result<Vec<Employee>, ApiError>> + Send;

    fn create_employee(
        &self,
        employee: &NewEmployee,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn delete_employee(&self, id: &RecordId) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn list_attendance(
        &self,
        query: &AttendanceQuery,
    ) -> impl Future<Output = Result<Vec<AttendanceRecord>, ApiError>> + Send;

    fn create_attendance(
        &self,
        record: &NewAttendance,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Present-day counts keyed by employee code over every record.
    fn present_day_counts(&self) -> impl Future<Output = Result<PresentDays, ApiError>> + Send;
}

/// `/api/employees/` endpoints.
pub struct Employees<'a> {
    client: &'a ApiClient,
}

impl Employees<'_> {
    pub async fn list(&self) -> Result<Vec<Employee>, ApiError> {
        self.client.request_list(EMPLOYEES_PATH).await
    }

    pub async fn create(&self, employee: &NewEmployee) -> Result<Value, ApiError> {
        let body = serde_json::to_value(employee).map_err(ApiError::decode)?;
        self.client
            .request(EMPLOYEES_PATH, RequestOptions::json(Method::POST, body))
            .await
    }

    pub async fn get(&self, id: &RecordId) -> Result<Employee, ApiError> {
        self.client
            .request_as(&employee_path(id), RequestOptions::new(Method::GET))
            .await
    }

    pub async fn delete(&self, id: &RecordId) -> Result<(), ApiError> {
        self.client
            .request(&employee_path(id), RequestOptions::new(Method::DELETE))
            .await
            .map(drop)
    }
}

/// `/api/attendance/` endpoints.
pub struct Attendance<'a> {
    client: &'a ApiClient,
}

impl Attendance<'_> {
    pub async fn list(&self, query: &AttendanceQuery) -> Result<Vec<AttendanceRecord>, ApiError> {
        let path = with_query(ATTENDANCE_PATH, &query.params());
        self.client.request_list(&path).await
    }

    /// Records of one employee, addressed by the opaque employee id.
    pub async fn list_by_employee(
        &self,
        employee_pk: &RecordId,
        date: Option<&str>,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let base = format!("{ATTENDANCE_PATH}employee/{}/", employee_pk.path_segment());
        let params: Vec<(&str, &str)> = date
            .filter(|date| !date.is_empty())
            .map(|date| vec![("date", date)])
            .unwrap_or_default();
        self.client.request_list(&with_query(&base, &params)).await
    }

    pub async fn create(&self, record: &NewAttendance) -> Result<Value, ApiError> {
        let body = serde_json::to_value(record).map_err(ApiError::decode)?;
        self.client
            .request(ATTENDANCE_PATH, RequestOptions::json(Method::POST, body))
            .await
    }
}

impl ApiClient {
    pub fn employees(&self) -> Employees<'_> {
        Employees { client: self }
    }

    pub fn attendance(&self) -> Attendance<'_> {
        Attendance { client: self }
    }
}

impl HrmsApi for ApiClient {
    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.employees().list().await
    }

    async fn create_employee(&self, employee: &NewEmployee) -> Result<(), ApiError> {
        self.employees().create(employee).await.map(drop)
    }

    async fn delete_employee(&self, id: &RecordId) -> Result<(), ApiError> {
        self.employees().delete(id).await
    }

    async fn list_attendance(
        &self,
        query: &AttendanceQuery,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.attendance().list(query).await
    }

    async fn create_attendance(&self, record: &NewAttendance) -> Result<(), ApiError> {
        self.attendance().create(record).await.map(drop)
    }

    // The backend has no aggregate endpoint, so one unfiltered fetch is reduced here.
    async fn present_day_counts(&self) -> Result<PresentDays, ApiError> {
        let records = self.attendance().list(&AttendanceQuery::default()).await?;
        Ok(present_days_by_employee(&records))
    }
}

fn employee_path(id: &RecordId) -> String {
    format!("{EMPLOYEES_PATH}{}/", id.path_segment())
}
