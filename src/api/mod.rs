//! REST client for the HRMS backend.

pub mod client;
pub mod resources;

pub use client::{ApiClient, RequestBody, RequestOptions};
pub use resources::{Attendance, Employees, HrmsApi};
