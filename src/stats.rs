use crate::models::{AttendanceRecord, AttendanceStatus, Employee};
use std::collections::BTreeMap;

/// Count of `Present` records keyed by employee code.
pub type PresentDays = BTreeMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub employee_id: String,
    pub full_name: String,
    pub present_days: u64,
}

pub fn present_days_by_employee(records: &[AttendanceRecord]) -> PresentDays {
    records
        .iter()
        .filter(|record| record.status == AttendanceStatus::Present)
        .fold(PresentDays::new(), |mut counts, record| {
            let entry = counts.entry(record.employee_id.clone()).or_default();
            *entry = entry.saturating_add(1);
            counts
        })
}

/// One row per employee in list order; employees without records count 0.
pub fn build_summary(employees: &[Employee], counts: &PresentDays) -> Vec<SummaryRow> {
    employees
        .iter()
        .map(|employee| SummaryRow {
            employee_id: employee.employee_id.clone(),
            full_name: employee.full_name.clone(),
            present_days: counts.get(&employee.employee_id).copied().unwrap_or(0),
        })
        .collect()
}
