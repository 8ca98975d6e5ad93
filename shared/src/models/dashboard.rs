//! Doctor dashboard aggregates

use serde::{Deserialize, Serialize};

/// Appointment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Waiting,
    InProgress,
    Completed,
    Canceled,
}

/// One appointment row on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentSummary {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    /// Unix millis
    pub scheduled_at: i64,
    pub status: AppointmentStatus,
}

/// Aggregate returned by `GET /doctors/{id}/dashboard`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorDashboard {
    pub doctor_id: String,
    /// Business date (YYYY-MM-DD)
    pub date: String,
    pub total_appointments: i64,
    pub completed: i64,
    pub waiting: i64,
    pub canceled: i64,
    #[serde(default)]
    pub appointments: Vec<AppointmentSummary>,
}
