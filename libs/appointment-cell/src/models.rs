use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use doctor_cell::{DoctorId, TimeLabel};
use shared_models::error::AppError;

/// Wire format of `appointment_time`; seconds are always zero.
pub const APPOINTMENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const BOOKING_SUCCESS_MESSAGE: &str = "Appointment booked successfully!";
pub const BOOKING_FAILURE_MESSAGE: &str = "Failed to book appointment. Please try again.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_time: String,
    pub status: AppointmentStatus,
}

impl BookingRequest {
    /// Combines the chosen calendar day and slot into one pending request.
    pub fn pending(patient_id: i64, doctor_id: i64, date: NaiveDate, time: TimeLabel) -> Self {
        Self {
            patient_id,
            doctor_id,
            appointment_time: date.and_time(time.time()).format(APPOINTMENT_TIME_FORMAT).to_string(),
            status: AppointmentStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfirmation {
    pub request: BookingRequest,
}

impl BookingConfirmation {
    pub fn message(&self) -> &'static str {
        BOOKING_SUCCESS_MESSAGE
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingWidgetError {
    #[error("Please select a date, time, and doctor for your appointment.")]
    IncompleteSelection,

    #[error("A booking request is already in progress")]
    SubmissionInFlight,

    #[error("{0} is in the past")]
    PastDate(NaiveDate),

    #[error("Time slot {0} is not available")]
    SlotUnavailable(TimeLabel),

    #[error("No patient is signed in")]
    MissingPatient,

    #[error("Doctor id {0} is not numeric")]
    InvalidDoctorId(DoctorId),

    #[error(transparent)]
    Api(#[from] AppError),
}

impl BookingWidgetError {
    /// Text shown to the user when a booking attempt fails.
    pub fn user_message(&self) -> String {
        match self {
            BookingWidgetError::Api(AppError::Server { detail, .. }) => format!(
                "Error booking appointment: {}",
                detail.as_deref().unwrap_or("Unknown error")
            ),
            BookingWidgetError::Api(err) if err.is_transport() => BOOKING_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_booking_request_wire_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let request = BookingRequest::pending(42, 7, date, TimeLabel::new(14, 30).unwrap());

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "patient_id": 42,
                "doctor_id": 7,
                "appointment_time": "2024-03-15 14:30:00",
                "status": "pending"
            })
        );
    }

    #[test]
    fn test_user_messages() {
        let server = BookingWidgetError::Api(AppError::Server {
            status: 400,
            detail: Some("Doctor already booked at 14:30".to_string()),
        });
        assert_eq!(server.user_message(), "Error booking appointment: Doctor already booked at 14:30");

        let no_detail = BookingWidgetError::Api(AppError::Server { status: 500, detail: None });
        assert_eq!(no_detail.user_message(), "Error booking appointment: Unknown error");

        let timeout = BookingWidgetError::Api(AppError::Timeout { timeout_seconds: 10 });
        assert_eq!(timeout.user_message(), BOOKING_FAILURE_MESSAGE);

        assert_eq!(
            BookingWidgetError::IncompleteSelection.user_message(),
            "Please select a date, time, and doctor for your appointment."
        );
    }
}
