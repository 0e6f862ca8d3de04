use chrono::NaiveDate;
use serde_json::{json, Value};

use shared_config::ClientConfig;
use shared_models::auth::Session;

pub struct TestConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub patient_id: i64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 5,
            patient_id: 42,
        }
    }
}

impl TestConfig {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.api_base_url.clone(),
            request_timeout_secs: self.request_timeout_secs,
            session_user_id: Some(self.patient_id),
            session_role: Some("patient".to_string()),
        }
    }

    pub fn session(&self) -> Session {
        Session::patient(self.patient_id)
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub struct MockClinicResponses;

impl MockClinicResponses {
    pub fn doctor(id: &str, name: &str, department: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "department": department,
            "email": format!("{}@clinic.test", id),
            "phone": null,
            "description": null,
            "image_url": null
        })
    }

    pub fn doctors_list() -> Value {
        json!([
            Self::doctor("00001", "Dr. John Smith", "Cardiology"),
            Self::doctor("00002", "Dr. Sarah Johnson", "Neurology"),
            Self::doctor("00007", "Dr. Michael Brown", "Orthopedics"),
        ])
    }

    pub fn availability(doctor_id: i64, date: &str, available: &[&str], booked: &[&str]) -> Value {
        json!({
            "date": date,
            "doctor_id": doctor_id,
            "available_slots": available,
            "booked_slots": booked
        })
    }

    pub fn appointment_created(patient_id: i64, doctor_id: i64, appointment_time: &str) -> Value {
        json!({
            "id": 1,
            "patient_id": patient_id,
            "doctor_id": doctor_id,
            "appointment_time": appointment_time,
            "status": "pending"
        })
    }

    pub fn error_response(detail: &str) -> Value {
        json!({ "detail": detail })
    }
}
