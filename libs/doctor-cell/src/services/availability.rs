use chrono::NaiveDate;
use tracing::debug;

use shared_api_client::ApiClient;
use shared_models::error::AppError;

use crate::models::{AvailabilityResponse, AvailabilitySnapshot, DoctorId};

pub struct AvailabilityService {
    client: ApiClient,
}

impl AvailabilityService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Bookable labels for `doctor_id` on `date`.
    pub async fn available_slots(
        &self,
        doctor_id: &DoctorId,
        date: NaiveDate,
    ) -> Result<AvailabilitySnapshot, AppError> {
        let path = format!("/doctor/availability/{}", urlencoding::encode(doctor_id.as_str()));
        let date_param = date.format("%Y-%m-%d").to_string();
        debug!("Fetching availability for doctor {} on {}", doctor_id, date_param);

        let response: AvailabilityResponse = self
            .client
            .get_json(&path, &[("date", date_param)])
            .await?;

        let snapshot = AvailabilitySnapshot::from_response(doctor_id.clone(), date, response);
        debug!(
            "Doctor {} has {} open slots on {}",
            doctor_id,
            snapshot.available.len(),
            date
        );

        Ok(snapshot)
    }
}
