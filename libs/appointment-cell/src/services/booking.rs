use tracing::{debug, info, warn};

use shared_api_client::ApiClient;
use shared_models::error::AppError;

use crate::models::BookingRequest;

pub struct BookingService {
    client: ApiClient,
}

impl BookingService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Submits one booking. There is no idempotency key: calling this twice
    /// books twice.
    pub async fn create_appointment(&self, request: &BookingRequest) -> Result<(), AppError> {
        debug!(
            "Booking doctor {} for patient {} at {}",
            request.doctor_id, request.patient_id, request.appointment_time
        );

        match self.client.post_json("/admin/appointment", request).await {
            Ok(()) => {
                info!(
                    "Appointment booked: doctor {} at {}",
                    request.doctor_id, request.appointment_time
                );
                Ok(())
            }
            Err(e) => {
                warn!("Booking rejected for doctor {}: {}", request.doctor_id, e);
                Err(e)
            }
        }
    }
}
