use async_trait::async_trait;
use chrono::NaiveDate;

use doctor_cell::{AvailabilityService, AvailabilitySnapshot, Doctor, DoctorDirectoryService, DoctorId};
use shared_api_client::ApiClient;
use shared_config::ClientConfig;
use shared_models::error::AppError;

use crate::models::BookingRequest;
use crate::services::BookingService;

/// Backend calls the booking widget depends on.
#[async_trait]
pub trait ClinicGateway: Send + Sync {
    async fn list_doctors(&self) -> Result<Vec<Doctor>, AppError>;

    async fn available_slots(
        &self,
        doctor_id: &DoctorId,
        date: NaiveDate,
    ) -> Result<AvailabilitySnapshot, AppError>;

    async fn create_appointment(&self, request: &BookingRequest) -> Result<(), AppError>;
}

pub struct HttpClinicGateway {
    directory: DoctorDirectoryService,
    availability: AvailabilityService,
    booking: BookingService,
}

impl HttpClinicGateway {
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let client = ApiClient::new(config)?;

        Ok(Self {
            directory: DoctorDirectoryService::new(client.clone()),
            availability: AvailabilityService::new(client.clone()),
            booking: BookingService::new(client),
        })
    }
}

#[async_trait]
impl ClinicGateway for HttpClinicGateway {
    async fn list_doctors(&self) -> Result<Vec<Doctor>, AppError> {
        self.directory.list_doctors().await
    }

    async fn available_slots(
        &self,
        doctor_id: &DoctorId,
        date: NaiveDate,
    ) -> Result<AvailabilitySnapshot, AppError> {
        self.availability.available_slots(doctor_id, date).await
    }

    async fn create_appointment(&self, request: &BookingRequest) -> Result<(), AppError> {
        self.booking.create_appointment(request).await
    }
}
