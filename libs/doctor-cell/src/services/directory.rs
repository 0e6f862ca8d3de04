use tracing::debug;

use shared_api_client::ApiClient;
use shared_models::error::AppError;

use crate::models::Doctor;

pub struct DoctorDirectoryService {
    client: ApiClient,
}

impl DoctorDirectoryService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// All doctors, in the order the backend lists them.
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, AppError> {
        debug!("Fetching doctor directory");

        let doctors: Vec<Doctor> = self.client.get_json("/admin/doctors-list", &[]).await?;

        debug!("Directory returned {} doctors", doctors.len());
        Ok(doctors)
    }
}
