pub mod availability;
pub mod directory;

pub use availability::AvailabilityService;
pub use directory::DoctorDirectoryService;
