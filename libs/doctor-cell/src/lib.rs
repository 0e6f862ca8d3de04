pub mod filter;
pub mod models;
pub mod schedule;
pub mod services;

pub use filter::{departments, filter_doctors, DoctorFilter};
pub use models::*;
pub use schedule::{time_labels, TimeLabel, TIME_LABELS};
pub use services::*;
