use std::collections::BTreeSet;

use crate::models::Doctor;

/// Department dropdown plus free-text search box of the doctor listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorFilter {
    pub department: Option<String>,
    pub search: String,
}

impl DoctorFilter {
    pub fn new(department: Option<&str>, search: &str) -> Self {
        Self {
            department: department
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            search: search.to_string(),
        }
    }

    pub fn matches(&self, doctor: &Doctor) -> bool {
        let department = doctor.department.to_lowercase();

        let matches_department = self
            .department
            .as_ref()
            .map_or(true, |wanted| department == wanted.to_lowercase());

        let term = self.search.trim().to_lowercase();
        let matches_search = term.is_empty()
            || doctor.name.to_lowercase().contains(&term)
            || department.contains(&term);

        matches_department && matches_search
    }
}

pub fn filter_doctors<'a>(doctors: &'a [Doctor], filter: &DoctorFilter) -> Vec<&'a Doctor> {
    doctors.iter().filter(|doctor| filter.matches(doctor)).collect()
}

/// Distinct departments for the filter control, sorted.
pub fn departments(doctors: &[Doctor]) -> Vec<String> {
    doctors
        .iter()
        .map(|doctor| doctor.department.clone())
        .filter(|department| !department.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
