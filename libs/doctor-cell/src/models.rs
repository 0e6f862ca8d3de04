use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::schedule::TimeLabel;

/// Doctor id as the directory hands it out. The backend zero-pads numeric ids
/// (`"00007"`) and some endpoints add a `D` prefix (`"D000007"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DoctorId(String);

impl DoctorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer form used by the booking endpoint.
    pub fn numeric(&self) -> Option<i64> {
        let trimmed = self.0.trim();
        let digits = trimmed
            .strip_prefix('D')
            .or_else(|| trimmed.strip_prefix('d'))
            .unwrap_or(trimmed);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DoctorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<i64> for DoctorId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for DoctorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => DoctorId(text),
            RawId::Number(number) => DoctorId(number.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    #[serde(default)]
    pub department: String,
    /// Fields the booking flow does not read (email, phone, image_url, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Doctor {
    pub fn new(id: impl Into<String>, name: &str, department: &str) -> Self {
        Self {
            id: DoctorId::new(id),
            name: name.to_string(),
            department: department.to_string(),
            extra: Map::new(),
        }
    }

    /// Text of the doctor's entry in a selection control.
    pub fn option_label(&self) -> String {
        format!("{} ({})", self.name, self.department)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub available_slots: Vec<String>,
    #[serde(default)]
    pub booked_slots: Vec<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub doctor_id: Option<Value>,
}

/// Bookable labels for one doctor on one day, as of the fetch that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilitySnapshot {
    pub doctor_id: DoctorId,
    pub date: NaiveDate,
    pub available: BTreeSet<TimeLabel>,
}

impl AvailabilitySnapshot {
    pub fn from_response(doctor_id: DoctorId, date: NaiveDate, response: AvailabilityResponse) -> Self {
        let available = response
            .available_slots
            .iter()
            .filter_map(|raw| match raw.parse::<TimeLabel>() {
                Ok(label) if label.is_bookable() => Some(label),
                _ => {
                    debug!("Ignoring slot {:?} outside the clinic schedule", raw);
                    None
                }
            })
            .collect();

        Self {
            doctor_id,
            date,
            available,
        }
    }

    pub fn is_available(&self, label: &TimeLabel) -> bool {
        self.available.contains(label)
    }
}
