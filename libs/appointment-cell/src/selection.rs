use chrono::NaiveDate;

use doctor_cell::{Doctor, DoctorId, TimeLabel};

use crate::calendar::{MonthDirection, ViewMonth};
use crate::models::BookingWidgetError;

pub const NO_DATE_SELECTED: &str = "No date selected";
pub const NO_TIME_SELECTED: &str = "No time selected";
pub const NO_DOCTOR_SELECTED: &str = "No doctor selected";

/// What the user has picked so far in one open booking dialog.
///
/// The time is only meaningful for a particular doctor and day, so changing
/// either of those drops it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    selected_date: Option<NaiveDate>,
    selected_time: Option<TimeLabel>,
    selected_doctor: Option<DoctorId>,
    view: ViewMonth,
}

impl SelectionState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected_date: None,
            selected_time: None,
            selected_doctor: None,
            view: ViewMonth::containing(today),
        }
    }

    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<TimeLabel> {
        self.selected_time
    }

    pub fn selected_doctor(&self) -> Option<&DoctorId> {
        self.selected_doctor.as_ref()
    }

    pub fn view(&self) -> ViewMonth {
        self.view
    }

    pub fn change_month(&mut self, direction: MonthDirection) {
        self.view = self.view.step(direction);
    }

    pub fn select_date(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), BookingWidgetError> {
        if date < today {
            return Err(BookingWidgetError::PastDate(date));
        }
        self.selected_date = Some(date);
        self.selected_time = None;
        Ok(())
    }

    pub fn select_doctor(&mut self, doctor: Option<DoctorId>) {
        self.selected_doctor = doctor;
        self.selected_time = None;
    }

    pub fn select_time(&mut self, time: TimeLabel) {
        self.selected_time = Some(time);
    }

    pub fn is_complete(&self) -> bool {
        self.selected_date.is_some() && self.selected_time.is_some() && self.selected_doctor.is_some()
    }

    pub fn summary(&self, doctors: &[Doctor]) -> SelectionSummary {
        let date = self
            .selected_date
            .map(|date| date.format("%A, %B %-d, %Y").to_string())
            .unwrap_or_else(|| NO_DATE_SELECTED.to_string());

        let time = self
            .selected_time
            .map(|time| time.display_12h())
            .unwrap_or_else(|| NO_TIME_SELECTED.to_string());

        let doctor = self
            .selected_doctor
            .as_ref()
            .and_then(|id| doctors.iter().find(|doctor| &doctor.id == id))
            .map(|doctor| doctor.option_label())
            .unwrap_or_else(|| NO_DOCTOR_SELECTED.to_string());

        SelectionSummary { date, time, doctor }
    }
}

/// Text of the "your appointment" panel next to the pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSummary {
    pub date: String,
    pub time: String,
    pub doctor: String,
}
