use doctor_cell::{time_labels, AvailabilitySnapshot, TimeLabel};
use shared_models::error::AppError;

pub const PROMPT_SELECT_DATE: &str = "Please select a date first";
pub const PROMPT_SELECT_DOCTOR: &str = "Please select a doctor first";
pub const LOADING_MESSAGE: &str = "Loading available slots...";
pub const LOAD_ERROR_MESSAGE: &str = "Error loading time slots";

/// `"HH:MM"` to `"H:MM AM/PM"`. `None` for anything that is not a 24-hour label.
pub fn format_time(label: &str) -> Option<String> {
    label.parse::<TimeLabel>().ok().map(|time| time.display_12h())
}

/// State of the time-slot grid between renders.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotGrid {
    NoDate,
    NoDoctor,
    Loading,
    Loaded(AvailabilitySnapshot),
    Error(AppError),
}

impl SlotGrid {
    pub fn snapshot(&self) -> Option<&AvailabilitySnapshot> {
        match self {
            SlotGrid::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn view(&self, selected: Option<TimeLabel>) -> SlotGridView {
        match self {
            SlotGrid::NoDate => SlotGridView::Prompt(PROMPT_SELECT_DATE),
            SlotGrid::NoDoctor => SlotGridView::Prompt(PROMPT_SELECT_DOCTOR),
            SlotGrid::Loading => SlotGridView::Loading,
            SlotGrid::Error(_) => SlotGridView::Error(LOAD_ERROR_MESSAGE),
            SlotGrid::Loaded(snapshot) => SlotGridView::Loaded(
                time_labels()
                    .into_iter()
                    .map(|label| SlotButton {
                        label,
                        display: label.display_12h(),
                        selected: selected == Some(label),
                        available: snapshot.is_available(&label),
                    })
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotButton {
    pub label: TimeLabel,
    pub display: String,
    pub selected: bool,
    pub available: bool,
}

impl SlotButton {
    /// Unavailable buttons are disabled and carry no select action.
    pub fn is_clickable(&self) -> bool {
        self.available
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotGridView {
    Prompt(&'static str),
    Loading,
    Loaded(Vec<SlotButton>),
    Error(&'static str),
}

impl SlotGridView {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SlotGridView::Prompt(message) | SlotGridView::Error(message) => Some(*message),
            SlotGridView::Loading => Some(LOADING_MESSAGE),
            SlotGridView::Loaded(_) => None,
        }
    }

    pub fn buttons(&self) -> &[SlotButton] {
        match self {
            SlotGridView::Loaded(buttons) => buttons,
            _ => &[],
        }
    }
}
