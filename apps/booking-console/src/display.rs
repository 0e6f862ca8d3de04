use std::fmt::Write;

use appointment_cell::calendar::WEEKDAY_HEADERS;
use appointment_cell::{CalendarView, SelectionSummary, SlotGridView};
use doctor_cell::Doctor;

/// Month grid as text. Past days are wrapped in parentheses, today in
/// brackets and the selected day is starred.
pub fn calendar_text(view: &CalendarView) -> String {
    let mut out = format!("{:^35}\n", view.title);
    for header in WEEKDAY_HEADERS {
        let _ = write!(out, "{:>5}", header);
    }
    out.push('\n');

    for week in view.weeks() {
        for cell in week {
            let text = match cell {
                None => String::new(),
                Some(day) if day.is_selected => format!("*{}", day.day),
                Some(day) if day.is_today => format!("[{}]", day.day),
                Some(day) if day.is_past => format!("({})", day.day),
                Some(day) => day.day.to_string(),
            };
            let _ = write!(out, "{:>5}", text);
        }
        out.push('\n');
    }
    out
}

pub fn slots_text(view: &SlotGridView) -> String {
    if let Some(message) = view.message() {
        return format!("{}\n", message);
    }

    let mut out = String::from("Available Time Slots\n");
    for button in view.buttons() {
        let marker = if button.selected { "*" } else { " " };
        let state = if button.is_clickable() { button.label.to_string() } else { "Booked".to_string() };
        let _ = writeln!(out, "{} {:>8}  {}", marker, button.display, state);
    }
    out
}

pub fn doctors_text(doctors: &[&Doctor]) -> String {
    if doctors.is_empty() {
        return "No doctors found\n".to_string();
    }

    let mut out = String::new();
    for doctor in doctors {
        let _ = writeln!(out, "{:<8} {}", doctor.id, doctor.option_label());
    }
    out
}

pub fn summary_text(summary: &SelectionSummary) -> String {
    format!(
        "Date:   {}\nTime:   {}\nDoctor: {}\n",
        summary.date, summary.time, summary.doctor
    )
}
