//! HTML fragments for the booking dialog.
//!
//! Only selectable calendar days carry `data-date` and only available slots
//! carry `data-time`; the host page wires its click handlers to those
//! attributes, so past days and booked slots never get an action.

use std::fmt::Write;

use doctor_cell::{Doctor, DoctorId};
use shared_utils::html::{class_list, escape};

use crate::calendar::{CalendarView, WEEKDAY_HEADERS};
use crate::selection::SelectionSummary;
use crate::slots::SlotGridView;

pub fn calendar_html(view: &CalendarView) -> String {
    let mut html = String::new();

    html.push_str("<div class=\"calendar-header\">");
    html.push_str("<button type=\"button\" class=\"calendar-nav\" data-month-step=\"-1\">‹</button>");
    let _ = write!(html, "<h3>{}</h3>", escape(&view.title));
    html.push_str("<button type=\"button\" class=\"calendar-nav\" data-month-step=\"1\">›</button>");
    html.push_str("</div>");

    html.push_str("<div class=\"calendar-grid\">");
    for header in WEEKDAY_HEADERS {
        let _ = write!(html, "<div class=\"calendar-day-header\">{}</div>", header);
    }
    for _ in 0..view.leading_blanks {
        html.push_str("<div class=\"calendar-day empty\"></div>");
    }
    for day in &view.days {
        let classes = class_list(
            "calendar-day",
            &[("today", day.is_today), ("past", day.is_past), ("selected", day.is_selected)],
        );
        if day.is_selectable() {
            let _ = write!(
                html,
                "<div class=\"{}\" data-date=\"{}\">{}</div>",
                classes,
                day.date.format("%Y-%m-%d"),
                day.day
            );
        } else {
            let _ = write!(html, "<div class=\"{}\">{}</div>", classes, day.day);
        }
    }
    html.push_str("</div>");

    html
}

pub fn time_slots_html(view: &SlotGridView) -> String {
    if let Some(message) = view.message() {
        return format!("<p class=\"no-selection\">{}</p>", escape(message));
    }

    let mut html = String::from("<h4>Available Time Slots</h4><div class=\"time-slots-grid\">");
    for button in view.buttons() {
        if button.is_clickable() {
            let _ = write!(
                html,
                "<button type=\"button\" class=\"{}\" data-time=\"{}\">{}</button>",
                class_list("time-slot", &[("selected", button.selected)]),
                button.label,
                escape(&button.display)
            );
        } else {
            let _ = write!(
                html,
                "<button type=\"button\" class=\"time-slot unavailable\" disabled>{}<br><small>Booked</small></button>",
                escape(&button.display)
            );
        }
    }
    html.push_str("</div>");
    html
}

pub fn doctor_options_html(doctors: &[Doctor], selected: Option<&DoctorId>) -> String {
    let mut html = String::from("<option value=\"\">Select Doctor</option>");
    for doctor in doctors {
        let marker = if selected == Some(&doctor.id) { " selected" } else { "" };
        let _ = write!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            escape(doctor.id.as_str()),
            marker,
            escape(&doctor.option_label())
        );
    }
    html
}

pub fn summary_html(summary: &SelectionSummary) -> String {
    format!(
        "<div class=\"appointment-summary\">\
         <p><strong>Date:</strong> {}</p>\
         <p><strong>Time:</strong> {}</p>\
         <p><strong>Doctor:</strong> {}</p>\
         </div>",
        escape(&summary.date),
        escape(&summary.time),
        escape(&summary.doctor)
    )
}
