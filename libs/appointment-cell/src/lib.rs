pub mod calendar;
pub mod gateway;
pub mod models;
pub mod render;
pub mod selection;
pub mod services;
pub mod slots;
pub mod widget;

pub use calendar::{CalendarDay, CalendarView, Clock, FixedClock, LocalClock, MonthDirection, ViewMonth};
pub use gateway::{ClinicGateway, HttpClinicGateway};
pub use models::*;
pub use selection::{SelectionState, SelectionSummary};
pub use slots::{format_time, SlotButton, SlotGrid, SlotGridView};
pub use widget::{BookingTicket, BookingWidget, SlotRequest, SlotResponse};
