use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, error, warn};
use uuid::Uuid;

use doctor_cell::{AvailabilitySnapshot, Doctor, DoctorId, TimeLabel};
use shared_models::auth::Session;
use shared_models::error::AppError;

use crate::calendar::{CalendarView, Clock, LocalClock, MonthDirection};
use crate::gateway::ClinicGateway;
use crate::models::{BookingConfirmation, BookingRequest, BookingWidgetError};
use crate::selection::{SelectionState, SelectionSummary};
use crate::slots::{SlotGrid, SlotGridView};

/// An availability fetch that has been issued but not applied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRequest {
    pub generation: u64,
    pub doctor_id: DoctorId,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotResponse {
    pub generation: u64,
    pub result: Result<AvailabilitySnapshot, AppError>,
}

/// A booking that passed validation and holds the submit guard until it is
/// completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingTicket {
    pub request: BookingRequest,
}

/// The appointment booking dialog: month calendar, doctor picker and slot grid
/// over one [`SelectionState`].
///
/// Event handlers take `&mut self` and run to completion. The two network
/// calls are split into begin / fetch / apply steps so the caller can let
/// other events through while a request is pending:
///
/// * every availability request is tagged with a generation number and only
///   the response for the latest generation is applied;
/// * a submission holds an in-flight flag until it completes, and a second
///   submission is refused meanwhile.
pub struct BookingWidget<G: ClinicGateway, C: Clock = LocalClock> {
    id: Uuid,
    gateway: Arc<G>,
    clock: C,
    session: Session,
    state: SelectionState,
    doctors: Vec<Doctor>,
    slots: SlotGrid,
    generation: u64,
    submitting: bool,
    open: bool,
}

impl<G: ClinicGateway> BookingWidget<G, LocalClock> {
    pub fn open_now(gateway: Arc<G>, session: Session) -> Self {
        Self::open(gateway, LocalClock, session)
    }
}

impl<G: ClinicGateway, C: Clock> BookingWidget<G, C> {
    pub fn open(gateway: Arc<G>, clock: C, session: Session) -> Self {
        let today = clock.today();
        let id = Uuid::new_v4();
        debug!(widget_id = %id, "Booking dialog opened on {}", today);

        Self {
            id,
            gateway,
            clock,
            session,
            state: SelectionState::new(today),
            doctors: Vec::new(),
            slots: SlotGrid::NoDate,
            generation: 0,
            submitting: false,
            open: true,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Fills the doctor picker. A failed fetch leaves the picker empty.
    pub async fn load_doctors(&mut self) -> Result<&[Doctor], AppError> {
        match self.gateway.list_doctors().await {
            Ok(doctors) => {
                debug!(widget_id = %self.id, "Loaded {} doctors", doctors.len());
                self.doctors = doctors;
                Ok(&self.doctors)
            }
            Err(e) => {
                error!(widget_id = %self.id, "Error fetching doctors: {}", e);
                self.doctors.clear();
                Err(e)
            }
        }
    }

    pub fn change_month(&mut self, direction: MonthDirection) {
        self.state.change_month(direction);
    }

    pub fn calendar(&self) -> CalendarView {
        CalendarView::build(self.state.view(), self.clock.today(), self.state.selected_date())
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<Option<SlotRequest>, BookingWidgetError> {
        self.state.select_date(date, self.clock.today())?;
        Ok(self.begin_slot_refresh())
    }

    pub fn select_doctor(&mut self, doctor: Option<DoctorId>) -> Option<SlotRequest> {
        self.state.select_doctor(doctor);
        self.begin_slot_refresh()
    }

    /// Starts a new generation of the slot grid. Any response still in flight
    /// for an older generation is ignored when it lands.
    pub fn begin_slot_refresh(&mut self) -> Option<SlotRequest> {
        self.generation += 1;

        let Some(date) = self.state.selected_date() else {
            self.slots = SlotGrid::NoDate;
            return None;
        };
        let Some(doctor_id) = self.state.selected_doctor().cloned() else {
            self.slots = SlotGrid::NoDoctor;
            return None;
        };

        self.slots = SlotGrid::Loading;
        Some(SlotRequest {
            generation: self.generation,
            doctor_id,
            date,
        })
    }

    pub async fn fetch_slots(&self, request: SlotRequest) -> SlotResponse {
        let result = self.gateway.available_slots(&request.doctor_id, request.date).await;
        SlotResponse {
            generation: request.generation,
            result,
        }
    }

    /// Returns whether the response was current and got applied.
    pub fn apply_slots(&mut self, response: SlotResponse) -> bool {
        if response.generation != self.generation {
            debug!(
                widget_id = %self.id,
                "Discarding availability for generation {} (current {})",
                response.generation, self.generation
            );
            return false;
        }

        self.slots = match response.result {
            Ok(snapshot) => SlotGrid::Loaded(snapshot),
            Err(e) => {
                error!(widget_id = %self.id, "Error fetching availability: {}", e);
                SlotGrid::Error(e)
            }
        };
        true
    }

    pub async fn refresh_slots(&mut self) -> bool {
        match self.begin_slot_refresh() {
            Some(request) => {
                let response = self.fetch_slots(request).await;
                self.apply_slots(response)
            }
            None => true,
        }
    }

    pub fn slot_grid(&self) -> SlotGridView {
        self.slots.view(self.state.selected_time())
    }

    pub fn select_time(&mut self, label: TimeLabel) -> Result<(), BookingWidgetError> {
        let available = self
            .slots
            .snapshot()
            .map_or(false, |snapshot| snapshot.is_available(&label));
        if !available {
            return Err(BookingWidgetError::SlotUnavailable(label));
        }

        self.state.select_time(label);
        Ok(())
    }

    pub fn summary(&self) -> SelectionSummary {
        self.state.summary(&self.doctors)
    }

    /// Validates the selection and takes the submit guard.
    pub fn begin_submit(&mut self) -> Result<BookingTicket, BookingWidgetError> {
        if self.submitting {
            warn!(widget_id = %self.id, "Ignoring submit while a booking is in flight");
            return Err(BookingWidgetError::SubmissionInFlight);
        }

        let (Some(date), Some(time), Some(doctor_id)) = (
            self.state.selected_date(),
            self.state.selected_time(),
            self.state.selected_doctor(),
        ) else {
            return Err(BookingWidgetError::IncompleteSelection);
        };

        let patient_id = self
            .session
            .patient_id()
            .ok_or(BookingWidgetError::MissingPatient)?;
        let doctor = doctor_id
            .numeric()
            .ok_or_else(|| BookingWidgetError::InvalidDoctorId(doctor_id.clone()))?;

        let request = BookingRequest::pending(patient_id, doctor, date, time);
        self.submitting = true;
        debug!(widget_id = %self.id, "Submitting booking for {}", request.appointment_time);

        Ok(BookingTicket { request })
    }

    pub async fn send_booking(&self, ticket: &BookingTicket) -> Result<(), AppError> {
        self.gateway.create_appointment(&ticket.request).await
    }

    /// Releases the submit guard. Success resets the selection and closes the
    /// dialog; any failure keeps the selection so the user can retry.
    pub fn complete_submit(
        &mut self,
        ticket: BookingTicket,
        outcome: Result<(), AppError>,
    ) -> Result<BookingConfirmation, BookingWidgetError> {
        self.submitting = false;

        match outcome {
            Ok(()) => {
                debug!(widget_id = %self.id, "Booking confirmed, resetting dialog");
                self.close();
                Ok(BookingConfirmation {
                    request: ticket.request,
                })
            }
            Err(e) => {
                warn!(widget_id = %self.id, "Booking failed: {}", e);
                Err(BookingWidgetError::Api(e))
            }
        }
    }

    /// Runs a whole submission. The submit guard is released even if this
    /// future is dropped before the request completes.
    pub async fn submit(&mut self) -> Result<BookingConfirmation, BookingWidgetError> {
        let ticket = self.begin_submit()?;
        let gateway = Arc::clone(&self.gateway);

        let in_flight = SubmitGuard {
            submitting: &mut self.submitting,
        };
        let outcome = gateway.create_appointment(&ticket.request).await;
        drop(in_flight);

        self.complete_submit(ticket, outcome)
    }

    /// Back to the just-opened state, and marks the dialog closed.
    pub fn close(&mut self) {
        self.state.reset(self.clock.today());
        self.slots = SlotGrid::NoDate;
        self.generation += 1;
        self.submitting = false;
        self.open = false;
        debug!(widget_id = %self.id, "Booking dialog closed");
    }
}

/// Clears the in-flight flag when a submission ends, however it ends.
struct SubmitGuard<'a> {
    submitting: &'a mut bool,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        *self.submitting = false;
    }
}
