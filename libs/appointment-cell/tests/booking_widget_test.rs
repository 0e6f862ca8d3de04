use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::{
    BookingWidget, BookingWidgetError, FixedClock, HttpClinicGateway, SelectionState, SlotGridView,
    BOOKING_FAILURE_MESSAGE,
};
use doctor_cell::{DoctorId, TimeLabel};
use shared_models::auth::Session;
use shared_models::error::AppError;
use shared_utils::test_utils::{date, MockClinicResponses, TestConfig};

type Widget = BookingWidget<HttpClinicGateway, FixedClock>;

fn open_widget(mock_server: &MockServer, session: Session) -> Widget {
    let config = TestConfig::with_base_url(&mock_server.uri()).to_client_config();
    let gateway = HttpClinicGateway::new(&config).unwrap();
    BookingWidget::open(Arc::new(gateway), FixedClock(date(2024, 3, 10)), session)
}

fn label(raw: &str) -> TimeLabel {
    raw.parse().unwrap()
}

async fn mount_availability(mock_server: &MockServer, doctor: &str, day: &str, available: &[&str], delay: Option<Duration>) {
    let numeric: i64 = doctor.parse().unwrap();
    let mut response = ResponseTemplate::new(200)
        .set_body_json(MockClinicResponses::availability(numeric, day, available, &[]));
    if let Some(delay) = delay {
        response = response.set_delay(delay);
    }

    Mock::given(method("GET"))
        .and(path(format!("/doctor/availability/{}", doctor)))
        .and(query_param("date", day))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

async fn select_slot(widget: &mut Widget) {
    widget.load_doctors().await.unwrap();
    widget.select_doctor(Some(DoctorId::from("00007")));
    widget.select_date(date(2024, 3, 15)).unwrap();
    assert!(widget.refresh_slots().await);
    widget.select_time(label("14:30")).unwrap();
}

async fn mount_directory(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/admin/doctors-list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockClinicResponses::doctors_list()))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_end_to_end_booking() {
    let mock_server = MockServer::start().await;
    mount_directory(&mock_server).await;
    mount_availability(&mock_server, "00007", "2024-03-15", &["09:00", "14:30"], None).await;

    Mock::given(method("POST"))
        .and(path("/admin/appointment"))
        .and(body_json(json!({
            "patient_id": 42,
            "doctor_id": 7,
            "appointment_time": "2024-03-15 14:30:00",
            "status": "pending"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockClinicResponses::appointment_created(42, 7, "2024-03-15 14:30:00")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut widget = open_widget(&mock_server, Session::patient(42));
    select_slot(&mut widget).await;

    let summary = widget.summary();
    assert_eq!(summary.date, "Friday, March 15, 2024");
    assert_eq!(summary.time, "2:30 PM");
    assert_eq!(summary.doctor, "Dr. Michael Brown (Orthopedics)");

    let confirmation = widget.submit().await.unwrap();
    assert_eq!(confirmation.message(), "Appointment booked successfully!");

    assert!(!widget.is_open());
    assert_eq!(widget.state(), &SelectionState::new(date(2024, 3, 10)));
}

#[tokio::test]
async fn test_rejected_booking_shows_server_detail() {
    let mock_server = MockServer::start().await;
    mount_directory(&mock_server).await;
    mount_availability(&mock_server, "00007", "2024-03-15", &["14:30"], None).await;

    Mock::given(method("POST"))
        .and(path("/admin/appointment"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(MockClinicResponses::error_response(
                "Doctor already has an appointment at this time",
            )),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut widget = open_widget(&mock_server, Session::patient(42));
    select_slot(&mut widget).await;
    let before = widget.state().clone();

    let err = widget.submit().await.unwrap_err();

    assert_matches!(&err, BookingWidgetError::Api(AppError::Server { status: 400, .. }));
    assert_eq!(
        err.user_message(),
        "Error booking appointment: Doctor already has an appointment at this time"
    );
    assert_eq!(widget.state(), &before);
    assert!(widget.is_open());
}

#[tokio::test]
async fn test_booking_timeout_shows_generic_failure() {
    let mock_server = MockServer::start().await;
    mount_directory(&mock_server).await;
    mount_availability(&mock_server, "00007", "2024-03-15", &["14:30"], None).await;

    Mock::given(method("POST"))
        .and(path("/admin/appointment"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(8)))
        .mount(&mock_server)
        .await;

    let mut config = TestConfig::with_base_url(&mock_server.uri());
    config.request_timeout_secs = 1;
    let gateway = HttpClinicGateway::new(&config.to_client_config()).unwrap();
    let mut widget = BookingWidget::open(Arc::new(gateway), FixedClock(date(2024, 3, 10)), config.session());
    select_slot(&mut widget).await;

    let err = widget.submit().await.unwrap_err();

    assert_matches!(err, BookingWidgetError::Api(AppError::Timeout { .. }));
    assert_eq!(err.user_message(), BOOKING_FAILURE_MESSAGE);
    assert_eq!(widget.state().selected_time(), Some(label("14:30")));
    assert!(!widget.is_submitting());
}

#[tokio::test]
async fn test_duplicate_submit_sends_one_request() {
    let mock_server = MockServer::start().await;
    mount_directory(&mock_server).await;
    mount_availability(&mock_server, "00007", "2024-03-15", &["14:30"], None).await;

    Mock::given(method("POST"))
        .and(path("/admin/appointment"))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_millis(200)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut widget = open_widget(&mock_server, Session::patient(42));
    select_slot(&mut widget).await;

    let ticket = widget.begin_submit().unwrap();
    // Second click while the first request is pending.
    assert_matches!(widget.begin_submit(), Err(BookingWidgetError::SubmissionInFlight));

    let outcome = widget.send_booking(&ticket).await;
    assert!(widget.complete_submit(ticket, outcome).is_ok());
}

#[tokio::test]
async fn test_stale_availability_is_discarded() {
    let mock_server = MockServer::start().await;
    mount_availability(
        &mock_server,
        "00001",
        "2024-03-15",
        &["09:00"],
        Some(Duration::from_millis(500)),
    )
    .await;
    mount_availability(&mock_server, "00002", "2024-03-16", &["16:00", "16:30"], None).await;

    let mut widget = open_widget(&mock_server, Session::patient(42));

    widget.select_doctor(Some(DoctorId::from("00001")));
    let first = widget.select_date(date(2024, 3, 15)).unwrap().unwrap();
    widget.select_doctor(Some(DoctorId::from("00002")));
    let second = widget.select_date(date(2024, 3, 16)).unwrap().unwrap();

    let (slow, fast) = futures::join!(widget.fetch_slots(first), widget.fetch_slots(second));

    // Applied in arrival order: the fast, newer response first.
    assert!(widget.apply_slots(fast));
    assert!(!widget.apply_slots(slow));

    let view = widget.slot_grid();
    let open: Vec<String> = view
        .buttons()
        .iter()
        .filter(|button| button.is_clickable())
        .map(|button| button.label.to_string())
        .collect();
    assert_eq!(open, vec!["16:00", "16:30"]);
}

#[tokio::test]
async fn test_availability_failure_renders_error_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctor/availability/00007"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "booked_slots": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut widget = open_widget(&mock_server, Session::patient(42));
    widget.select_doctor(Some(DoctorId::from("00007")));
    widget.select_date(date(2024, 3, 15)).unwrap();
    assert!(widget.refresh_slots().await);

    assert_eq!(widget.slot_grid(), SlotGridView::Error("Error loading time slots"));
    assert_matches!(
        widget.select_time(label("09:00")),
        Err(BookingWidgetError::SlotUnavailable(_))
    );
}

#[tokio::test]
async fn test_prompts_make_no_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut widget = open_widget(&mock_server, Session::patient(42));
    assert!(widget.select_date(date(2024, 3, 15)).unwrap().is_none());
    assert!(widget.refresh_slots().await);

    assert_eq!(widget.slot_grid().message(), Some("Please select a doctor first"));
}

#[tokio::test]
async fn test_gateway_error_page_shows_generic_failure() {
    let mock_server = MockServer::start().await;
    mount_directory(&mock_server).await;
    mount_availability(&mock_server, "00007", "2024-03-15", &["14:30"], None).await;

    Mock::given(method("POST"))
        .and(path("/admin/appointment"))
        .respond_with(
            ResponseTemplate::new(502)
                .insert_header("content-type", "text/html")
                .set_body_string("<html>Bad Gateway</html>"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut widget = open_widget(&mock_server, Session::patient(42));
    select_slot(&mut widget).await;

    let err = widget.submit().await.unwrap_err();

    assert_matches!(err, BookingWidgetError::Api(AppError::InvalidResponse(_)));
    assert_eq!(err.user_message(), BOOKING_FAILURE_MESSAGE);
    assert_eq!(widget.state().selected_time(), Some(label("14:30")));
}

#[tokio::test]
async fn test_abandoned_submit_can_be_retried() {
    let mock_server = MockServer::start().await;
    mount_directory(&mock_server).await;
    mount_availability(&mock_server, "00007", "2024-03-15", &["14:30"], None).await;

    Mock::given(method("POST"))
        .and(path("/admin/appointment"))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let mut widget = open_widget(&mock_server, Session::patient(42));
    select_slot(&mut widget).await;

    let attempt = tokio::time::timeout(Duration::from_millis(100), widget.submit()).await;
    assert!(attempt.is_err());
    assert!(!widget.is_submitting());

    widget.close();
    assert!(!widget.is_submitting());

    select_slot(&mut widget).await;
    assert!(widget.begin_submit().is_ok());
}

#[tokio::test]
async fn test_date_change_puts_loaded_grid_back_to_loading() {
    let mock_server = MockServer::start().await;
    mount_directory(&mock_server).await;
    mount_availability(&mock_server, "00007", "2024-03-15", &["09:00", "14:30"], None).await;
    mount_availability(&mock_server, "00007", "2024-03-18", &["10:00"], None).await;

    let mut widget = open_widget(&mock_server, Session::patient(42));
    select_slot(&mut widget).await;
    assert_matches!(widget.slot_grid(), SlotGridView::Loaded(_));

    let request = widget.select_date(date(2024, 3, 18)).unwrap().unwrap();

    assert_eq!(widget.slot_grid(), SlotGridView::Loading);
    assert_eq!(widget.state().selected_time(), None);
    assert_matches!(
        widget.select_time(label("14:30")),
        Err(BookingWidgetError::SlotUnavailable(_))
    );

    let response = widget.fetch_slots(request).await;
    assert!(widget.apply_slots(response));
    assert_matches!(
        widget.select_time(label("14:30")),
        Err(BookingWidgetError::SlotUnavailable(_))
    );
    widget.select_time(label("10:00")).unwrap();
}
