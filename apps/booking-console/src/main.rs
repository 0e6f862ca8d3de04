use std::sync::Arc;

use anyhow::{bail, Context};
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod display;

use appointment_cell::{BookingWidget, ClinicGateway, HttpClinicGateway, MonthDirection};
use auth_cell::login::LoginForm;
use commands::{Command, USAGE};
use doctor_cell::{departments, filter_doctors, DoctorFilter, DoctorId};
use shared_config::ClientConfig;
use shared_models::auth::{Role, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let config = ClientConfig::from_env();
    info!("Using clinic API at {}", config.api_base_url);

    match command {
        Command::Login { role, username, password } => {
            let redirect = LoginForm::new(&username, &password, role).submit()?;
            println!("Signed in as {}, redirecting to {}", redirect.role, redirect.location);
        }
        Command::Doctors { department, search } => {
            let doctors = gateway(&config)?.list_doctors().await?;
            let filter = DoctorFilter::new(department.as_deref(), &search);
            println!("Departments: {}", departments(&doctors).join(", "));
            print!("{}", display::doctors_text(&filter_doctors(&doctors, &filter)));
        }
        Command::Calendar { offset } => {
            let mut widget = BookingWidget::open_now(gateway(&config)?, session_from(&config)?);
            let direction = if offset < 0 { MonthDirection::Previous } else { MonthDirection::Next };
            for _ in 0..offset.unsigned_abs() {
                widget.change_month(direction);
            }
            print!("{}", display::calendar_text(&widget.calendar()));
        }
        Command::Slots { doctor, date } => {
            let mut widget = BookingWidget::open_now(gateway(&config)?, session_from(&config)?);
            show_slots(&mut widget, doctor, date).await?;
        }
        Command::Book { doctor, date, time } => {
            let mut widget = BookingWidget::open_now(gateway(&config)?, session_from(&config)?);
            if let Err(e) = widget.load_doctors().await {
                warn!("Doctor names unavailable: {}", e);
            }
            show_slots(&mut widget, doctor, date).await?;
            widget.select_time(time)?;
            print!("{}", display::summary_text(&widget.summary()));

            match widget.submit().await {
                Ok(confirmation) => println!("{}", confirmation.message()),
                Err(e) => bail!(e.user_message()),
            }
        }
    }

    Ok(())
}

async fn show_slots<G: ClinicGateway>(
    widget: &mut BookingWidget<G>,
    doctor: DoctorId,
    date: chrono::NaiveDate,
) -> anyhow::Result<()> {
    widget.select_doctor(Some(doctor));
    widget.select_date(date)?;
    widget.refresh_slots().await;
    print!("{}", display::slots_text(&widget.slot_grid()));
    Ok(())
}

fn gateway(config: &ClientConfig) -> anyhow::Result<Arc<HttpClinicGateway>> {
    let gateway = HttpClinicGateway::new(config).context("Failed to build HTTP client")?;
    Ok(Arc::new(gateway))
}

fn session_from(config: &ClientConfig) -> anyhow::Result<Session> {
    let role = match config.session_role.as_deref() {
        Some(raw) => raw.parse::<Role>()?,
        None => Role::default(),
    };
    Ok(Session {
        user_id: config.session_user_id,
        role,
    })
}
