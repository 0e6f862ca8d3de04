use chrono::NaiveDate;

use doctor_cell::{DoctorId, TimeLabel};
use shared_models::auth::Role;
use shared_models::error::AppError;

pub const USAGE: &str = "\
usage: clinic-booking-console <command>

commands:
  doctors [--department D] [--search S]
  calendar [--offset N]
  slots --doctor ID --date YYYY-MM-DD
  book --doctor ID --date YYYY-MM-DD --time HH:MM
  login --role R --username U --password P";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Doctors {
        department: Option<String>,
        search: String,
    },
    Calendar {
        offset: i32,
    },
    Slots {
        doctor: DoctorId,
        date: NaiveDate,
    },
    Book {
        doctor: DoctorId,
        date: NaiveDate,
        time: TimeLabel,
    },
    Login {
        role: Role,
        username: String,
        password: String,
    },
}

impl Command {
    /// Parses the arguments after the program name.
    pub fn parse(args: &[String]) -> Result<Command, AppError> {
        let (name, rest) = args
            .split_first()
            .ok_or_else(|| invalid("missing command"))?;
        let flags = Flags::parse(rest)?;

        let command = match name.as_str() {
            "doctors" => {
                flags.only(&["department", "search"])?;
                Command::Doctors {
                    department: flags.get("department").map(str::to_string),
                    search: flags.get("search").unwrap_or_default().to_string(),
                }
            }
            "calendar" => {
                flags.only(&["offset"])?;
                let offset = match flags.get("offset") {
                    Some(raw) => raw
                        .parse()
                        .map_err(|_| invalid(&format!("--offset must be an integer, got {}", raw)))?,
                    None => 0,
                };
                Command::Calendar { offset }
            }
            "slots" => {
                flags.only(&["doctor", "date"])?;
                Command::Slots {
                    doctor: DoctorId::new(flags.require("doctor")?),
                    date: parse_date(flags.require("date")?)?,
                }
            }
            "book" => {
                flags.only(&["doctor", "date", "time"])?;
                Command::Book {
                    doctor: DoctorId::new(flags.require("doctor")?),
                    date: parse_date(flags.require("date")?)?,
                    time: flags.require("time")?.parse()?,
                }
            }
            "login" => {
                flags.only(&["role", "username", "password"])?;
                Command::Login {
                    role: flags.get("role").map(str::parse::<Role>).transpose()?.unwrap_or_default(),
                    username: flags.get("username").unwrap_or_default().to_string(),
                    password: flags.get("password").unwrap_or_default().to_string(),
                }
            }
            other => return Err(invalid(&format!("unknown command {}", other))),
        };

        Ok(command)
    }
}

struct Flags<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> Flags<'a> {
    fn parse(args: &'a [String]) -> Result<Self, AppError> {
        let mut pairs = Vec::new();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            let name = arg
                .strip_prefix("--")
                .ok_or_else(|| invalid(&format!("unexpected argument {}", arg)))?;
            let value = iter
                .next()
                .ok_or_else(|| invalid(&format!("--{} needs a value", name)))?;
            pairs.push((name, value.as_str()));
        }

        Ok(Self { pairs })
    }

    fn get(&self, name: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .rev()
            .find(|(flag, _)| *flag == name)
            .map(|(_, value)| *value)
    }

    fn require(&self, name: &str) -> Result<&'a str, AppError> {
        self.get(name)
            .ok_or_else(|| invalid(&format!("--{} is required", name)))
    }

    fn only(&self, allowed: &[&str]) -> Result<(), AppError> {
        match self.pairs.iter().find(|(flag, _)| !allowed.contains(flag)) {
            Some((flag, _)) => Err(invalid(&format!("unknown option --{}", flag))),
            None => Ok(()),
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| invalid(&format!("dates are YYYY-MM-DD, got {}", raw)))
}

fn invalid(message: &str) -> AppError {
    AppError::ValidationError(message.to_string())
}
