use chrono::{Datelike, Local, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Source of "today" for past-date and today highlighting.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthDirection {
    Previous,
    Next,
}

impl MonthDirection {
    /// Maps the `-1` / `+1` of the navigation arrows.
    pub fn from_step(step: i32) -> Option<Self> {
        match step {
            -1 => Some(MonthDirection::Previous),
            1 => Some(MonthDirection::Next),
            _ => None,
        }
    }
}

/// Month shown by the calendar grid. `month0` runs 0 (January) to 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ViewMonth {
    year: i32,
    month0: u32,
}

impl ViewMonth {
    pub fn new(year: i32, month0: u32) -> Option<Self> {
        (month0 < 12).then_some(Self { year, month0 })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month0(&self) -> u32 {
        self.month0
    }

    pub fn step(self, direction: MonthDirection) -> Self {
        match direction {
            MonthDirection::Previous if self.month0 == 0 => Self { year: self.year - 1, month0: 11 },
            MonthDirection::Previous => Self { month0: self.month0 - 1, ..self },
            MonthDirection::Next if self.month0 == 11 => Self { year: self.year + 1, month0: 0 },
            MonthDirection::Next => Self { month0: self.month0 + 1, ..self },
        }
    }

    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, day)
    }

    /// Day of the last date of the month: the day before the next month's 1st.
    pub fn days_in_month(&self) -> u32 {
        self.step(MonthDirection::Next)
            .day(1)
            .and_then(|first_of_next| first_of_next.pred_opt())
            .map(|last| last.day())
            .unwrap_or(0)
    }

    /// Weekday of the 1st, 0 = Sunday.
    pub fn first_weekday(&self) -> u32 {
        self.day(1)
            .map(|first| first.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }

    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month0 as usize], self.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub is_today: bool,
    pub is_past: bool,
    pub is_selected: bool,
}

impl CalendarDay {
    /// Past days never get a select action.
    pub fn is_selectable(&self) -> bool {
        !self.is_past
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    pub month: ViewMonth,
    pub title: String,
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

impl CalendarView {
    pub fn build(month: ViewMonth, today: NaiveDate, selected: Option<NaiveDate>) -> Self {
        let days = (1..=month.days_in_month())
            .filter_map(|day| month.day(day))
            .map(|date| CalendarDay {
                date,
                day: date.day(),
                is_today: date == today,
                is_past: date < today,
                is_selected: selected == Some(date),
            })
            .collect();

        Self {
            month,
            title: month.title(),
            leading_blanks: month.first_weekday(),
            days,
        }
    }

    pub fn day(&self, day: u32) -> Option<&CalendarDay> {
        self.days.iter().find(|cell| cell.day == day)
    }

    /// The grid as weeks of seven cells; blanks before the 1st and after the
    /// last day are `None`.
    pub fn weeks(&self) -> Vec<Vec<Option<&CalendarDay>>> {
        let mut cells: Vec<Option<&CalendarDay>> = (0..self.leading_blanks).map(|_| None).collect();
        cells.extend(self.days.iter().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(|week| week.to_vec()).collect()
    }
}
