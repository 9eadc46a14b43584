//! Synthetic contribution graph. Decorative only: the numbers are random
//! per launch, shaped to favour weekdays and to thin out every fourth week.

use chrono::{Datelike, Duration as ChronoDuration, NaiveDate};
use rand::Rng;

pub const WEEKS: usize = 52;
pub const DAYS_PER_WEEK: usize = 7;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ContributionDay {
    pub date: NaiveDate,
    /// Intensity 0..=4.
    pub level: u8,
    pub contributions: u32,
}

impl ContributionDay {
    pub fn tooltip(&self) -> String {
        let date = self.date.format("%b %-d, %Y");
        let range = match self.level {
            0 => return format!("No contributions on {}", date),
            1 => "1-2",
            2 => "3-7",
            3 => "6-13",
            _ => "10+",
        };
        format!("{} contributions on {}", range, date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLabel {
    pub name: &'static str,
    pub week: usize,
    /// Weeks until the next label (or the end of the grid).
    pub span_weeks: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContributionGraph {
    pub start: NaiveDate,
    /// Day cells, week-major: index = week * 7 + day.
    pub days: Vec<ContributionDay>,
    pub months: Vec<MonthLabel>,
    pub total: u32,
}

impl ContributionGraph {
    /// Build the grid for the 52 weeks ending yesterday.
    pub fn generate<R: Rng>(today: NaiveDate, rng: &mut R) -> Self {
        let start = today - ChronoDuration::days((WEEKS * DAYS_PER_WEEK) as i64);
        let months = month_labels(start);

        let mut days = Vec::with_capacity(WEEKS * DAYS_PER_WEEK);
        let mut total = 0u32;
        for offset in 0..WEEKS * DAYS_PER_WEEK {
            let date = start + ChronoDuration::days(offset as i64);
            if date > today {
                continue;
            }
            let (level, contributions) = roll_day(date, rng);
            total += contributions;
            days.push(ContributionDay { date, level, contributions });
        }

        Self { start, days, months, total }
    }

    pub fn total_label(&self) -> String {
        format!("{} contributions", format_thousands(self.total as u64))
    }

    /// Cell at `(week, day)`, if that date is not in the future.
    pub fn cell(&self, week: usize, day: usize) -> Option<&ContributionDay> {
        self.days.get(week * DAYS_PER_WEEK + day)
    }

    /// How many cells have popped in after `elapsed_ms` (one every 2ms).
    pub fn visible_cells(&self, elapsed_ms: u128) -> usize {
        ((elapsed_ms / 2) as usize + 1).min(self.days.len())
    }
}

fn roll_day<R: Rng>(date: NaiveDate, rng: &mut R) -> (u8, u32) {
    let weekday = date.weekday().num_days_from_sunday();
    let base_chance = if (1..=5).contains(&weekday) { 0.65 } else { 0.35 };
    let quiet_week = (date.ordinal0() / 7) % 4 == 2;
    let chance = if quiet_week { base_chance * 0.3 } else { base_chance };

    if rng.gen::<f64>() >= chance {
        return (0, 0);
    }

    let intensity = rng.gen::<f64>();
    let level = if intensity < 0.4 {
        1
    } else if intensity < 0.7 {
        2
    } else if intensity < 0.9 {
        3
    } else {
        4
    };
    let contributions = match level {
        1 => rng.gen_range(1..=3),
        2 => rng.gen_range(3..=7),
        3 => rng.gen_range(6..=13),
        _ => rng.gen_range(10..=21),
    };
    (level, contributions)
}

fn month_labels(start: NaiveDate) -> Vec<MonthLabel> {
    let mut labels: Vec<MonthLabel> = Vec::new();
    let mut last_month = None;
    for week in 0..WEEKS {
        let week_start = start + ChronoDuration::days((week * DAYS_PER_WEEK) as i64);
        let month = week_start.month0() as usize;
        if last_month != Some(month) {
            if let Some(prev) = labels.last_mut() {
                prev.span_weeks = week - prev.week;
            }
            labels.push(MonthLabel { name: MONTHS[month], week, span_weeks: 0 });
            last_month = Some(month);
        }
    }
    if let Some(last) = labels.last_mut() {
        last.span_weeks = WEEKS - last.week;
    }
    labels
}

/// `1234567` -> `"1,234,567"`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
