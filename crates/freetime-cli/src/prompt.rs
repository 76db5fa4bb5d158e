//! Interactive prompting for the date range and working hours.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use freetime_engine::{parse_time_of_day, ClampWindow, DateRange};
use inquire::Text;

/// Ask for start date, end date, start time and end time, re-asking until
/// each answer is valid.
pub fn ask_range_and_clamp() -> Result<(DateRange, ClampWindow)> {
    let start = ask_date("Enter a start date:")?;
    let range = loop {
        let end = ask_date("Enter an end date:")?;
        match DateRange::inclusive(start, end) {
            Ok(range) => break range,
            Err(_) => println!("The end date must be after the start date."),
        }
    };

    let clamp_start = ask_time("Enter a start time:", "9:00 AM")?;
    let clamp = loop {
        let clamp_end = ask_time("Enter an end time:", "6:00 PM")?;
        match ClampWindow::new(clamp_start, clamp_end) {
            Ok(clamp) => break clamp,
            Err(_) => println!("The end time must be after the start time."),
        }
    };

    Ok((range, clamp))
}

fn ask_date(prompt: &str) -> Result<NaiveDate> {
    loop {
        let answer = Text::new(prompt)
            .with_help_message("YYYY-MM-DD")
            .prompt()
            .context("Failed to read date")?;
        match NaiveDate::parse_from_str(answer.trim(), "%Y-%m-%d") {
            Ok(date) => return Ok(date),
            Err(_) => println!("That date wasn't valid. Please try again."),
        }
    }
}

fn ask_time(prompt: &str, default: &str) -> Result<NaiveTime> {
    loop {
        let answer = Text::new(prompt)
            .with_default(default)
            .with_help_message("e.g. 9:00 AM or 17:30")
            .prompt()
            .context("Failed to read time")?;
        match parse_time_of_day(&answer) {
            Ok(time) => return Ok(time),
            Err(_) => println!("That time wasn't valid. Please try again."),
        }
    }
}
