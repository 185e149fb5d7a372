use std::{
    env,
    io::{self, Write},
    process::{Command, Stdio},
};

use chrono::{Datelike, Local, NaiveDate};
use uuid::Uuid;

use when4meet::{
    availability::{Availability, TimeSlots, encode},
    event::{EventDraft, month_cells, week_start},
    storage::{AvailabilityStore, Config, SqliteStore},
};

pub const USAGE: &str = "Usage: when4meet [--user NAME] [--event ID]
       when4meet --create NAME YYYY-MM-DD [YYYY-MM-DD ...]
       when4meet --users
       when4meet --week NAME YYYY-MM-DD";

#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    Session { user: Option<String>, event: Option<Uuid> },
    Create { name: String, dates: Vec<NaiveDate> },
    Users,
    Week { user: String, date: NaiveDate },
    Help,
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    parse_args(env::args().skip(1))
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliMode, String> {
    let mut user = None;
    let mut event = None;
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--user" => {
                user = Some(args.next().ok_or("--user requires a name")?);
            }
            "--event" => {
                let id = args.next().ok_or("--event requires an event id")?;
                event = Some(Uuid::parse_str(&id).map_err(|_| format!("Invalid event id '{}'", id))?);
            }
            "--create" => {
                let name = args.next().ok_or("--create requires an event name")?;
                let mut dates = Vec::new();
                while let Some(next) = args.next_if(|a| !a.starts_with("--")) {
                    dates.push(parse_date(&next)?);
                }
                return Ok(CliMode::Create { name, dates });
            }
            "--users" => return Ok(CliMode::Users),
            "--week" => {
                let user = args.next().ok_or("--week requires a participant name")?;
                let date = args.next().ok_or("--week requires a date")?;
                return Ok(CliMode::Week {
                    user,
                    date: parse_date(&date)?,
                });
            }
            "--help" | "-h" => return Ok(CliMode::Help),
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(CliMode::Session { user, event })
}

fn parse_date(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD.", text))
}

fn open_store(config: &Config) -> Result<SqliteStore, io::Error> {
    SqliteStore::open(&config.storage.database_path).map_err(|e| io::Error::other(e.to_string()))
}

pub fn run_create_mode(config: &Config, name: &str, dates: &[NaiveDate]) -> Result<(), io::Error> {
    let today = Local::now().date_naive();
    let mut draft = EventDraft::new(today);
    draft.name = name.to_string();
    for date in dates {
        if !draft.toggle_date(*date, today) {
            eprintln!("Skipping {}: date is in the past", date);
        }
    }

    let event = match draft.build() {
        Ok(event) => event,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(());
        }
    };

    let store = open_store(config)?;
    store
        .store_event(&event)
        .map_err(|e| io::Error::other(e.to_string()))?;
    tracing::info!("Created event {} ({})", event.name, event.id);

    println!("Created \"{}\" on {}", event.name, draft.selected_dates_text());
    println!();
    println!("{}", format_draft_calendar(&draft));
    println!();
    println!("{}", event.id);
    Ok(())
}

/// Month grids for every month holding a picked date, picked days marked `*`.
fn format_draft_calendar(draft: &EventDraft) -> String {
    let Some(last) = draft.dates().last().copied() else {
        return String::new();
    };

    let mut picker = draft.clone();
    let mut blocks = Vec::new();
    while picker.month() <= last {
        let month = picker.month();
        if draft
            .dates()
            .any(|d| d.year() == month.year() && d.month() == month.month())
        {
            let mut lines = vec![
                month.format("%B %Y").to_string(),
                "Su Mo Tu We Th Fr Sa".to_string(),
            ];
            for week in month_cells(month.year(), month.month()).chunks(7) {
                let row: String = week
                    .iter()
                    .map(|cell| match (*cell).and_then(|day| month.with_day(day)) {
                        Some(date) if draft.is_selected(date) => format!("{:>2}*", date.day()),
                        Some(date) => format!("{:>2} ", date.day()),
                        None => "   ".to_string(),
                    })
                    .collect();
                lines.push(row.trim_end().to_string());
            }
            blocks.push(lines.join("\n"));
        }

        picker.next_month();
        if picker.month() == month {
            break;
        }
    }

    blocks.join("\n\n")
}

pub fn run_users_mode(config: &Config) -> Result<(), io::Error> {
    let store = open_store(config)?;
    let names = store
        .list_user_names()
        .map_err(|e| io::Error::other(e.to_string()))?;

    if names.is_empty() {
        println!("No participants yet.");
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

pub fn run_week_mode(config: &Config, user_name: &str, date: NaiveDate) -> Result<(), io::Error> {
    let store = open_store(config)?;
    let known = store
        .list_user_names()
        .map_err(|e| io::Error::other(e.to_string()))?;
    if !known.iter().any(|n| n == user_name) {
        eprintln!("Unknown participant '{}'", user_name);
        return Ok(());
    }

    let user = store
        .find_or_create_user(user_name)
        .map_err(|e| io::Error::other(e.to_string()))?;
    let start = week_start(date, config.grid.first_weekday());
    let times = config.grid.time_slots();
    let values = store
        .get_weekly_availability(user.id, start)
        .map_err(|e| io::Error::other(e.to_string()))?
        .unwrap_or_else(|| vec![Availability::Unavailable; times.week_len()]);

    display_with_pager(&format_week_text(&user.name, start, &times, &values))
}

fn format_week_text(user: &str, start: NaiveDate, times: &TimeSlots, values: &[Availability]) -> String {
    let mut lines = Vec::new();
    lines.push(format!("{}: week of {}", user, start.format("%A, %B %-d, %Y")));
    lines.push(String::new());

    let per_day = times.len().max(1);
    for (offset, day) in values.chunks(per_day).enumerate() {
        let Some(date) = start.checked_add_days(chrono::Days::new(offset as u64)) else {
            break;
        };
        lines.push(format!("{}  {}", date.format("%a %m/%d"), encode(day)));
    }

    let count = |level| values.iter().filter(|v| **v == level).count();
    lines.push(String::new());
    lines.push(format!(
        "{} available blocks, {} if-needed blocks",
        count(Availability::Available),
        count(Availability::IfNeeded)
    ));

    lines.join("\n")
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            println!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd).args(&args).stdin(Stdio::piped()).spawn() {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            println!("{text}");
        }
    }

    Ok(())
}
