//! Placing, moving and removing sessions.

use chrono::NaiveDate;
use examplan_core::dates::format_date;
use examplan_core::{MoveOutcome, Placement};
use std::path::Path;

use super::{CommandResult, Workspace};

pub fn place(plan: Option<&Path>, date: NaiveDate, subject: &str) -> CommandResult {
    let mut ws = Workspace::open(plan)?;
    let subject_id = ws.subject_id(subject)?;

    match ws.planner.place(date, &subject_id)? {
        Placement::Placed { entry_id, advisory } => {
            println!("Session placed: {entry_id}");
            if let Some(advisory) = advisory {
                eprintln!("warning: {advisory}");
            }
        }
        Placement::ToggledOff { entry } => {
            println!("Session removed: {} ({})", entry.id, entry.name);
        }
    }
    ws.save()
}

pub fn move_entry(plan: Option<&Path>, date: NaiveDate, entry: &str, delta: i32) -> CommandResult {
    let mut ws = Workspace::open(plan)?;
    let entry_id = ws.entry_id(date, entry);

    match ws.planner.move_entry(date, &entry_id, delta)? {
        MoveOutcome::Moved { from, to } => {
            println!("Session moved: {} -> {}", format_date(from), format_date(to));
        }
        MoveOutcome::Unchanged { date } => {
            println!("Session stays on {}", format_date(date));
        }
    }
    ws.save()
}

pub fn remove(plan: Option<&Path>, date: NaiveDate, entry: &str) -> CommandResult {
    let mut ws = Workspace::open(plan)?;
    let entry_id = ws.entry_id(date, entry);

    match ws.planner.remove_entry(date, &entry_id) {
        Some(removed) => println!("Session removed: {} ({})", removed.id, removed.name),
        None => println!("No session {entry} on {}", format_date(date)),
    }
    ws.save()
}
