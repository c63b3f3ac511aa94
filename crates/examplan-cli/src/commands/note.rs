//! Daily memo commands.

use chrono::NaiveDate;
use clap::Subcommand;
use examplan_core::dates::{format_date, parse_date};
use std::path::Path;

use super::{CommandResult, Workspace};

#[derive(Subcommand)]
pub enum NoteAction {
    /// Set the memo of a day; an empty value clears that field
    Set {
        /// Date (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
        /// Academy schedule
        #[arg(long)]
        academy: Option<String>,
        /// Homework
        #[arg(long)]
        homework: Option<String>,
    },
    /// List all memos
    List {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(plan: Option<&Path>, action: NoteAction) -> CommandResult {
    let mut ws = Workspace::open(plan)?;

    match action {
        NoteAction::Set {
            date,
            academy,
            homework,
        } => {
            if academy.is_none() && homework.is_none() {
                return Err("nothing to set; pass --academy and/or --homework".into());
            }
            ws.planner
                .set_note(date, academy.as_deref(), homework.as_deref());
            println!("Note updated: {}", format_date(date));
        }
        NoteAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(ws.planner.notes())?);
                return Ok(());
            }
            if ws.planner.notes().is_empty() {
                println!("No notes");
            }
            for (date, note) in ws.planner.notes() {
                println!("{}", format_date(*date));
                if !note.academy.is_empty() {
                    println!("  academy: {}", note.academy);
                }
                if !note.homework.is_empty() {
                    println!("  homework: {}", note.homework);
                }
            }
        }
    }

    ws.save()
}
