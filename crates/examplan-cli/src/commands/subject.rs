//! Subject management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use examplan_core::dates::{format_date, parse_date};
use std::path::Path;

use super::{short_id, CommandResult, Workspace};

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Add a subject
    Add {
        /// Subject name
        name: String,
        /// Exam date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        exam: Option<NaiveDate>,
        /// Planned sessions (clamped to the configured range)
        #[arg(long)]
        sessions: Option<u32>,
    },
    /// List subjects
    List {
        #[arg(long)]
        json: bool,
    },
    /// Rename a subject
    Rename {
        /// Subject id or name
        subject: String,
        /// New name
        name: String,
    },
    /// Set or clear a subject's exam date
    Exam {
        /// Subject id or name
        subject: String,
        /// Exam date (YYYY-MM-DD); omit to clear
        #[arg(value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Set a subject's planned session count
    Sessions {
        /// Subject id or name
        subject: String,
        /// Planned sessions (clamped to the configured range)
        count: u32,
    },
    /// Remove a subject; its placed sessions stay on the calendar
    Remove {
        /// Subject id or name
        subject: String,
    },
}

pub fn run(plan: Option<&Path>, action: SubjectAction) -> CommandResult {
    let mut ws = Workspace::open(plan)?;

    match action {
        SubjectAction::Add {
            name,
            exam,
            sessions,
        } => {
            let id = ws.planner.add_subject(&name, exam, sessions)?;
            println!("Subject added: {id}");
        }
        SubjectAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(ws.planner.subjects())?);
                return Ok(());
            }
            if ws.planner.subjects().is_empty() {
                println!("No subjects");
            }
            for subject in ws.planner.subjects() {
                println!(
                    "{}  {:<16} exam {:<10}  {}/{} placed  {}",
                    short_id(&subject.id),
                    subject.name,
                    subject.exam_date.map(format_date).unwrap_or_else(|| "-".into()),
                    ws.planner.used_count(&subject.id),
                    subject.planned_sessions,
                    subject.color().to_hex(),
                );
            }
        }
        SubjectAction::Rename { subject, name } => {
            let id = ws.subject_id(&subject)?;
            ws.planner.rename_subject(&id, &name)?;
            println!("Subject renamed: {name}");
        }
        SubjectAction::Exam { subject, date } => {
            let id = ws.subject_id(&subject)?;
            ws.planner.set_exam_date(&id, date)?;
            match date {
                Some(date) => println!("Exam date set: {}", format_date(date)),
                None => println!("Exam date cleared"),
            }
            ws.warn_violations();
        }
        SubjectAction::Sessions { subject, count } => {
            let id = ws.subject_id(&subject)?;
            let planned = ws.planner.set_planned_sessions(&id, count)?;
            println!("Planned sessions: {planned}");
            ws.warn_violations();
        }
        SubjectAction::Remove { subject } => {
            let id = ws.subject_id(&subject)?;
            let removed = ws.planner.remove_subject(&id)?;
            println!("Subject removed: {}", removed.name);
            ws.warn_violations();
        }
    }

    ws.save()
}
