//! Mastery checklist commands.

use clap::Subcommand;
use examplan_core::ValidationError;
use std::path::Path;

use super::{CommandResult, Workspace};

#[derive(Subcommand)]
pub enum MasteryAction {
    /// Flip one mastery cell
    Toggle {
        /// Subject id or name
        subject: String,
        /// Cell number, starting at 1
        cell: u32,
    },
    /// Show the checklist of every subject
    Show {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(plan: Option<&Path>, action: MasteryAction) -> CommandResult {
    let mut ws = Workspace::open(plan)?;

    match action {
        MasteryAction::Toggle { subject, cell } => {
            let id = ws.subject_id(&subject)?;
            let index = cell.checked_sub(1).ok_or_else(|| ValidationError::InvalidValue {
                field: "cell".into(),
                message: "cells are numbered from 1".into(),
            })?;
            let mastered = ws.planner.toggle_mastery(&id, index)?;
            println!(
                "Cell {cell} {}",
                if mastered { "mastered" } else { "cleared" }
            );
        }
        MasteryAction::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(ws.planner.mastery())?);
                return Ok(());
            }
            for subject in ws.planner.subjects() {
                let row = ws.planner.mastery().row(subject);
                let cells: String = row
                    .iter()
                    .map(|&done| if done { "[x]" } else { "[ ]" })
                    .collect();
                println!(
                    "{:<16} {cells} {}/{}",
                    subject.name,
                    ws.planner.mastery().mastered_count(subject),
                    subject.planned_sessions
                );
            }
        }
    }

    ws.save()
}
