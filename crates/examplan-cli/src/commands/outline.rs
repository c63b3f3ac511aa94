//! Outline commands: edit a subject's topic list and preview how it splits
//! over the subject's sessions.

use clap::Subcommand;
use examplan_core::dates::format_date;
use examplan_core::OutlineDistributor;
use std::path::{Path, PathBuf};

use super::{CommandResult, Workspace};

#[derive(Subcommand)]
pub enum OutlineAction {
    /// Replace a subject's outline (one topic per line)
    Set {
        /// Subject id or name
        subject: String,
        /// Outline text; read from --file or stdin when omitted
        text: Option<String>,
        /// Read the outline from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },
    /// Print a subject's outline
    Show {
        /// Subject id or name
        subject: String,
    },
    /// Show which topics each session slot receives
    Preview {
        /// Subject id or name
        subject: String,
    },
}

pub fn run(plan: Option<&Path>, action: OutlineAction) -> CommandResult {
    let mut ws = Workspace::open(plan)?;

    match action {
        OutlineAction::Set {
            subject,
            text,
            file,
        } => {
            let id = ws.subject_id(&subject)?;
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(path)?,
                (None, None) => std::io::read_to_string(std::io::stdin())?,
            };
            ws.planner.set_outline(&id, &text)?;
            println!("Outline updated");
        }
        OutlineAction::Show { subject } => {
            let id = ws.subject_id(&subject)?;
            let outline = ws.planner.outline(&id);
            if outline.is_empty() {
                println!("No outline");
            } else {
                println!("{}", outline.trim_end());
            }
        }
        OutlineAction::Preview { subject } => {
            let id = ws.subject_id(&subject)?;
            let planned = ws.planner.subject(&id).map_or(0, |s| s.planned_sessions);
            let outline = ws.planner.outline(&id);
            let sizes = OutlineDistributor::preview(outline, planned);
            let scopes = OutlineDistributor::scopes_for(outline, planned);
            let placed = ws.planner.schedule().positions_of(&id);

            for (i, (size, scope)) in sizes.iter().zip(&scopes).enumerate() {
                let date = placed
                    .get(i)
                    .map(|(date, _)| format_date(*date))
                    .unwrap_or_else(|| "unplaced".into());
                println!("Session {} [{date}] {size} line(s): {scope}", i + 1);
            }
        }
    }

    ws.save()
}
