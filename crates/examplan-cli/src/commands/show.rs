//! Day-by-day listing of the plan.

use chrono::NaiveDate;
use serde_json::json;
use std::collections::BTreeSet;
use std::path::Path;

use super::{short_id, CommandResult, Workspace};

/// Suffix for an exam-eve review day, as shown on the printed calendar.
const REVIEW_SUFFIX: &str = "총정리";

pub fn run(plan: Option<&Path>, json: bool) -> CommandResult {
    let ws = Workspace::open(plan)?;
    let planner = &ws.planner;

    // Outside a defined window, list whatever days carry data.
    let mut days = planner.window().calendar_days();
    if days.is_empty() {
        let used: BTreeSet<NaiveDate> = planner
            .schedule()
            .dates()
            .chain(planner.notes().keys().copied())
            .collect();
        days = used.into_iter().collect();
    }

    if json {
        let out: Vec<_> = days
            .iter()
            .map(|&date| {
                json!({
                    "date": date,
                    "placeable": planner.window().is_placeable(date),
                    "exams": planner.exams_on(date).iter().map(|s| &s.name).collect::<Vec<_>>(),
                    "review": planner.review_subjects(date).iter().map(|s| &s.name).collect::<Vec<_>>(),
                    "sessions": planner.schedule().entries_on(date),
                    "note": planner.note(date),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if days.is_empty() {
        println!("Nothing planned");
        return Ok(());
    }

    for date in days {
        let mut header = date.format("%Y-%m-%d %a").to_string();
        for subject in planner.exams_on(date) {
            header.push_str(&format!("  [exam: {}]", subject.name));
        }
        for subject in planner.review_subjects(date) {
            header.push_str(&format!("  [{} {REVIEW_SUFFIX}]", subject.name));
        }
        println!("{header}");

        for entry in planner.schedule().entries_on(date) {
            if entry.scope.is_empty() {
                println!("  {} {}", short_id(&entry.id), entry.name);
            } else {
                println!("  {} {}: {}", short_id(&entry.id), entry.name, entry.scope);
            }
        }
        if let Some(note) = planner.note(date) {
            if !note.academy.is_empty() {
                println!("  academy: {}", note.academy);
            }
            if !note.homework.is_empty() {
                println!("  homework: {}", note.homework);
            }
        }
    }
    Ok(())
}
