//! Quota usage per subject, most remaining first.

use serde_json::json;
use std::path::Path;

use super::{CommandResult, Workspace};

pub fn run(plan: Option<&Path>, json: bool) -> CommandResult {
    let ws = Workspace::open(plan)?;
    let workload = ws.planner.workload();
    let subjects = ws.planner.picker_order();

    if json {
        let out = json!({ "workload": workload, "subjects": subjects });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for p in &subjects {
        println!(
            "{:<16} {}/{} placed, {} left, {} mastered",
            p.name, p.placed, p.planned, p.remaining, p.mastered
        );
    }
    println!(
        "Total: {} sessions, {:.2} per day",
        workload.total_planned, workload.average_per_day
    );
    if !workload.within_recommended {
        eprintln!(
            "warning: {:.2} sessions per day is above the recommended {}",
            workload.average_per_day,
            ws.planner.planning().recommended_daily_load
        );
    }
    Ok(())
}
