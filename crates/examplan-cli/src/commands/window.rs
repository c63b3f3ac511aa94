//! Study window and workload summary.

use examplan_core::dates::format_date;
use serde_json::json;
use std::path::Path;

use super::{CommandResult, Workspace};

pub fn run(plan: Option<&Path>, json: bool) -> CommandResult {
    let ws = Workspace::open(plan)?;
    let window = ws.planner.window();
    let workload = ws.planner.workload();

    if json {
        let out = json!({ "window": window, "workload": workload });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "Window: {} days ({} session days)",
        window.window_days, window.session_days
    );
    match (window.start_date, window.placement_deadline) {
        (Some(start), Some(deadline)) => {
            println!("Start: {}", format_date(start));
            println!("Placement deadline: {}", format_date(deadline));
        }
        _ => println!("No exam dates yet; placement is closed"),
    }
    if let (Some(first), Some(last)) = (window.earliest_exam_date, window.latest_exam_date) {
        println!("Exams: {} .. {}", format_date(first), format_date(last));
    }
    println!(
        "Workload: {} sessions over {} days = {:.2} per day{}",
        workload.total_planned,
        workload.session_days,
        workload.average_per_day,
        if workload.within_recommended {
            ""
        } else {
            " (above recommended)"
        }
    );
    Ok(())
}
