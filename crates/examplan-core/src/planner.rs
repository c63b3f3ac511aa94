//! The plan controller.
//!
//! `Planner` owns every piece of mutable plan state and is the only place
//! that commits changes. Each committed change runs the outline
//! distributor once, bumps the version and queues a [`PlanEvent`]. A
//! refused operation commits nothing.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adjust::{Adjuster, MoveOutcome};
use crate::error::{PlanError, Result, ValidationError};
use crate::events::PlanEvent;
use crate::mastery::MasteryBoard;
use crate::outline::OutlineDistributor;
use crate::placement::{Placement, PlacementEngine};
use crate::progress::{self, SubjectProgress, Workload};
use crate::schedule::{audit, ScheduleMap, Violation};
use crate::storage::PlanningConfig;
use crate::subject::{find_subject, DayNote, DayNotes, Outlines, SessionEntry, Subject};
use crate::window::{self, StudyWindow};

/// Owned copy of a plan at one version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub outlines: Outlines,
    #[serde(default)]
    pub schedule: ScheduleMap,
    #[serde(default)]
    pub notes: DayNotes,
    #[serde(default)]
    pub mastery: MasteryBoard,
}

#[derive(Debug, Clone)]
pub struct Planner {
    subjects: Vec<Subject>,
    outlines: Outlines,
    schedule: ScheduleMap,
    notes: DayNotes,
    mastery: MasteryBoard,
    version: u64,
    events: Vec<PlanEvent>,
    planning: PlanningConfig,
}

impl Planner {
    pub fn new(planning: PlanningConfig) -> Self {
        Self::from_snapshot(PlanSnapshot::default(), planning)
    }

    /// Restore a plan. Scopes are recomputed so they match the restored
    /// outlines; this does not count as a new version.
    pub fn from_snapshot(snapshot: PlanSnapshot, planning: PlanningConfig) -> Self {
        let mut planner = Self {
            subjects: snapshot.subjects,
            outlines: snapshot.outlines,
            schedule: snapshot.schedule,
            notes: snapshot.notes,
            mastery: snapshot.mastery,
            version: snapshot.version,
            events: Vec::new(),
            planning,
        };
        OutlineDistributor::recompute(&mut planner.schedule, &planner.subjects, &planner.outlines);
        planner.report_violations();
        planner
    }

    pub fn snapshot(&self) -> PlanSnapshot {
        PlanSnapshot {
            version: self.version,
            subjects: self.subjects.clone(),
            outlines: self.outlines.clone(),
            schedule: self.schedule.clone(),
            notes: self.notes.clone(),
            mastery: self.mastery.clone(),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn schedule(&self) -> &ScheduleMap {
        &self.schedule
    }

    pub fn outlines(&self) -> &Outlines {
        &self.outlines
    }

    pub fn outline(&self, subject_id: &str) -> &str {
        self.outlines.get(subject_id).map(String::as_str).unwrap_or("")
    }

    pub fn notes(&self) -> &DayNotes {
        &self.notes
    }

    pub fn mastery(&self) -> &MasteryBoard {
        &self.mastery
    }

    pub fn planning(&self) -> &PlanningConfig {
        &self.planning
    }

    pub fn window(&self) -> StudyWindow {
        StudyWindow::compute(&self.subjects)
    }

    pub fn subject(&self, subject_id: &str) -> Option<&Subject> {
        find_subject(&self.subjects, subject_id)
    }

    /// Find a subject by id, falling back to an exact name match.
    pub fn resolve_subject(&self, key: &str) -> Option<&Subject> {
        self.subject(key)
            .or_else(|| self.subjects.iter().find(|s| s.name == key))
    }

    /// Take the queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlanEvent> {
        std::mem::take(&mut self.events)
    }

    // Subjects

    /// Add a subject; the quota defaults to and is clamped by the
    /// planning config. Returns the new subject's id.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidValue`] for a blank name.
    pub fn add_subject(
        &mut self,
        name: &str,
        exam_date: Option<NaiveDate>,
        planned_sessions: Option<u32>,
    ) -> Result<String, ValidationError> {
        let name = validate_name(name)?;
        let planned = self
            .planning
            .clamp_planned(planned_sessions.unwrap_or(self.planning.default_planned_sessions));
        let subject = Subject::new(name, exam_date, planned);
        let subject_id = subject.id.clone();
        info!(%subject_id, name = %subject.name, planned, "subject added");
        self.subjects.push(subject);
        self.commit(PlanEvent::SubjectChanged {
            subject_id: subject_id.clone(),
            at: Utc::now(),
        });
        Ok(subject_id)
    }

    /// Rename a subject. Sessions already placed keep the old name.
    pub fn rename_subject(&mut self, subject_id: &str, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        self.subject_mut(subject_id)?.name = name;
        self.commit_subject_change(subject_id);
        Ok(())
    }

    pub fn set_exam_date(&mut self, subject_id: &str, exam_date: Option<NaiveDate>) -> Result<()> {
        self.subject_mut(subject_id)?.exam_date = exam_date;
        self.commit_subject_change(subject_id);
        Ok(())
    }

    /// Set a subject's quota, clamped to the configured range. Returns the
    /// stored value.
    pub fn set_planned_sessions(&mut self, subject_id: &str, planned_sessions: u32) -> Result<u32> {
        let planned = self.planning.clamp_planned(planned_sessions);
        self.subject_mut(subject_id)?.planned_sessions = planned;
        self.commit_subject_change(subject_id);
        Ok(planned)
    }

    /// Remove a subject with its outline and mastery cells. Its placed
    /// sessions stay on the calendar as orphans.
    pub fn remove_subject(&mut self, subject_id: &str) -> Result<Subject, PlanError> {
        let idx = self
            .subjects
            .iter()
            .position(|s| s.id == subject_id)
            .ok_or_else(|| PlanError::SubjectNotFound {
                subject_id: subject_id.to_string(),
            })?;
        let subject = self.subjects.remove(idx);
        self.outlines.remove(subject_id);
        self.mastery.forget_subject(subject_id);
        info!(subject_id, "subject removed");
        self.commit(PlanEvent::SubjectRemoved {
            subject_id: subject_id.to_string(),
            at: Utc::now(),
        });
        self.report_violations();
        Ok(subject)
    }

    // Sessions

    /// Place a session, or toggle one off; see [`PlacementEngine::add`].
    pub fn place(&mut self, date: NaiveDate, subject_id: &str) -> Result<Placement, PlanError> {
        let placement = PlacementEngine::add(&mut self.schedule, &self.subjects, date, subject_id)?;
        let event = match &placement {
            Placement::Placed { entry_id, advisory } => PlanEvent::SessionPlaced {
                date,
                entry_id: entry_id.clone(),
                subject_id: subject_id.to_string(),
                advisory: advisory.clone(),
                at: Utc::now(),
            },
            Placement::ToggledOff { entry } => PlanEvent::SessionToggledOff {
                date,
                entry_id: entry.id.clone(),
                subject_id: entry.subject_id.clone(),
                at: Utc::now(),
            },
        };
        self.commit(event);
        Ok(placement)
    }

    /// Move a session within the occupied range; see
    /// [`Adjuster::move_entry`].
    pub fn move_entry(&mut self, date: NaiveDate, entry_id: &str, delta_days: i32) -> Result<MoveOutcome, PlanError> {
        let outcome = Adjuster::move_entry(&mut self.schedule, date, entry_id, delta_days)?;
        if let MoveOutcome::Moved { from, to } = outcome {
            self.commit(PlanEvent::SessionMoved {
                entry_id: entry_id.to_string(),
                from,
                to,
                at: Utc::now(),
            });
        }
        Ok(outcome)
    }

    /// Remove a session if present.
    pub fn remove_entry(&mut self, date: NaiveDate, entry_id: &str) -> Option<SessionEntry> {
        let removed = Adjuster::remove(&mut self.schedule, date, entry_id)?;
        self.commit(PlanEvent::SessionRemoved {
            date,
            entry_id: entry_id.to_string(),
            at: Utc::now(),
        });
        Some(removed)
    }

    // Outlines, notes, mastery

    /// Replace a subject's outline text; blank text clears it.
    pub fn set_outline(&mut self, subject_id: &str, text: &str) -> Result<(), PlanError> {
        self.require_subject(subject_id)?;
        if text.trim().is_empty() {
            self.outlines.remove(subject_id);
        } else {
            self.outlines.insert(subject_id.to_string(), text.to_string());
        }
        self.commit(PlanEvent::OutlineChanged {
            subject_id: subject_id.to_string(),
            at: Utc::now(),
        });
        Ok(())
    }

    /// Patch the memo of `date`; `None` leaves a field as it is.
    pub fn set_note(&mut self, date: NaiveDate, academy: Option<&str>, homework: Option<&str>) {
        let mut note = self.notes.remove(&date).unwrap_or_default();
        if let Some(academy) = academy {
            note.academy = academy.to_string();
        }
        if let Some(homework) = homework {
            note.homework = homework.to_string();
        }
        if !note.is_empty() {
            self.notes.insert(date, note);
        }
        self.commit(PlanEvent::NoteChanged { date, at: Utc::now() });
    }

    pub fn note(&self, date: NaiveDate) -> Option<&DayNote> {
        self.notes.get(&date)
    }

    /// Flip one mastery cell; returns the new state.
    pub fn toggle_mastery(&mut self, subject_id: &str, index: u32) -> Result<bool> {
        let subject = find_subject(&self.subjects, subject_id).ok_or_else(|| PlanError::SubjectNotFound {
            subject_id: subject_id.to_string(),
        })?;
        let mastered = self.mastery.toggle(subject, index)?;
        self.commit(PlanEvent::MasteryToggled {
            subject_id: subject_id.to_string(),
            index,
            mastered,
            at: Utc::now(),
        });
        Ok(mastered)
    }

    // Queries

    pub fn audit(&self) -> Vec<Violation> {
        audit(&self.schedule, &self.subjects)
    }

    pub fn workload(&self) -> Workload {
        Workload::compute(&self.subjects, &self.window(), self.planning.recommended_daily_load)
    }

    pub fn progress(&self) -> Vec<SubjectProgress> {
        progress::progress(&self.subjects, &self.schedule, &self.mastery)
    }

    pub fn picker_order(&self) -> Vec<SubjectProgress> {
        progress::picker_order(&self.subjects, &self.schedule, &self.mastery)
    }

    pub fn used_count(&self, subject_id: &str) -> usize {
        self.schedule.used_count(subject_id)
    }

    pub fn remaining_quota(&self, subject_id: &str) -> Option<u32> {
        self.subject(subject_id).map(|s| self.schedule.remaining_quota(s))
    }

    pub fn exams_on(&self, date: NaiveDate) -> Vec<&Subject> {
        window::exams_on(&self.subjects, date)
    }

    pub fn review_subjects(&self, date: NaiveDate) -> Vec<&Subject> {
        window::review_subjects(&self.subjects, date)
    }

    // Internals

    fn commit(&mut self, event: PlanEvent) {
        self.events.push(event);
        let rewritten = OutlineDistributor::recompute(&mut self.schedule, &self.subjects, &self.outlines);
        if rewritten > 0 {
            self.events.push(PlanEvent::ScopesReassigned {
                rewritten,
                at: Utc::now(),
            });
        }
        self.version += 1;
    }

    fn commit_subject_change(&mut self, subject_id: &str) {
        info!(subject_id, "subject updated");
        self.commit(PlanEvent::SubjectChanged {
            subject_id: subject_id.to_string(),
            at: Utc::now(),
        });
        self.report_violations();
    }

    fn report_violations(&self) {
        for violation in self.audit() {
            debug!(?violation, "plan no longer satisfies its constraints");
        }
    }

    fn require_subject(&self, subject_id: &str) -> Result<&Subject, PlanError> {
        self.subject(subject_id).ok_or_else(|| PlanError::SubjectNotFound {
            subject_id: subject_id.to_string(),
        })
    }

    fn subject_mut(&mut self, subject_id: &str) -> Result<&mut Subject, PlanError> {
        self.subjects
            .iter_mut()
            .find(|s| s.id == subject_id)
            .ok_or_else(|| PlanError::SubjectNotFound {
                subject_id: subject_id.to_string(),
            })
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlanningConfig::default())
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name".into(),
            message: "subject name must not be empty".into(),
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parse_date;
    use crate::error::CoreError;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn planner() -> (Planner, String, String) {
        let mut planner = Planner::default();
        let math = planner.add_subject("Math", Some(d("2025-06-10")), Some(4)).unwrap();
        let eng = planner.add_subject("English", Some(d("2025-06-12")), Some(2)).unwrap();
        planner.drain_events();
        (planner, math, eng)
    }

    #[test]
    fn placement_commits_and_assigns_scope() {
        let (mut planner, math, _) = planner();
        planner.set_outline(&math, "1\n2\n3\n4").unwrap();
        let version = planner.version();

        planner.place(d("2025-06-01"), &math).unwrap();
        assert_eq!(planner.version(), version + 1);
        let (_, entry) = planner.schedule().ordered_entries().next().unwrap();
        assert_eq!(entry.scope, "1");

        let events = planner.drain_events();
        assert!(matches!(events[0], PlanEvent::OutlineChanged { .. }));
        assert!(matches!(events[1], PlanEvent::SessionPlaced { .. }));
        assert!(matches!(events[2], PlanEvent::ScopesReassigned { rewritten: 1, .. }));
        assert!(planner.drain_events().is_empty());
    }

    #[test]
    fn refused_operations_commit_nothing() {
        let (mut planner, math, _) = planner();
        let version = planner.version();
        let err = planner.place(d("2025-06-20"), &math).unwrap_err();
        assert!(matches!(err, PlanError::DateAfterDeadline { .. }));
        assert_eq!(planner.version(), version);
        assert!(planner.drain_events().is_empty());
    }

    #[test]
    fn quota_is_clamped_to_configured_range() {
        let (mut planner, math, _) = planner();
        assert_eq!(planner.set_planned_sessions(&math, 12).unwrap(), 8);
        assert_eq!(planner.set_planned_sessions(&math, 0).unwrap(), 4);
        let id = planner.add_subject("Art", None, None).unwrap();
        assert_eq!(planner.subject(&id).unwrap().planned_sessions, 4);
    }

    #[test]
    fn blank_subject_names_are_rejected() {
        let (mut planner, math, _) = planner();
        assert!(planner.add_subject("  ", None, None).is_err());
        assert!(matches!(
            planner.rename_subject(&math, ""),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn rename_keeps_entry_snapshot() {
        let (mut planner, math, _) = planner();
        planner.place(d("2025-06-01"), &math).unwrap();
        planner.rename_subject(&math, "Calculus").unwrap();
        let (_, entry) = planner.schedule().ordered_entries().next().unwrap();
        assert_eq!(entry.name, "Math");
        assert_eq!(planner.resolve_subject("Calculus").unwrap().id, math);
    }

    #[test]
    fn removing_a_subject_orphans_its_sessions() {
        let (mut planner, math, eng) = planner();
        planner.place(d("2025-06-01"), &eng).unwrap();
        planner.set_outline(&eng, "a\nb").unwrap();
        planner.remove_subject(&eng).unwrap();

        assert!(planner.outlines().get(&eng).is_none());
        assert_eq!(planner.schedule().len(), 1);
        assert!(matches!(planner.audit()[0], Violation::Orphaned { .. }));
        // orphans still count toward the day
        assert_eq!(planner.schedule().entries_on(d("2025-06-01")).len(), 1);
        let err = planner.place(d("2025-06-01"), &eng).unwrap_err();
        assert!(matches!(err, PlanError::SubjectNotFound { .. }));
        planner.place(d("2025-06-01"), &math).unwrap();
    }

    #[test]
    fn move_and_remove_through_the_controller() {
        let (mut planner, math, _) = planner();
        let Placement::Placed { entry_id, .. } = planner.place(d("2025-06-01"), &math).unwrap() else {
            panic!("expected placement");
        };
        planner.place(d("2025-06-04"), &math).unwrap();
        let version = planner.version();

        let outcome = planner.move_entry(d("2025-06-01"), &entry_id, -1).unwrap();
        assert_eq!(outcome, MoveOutcome::Unchanged { date: d("2025-06-01") });
        assert_eq!(planner.version(), version);

        planner.move_entry(d("2025-06-01"), &entry_id, 2).unwrap();
        assert_eq!(planner.schedule().find(&entry_id).unwrap().0, d("2025-06-03"));

        assert!(planner.remove_entry(d("2025-06-03"), &entry_id).is_some());
        assert!(planner.remove_entry(d("2025-06-03"), &entry_id).is_none());
        assert_eq!(planner.used_count(&math), 1);
        assert_eq!(planner.remaining_quota(&math), Some(3));
    }

    #[test]
    fn notes_are_patched_and_dropped_when_empty() {
        let mut planner = Planner::default();
        let date = d("2025-06-01");
        planner.set_note(date, Some("math academy 7pm"), None);
        planner.set_note(date, None, Some("worksheet p.3"));
        let note = planner.note(date).unwrap();
        assert_eq!(note.academy, "math academy 7pm");
        assert_eq!(note.homework, "worksheet p.3");

        planner.set_note(date, Some(""), Some(""));
        assert!(planner.note(date).is_none());
    }

    #[test]
    fn mastery_requires_a_known_subject() {
        let (mut planner, math, _) = planner();
        assert!(planner.toggle_mastery(&math, 1).unwrap());
        assert!(planner.toggle_mastery("nope", 0).is_err());
        assert!(planner.toggle_mastery(&math, 9).is_err());
        assert_eq!(planner.progress()[0].mastered, 1);
    }

    #[test]
    fn snapshot_roundtrip_preserves_state() {
        let (mut planner, math, _) = planner();
        planner.set_outline(&math, "a\nb").unwrap();
        planner.place(d("2025-06-02"), &math).unwrap();
        let snapshot = planner.snapshot();

        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: PlanSnapshot = serde_json::from_str(&json).unwrap();
        let restored = Planner::from_snapshot(decoded, PlanningConfig::default());
        assert_eq!(restored.snapshot(), snapshot);
    }

    #[test]
    fn restoring_realigns_stale_scopes() {
        let (mut planner, math, _) = planner();
        planner.place(d("2025-06-02"), &math).unwrap();
        let mut snapshot = planner.snapshot();
        snapshot.outlines.insert(math.clone(), "x\ny".into());

        let restored = Planner::from_snapshot(snapshot, PlanningConfig::default());
        let (_, entry) = restored.schedule().ordered_entries().next().unwrap();
        assert_eq!(entry.scope, "x");
    }
}
