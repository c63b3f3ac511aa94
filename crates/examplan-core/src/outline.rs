//! Outline distribution: spreads each subject's topic lines over its
//! placed sessions.
//!
//! A subject's outline is split into `planned_sessions` near-equal chunks
//! (earlier chunks take the remainder, one line each) and chunk `i`
//! becomes the scope of the subject's `i`-th session in date order. The
//! result depends only on the outline text, the quota and the current
//! placement order, so running it twice changes nothing the second time.

use tracing::debug;

use crate::schedule::ScheduleMap;
use crate::subject::{Outlines, Subject};

/// Joins the lines of one chunk into a session scope.
pub const SCOPE_SEPARATOR: &str = " / ";

/// Non-empty, trimmed lines of an outline, in order.
pub fn topic_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Sizes of `n` near-equal chunks over `len` items.
///
/// The first `len % n` chunks get one extra item. `n == 0` yields no
/// chunks.
pub fn chunk_sizes(len: usize, n: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let base = len / n;
    let remainder = len % n;
    (0..n).map(|i| base + usize::from(i < remainder)).collect()
}

/// Split `items` into `n` ordered, near-equal chunks.
pub fn chunk_lines<T>(items: &[T], n: usize) -> Vec<&[T]> {
    let mut rest = items;
    chunk_sizes(items.len(), n)
        .into_iter()
        .map(|size| {
            let (chunk, tail) = rest.split_at(size);
            rest = tail;
            chunk
        })
        .collect()
}

pub struct OutlineDistributor;

impl OutlineDistributor {
    /// Scopes for each of the `planned_sessions` slots of one outline.
    pub fn scopes_for(outline: &str, planned_sessions: u32) -> Vec<String> {
        let lines = topic_lines(outline);
        chunk_lines(&lines, planned_sessions as usize)
            .into_iter()
            .map(|chunk| chunk.join(SCOPE_SEPARATOR))
            .collect()
    }

    /// Rewrite the scope of every placed session of the given subjects.
    ///
    /// Only scopes that differ are written. Returns how many were; zero
    /// means the call was a no-op. Sessions of subjects not in `subjects`
    /// are left alone.
    pub fn recompute(map: &mut ScheduleMap, subjects: &[Subject], outlines: &Outlines) -> usize {
        let mut rewritten = 0;

        for subject in subjects {
            let outline = outlines.get(&subject.id).map(String::as_str).unwrap_or("");
            let scopes = Self::scopes_for(outline, subject.planned_sessions);

            for (i, (date, idx)) in map.positions_of(&subject.id).into_iter().enumerate() {
                let scope = scopes.get(i).map(String::as_str).unwrap_or("");
                if let Some(entry) = map.entry_mut(date, idx) {
                    if entry.scope != scope {
                        entry.scope = scope.to_string();
                        rewritten += 1;
                    }
                }
            }
        }

        if rewritten > 0 {
            debug!(rewritten, "session scopes reassigned");
        }
        rewritten
    }

    /// Pure form of [`recompute`](Self::recompute): `None` when no scope
    /// would change.
    pub fn recomputed(map: &ScheduleMap, subjects: &[Subject], outlines: &Outlines) -> Option<ScheduleMap> {
        let mut next = map.clone();
        (Self::recompute(&mut next, subjects, outlines) > 0).then_some(next)
    }

    /// Chunk sizes an outline would produce, for previewing before
    /// placement.
    pub fn preview(outline: &str, planned_sessions: u32) -> Vec<usize> {
        chunk_sizes(topic_lines(outline).len(), planned_sessions as usize)
    }
}
