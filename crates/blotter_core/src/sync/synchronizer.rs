//! Snapshot-vs-projection delta synchronizer.
//!
//! # Responsibility
//! - Detect new records and status transitions across the four tracked
//!   collections and append one activity event per detection.
//! - Maintain the seen-projections as exact mirrors of the snapshots.
//! - Strip legacy-marked entries from the activity log on every run.
//!
//! # Invariants
//! - Collections are processed in a fixed order: cases, summons, curfew
//!   violations, curfew notes.
//! - Seen-projections are rebuilt from the snapshot on every run; keys
//!   absent from the snapshot disappear without producing events.
//! - The activity log is written back only when events were appended or
//!   the janitorial filter removed entries. Projections are written
//!   unconditionally.

use crate::model::activity::ActivityEvent;
use crate::model::case::{CaseRecord, CaseStatus, DEFAULT_EDITOR};
use crate::model::curfew::{CurfewNote, CurfewViolation};
use crate::model::summons::SummonsRecord;
use crate::store::{keys, read_list, read_map, write_json_quiet, KvStore, StoreResult};
use crate::sync::dates::record_timestamp;
use crate::sync::{Clock, SystemClock};
use log::{debug, info};
use std::collections::BTreeMap;

/// Substring marking junk activity titles left behind by a historical
/// console defect; matching entries are dropped on every run.
pub const LEGACY_JUNK_MARKER: &str = "undefined";

/// Result of one synchronization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncOutcome {
    /// Events appended this run.
    pub appended: usize,
    /// Legacy-marked entries removed by the janitorial filter.
    pub junk_removed: usize,
}

impl SyncOutcome {
    /// Whether this run rewrote the activity log.
    pub fn changed(&self) -> bool {
        self.appended > 0 || self.junk_removed > 0
    }
}

/// Activity delta synchronizer over an injected store.
///
/// `synchronize` is safe to invoke from any number of independent
/// triggers (timer ticks, store-change notifications) in any order.
pub struct DeltaSynchronizer<S: KvStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
}

impl<S: KvStore> DeltaSynchronizer<S, SystemClock> {
    /// Creates a synchronizer using the system wall clock.
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: SystemClock,
        }
    }
}

impl<S: KvStore, C: Clock> DeltaSynchronizer<S, C> {
    /// Creates a synchronizer with an explicit clock.
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Runs one snapshot-vs-projection pass.
    ///
    /// Idempotent: with unchanged source collections a repeat run appends
    /// nothing. The read-compute-write sequence is not transactional;
    /// two invocations interleaving over the same store could both
    /// observe a stale projection and append duplicate events. One call
    /// runs to completion on the calling thread, so sequential triggers
    /// on a single-threaded event loop cannot interleave.
    ///
    /// # Errors
    /// Read failures degrade to empty defaults; only backend write
    /// failures propagate.
    pub fn synchronize(&self) -> StoreResult<SyncOutcome> {
        let now_ms = self.clock.now_ms();

        let mut events: Vec<ActivityEvent> = read_list(&self.store, keys::ACTIVITY_HISTORY);
        let before_janitor = events.len();
        events.retain(|event| !event.title.contains(LEGACY_JUNK_MARKER));
        let junk_removed = before_janitor - events.len();

        let mut appended = 0;
        appended += self.diff_cases(now_ms, &mut events)?;
        appended += self.diff_summons(now_ms, &mut events)?;
        appended += self.diff_curfews(now_ms, &mut events)?;
        appended += self.diff_notes(now_ms, &mut events)?;

        let outcome = SyncOutcome {
            appended,
            junk_removed,
        };

        if outcome.changed() {
            write_json_quiet(&self.store, keys::ACTIVITY_HISTORY, &events)?;
            info!(
                "event=activity_sync module=sync status=ok appended={} junk_removed={}",
                outcome.appended, outcome.junk_removed
            );
        } else {
            debug!("event=activity_sync module=sync status=noop");
        }

        Ok(outcome)
    }

    fn diff_cases(&self, now_ms: i64, events: &mut Vec<ActivityEvent>) -> StoreResult<usize> {
        let snapshot: Vec<CaseRecord> = read_list(&self.store, keys::CASES);
        let seen: BTreeMap<String, String> = read_map(&self.store, keys::SEEN_CASES);
        let mut next = BTreeMap::new();
        let mut appended = 0;

        for case in &snapshot {
            match seen.get(case.key()) {
                None => {
                    events.push(new_case_event(case, now_ms));
                    appended += 1;
                }
                Some(previous) if previous != case.status.as_str() => {
                    events.push(case_transition_event(case, now_ms));
                    appended += 1;
                }
                Some(_) => {}
            }
            next.insert(case.key().to_string(), case.status.as_str().to_string());
        }

        write_json_quiet(&self.store, keys::SEEN_CASES, &next)?;
        Ok(appended)
    }

    fn diff_summons(&self, now_ms: i64, events: &mut Vec<ActivityEvent>) -> StoreResult<usize> {
        let snapshot: Vec<SummonsRecord> = read_list(&self.store, keys::SUMMONS);
        let seen: BTreeMap<String, bool> = read_map(&self.store, keys::SEEN_SUMMONS);
        let mut next = BTreeMap::new();
        let mut appended = 0;

        for summons in &snapshot {
            let key = summons.key();
            if !seen.contains_key(&key) {
                events.push(new_summons_event(summons, now_ms));
                appended += 1;
            }
            next.insert(key, true);
        }

        write_json_quiet(&self.store, keys::SEEN_SUMMONS, &next)?;
        Ok(appended)
    }

    fn diff_curfews(&self, now_ms: i64, events: &mut Vec<ActivityEvent>) -> StoreResult<usize> {
        let snapshot: Vec<CurfewViolation> = read_list(&self.store, keys::CURFEW_VIOLATIONS);
        let seen: BTreeMap<String, String> = read_map(&self.store, keys::SEEN_CURFEWS);
        let mut next = BTreeMap::new();
        let mut appended = 0;

        for violation in &snapshot {
            match seen.get(violation.key()) {
                None => {
                    events.push(new_curfew_event(violation, now_ms));
                    appended += 1;
                }
                Some(previous) if previous != violation.status.as_str() => {
                    events.push(curfew_transition_event(violation, now_ms));
                    appended += 1;
                }
                Some(_) => {}
            }
            next.insert(
                violation.key().to_string(),
                violation.status.as_str().to_string(),
            );
        }

        write_json_quiet(&self.store, keys::SEEN_CURFEWS, &next)?;
        Ok(appended)
    }

    fn diff_notes(&self, now_ms: i64, events: &mut Vec<ActivityEvent>) -> StoreResult<usize> {
        let snapshot: Vec<CurfewNote> = read_list(&self.store, keys::CURFEW_FOLDERS);
        let seen: BTreeMap<String, bool> = read_map(&self.store, keys::SEEN_NOTES);
        let mut next = BTreeMap::new();
        let mut appended = 0;

        for note in &snapshot {
            if !seen.contains_key(note.key()) {
                events.push(new_note_event(note, now_ms));
                appended += 1;
            }
            next.insert(note.key().to_string(), true);
        }

        write_json_quiet(&self.store, keys::SEEN_NOTES, &next)?;
        Ok(appended)
    }
}

fn new_case_event(case: &CaseRecord, now_ms: i64) -> ActivityEvent {
    let timestamp = record_timestamp(case.date.as_deref(), case.time.as_deref(), now_ms);
    ActivityEvent::new(
        format!("{} - NEW CASE LOGGED", case.case_no),
        "New case logged",
        case.recorded_by(),
        timestamp,
    )
}

fn case_transition_event(case: &CaseRecord, now_ms: i64) -> ActivityEvent {
    // A settled case moves to the archive listing, so the transition
    // reads as an archival action rather than a generic status change.
    let (title, action_text) = match case.status {
        CaseStatus::Settled => (
            format!("{} - CASE ARCHIVED", case.case_no),
            "Case settled and archived".to_string(),
        ),
        status => (
            format!("{} - CASE {}", case.case_no, status.as_str()),
            format!("Case status updated to {}", status.as_str()),
        ),
    };
    ActivityEvent::new(title, action_text, case.recorded_by(), now_ms)
}

fn new_summons_event(summons: &SummonsRecord, now_ms: i64) -> ActivityEvent {
    let timestamp = record_timestamp(
        summons.schedule_date.as_deref(),
        summons.schedule_time.as_deref(),
        now_ms,
    );
    let editor = match summons.issued_by.as_deref() {
        Some(author) if !author.trim().is_empty() => author,
        _ => DEFAULT_EDITOR,
    };
    ActivityEvent::new(
        format!("{} - SUMMONS #{} ISSUED", summons.case_no, summons.summons_no),
        format!("Summons #{} issued", summons.summons_no),
        editor,
        timestamp,
    )
}

fn new_curfew_event(violation: &CurfewViolation, now_ms: i64) -> ActivityEvent {
    let timestamp = record_timestamp(violation.date.as_deref(), violation.time.as_deref(), now_ms);
    let editor = match violation.recorded_by.as_deref() {
        Some(author) if !author.trim().is_empty() => author,
        _ => DEFAULT_EDITOR,
    };
    ActivityEvent::new(
        format!("{} - CURFEW VIOLATION LOGGED", violation.resident_name),
        "Curfew violation logged",
        editor,
        timestamp,
    )
}

fn curfew_transition_event(violation: &CurfewViolation, now_ms: i64) -> ActivityEvent {
    let status = violation.status.as_str();
    let editor = match violation.recorded_by.as_deref() {
        Some(author) if !author.trim().is_empty() => author,
        _ => DEFAULT_EDITOR,
    };
    ActivityEvent::new(
        format!(
            "{} - VIOLATION {}",
            violation.resident_name,
            status.to_ascii_uppercase()
        ),
        format!("Violation marked {status}"),
        editor,
        now_ms,
    )
}

fn new_note_event(note: &CurfewNote, now_ms: i64) -> ActivityEvent {
    let timestamp = record_timestamp(note.date.as_deref(), None, now_ms);
    let title = match note.linked_id.as_deref() {
        Some(linked) if !linked.trim().is_empty() => format!("{linked} - CURFEW NOTE ADDED"),
        _ => "CURFEW NOTE ADDED".to_string(),
    };
    ActivityEvent::new(title, "Curfew note added", DEFAULT_EDITOR, timestamp)
}
