//! Core domain logic for the barangay blotter console.
//! This crate is the single source of truth for the console's business
//! invariants; views and the FFI runtime are thin callers.

pub mod db;
pub mod feed;
pub mod logging;
pub mod model;
pub mod report;
pub mod store;
pub mod sync;

pub use feed::{recent_events, relative_label, render_feed, FeedItem, RECENT_FEED_LIMIT};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::activity::ActivityEvent;
pub use model::case::{
    validate_case_no, CaseFullData, CaseRecord, CaseStatus, CaseValidationError, DEFAULT_EDITOR,
};
pub use model::curfew::{CurfewNote, CurfewStatus, CurfewViolation};
pub use model::summons::{
    composite_key, validate_assignment, SummonsRecord, SummonsStatus, SummonsValidationError,
};
pub use report::{paginate, ContentBlock, Orientation, PageLayout, PaperSize, PrintPage};
pub use store::{
    read_list, read_map, write_json, write_json_quiet, ChangeListener, KvStore, MemoryKvStore,
    SqliteKvStore, StoreError, StoreResult,
};
pub use sync::{Clock, DeltaSynchronizer, SyncOutcome, SystemClock, LEGACY_JUNK_MARKER};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
