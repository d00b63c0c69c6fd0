//! Spaced-repetition scheduling engine.
//!
//! Pure functions over in-memory card records: the SM-2 style update rule,
//! due/new selection, study queue construction, workload summaries and
//! progress stats. Storage, identity and presentation stay with the caller,
//! which persists whatever the engine returns.

pub mod config;
pub mod daily;
pub mod domain;
pub mod session;
pub mod srs;
pub mod validation;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::StudyConfig;
pub use daily::{DailyStudyData, DeckDue, daily_study_data};
pub use domain::{Card, CardReview, Deck, NewCard, Performance, Scheduling, UnsavedCard};
pub use session::{
  AppliedReviews, CardProvider, SchedulingSink, StudySession, apply_reviews, persist_updates,
};
pub use srs::{
  ChallengeTier, Clock, DueCardsSummary, FixedClock, Scheduler, SchedulingUpdate, StudyStats,
  SystemClock,
};
pub use validation::ValidationError;
