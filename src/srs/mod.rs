pub mod card_selector;
pub mod scheduler;
pub mod sm2;
pub mod stats;
pub mod summary;

pub use card_selector::{
  create_study_queue, get_due_cards, get_new_cards, get_review_cards, is_due_for_review, is_new,
};
pub use scheduler::{Clock, FixedClock, Scheduler, SystemClock};
pub use sm2::{SchedulingUpdate, calculate_review, initialize_new_card, update_card};
pub use stats::{StudyStats, get_study_stats, retention_rate};
pub use summary::{ChallengeTier, DueCardsSummary, get_due_cards_summary};
