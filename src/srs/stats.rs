//! Progress statistics over a whole collection

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{MATURE_REPETITIONS, MAX_EASE_FACTOR};
use crate::domain::Card;
use crate::srs::card_selector::get_due_cards;

/// Descriptive counts for progress reporting. Not used for scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
  pub total_cards: usize,
  /// Cards with zero repetitions, including reset ones
  #[serde(rename = "newCards")]
  pub unreviewed_cards: usize,
  pub learning_cards: usize,
  pub mature_cards: usize,
  pub due_today: usize,
  /// Percent of reviewed cards still at full ease
  pub retention_rate: f64,
}

/// Share of reviewed cards whose ease factor is still at the maximum, as a
/// percentage. Zero when nothing has been reviewed.
pub fn retention_rate(cards: &[Card]) -> f64 {
  let reviewed = cards.iter().filter(|c| c.repetitions > 0).count();
  if reviewed == 0 {
    return 0.0;
  }

  let retained = cards
    .iter()
    .filter(|c| c.repetitions > 0 && c.ease_factor >= MAX_EASE_FACTOR)
    .count();

  retained as f64 / reviewed as f64 * 100.0
}

pub fn get_study_stats(cards: &[Card], today: NaiveDate) -> StudyStats {
  StudyStats {
    total_cards: cards.len(),
    unreviewed_cards: cards.iter().filter(|c| c.has_no_repetitions()).count(),
    learning_cards: cards
      .iter()
      .filter(|c| c.repetitions > 0 && c.repetitions < MATURE_REPETITIONS)
      .count(),
    mature_cards: cards.iter().filter(|c| c.repetitions >= MATURE_REPETITIONS).count(),
    due_today: get_due_cards(cards, true, today).len(),
    retention_rate: retention_rate(cards),
  }
}
