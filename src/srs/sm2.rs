use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{
  AGAIN_EASE_PENALTY, EASY_EASE_BONUS, EASY_INTERVAL_BONUS, HARD_EASE_PENALTY,
  HARD_INTERVAL_FACTOR, INITIAL_INTERVAL_DAYS, MAX_EASE_FACTOR, MIN_EASE_FACTOR,
  SECOND_INTERVAL_DAYS,
};
use crate::domain::{Card, NewCard, Performance, Scheduling, UnsavedCard};
use crate::validation::{ValidationError, validate_card};

/// The scheduling fields a store needs to write back after a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingUpdate {
  pub card_id: String,
  pub interval: u32,
  pub repetitions: u32,
  pub ease_factor: f64,
  pub next_review_date: NaiveDate,
  pub last_reviewed: DateTime<Utc>,
}

impl SchedulingUpdate {
  /// Extract the patch from a card that has just been reviewed.
  ///
  /// Returns None for a card without a review timestamp.
  pub fn from_reviewed(card: &Card) -> Option<Self> {
    Some(Self {
      card_id: card.id.clone(),
      interval: card.interval,
      repetitions: card.repetitions,
      ease_factor: card.ease_factor,
      next_review_date: card.next_review_date,
      last_reviewed: card.last_reviewed?,
    })
  }
}

/// Ease factor after a review, before the interval is computed.
fn adjust_ease(current: f64, performance: Performance) -> f64 {
  match performance {
    Performance::Again => (current - AGAIN_EASE_PENALTY).max(MIN_EASE_FACTOR),
    Performance::Hard => (current - HARD_EASE_PENALTY).max(MIN_EASE_FACTOR),
    Performance::Good => current,
    Performance::Easy => (current + EASY_EASE_BONUS).min(MAX_EASE_FACTOR),
  }
}

/// Classic SM-2 spacing: 1 day, then 6 days, then multiply by ease.
///
/// `repetitions` is the count before this review.
fn interval_from_repetition(current_interval: u32, repetitions: u32, ease_factor: f64) -> f64 {
  match repetitions {
    0 => INITIAL_INTERVAL_DAYS as f64,
    1 => SECOND_INTERVAL_DAYS as f64,
    _ => (current_interval as f64 * ease_factor).round(),
  }
}

fn round_ease(ease: f64) -> f64 {
  (ease * 100.0).round() / 100.0
}

/// Compute the next scheduling state for `card` after a review graded
/// `performance` at `now`.
///
/// Quality mapping:
///   - Again: reset to 1 day, repetitions back to 0, ease -0.2
///   - Hard: interval shrinks to 80% (at least 1 day), ease -0.15
///   - Good: standard SM-2 step, ease unchanged
///   - Easy: SM-2 step stretched by 1.3, ease +0.1 twice
pub fn calculate_review(
  card: &Card,
  performance: Performance,
  now: DateTime<Utc>,
) -> Result<Scheduling, ValidationError> {
  validate_card(card)?;

  let mut ease_factor = adjust_ease(card.ease_factor, performance);

  let (interval, repetitions) = match performance {
    Performance::Again => (INITIAL_INTERVAL_DAYS as f64, 0),
    Performance::Hard => {
      let shrunk = (card.interval as f64 * HARD_INTERVAL_FACTOR).floor();
      (shrunk.max(1.0), card.repetitions.saturating_add(1))
    }
    Performance::Good => (
      interval_from_repetition(card.interval, card.repetitions, ease_factor),
      card.repetitions.saturating_add(1),
    ),
    Performance::Easy => {
      let interval =
        interval_from_repetition(card.interval, card.repetitions, ease_factor) * EASY_INTERVAL_BONUS;
      // Second bonus, on top of the one from adjust_ease
      ease_factor = (ease_factor + EASY_EASE_BONUS).min(MAX_EASE_FACTOR);
      (interval, card.repetitions.saturating_add(1))
    }
  };

  let overflow = || ValidationError::IntervalOverflow {
    card_id: card.id.clone(),
    interval_days: interval.round(),
  };
  let rounded = interval.round();
  if !rounded.is_finite() || rounded > f64::from(u32::MAX) {
    return Err(overflow());
  }
  let interval = (rounded as u32).max(INITIAL_INTERVAL_DAYS);
  let next_review_date = now
    .date_naive()
    .checked_add_days(Days::new(u64::from(interval)))
    .ok_or_else(overflow)?;

  Ok(Scheduling {
    interval,
    repetitions,
    ease_factor: round_ease(ease_factor),
    next_review_date,
    last_reviewed: Some(now),
  })
}

/// Apply a review to `card`, returning the updated card.
pub fn update_card(
  card: &Card,
  performance: Performance,
  now: DateTime<Utc>,
) -> Result<Card, ValidationError> {
  let scheduling = calculate_review(card, performance, now)?;

  tracing::debug!(
    card_id = %card.id,
    %performance,
    interval = scheduling.interval,
    repetitions = scheduling.repetitions,
    ease_factor = scheduling.ease_factor,
    next_review_date = %scheduling.next_review_date,
    "Card rescheduled"
  );

  Ok(card.with_scheduling(scheduling))
}

/// Attach default scheduling state to a just-created card.
///
/// The result is classified as new until its first review.
pub fn initialize_new_card(content: NewCard, today: NaiveDate) -> UnsavedCard {
  UnsavedCard {
    content,
    scheduling: Scheduling::initial(today),
  }
}
