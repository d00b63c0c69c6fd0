//! Boundary checks for scheduling input.
//!
//! The update rule trusts its input, so corrupt records coming from the
//! store are rejected here instead of being clamped back into range.

use crate::config::{MAX_EASE_FACTOR, MIN_EASE_FACTOR};
use crate::domain::Card;

/// Invalid scheduling input.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
  /// Ease factor outside [1.3, 2.5] or not a finite number
  EaseFactorOutOfRange { card_id: String, ease_factor: f64 },
  /// Interval of zero days
  ZeroInterval { card_id: String },
  /// Performance token outside again/hard/good/easy
  UnknownPerformance(String),
  /// Next interval too large to store or to turn into a calendar date
  IntervalOverflow { card_id: String, interval_days: f64 },
}

impl std::fmt::Display for ValidationError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ValidationError::EaseFactorOutOfRange { card_id, ease_factor } => write!(
        f,
        "Card {} has ease factor {} outside [{}, {}]",
        card_id, ease_factor, MIN_EASE_FACTOR, MAX_EASE_FACTOR
      ),
      ValidationError::ZeroInterval { card_id } => {
        write!(f, "Card {} has an interval of 0 days", card_id)
      }
      ValidationError::UnknownPerformance(token) => {
        write!(f, "Unknown performance '{}': expected again, hard, good or easy", token)
      }
      ValidationError::IntervalOverflow { card_id, interval_days } => write!(
        f,
        "Card {} would be scheduled {} days out, past the last representable date",
        card_id, interval_days
      ),
    }
  }
}

impl ValidationError {
  /// Returns a user-facing error message without record identifiers.
  pub fn user_message(&self) -> &'static str {
    match self {
      ValidationError::EaseFactorOutOfRange { .. } => "Card has corrupt scheduling data",
      ValidationError::ZeroInterval { .. } => "Card has corrupt scheduling data",
      ValidationError::UnknownPerformance(_) => "Unrecognized answer rating",
      ValidationError::IntervalOverflow { .. } => "Card has corrupt scheduling data",
    }
  }
}

impl std::error::Error for ValidationError {}

/// Check that a card's scheduling state satisfies the engine's invariants.
pub fn validate_card(card: &Card) -> Result<(), ValidationError> {
  let ease = card.ease_factor;
  if !ease.is_finite() || !(MIN_EASE_FACTOR..=MAX_EASE_FACTOR).contains(&ease) {
    return Err(ValidationError::EaseFactorOutOfRange {
      card_id: card.id.clone(),
      ease_factor: ease,
    });
  }

  if card.interval == 0 {
    return Err(ValidationError::ZeroInterval {
      card_id: card.id.clone(),
    });
  }

  Ok(())
}
