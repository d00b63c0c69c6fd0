use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::validation::ValidationError;

/// Recall quality reported after a review, worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Performance {
  /// Forgot the card entirely
  Again,
  Hard,
  Good,
  /// Recalled effortlessly
  Easy,
}

impl Performance {
  pub const ALL: [Performance; 4] = [Self::Again, Self::Hard, Self::Good, Self::Easy];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Again => "again",
      Self::Hard => "hard",
      Self::Good => "good",
      Self::Easy => "easy",
    }
  }

  /// Grade a right/wrong answer: correct is `good`, incorrect is `again`.
  pub fn from_correctness(is_correct: bool) -> Self {
    if is_correct { Self::Good } else { Self::Again }
  }

  pub fn is_failure(&self) -> bool {
    matches!(self, Self::Again)
  }
}

impl FromStr for Performance {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "again" => Ok(Self::Again),
      "hard" => Ok(Self::Hard),
      "good" => Ok(Self::Good),
      "easy" => Ok(Self::Easy),
      other => Err(ValidationError::UnknownPerformance(other.to_string())),
    }
  }
}

impl std::fmt::Display for Performance {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One answer recorded during a study session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardReview {
  pub card_id: String,
  pub performance: Performance,
  pub response_time_ms: u64,
  pub reviewed_at: DateTime<Utc>,
}

impl CardReview {
  pub fn new(card_id: impl Into<String>, performance: Performance, reviewed_at: DateTime<Utc>) -> Self {
    Self {
      card_id: card_id.into(),
      performance,
      response_time_ms: 0,
      reviewed_at,
    }
  }

  /// Record a right/wrong answer with its response time.
  pub fn from_answer(
    card_id: impl Into<String>,
    is_correct: bool,
    response_time_ms: u64,
    reviewed_at: DateTime<Utc>,
  ) -> Self {
    Self {
      card_id: card_id.into(),
      performance: Performance::from_correctness(is_correct),
      response_time_ms,
      reviewed_at,
    }
  }
}
