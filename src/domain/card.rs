use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_EASE_FACTOR, INITIAL_INTERVAL_DAYS};

/// Content fields supplied when a card is created.
///
/// Everything the engine does not own; scheduling defaults are attached by
/// [`crate::srs::initialize_new_card`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
  pub front: String,
  pub back: String,
  pub deck_id: String,
  pub created_at: DateTime<Utc>,
}

/// Scheduling fields owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheduling {
  /// Days until the next review
  pub interval: u32,
  /// Consecutive reviews since the last reset
  pub repetitions: u32,
  pub ease_factor: f64,
  pub next_review_date: NaiveDate,
  /// None means never reviewed
  pub last_reviewed: Option<DateTime<Utc>>,
}

impl Scheduling {
  /// Defaults for a card that has never been reviewed.
  pub fn initial(today: NaiveDate) -> Self {
    Self {
      interval: INITIAL_INTERVAL_DAYS,
      repetitions: 0,
      ease_factor: DEFAULT_EASE_FACTOR,
      next_review_date: today,
      last_reviewed: None,
    }
  }
}

/// A card as produced by initialization, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsavedCard {
  #[serde(flatten)]
  pub content: NewCard,
  #[serde(flatten)]
  pub scheduling: Scheduling,
}

impl UnsavedCard {
  /// Attach the identifier assigned on persistence.
  pub fn with_id(self, id: impl Into<String>) -> Card {
    Card {
      id: id.into(),
      front: self.content.front,
      back: self.content.back,
      deck_id: self.content.deck_id,
      created_at: self.content.created_at,
      interval: self.scheduling.interval,
      repetitions: self.scheduling.repetitions,
      ease_factor: self.scheduling.ease_factor,
      next_review_date: self.scheduling.next_review_date,
      last_reviewed: self.scheduling.last_reviewed,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
  pub id: String,
  pub front: String,
  pub back: String,
  pub deck_id: String,
  pub created_at: DateTime<Utc>,

  // Scheduling state
  pub interval: u32,
  pub repetitions: u32,
  pub ease_factor: f64,
  pub next_review_date: NaiveDate,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_reviewed: Option<DateTime<Utc>>,
}

impl Card {
  pub fn scheduling(&self) -> Scheduling {
    Scheduling {
      interval: self.interval,
      repetitions: self.repetitions,
      ease_factor: self.ease_factor,
      next_review_date: self.next_review_date,
      last_reviewed: self.last_reviewed,
    }
  }

  /// Copy of this card with the given scheduling state.
  pub fn with_scheduling(&self, scheduling: Scheduling) -> Self {
    Self {
      interval: scheduling.interval,
      repetitions: scheduling.repetitions,
      ease_factor: scheduling.ease_factor,
      next_review_date: scheduling.next_review_date,
      last_reviewed: scheduling.last_reviewed,
      ..self.clone()
    }
  }

  /// Never reviewed: no repetitions and no review timestamp.
  pub fn is_new(&self) -> bool {
    self.repetitions == 0 && self.last_reviewed.is_none()
  }

  /// Reviewed before but reset by an `again` answer.
  pub fn is_reset(&self) -> bool {
    self.repetitions == 0 && self.last_reviewed.is_some()
  }

  /// Zero repetitions, regardless of review history.
  ///
  /// Looser than [`Card::is_new`]: reset cards count too. Only used for
  /// progress statistics.
  pub fn has_no_repetitions(&self) -> bool {
    self.repetitions == 0
  }
}
