//! Card fixtures for tests.
//!
//! Every fixture is pinned to fixed dates so results never depend on the
//! real clock. Compiled for unit tests and behind the `testing` feature
//! for downstream crates.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::domain::{Card, Deck};

/// Calendar date from literal parts. Panics on an impossible date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).expect("fixture date must be valid")
}

/// Noon UTC on the given day.
pub fn ts(year: i32, month: u32, day: u32) -> DateTime<Utc> {
  Utc
    .with_ymd_and_hms(year, month, day, 12, 0, 0)
    .single()
    .expect("fixture timestamp must be valid")
}

/// A never-reviewed card in `deck-1`, due on 2025-03-01.
pub fn card(id: &str) -> Card {
  Card {
    id: id.to_string(),
    front: format!("front of {}", id),
    back: format!("back of {}", id),
    deck_id: "deck-1".to_string(),
    created_at: ts(2025, 3, 1),
    interval: 1,
    repetitions: 0,
    ease_factor: 2.5,
    next_review_date: date(2025, 3, 1),
    last_reviewed: None,
  }
}

/// A card last reviewed on 2025-03-01 with the given scheduling state.
pub fn reviewed_card(id: &str, interval: u32, repetitions: u32, ease_factor: f64) -> Card {
  Card {
    interval,
    repetitions,
    ease_factor,
    last_reviewed: Some(ts(2025, 3, 1)),
    ..card(id)
  }
}

/// A reviewed card with `repetitions` reviews, next due on `next_review_date`.
pub fn scheduled_card(id: &str, repetitions: u32, next_review_date: NaiveDate) -> Card {
  Card {
    next_review_date,
    ..reviewed_card(id, 6, repetitions, 2.5)
  }
}

/// A card that failed its last review and was reset.
pub fn reset_card(id: &str, next_review_date: NaiveDate) -> Card {
  Card {
    next_review_date,
    ..reviewed_card(id, 1, 0, 2.3)
  }
}

/// Move `card` into `deck_id`.
pub fn in_deck(card: Card, deck_id: &str) -> Card {
  Card {
    deck_id: deck_id.to_string(),
    ..card
  }
}

/// An active deck with no limit override.
pub fn deck(id: &str) -> Deck {
  Deck::new(id, format!("Deck {}", id))
}

/// Ids of `cards`, in order.
pub fn ids(cards: &[Card]) -> Vec<&str> {
  cards.iter().map(|c| c.id.as_str()).collect()
}
