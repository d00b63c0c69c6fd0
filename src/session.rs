//! Study session bookkeeping and the seams to the card store.
//!
//! A session walks a study queue, records one [`CardReview`] per answer and,
//! when finished, turns the recorded reviews into [`SchedulingUpdate`]s for
//! the store. Nothing here is global: the caller owns the session, and any
//! save timer or debounce belongs to the caller as well.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::domain::{Card, CardReview, Performance};
use crate::srs::{SchedulingUpdate, update_card};
use crate::validation::ValidationError;

/// Loads the cards a user studies.
pub trait CardProvider {
  type Error;

  fn cards_for_user(&self, user_id: &str) -> Result<Vec<Card>, Self::Error>;
}

/// Writes scheduling patches back to the store.
pub trait SchedulingSink {
  type Error;

  fn persist(&mut self, update: &SchedulingUpdate) -> Result<(), Self::Error>;
}

/// Outcome of applying a batch of reviews.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppliedReviews {
  /// One patch per accepted review, in review order
  pub updates: Vec<SchedulingUpdate>,
  /// Reviews whose card failed validation
  pub rejected: Vec<ValidationError>,
}

/// Run the update rule for each review, in order.
///
/// Each update is stamped with the time of its own answer. A card reviewed
/// more than once is updated from its already-updated state, so persisting
/// the updates in order leaves the final state in the store. Reviews for
/// cards not in `cards` are skipped; a review whose card fails validation
/// is rejected without affecting the others.
pub fn apply_reviews(cards: &[Card], reviews: &[CardReview]) -> AppliedReviews {
  let mut working: HashMap<&str, Card> = HashMap::new();
  let mut applied = AppliedReviews {
    updates: Vec::with_capacity(reviews.len()),
    rejected: Vec::new(),
  };

  for review in reviews {
    let Some(original) = cards.iter().find(|c| c.id == review.card_id) else {
      tracing::warn!("Review for unknown card {} skipped", review.card_id);
      continue;
    };

    let current = working.get(original.id.as_str()).unwrap_or(original);
    match update_card(current, review.performance, review.reviewed_at) {
      Ok(updated) => {
        if let Some(update) = SchedulingUpdate::from_reviewed(&updated) {
          applied.updates.push(update);
        }
        working.insert(original.id.as_str(), updated);
      }
      Err(e) => {
        tracing::warn!("Review for card {} rejected: {}", review.card_id, e);
        applied.rejected.push(e);
      }
    }
  }

  applied
}

/// Forward updates to `sink` in order, stopping at the first failure.
///
/// Returns how many updates were persisted.
pub fn persist_updates<S: SchedulingSink>(
  sink: &mut S,
  updates: &[SchedulingUpdate],
) -> Result<usize, S::Error> {
  for update in updates {
    sink.persist(update)?;
  }
  tracing::debug!("Persisted {} scheduling updates", updates.len());
  Ok(updates.len())
}

/// One pass through a study queue.
#[derive(Debug, Clone, Default)]
pub struct StudySession {
  cards: Vec<Card>,
  current_index: usize,
  reviews: Vec<CardReview>,
}

impl StudySession {
  /// Start a session over `queue` (typically the output of
  /// `create_study_queue`).
  pub fn new(queue: Vec<Card>) -> Self {
    Self {
      cards: queue,
      current_index: 0,
      reviews: Vec::new(),
    }
  }

  pub fn cards(&self) -> &[Card] {
    &self.cards
  }

  pub fn reviews(&self) -> &[CardReview] {
    &self.reviews
  }

  /// The card awaiting an answer, if any remain.
  pub fn current_card(&self) -> Option<&Card> {
    self.cards.get(self.current_index)
  }

  pub fn remaining(&self) -> usize {
    self.cards.len().saturating_sub(self.current_index)
  }

  pub fn is_finished(&self) -> bool {
    self.current_index >= self.cards.len()
  }

  /// Grade the current card and advance. Returns the recorded review, or
  /// None when the session has no card left.
  pub fn record(
    &mut self,
    performance: Performance,
    response_time_ms: u64,
    reviewed_at: DateTime<Utc>,
  ) -> Option<&CardReview> {
    let card = self.current_card()?;
    let review = CardReview {
      card_id: card.id.clone(),
      performance,
      response_time_ms,
      reviewed_at,
    };
    self.reviews.push(review);
    self.current_index += 1;
    self.reviews.last()
  }

  /// Record a right/wrong answer for the current card.
  pub fn record_answer(
    &mut self,
    is_correct: bool,
    response_time_ms: u64,
    reviewed_at: DateTime<Utc>,
  ) -> Option<&CardReview> {
    self.record(Performance::from_correctness(is_correct), response_time_ms, reviewed_at)
  }

  /// Scheduling updates for every answer recorded so far.
  pub fn finish(&self) -> AppliedReviews {
    apply_reviews(&self.cards, &self.reviews)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{card, date, reviewed_card, ts};

  #[derive(Default)]
  struct VecSink {
    saved: Vec<SchedulingUpdate>,
    fail_on: Option<String>,
  }

  impl SchedulingSink for VecSink {
    type Error = String;

    fn persist(&mut self, update: &SchedulingUpdate) -> Result<(), Self::Error> {
      if self.fail_on.as_deref() == Some(update.card_id.as_str()) {
        return Err(format!("write failed for {}", update.card_id));
      }
      self.saved.push(update.clone());
      Ok(())
    }
  }

  struct MemoryProvider {
    cards: Vec<Card>,
  }

  impl CardProvider for MemoryProvider {
    type Error = std::convert::Infallible;

    fn cards_for_user(&self, _user_id: &str) -> Result<Vec<Card>, Self::Error> {
      Ok(self.cards.clone())
    }
  }

  fn now() -> DateTime<Utc> {
    ts(2025, 3, 10)
  }

  #[test]
  fn test_apply_reviews_in_order() {
    let cards = vec![card("a"), reviewed_card("b", 10, 5, 2.0)];
    let reviews = vec![
      CardReview::new("a", Performance::Good, now()),
      CardReview::new("b", Performance::Again, now()),
    ];
    let updates = apply_reviews(&cards, &reviews).updates;
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].card_id, "a");
    assert_eq!(updates[0].repetitions, 1);
    assert_eq!(updates[1].card_id, "b");
    assert_eq!(updates[1].interval, 1);
    assert_eq!(updates[1].repetitions, 0);
    assert_eq!(updates[1].next_review_date, date(2025, 3, 11));
  }

  #[test]
  fn test_apply_reviews_chains_repeated_card() {
    let cards = vec![card("a")];
    let reviews = vec![
      CardReview::new("a", Performance::Good, now()),
      CardReview::new("a", Performance::Good, now()),
    ];
    let updates = apply_reviews(&cards, &reviews).updates;
    assert_eq!(updates[0].repetitions, 1);
    assert_eq!(updates[1].repetitions, 2);
    assert_eq!(updates[1].interval, 6);
  }

  #[test]
  fn test_apply_reviews_skips_unknown_card() {
    let cards = vec![card("a")];
    let reviews = vec![
      CardReview::new("ghost", Performance::Good, now()),
      CardReview::new("a", Performance::Hard, now()),
    ];
    let updates = apply_reviews(&cards, &reviews).updates;
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].card_id, "a");
  }

  #[test]
  fn test_apply_reviews_corrupt_card_does_not_block_others() {
    let mut bad = card("bad");
    bad.ease_factor = 0.9;
    let cards = vec![card("a"), bad, card("c")];
    let reviews: Vec<CardReview> = ["a", "bad", "c"]
      .iter()
      .map(|id| CardReview::new(*id, Performance::Good, now()))
      .collect();

    let applied = apply_reviews(&cards, &reviews);
    let updated_ids: Vec<&str> = applied.updates.iter().map(|u| u.card_id.as_str()).collect();
    assert_eq!(updated_ids, vec!["a", "c"]);
    assert_eq!(applied.rejected.len(), 1);
    assert!(matches!(
      applied.rejected[0],
      ValidationError::EaseFactorOutOfRange { ref card_id, .. } if card_id == "bad"
    ));
  }

  #[test]
  fn test_apply_reviews_uses_answer_time() {
    let early = ts(2025, 3, 10);
    let late = ts(2025, 3, 12);
    let cards = vec![card("a"), reviewed_card("b", 1, 1, 2.5)];
    let reviews = vec![
      CardReview::new("a", Performance::Good, early),
      CardReview::new("b", Performance::Good, late),
    ];
    let updates = apply_reviews(&cards, &reviews).updates;
    assert_eq!(updates[0].last_reviewed, early);
    assert_eq!(updates[0].next_review_date, date(2025, 3, 11));
    assert_eq!(updates[1].last_reviewed, late);
    // 6 days after the 12th
    assert_eq!(updates[1].next_review_date, date(2025, 3, 18));
  }

  #[test]
  fn test_persist_updates_stops_at_first_error() {
    let cards = vec![card("a"), card("b"), card("c")];
    let reviews: Vec<CardReview> = ["a", "b", "c"]
      .iter()
      .map(|id| CardReview::new(*id, Performance::Good, now()))
      .collect();
    let updates = apply_reviews(&cards, &reviews).updates;

    let mut sink = VecSink {
      fail_on: Some("b".to_string()),
      ..Default::default()
    };
    let err = persist_updates(&mut sink, &updates).unwrap_err();
    assert_eq!(err, "write failed for b");
    assert_eq!(sink.saved.len(), 1);

    let mut ok_sink = VecSink::default();
    assert_eq!(persist_updates(&mut ok_sink, &updates), Ok(3));
  }

  #[test]
  fn test_session_walks_queue() {
    let mut session = StudySession::new(vec![card("a"), card("b")]);
    assert_eq!(session.remaining(), 2);
    assert_eq!(session.current_card().map(|c| c.id.as_str()), Some("a"));

    let review = session.record_answer(true, 800, now()).cloned().unwrap();
    assert_eq!(review.performance, Performance::Good);
    assert_eq!(review.response_time_ms, 800);
    assert_eq!(session.current_card().map(|c| c.id.as_str()), Some("b"));

    session.record(Performance::Easy, 400, now());
    assert!(session.is_finished());
    assert_eq!(session.remaining(), 0);
    // No card left to grade
    assert!(session.record_answer(false, 0, now()).is_none());
    assert_eq!(session.reviews().len(), 2);
  }

  #[test]
  fn test_session_finish_end_to_end() {
    let provider = MemoryProvider {
      cards: vec![card("a"), reviewed_card("b", 6, 2, 2.5)],
    };
    let cards = provider.cards_for_user("user-1").unwrap();
    let mut session = StudySession::new(cards);
    session.record_answer(false, 1000, now());
    session.record_answer(true, 1000, now());

    let applied = session.finish();
    assert!(applied.rejected.is_empty());
    let updates = applied.updates;
    let mut sink = VecSink::default();
    persist_updates(&mut sink, &updates).unwrap();

    assert_eq!(sink.saved.len(), 2);
    // "a" failed: reset
    assert_eq!(sink.saved[0].repetitions, 0);
    assert!((sink.saved[0].ease_factor - 2.3).abs() < 1e-9);
    // "b" good: round(6 * 2.5) = 15
    assert_eq!(sink.saved[1].interval, 15);
    assert_eq!(sink.saved[1].last_reviewed, now());
  }

  #[test]
  fn test_empty_session() {
    let session = StudySession::new(Vec::new());
    assert!(session.is_finished());
    assert!(session.current_card().is_none());
    assert_eq!(session.finish(), AppliedReviews::default());
  }
}
