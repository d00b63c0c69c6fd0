//! Card selection and study queue construction.
//!
//! Splits a collection into new cards and due reviews for a given day and
//! interleaves them into a single queue that puts retention first:
//! - Review cards always precede the new card at the same position
//! - Input order is kept within each group (no shuffling)
//! - New cards are capped by the daily limit, reviews are not

use chrono::NaiveDate;

use crate::domain::Card;

/// Whether `card` has never been reviewed.
pub fn is_new(card: &Card) -> bool {
  card.is_new()
}

/// Whether `card` is scheduled on or before `as_of`.
///
/// Day granularity: anything due at any time up to the end of `as_of`
/// counts.
pub fn is_due_for_review(card: &Card, as_of: NaiveDate) -> bool {
  card.next_review_date <= as_of
}

/// Cards to look at today: new cards (when `include_new`) plus every card
/// scheduled on or before `today`.
pub fn get_due_cards(cards: &[Card], include_new: bool, today: NaiveDate) -> Vec<&Card> {
  cards
    .iter()
    .filter(|card| (include_new && is_new(card)) || is_due_for_review(card, today))
    .collect()
}

/// The first `daily_limit` never-reviewed cards, in input order.
pub fn get_new_cards(cards: &[Card], daily_limit: usize) -> Vec<&Card> {
  cards.iter().filter(|card| is_new(card)).take(daily_limit).collect()
}

/// Reviewed cards (at least one repetition) scheduled on or before `today`.
///
/// Reset cards have zero repetitions and a review timestamp, so they are
/// neither new nor review cards here.
pub fn get_review_cards(cards: &[Card], today: NaiveDate) -> Vec<&Card> {
  cards
    .iter()
    .filter(|card| card.repetitions > 0 && is_due_for_review(card, today))
    .collect()
}

/// Interleave due reviews with today's new cards: review, new, review, new...
pub fn create_study_queue(cards: &[Card], daily_limit: usize, today: NaiveDate) -> Vec<&Card> {
  let new_cards = get_new_cards(cards, daily_limit);
  let review_cards = get_review_cards(cards, today);

  let mut queue = Vec::with_capacity(new_cards.len() + review_cards.len());
  let max_len = new_cards.len().max(review_cards.len());
  for i in 0..max_len {
    if let Some(card) = review_cards.get(i) {
      queue.push(*card);
    }
    if let Some(card) = new_cards.get(i) {
      queue.push(*card);
    }
  }

  tracing::debug!(
    "Study queue built: {} review + {} new",
    review_cards.len(),
    new_cards.len()
  );

  queue
}
