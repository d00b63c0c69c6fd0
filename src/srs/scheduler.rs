//! Clock-bound entry point over the free scheduling functions.
//!
//! The free functions take "now" explicitly. [`Scheduler`] reads its
//! clock once per call and supplies the configured daily limit, so a
//! single operation never sees two different dates.

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::StudyConfig;
use crate::domain::{Card, NewCard, Performance, UnsavedCard};
use crate::srs::card_selector;
use crate::srs::sm2;
use crate::srs::stats::{StudyStats, get_study_stats};
use crate::srs::summary::{DueCardsSummary, get_due_cards_summary};
use crate::validation::ValidationError;

/// Source of the current time.
pub trait Clock {
  fn now(&self) -> DateTime<Utc>;

  fn today(&self) -> NaiveDate {
    self.now().date_naive()
  }
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    self.0
  }
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler<C: Clock = SystemClock> {
  clock: C,
  config: StudyConfig,
}

impl Scheduler<SystemClock> {
  pub fn new(config: StudyConfig) -> Self {
    Self::with_clock(SystemClock, config)
  }
}

impl<C: Clock> Scheduler<C> {
  pub fn with_clock(clock: C, config: StudyConfig) -> Self {
    Self { clock, config }
  }

  pub fn config(&self) -> &StudyConfig {
    &self.config
  }

  pub fn daily_limit(&self) -> usize {
    self.config.daily_new_card_limit
  }

  pub fn update_card(&self, card: &Card, performance: Performance) -> Result<Card, ValidationError> {
    sm2::update_card(card, performance, self.clock.now())
  }

  pub fn get_due_cards<'a>(&self, cards: &'a [Card], include_new: bool) -> Vec<&'a Card> {
    card_selector::get_due_cards(cards, include_new, self.clock.today())
  }

  pub fn get_new_cards<'a>(&self, cards: &'a [Card]) -> Vec<&'a Card> {
    card_selector::get_new_cards(cards, self.daily_limit())
  }

  pub fn get_review_cards<'a>(&self, cards: &'a [Card]) -> Vec<&'a Card> {
    card_selector::get_review_cards(cards, self.clock.today())
  }

  pub fn create_study_queue<'a>(&self, cards: &'a [Card]) -> Vec<&'a Card> {
    card_selector::create_study_queue(cards, self.daily_limit(), self.clock.today())
  }

  pub fn get_due_cards_summary(&self, cards: &[Card]) -> DueCardsSummary {
    get_due_cards_summary(cards, self.daily_limit(), self.clock.today())
  }

  pub fn get_study_stats(&self, cards: &[Card]) -> StudyStats {
    get_study_stats(cards, self.clock.today())
  }

  pub fn initialize_new_card(&self, content: NewCard) -> UnsavedCard {
    sm2::initialize_new_card(content, self.clock.today())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::srs::ChallengeTier;
  use crate::testing::{card, date, scheduled_card, ts};

  fn scheduler(limit: usize) -> Scheduler<FixedClock> {
    Scheduler::with_clock(
      FixedClock(ts(2025, 3, 10)),
      StudyConfig {
        daily_new_card_limit: limit,
      },
    )
  }

  #[test]
  fn test_fixed_clock_today() {
    assert_eq!(FixedClock(ts(2025, 3, 10)).today(), date(2025, 3, 10));
  }

  #[test]
  fn test_default_scheduler_uses_default_limit() {
    let s = Scheduler::new(StudyConfig::default());
    assert_eq!(s.daily_limit(), 20);
  }

  #[test]
  fn test_update_uses_clock() {
    let s = scheduler(20);
    let updated = s.update_card(&card("a"), Performance::Good).unwrap();
    assert_eq!(updated.last_reviewed, Some(ts(2025, 3, 10)));
    assert_eq!(updated.next_review_date, date(2025, 3, 11));
  }

  #[test]
  fn test_limit_comes_from_config() {
    let cards: Vec<Card> = (0..5).map(|i| card(&format!("n{}", i))).collect();
    let s = scheduler(3);
    assert_eq!(s.get_new_cards(&cards).len(), 3);
    assert_eq!(s.create_study_queue(&cards).len(), 3);
    assert_eq!(s.get_due_cards_summary(&cards).new_count, 3);
  }

  #[test]
  fn test_review_selection_uses_clock_date() {
    let cards = vec![
      scheduled_card("due", 2, date(2025, 3, 10)),
      scheduled_card("later", 2, date(2025, 3, 11)),
    ];
    let s = scheduler(20);
    assert_eq!(s.get_review_cards(&cards).len(), 1);
    assert_eq!(s.get_due_cards(&cards, false).len(), 1);
    assert_eq!(s.get_due_cards_summary(&cards).tier, ChallengeTier::Light);
    assert_eq!(s.get_study_stats(&cards).due_today, 1);
  }

  #[test]
  fn test_initialized_card_is_queued_as_new() {
    let s = scheduler(1);
    let c = s
      .initialize_new_card(NewCard {
        front: "q".to_string(),
        back: "a".to_string(),
        deck_id: "deck-1".to_string(),
        created_at: ts(2025, 3, 10),
      })
      .with_id("fresh");
    assert!(card_selector::is_new(&c));
    let cards = vec![c];
    assert_eq!(s.get_new_cards(&cards)[0].id, "fresh");
  }
}
