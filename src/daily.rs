//! Daily study overview across a user's decks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::{Card, Deck};
use crate::srs::{
  DueCardsSummary, StudyStats, create_study_queue, get_due_cards, get_due_cards_summary,
  get_study_stats,
};

/// Due counts for one active deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckDue {
  pub deck_id: String,
  /// Length of the deck's study queue under its own new-card limit
  pub due_today: usize,
  /// Every card in the deck that is new or scheduled by today
  pub total_due: usize,
}

/// Everything a dashboard shows for today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStudyData {
  /// Queue over cards of active decks
  pub due_cards: Vec<Card>,
  /// Summary over cards of active decks
  pub summary: DueCardsSummary,
  /// Stats over all cards, active or not
  pub stats: StudyStats,
  pub active_decks_with_due: Vec<DeckDue>,
}

/// Build today's overview.
///
/// `daily_limit` applies to the combined queue and to decks without a
/// limit of their own.
pub fn daily_study_data(
  decks: &[Deck],
  cards: &[Card],
  daily_limit: usize,
  today: NaiveDate,
) -> DailyStudyData {
  let active_ids: HashSet<&str> = decks
    .iter()
    .filter(|d| d.is_active)
    .map(|d| d.id.as_str())
    .collect();
  let active_cards: Vec<Card> = cards
    .iter()
    .filter(|c| active_ids.contains(c.deck_id.as_str()))
    .cloned()
    .collect();

  let due_cards = create_study_queue(&active_cards, daily_limit, today)
    .into_iter()
    .cloned()
    .collect();
  let summary = get_due_cards_summary(&active_cards, daily_limit, today);
  let stats = get_study_stats(cards, today);

  let active_decks_with_due = decks
    .iter()
    .filter(|d| d.is_active)
    .map(|deck| {
      let deck_cards: Vec<Card> = cards
        .iter()
        .filter(|c| c.deck_id == deck.id)
        .cloned()
        .collect();
      DeckDue {
        deck_id: deck.id.clone(),
        due_today: create_study_queue(&deck_cards, deck.new_card_limit(daily_limit), today).len(),
        total_due: get_due_cards(&deck_cards, true, today).len(),
      }
    })
    .collect();

  tracing::debug!(
    "Daily overview: {} cards due across {} active decks",
    summary.total_due,
    active_ids.len()
  );

  DailyStudyData {
    due_cards,
    summary,
    stats,
    active_decks_with_due,
  }
}
