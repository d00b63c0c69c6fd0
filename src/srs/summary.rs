use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{MINUTES_PER_CARD, TIER_THRESHOLDS};
use crate::domain::Card;
use crate::srs::card_selector::{get_new_cards, get_review_cards};

/// Workload bucket for a day's study, lightest first.
///
/// Callers map these onto their own labels (opponent, color, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeTier {
  /// Up to 5 cards
  Light,
  /// Up to 15 cards
  Moderate,
  /// Up to 30 cards
  Heavy,
  /// Up to 50 cards
  Intense,
  /// More than 50 cards
  Extreme,
}

impl ChallengeTier {
  pub const ALL: [ChallengeTier; 5] = [
    Self::Light,
    Self::Moderate,
    Self::Heavy,
    Self::Intense,
    Self::Extreme,
  ];

  /// Bucket a total due count.
  pub fn for_total_due(total_due: usize) -> Self {
    TIER_THRESHOLDS
      .iter()
      .position(|&limit| total_due <= limit)
      .map_or(Self::Extreme, |i| Self::ALL[i])
  }

  /// 1-based tier number
  pub fn level(&self) -> u8 {
    match self {
      Self::Light => 1,
      Self::Moderate => 2,
      Self::Heavy => 3,
      Self::Intense => 4,
      Self::Extreme => 5,
    }
  }
}

/// Snapshot of today's workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueCardsSummary {
  pub total_due: usize,
  pub new_count: usize,
  pub review_count: usize,
  /// Minutes
  pub estimated_time: u32,
  pub tier: ChallengeTier,
}

pub fn get_due_cards_summary(cards: &[Card], daily_limit: usize, today: NaiveDate) -> DueCardsSummary {
  let new_count = get_new_cards(cards, daily_limit).len();
  let review_count = get_review_cards(cards, today).len();
  let total_due = new_count + review_count;

  DueCardsSummary {
    total_due,
    new_count,
    review_count,
    estimated_time: (total_due as f64 * MINUTES_PER_CARD).round() as u32,
    tier: ChallengeTier::for_total_due(total_due),
  }
}
