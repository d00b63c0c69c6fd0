use serde::{Deserialize, Serialize};

/// A collection of cards. Only the fields that affect daily planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
  pub id: String,
  pub name: String,
  /// Inactive decks are left out of the daily queue
  pub is_active: bool,
  /// Per-deck override of the daily new-card limit; 0 means unset
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub new_cards_per_day: Option<usize>,
}

impl Deck {
  pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      is_active: true,
      new_cards_per_day: None,
    }
  }

  /// The deck's own limit, or `fallback` when it has none or it is 0.
  pub fn new_card_limit(&self, fallback: usize) -> usize {
    self.new_cards_per_day.filter(|&n| n > 0).unwrap_or(fallback)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_deck_new_defaults() {
    let deck = Deck::new("d1", "Spanish");
    assert!(deck.is_active);
    assert!(deck.new_cards_per_day.is_none());
    assert_eq!(deck.new_card_limit(20), 20);
  }

  #[test]
  fn test_deck_limit_override() {
    let mut deck = Deck::new("d1", "Spanish");
    deck.new_cards_per_day = Some(5);
    assert_eq!(deck.new_card_limit(20), 5);
  }

  #[test]
  fn test_deck_zero_limit_falls_back() {
    let mut deck = Deck::new("d1", "Spanish");
    deck.new_cards_per_day = Some(0);
    assert_eq!(deck.new_card_limit(20), 20);
  }

  #[test]
  fn test_deck_deserialize_without_limit() {
    let deck: Deck =
      serde_json::from_str(r#"{"id":"d1","name":"Kanji","isActive":false}"#).unwrap();
    assert!(!deck.is_active);
    assert_eq!(deck.new_cards_per_day, None);
  }
}
