pub mod card;
pub mod deck;
pub mod review;

pub use card::{Card, NewCard, Scheduling, UnsavedCard};
pub use deck::Deck;
pub use review::{CardReview, Performance};
