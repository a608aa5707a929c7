pub mod interactions;

pub use interactions::{InteractionsRepo, StoredInteraction};
