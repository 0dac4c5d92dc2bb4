//! Cards module - debit and credit cards with payment dates.

mod cards_model;
mod cards_service;
mod cards_traits;

pub use cards_model::{Card, CardKind, CardPaidUpdate, CardUpdate, NewCard};
pub use cards_service::CardService;
pub use cards_traits::{CardRepositoryTrait, CardServiceTrait};

#[cfg(test)]
mod tests;
