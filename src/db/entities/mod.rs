//! Database entities

pub mod claim;

pub use claim::Entity as Claim;
