//! Domain aggregates and the value types the orchestration layer works on.

pub mod company;
pub mod contact;
pub mod filter;
pub mod patch;
pub mod product;
pub mod quote;
pub mod types;
pub mod user;
pub mod validation;
