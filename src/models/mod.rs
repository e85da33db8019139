//! Database models shared across the CRM repository.

pub mod company;
pub mod config;
pub mod contact;
pub mod product;
pub mod quote;
pub mod user;
