pub mod companies;
pub mod contacts;
pub mod errors;
pub mod list;
pub mod patch;
pub mod products;
pub mod quotes;

pub use errors::{ServiceError, ServiceResult};
