use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::UserId;
use crate::domain::validation::{required_text_60, required_text_80};

/// A CRM user who can own companies and prepare quotes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub activated: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    /// Display name used in list rows.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Insertable user used to seed references.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct NewUser {
    #[validate(custom(function = "required_text_80"))]
    pub first_name: String,
    #[validate(custom(function = "required_text_80"))]
    pub last_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(custom(function = "required_text_60"))]
    pub role: String,
    pub activated: bool,
}

impl NewUser {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into().trim().to_lowercase(),
            role: role.into(),
            activated: true,
        }
    }
}
