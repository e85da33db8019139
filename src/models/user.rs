//! Diesel models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{TypeConstraintError, UserId};
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: Vec<u8>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub activated: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub id: &'a [u8],
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub activated: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewUser<'a> {
    pub fn new(id: &'a UserId, user: &'a DomainNewUser, now: NaiveDateTime) -> Self {
        Self {
            id: id.as_bytes(),
            first_name: &user.first_name,
            last_name: &user.last_name,
            email: &user.email,
            role: &user.role,
            activated: user.activated,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::from_bytes(&user.id)?,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            activated: user.activated,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }
}
