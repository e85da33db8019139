//! Repository implementation for users.

use diesel::prelude::*;

use crate::domain::types::UserId;
use crate::domain::user::{NewUser, User};
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, UserReader, UserWriter, now};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::id.eq(id.as_bytes().as_slice()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        user.map(User::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let id = UserId::new();
        let new_user = DbNewUser::new(&id, user, now());

        let db_user = diesel::insert_into(users::table)
            .values(&new_user)
            .get_result::<DbUser>(&mut conn)
            .map_err(RepositoryError::unique_on("email"))?;

        User::try_from(db_user).map_err(RepositoryError::from)
    }
}
