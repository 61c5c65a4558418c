//! Repository implementation for API users.

use diesel::prelude::*;

use crate::{
    domain::user::{NewUser, User},
    models::user::{NewUser as DbNewUser, User as DbUser},
    repository::{
        DieselRepository, UserReader, UserWriter,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::users,
};

impl UserReader for DieselRepository {
    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let mut conn = self.conn()?;
        let db_user = users::table
            .filter(users::username.eq(username))
            .first::<DbUser>(&mut conn)
            .optional()?;

        match db_user {
            Some(db_user) => Ok(Some(
                User::try_from(db_user).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        let mut conn = self.conn()?;
        let insertable: DbNewUser = new_user.into();

        let created = diesel::insert_into(users::table)
            .values(&insertable)
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(created).map_err(RepositoryError::from)
    }
}
