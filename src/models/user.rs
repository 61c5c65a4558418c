use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    /// Comma-separated role list.
    pub roles: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub id: String,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub roles: String,
}

impl TryFrom<User> for DomainUser {
    type Error = uuid::Error;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&user.id)?,
            username: user.username,
            password_hash: user.password_hash,
            roles: user
                .roles
                .split(',')
                .map(str::to_string)
                .filter(|r| !r.is_empty())
                .collect(),
            created_at: user.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: user.username.as_str(),
            password_hash: user.password_hash.as_str(),
            roles: user.roles.join(","),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn roles_round_trip_through_comma_list() {
        let domain_new = DomainNewUser::new(
            "alice".to_string(),
            "hash".to_string(),
            vec!["admin".to_string(), "user".to_string()],
        );
        let new: NewUser = (&domain_new).into();
        assert_eq!(new.roles, "admin,user");

        let db_user = User {
            id: Uuid::new_v4().to_string(),
            username: "alice".to_string(),
            password_hash: "hash".to_string(),
            roles: new.roles.clone(),
            created_at: Utc::now().naive_utc(),
        };
        let domain = DomainUser::try_from(db_user).unwrap();
        assert_eq!(domain.roles, vec!["admin", "user"]);
        assert!(domain.has_role("admin"));
        assert!(!domain.has_role("root"));
    }

    #[test]
    fn empty_roles_become_empty_vec() {
        let db_user = User {
            id: Uuid::new_v4().to_string(),
            username: "bob".to_string(),
            password_hash: "hash".to_string(),
            roles: String::new(),
            created_at: Utc::now().naive_utc(),
        };
        let domain = DomainUser::try_from(db_user).unwrap();
        assert!(domain.roles.is_empty());
    }
}
