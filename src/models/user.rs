//! Diesel models for marketplace accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{FullName, PhoneNumber, TypeConstraintError, UserEmail, UserId};
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub email: &'a str,
    pub full_name: &'a str,
    pub phone: Option<&'a str>,
    pub role: &'a str,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::try_from(user.id)?,
            email: UserEmail::new(user.email)?,
            full_name: FullName::new(user.full_name)?,
            phone: user.phone.as_deref().map(PhoneNumber::new).transpose()?,
            role: user.role.parse()?,
            is_active: user.is_active,
            created_at: user.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            email: user.email.as_str(),
            full_name: user.full_name.as_str(),
            phone: user.phone.as_ref().map(|p| p.as_str()),
            role: user.role.as_str(),
        }
    }
}
