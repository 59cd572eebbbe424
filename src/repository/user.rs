//! Repository implementation for marketplace accounts.

use diesel::prelude::*;

use crate::domain::types::{UserEmail, UserId, UserRole};
use crate::domain::user::{NewUser, User};
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, UserListQuery, UserReader, UserWriter, like_pattern};

fn into_domain(users: Vec<DbUser>) -> RepositoryResult<Vec<User>> {
    users
        .into_iter()
        .map(|u| User::try_from(u).map_err(RepositoryError::from))
        .collect()
}

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .find(id.get())
            .first::<DbUser>(&mut conn)
            .optional()?;

        user.map(User::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::email.eq(email.as_str()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        user.map(User::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = users::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(term) = query.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
                let pattern = like_pattern(term);
                items = items.filter(
                    users::email
                        .like(pattern.clone())
                        .escape('\\')
                        .or(users::full_name.like(pattern).escape('\\')),
                );
            }
            if let Some(role) = query.role {
                items = items.filter(users::role.eq(role.as_str()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order(users::id.asc());
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let users = items.load::<DbUser>(&mut conn)?;
        Ok((total, into_domain(users)?))
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_new_user: DbNewUser = new_user.into();

        let user = diesel::insert_into(users::table)
            .values(&db_new_user)
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(user).map_err(RepositoryError::from)
    }

    fn set_user_role(&self, id: UserId, role: UserRole) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = diesel::update(users::table.find(id.get()))
            .set(users::role.eq(role.as_str()))
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(user).map_err(RepositoryError::from)
    }

    fn set_user_active(&self, id: UserId, is_active: bool) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = diesel::update(users::table.find(id.get()))
            .set(users::is_active.eq(is_active))
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(user).map_err(RepositoryError::from)
    }
}
