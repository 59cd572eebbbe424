use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{FullName, PhoneNumber, UserEmail, UserId, UserRole};

/// Marketplace account as stored in the `users` table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: UserEmail,
    pub full_name: FullName,
    pub phone: Option<PhoneNumber>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

/// Payload used to register a new account.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub email: UserEmail,
    pub full_name: FullName,
    pub phone: Option<PhoneNumber>,
    pub role: UserRole,
}

impl NewUser {
    pub fn new(email: UserEmail, full_name: FullName) -> Self {
        Self {
            email,
            full_name,
            phone: None,
            role: UserRole::Customer,
        }
    }

    pub fn phone(mut self, phone: PhoneNumber) -> Self {
        self.phone = Some(phone);
        self
    }

    pub fn role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }
}
