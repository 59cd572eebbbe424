//! Domain aggregates exposed by the marketplace service layer.

pub mod admin;
pub mod booking;
pub mod catalog;
pub mod donation;
pub mod notification;
pub mod provider;
pub mod rewards;
pub mod ride;
pub mod search;
pub mod types;
pub mod user;
pub mod wallet;
