//! Database models shared across the marketplace repository.

#[cfg(feature = "server")]
pub mod auth;
pub mod booking;
pub mod catalog;
#[cfg(feature = "server")]
pub mod config;
pub mod donation;
pub mod notification;
pub mod provider;
pub mod rewards;
pub mod ride;
pub mod search;
pub mod user;
pub mod wallet;
