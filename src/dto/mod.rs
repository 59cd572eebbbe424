//! Response payloads and query-string shapes shared by routes and services.

pub mod admin;
pub mod catalog;
pub mod email;
pub mod notifications;
pub mod rewards;
pub mod rides;
pub mod wallet;
