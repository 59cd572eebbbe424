//! Read models backing the admin dashboard.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::booking::Booking;
use crate::domain::catalog::{Category, Subcategory};
use crate::domain::donation::Donation;
use crate::domain::notification::Notification;
use crate::domain::provider::Provider;
use crate::domain::rewards::RewardEvent;
use crate::domain::ride::Ride;
use crate::domain::search::RecentSearch;
use crate::domain::user::User;
use crate::domain::wallet::WalletTransaction;

/// Figures shown in the dashboard's analytics widgets.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsSnapshot {
    pub total_users: i64,
    pub active_users: i64,
    pub total_providers: i64,
    pub verified_providers: i64,
    pub bookings_by_status: BTreeMap<String, i64>,
    pub rides_by_status: BTreeMap<String, i64>,
    pub donation_total_cents: i64,
    pub top_up_total_cents: i64,
}

/// Full export of every table, serialized as the backup document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BackupSnapshot {
    pub exported_at: NaiveDateTime,
    pub users: Vec<User>,
    pub categories: Vec<Category>,
    pub subcategories: Vec<Subcategory>,
    pub providers: Vec<Provider>,
    pub bookings: Vec<Booking>,
    pub rides: Vec<Ride>,
    pub wallet_transactions: Vec<WalletTransaction>,
    pub reward_events: Vec<RewardEvent>,
    pub donations: Vec<Donation>,
    pub notifications: Vec<Notification>,
    pub recent_searches: Vec<RecentSearch>,
}

impl BackupSnapshot {
    /// Row counts per table, used in export logs and the health page.
    pub fn row_counts(&self) -> BTreeMap<&'static str, usize> {
        BTreeMap::from([
            ("users", self.users.len()),
            ("service_categories", self.categories.len()),
            ("service_subcategories", self.subcategories.len()),
            ("service_providers", self.providers.len()),
            ("service_bookings", self.bookings.len()),
            ("ride_bookings", self.rides.len()),
            ("wallet_transactions", self.wallet_transactions.len()),
            ("reward_events", self.reward_events.len()),
            ("donations", self.donations.len()),
            ("notifications", self.notifications.len()),
            ("recent_searches", self.recent_searches.len()),
        ])
    }
}
