use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::admin::{AnalyticsSnapshot, BackupSnapshot};
use crate::domain::booking::{Booking, BookingStatus, NewBooking};
use crate::domain::catalog::{Category, NewCategory, NewSubcategory, Subcategory};
use crate::domain::donation::{Donation, NewDonation};
use crate::domain::notification::{NewNotification, Notification};
use crate::domain::provider::{NewProvider, Provider};
use crate::domain::rewards::{NewRewardEvent, RewardEvent};
use crate::domain::ride::{NewRide, Ride, RideStatusChange};
use crate::domain::search::RecentSearch;
use crate::domain::types::{
    BookingId, CategoryId, NotificationId, ProviderId, RideId, SubcategoryId, UserEmail, UserId,
    UserRole,
};
use crate::domain::user::{NewUser, User};
use crate::domain::wallet::{NewWalletTransaction, WalletTransaction};
use crate::repository::errors::RepositoryResult;

pub mod admin;
pub mod booking;
pub mod catalog;
pub mod donation;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod notification;
pub mod provider;
pub mod rewards;
pub mod ride;
pub mod search;
pub mod user;
pub mod wallet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Rows to skip for this page; pages are 1-based.
    pub fn offset(&self) -> i64 {
        ((self.page.max(1) - 1) * self.per_page) as i64
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderListQuery {
    pub subcategory_id: Option<SubcategoryId>,
    pub search: Option<String>,
    pub include_inactive: bool,
    pub pagination: Option<Pagination>,
}

impl ProviderListQuery {
    /// Active providers of every subcategory.
    pub fn new() -> Self {
        Self {
            subcategory_id: None,
            search: None,
            include_inactive: false,
            pagination: None,
        }
    }

    pub fn subcategory(mut self, subcategory_id: SubcategoryId) -> Self {
        self.subcategory_id = Some(subcategory_id);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

impl Default for ProviderListQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserListQuery {
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub pagination: Option<Pagination>,
}

impl UserListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn set_user_role(&self, id: UserId, role: UserRole) -> RepositoryResult<User>;
    fn set_user_active(&self, id: UserId, is_active: bool) -> RepositoryResult<User>;
}

pub trait CatalogReader {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    fn list_subcategories(&self, category_id: CategoryId) -> RepositoryResult<Vec<Subcategory>>;
    /// Subcategory names containing `term`, case-insensitively.
    fn search_subcategory_names(&self, term: &str, limit: usize) -> RepositoryResult<Vec<String>>;
}

pub trait CatalogWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn create_subcategory(&self, new_subcategory: &NewSubcategory)
    -> RepositoryResult<Subcategory>;
}

pub trait ProviderReader {
    fn get_provider_by_id(&self, id: ProviderId) -> RepositoryResult<Option<Provider>>;
    fn list_providers(&self, query: ProviderListQuery) -> RepositoryResult<(usize, Vec<Provider>)>;
    /// Active provider names containing `term`, case-insensitively.
    fn search_provider_names(&self, term: &str, limit: usize) -> RepositoryResult<Vec<String>>;
}

pub trait ProviderWriter {
    fn create_provider(&self, new_provider: &NewProvider) -> RepositoryResult<Provider>;
    fn set_provider_verified(&self, id: ProviderId, is_verified: bool)
    -> RepositoryResult<Provider>;
    fn set_provider_active(&self, id: ProviderId, is_active: bool) -> RepositoryResult<Provider>;
}

pub trait BookingReader {
    fn get_booking_by_id(&self, id: BookingId) -> RepositoryResult<Option<Booking>>;
    fn list_user_bookings(&self, user_id: UserId) -> RepositoryResult<Vec<Booking>>;
}

pub trait BookingWriter {
    fn create_booking(&self, new_booking: &NewBooking) -> RepositoryResult<Booking>;
    /// Moves a booking from `from` to `status`; fails with
    /// [`errors::RepositoryError::StaleState`] if it is no longer in `from`.
    fn set_booking_status(
        &self,
        id: BookingId,
        from: BookingStatus,
        status: BookingStatus,
    ) -> RepositoryResult<Booking>;
}

pub trait RideReader {
    fn get_ride_by_id(&self, id: RideId) -> RepositoryResult<Option<Ride>>;
    fn list_user_rides(&self, user_id: UserId) -> RepositoryResult<Vec<Ride>>;
}

pub trait RideWriter {
    fn create_ride(&self, new_ride: &NewRide) -> RepositoryResult<Ride>;
    fn update_ride_status(&self, id: RideId, change: &RideStatusChange) -> RepositoryResult<Ride>;
}

pub trait WalletReader {
    fn wallet_balance(&self, user_id: UserId) -> RepositoryResult<i64>;
    fn list_wallet_transactions(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> RepositoryResult<Vec<WalletTransaction>>;
}

pub trait WalletWriter {
    /// Records a ledger entry. Debits fail with
    /// [`errors::RepositoryError::InsufficientBalance`] when they would
    /// overdraw the wallet.
    fn record_wallet_transaction(
        &self,
        tx: &NewWalletTransaction,
    ) -> RepositoryResult<WalletTransaction>;
}

pub trait RewardReader {
    fn reward_points_balance(&self, user_id: UserId) -> RepositoryResult<i64>;
    fn list_reward_events(&self, user_id: UserId) -> RepositoryResult<Vec<RewardEvent>>;
}

pub trait RewardWriter {
    fn create_reward_event(&self, event: &NewRewardEvent) -> RepositoryResult<RewardEvent>;
    /// Spends points and credits the wallet in one transaction.
    fn redeem_reward_points(
        &self,
        spend: &NewRewardEvent,
        credit: &NewWalletTransaction,
    ) -> RepositoryResult<WalletTransaction>;
}

pub trait DonationReader {
    fn list_user_donations(&self, user_id: UserId) -> RepositoryResult<Vec<Donation>>;
}

pub trait DonationWriter {
    /// Records the donation and the matching wallet debit in one transaction.
    fn create_donation(
        &self,
        donation: &NewDonation,
        debit: &NewWalletTransaction,
    ) -> RepositoryResult<Donation>;
}

pub trait NotificationReader {
    fn list_notifications(&self, user_id: UserId) -> RepositoryResult<Vec<Notification>>;
}

pub trait NotificationWriter {
    fn create_notification(&self, notification: &NewNotification)
    -> RepositoryResult<Notification>;
    /// Returns `false` when the notification does not belong to the user.
    fn mark_notification_read(&self, id: NotificationId, user_id: UserId)
    -> RepositoryResult<bool>;
}

pub trait SearchReader {
    /// Newest first.
    fn list_recent_searches(&self, user_id: UserId, limit: usize)
    -> RepositoryResult<Vec<RecentSearch>>;
}

pub trait SearchWriter {
    fn record_search(&self, user_id: UserId, query: &str) -> RepositoryResult<RecentSearch>;
}

pub trait AdminReader {
    fn analytics(&self) -> RepositoryResult<AnalyticsSnapshot>;
    fn backup(&self) -> RepositoryResult<BackupSnapshot>;
    /// Round-trips a trivial query to prove the database is reachable.
    fn ping(&self) -> RepositoryResult<()>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Escapes `term` for use inside a `LIKE` pattern with `\` as the escape character.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_offsets_are_one_based() {
        let page = Pagination { page: 3, per_page: 20 };
        assert_eq!(page.offset(), 40);
        assert_eq!(Pagination { page: 0, per_page: 20 }.offset(), 0);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
