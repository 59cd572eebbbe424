//! Mock repository implementations for isolating services in tests.

use mockall::mock;

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
    BookingId, CategoryId, NotificationId, ProviderId, RideId, UserEmail, UserId, UserRole,
};
use crate::domain::user::{NewUser, User};
use crate::domain::wallet::{NewWalletTransaction, WalletTransaction};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AdminReader, BookingReader, BookingWriter, CatalogReader, CatalogWriter, DonationReader,
    DonationWriter, NotificationReader, NotificationWriter, ProviderListQuery, ProviderReader,
    ProviderWriter, RewardReader, RewardWriter, RideReader, RideWriter, SearchReader,
    SearchWriter, UserListQuery, UserReader, UserWriter, WalletReader, WalletWriter,
};

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
        fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn set_user_role(&self, id: UserId, role: UserRole) -> RepositoryResult<User>;
        fn set_user_active(&self, id: UserId, is_active: bool) -> RepositoryResult<User>;
    }

    impl CatalogReader for Repository {
        fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
        fn list_subcategories(&self, category_id: CategoryId) -> RepositoryResult<Vec<Subcategory>>;
        fn search_subcategory_names(&self, term: &str, limit: usize) -> RepositoryResult<Vec<String>>;
    }

    impl CatalogWriter for Repository {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn create_subcategory(
            &self,
            new_subcategory: &NewSubcategory,
        ) -> RepositoryResult<Subcategory>;
    }

    impl ProviderReader for Repository {
        fn get_provider_by_id(&self, id: ProviderId) -> RepositoryResult<Option<Provider>>;
        fn list_providers(
            &self,
            query: ProviderListQuery,
        ) -> RepositoryResult<(usize, Vec<Provider>)>;
        fn search_provider_names(&self, term: &str, limit: usize) -> RepositoryResult<Vec<String>>;
    }

    impl ProviderWriter for Repository {
        fn create_provider(&self, new_provider: &NewProvider) -> RepositoryResult<Provider>;
        fn set_provider_verified(
            &self,
            id: ProviderId,
            is_verified: bool,
        ) -> RepositoryResult<Provider>;
        fn set_provider_active(&self, id: ProviderId, is_active: bool) -> RepositoryResult<Provider>;
    }

    impl BookingReader for Repository {
        fn get_booking_by_id(&self, id: BookingId) -> RepositoryResult<Option<Booking>>;
        fn list_user_bookings(&self, user_id: UserId) -> RepositoryResult<Vec<Booking>>;
    }

    impl BookingWriter for Repository {
        fn create_booking(&self, new_booking: &NewBooking) -> RepositoryResult<Booking>;
        fn set_booking_status(
            &self,
            id: BookingId,
            from: BookingStatus,
            status: BookingStatus,
        ) -> RepositoryResult<Booking>;
    }

    impl RideReader for Repository {
        fn get_ride_by_id(&self, id: RideId) -> RepositoryResult<Option<Ride>>;
        fn list_user_rides(&self, user_id: UserId) -> RepositoryResult<Vec<Ride>>;
    }

    impl RideWriter for Repository {
        fn create_ride(&self, new_ride: &NewRide) -> RepositoryResult<Ride>;
        fn update_ride_status(&self, id: RideId, change: &RideStatusChange) -> RepositoryResult<Ride>;
    }

    impl WalletReader for Repository {
        fn wallet_balance(&self, user_id: UserId) -> RepositoryResult<i64>;
        fn list_wallet_transactions(
            &self,
            user_id: UserId,
            limit: usize,
        ) -> RepositoryResult<Vec<WalletTransaction>>;
    }

    impl WalletWriter for Repository {
        fn record_wallet_transaction(
            &self,
            tx: &NewWalletTransaction,
        ) -> RepositoryResult<WalletTransaction>;
    }

    impl RewardReader for Repository {
        fn reward_points_balance(&self, user_id: UserId) -> RepositoryResult<i64>;
        fn list_reward_events(&self, user_id: UserId) -> RepositoryResult<Vec<RewardEvent>>;
    }

    impl RewardWriter for Repository {
        fn create_reward_event(&self, event: &NewRewardEvent) -> RepositoryResult<RewardEvent>;
        fn redeem_reward_points(
            &self,
            spend: &NewRewardEvent,
            credit: &NewWalletTransaction,
        ) -> RepositoryResult<WalletTransaction>;
    }

    impl DonationReader for Repository {
        fn list_user_donations(&self, user_id: UserId) -> RepositoryResult<Vec<Donation>>;
    }

    impl DonationWriter for Repository {
        fn create_donation(
            &self,
            donation: &NewDonation,
            debit: &NewWalletTransaction,
        ) -> RepositoryResult<Donation>;
    }

    impl NotificationReader for Repository {
        fn list_notifications(&self, user_id: UserId) -> RepositoryResult<Vec<Notification>>;
    }

    impl NotificationWriter for Repository {
        fn create_notification(
            &self,
            notification: &NewNotification,
        ) -> RepositoryResult<Notification>;
        fn mark_notification_read(
            &self,
            id: NotificationId,
            user_id: UserId,
        ) -> RepositoryResult<bool>;
    }

    impl SearchReader for Repository {
        fn list_recent_searches(
            &self,
            user_id: UserId,
            limit: usize,
        ) -> RepositoryResult<Vec<RecentSearch>>;
    }

    impl SearchWriter for Repository {
        fn record_search(&self, user_id: UserId, query: &str) -> RepositoryResult<RecentSearch>;
    }

    impl AdminReader for Repository {
        fn analytics(&self) -> RepositoryResult<AnalyticsSnapshot>;
        fn backup(&self) -> RepositoryResult<BackupSnapshot>;
        fn ping(&self) -> RepositoryResult<()>;
    }
}
