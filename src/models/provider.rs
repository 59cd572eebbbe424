//! Diesel models for service providers.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::provider::{NewProvider as DomainNewProvider, Provider as DomainProvider};
use crate::domain::types::{PhoneNumber, ProviderId, ProviderName, SubcategoryId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::service_providers)]
/// Diesel model for [`crate::domain::provider::Provider`].
pub struct Provider {
    pub id: i32,
    pub subcategory_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub rating: f64,
    pub review_count: i32,
    pub price_from_cents: i64,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::service_providers)]
pub struct NewProvider<'a> {
    pub subcategory_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub price_from_cents: i64,
}

impl TryFrom<Provider> for DomainProvider {
    type Error = TypeConstraintError;

    fn try_from(provider: Provider) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProviderId::try_from(provider.id)?,
            subcategory_id: SubcategoryId::try_from(provider.subcategory_id)?,
            name: ProviderName::new(provider.name)?,
            description: provider.description,
            phone: provider.phone.as_deref().map(PhoneNumber::new).transpose()?,
            rating: provider.rating,
            review_count: provider.review_count,
            price_from_cents: provider.price_from_cents,
            is_verified: provider.is_verified,
            is_active: provider.is_active,
            created_at: provider.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewProvider> for NewProvider<'a> {
    fn from(provider: &'a DomainNewProvider) -> Self {
        Self {
            subcategory_id: provider.subcategory_id.get(),
            name: provider.name.as_str(),
            description: provider.description.as_deref(),
            phone: provider.phone.as_ref().map(|p| p.as_str()),
            price_from_cents: provider.price_from_cents,
        }
    }
}
