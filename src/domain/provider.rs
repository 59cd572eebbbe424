use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{PhoneNumber, ProviderId, ProviderName, SubcategoryId, TypeConstraintError};

/// Marketplace entity offering bookable services.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Provider {
    pub id: ProviderId,
    pub subcategory_id: SubcategoryId,
    pub name: ProviderName,
    pub description: Option<String>,
    pub phone: Option<PhoneNumber>,
    pub rating: f64,
    pub review_count: i32,
    pub price_from_cents: i64,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewProvider {
    pub subcategory_id: SubcategoryId,
    pub name: ProviderName,
    pub description: Option<String>,
    pub phone: Option<PhoneNumber>,
    pub price_from_cents: i64,
}

/// Orderings offered on the provider listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderSort {
    #[default]
    Rating,
    PriceLow,
    PriceHigh,
    Name,
}

impl FromStr for ProviderSort {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rating" => Ok(ProviderSort::Rating),
            "price_low" => Ok(ProviderSort::PriceLow),
            "price_high" => Ok(ProviderSort::PriceHigh),
            "name" => Ok(ProviderSort::Name),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown sort `{other}`"
            ))),
        }
    }
}

impl ProviderSort {
    /// Sorts providers in place. Ties keep their relative order.
    pub fn apply(self, providers: &mut [Provider]) {
        match self {
            ProviderSort::Rating => providers.sort_by(|a, b| {
                b.rating
                    .total_cmp(&a.rating)
                    .then(b.review_count.cmp(&a.review_count))
            }),
            ProviderSort::PriceLow => providers.sort_by_key(|p| p.price_from_cents),
            ProviderSort::PriceHigh => {
                providers.sort_by_key(|p| std::cmp::Reverse(p.price_from_cents))
            }
            ProviderSort::Name => {
                providers.sort_by_key(|p| p.name.as_str().to_lowercase())
            }
        }
    }
}
