use crate::domain::catalog::{Category, Subcategory};
use crate::domain::provider::{Provider, ProviderSort};
use crate::domain::types::{CategoryId, ProviderId, SubcategoryId};
use crate::dto::catalog::ProvidersQuery;
use crate::pagination::Paginated;
use crate::repository::{CatalogReader, ProviderListQuery, ProviderReader};
use crate::services::{DEFAULT_ITEMS_PER_PAGE, ServiceError, ServiceResult};

/// Categories ordered for the home screen grid.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CatalogReader + ?Sized,
{
    repo.list_categories().map_err(|err| {
        log::error!("Failed to list categories: {err}");
        ServiceError::from(err)
    })
}

pub fn list_subcategories<R>(repo: &R, category_id: i32) -> ServiceResult<Vec<Subcategory>>
where
    R: CatalogReader + ?Sized,
{
    let category_id = CategoryId::new(category_id)?;
    repo.list_subcategories(category_id)
        .map_err(ServiceError::from)
}

/// Active providers matching the query, one page at a time.
///
/// The requested sort is applied within the page; the repository already
/// returns rows best-rated first.
pub fn list_providers<R>(repo: &R, query: ProvidersQuery) -> ServiceResult<Paginated<Provider>>
where
    R: ProviderReader + ?Sized,
{
    let sort = query
        .sort
        .as_deref()
        .map(str::parse::<ProviderSort>)
        .transpose()?
        .unwrap_or_default();
    let page = query.page.unwrap_or(1).max(1);

    let mut list_query = ProviderListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(subcategory_id) = query.subcategory_id {
        list_query = list_query.subcategory(SubcategoryId::new(subcategory_id)?);
    }
    if let Some(term) = query.q.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        list_query = list_query.search(term);
    }

    let (total, mut providers) = repo.list_providers(list_query).map_err(|err| {
        log::error!("Failed to list providers: {err}");
        ServiceError::from(err)
    })?;
    sort.apply(&mut providers);

    Ok(Paginated::new(
        providers,
        page,
        DEFAULT_ITEMS_PER_PAGE,
        total,
    ))
}

/// Provider detail; inactive providers are hidden from customers.
pub fn get_provider<R>(repo: &R, provider_id: i32) -> ServiceResult<Provider>
where
    R: ProviderReader + ?Sized,
{
    let provider_id = ProviderId::new(provider_id)?;
    repo.get_provider_by_id(provider_id)?
        .filter(|provider| provider.is_active)
        .ok_or(ServiceError::NotFound)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::ProviderName;
    use crate::repository::mock::MockRepository;

    fn provider(id: i32, name: &str, rating: f64, price: i64, active: bool) -> Provider {
        Provider {
            id: ProviderId::new(id).unwrap(),
            subcategory_id: SubcategoryId::new(1).unwrap(),
            name: ProviderName::new(name).unwrap(),
            description: None,
            phone: None,
            rating,
            review_count: 10,
            price_from_cents: price,
            is_verified: true,
            is_active: active,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn list_providers_applies_filters_and_sort() {
        let mut repo = MockRepository::new();
        repo.expect_list_providers()
            .withf(|query| {
                query.subcategory_id == SubcategoryId::new(4).ok()
                    && query.search.as_deref() == Some("clean")
                    && !query.include_inactive
                    && query.pagination.as_ref().map(|p| p.page) == Some(2)
            })
            .returning(|_| {
                Ok((
                    22,
                    vec![
                        provider(1, "Alpha", 4.9, 5_000, true),
                        provider(2, "Beta", 4.1, 2_000, true),
                    ],
                ))
            });

        let page = list_providers(
            &repo,
            ProvidersQuery {
                subcategory_id: Some(4),
                q: Some(" clean ".to_string()),
                sort: Some("price_low".to_string()),
                page: Some(2),
            },
        )
        .unwrap();

        assert_eq!(page.total, 22);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items[0].name.as_str(), "Beta");
    }

    #[test]
    fn unknown_sort_is_rejected() {
        let repo = MockRepository::new();
        let result = list_providers(
            &repo,
            ProvidersQuery {
                sort: Some("cheapest".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn inactive_provider_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_provider_by_id()
            .returning(|_| Ok(Some(provider(3, "Gone", 3.0, 100, false))));

        assert_eq!(get_provider(&repo, 3), Err(ServiceError::NotFound));
    }

    #[test]
    fn non_positive_ids_are_rejected() {
        let repo = MockRepository::new();
        assert!(matches!(
            list_subcategories(&repo, 0),
            Err(ServiceError::Validation(_))
        ));
    }
}
