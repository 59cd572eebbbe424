//! Repository implementation for service providers.

use diesel::prelude::*;

use crate::domain::provider::{NewProvider, Provider};
use crate::domain::types::ProviderId;
use crate::models::provider::{NewProvider as DbNewProvider, Provider as DbProvider};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, ProviderListQuery, ProviderReader, ProviderWriter, like_pattern,
};

impl ProviderReader for DieselRepository {
    fn get_provider_by_id(&self, id: ProviderId) -> RepositoryResult<Option<Provider>> {
        use crate::schema::service_providers;

        let mut conn = self.conn()?;
        let provider = service_providers::table
            .find(id.get())
            .first::<DbProvider>(&mut conn)
            .optional()?;

        provider
            .map(Provider::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_providers(&self, query: ProviderListQuery) -> RepositoryResult<(usize, Vec<Provider>)> {
        use crate::schema::service_providers;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = service_providers::table.into_boxed::<diesel::sqlite::Sqlite>();

            if !query.include_inactive {
                items = items.filter(service_providers::is_active.eq(true));
            }
            if let Some(subcategory_id) = query.subcategory_id {
                items = items.filter(service_providers::subcategory_id.eq(subcategory_id.get()));
            }
            if let Some(term) = query.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
                let pattern = like_pattern(term);
                items = items.filter(
                    service_providers::name
                        .like(pattern.clone())
                        .escape('\\')
                        .or(service_providers::description.like(pattern).escape('\\')),
                );
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((
            service_providers::rating.desc(),
            service_providers::review_count.desc(),
            service_providers::id.asc(),
        ));
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let providers = items
            .load::<DbProvider>(&mut conn)?
            .into_iter()
            .map(|p| Provider::try_from(p).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, providers))
    }

    fn search_provider_names(&self, term: &str, limit: usize) -> RepositoryResult<Vec<String>> {
        use crate::schema::service_providers;

        let mut conn = self.conn()?;
        let names = service_providers::table
            .filter(service_providers::is_active.eq(true))
            .filter(service_providers::name.like(like_pattern(term)).escape('\\'))
            .select(service_providers::name)
            .order(service_providers::rating.desc())
            .limit(limit as i64)
            .load::<String>(&mut conn)?;
        Ok(names)
    }
}

impl ProviderWriter for DieselRepository {
    fn create_provider(&self, new_provider: &NewProvider) -> RepositoryResult<Provider> {
        use crate::schema::service_providers;

        let mut conn = self.conn()?;
        let db_new: DbNewProvider = new_provider.into();
        let provider = diesel::insert_into(service_providers::table)
            .values(&db_new)
            .get_result::<DbProvider>(&mut conn)?;

        Provider::try_from(provider).map_err(RepositoryError::from)
    }

    fn set_provider_verified(
        &self,
        id: ProviderId,
        is_verified: bool,
    ) -> RepositoryResult<Provider> {
        use crate::schema::service_providers;

        let mut conn = self.conn()?;
        let provider = diesel::update(service_providers::table.find(id.get()))
            .set(service_providers::is_verified.eq(is_verified))
            .get_result::<DbProvider>(&mut conn)?;

        Provider::try_from(provider).map_err(RepositoryError::from)
    }

    fn set_provider_active(&self, id: ProviderId, is_active: bool) -> RepositoryResult<Provider> {
        use crate::schema::service_providers;

        let mut conn = self.conn()?;
        let provider = diesel::update(service_providers::table.find(id.get()))
            .set(service_providers::is_active.eq(is_active))
            .get_result::<DbProvider>(&mut conn)?;

        Provider::try_from(provider).map_err(RepositoryError::from)
    }
}
