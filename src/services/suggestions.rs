//! Search-as-you-type suggestions.

use std::collections::HashSet;

use validator::Validate;

use crate::domain::search::RecentSearch;
use crate::forms::FormError;
use crate::forms::search::RecordSearchForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{CatalogReader, ProviderReader, SearchReader, SearchWriter};
use crate::services::{ServiceError, ServiceResult};

pub const MAX_SUGGESTIONS: usize = 5;
/// How many of the user's past searches are considered.
pub const RECENT_SEARCH_LIMIT: usize = 10;

/// Merges candidates in the order recent searches, subcategory names, provider
/// names.
///
/// A candidate matches when it contains `query` case-insensitively; an empty
/// query only offers recent searches. Duplicates are dropped
/// case-insensitively, keeping the first spelling seen.
pub fn build_suggestions<S: AsRef<str>>(
    query: &str,
    recent: &[S],
    subcategories: &[S],
    providers: &[S],
) -> Vec<String> {
    let needle = query.trim().to_lowercase();

    let candidates: Box<dyn Iterator<Item = &S> + '_> = if needle.is_empty() {
        Box::new(recent.iter())
    } else {
        Box::new(recent.iter().chain(subcategories).chain(providers))
    };

    let mut seen = HashSet::new();
    candidates
        .map(|candidate| candidate.as_ref().trim())
        .filter(|candidate| !candidate.is_empty())
        .filter(|candidate| candidate.to_lowercase().contains(&needle))
        .filter(|candidate| seen.insert(candidate.to_lowercase()))
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}

/// Suggestions for `query` drawn from the user's history and the catalog.
pub fn suggest<R>(repo: &R, user: &AuthenticatedUser, query: &str) -> ServiceResult<Vec<String>>
where
    R: SearchReader + CatalogReader + ProviderReader + ?Sized,
{
    let recent: Vec<String> = repo
        .list_recent_searches(user.id, RECENT_SEARCH_LIMIT)
        .map_err(|err| {
            log::error!("Failed to load recent searches: {err}");
            err
        })?
        .into_iter()
        .map(|search| search.query)
        .collect();

    let term = query.trim();
    if term.is_empty() {
        return Ok(build_suggestions(term, &recent, &[], &[]));
    }

    let subcategories = repo.search_subcategory_names(term, MAX_SUGGESTIONS)?;
    let providers = repo.search_provider_names(term, MAX_SUGGESTIONS)?;

    Ok(build_suggestions(term, &recent, &subcategories, &providers))
}

pub fn record_search<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: RecordSearchForm,
) -> ServiceResult<RecentSearch>
where
    R: SearchWriter + ?Sized,
{
    form.validate().map_err(FormError::from)?;
    repo.record_search(user.id, form.query.trim())
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::UserId;
    use crate::repository::mock::MockRepository;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(9).unwrap(),
            email: "rider@example.com".to_string(),
            roles: vec![],
        }
    }

    #[test]
    fn dedups_case_insensitively_and_caps_at_five() {
        let recent = ["Plumber", "cleaning"];
        let subcategories = ["Plumbing", "PLUMBER", "Pipe cleaning"];
        let providers = ["Plumb Perfect", "Joe's Plumbing", "plumbing", "Plumbers United"];

        let result = build_suggestions("plum", &recent, &subcategories, &providers);

        assert_eq!(
            result,
            vec![
                "Plumber",
                "Plumbing",
                "Plumb Perfect",
                "Joe's Plumbing",
                "Plumbers United"
            ]
        );
    }

    #[test]
    fn keeps_source_order() {
        let result = build_suggestions("ca", &["car wash"], &["Catering"], &["Cab Co"]);
        assert_eq!(result, vec!["car wash", "Catering", "Cab Co"]);
    }

    #[test]
    fn empty_query_offers_only_recent_searches() {
        let result = build_suggestions("  ", &["taxi", "Taxi", "nails"], &["Cleaning"], &["Bob"]);
        assert_eq!(result, vec!["taxi", "nails"]);
    }

    #[test]
    fn no_match_yields_nothing() {
        let empty: [&str; 0] = [];
        assert!(build_suggestions("zzz", &["taxi"], &empty, &["Bob"]).is_empty());
    }

    #[test]
    fn suggest_skips_catalog_lookup_for_empty_query() {
        let mut repo = MockRepository::new();
        repo.expect_list_recent_searches().returning(|user_id, _| {
            Ok(vec![RecentSearch {
                id: 1,
                user_id,
                query: "massage".to_string(),
                created_at: Utc::now().naive_utc(),
            }])
        });
        repo.expect_search_subcategory_names().never();
        repo.expect_search_provider_names().never();

        let result = suggest(&repo, &user(), "").unwrap();

        assert_eq!(result, vec!["massage"]);
    }

    #[test]
    fn suggest_combines_history_and_catalog() {
        let mut repo = MockRepository::new();
        repo.expect_list_recent_searches().returning(|_, _| Ok(vec![]));
        repo.expect_search_subcategory_names()
            .returning(|_, _| Ok(vec!["Hair salon".to_string()]));
        repo.expect_search_provider_names()
            .returning(|_, _| Ok(vec!["Hair by Mia".to_string(), "hair salon".to_string()]));

        let result = suggest(&repo, &user(), "hair").unwrap();

        assert_eq!(result, vec!["Hair salon", "Hair by Mia"]);
    }
}
