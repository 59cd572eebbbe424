//! Repository implementation for the service catalog.

use diesel::prelude::*;

use crate::domain::catalog::{Category, NewCategory, NewSubcategory, Subcategory};
use crate::domain::types::CategoryId;
use crate::models::catalog::{
    Category as DbCategory, NewCategory as DbNewCategory, NewSubcategory as DbNewSubcategory,
    Subcategory as DbSubcategory,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CatalogReader, CatalogWriter, DieselRepository, like_pattern};

impl CatalogReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::service_categories;

        let mut conn = self.conn()?;
        service_categories::table
            .order((service_categories::sort_order.asc(), service_categories::name.asc()))
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(|c| Category::try_from(c).map_err(RepositoryError::from))
            .collect()
    }

    fn list_subcategories(&self, category_id: CategoryId) -> RepositoryResult<Vec<Subcategory>> {
        use crate::schema::service_subcategories;

        let mut conn = self.conn()?;
        service_subcategories::table
            .filter(service_subcategories::category_id.eq(category_id.get()))
            .order(service_subcategories::name.asc())
            .load::<DbSubcategory>(&mut conn)?
            .into_iter()
            .map(|s| Subcategory::try_from(s).map_err(RepositoryError::from))
            .collect()
    }

    fn search_subcategory_names(&self, term: &str, limit: usize) -> RepositoryResult<Vec<String>> {
        use crate::schema::service_subcategories;

        let mut conn = self.conn()?;
        let names = service_subcategories::table
            .filter(
                service_subcategories::name
                    .like(like_pattern(term))
                    .escape('\\'),
            )
            .select(service_subcategories::name)
            .order(service_subcategories::name.asc())
            .limit(limit as i64)
            .load::<String>(&mut conn)?;
        Ok(names)
    }
}

impl CatalogWriter for DieselRepository {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::service_categories;

        let mut conn = self.conn()?;
        let db_new: DbNewCategory = new_category.into();
        let category = diesel::insert_into(service_categories::table)
            .values(&db_new)
            .get_result::<DbCategory>(&mut conn)?;

        Category::try_from(category).map_err(RepositoryError::from)
    }

    fn create_subcategory(
        &self,
        new_subcategory: &NewSubcategory,
    ) -> RepositoryResult<Subcategory> {
        use crate::schema::service_subcategories;

        let mut conn = self.conn()?;
        let db_new: DbNewSubcategory = new_subcategory.into();
        let subcategory = diesel::insert_into(service_subcategories::table)
            .values(&db_new)
            .get_result::<DbSubcategory>(&mut conn)?;

        Subcategory::try_from(subcategory).map_err(RepositoryError::from)
    }
}
