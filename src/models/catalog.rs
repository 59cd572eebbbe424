//! Diesel models for categories and subcategories.

use diesel::prelude::*;

use crate::domain::catalog::{
    Category as DomainCategory, NewCategory as DomainNewCategory,
    NewSubcategory as DomainNewSubcategory, Subcategory as DomainSubcategory,
};
use crate::domain::types::{CategoryId, SubcategoryId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::service_categories)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub icon: Option<String>,
    pub sort_order: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::service_categories)]
pub struct NewCategory<'a> {
    pub name: &'a str,
    pub icon: Option<&'a str>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Category, foreign_key = category_id))]
#[diesel(table_name = crate::schema::service_subcategories)]
pub struct Subcategory {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::service_subcategories)]
pub struct NewSubcategory<'a> {
    pub category_id: i32,
    pub name: &'a str,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CategoryId::try_from(category.id)?,
            name: category.name,
            icon: category.icon,
            sort_order: category.sort_order,
        })
    }
}

impl TryFrom<Subcategory> for DomainSubcategory {
    type Error = TypeConstraintError;

    fn try_from(subcategory: Subcategory) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SubcategoryId::try_from(subcategory.id)?,
            category_id: CategoryId::try_from(subcategory.category_id)?,
            name: subcategory.name,
        })
    }
}

impl<'a> From<&'a DomainNewCategory> for NewCategory<'a> {
    fn from(category: &'a DomainNewCategory) -> Self {
        Self {
            name: category.name.as_str(),
            icon: category.icon.as_deref(),
            sort_order: category.sort_order,
        }
    }
}

impl<'a> From<&'a DomainNewSubcategory> for NewSubcategory<'a> {
    fn from(subcategory: &'a DomainNewSubcategory) -> Self {
        Self {
            category_id: subcategory.category_id.get(),
            name: subcategory.name.as_str(),
        }
    }
}
