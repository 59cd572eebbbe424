use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, SubcategoryId};

/// Top-level service category shown on the home screen.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub icon: Option<String>,
    pub sort_order: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub category_id: CategoryId,
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct NewCategory {
    pub name: String,
    pub icon: Option<String>,
    pub sort_order: i32,
}

#[derive(Clone, Debug)]
pub struct NewSubcategory {
    pub category_id: CategoryId,
    pub name: String,
}
