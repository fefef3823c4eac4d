use serde::{Deserialize, Serialize};

use crate::domain::{Photo, Recipe};

pub const USER_ENTITY: &str = "users";
pub const RECIPE_ENTITY: &str = "recipes";
pub const PHOTO_PROPERTY: &str = "photo";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Paginated list envelope returned by collection queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginator<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

pub type RecipeList = Paginator<Recipe>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Desc,
}

/// Query directives for a collection fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl FindQuery {
    /// Newest recipes first with the author inlined.
    pub fn recipes_newest_first() -> Self {
        Self {
            relations: Some("author".to_string()),
            order_by: Some("createdAt".to_string()),
            order: Some(SortOrder::Desc),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationsQuery {
    pub relations: String,
}

impl RelationsQuery {
    pub fn author() -> Self {
        Self {
            relations: "author".to_string(),
        }
    }
}

/// Record body sent when creating a recipe, after the photo is uploaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: String,
    #[serde(rename = "prepTime")]
    pub prep_time_minutes: u32,
    pub photo: Photo,
}
