//! Resource store for recipes.
//!
//! The collection is ordered newest first. `load` gets that order from the
//! backend's sort directive; `create` keeps it by prepending, which assumes
//! the freshly created recipe is newer than anything already held. Another
//! session creating recipes in between breaks that assumption until the next
//! `load`, which is the way to re-sync.

use shared::{domain::Recipe, protocol::FindQuery};
use tracing::{info, warn};

use crate::{
    backend::Backend,
    error::{CreateFailure, LoadFailure, ValidationError},
    types::{NewRecipe, RecipeDraft},
};

pub const CREATE_FORBIDDEN_MESSAGE: &str =
    "Failed to create recipe. You may not have the required permissions.";
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create recipe.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeCollection {
    items: Vec<Recipe>,
}

impl RecipeCollection {
    pub fn as_slice(&self) -> &[Recipe] {
        &self.items
    }

    pub(crate) fn replace(&mut self, items: Vec<Recipe>) {
        self.items = items;
    }

    pub(crate) fn prepend(&mut self, recipe: Recipe) {
        self.items.insert(0, recipe);
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

/// Local checks run before anything is sent to the backend.
pub fn validate(draft: RecipeDraft) -> Result<NewRecipe, ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let Some(photo) = draft.photo else {
        return Err(ValidationError::MissingPhoto);
    };
    Ok(NewRecipe {
        title: draft.title,
        description: draft.description,
        prep_time_minutes: draft.prep_time_minutes,
        photo,
    })
}

pub async fn load(backend: &dyn Backend) -> Result<Vec<Recipe>, LoadFailure> {
    let recipes = backend
        .find_recipes(&FindQuery::recipes_newest_first())
        .await
        .map_err(|source| {
            warn!(error = %source, "failed to load recipes");
            LoadFailure::from(source)
        })?;
    info!(count = recipes.len(), "loaded recipes");
    Ok(recipes)
}

pub async fn create(backend: &dyn Backend, recipe: &NewRecipe) -> Result<Recipe, CreateFailure> {
    match backend.create_recipe(recipe).await {
        Ok(created) => {
            info!(recipe_id = %created.id, "created recipe");
            Ok(created)
        }
        Err(source) => {
            warn!(error = %source, "failed to create recipe");
            let message = if source.is_auth_rejection() {
                CREATE_FORBIDDEN_MESSAGE
            } else {
                CREATE_FAILED_MESSAGE
            };
            Err(CreateFailure {
                message: message.to_string(),
                code: source.code(),
                source,
            })
        }
    }
}
