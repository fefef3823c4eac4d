use async_trait::async_trait;
use shared::{
    domain::{Recipe, User},
    protocol::FindQuery,
};

use crate::{error::BackendError, types::NewRecipe};

/// Request/response surface of the remote backend. Credential handling is
/// owned by the implementation: `login` stores the issued credential and
/// `logout` drops it.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn health(&self) -> Result<(), BackendError>;
    async fn me(&self) -> Result<User, BackendError>;
    async fn login(&self, email: &str, password: &str) -> Result<(), BackendError>;
    async fn logout(&self) -> Result<(), BackendError>;
    async fn find_recipes(&self, query: &FindQuery) -> Result<Vec<Recipe>, BackendError>;
    async fn create_recipe(&self, recipe: &NewRecipe) -> Result<Recipe, BackendError>;
}
