//! reqwest implementation of [`Backend`] for a Manifest-style REST API.

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder, Response,
};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Photo, Recipe, User},
    error::ApiError,
    protocol::{
        CreateRecipeRequest, FindQuery, LoginRequest, LoginResponse, RecipeList, RelationsQuery,
        PHOTO_PROPERTY, RECIPE_ENTITY, USER_ENTITY,
    },
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{backend::Backend, error::BackendError, types::ClientConfig, types::NewRecipe};

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

pub struct HttpBackend {
    http: Client,
    config: ClientConfig,
    token: RwLock<Option<String>>,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: Client::new(),
            config,
            token: RwLock::new(None),
        }
    }

    /// Starts with a previously issued credential so `me` can resume it.
    pub fn with_token(config: ClientConfig, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            config,
            token: RwLock::new(Some(token.into())),
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api{path}", self.config.base_url())
    }

    async fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

async fn check_status(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_response(status.as_u16(), &body).into())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let body = check_status(response).await?.text().await?;
    serde_json::from_str(&body).map_err(|err| BackendError::Decode(err.to_string()))
}

#[async_trait]
impl Backend for HttpBackend {
    async fn health(&self) -> Result<(), BackendError> {
        let response = self.http.get(self.endpoint("/health")).send().await?;
        check_status(response).await?;
        Ok(())
    }

    async fn me(&self) -> Result<User, BackendError> {
        let token = self
            .token
            .read()
            .await
            .clone()
            .ok_or(BackendError::MissingCredential)?;
        let response = self
            .http
            .get(self.endpoint(&format!("/auth/{USER_ENTITY}/me")))
            .bearer_auth(token)
            .send()
            .await?;
        decode(response).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<(), BackendError> {
        let response = self
            .http
            .post(self.endpoint(&format!("/auth/{USER_ENTITY}/login")))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        let body: LoginResponse = decode(response).await?;
        *self.token.write().await = Some(body.token);
        Ok(())
    }

    async fn logout(&self) -> Result<(), BackendError> {
        // Tokens are stateless on the backend; forgetting it ends the session.
        let had_token = self.token.write().await.take().is_some();
        debug!(had_token, "cleared backend credential");
        Ok(())
    }

    async fn find_recipes(&self, query: &FindQuery) -> Result<Vec<Recipe>, BackendError> {
        let request = self
            .http
            .get(self.endpoint(&format!("/collections/{RECIPE_ENTITY}")))
            .query(query);
        let response = self.authorized(request).await.send().await?;
        let list: RecipeList = decode(response).await?;
        Ok(list.data)
    }

    async fn create_recipe(&self, recipe: &NewRecipe) -> Result<Recipe, BackendError> {
        let mime_type = recipe.photo.mime_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE);
        let image = Part::bytes(recipe.photo.bytes.clone())
            .file_name(recipe.photo.filename.clone())
            .mime_str(mime_type)
            .map_err(|_| BackendError::InvalidUpload(format!("unsupported mime type '{mime_type}'")))?;
        let form = Form::new()
            .text("entity", RECIPE_ENTITY)
            .text("property", PHOTO_PROPERTY)
            .part("image", image);

        let upload = self
            .http
            .post(self.endpoint("/upload/image"))
            .multipart(form);
        let response = self.authorized(upload).await.send().await?;
        let photo: Photo = decode(response).await?;
        debug!(
            filename = %recipe.photo.filename,
            has_thumbnail = photo.thumbnail.is_some(),
            "uploaded recipe photo"
        );

        let create = self
            .http
            .post(self.endpoint(&format!("/collections/{RECIPE_ENTITY}")))
            .query(&RelationsQuery::author())
            .json(&CreateRecipeRequest {
                title: recipe.title.clone(),
                description: recipe.description.clone(),
                prep_time_minutes: recipe.prep_time_minutes,
                photo,
            });
        let response = self.authorized(create).await.send().await?;
        decode(response).await
    }
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
