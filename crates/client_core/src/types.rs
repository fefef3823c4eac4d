use url::Url;

use crate::error::BackendError;

/// Where the backend lives. The base URL never carries a trailing slash so
/// endpoint paths can be appended with `format!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    pub fn new(raw_base_url: &str) -> Result<Self, BackendError> {
        let parsed = Url::parse(raw_base_url.trim())?;
        let base_url = parsed.as_str().trim_end_matches('/').to_string();
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Outbound link to the backend's administrative interface.
    pub fn admin_url(&self) -> String {
        format!("{}/admin", self.base_url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub filename: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Recipe as typed by the user, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub prep_time_minutes: u32,
    pub photo: Option<PhotoUpload>,
}

/// A draft that passed local validation and may be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub prep_time_minutes: u32,
    pub photo: PhotoUpload,
}

/// Lenient prep-time parsing for free-text input: anything that is not a
/// non-negative integer counts as zero.
pub fn parse_prep_time(input: &str) -> u32 {
    input.trim().parse::<u32>().unwrap_or(0)
}
