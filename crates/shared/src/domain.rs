use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(RecipeId);

/// Role string assigned by the backend. Only `chef` and `admin` carry meaning
/// on the client; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Chef,
    Admin,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Chef => "chef",
            Role::Admin => "admin",
            Role::Other(raw) => raw,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "chef" => Role::Chef,
            "admin" => Role::Admin,
            _ => Role::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        match value {
            Role::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Other(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// Whether the create-recipe affordance should be offered. The backend
    /// still authorizes every write on its own.
    pub fn can_publish(&self) -> bool {
        matches!(self.role, Role::Chef | Role::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ImageRef>,
}

pub const UNKNOWN_AUTHOR_LABEL: &str = "Unknown Chef";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "prepTime", default)]
    pub prep_time_minutes: u32,
    #[serde(default)]
    pub photo: Option<Photo>,
    #[serde(default)]
    pub author: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Recipe {
    pub fn author_label(&self) -> &str {
        self.author
            .as_ref()
            .map(|author| author.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR_LABEL)
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.photo
            .as_ref()
            .and_then(|photo| photo.thumbnail.as_ref())
            .map(|thumb| thumb.url.as_str())
    }
}
