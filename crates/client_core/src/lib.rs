//! Session, connectivity and recipe-collection core of the recipe client.
//!
//! State lives in one [`AppState`] owned by the [`Controller`]. Intents go
//! through the pure [`reducer`], and the controller executes the network
//! effects it asks for against a [`Backend`].

pub mod backend;
pub mod controller;
pub mod error;
pub mod http;
pub mod navigation;
pub mod prober;
pub mod reducer;
pub mod session;
pub mod state;
pub mod store;
pub mod types;
pub mod view;

pub use backend::Backend;
pub use controller::Controller;
pub use error::{
    AuthFailure, BackendError, CreateFailure, LoadFailure, NoSession, Unreachable,
    ValidationError,
};
pub use http::HttpBackend;
pub use navigation::{ScreenState, StartupPhase};
pub use prober::ConnectivityState;
pub use reducer::{Effect, Event, Intent};
pub use session::{Session, DEMO_IDENTIFIER, DEMO_SECRET};
pub use state::{AppState, Notice, NoticeKind};
pub use store::RecipeCollection;
pub use types::{parse_prep_time, ClientConfig, NewRecipe, PhotoUpload, RecipeDraft};
pub use view::{ConnectivityIndicator, ViewModel};
