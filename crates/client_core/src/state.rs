use shared::domain::{Recipe, User};

use crate::{
    navigation::{derive_screen, ScreenState, StartupPhase},
    prober::ConnectivityState,
    session::Session,
    store::RecipeCollection,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Auth,
    Validation,
    Create,
}

/// Blocking message the presentation layer must show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Everything the client knows. Only the reducer writes to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub(crate) phase: StartupPhase,
    pub(crate) connectivity: Option<ConnectivityState>,
    pub(crate) session: Session,
    pub(crate) recipes: RecipeCollection,
    pub(crate) notice: Option<Notice>,
}

impl AppState {
    pub fn screen(&self) -> ScreenState {
        derive_screen(self.phase, self.connectivity.as_ref(), &self.session)
    }

    pub fn phase(&self) -> StartupPhase {
        self.phase
    }

    pub fn connectivity(&self) -> Option<&ConnectivityState> {
        self.connectivity.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn recipes(&self) -> &[Recipe] {
        self.recipes.as_slice()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}
