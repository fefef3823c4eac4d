//! Pure state transitions: `(state, event) -> (state, effects)`.
//!
//! Network calls never happen here. Each [`Effect`] is executed by the
//! controller, and its outcome comes back as another [`Event`].

use shared::domain::{Recipe, User};
use tracing::{debug, info};

use crate::{
    error::{AuthFailure, CreateFailure, LoadFailure, NoSession, Unreachable},
    navigation::StartupPhase,
    prober::{ConnectivityState, Reachable},
    state::{AppState, Notice, NoticeKind},
    store,
    types::{NewRecipe, RecipeDraft},
};

/// What the presentation layer (or the host, for `Startup`) asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Startup,
    Login { identifier: String, secret: String },
    Logout,
    LoadCollection,
    CreateRecipe(RecipeDraft),
    DismissNotice,
}

#[derive(Debug)]
pub enum Event {
    Intent(Intent),
    ProbeFinished(Result<Reachable, Unreachable>),
    ResumeFinished(Result<User, NoSession>),
    LoginFinished(Result<User, AuthFailure>),
    LogoutFinished,
    LoadFinished(Result<Vec<Recipe>, LoadFailure>),
    CreateFinished(Result<Recipe, CreateFailure>),
}

impl From<Intent> for Event {
    fn from(intent: Intent) -> Self {
        Event::Intent(intent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Probe,
    Resume,
    Login { identifier: String, secret: String },
    Logout,
    Load,
    Create(NewRecipe),
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Probe => "probe",
            Effect::Resume => "resume",
            Effect::Login { .. } => "login",
            Effect::Logout => "logout",
            Effect::Load => "load",
            Effect::Create(_) => "create",
        }
    }
}

pub fn reduce(mut state: AppState, event: Event) -> (AppState, Vec<Effect>) {
    let effects = match event {
        Event::Intent(intent) => apply_intent(&mut state, intent),
        Event::ProbeFinished(result) => {
            if state.phase != StartupPhase::Probing {
                debug!("ignoring probe result outside startup");
                return (state, Vec::new());
            }
            state.connectivity = Some(ConnectivityState::from_probe(&result));
            if result.is_ok() {
                state.phase = StartupPhase::Resuming;
                vec![Effect::Resume]
            } else {
                state.session.clear();
                state.phase = StartupPhase::Complete;
                Vec::new()
            }
        }
        Event::ResumeFinished(result) => {
            if state.phase != StartupPhase::Resuming {
                debug!("ignoring resume result outside startup");
                return (state, Vec::new());
            }
            match result {
                Ok(user) => state.session.establish(user),
                Err(NoSession) => state.session.clear(),
            }
            state.phase = StartupPhase::Complete;
            Vec::new()
        }
        Event::LoginFinished(Ok(user)) => {
            // A new identity never inherits the previous one's records.
            state.recipes.clear();
            state.session.establish(user);
            state.notice = None;
            Vec::new()
        }
        Event::LoginFinished(Err(failure)) => {
            if failure.credential_dropped {
                info!("login rolled back; previous session ended");
                state.session.clear();
                state.recipes.clear();
            }
            state.notice = Some(Notice::new(NoticeKind::Auth, failure.message));
            Vec::new()
        }
        Event::LogoutFinished => Vec::new(),
        Event::LoadFinished(Ok(recipes)) => {
            if state.session.is_authenticated() {
                state.recipes.replace(recipes);
            } else {
                debug!(count = recipes.len(), "discarding recipes loaded for an ended session");
            }
            Vec::new()
        }
        // Already logged by the store; the current collection stays on screen.
        Event::LoadFinished(Err(_)) => Vec::new(),
        Event::CreateFinished(Ok(recipe)) => {
            if state.session.is_authenticated() {
                state.recipes.prepend(recipe);
            }
            Vec::new()
        }
        Event::CreateFinished(Err(failure)) => {
            state.notice = Some(Notice::new(NoticeKind::Create, failure.message));
            Vec::new()
        }
    };
    (state, effects)
}

fn apply_intent(state: &mut AppState, intent: Intent) -> Vec<Effect> {
    match intent {
        Intent::Startup => {
            if state.phase != StartupPhase::NotStarted {
                debug!(phase = ?state.phase, "startup already requested");
                return Vec::new();
            }
            state.phase = StartupPhase::Probing;
            vec![Effect::Probe]
        }
        Intent::Login { identifier, secret } => {
            if state.phase != StartupPhase::Complete {
                debug!("login requested before startup finished");
                return Vec::new();
            }
            state.notice = None;
            vec![Effect::Login { identifier, secret }]
        }
        Intent::Logout => {
            info!("logging out");
            state.session.clear();
            state.recipes.clear();
            state.notice = None;
            vec![Effect::Logout]
        }
        Intent::LoadCollection => {
            if !state.session.is_authenticated() {
                debug!("load requested without a session");
                return Vec::new();
            }
            vec![Effect::Load]
        }
        Intent::CreateRecipe(draft) => {
            if !state.session.is_authenticated() {
                debug!("create requested without a session");
                return Vec::new();
            }
            match store::validate(draft) {
                Ok(recipe) => {
                    state.notice = None;
                    vec![Effect::Create(recipe)]
                }
                Err(err) => {
                    state.notice = Some(Notice::new(NoticeKind::Validation, err.to_string()));
                    Vec::new()
                }
            }
        }
        Intent::DismissNotice => {
            state.notice = None;
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
