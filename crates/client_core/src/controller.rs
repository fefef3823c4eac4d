//! Single-writer runtime: feeds intents through the reducer and executes the
//! resulting effects one at a time against the backend.

use std::{collections::VecDeque, sync::Arc};

use tracing::debug;

use crate::{
    backend::Backend,
    prober,
    reducer::{reduce, Effect, Event, Intent},
    session,
    state::AppState,
    store,
    types::ClientConfig,
    view::ViewModel,
};

pub struct Controller {
    backend: Arc<dyn Backend>,
    admin_url: String,
    state: AppState,
}

impl Controller {
    pub fn new(backend: Arc<dyn Backend>, config: &ClientConfig) -> Self {
        Self {
            backend,
            admin_url: config.admin_url(),
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> ViewModel<'_> {
        ViewModel::project(&self.state, &self.admin_url)
    }

    /// Runs probe then resume. Resolves once a screen other than `Loading`
    /// can be shown.
    pub async fn startup(&mut self) -> &AppState {
        self.dispatch(Intent::Startup).await
    }

    /// Applies one intent and every effect it causes, in order, before
    /// returning.
    pub async fn dispatch(&mut self, intent: Intent) -> &AppState {
        let mut pending = VecDeque::from([Event::from(intent)]);
        while let Some(event) = pending.pop_front() {
            let (next, effects) = reduce(std::mem::take(&mut self.state), event);
            self.state = next;
            for effect in effects {
                pending.push_back(self.execute(effect).await);
            }
        }
        &self.state
    }

    async fn execute(&self, effect: Effect) -> Event {
        debug!(effect = effect.name(), "executing effect");
        let backend = self.backend.as_ref();
        match effect {
            Effect::Probe => Event::ProbeFinished(prober::probe(backend).await),
            Effect::Resume => Event::ResumeFinished(session::resume(backend).await),
            Effect::Login { identifier, secret } => {
                Event::LoginFinished(session::login(backend, &identifier, &secret).await)
            }
            Effect::Logout => {
                session::logout(backend).await;
                Event::LogoutFinished
            }
            Effect::Load => Event::LoadFinished(store::load(backend).await),
            Effect::Create(recipe) => Event::CreateFinished(store::create(backend, &recipe).await),
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
