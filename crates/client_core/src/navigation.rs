//! Screen selection. The active screen is never stored; it is recomputed
//! from the startup phase, the probe result and the session.

use crate::{prober::ConnectivityState, session::Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Loading,
    Landing,
    Dashboard,
}

/// Progress of the one-time startup sequence. Resume only starts once the
/// probe has succeeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StartupPhase {
    #[default]
    NotStarted,
    Probing,
    Resuming,
    Complete,
}

pub fn derive_screen(
    phase: StartupPhase,
    connectivity: Option<&ConnectivityState>,
    session: &Session,
) -> ScreenState {
    if phase != StartupPhase::Complete {
        return ScreenState::Loading;
    }
    // An unreachable backend wins over everything else.
    match connectivity {
        Some(state) if state.reachable => {}
        _ => return ScreenState::Landing,
    }
    if session.is_authenticated() {
        ScreenState::Dashboard
    } else {
        ScreenState::Landing
    }
}
