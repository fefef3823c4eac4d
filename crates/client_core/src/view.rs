//! Read-only projection handed to the presentation layer.

use shared::domain::{Recipe, User};

use crate::{
    navigation::ScreenState,
    state::{AppState, Notice},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityIndicator {
    Checking,
    Connected,
    Disconnected,
}

impl ConnectivityIndicator {
    pub fn label(self) -> &'static str {
        match self {
            ConnectivityIndicator::Checking => "Checking",
            ConnectivityIndicator::Connected => "API Connected",
            ConnectivityIndicator::Disconnected => "API Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel<'a> {
    pub screen: ScreenState,
    pub connectivity: ConnectivityIndicator,
    pub user: Option<&'a User>,
    pub recipes: &'a [Recipe],
    pub notice: Option<&'a Notice>,
    pub can_create: bool,
    pub admin_url: &'a str,
}

impl<'a> ViewModel<'a> {
    pub fn project(state: &'a AppState, admin_url: &'a str) -> Self {
        let screen = state.screen();
        let connectivity = match state.connectivity() {
            None => ConnectivityIndicator::Checking,
            Some(probe) if probe.reachable => ConnectivityIndicator::Connected,
            Some(_) => ConnectivityIndicator::Disconnected,
        };
        // The dashboard is the only screen that shows the session.
        let user = match screen {
            ScreenState::Dashboard => state.user(),
            _ => None,
        };
        Self {
            screen,
            connectivity,
            user,
            recipes: if user.is_some() { state.recipes() } else { &[] },
            notice: state.notice(),
            can_create: user.is_some_and(User::can_publish),
            admin_url,
        }
    }
}
