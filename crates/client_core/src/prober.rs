//! Connectivity prober: one health round trip, no retries.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{backend::Backend, error::Unreachable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reachable {
    pub checked_at: DateTime<Utc>,
}

/// Result of the startup probe. Recorded once and never refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityState {
    pub reachable: bool,
    pub checked_at: DateTime<Utc>,
}

impl ConnectivityState {
    pub fn from_probe(result: &Result<Reachable, Unreachable>) -> Self {
        match result {
            Ok(reachable) => Self {
                reachable: true,
                checked_at: reachable.checked_at,
            },
            Err(unreachable) => Self {
                reachable: false,
                checked_at: unreachable.checked_at,
            },
        }
    }
}

pub async fn probe(backend: &dyn Backend) -> Result<Reachable, Unreachable> {
    match backend.health().await {
        Ok(()) => {
            info!("backend connection successful");
            Ok(Reachable {
                checked_at: Utc::now(),
            })
        }
        Err(err) => {
            warn!(error = %err, "backend connection failed; continuing in degraded mode");
            Err(Unreachable {
                reason: err.to_string(),
                checked_at: Utc::now(),
            })
        }
    }
}
