//! Service health probing.
//!
//! `GET /health` lives at the service root, not under `/api`. The probe is
//! advisory: every failure becomes `false` and only flips the status
//! indicator, it never blocks a user action.
//!
//! # Clock injection
//! `HealthMonitor::is_due_at` takes `now` as a parameter so poll scheduling
//! is deterministic in tests.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

use crate::api::ApiClient;
use crate::logging::{self, Endpoint};

impl ApiClient {
    /// `true` iff `/health` answered with a 2xx status. The body is ignored.
    pub fn check_service_health(&self) -> bool {
        match self.http.get(self.root_url("/health")).send() {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                logging::warn(
                    Endpoint::Health,
                    None,
                    &format!("health check returned HTTP {}", response.status().as_u16()),
                );
                false
            }
            Err(e) => {
                logging::warn(Endpoint::Health, None, &format!("health check failed: {}", e));
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Status indicator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    /// No probe has completed yet; the indicator stays hidden.
    Unknown,
    Online,
    Offline,
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceStatus::Unknown => write!(f, "Checking"),
            ServiceStatus::Online => write!(f, "API Online"),
            ServiceStatus::Offline => write!(f, "API Offline"),
        }
    }
}

/// Tracks the last probe result and when the next one is due.
#[derive(Debug, Clone)]
pub struct HealthMonitor {
    status: ServiceStatus,
    last_checked: Option<DateTime<Utc>>,
    poll_interval: Duration,
}

impl HealthMonitor {
    /// Intervals too large for a `Duration` are capped at `Duration::MAX`.
    pub fn new(poll_interval_secs: u64) -> Self {
        let poll_interval = i64::try_from(poll_interval_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        Self {
            status: ServiceStatus::Unknown,
            last_checked: None,
            poll_interval,
        }
    }

    pub fn status(&self) -> ServiceStatus {
        self.status
    }

    pub fn last_checked(&self) -> Option<DateTime<Utc>> {
        self.last_checked
    }

    /// Records a probe result taken at `now`. Returns `true` if the
    /// indicator changed.
    pub fn observe_at(&mut self, healthy: bool, now: DateTime<Utc>) -> bool {
        let next = if healthy {
            ServiceStatus::Online
        } else {
            ServiceStatus::Offline
        };
        let changed = next != self.status;
        self.status = next;
        self.last_checked = Some(now);
        changed
    }

    pub fn observe(&mut self, healthy: bool) -> bool {
        self.observe_at(healthy, Utc::now())
    }

    /// A probe is due if none has run yet or the interval has elapsed.
    pub fn is_due_at(&self, now: DateTime<Utc>) -> bool {
        match self.last_checked {
            None => true,
            Some(last) => now - last >= self.poll_interval,
        }
    }

    /// Probes the service and records the result.
    pub fn poll(&mut self, client: &ApiClient) -> ServiceStatus {
        let healthy = client.check_service_health();
        if self.observe(healthy) {
            logging::info(Endpoint::Health, None, &format!("status changed: {}", self.status));
        }
        self.status
    }
}
