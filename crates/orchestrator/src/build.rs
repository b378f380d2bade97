//! Starting a packaging build for a site and waiting on it.

use std::fmt;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{OrchestratorError, Result};

/// Last reported state of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    InProgress,
    Succeeded,
    /// Any terminal state other than success, with the service's status text.
    Failed(String),
}

impl BuildStatus {
    /// Map a build service status string (`IN_PROGRESS`, `SUCCEEDED`, ...).
    pub fn from_status_str(status: &str) -> Self {
        match status {
            "IN_PROGRESS" => BuildStatus::InProgress,
            "SUCCEEDED" => BuildStatus::Succeeded,
            other => BuildStatus::Failed(other.to_string()),
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStatus::InProgress => f.write_str("IN_PROGRESS"),
            BuildStatus::Succeeded => f.write_str("SUCCEEDED"),
            BuildStatus::Failed(status) => f.write_str(status),
        }
    }
}

/// Remote build service.
pub trait BuildTrigger: Send + Sync {
    /// Start `project` for `site_id`, returning the build id.
    fn start_build(&self, project: &str, site_id: &str) -> Result<String>;

    /// Current status of a started build.
    fn build_status(&self, build_id: &str) -> Result<BuildStatus>;
}

/// Fixed-interval polling schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 720,
        }
    }
}

impl PollConfig {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }
}

/// Start a build and poll it until it leaves `InProgress`.
pub fn await_build<T: BuildTrigger + ?Sized>(
    trigger: &T,
    project: &str,
    site_id: &str,
    poll: PollConfig,
) -> Result<String> {
    let build_id = trigger.start_build(project, site_id)?;
    info!(project, site_id, %build_id, "build started");

    for attempt in 1..=poll.max_attempts {
        let status = trigger.build_status(&build_id)?;
        debug!(%build_id, attempt, %status, "build status");

        match status {
            BuildStatus::Succeeded => return Ok(format!("{} for {} succeeded.", project, site_id)),
            BuildStatus::Failed(status) => {
                return Err(OrchestratorError::BuildFailed { build_id, status });
            }
            BuildStatus::InProgress if attempt < poll.max_attempts => thread::sleep(poll.interval),
            BuildStatus::InProgress => {}
        }
    }

    Err(OrchestratorError::PollLimitExceeded {
        build_id,
        attempts: poll.max_attempts,
    })
}
