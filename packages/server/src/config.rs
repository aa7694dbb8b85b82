//! Connection and hub settings.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PONG_WAIT: Duration = Duration::from_secs(60);
pub const DEFAULT_WRITE_WAIT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAILBOX_CAPACITY: usize = 256;
pub const DEFAULT_HUB_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("pong wait {0:?} leaves no room for a ping period")]
    PongWaitTooShort(Duration),
}

/// Per-connection timing and queue limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Longest silence tolerated from the peer before the connection is dropped
    pub pong_wait: Duration,
    /// Upper bound for a single frame write
    pub write_wait: Duration,
    /// Outbound messages a connection may have queued before it is evicted
    pub mailbox_capacity: usize,
}

impl ConnectionConfig {
    pub fn new(
        pong_wait: Duration,
        write_wait: Duration,
        mailbox_capacity: usize,
    ) -> Result<Self, ConfigError> {
        if pong_wait.is_zero() {
            return Err(ConfigError::Zero("pong wait"));
        }
        if ping_period(pong_wait).is_zero() {
            return Err(ConfigError::PongWaitTooShort(pong_wait));
        }
        if write_wait.is_zero() {
            return Err(ConfigError::Zero("write wait"));
        }
        if mailbox_capacity == 0 {
            return Err(ConfigError::Zero("mailbox capacity"));
        }
        Ok(Self {
            pong_wait,
            write_wait,
            mailbox_capacity,
        })
    }

    /// Ping cadence, 9/10 of the peer's read deadline
    pub fn ping_period(&self) -> Duration {
        ping_period(self.pong_wait)
    }
}

fn ping_period(pong_wait: Duration) -> Duration {
    pong_wait * 9 / 10
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            pong_wait: DEFAULT_PONG_WAIT,
            write_wait: DEFAULT_WRITE_WAIT,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }
}

/// Validate the hub intake queue size
pub fn hub_capacity(capacity: usize) -> Result<usize, ConfigError> {
    if capacity == 0 {
        return Err(ConfigError::Zero("hub capacity"));
    }
    Ok(capacity)
}
