//! Subscriber bootstrap
//!
//! [`init`] installs the global tracing subscriber that [`TracingLogger`]
//! writes to. Hosts that install their own subscriber never need it.
//!
//! [`TracingLogger`]: super::TracingLogger

use super::tracing_logger::TRACING_TARGET;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output profile of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, debug and up
    Development,
    /// JSON output, info and up
    Production,
    /// No output; pair with `init_test_capture()` to record events
    Test,
}

impl Profile {
    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_directive(self) -> String {
        match self {
            Profile::Development => format!("{}=debug", TRACING_TARGET),
            Profile::Production => format!("{}=info", TRACING_TARGET),
            Profile::Test => format!("{}=trace", TRACING_TARGET),
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Install the global subscriber for `profile`
///
/// Only the first call does anything. Returns `true` if this call installed
/// the subscriber; `false` on later calls or when the host already set a
/// global default.
///
/// # Example
///
/// ```
/// use logsource_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) -> bool {
    let mut installed_now = false;
    INIT_ONCE.call_once(|| {
        let result = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(profile.filter())
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.filter())
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry()
                .with(profile.filter())
                .try_init(),
        };
        installed_now = result.is_ok();
        INSTALLED.store(installed_now, Ordering::Release);
    });
    installed_now
}

/// Whether [`init`] installed the global subscriber
pub fn is_initialized() -> bool {
    INSTALLED.load(Ordering::Acquire)
}
