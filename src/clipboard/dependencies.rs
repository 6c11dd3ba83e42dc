use std::{sync::Arc, time::Duration};

use super::{
    host::HostEnv,
    locator::ExecutableLocator,
    runner::{CommandRunner, ProcessRunner},
    types::DEFAULT_TIMEOUT_MS,
};

/// Bundle of state shared by every provider. Each component can be replaced in tests.
#[derive(Clone)]
pub struct ClipboardDependencies {
    pub runner: Arc<dyn CommandRunner>,
    pub locator: Arc<ExecutableLocator>,
    pub host: HostEnv,
    /// Applied to every external invocation.
    pub timeout: Duration,
}

impl ClipboardDependencies {
    /// Dependencies for a given host, with a locator over that host's search path.
    pub fn for_host(host: HostEnv, runner: Arc<dyn CommandRunner>, timeout: Duration) -> Self {
        let locator = ExecutableLocator::new(host.platform, host.search_path.as_deref());
        Self {
            runner,
            locator: Arc::new(locator),
            host,
            timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClipboardDependencies {
    fn default() -> Self {
        Self::for_host(
            HostEnv::detect(),
            Arc::new(ProcessRunner),
            Duration::from_millis(DEFAULT_TIMEOUT_MS),
        )
    }
}
