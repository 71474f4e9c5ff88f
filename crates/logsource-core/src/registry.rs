//! Name → backend registry
//!
//! A [`BackendRegistry`] hands out one backend per category name. The first
//! resolution of an unknown name builds a default backend and stores it;
//! later resolutions return the same instance until the name is overridden
//! or the registry is cleared.
//!
//! Every read and write of the map happens under one mutex. The lock is
//! never held while calling into a logger factory or a backend: a default
//! backend is built outside the lock and the map is checked again before it
//! is stored, so the first stored backend wins.
//!
//! [`BackendRegistry::global`] is the process-wide instance used by
//! [`LogHandle::new`](crate::handle::LogHandle::new). Tests should build
//! their own registries with [`BackendRegistry::new`].

use crate::backend::{Backend, Listener, LoggerFactory, StructuredLogger, SwitchBackend};
use crate::bridge::BridgeSink;
use crate::config::SourceConfig;
use crate::errors::{require_name, Result};
use crate::logging_facility::TracingLogger;
use logsource_core_types::SourceLevel;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

#[derive(Default)]
struct RegistryState {
    backends: HashMap<String, Arc<dyn Backend>>,
    factory: Option<Arc<dyn LoggerFactory>>,
    config: Option<Arc<SourceConfig>>,
}

/// Thread-safe mapping from category name to backend
#[derive(Default)]
pub struct BackendRegistry {
    state: Mutex<RegistryState>,
}

static GLOBAL_REGISTRY: OnceLock<BackendRegistry> = OnceLock::new();

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose default backends take their switch level
    /// from `config`
    pub fn with_config(config: SourceConfig) -> Self {
        let registry = Self::new();
        registry.set_config(Some(config));
        registry
    }

    /// The process-wide registry
    pub fn global() -> &'static BackendRegistry {
        GLOBAL_REGISTRY.get_or_init(BackendRegistry::new)
    }

    // The map is consistent between statements, so a poisoned lock is
    // still safe to use
    fn state(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the configuration used for default backends
    ///
    /// Backends already resolved keep their level.
    pub fn set_config(&self, config: Option<SourceConfig>) {
        self.state().config = config.map(Arc::new);
    }

    /// Get the backend for `name`, creating the default one if needed
    ///
    /// The default backend wraps a logger from the installed
    /// [`LoggerFactory`] when there is one and it yields a logger. Otherwise
    /// it is a [`SwitchBackend`] at the configured level (off when
    /// unconfigured) that writes through a [`TracingLogger`].
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InvalidArgument` if `name` is empty.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Backend>> {
        require_name("name", name)?;

        let (factory, config) = {
            let state = self.state();
            if let Some(backend) = state.backends.get(name) {
                return Ok(backend.clone());
            }
            (state.factory.clone(), state.config.clone())
        };

        let candidate = create_default(name, factory.as_deref(), config.as_deref());

        let mut state = self.state();
        let backend = state
            .backends
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::debug!(source_name = name, "created default log source");
                candidate
            })
            .clone();
        Ok(backend)
    }

    /// Associate `backend` with `name`
    ///
    /// Returns `true` if an existing association was replaced.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InvalidArgument` if `name` is empty.
    pub fn override_backend(&self, name: &str, backend: Arc<dyn Backend>) -> Result<bool> {
        require_name("name", name)?;

        let replaced = self
            .state()
            .backends
            .insert(name.to_string(), backend)
            .is_some();
        tracing::debug!(source_name = name, replaced, "log source set");
        Ok(replaced)
    }

    /// Associate `backend` with its own name
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InvalidArgument` if the backend's name is empty.
    pub fn register(&self, backend: Arc<dyn Backend>) -> Result<bool> {
        let name = backend.name().to_string();
        self.override_backend(&name, backend)
    }

    /// Associate `name` with a switch backend at `level` writing to `listener`
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InvalidArgument` if `name` is empty.
    pub fn set_source(
        &self,
        name: &str,
        level: SourceLevel,
        listener: Arc<dyn Listener>,
    ) -> Result<bool> {
        require_name("name", name)?;

        let backend = SwitchBackend::with_listener(name, level, listener);
        self.override_backend(name, Arc::new(backend))
    }

    /// Associate `name` with a structured logger
    ///
    /// The switch level is derived from what `logger` has enabled, and
    /// handles resolved afterwards expose the logger.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InvalidArgument` if `name` is empty.
    pub fn set_logger(&self, name: &str, logger: Arc<dyn StructuredLogger>) -> Result<bool> {
        require_name("name", name)?;

        let backend = SwitchBackend::from_logger(name, logger);
        self.override_backend(name, Arc::new(backend))
    }

    /// Install the factory used to build default backends
    ///
    /// Returns `true` if a factory was already installed. An installed
    /// factory is only replaced when `replace` is set.
    pub fn set_logger_factory(&self, factory: Arc<dyn LoggerFactory>, replace: bool) -> bool {
        let mut state = self.state();
        let predefined = state.factory.is_some();
        if !predefined || replace {
            state.factory = Some(factory);
        }
        tracing::debug!(predefined, replace, "logger factory set");
        predefined
    }

    /// Remove the logger factory, returning whether one was installed
    pub fn clear_logger_factory(&self) -> bool {
        self.state().factory.take().is_some()
    }

    /// Forget every association
    ///
    /// Handles created earlier keep the backend they resolved.
    pub fn clear(&self) {
        self.state().backends.clear();
        tracing::debug!("log sources cleared");
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state().backends.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.state().backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().backends.is_empty()
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        let mut names: Vec<&String> = state.backends.keys().collect();
        names.sort();
        f.debug_struct("BackendRegistry")
            .field("names", &names)
            .field("has_factory", &state.factory.is_some())
            .field("has_config", &state.config.is_some())
            .finish()
    }
}

fn create_default(
    name: &str,
    factory: Option<&dyn LoggerFactory>,
    config: Option<&SourceConfig>,
) -> Arc<dyn Backend> {
    if let Some(logger) = factory.and_then(|f| f.create_logger(name)) {
        return Arc::new(SwitchBackend::from_logger(name, logger));
    }

    let level = config.map(|c| c.level_for(name)).unwrap_or_default();
    let sink = BridgeSink::new(name, Arc::new(TracingLogger::new(name)));
    Arc::new(SwitchBackend::with_listener(name, level, Arc::new(sink)))
}
