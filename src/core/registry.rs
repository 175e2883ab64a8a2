//! Transport registry
//!
//! Maps a transport kind name to the factory that builds it from descriptor
//! options. The registry is closed: only kinds registered on it resolve.

use super::config::TransportDescriptor;
use super::error::{LoggerError, Result};
use super::metadata::Meta;
use super::transport::Transport;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub type TransportFactory = Arc<dyn Fn(&Meta) -> Result<Box<dyn Transport>> + Send + Sync>;

#[derive(Clone)]
pub struct TransportRegistry {
    factories: BTreeMap<String, TransportFactory>,
}

impl TransportRegistry {
    /// A registry that knows no kinds at all
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// A registry with `Console` and `File`, depending on enabled features
    pub fn with_builtins() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::empty();

        #[cfg(feature = "console")]
        registry.register("Console", |options: &Meta| {
            let transport = crate::transports::ConsoleTransport::from_options(options)?;
            Ok(Box::new(transport) as Box<dyn Transport>)
        });

        #[cfg(feature = "file")]
        registry.register("File", |options: &Meta| {
            let transport = crate::transports::FileTransport::from_options(options)?;
            Ok(Box::new(transport) as Box<dyn Transport>)
        });

        registry
    }

    /// Add or replace the factory for `kind`
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&Meta) -> Result<Box<dyn Transport>> + Send + Sync + 'static,
    {
        self.factories.insert(kind.into(), Arc::new(factory));
        self
    }

    #[must_use]
    pub fn with<F>(mut self, kind: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Meta) -> Result<Box<dyn Transport>> + Send + Sync + 'static,
    {
        self.register(kind, factory);
        self
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn kinds(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn resolve(&self, descriptor: &TransportDescriptor) -> Result<Box<dyn Transport>> {
        let factory = self
            .factories
            .get(&descriptor.kind)
            .ok_or_else(|| LoggerError::unknown_transport(&descriptor.kind))?;
        factory(&descriptor.options)
    }

    /// Resolve descriptors in order; the first failure aborts.
    pub fn resolve_all(&self, descriptors: &[TransportDescriptor]) -> Result<Vec<Box<dyn Transport>>> {
        descriptors.iter().map(|d| self.resolve(d)).collect()
    }
}

impl Default for TransportRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for TransportRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
