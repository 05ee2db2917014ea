//! Long-lived transform instances with an application audit trail

use crate::{
    RegistryError, RegistryResult, Transform, TransformDescriptor, TransformParameters,
    TransformRegistry,
};
use indexmap::IndexMap;
use pixlab_core::PixelBuffer;
use std::fmt;

/// Owns one long-lived instance per registered transform.
///
/// The manager instantiates every registry entry up front, validates
/// parameters before each application, and records the descriptor of the
/// last successful application. Instances persist across calls, so their
/// descriptors accumulate the most recent resolved parameters.
pub struct TransformManager {
    registry: TransformRegistry,
    instances: IndexMap<String, Box<dyn Transform>>,
    last_applied: Option<TransformDescriptor>,
}

impl TransformManager {
    /// Build a manager over `registry`, instantiating every entry.
    pub fn new(registry: TransformRegistry) -> Self {
        let mut instances = IndexMap::new();
        for (name, factory) in registry.entries() {
            instances.insert(name.clone(), factory());
        }
        Self {
            registry,
            instances,
            last_applied: None,
        }
    }

    /// Build a manager over the built-in catalog.
    pub fn with_defaults() -> Self {
        Self::new(TransformRegistry::with_defaults())
    }

    /// Get the underlying registry.
    pub fn registry(&self) -> &TransformRegistry {
        &self.registry
    }

    /// List the available transform names.
    pub fn available(&self) -> Vec<&str> {
        self.instances.keys().map(String::as_str).collect()
    }

    /// Validate and apply the named transform.
    ///
    /// On success the transform's descriptor (name plus resolved
    /// parameters) is recorded as the last application.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for unknown names, or the
    /// transform's own validation/application error. A failed call leaves
    /// the audit record untouched.
    pub fn apply(
        &mut self,
        name: &str,
        buffer: &PixelBuffer,
        params: &TransformParameters,
    ) -> RegistryResult<PixelBuffer> {
        let transform = self
            .instances
            .get_mut(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        transform.validate(params)?;
        let out = transform.apply(buffer, params)?;
        self.last_applied = Some(transform.descriptor());
        Ok(out)
    }

    /// Derive the named transform's full parameter set for `buffer`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for unknown names.
    pub fn auto_parameters(
        &self,
        name: &str,
        buffer: &PixelBuffer,
    ) -> RegistryResult<TransformParameters> {
        let transform = self
            .instances
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        Ok(transform.auto_parameters(buffer))
    }

    /// Get the named transform's descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for unknown names.
    pub fn descriptor(&self, name: &str) -> RegistryResult<TransformDescriptor> {
        let transform = self
            .instances
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        Ok(transform.descriptor())
    }

    /// Get the descriptor of the last successful application, if any.
    pub fn last_applied(&self) -> Option<&TransformDescriptor> {
        self.last_applied.as_ref()
    }

    /// Register a new transform and instantiate it immediately.
    ///
    /// Extends both the registry and the instance table; an existing name
    /// is overwritten in both.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Transform> + Send + Sync + 'static,
    {
        let name = name.into();
        let instance = factory();
        self.registry.register(name.clone(), factory);
        self.instances.insert(name, instance);
    }
}

impl fmt::Debug for TransformManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformManager")
            .field("available", &self.available())
            .field("last_applied", &self.last_applied)
            .finish()
    }
}
