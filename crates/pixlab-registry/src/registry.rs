//! Name to constructor lookup for transforms

use crate::builtin::{
    Binary, BoxFilter, BrightnessRangeCut, GaussianFilter, Logarithmic, MedianFilter, Negative,
    Power, SigmaFilter, UnsharpMask,
};
use crate::{RegistryError, RegistryResult, Transform};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Factory closure producing a fresh transform instance.
pub type TransformFactory = Arc<dyn Fn() -> Box<dyn Transform> + Send + Sync>;

/// Name to factory table; the only construction path for transforms.
///
/// The registry has an explicit lifecycle: the caller constructs one
/// (usually via [`TransformRegistry::with_defaults`]) and passes it by
/// reference, so tests can build isolated registries. Registering an
/// existing name overwrites its factory.
///
/// # Examples
///
/// ```
/// use pixlab_core::{ChannelLayout, PixelBuffer};
/// use pixlab_registry::{TransformParameters, TransformRegistry};
///
/// let registry = TransformRegistry::with_defaults();
/// let mut transform = registry.create("Negative").unwrap();
///
/// let buffer = PixelBuffer::filled(2, 2, ChannelLayout::Gray, 55).unwrap();
/// let out = transform.apply(&buffer, &TransformParameters::new()).unwrap();
/// assert!(out.data().iter().all(|&v| v == 200));
/// ```
#[derive(Default, Clone)]
pub struct TransformRegistry {
    factories: IndexMap<String, TransformFactory>,
}

impl TransformRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in catalog.
    ///
    /// Every registered name matches the `name()` of the instance its
    /// factory produces.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("Logarithmic", || Box::new(Logarithmic::default()));
        registry.register("Power", || Box::new(Power::default()));
        registry.register("Negative", || Box::new(Negative::default()));
        registry.register("Binary", || Box::new(Binary::default()));
        registry.register("Brightness range cut", || {
            Box::new(BrightnessRangeCut::default())
        });
        registry.register("Box filter 3x3", || Box::new(BoxFilter::new(3)));
        registry.register("Box filter 5x5", || Box::new(BoxFilter::new(5)));
        registry.register("Median filter 3x3", || Box::new(MedianFilter::new(3)));
        registry.register("Median filter 5x5", || Box::new(MedianFilter::new(5)));
        registry.register("Gaussian filter", || Box::new(GaussianFilter::default()));
        registry.register("Sigma filter", || Box::new(SigmaFilter::default()));
        registry.register("Unsharp mask", || Box::new(UnsharpMask::default()));
        registry
    }

    /// Register a factory under `name`, overwriting any previous binding.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Transform> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Instantiate the transform registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for unregistered names; never
    /// a default transform.
    pub fn create(&self, name: &str) -> RegistryResult<Box<dyn Transform>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        Ok(factory())
    }

    /// List the registered names in registration order.
    pub fn list(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Remove the binding for `name`.
    ///
    /// # Returns
    ///
    /// `true` if a binding was removed, `false` if the name was absent.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.factories.shift_remove(name).is_some()
    }

    /// Check whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Get the number of registered transforms.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&String, &TransformFactory)> {
        self.factories.iter()
    }
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformRegistry")
            .field("names", &self.list())
            .finish()
    }
}
