//! Transform contract: parameters, descriptor, and the `Transform` trait
//!
//! Every transform is a strategy object behind the [`Transform`] trait.
//! Parameters travel as a named [`TransformParameters`] map so callers can
//! drive any transform through one interface; values a caller omits are
//! filled in from buffer statistics by the transform itself.

use crate::RegistryResult;
use indexmap::IndexMap;
use pixlab_core::{Error, PixelBuffer, Result};
use std::fmt;

/// A single parameter value.
///
/// Numeric parameters are `Float` or `Int`; enumerated parameters (such as
/// an outside mode) are `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Float(f64),
    Int(i64),
    Text(String),
}

impl ParamValue {
    /// Read the value as a float. `Int` values widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Text(_) => None,
        }
    }

    /// Read the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Read the value as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Text(v) => write!(f, "{v}"),
        }
    }
}

/// Named parameter set for one transform application.
///
/// Insertion order is preserved, so a rendered parameter list is stable.
///
/// # Examples
///
/// ```
/// use pixlab_registry::TransformParameters;
///
/// let params = TransformParameters::new()
///     .with_float("gamma", 2.2)
///     .with_int("kernel_size", 5);
/// assert_eq!(params.get_float("gamma").unwrap(), Some(2.2));
/// assert_eq!(params.get_int("kernel_size").unwrap(), Some(5));
/// assert_eq!(params.get_float("missing").unwrap(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformParameters {
    values: IndexMap<String, ParamValue>,
}

impl TransformParameters {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set_float`](Self::set_float).
    pub fn with_float(mut self, name: &str, value: f64) -> Self {
        self.set_float(name, value);
        self
    }

    /// Builder form of [`set_int`](Self::set_int).
    pub fn with_int(mut self, name: &str, value: i64) -> Self {
        self.set_int(name, value);
        self
    }

    /// Builder form of [`set_text`](Self::set_text).
    pub fn with_text(mut self, name: &str, value: &str) -> Self {
        self.set_text(name, value);
        self
    }

    /// Set a float parameter, replacing any previous value.
    pub fn set_float(&mut self, name: &str, value: f64) {
        self.values
            .insert(name.to_string(), ParamValue::Float(value));
    }

    /// Set an integer parameter, replacing any previous value.
    pub fn set_int(&mut self, name: &str, value: i64) {
        self.values.insert(name.to_string(), ParamValue::Int(value));
    }

    /// Set a text parameter, replacing any previous value.
    pub fn set_text(&mut self, name: &str, value: &str) {
        self.values
            .insert(name.to_string(), ParamValue::Text(value.to_string()));
    }

    /// Get a raw parameter value.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Get a float parameter. Integer values widen to float.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongParameterType`] if the parameter is present
    /// but holds text.
    pub fn get_float(&self, name: &str) -> Result<Option<f64>> {
        match self.values.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_float()
                .map(Some)
                .ok_or_else(|| Error::WrongParameterType {
                    name: name.to_string(),
                    expected: "float",
                }),
        }
    }

    /// Get an integer parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongParameterType`] if the parameter is present
    /// but not an integer.
    pub fn get_int(&self, name: &str) -> Result<Option<i64>> {
        match self.values.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_int()
                .map(Some)
                .ok_or_else(|| Error::WrongParameterType {
                    name: name.to_string(),
                    expected: "integer",
                }),
        }
    }

    /// Get a text parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongParameterType`] if the parameter is present
    /// but numeric.
    pub fn get_text(&self, name: &str) -> Result<Option<&str>> {
        match self.values.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_text()
                .map(Some)
                .ok_or_else(|| Error::WrongParameterType {
                    name: name.to_string(),
                    expected: "text",
                }),
        }
    }

    /// Check whether a parameter is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Get the number of parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy every entry from `defaults` whose name is absent here.
    ///
    /// Present entries keep their value; only the gaps fill in.
    pub fn merge_missing(&mut self, defaults: &TransformParameters) {
        for (name, value) in &defaults.values {
            if !self.values.contains_key(name) {
                self.values.insert(name.clone(), value.clone());
            }
        }
    }
}

impl fmt::Display for TransformParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in &self.values {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
            first = false;
        }
        Ok(())
    }
}

/// Identity metadata a transform exposes for audit and display.
///
/// `last_parameters` holds the fully resolved set from the most recent
/// `apply` call (caller-supplied values plus auto-derived fills), or
/// `None` before the first application.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformDescriptor {
    /// Stable display name
    pub name: String,
    /// Resolved parameters of the last application
    pub last_parameters: Option<TransformParameters>,
}

/// Common contract of every transform.
///
/// A transform is a stateless mapping from an input buffer and a parameter
/// set to a fresh output buffer, plus bookkeeping: it validates parameter
/// domains, derives absent parameters from buffer statistics, and records
/// the resolved set of its last application for the descriptor.
pub trait Transform {
    /// Stable display name of the transform.
    fn name(&self) -> &str;

    /// Check every supplied parameter against its declared domain.
    ///
    /// Absent parameters are valid; they resolve through
    /// [`auto_parameters`](Self::auto_parameters) at apply time.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first violated domain.
    fn validate(&self, params: &TransformParameters) -> RegistryResult<()>;

    /// Derive the full parameter set this transform would use for `buffer`
    /// if the caller supplied nothing.
    fn auto_parameters(&self, buffer: &PixelBuffer) -> TransformParameters;

    /// Apply the transform, resolving absent parameters from `buffer`.
    ///
    /// The output has the same shape as the input. The resolved parameter
    /// set is recorded for [`descriptor`](Self::descriptor).
    ///
    /// # Errors
    ///
    /// Returns an error for parameter-domain violations or failures in
    /// the underlying operation.
    fn apply(
        &mut self,
        buffer: &PixelBuffer,
        params: &TransformParameters,
    ) -> RegistryResult<PixelBuffer>;

    /// Get the descriptor: name plus the last resolved parameter set.
    fn descriptor(&self) -> TransformDescriptor;
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== ParamValue tests ==========

    #[test]
    fn test_int_widens_to_float() {
        assert_eq!(ParamValue::Int(5).as_float(), Some(5.0));
        assert_eq!(ParamValue::Float(2.5).as_float(), Some(2.5));
        assert_eq!(ParamValue::Text("x".to_string()).as_float(), None);
    }

    #[test]
    fn test_int_does_not_narrow_from_float() {
        assert_eq!(ParamValue::Float(5.0).as_int(), None);
        assert_eq!(ParamValue::Int(5).as_int(), Some(5));
    }

    #[test]
    fn test_display() {
        assert_eq!(ParamValue::Float(1.5).to_string(), "1.5");
        assert_eq!(ParamValue::Int(3).to_string(), "3");
        assert_eq!(ParamValue::Text("original".to_string()).to_string(), "original");
    }

    // ========== TransformParameters tests ==========

    #[test]
    fn test_builder_round_trip() {
        let params = TransformParameters::new()
            .with_float("c", 0.5)
            .with_int("kernel_size", 3)
            .with_text("outside_mode", "constant");
        assert_eq!(params.len(), 3);
        assert_eq!(params.get_float("c").unwrap(), Some(0.5));
        assert_eq!(params.get_int("kernel_size").unwrap(), Some(3));
        assert_eq!(params.get_text("outside_mode").unwrap(), Some("constant"));
    }

    #[test]
    fn test_missing_parameter_is_none_not_error() {
        let params = TransformParameters::new();
        assert_eq!(params.get_float("gamma").unwrap(), None);
        assert_eq!(params.get_text("mode").unwrap(), None);
        assert!(params.is_empty());
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let params = TransformParameters::new().with_text("gamma", "two");
        let err = params.get_float("gamma").unwrap_err();
        assert!(matches!(err, Error::WrongParameterType { .. }));
        assert!(params.get_int("gamma").is_err());

        let params = TransformParameters::new().with_float("mode", 1.0);
        assert!(params.get_text("mode").is_err());
    }

    #[test]
    fn test_get_float_accepts_int() {
        let params = TransformParameters::new().with_int("sigma", 2);
        assert_eq!(params.get_float("sigma").unwrap(), Some(2.0));
    }

    #[test]
    fn test_set_replaces_value() {
        let mut params = TransformParameters::new().with_float("c", 1.0);
        params.set_float("c", 2.0);
        assert_eq!(params.get_float("c").unwrap(), Some(2.0));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_merge_missing_fills_only_gaps() {
        let mut params = TransformParameters::new().with_float("gamma", 2.0);
        let defaults = TransformParameters::new()
            .with_float("gamma", 1.0)
            .with_float("c", 0.7);
        params.merge_missing(&defaults);
        assert_eq!(params.get_float("gamma").unwrap(), Some(2.0));
        assert_eq!(params.get_float("c").unwrap(), Some(0.7));
    }

    #[test]
    fn test_display_preserves_insertion_order() {
        let params = TransformParameters::new()
            .with_int("kernel_size", 3)
            .with_float("lambda_coeff", 1.5);
        assert_eq!(params.to_string(), "kernel_size=3, lambda_coeff=1.5");
    }
}
