//! Built-in transforms
//!
//! Strategy objects wrapping the point and spatial operations so they can
//! be driven through the [`Transform`] contract. Each wrapper owns its
//! defaults, validates the declared parameter domains, and resolves absent
//! parameters from buffer statistics.

use crate::{RegistryError, RegistryResult, Transform, TransformDescriptor, TransformParameters};
use pixlab_core::{Error, PixelBuffer};
use pixlab_filter::{box_filter, gaussian_filter, median_filter, sigma_filter, unsharp_mask};
use pixlab_point::{
    OutsideMode, binarize, brightness_range_cut, log_transform, negative, power_transform,
};

fn invalid(message: impl Into<String>) -> RegistryError {
    RegistryError::Core(Error::InvalidParameter(message.into()))
}

// ========== Logarithmic ==========

/// Logarithmic tone mapping. Parameter: `c` (float, > 0); absent `c`
/// derives so the brightest sample maps to full range.
#[derive(Debug, Default)]
pub struct Logarithmic {
    last_parameters: Option<TransformParameters>,
}

fn log_auto_c(buffer: &PixelBuffer) -> f64 {
    let max = buffer.max_sample() as f64 / 255.0;
    if max > 0.0 { 1.0 / (1.0 + max).ln() } else { 1.0 }
}

impl Transform for Logarithmic {
    fn name(&self) -> &str {
        "Logarithmic"
    }

    fn validate(&self, params: &TransformParameters) -> RegistryResult<()> {
        if let Some(c) = params.get_float("c")?
            && (!c.is_finite() || c <= 0.0)
        {
            return Err(invalid("coefficient c must be positive"));
        }
        Ok(())
    }

    fn auto_parameters(&self, buffer: &PixelBuffer) -> TransformParameters {
        TransformParameters::new().with_float("c", log_auto_c(buffer))
    }

    fn apply(
        &mut self,
        buffer: &PixelBuffer,
        params: &TransformParameters,
    ) -> RegistryResult<PixelBuffer> {
        self.validate(params)?;
        let c = match params.get_float("c")? {
            Some(c) => c,
            None => log_auto_c(buffer),
        };
        let out = log_transform(buffer, Some(c))?;
        self.last_parameters = Some(TransformParameters::new().with_float("c", c));
        Ok(out)
    }

    fn descriptor(&self) -> TransformDescriptor {
        TransformDescriptor {
            name: self.name().to_string(),
            last_parameters: self.last_parameters.clone(),
        }
    }
}

// ========== Power ==========

/// Power (gamma) tone mapping. Parameters: `gamma` (float, > 0, default
/// 1.0) and `c` (float, > 0); absent `c` derives from the buffer maximum
/// for the resolved gamma.
#[derive(Debug, Default)]
pub struct Power {
    last_parameters: Option<TransformParameters>,
}

fn power_auto_c(buffer: &PixelBuffer, gamma: f64) -> f64 {
    let max = buffer.max_sample() as f64 / 255.0;
    if max > 0.0 { 1.0 / max.powf(gamma) } else { 1.0 }
}

impl Transform for Power {
    fn name(&self) -> &str {
        "Power"
    }

    fn validate(&self, params: &TransformParameters) -> RegistryResult<()> {
        if let Some(gamma) = params.get_float("gamma")?
            && (!gamma.is_finite() || gamma <= 0.0)
        {
            return Err(invalid("gamma must be positive"));
        }
        if let Some(c) = params.get_float("c")?
            && (!c.is_finite() || c <= 0.0)
        {
            return Err(invalid("coefficient c must be positive"));
        }
        Ok(())
    }

    fn auto_parameters(&self, buffer: &PixelBuffer) -> TransformParameters {
        TransformParameters::new()
            .with_float("gamma", 1.0)
            .with_float("c", power_auto_c(buffer, 1.0))
    }

    fn apply(
        &mut self,
        buffer: &PixelBuffer,
        params: &TransformParameters,
    ) -> RegistryResult<PixelBuffer> {
        self.validate(params)?;
        let gamma = params.get_float("gamma")?.unwrap_or(1.0);
        let c = match params.get_float("c")? {
            Some(c) => c,
            None => power_auto_c(buffer, gamma),
        };
        let out = power_transform(buffer, gamma, Some(c))?;
        self.last_parameters = Some(
            TransformParameters::new()
                .with_float("gamma", gamma)
                .with_float("c", c),
        );
        Ok(out)
    }

    fn descriptor(&self) -> TransformDescriptor {
        TransformDescriptor {
            name: self.name().to_string(),
            last_parameters: self.last_parameters.clone(),
        }
    }
}

// ========== Negative ==========

/// Sample inversion, `s = 255 - r`. No parameters.
#[derive(Debug, Default)]
pub struct Negative {
    last_parameters: Option<TransformParameters>,
}

impl Transform for Negative {
    fn name(&self) -> &str {
        "Negative"
    }

    fn validate(&self, _params: &TransformParameters) -> RegistryResult<()> {
        Ok(())
    }

    fn auto_parameters(&self, _buffer: &PixelBuffer) -> TransformParameters {
        TransformParameters::new()
    }

    fn apply(
        &mut self,
        buffer: &PixelBuffer,
        _params: &TransformParameters,
    ) -> RegistryResult<PixelBuffer> {
        let out = negative(buffer);
        self.last_parameters = Some(TransformParameters::new());
        Ok(out)
    }

    fn descriptor(&self) -> TransformDescriptor {
        TransformDescriptor {
            name: self.name().to_string(),
            last_parameters: self.last_parameters.clone(),
        }
    }
}

// ========== Binary ==========

/// Binary threshold over luma. Parameter: `threshold` (float, 0-255);
/// absent threshold uses the luma mean.
#[derive(Debug, Default)]
pub struct Binary {
    last_parameters: Option<TransformParameters>,
}

impl Transform for Binary {
    fn name(&self) -> &str {
        "Binary"
    }

    fn validate(&self, params: &TransformParameters) -> RegistryResult<()> {
        if let Some(threshold) = params.get_float("threshold")?
            && !(0.0..=255.0).contains(&threshold)
        {
            return Err(invalid("threshold must be between 0 and 255"));
        }
        Ok(())
    }

    fn auto_parameters(&self, buffer: &PixelBuffer) -> TransformParameters {
        TransformParameters::new().with_float("threshold", buffer.to_luma().mean())
    }

    fn apply(
        &mut self,
        buffer: &PixelBuffer,
        params: &TransformParameters,
    ) -> RegistryResult<PixelBuffer> {
        self.validate(params)?;
        let threshold = match params.get_float("threshold")? {
            Some(threshold) => threshold,
            None => buffer.to_luma().mean(),
        };
        let out = binarize(buffer, Some(threshold))?;
        self.last_parameters = Some(TransformParameters::new().with_float("threshold", threshold));
        Ok(out)
    }

    fn descriptor(&self) -> TransformDescriptor {
        TransformDescriptor {
            name: self.name().to_string(),
            last_parameters: self.last_parameters.clone(),
        }
    }
}

// ========== Brightness range cut ==========

/// Luma band keep/suppress. Parameters: `min_brightness` and
/// `max_brightness` (floats, 0-255, min < max; absent bounds use the
/// 25th/75th luma percentiles), `outside_mode` (`"original"` or
/// `"constant"`, default original), `constant_value` (float, 0-255,
/// required by constant mode).
#[derive(Debug, Default)]
pub struct BrightnessRangeCut {
    last_parameters: Option<TransformParameters>,
}

impl Transform for BrightnessRangeCut {
    fn name(&self) -> &str {
        "Brightness range cut"
    }

    fn validate(&self, params: &TransformParameters) -> RegistryResult<()> {
        let min = params.get_float("min_brightness")?;
        let max = params.get_float("max_brightness")?;
        if let Some(min) = min
            && !(0.0..=255.0).contains(&min)
        {
            return Err(invalid("min_brightness must be between 0 and 255"));
        }
        if let Some(max) = max
            && !(0.0..=255.0).contains(&max)
        {
            return Err(invalid("max_brightness must be between 0 and 255"));
        }
        if let (Some(min), Some(max)) = (min, max)
            && min >= max
        {
            return Err(invalid("min_brightness must be less than max_brightness"));
        }
        if let Some(mode) = params.get_text("outside_mode")? {
            if mode != "original" && mode != "constant" {
                return Err(invalid(format!("unknown outside_mode '{mode}'")));
            }
            if mode == "constant"
                && let Some(value) = params.get_float("constant_value")?
                && !(0.0..=255.0).contains(&value)
            {
                return Err(invalid("constant_value must be between 0 and 255"));
            }
        }
        Ok(())
    }

    fn auto_parameters(&self, buffer: &PixelBuffer) -> TransformParameters {
        let luma = buffer.to_luma();
        TransformParameters::new()
            .with_float("min_brightness", luma.percentile(25.0) as f64)
            .with_float("max_brightness", luma.percentile(75.0) as f64)
            .with_text("outside_mode", "original")
    }

    fn apply(
        &mut self,
        buffer: &PixelBuffer,
        params: &TransformParameters,
    ) -> RegistryResult<PixelBuffer> {
        self.validate(params)?;

        let min = params.get_float("min_brightness")?;
        let max = params.get_float("max_brightness")?;
        let (min_brightness, max_brightness) = match (min, max) {
            (Some(min), Some(max)) => (min, max),
            (min, max) => {
                let luma = buffer.to_luma();
                (
                    min.unwrap_or_else(|| luma.percentile(25.0) as f64),
                    max.unwrap_or_else(|| luma.percentile(75.0) as f64),
                )
            }
        };

        let mode_text = params.get_text("outside_mode")?.unwrap_or("original");
        let outside = match mode_text {
            "original" => OutsideMode::Original,
            "constant" => {
                let value = params.get_float("constant_value")?.ok_or_else(|| {
                    invalid("constant_value is required when outside_mode is constant")
                })?;
                if !(0.0..=255.0).contains(&value) {
                    return Err(invalid("constant_value must be between 0 and 255"));
                }
                OutsideMode::Constant(value as u8)
            }
            other => return Err(invalid(format!("unknown outside_mode '{other}'"))),
        };

        let out = brightness_range_cut(buffer, min_brightness, max_brightness, outside)?;

        let mut recorded = TransformParameters::new()
            .with_float("min_brightness", min_brightness)
            .with_float("max_brightness", max_brightness)
            .with_text("outside_mode", mode_text);
        if let OutsideMode::Constant(value) = outside {
            recorded.set_float("constant_value", value as f64);
        }
        self.last_parameters = Some(recorded);
        Ok(out)
    }

    fn descriptor(&self) -> TransformDescriptor {
        TransformDescriptor {
            name: self.name().to_string(),
            last_parameters: self.last_parameters.clone(),
        }
    }
}

// ========== Box filter ==========

/// Uniform k x k smoothing. Parameter: `kernel_size` (int, 3 or 5,
/// defaulting to the instance's construction size).
#[derive(Debug)]
pub struct BoxFilter {
    name: String,
    kernel_size: u32,
    last_parameters: Option<TransformParameters>,
}

impl BoxFilter {
    pub fn new(kernel_size: u32) -> Self {
        Self {
            name: format!("Box filter {kernel_size}x{kernel_size}"),
            kernel_size,
            last_parameters: None,
        }
    }
}

fn validate_kernel_choice(params: &TransformParameters) -> RegistryResult<()> {
    if let Some(k) = params.get_int("kernel_size")?
        && k != 3
        && k != 5
    {
        return Err(invalid(format!("kernel size must be 3 or 5, got {k}")));
    }
    Ok(())
}

impl Transform for BoxFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, params: &TransformParameters) -> RegistryResult<()> {
        validate_kernel_choice(params)
    }

    fn auto_parameters(&self, _buffer: &PixelBuffer) -> TransformParameters {
        TransformParameters::new().with_int("kernel_size", self.kernel_size as i64)
    }

    fn apply(
        &mut self,
        buffer: &PixelBuffer,
        params: &TransformParameters,
    ) -> RegistryResult<PixelBuffer> {
        self.validate(params)?;
        let kernel_size = match params.get_int("kernel_size")? {
            Some(k) => k as u32,
            None => self.kernel_size,
        };
        let out = box_filter(buffer, kernel_size)?;
        self.last_parameters =
            Some(TransformParameters::new().with_int("kernel_size", kernel_size as i64));
        Ok(out)
    }

    fn descriptor(&self) -> TransformDescriptor {
        TransformDescriptor {
            name: self.name().to_string(),
            last_parameters: self.last_parameters.clone(),
        }
    }
}

// ========== Median filter ==========

/// Window-median smoothing. Parameter: `kernel_size` (int, 3 or 5,
/// defaulting to the instance's construction size).
#[derive(Debug)]
pub struct MedianFilter {
    name: String,
    kernel_size: u32,
    last_parameters: Option<TransformParameters>,
}

impl MedianFilter {
    pub fn new(kernel_size: u32) -> Self {
        Self {
            name: format!("Median filter {kernel_size}x{kernel_size}"),
            kernel_size,
            last_parameters: None,
        }
    }
}

impl Transform for MedianFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, params: &TransformParameters) -> RegistryResult<()> {
        validate_kernel_choice(params)
    }

    fn auto_parameters(&self, _buffer: &PixelBuffer) -> TransformParameters {
        TransformParameters::new().with_int("kernel_size", self.kernel_size as i64)
    }

    fn apply(
        &mut self,
        buffer: &PixelBuffer,
        params: &TransformParameters,
    ) -> RegistryResult<PixelBuffer> {
        self.validate(params)?;
        let kernel_size = match params.get_int("kernel_size")? {
            Some(k) => k as u32,
            None => self.kernel_size,
        };
        let out = median_filter(buffer, kernel_size)?;
        self.last_parameters =
            Some(TransformParameters::new().with_int("kernel_size", kernel_size as i64));
        Ok(out)
    }

    fn descriptor(&self) -> TransformDescriptor {
        TransformDescriptor {
            name: self.name().to_string(),
            last_parameters: self.last_parameters.clone(),
        }
    }
}

// ========== Gaussian filter ==========

/// Gaussian smoothing with a 3-sigma kernel. Parameter: `sigma` (float,
/// > 0, default 1.0); the kernel size derives from sigma.
#[derive(Debug)]
pub struct GaussianFilter {
    sigma: f64,
    last_parameters: Option<TransformParameters>,
}

impl GaussianFilter {
    pub fn new(sigma: f64) -> Self {
        Self {
            sigma,
            last_parameters: None,
        }
    }
}

impl Default for GaussianFilter {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn validate_sigma(params: &TransformParameters) -> RegistryResult<()> {
    if let Some(sigma) = params.get_float("sigma")?
        && (!sigma.is_finite() || sigma <= 0.0)
    {
        return Err(invalid("sigma must be positive"));
    }
    Ok(())
}

impl Transform for GaussianFilter {
    fn name(&self) -> &str {
        "Gaussian filter"
    }

    fn validate(&self, params: &TransformParameters) -> RegistryResult<()> {
        validate_sigma(params)
    }

    fn auto_parameters(&self, _buffer: &PixelBuffer) -> TransformParameters {
        TransformParameters::new().with_float("sigma", self.sigma)
    }

    fn apply(
        &mut self,
        buffer: &PixelBuffer,
        params: &TransformParameters,
    ) -> RegistryResult<PixelBuffer> {
        self.validate(params)?;
        let sigma = params.get_float("sigma")?.unwrap_or(self.sigma);
        let out = gaussian_filter(buffer, sigma)?;
        self.last_parameters = Some(TransformParameters::new().with_float("sigma", sigma));
        Ok(out)
    }

    fn descriptor(&self) -> TransformDescriptor {
        TransformDescriptor {
            name: self.name().to_string(),
            last_parameters: self.last_parameters.clone(),
        }
    }
}

// ========== Sigma filter ==========

/// Edge-preserving sigma smoothing. Parameters: `sigma` (float, > 0,
/// default 1.0) scaling the local deviation threshold and `kernel_size`
/// (int, positive odd, default 5).
#[derive(Debug)]
pub struct SigmaFilter {
    sigma: f64,
    kernel_size: u32,
    last_parameters: Option<TransformParameters>,
}

impl SigmaFilter {
    pub fn new(sigma: f64, kernel_size: u32) -> Self {
        Self {
            sigma,
            kernel_size,
            last_parameters: None,
        }
    }
}

impl Default for SigmaFilter {
    fn default() -> Self {
        Self::new(1.0, 5)
    }
}

impl Transform for SigmaFilter {
    fn name(&self) -> &str {
        "Sigma filter"
    }

    fn validate(&self, params: &TransformParameters) -> RegistryResult<()> {
        validate_sigma(params)?;
        if let Some(k) = params.get_int("kernel_size")?
            && (k <= 0 || k % 2 == 0)
        {
            return Err(invalid(format!("kernel size must be positive odd, got {k}")));
        }
        Ok(())
    }

    fn auto_parameters(&self, _buffer: &PixelBuffer) -> TransformParameters {
        TransformParameters::new()
            .with_float("sigma", self.sigma)
            .with_int("kernel_size", self.kernel_size as i64)
    }

    fn apply(
        &mut self,
        buffer: &PixelBuffer,
        params: &TransformParameters,
    ) -> RegistryResult<PixelBuffer> {
        self.validate(params)?;
        let sigma = params.get_float("sigma")?.unwrap_or(self.sigma);
        let kernel_size = match params.get_int("kernel_size")? {
            Some(k) => k as u32,
            None => self.kernel_size,
        };
        let out = sigma_filter(buffer, sigma, kernel_size)?;
        self.last_parameters = Some(
            TransformParameters::new()
                .with_float("sigma", sigma)
                .with_int("kernel_size", kernel_size as i64),
        );
        Ok(out)
    }

    fn descriptor(&self) -> TransformDescriptor {
        TransformDescriptor {
            name: self.name().to_string(),
            last_parameters: self.last_parameters.clone(),
        }
    }
}

// ========== Unsharp mask ==========

/// Unsharp-mask sharpening. Parameters: `lambda_coeff` (float, >= 0,
/// default 1.0), `sigma` (float, > 0, default 1.0) for the internal blur,
/// and `kernel_size` (int, positive, default 3) kept as a nominal label
/// only; the blur kernel always derives from sigma.
#[derive(Debug)]
pub struct UnsharpMask {
    kernel_size: u32,
    lambda_coeff: f64,
    sigma: f64,
    last_parameters: Option<TransformParameters>,
}

impl UnsharpMask {
    pub fn new(kernel_size: u32, lambda_coeff: f64, sigma: f64) -> Self {
        Self {
            kernel_size,
            lambda_coeff,
            sigma,
            last_parameters: None,
        }
    }
}

impl Default for UnsharpMask {
    fn default() -> Self {
        Self::new(3, 1.0, 1.0)
    }
}

impl Transform for UnsharpMask {
    fn name(&self) -> &str {
        "Unsharp mask"
    }

    fn validate(&self, params: &TransformParameters) -> RegistryResult<()> {
        if let Some(k) = params.get_int("kernel_size")?
            && k <= 0
        {
            return Err(invalid(format!("kernel size must be positive, got {k}")));
        }
        if let Some(lambda) = params.get_float("lambda_coeff")?
            && (!lambda.is_finite() || lambda < 0.0)
        {
            return Err(invalid("lambda_coeff must be zero or positive"));
        }
        validate_sigma(params)
    }

    fn auto_parameters(&self, _buffer: &PixelBuffer) -> TransformParameters {
        TransformParameters::new()
            .with_int("kernel_size", self.kernel_size as i64)
            .with_float("lambda_coeff", self.lambda_coeff)
            .with_float("sigma", self.sigma)
    }

    fn apply(
        &mut self,
        buffer: &PixelBuffer,
        params: &TransformParameters,
    ) -> RegistryResult<PixelBuffer> {
        self.validate(params)?;
        let kernel_size = match params.get_int("kernel_size")? {
            Some(k) => k as u32,
            None => self.kernel_size,
        };
        let lambda_coeff = params
            .get_float("lambda_coeff")?
            .unwrap_or(self.lambda_coeff);
        let sigma = params.get_float("sigma")?.unwrap_or(self.sigma);
        let out = unsharp_mask(buffer, lambda_coeff, sigma)?;
        self.last_parameters = Some(
            TransformParameters::new()
                .with_int("kernel_size", kernel_size as i64)
                .with_float("lambda_coeff", lambda_coeff)
                .with_float("sigma", sigma),
        );
        Ok(out)
    }

    fn descriptor(&self) -> TransformDescriptor {
        TransformDescriptor {
            name: self.name().to_string(),
            last_parameters: self.last_parameters.clone(),
        }
    }
}

// ========== builtin transform tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use pixlab_core::{ChannelLayout, Error as CoreError};

    fn ramp() -> PixelBuffer {
        PixelBuffer::from_vec(4, 1, ChannelLayout::Gray, vec![0, 64, 128, 255]).unwrap()
    }

    fn flat(value: u8) -> PixelBuffer {
        PixelBuffer::filled(4, 4, ChannelLayout::Gray, value).unwrap()
    }

    fn no_params() -> TransformParameters {
        TransformParameters::new()
    }

    #[test]
    fn test_logarithmic_auto_reaches_full_range() {
        let mut transform = Logarithmic::default();
        let out = transform.apply(&flat(180), &no_params()).unwrap();
        assert_eq!(out.max_sample(), 255);

        let descriptor = transform.descriptor();
        assert_eq!(descriptor.name, "Logarithmic");
        let c = descriptor
            .last_parameters
            .unwrap()
            .get_float("c")
            .unwrap()
            .unwrap();
        assert!(c > 0.0);
    }

    #[test]
    fn test_logarithmic_rejects_bad_coefficient() {
        let transform = Logarithmic::default();
        let params = TransformParameters::new().with_float("c", 0.0);
        assert!(matches!(
            transform.validate(&params),
            Err(RegistryError::Core(CoreError::InvalidParameter(_)))
        ));
        assert!(transform.validate(&no_params()).is_ok());
    }

    #[test]
    fn test_power_derives_c_for_given_gamma() {
        // Max sample 255 normalizes to 1.0, so c resolves to 1.0 and
        // gamma 2 maps 128 -> 255 * (128/255)^2 = 64.
        let mut transform = Power::default();
        let params = TransformParameters::new().with_float("gamma", 2.0);
        let out = transform.apply(&ramp(), &params).unwrap();
        assert_eq!(out.get_unchecked(2, 0, 0), 64);

        let recorded = transform.descriptor().last_parameters.unwrap();
        assert_eq!(recorded.get_float("gamma").unwrap(), Some(2.0));
        assert!((recorded.get_float("c").unwrap().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_power_auto_parameters_use_unit_gamma() {
        let transform = Power::default();
        let auto = transform.auto_parameters(&ramp());
        assert_eq!(auto.get_float("gamma").unwrap(), Some(1.0));
        assert!((auto.get_float("c").unwrap().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_wrong_parameter_type_surfaces() {
        let transform = Power::default();
        let params = TransformParameters::new().with_text("gamma", "two");
        assert!(matches!(
            transform.validate(&params),
            Err(RegistryError::Core(CoreError::WrongParameterType { .. }))
        ));
    }

    #[test]
    fn test_negative_is_an_involution() {
        let mut transform = Negative::default();
        let once = transform.apply(&ramp(), &no_params()).unwrap();
        let twice = transform.apply(&once, &no_params()).unwrap();
        assert_eq!(twice, ramp());
        assert!(transform.descriptor().last_parameters.unwrap().is_empty());
    }

    #[test]
    fn test_descriptor_before_first_apply() {
        let transform = Negative::default();
        assert_eq!(transform.descriptor().last_parameters, None);
    }

    #[test]
    fn test_binary_auto_threshold_is_mean() {
        let mut transform = Binary::default();
        // Mean of the ramp is 111.75; 128 and 255 pass the threshold.
        let out = transform.apply(&ramp(), &no_params()).unwrap();
        assert_eq!(out.data(), &[0, 0, 255, 255]);

        let recorded = transform.descriptor().last_parameters.unwrap();
        assert!((recorded.get_float("threshold").unwrap().unwrap() - 111.75).abs() < 1e-9);
    }

    #[test]
    fn test_binary_rejects_out_of_range_threshold() {
        let transform = Binary::default();
        for bad in [-1.0, 256.0, f64::NAN] {
            let params = TransformParameters::new().with_float("threshold", bad);
            assert!(transform.validate(&params).is_err(), "threshold {bad}");
        }
    }

    #[test]
    fn test_brightness_cut_auto_uses_percentiles() {
        let mut transform = BrightnessRangeCut::default();
        let buffer =
            PixelBuffer::from_vec(4, 1, ChannelLayout::Gray, vec![10, 100, 150, 240]).unwrap();
        // p25 = 10, p75 = 150, mode original: output is the luma image.
        let out = transform.apply(&buffer, &no_params()).unwrap();
        assert_eq!(out, buffer);

        let recorded = transform.descriptor().last_parameters.unwrap();
        assert_eq!(recorded.get_float("min_brightness").unwrap(), Some(10.0));
        assert_eq!(recorded.get_float("max_brightness").unwrap(), Some(150.0));
        assert_eq!(recorded.get_text("outside_mode").unwrap(), Some("original"));
        assert!(!recorded.contains("constant_value"));
    }

    #[test]
    fn test_brightness_cut_constant_mode() {
        let mut transform = BrightnessRangeCut::default();
        let params = TransformParameters::new()
            .with_float("min_brightness", 50.0)
            .with_float("max_brightness", 200.0)
            .with_text("outside_mode", "constant")
            .with_float("constant_value", 7.0);
        let out = transform.apply(&ramp(), &params).unwrap();
        assert_eq!(out.data(), &[7, 64, 128, 7]);

        let recorded = transform.descriptor().last_parameters.unwrap();
        assert_eq!(recorded.get_float("constant_value").unwrap(), Some(7.0));
    }

    #[test]
    fn test_brightness_cut_constant_mode_requires_value() {
        let mut transform = BrightnessRangeCut::default();
        let params = TransformParameters::new()
            .with_float("min_brightness", 50.0)
            .with_float("max_brightness", 200.0)
            .with_text("outside_mode", "constant");
        assert!(transform.apply(&ramp(), &params).is_err());
    }

    #[test]
    fn test_brightness_cut_rejects_unknown_mode() {
        let transform = BrightnessRangeCut::default();
        let params = TransformParameters::new().with_text("outside_mode", "mirror");
        assert!(transform.validate(&params).is_err());
    }

    #[test]
    fn test_brightness_cut_rejects_inverted_band() {
        let transform = BrightnessRangeCut::default();
        let params = TransformParameters::new()
            .with_float("min_brightness", 150.0)
            .with_float("max_brightness", 150.0);
        assert!(transform.validate(&params).is_err());
    }

    #[test]
    fn test_box_filter_kernel_override() {
        let mut transform = BoxFilter::new(3);
        assert_eq!(transform.name(), "Box filter 3x3");

        let params = TransformParameters::new().with_int("kernel_size", 5);
        let out = transform.apply(&flat(90), &params).unwrap();
        assert!(out.data().iter().all(|&v| v == 90));
        let recorded = transform.descriptor().last_parameters.unwrap();
        assert_eq!(recorded.get_int("kernel_size").unwrap(), Some(5));
    }

    #[test]
    fn test_box_filter_rejects_unsupported_sizes() {
        let transform = BoxFilter::new(3);
        for bad in [1, 2, 4, 7, -3] {
            let params = TransformParameters::new().with_int("kernel_size", bad);
            assert!(transform.validate(&params).is_err(), "kernel {bad}");
        }
    }

    #[test]
    fn test_median_filter_defaults_to_instance_size() {
        let mut transform = MedianFilter::new(5);
        assert_eq!(transform.name(), "Median filter 5x5");
        let out = transform.apply(&flat(33), &no_params()).unwrap();
        assert!(out.data().iter().all(|&v| v == 33));
        let recorded = transform.descriptor().last_parameters.unwrap();
        assert_eq!(recorded.get_int("kernel_size").unwrap(), Some(5));
    }

    #[test]
    fn test_gaussian_filter_sigma_validation() {
        let transform = GaussianFilter::default();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let params = TransformParameters::new().with_float("sigma", bad);
            assert!(transform.validate(&params).is_err(), "sigma {bad}");
        }
    }

    #[test]
    fn test_gaussian_filter_preserves_flat_regions() {
        let mut transform = GaussianFilter::default();
        let out = transform.apply(&flat(120), &no_params()).unwrap();
        assert!(out.data().iter().all(|&v| v == 120));
    }

    #[test]
    fn test_sigma_filter_resolves_both_parameters() {
        let mut transform = SigmaFilter::default();
        let params = TransformParameters::new().with_float("sigma", 2.0);
        transform.apply(&flat(77), &params).unwrap();
        let recorded = transform.descriptor().last_parameters.unwrap();
        assert_eq!(recorded.get_float("sigma").unwrap(), Some(2.0));
        assert_eq!(recorded.get_int("kernel_size").unwrap(), Some(5));
    }

    #[test]
    fn test_sigma_filter_rejects_even_kernel() {
        let transform = SigmaFilter::default();
        let params = TransformParameters::new().with_int("kernel_size", 4);
        assert!(transform.validate(&params).is_err());
    }

    #[test]
    fn test_unsharp_mask_zero_lambda_is_identity() {
        let mut transform = UnsharpMask::default();
        let params = TransformParameters::new().with_float("lambda_coeff", 0.0);
        let out = transform.apply(&ramp(), &params).unwrap();
        assert_eq!(out, ramp());

        let recorded = transform.descriptor().last_parameters.unwrap();
        assert_eq!(recorded.get_int("kernel_size").unwrap(), Some(3));
        assert_eq!(recorded.get_float("lambda_coeff").unwrap(), Some(0.0));
        assert_eq!(recorded.get_float("sigma").unwrap(), Some(1.0));
    }

    #[test]
    fn test_unsharp_mask_rejects_negative_lambda() {
        let transform = UnsharpMask::default();
        let params = TransformParameters::new().with_float("lambda_coeff", -0.5);
        assert!(transform.validate(&params).is_err());
    }
}
