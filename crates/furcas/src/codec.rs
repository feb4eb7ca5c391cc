//! Named tensors to and from a container.
//!
//! Write path: `name -> field path`, layout transposition, quantization,
//! `Container::set_field`. Read path is the mirror image.
//!
//! ## Special cases
//!
//! - Names carrying batch-renorm state or head counts are never stored as
//!   layers. Head counts go through [`Container::set_headcount`].
//! - When any renorm tensor is exported, renorm `stddev` tensors become the
//!   stored `variance` (`stddev² - ε`) and the batch's own `variance` tensors
//!   are dropped. Reading a `stddev` name returns `sqrt(variance + ε)`.
//! - Containers with a pre-hectoplies input format store channel 109 of the
//!   input embedding kernel divided by 99.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use furcas_core::{Error, Result};
use furcas_proto::{Container, PolicyFormat, ValueFormat};

use crate::naming::{is_headcount, is_renorm, map_name};
use crate::quant::{dequantize, quantize};
use crate::tensor::{element_count, storage_shape, Tensor};

/// Offset added to variances before taking square roots.
pub const RENORM_EPSILON: f32 = 1e-5;

/// Tensor whose legacy channel is rescaled.
pub const LEGACY_RESCALE_TENSOR: &str = "embedding/kernel:0";

/// Input channel of [`LEGACY_RESCALE_TENSOR`] that is rescaled.
pub const LEGACY_RESCALE_CHANNEL: usize = 109;

/// Divisor applied to the legacy channel on write.
pub const LEGACY_RESCALE_FACTOR: f32 = 99.0;

/// One tensor the caller wants back, with its training-layout shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorRequest {
    pub name: String,
    pub shape: Vec<usize>,
}

impl TensorRequest {
    pub fn new(name: impl Into<String>, shape: impl Into<Vec<usize>>) -> Self {
        Self {
            name: name.into(),
            shape: shape.into(),
        }
    }
}

/// Import behaviour.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Skip missing or mis-sized tensors (and format mismatches) with a
    /// warning instead of failing.
    pub ignore_errors: bool,
    /// Policy head kind the caller's model uses.
    pub expected_policy: Option<PolicyFormat>,
    /// Value head kind the caller's model uses.
    pub expected_value: Option<ValueFormat>,
    /// Multiply the legacy embedding channel back by 99 on read.
    pub undo_legacy_rescale: bool,
}

impl ImportOptions {
    /// Options that skip what they can instead of failing.
    pub fn tolerant() -> Self {
        Self {
            ignore_errors: true,
            ..Self::default()
        }
    }

    pub fn with_expected_policy(mut self, policy: PolicyFormat) -> Self {
        self.expected_policy = Some(policy);
        self
    }

    pub fn with_expected_value(mut self, value: ValueFormat) -> Self {
        self.expected_value = Some(value);
        self
    }

    pub fn with_legacy_rescale_undone(mut self) -> Self {
        self.undo_legacy_rescale = true;
        self
    }
}

/// Store named training-layout tensors in `container`.
///
/// Every name must resolve; an unresolvable name aborts the whole export with
/// [`Error::Unmapped`]. Returns the number of layers written.
pub fn export(container: &mut Container, tensors: &[(String, Tensor)]) -> Result<usize> {
    let has_renorm = tensors.iter().any(|(name, _)| is_renorm(name));
    let legacy_input = container.is_legacy_input();
    let mut written = 0;

    for (name, tensor) in tensors {
        if is_renorm(name) || is_headcount(name) {
            debug!(name = %name, "skipping derived tensor");
            continue;
        }

        let mut name = Cow::Borrowed(name.as_str());
        let mut stored = tensor.to_storage_layout()?;

        if has_renorm {
            let weight = name.rsplit('/').next().unwrap_or_default();
            if weight.contains("variance:") {
                debug!(name = %name, "skipping variance superseded by renorm stddev");
                continue;
            }
            if weight.contains("stddev:") {
                stddev_to_variance(&mut stored);
                name = Cow::Owned(name.replace("stddev", "variance"));
            }
        }

        if legacy_input && name == LEGACY_RESCALE_TENSOR {
            scale_legacy_channel(&mut stored, &name, |v| *v /= LEGACY_RESCALE_FACTOR)?;
        }

        let location = map_name(&name).map_err(|e| Error::unmapped(&*name, Some(e)))?;
        container
            .set_field(&location, quantize(stored.data()))
            .map_err(|e| match e {
                Error::FieldNotFound(_) => Error::unmapped(&*name, Some(e)),
                other => other,
            })?;

        debug!(name = %name, field = %location, elements = stored.len(), "stored tensor");
        written += 1;
    }

    info!(
        layers = written,
        min_version = %container.min_version(),
        "exported tensors"
    );
    Ok(written)
}

/// Restore the requested tensors from `container`.
///
/// Renorm and head-count names are skipped and absent from the result.
pub fn import(
    container: &Container,
    requests: &[TensorRequest],
    options: &ImportOptions,
) -> Result<BTreeMap<String, Tensor>> {
    check_formats(container, options)?;

    let mut tensors = BTreeMap::new();
    for request in requests {
        match import_one(container, request, options) {
            Ok(Some(tensor)) => {
                tensors.insert(request.name.clone(), tensor);
            }
            Ok(None) => debug!(name = %request.name, "skipping derived tensor"),
            Err(e) if options.ignore_errors && e.is_skippable() => {
                warn!(name = %request.name, error = %e, "skipping tensor");
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        requested = requests.len(),
        restored = tensors.len(),
        "imported tensors"
    );
    Ok(tensors)
}

fn check_formats(container: &Container, options: &ImportOptions) -> Result<()> {
    let mismatches = [
        options
            .expected_policy
            .filter(|&p| p != container.policy_format())
            .map(|p| Error::FormatMismatch {
                head: "policy",
                expected: p.name().to_string(),
                actual: container.policy_format().name().to_string(),
            }),
        options
            .expected_value
            .filter(|&v| v != container.value_format())
            .map(|v| Error::FormatMismatch {
                head: "value",
                expected: v.name().to_string(),
                actual: container.value_format().name().to_string(),
            }),
    ];

    for mismatch in mismatches.into_iter().flatten() {
        if !options.ignore_errors {
            return Err(mismatch);
        }
        warn!(error = %mismatch, "ignoring head format mismatch");
    }
    Ok(())
}

fn import_one(
    container: &Container,
    request: &TensorRequest,
    options: &ImportOptions,
) -> Result<Option<Tensor>> {
    // Only the variance is stored; stddev is derived from it.
    let name = request.name.replace("stddev", "variance");
    if is_renorm(&name) || is_headcount(&request.name) {
        return Ok(None);
    }

    let location = map_name(&name)?;
    let layer = container.get_field(&location).map_err(|e| match e {
        Error::TensorNotFound(_) => Error::TensorNotFound(request.name.clone()),
        other => other,
    })?;

    let values = dequantize(layer)?;
    let expected = element_count(&request.shape);
    if values.len() != expected {
        return Err(Error::shape_mismatch(&request.name, expected, values.len()));
    }

    let mut stored = Tensor::new(storage_shape(&request.shape), values)?;
    if options.undo_legacy_rescale && container.is_legacy_input() && name == LEGACY_RESCALE_TENSOR
    {
        scale_legacy_channel(&mut stored, &name, |v| *v *= LEGACY_RESCALE_FACTOR)?;
    }
    if request.name.contains("stddev") {
        variance_to_stddev(&mut stored);
    }

    let tensor = Tensor::from_storage_layout(&request.shape, stored.into_data())?;
    debug!(name = %request.name, field = %location, "restored tensor");
    Ok(Some(tensor))
}

/// `stddev² - ε`, the stored form of a renorm standard deviation.
fn stddev_to_variance(stored: &mut Tensor) {
    for v in stored.data_mut() {
        *v = *v * *v - RENORM_EPSILON;
    }
}

fn variance_to_stddev(stored: &mut Tensor) {
    for v in stored.data_mut() {
        *v = (*v + RENORM_EPSILON).sqrt();
    }
}

/// Apply `rescale` to input channel [`LEGACY_RESCALE_CHANNEL`] of an
/// `(out, in)` storage-layout matrix.
fn scale_legacy_channel(stored: &mut Tensor, name: &str, rescale: fn(&mut f32)) -> Result<()> {
    let inputs = match stored.shape() {
        [_, inputs] => *inputs,
        _ => return Err(Error::shape_mismatch(name, 2, stored.rank())),
    };
    if inputs <= LEGACY_RESCALE_CHANNEL {
        return Err(Error::shape_mismatch(name, LEGACY_RESCALE_CHANNEL + 1, inputs));
    }

    for row in stored.data_mut().chunks_exact_mut(inputs) {
        rescale(&mut row[LEGACY_RESCALE_CHANNEL]);
    }
    Ok(())
}
