//! Dense row-major float tensors and layout conversion.
//!
//! Training tensors use `(h, w, in, out)` for convolutions and `(in, out)` for
//! dense layers. Containers store `(out, in, h, w)` and `(out, in)`. Tensors of
//! any other rank are stored as-is.

use furcas_core::{Error, Result};

/// Axis order taking a 4D training tensor to storage layout.
pub const CONV_TO_STORAGE: [usize; 4] = [3, 2, 0, 1];

/// Axis order taking a 4D storage tensor back to training layout.
pub const CONV_FROM_STORAGE: [usize; 4] = [2, 3, 1, 0];

/// Axis order for 2D tensors; its own inverse.
pub const DENSE_SWAP: [usize; 2] = [1, 0];

/// Dense row-major `f32` tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    shape: Vec<usize>,
    data: Vec<f32>,
}

impl Tensor {
    /// Create a tensor, checking that `data` fills `shape` exactly.
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> Result<Self> {
        let expected = element_count(&shape);
        if expected != data.len() {
            return Err(Error::shape_mismatch(
                format!("{:?}", shape),
                expected,
                data.len(),
            ));
        }
        Ok(Self { shape, data })
    }

    /// One-dimensional tensor over `data`.
    pub fn from_vec(data: Vec<f32>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Elements in row-major order.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Reorder axes; output axis `i` is input axis `axes[i]`.
    pub fn permute(&self, axes: &[usize]) -> Result<Tensor> {
        let rank = self.rank();
        let mut seen = vec![false; rank];
        for &axis in axes {
            if axis >= rank || seen[axis] {
                return Err(Error::InvalidConfig(format!(
                    "{:?} is not a permutation of {} axes",
                    axes, rank
                )));
            }
            seen[axis] = true;
        }
        if axes.len() != rank {
            return Err(Error::InvalidConfig(format!(
                "{:?} is not a permutation of {} axes",
                axes, rank
            )));
        }

        let strides = strides(&self.shape);
        let shape: Vec<usize> = axes.iter().map(|&a| self.shape[a]).collect();
        let mut data = Vec::with_capacity(self.data.len());
        let mut index = vec![0usize; rank];

        for _ in 0..self.data.len() {
            let offset: usize = index
                .iter()
                .zip(axes)
                .map(|(&i, &axis)| i * strides[axis])
                .sum();
            data.push(self.data[offset]);

            for dim in (0..rank).rev() {
                index[dim] += 1;
                if index[dim] < shape[dim] {
                    break;
                }
                index[dim] = 0;
            }
        }

        Ok(Tensor { shape, data })
    }

    /// Convert from training layout to storage layout.
    pub fn to_storage_layout(&self) -> Result<Tensor> {
        match self.rank() {
            4 => self.permute(&CONV_TO_STORAGE),
            2 => self.permute(&DENSE_SWAP),
            _ => Ok(self.clone()),
        }
    }

    /// Rebuild a training-layout tensor of `shape` from storage-order elements.
    pub fn from_storage_layout(shape: &[usize], data: Vec<f32>) -> Result<Tensor> {
        let stored = Tensor::new(storage_shape(shape), data)?;
        match shape.len() {
            4 => stored.permute(&CONV_FROM_STORAGE),
            2 => stored.permute(&DENSE_SWAP),
            _ => Ok(stored),
        }
    }
}

/// Storage-layout shape of a training-layout `shape`.
pub fn storage_shape(shape: &[usize]) -> Vec<usize> {
    match shape {
        [h, w, cin, cout] => vec![*cout, *cin, *h, *w],
        [cin, cout] => vec![*cout, *cin],
        _ => shape.to_vec(),
    }
}

/// Product of the dimensions; 1 for a scalar shape.
pub fn element_count(shape: &[usize]) -> usize {
    shape.iter().product()
}

fn strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; shape.len()];
    for dim in (0..shape.len().saturating_sub(1)).rev() {
        strides[dim] = strides[dim + 1] * shape[dim + 1];
    }
    strides
}
