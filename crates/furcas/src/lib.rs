//! # Furcas
//!
//! Codec between hierarchically-named training tensors and the quantized,
//! versioned `.pb.gz` weight container read by inference engines.
//!
//! ## Quick Start
//!
//! ```ignore
//! use furcas::{export, file, import, ImportOptions, NetConfig, Tensor, TensorRequest};
//!
//! let mut container = NetConfig::from_file("model.json")?.build_container()?;
//! export(&mut container, &tensors)?;
//! file::save(&container, "nets/run1")?; // writes nets/run1.pb.gz
//!
//! let container = file::load("nets/run1.pb.gz")?;
//! let requests = [TensorRequest::new("encoder_1/mha/wq/kernel:0", [768, 768])];
//! let restored = import(&container, &requests, &ImportOptions::default())?;
//! ```
//!
//! ## Components
//!
//! | Module | Role |
//! |--------|------|
//! | [`quant`] | 16-bit affine quantization |
//! | [`naming`] | tensor name to field path dispatch |
//! | [`tensor`] | dense tensors and layout transposition |
//! | [`codec`] | export / import orchestration |
//! | [`config`] | model format configuration |
//! | [`stats`] | container summaries |
//! | [`file`] | `.pb.gz` file helpers |

pub mod codec;
pub mod config;
pub mod file;
pub mod naming;
pub mod quant;
pub mod stats;
pub mod tensor;

pub use codec::{export, import, ImportOptions, TensorRequest};
pub use config::NetConfig;
pub use naming::map_name;
pub use quant::{dequantize, quantize};
pub use stats::ContainerStats;
pub use tensor::Tensor;

pub use furcas_core::{Error, Result};
pub use furcas_proto::{BlockKind, Container, FieldPath, Layer, VersionGate};
