//! # Furcas Proto
//!
//! Protobuf schema and in-memory container for network weight files.
//!
//! ## Layout
//!
//! - [`schema`] - prost message and enumeration definitions
//! - [`fields`] - dotted field-path addressing of layers
//! - [`version`] - minimum-reader-version gate
//! - [`container`] - format flags, layer storage and (de)serialization
//!
//! The schema is declared with prost derives rather than generated from a
//! `.proto` file, so building the crate needs no `protoc`.

pub mod container;
pub mod fields;
pub mod schema;
pub mod version;

pub use container::{Container, WEIGHTS_MAGIC};
pub use fields::{BlockKind, BlockRef, FieldPath, LayerFields, MAX_BLOCKS};
pub use schema::{
    ActivationFunction, DefaultActivation, InputEmbeddingFormat, InputFormat, Layer,
    MovesLeftFormat, Net, NetworkStructure, OutputFormat, PolicyFormat, TrainingParams,
    ValueFormat, WeightsEncoding,
};
pub use version::{Feature, VersionGate};
