//! Integration tests for the tensor <-> weight file pipeline.
//!
//! These tests drive the public API end to end: configuration, export,
//! `.pb.gz` files on disk, parsing and import.

mod full_pipeline;
mod legacy_files;
