//! Reading and writing `.pb.gz` weight files.

use std::path::{Path, PathBuf};

use tracing::info;

use furcas_core::{Algorithm, Codec, Result};
use furcas_gzip::GzipCodec;
use furcas_proto::Container;

/// Serialize a container to gzip-compressed bytes.
pub fn to_bytes(container: &Container) -> Result<Vec<u8>> {
    container.serialize(&GzipCodec::new())
}

/// Parse gzip-compressed container bytes.
pub fn from_bytes(bytes: &[u8]) -> Result<Container> {
    Container::parse(bytes, &GzipCodec::new())
}

/// Path a container is saved under; `.pb.gz` is appended when `path` has no
/// extension.
pub fn weights_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".");
        name.push(Algorithm::Gzip.extension());
        PathBuf::from(name)
    }
}

/// Write a container; returns the path actually written.
pub fn save(container: &Container, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = weights_path(path);
    let bytes = to_bytes(container)?;
    std::fs::write(&path, &bytes)?;

    let mib = bytes.len() as f64 / (1024.0 * 1024.0);
    info!("Weights saved as '{}' {:.2}M", path.display(), mib);
    Ok(path)
}

/// Read a whole container, upgrading legacy topologies.
pub fn load(path: impl AsRef<Path>) -> Result<Container> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let container = from_bytes(&bytes)?;
    info!(
        path = %path.display(),
        bytes = bytes.len(),
        min_version = %container.min_version(),
        "loaded weights"
    );
    Ok(container)
}
