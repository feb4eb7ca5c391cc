//! Minimum-reader-version tracking.
//!
//! Each optional structural feature needs a reader of at least a certain
//! minor version. The gate only ever raises the version, so any sequence of
//! feature activations converges to the maximum of their floors.

use std::fmt;

use crate::schema::EngineVersion;

/// Major version of every container this crate writes.
pub const FLOOR_MAJOR: u32 = 0;

/// Minor version of a container with no optional features.
pub const FLOOR_MINOR: u32 = 21;

/// Patch version of every container this crate writes.
pub const FLOOR_PATCH: u32 = 0;

/// First minor version reading input formats 2 and 3.
pub const MINOR_WITH_INPUT_TYPE_3: u32 = 25;

/// First minor version reading hectoplies input formats.
pub const MINOR_WITH_INPUT_TYPE_4: u32 = 26;

/// First minor version reading canonicalization-v2 input formats.
pub const MINOR_WITH_INPUT_TYPE_5: u32 = 27;

/// First minor version with a mish default activation.
pub const MINOR_WITH_MISH: u32 = 29;

/// First minor version with attention bodies.
pub const MINOR_WITH_ATTN_BODY: u32 = 30;

/// First minor version with multi-head formats and input embeddings.
pub const MINOR_WITH_MULTIHEAD: u32 = 31;

/// Structural features that carry a version floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Castling-plane or canonicalized input.
    InputType3,
    /// Hectoplies input, with or without armageddon.
    InputType4,
    /// Canonicalization-v2 input, with or without armageddon.
    InputType5,
    /// Mish as the default activation.
    MishActivation,
    /// Attention body, or any smolgen/FFN activation choice.
    AttentionBody,
    /// Multi-head formats, or any input embedding choice.
    MultiHead,
}

impl Feature {
    /// Minor version floor for the feature.
    pub fn floor(self) -> u32 {
        match self {
            Feature::InputType3 => MINOR_WITH_INPUT_TYPE_3,
            Feature::InputType4 => MINOR_WITH_INPUT_TYPE_4,
            Feature::InputType5 => MINOR_WITH_INPUT_TYPE_5,
            Feature::MishActivation => MINOR_WITH_MISH,
            Feature::AttentionBody => MINOR_WITH_ATTN_BODY,
            Feature::MultiHead => MINOR_WITH_MULTIHEAD,
        }
    }
}

/// Monotonic minimum-reader-version builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionGate {
    major: u32,
    minor: u32,
    patch: u32,
}

impl VersionGate {
    /// Gate at the format floor.
    pub fn new() -> Self {
        Self {
            major: FLOOR_MAJOR,
            minor: FLOOR_MINOR,
            patch: FLOOR_PATCH,
        }
    }

    /// Gate resuming from a version read out of an existing container.
    pub fn from_engine_version(version: &EngineVersion) -> Self {
        Self {
            major: version.major.unwrap_or(FLOOR_MAJOR),
            minor: version.minor.unwrap_or(FLOOR_MINOR),
            patch: version.patch.unwrap_or(FLOOR_PATCH),
        }
    }

    /// Record that `feature` is active.
    pub fn require(&mut self, feature: Feature) {
        self.raise_minor(feature.floor());
    }

    /// Raise the minor version to at least `floor`; never lowers it.
    pub fn raise_minor(&mut self, floor: u32) {
        if self.minor < floor {
            tracing::debug!(from = self.minor, to = floor, "raising minimum reader version");
            self.minor = floor;
        }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch
    }

    /// Version as the schema message.
    pub fn to_engine_version(&self) -> EngineVersion {
        EngineVersion {
            major: Some(self.major),
            minor: Some(self.minor),
            patch: Some(self.patch),
        }
    }
}

impl Default for VersionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VersionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
