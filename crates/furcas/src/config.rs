//! Network format configuration.
//!
//! Mirrors the `model` section of a training config: head kinds, input
//! encoding and body shape, as strings. [`NetConfig::build_container`] turns
//! it into a fresh container with the matching format flags and version.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use furcas_core::{Error, Result};
use furcas_proto::{
    ActivationFunction, Container, DefaultActivation, InputEmbeddingFormat, InputFormat,
    MovesLeftFormat, NetworkStructure, PolicyFormat, ValueFormat,
};

/// Model format configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetConfig {
    /// Policy head: classical, convolution, attention
    #[serde(default = "default_policy")]
    pub policy: String,

    /// Value head: classical, wdl
    #[serde(default = "default_value")]
    pub value: String,

    /// Moves-left head: none, v1
    #[serde(default = "default_moves_left")]
    pub moves_left: String,

    /// Input encoding
    #[serde(default = "default_input_type")]
    pub input_type: String,

    /// Default activation: relu, mish
    #[serde(default = "default_activation")]
    pub default_activation: String,

    /// Number of body encoder layers; zero for a convolutional body
    #[serde(default)]
    pub encoder_layers: u32,

    /// Attention heads per encoder layer
    #[serde(default)]
    pub encoder_heads: u32,

    /// Smolgen activation name
    #[serde(default)]
    pub smolgen_activation: Option<String>,

    /// Input embedding style: new, old
    #[serde(default = "default_embedding_style")]
    pub embedding_style: String,

    /// License string stored in the container
    #[serde(default)]
    pub license: Option<String>,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            policy: default_policy(),
            value: default_value(),
            moves_left: default_moves_left(),
            input_type: default_input_type(),
            default_activation: default_activation(),
            encoder_layers: 0,
            encoder_heads: 0,
            smolgen_activation: None,
            embedding_style: default_embedding_style(),
            license: None,
        }
    }
}

impl NetConfig {
    /// Parse a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Read and parse a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn policy_format(&self) -> Result<PolicyFormat> {
        match self.policy.as_str() {
            "classical" => Ok(PolicyFormat::Classical),
            "convolution" => Ok(PolicyFormat::Convolution),
            "attention" => Ok(PolicyFormat::Attention),
            other => Err(unknown("policy head format", other)),
        }
    }

    pub fn value_format(&self) -> Result<ValueFormat> {
        match self.value.as_str() {
            "classical" => Ok(ValueFormat::Classical),
            "wdl" => Ok(ValueFormat::Wdl),
            other => Err(unknown("value head format", other)),
        }
    }

    pub fn moves_left_format(&self) -> Result<MovesLeftFormat> {
        match self.moves_left.as_str() {
            "none" => Ok(MovesLeftFormat::None),
            "v1" => Ok(MovesLeftFormat::V1),
            other => Err(unknown("moves left head format", other)),
        }
    }

    pub fn input_format(&self) -> Result<InputFormat> {
        match self.input_type.as_str() {
            "classic" => Ok(InputFormat::Classical112Plane),
            "frc_castling" => Ok(InputFormat::WithCastlingPlane),
            "canonical" => Ok(InputFormat::WithCanonicalization),
            "canonical_100" => Ok(InputFormat::WithCanonicalizationHectoplies),
            "canonical_armageddon" => Ok(InputFormat::WithCanonicalizationHectopliesArmageddon),
            "canonical_v2" => Ok(InputFormat::WithCanonicalizationV2),
            "canonical_v2_armageddon" => Ok(InputFormat::WithCanonicalizationV2Armageddon),
            other => Err(unknown("input mode format", other)),
        }
    }

    pub fn default_activation_format(&self) -> Result<DefaultActivation> {
        match self.default_activation.as_str() {
            "relu" => Ok(DefaultActivation::Relu),
            "mish" => Ok(DefaultActivation::Mish),
            other => Err(unknown("default activation type", other)),
        }
    }

    /// Input embedding implied by the style and body.
    pub fn input_embedding(&self) -> InputEmbeddingFormat {
        if self.embedding_style.eq_ignore_ascii_case("new") {
            InputEmbeddingFormat::PeDense
        } else if self.encoder_layers > 0 {
            InputEmbeddingFormat::PeMap
        } else {
            InputEmbeddingFormat::None
        }
    }

    /// Fresh container carrying this configuration's format flags.
    pub fn build_container(&self) -> Result<Container> {
        let mut container = Container::new();
        if let Some(license) = &self.license {
            container.set_license(license.as_str());
        }

        let policy = self.policy_format()?;
        container.set_policy_format(policy);
        if policy == PolicyFormat::Attention && self.encoder_layers > 0 {
            container.set_pol_headcount(self.encoder_heads);
        }

        container.set_value_format(self.value_format()?);
        container.set_moves_left_format(self.moves_left_format()?);
        container.set_input_format(self.input_format()?);
        container.set_default_activation(self.default_activation_format()?);

        if self.encoder_layers > 0 {
            container.set_headcount(self.encoder_heads);
            container.set_network_format(NetworkStructure::AttentionbodyWithMultiheadformat);
            container.set_smolgen_activation(ActivationFunction::from_config_name(
                self.smolgen_activation.as_deref().unwrap_or_default(),
            ));
            container.set_ffn_activation(ActivationFunction::Default);
        }

        container.set_input_embedding(self.input_embedding());

        debug!(
            network = container.network_structure().name(),
            min_version = %container.min_version(),
            "built container from config"
        );
        Ok(container)
    }
}

fn unknown(what: &str, value: &str) -> Error {
    Error::InvalidConfig(format!("unknown {}: {}", what, value))
}

fn default_policy() -> String {
    "attention".to_string()
}

fn default_value() -> String {
    "wdl".to_string()
}

fn default_moves_left() -> String {
    "v1".to_string()
}

fn default_input_type() -> String {
    "classic".to_string()
}

fn default_activation() -> String {
    "relu".to_string()
}

fn default_embedding_style() -> String {
    "new".to_string()
}
