//! Container summaries for inspection.

use std::fmt;

use furcas_core::CompressionRatio;
use furcas_proto::{BlockKind, Container, VersionGate};

use crate::quant::code_count;

/// Summary of a container's header and weights.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerStats {
    pub min_version: VersionGate,
    pub weights_encoding: &'static str,
    pub network: &'static str,
    pub input: &'static str,
    pub output: &'static str,
    pub policy: &'static str,
    pub value: &'static str,
    pub moves_left: &'static str,
    pub default_activation: &'static str,
    pub smolgen_activation: &'static str,
    pub ffn_activation: &'static str,
    pub input_embedding: &'static str,
    pub residual_blocks: usize,
    pub encoder_blocks: usize,
    pub policy_encoder_blocks: usize,
    pub headcount: Option<u32>,
    pub layers: usize,
    pub parameters: usize,
    pub payload_bytes: usize,
    /// Payload against on-disk size, once the file size is known.
    pub compression: Option<CompressionRatio>,
}

impl ContainerStats {
    pub fn collect(container: &Container) -> Self {
        let mut layers = 0;
        let mut parameters = 0;
        container.visit_layers(&mut |_, layer| {
            layers += 1;
            parameters += code_count(layer);
        });

        Self {
            min_version: container.min_version(),
            weights_encoding: container.weights_encoding().name(),
            network: container.network_structure().name(),
            input: container.input_format().name(),
            output: container.output_format().name(),
            policy: container.policy_format().name(),
            value: container.value_format().name(),
            moves_left: container.moves_left_format().name(),
            default_activation: container.default_activation().name(),
            smolgen_activation: container.smolgen_activation().name(),
            ffn_activation: container.ffn_activation().name(),
            input_embedding: container.input_embedding().name(),
            residual_blocks: container.block_count(BlockKind::Residual),
            encoder_blocks: container.block_count(BlockKind::Encoder),
            policy_encoder_blocks: container.block_count(BlockKind::PolicyEncoder),
            headcount: container.headcount(),
            layers,
            parameters,
            payload_bytes: container.payload_len(),
            compression: None,
        }
    }

    /// Record the size of the file the container was read from.
    pub fn with_file_size(mut self, file_bytes: usize) -> Self {
        self.compression = Some(CompressionRatio::new(self.payload_bytes, file_bytes));
        self
    }
}

impl fmt::Display for ContainerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Minimum version:    {}", self.min_version)?;
        writeln!(f, "Weights encoding:   {}", self.weights_encoding)?;
        writeln!(f, "Network:            {}", self.network)?;
        writeln!(f, "Input:              {}", self.input)?;
        writeln!(f, "Output:             {}", self.output)?;
        writeln!(f, "Policy:             {}", self.policy)?;
        writeln!(f, "Value:              {}", self.value)?;
        writeln!(f, "Moves left:         {}", self.moves_left)?;
        writeln!(f, "Default activation: {}", self.default_activation)?;
        writeln!(f, "Smolgen activation: {}", self.smolgen_activation)?;
        writeln!(f, "FFN activation:     {}", self.ffn_activation)?;
        writeln!(f, "Input embedding:    {}", self.input_embedding)?;
        writeln!(
            f,
            "Blocks:             {} residual, {} encoder, {} policy encoder",
            self.residual_blocks, self.encoder_blocks, self.policy_encoder_blocks
        )?;
        if let Some(headcount) = self.headcount {
            writeln!(f, "Heads:              {}", headcount)?;
        }
        match self.compression {
            Some(ratio) => writeln!(
                f,
                "Size:               {} bytes payload, {} on disk ({:.2}x, {:.1}% saved)",
                ratio.original_size,
                ratio.compressed_size,
                ratio.ratio(),
                ratio.savings_percent()
            )?,
            None => writeln!(f, "Size:               {} bytes payload", self.payload_bytes)?,
        }
        write!(
            f,
            "Layers:             {} ({} parameters)",
            self.layers, self.parameters
        )
    }
}
