//! In-memory weights container and its whole-file (de)serialization.
//!
//! A [`Container`] is built field by field during an export pass and then
//! serialized once, or parsed whole before any field is read. There is no
//! partial or streaming state.

use prost::Message;
use tracing::{debug, info};

use furcas_core::{CompressionRatio, Compressor, Decompressor, Error, Result};

use crate::fields::{BlockKind, FieldPath, LayerFields, MAX_BLOCKS};
use crate::schema::{
    ActivationFunction, DefaultActivation, EncoderLayer, Format, InputEmbeddingFormat,
    InputFormat, Layer, MovesLeftFormat, Net, NetworkFormat, NetworkStructure, OutputFormat,
    PolicyFormat, Residual, TrainingParams, ValueFormat, Weights, WeightsEncoding,
};
use crate::version::{Feature, VersionGate};

/// Magic constant identifying a weights container.
pub const WEIGHTS_MAGIC: u32 = 0x1c0;

/// Wire tag of `Net.magic` (field 1, fixed32).
const MAGIC_TAG: u8 = 0x0d;

/// Structured weights container.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    net: Net,
    gate: VersionGate,
}

impl Container {
    /// Fresh container with default flags and the floor version.
    ///
    /// Defaults: SE topology with head formats, classical 112-plane input,
    /// classical policy and value heads, v1 moves-left head, ReLU default
    /// activation, 16-bit linear weights.
    pub fn new() -> Self {
        Self::with_network(NetworkStructure::SeWithHeadformat)
    }

    /// Fresh container for the given topology.
    ///
    /// The head-format-less topologies are folded into their head-format
    /// variants, since new containers always carry head formats.
    pub fn with_network(network: NetworkStructure) -> Self {
        let network = match network {
            NetworkStructure::Se => NetworkStructure::SeWithHeadformat,
            NetworkStructure::Classical => NetworkStructure::ClassicalWithHeadformat,
            other => other,
        };

        let gate = VersionGate::new();
        let mut container = Self {
            net: Net {
                magic: Some(WEIGHTS_MAGIC),
                min_version: Some(gate.to_engine_version()),
                format: Some(Format {
                    weights_encoding: Some(WeightsEncoding::Linear16 as i32),
                    network_format: Some(NetworkFormat::default()),
                }),
                ..Default::default()
            },
            gate,
        };

        container.set_network_format(network);
        container.network_format_mut().input = Some(InputFormat::Classical112Plane as i32);
        container.set_policy_format(PolicyFormat::Classical);
        container.set_value_format(ValueFormat::Classical);
        container.set_moves_left_format(MovesLeftFormat::V1);
        container.set_default_activation(DefaultActivation::Relu);
        container
    }

    /// Wrap a decoded message, validating the magic and normalizing legacy
    /// topologies.
    pub fn from_net(net: Net) -> Result<Self> {
        let magic = net.magic.unwrap_or(0);
        if magic != WEIGHTS_MAGIC {
            return Err(Error::BadMagic {
                expected: WEIGHTS_MAGIC,
                actual: magic,
            });
        }

        let gate = net
            .min_version
            .as_ref()
            .map(VersionGate::from_engine_version)
            .unwrap_or_default();
        let mut container = Self { net, gate };
        container.upgrade_legacy();
        Ok(container)
    }

    /// Underlying schema message.
    pub fn as_net(&self) -> &Net {
        &self.net
    }

    /// Consume the container, returning the schema message.
    pub fn into_net(self) -> Net {
        self.net
    }

    // ==================== Version ====================

    /// Minimum reader version required by the active features.
    pub fn min_version(&self) -> VersionGate {
        self.gate
    }

    fn require(&mut self, feature: Feature) {
        self.gate.require(feature);
        self.net.min_version = Some(self.gate.to_engine_version());
    }

    // ==================== Format flags ====================

    fn flags(&self) -> Option<&NetworkFormat> {
        self.net.format.as_ref()?.network_format.as_ref()
    }

    fn network_format_mut(&mut self) -> &mut NetworkFormat {
        self.net
            .format
            .get_or_insert_with(Format::default)
            .network_format
            .get_or_insert_with(NetworkFormat::default)
    }

    pub fn weights_encoding(&self) -> WeightsEncoding {
        self.net
            .format
            .as_ref()
            .map(|f| f.weights_encoding())
            .unwrap_or_default()
    }

    pub fn network_structure(&self) -> NetworkStructure {
        self.flags().map(|f| f.network()).unwrap_or_default()
    }

    pub fn input_format(&self) -> InputFormat {
        self.flags().map(|f| f.input()).unwrap_or_default()
    }

    /// Raw input format value, including values this build does not know.
    pub fn input_format_raw(&self) -> i32 {
        self.flags().and_then(|f| f.input).unwrap_or(0)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.flags().map(|f| f.output()).unwrap_or_default()
    }

    pub fn policy_format(&self) -> PolicyFormat {
        self.flags().map(|f| f.policy()).unwrap_or_default()
    }

    pub fn value_format(&self) -> ValueFormat {
        self.flags().map(|f| f.value()).unwrap_or_default()
    }

    pub fn moves_left_format(&self) -> MovesLeftFormat {
        self.flags().map(|f| f.moves_left()).unwrap_or_default()
    }

    pub fn default_activation(&self) -> DefaultActivation {
        self.flags().map(|f| f.default_activation()).unwrap_or_default()
    }

    pub fn smolgen_activation(&self) -> ActivationFunction {
        self.flags().map(|f| f.smolgen_activation()).unwrap_or_default()
    }

    pub fn ffn_activation(&self) -> ActivationFunction {
        self.flags().map(|f| f.ffn_activation()).unwrap_or_default()
    }

    pub fn input_embedding(&self) -> InputEmbeddingFormat {
        self.flags().map(|f| f.input_embedding()).unwrap_or_default()
    }

    /// Whether the input format predates the hectoplies canonicalization,
    /// i.e. the rule-50 plane was still unnormalized.
    pub fn is_legacy_input(&self) -> bool {
        self.input_format_raw() < InputFormat::WithCanonicalizationHectoplies as i32
    }

    pub fn set_network_format(&mut self, network: NetworkStructure) {
        self.network_format_mut().network = Some(network as i32);
        match network {
            NetworkStructure::AttentionbodyWithHeadformat => self.require(Feature::AttentionBody),
            NetworkStructure::AttentionbodyWithMultiheadformat => self.require(Feature::MultiHead),
            _ => {}
        }
    }

    pub fn set_input_format(&mut self, input: InputFormat) {
        self.network_format_mut().input = Some(input as i32);
        match input {
            InputFormat::WithCanonicalizationV2 | InputFormat::WithCanonicalizationV2Armageddon => {
                self.require(Feature::InputType5)
            }
            _ if input as i32 >= InputFormat::WithCanonicalizationHectoplies as i32 => {
                self.require(Feature::InputType4)
            }
            InputFormat::Classical112Plane => {}
            // Readers of type 2 need the type 3 fix.
            _ => self.require(Feature::InputType3),
        }
    }

    pub fn set_policy_format(&mut self, policy: PolicyFormat) {
        self.network_format_mut().policy = Some(policy as i32);
    }

    /// Set the value head kind; the output kind follows from it.
    pub fn set_value_format(&mut self, value: ValueFormat) {
        let output = match value {
            ValueFormat::Wdl => OutputFormat::Wdl,
            _ => OutputFormat::Classical,
        };
        let flags = self.network_format_mut();
        flags.value = Some(value as i32);
        flags.output = Some(output as i32);
    }

    pub fn set_moves_left_format(&mut self, moves_left: MovesLeftFormat) {
        self.network_format_mut().moves_left = Some(moves_left as i32);
    }

    pub fn set_default_activation(&mut self, activation: DefaultActivation) {
        self.network_format_mut().default_activation = Some(activation as i32);
        if activation == DefaultActivation::Mish {
            self.require(Feature::MishActivation);
        }
    }

    pub fn set_smolgen_activation(&mut self, activation: ActivationFunction) {
        self.network_format_mut().smolgen_activation = Some(activation as i32);
        self.require(Feature::AttentionBody);
    }

    pub fn set_ffn_activation(&mut self, activation: ActivationFunction) {
        self.network_format_mut().ffn_activation = Some(activation as i32);
        self.require(Feature::AttentionBody);
    }

    pub fn set_input_embedding(&mut self, embedding: InputEmbeddingFormat) {
        self.network_format_mut().input_embedding = Some(embedding as i32);
        self.require(Feature::MultiHead);
    }

    /// Attention head count of the body encoders.
    pub fn set_headcount(&mut self, headcount: u32) {
        self.weights_mut().headcount = Some(headcount);
    }

    /// Attention head count of the policy encoders.
    pub fn set_pol_headcount(&mut self, headcount: u32) {
        self.weights_mut().pol_headcount = Some(headcount);
    }

    pub fn headcount(&self) -> Option<u32> {
        self.net.weights.as_ref()?.headcount
    }

    pub fn pol_headcount(&self) -> Option<u32> {
        self.net.weights.as_ref()?.pol_headcount
    }

    // ==================== Pass-through metadata ====================

    pub fn license(&self) -> Option<&str> {
        self.net.license.as_deref()
    }

    pub fn set_license(&mut self, license: impl Into<String>) {
        self.net.license = Some(license.into());
    }

    pub fn training_params(&self) -> Option<&TrainingParams> {
        self.net.training_params.as_ref()
    }

    pub fn training_params_mut(&mut self) -> &mut TrainingParams {
        self.net.training_params.get_or_insert_with(TrainingParams::default)
    }

    // ==================== Weights ====================

    fn weights_mut(&mut self) -> &mut Weights {
        self.net.weights.get_or_insert_with(Weights::default)
    }

    /// Number of elements in a block list.
    pub fn block_count(&self, kind: BlockKind) -> usize {
        let Some(weights) = self.net.weights.as_ref() else {
            return 0;
        };
        match kind {
            BlockKind::Residual => weights.residual.len(),
            BlockKind::Encoder => weights.encoder.len(),
            BlockKind::PolicyEncoder => weights.pol_encoder.len(),
        }
    }

    /// Write a layer at `location`, growing the target block list with
    /// default blocks as needed.
    ///
    /// Block indices at or above [`MAX_BLOCKS`] are rejected.
    pub fn set_field(&mut self, location: &FieldPath, layer: Layer) -> Result<()> {
        let path = location.path();
        if location.block_index().is_some_and(|index| index >= MAX_BLOCKS) {
            return Err(Error::field_not_found(location.to_string()));
        }
        let valid = match location.block_kind() {
            None => Weights::has_path(path),
            Some(BlockKind::Residual) => Residual::has_path(path),
            Some(BlockKind::Encoder | BlockKind::PolicyEncoder) => EncoderLayer::has_path(path),
        };
        if !valid {
            return Err(Error::field_not_found(location.to_string()));
        }

        let weights = self.weights_mut();
        let slot = match location.block() {
            None => weights.layer_mut(path),
            Some(block) => match block.kind {
                BlockKind::Residual => grow(&mut weights.residual, block.index).layer_mut(path),
                BlockKind::Encoder => grow(&mut weights.encoder, block.index).layer_mut(path),
                BlockKind::PolicyEncoder => {
                    grow(&mut weights.pol_encoder, block.index).layer_mut(path)
                }
            },
        };
        let slot = slot.ok_or_else(|| Error::field_not_found(location.to_string()))?;
        *slot = layer;
        Ok(())
    }

    /// Read the layer at `location`.
    ///
    /// Fails with [`Error::FieldNotFound`] if the path is not in the schema
    /// and with [`Error::TensorNotFound`] if it is but holds no layer.
    pub fn get_field(&self, location: &FieldPath) -> Result<&Layer> {
        let path = location.path();
        let weights = self.net.weights.as_ref();
        let found = match location.block() {
            None => match weights {
                Some(weights) => weights.layer(path),
                None => Weights::has_path(path).then_some(None),
            },
            Some(block) => match block.kind {
                BlockKind::Residual => lookup(
                    weights.map(|w| w.residual.as_slice()).unwrap_or_default(),
                    block.index,
                    path,
                ),
                BlockKind::Encoder => lookup(
                    weights.map(|w| w.encoder.as_slice()).unwrap_or_default(),
                    block.index,
                    path,
                ),
                BlockKind::PolicyEncoder => lookup(
                    weights.map(|w| w.pol_encoder.as_slice()).unwrap_or_default(),
                    block.index,
                    path,
                ),
            },
        };

        match found {
            Some(Some(layer)) => Ok(layer),
            Some(None) => Err(Error::TensorNotFound(location.to_string())),
            None => Err(Error::field_not_found(location.to_string())),
        }
    }

    /// Visit every set layer, with block-qualified paths such as
    /// `encoder[2].mha.q_w`.
    pub fn visit_layers(&self, visit: &mut dyn FnMut(&str, &Layer)) {
        let Some(weights) = self.net.weights.as_ref() else {
            return;
        };
        weights.visit_layers("", visit);
        for (i, block) in weights.residual.iter().enumerate() {
            block.visit_layers(&format!("residual[{}].", i), visit);
        }
        for (i, block) in weights.encoder.iter().enumerate() {
            block.visit_layers(&format!("encoder[{}].", i), visit);
        }
        for (i, block) in weights.pol_encoder.iter().enumerate() {
            block.visit_layers(&format!("pol_encoder[{}].", i), visit);
        }
    }

    // ==================== Serialization ====================

    /// Uncompressed protobuf payload.
    pub fn encode_payload(&self) -> Vec<u8> {
        self.net.encode_to_vec()
    }

    /// Length of [`Container::encode_payload`] without encoding it.
    pub fn payload_len(&self) -> usize {
        self.net.encoded_len()
    }

    /// Decode an uncompressed protobuf payload.
    pub fn decode_payload(payload: &[u8]) -> Result<Self> {
        if payload.first() == Some(&MAGIC_TAG) && payload.len() >= 5 {
            let magic = u32::from_le_bytes([payload[1], payload[2], payload[3], payload[4]]);
            if magic != WEIGHTS_MAGIC {
                return Err(Error::BadMagic {
                    expected: WEIGHTS_MAGIC,
                    actual: magic,
                });
            }
        }

        let net = Net::decode(payload)
            .map_err(|e| Error::malformed_from("protobuf decode failed", e))?;
        Self::from_net(net)
    }

    /// Encode and compress the whole container.
    pub fn serialize<C: Compressor + ?Sized>(&self, compressor: &C) -> Result<Vec<u8>> {
        let payload = self.encode_payload();
        let compressed = compressor.compress(&payload)?;
        let ratio = CompressionRatio::new(payload.len(), compressed.len());
        debug!(
            payload_bytes = ratio.original_size,
            compressed_bytes = ratio.compressed_size,
            ratio = ratio.ratio(),
            algorithm = compressor.algorithm().name(),
            "serialized container"
        );
        Ok(compressed)
    }

    /// Decompress and decode a whole container.
    pub fn parse<D: Decompressor + ?Sized>(bytes: &[u8], decompressor: &D) -> Result<Self> {
        let payload = decompressor.decompress(bytes)?;
        Self::decode_payload(&payload)
    }

    /// Rewrite the oldest classical topology to its head-format variant and
    /// fill in the head kinds those files could not express.
    fn upgrade_legacy(&mut self) {
        if self.network_structure() != NetworkStructure::Classical {
            return;
        }

        info!("upgrading legacy classical network to head-format topology");
        self.set_network_format(NetworkStructure::ClassicalWithHeadformat);
        self.set_value_format(ValueFormat::Classical);
        self.set_policy_format(PolicyFormat::Classical);
        self.set_moves_left_format(MovesLeftFormat::None);
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup<'a, T: LayerFields>(
    blocks: &'a [T],
    index: usize,
    path: &str,
) -> Option<Option<&'a Layer>> {
    match blocks.get(index) {
        Some(block) => block.layer(path),
        None => T::has_path(path).then_some(None),
    }
}

fn grow<T: Default>(blocks: &mut Vec<T>, index: usize) -> &mut T {
    if blocks.len() <= index {
        blocks.resize_with(index + 1, T::default);
    }
    &mut blocks[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::{FLOOR_MINOR, MINOR_WITH_ATTN_BODY, MINOR_WITH_MULTIHEAD};
    use furcas_core::{Codec, IdentityCodec};
    use furcas_gzip::GzipCodec;

    fn layer(min: f32, max: f32, codes: &[u16]) -> Layer {
        Layer {
            min_val: Some(min),
            max_val: Some(max),
            params: Some(codes.iter().flat_map(|c| c.to_le_bytes()).collect()),
        }
    }

    #[test]
    fn test_defaults() {
        let container = Container::new();
        assert_eq!(container.network_structure(), NetworkStructure::SeWithHeadformat);
        assert_eq!(container.input_format(), InputFormat::Classical112Plane);
        assert_eq!(container.policy_format(), PolicyFormat::Classical);
        assert_eq!(container.value_format(), ValueFormat::Classical);
        assert_eq!(container.output_format(), OutputFormat::Classical);
        assert_eq!(container.moves_left_format(), MovesLeftFormat::V1);
        assert_eq!(container.default_activation(), DefaultActivation::Relu);
        assert_eq!(container.weights_encoding(), WeightsEncoding::Linear16);
        assert_eq!(container.min_version().minor(), FLOOR_MINOR);
        assert_eq!(container.as_net().magic, Some(WEIGHTS_MAGIC));
    }

    #[test]
    fn test_with_network_folds_legacy() {
        let container = Container::with_network(NetworkStructure::Classical);
        assert_eq!(container.network_structure(), NetworkStructure::ClassicalWithHeadformat);
        let container = Container::with_network(NetworkStructure::AttentionbodyWithHeadformat);
        assert_eq!(container.min_version().minor(), MINOR_WITH_ATTN_BODY);
    }

    #[test]
    fn test_value_format_derives_output() {
        let mut container = Container::new();
        container.set_value_format(ValueFormat::Wdl);
        assert_eq!(container.output_format(), OutputFormat::Wdl);
        container.set_value_format(ValueFormat::Param);
        assert_eq!(container.output_format(), OutputFormat::Classical);
    }

    #[test]
    fn test_input_format_floors() {
        let cases = [
            (InputFormat::Classical112Plane, FLOOR_MINOR),
            (InputFormat::WithCastlingPlane, 25),
            (InputFormat::WithCanonicalization, 25),
            (InputFormat::WithCanonicalizationHectoplies, 26),
            (InputFormat::WithCanonicalizationHectopliesArmageddon, 26),
            (InputFormat::WithCanonicalizationV2, 27),
            (InputFormat::WithCanonicalizationV2Armageddon, 27),
        ];
        for (input, minor) in cases {
            let mut container = Container::new();
            container.set_input_format(input);
            assert_eq!(container.min_version().minor(), minor, "{:?}", input);
        }
    }

    #[test]
    fn test_input_format_never_lowers_version() {
        let mut container = Container::new();
        container.set_input_embedding(InputEmbeddingFormat::PeDense);
        container.set_input_format(InputFormat::WithCastlingPlane);
        assert_eq!(container.min_version().minor(), MINOR_WITH_MULTIHEAD);
        assert_eq!(
            container.as_net().min_version.as_ref().and_then(|v| v.minor),
            Some(MINOR_WITH_MULTIHEAD)
        );
    }

    #[test]
    fn test_block_auto_growth() {
        let mut container = Container::new();
        let location = FieldPath::in_block("mha.q_w", BlockKind::Encoder, 5);
        container.set_field(&location, layer(0.0, 1.0, &[1, 2])).unwrap();

        assert_eq!(container.block_count(BlockKind::Encoder), 6);
        let weights = container.as_net().weights.as_ref().unwrap();
        for block in &weights.encoder[..5] {
            assert_eq!(block, &EncoderLayer::default());
        }
        assert_eq!(container.get_field(&location).unwrap(), &layer(0.0, 1.0, &[1, 2]));
    }

    #[test]
    fn test_invalid_path_does_not_grow() {
        let mut container = Container::new();
        let location = FieldPath::in_block("mha.bogus_w", BlockKind::PolicyEncoder, 3);
        let err = container.set_field(&location, Layer::default()).unwrap_err();
        assert!(matches!(err, Error::FieldNotFound(_)));
        assert_eq!(container.block_count(BlockKind::PolicyEncoder), 0);
    }

    #[test]
    fn test_block_index_limit() {
        let mut container = Container::new();
        let last = FieldPath::in_block("ln1_gammas", BlockKind::Encoder, MAX_BLOCKS - 1);
        assert!(container.set_field(&last, Layer::default()).is_ok());

        let beyond = FieldPath::in_block("ln1_gammas", BlockKind::Encoder, 4_000_000_000);
        let err = container.set_field(&beyond, Layer::default()).unwrap_err();
        assert!(matches!(err, Error::FieldNotFound(_)));
        assert_eq!(container.block_count(BlockKind::Encoder), MAX_BLOCKS);
    }

    #[test]
    fn test_get_field_errors() {
        let container = Container::new();
        let unset = FieldPath::flat("ip_emb_w");
        assert!(matches!(container.get_field(&unset), Err(Error::TensorNotFound(_))));

        let missing_block = FieldPath::in_block("ffn.dense1_w", BlockKind::Encoder, 2);
        assert!(matches!(container.get_field(&missing_block), Err(Error::TensorNotFound(_))));

        let bogus = FieldPath::flat("policy_heads.vanilla.ip4_pol_b");
        assert!(matches!(container.get_field(&bogus), Err(Error::FieldNotFound(_))));
    }

    #[test]
    fn test_residual_blocks() {
        let mut container = Container::new();
        let location = FieldPath::in_block("conv1.weights", BlockKind::Residual, 1);
        container.set_field(&location, layer(-1.0, 1.0, &[0])).unwrap();
        assert_eq!(container.block_count(BlockKind::Residual), 2);
        assert!(container.get_field(&location).is_ok());
    }

    #[test]
    fn test_serialize_parse_roundtrip() {
        let mut container = Container::new();
        container.set_input_embedding(InputEmbeddingFormat::PeMap);
        container.set_headcount(8);
        container.training_params_mut().training_steps = Some(1200);
        container.training_params_mut().learning_rate = Some(0.02);
        container
            .set_field(&FieldPath::flat("smolgen_w"), layer(-0.5, 0.5, &[0, 65535, 32768]))
            .unwrap();
        container
            .set_field(
                &FieldPath::in_block("ffn.dense2_b", BlockKind::Encoder, 1),
                layer(0.0, 0.0, &[0, 0]),
            )
            .unwrap();

        let codec = GzipCodec::new();
        let bytes = container.serialize(&codec).unwrap();
        let parsed = Container::parse(&bytes, &codec).unwrap();

        assert_eq!(parsed, container);
        assert_eq!(parsed.headcount(), Some(8));
        assert_eq!(parsed.training_params().unwrap().training_steps, Some(1200));
        assert_eq!(parsed.min_version().minor(), MINOR_WITH_MULTIHEAD);
    }

    #[test]
    fn test_bad_magic() {
        let net = Net {
            magic: Some(0xdead),
            ..Default::default()
        };
        let payload = net.encode_to_vec();
        let err = Container::parse(&payload, &IdentityCodec).unwrap_err();
        assert!(matches!(
            err,
            Error::BadMagic {
                expected: WEIGHTS_MAGIC,
                actual: 0xdead
            }
        ));

        let err = Container::decode_payload(&[]).unwrap_err();
        assert!(matches!(err, Error::BadMagic { actual: 0, .. }));
    }

    #[test]
    fn test_malformed_payload() {
        // valid magic followed by a length-delimited field that runs off the end
        let mut payload = vec![0x0d, 0xc0, 0x01, 0x00, 0x00];
        payload.extend_from_slice(&[0x52, 0x7f, 0x01]);
        let err = Container::decode_payload(&payload).unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
    }

    #[test]
    fn test_legacy_upgrade_on_parse() {
        let mut net = Container::new().into_net();
        let flags = net
            .format
            .as_mut()
            .and_then(|f| f.network_format.as_mut())
            .unwrap();
        flags.network = Some(NetworkStructure::Classical as i32);
        flags.policy = None;
        flags.value = None;
        flags.moves_left = Some(MovesLeftFormat::V1 as i32);

        let parsed = Container::decode_payload(&net.encode_to_vec()).unwrap();
        assert_eq!(parsed.network_structure(), NetworkStructure::ClassicalWithHeadformat);
        assert_eq!(parsed.policy_format(), PolicyFormat::Classical);
        assert_eq!(parsed.value_format(), ValueFormat::Classical);
        assert_eq!(parsed.output_format(), OutputFormat::Classical);
        assert_eq!(parsed.moves_left_format(), MovesLeftFormat::None);
    }

    #[test]
    fn test_visit_layers_qualifies_blocks() {
        let mut container = Container::new();
        container
            .set_field(&FieldPath::flat("ip_emb_b"), layer(0.0, 1.0, &[3]))
            .unwrap();
        container
            .set_field(
                &FieldPath::in_block("ln2_betas", BlockKind::PolicyEncoder, 0),
                layer(0.0, 1.0, &[3]),
            )
            .unwrap();

        let mut paths = Vec::new();
        container.visit_layers(&mut |path, _| paths.push(path.to_string()));
        paths.sort();
        assert_eq!(paths, vec!["ip_emb_b", "pol_encoder[0].ln2_betas"]);
    }
}
