//! Protobuf schema of the weights container.
//!
//! Field numbers follow the historical `net.proto` so that files written by
//! older tooling decode unchanged. All fields are proto2 `optional`; an unset
//! layer is distinct from an empty one.
//!
//! ```text
//! Net
//!  ├─ magic            fixed32   (1)
//!  ├─ license          string    (2)
//!  ├─ min_version      EngineVersion (3)
//!  ├─ format           Format    (4)
//!  │   └─ network_format NetworkFormat (2)
//!  ├─ training_params  TrainingParams (5)
//!  └─ weights          Weights   (10)
//!      ├─ residual[]     (2)
//!      ├─ pol_encoder[]  (21)
//!      └─ encoder[]      (27)
//! ```

// ==================== Closed enumerations ====================
//
// Integer encodings are part of the file format and must never be renumbered.

/// Encoding of the layer payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum WeightsEncoding {
    Unknown = 0,
    Linear16 = 1,
}

impl WeightsEncoding {
    /// Schema name of the value.
    pub fn name(self) -> &'static str {
        match self {
            WeightsEncoding::Unknown => "UNKNOWN",
            WeightsEncoding::Linear16 => "LINEAR16",
        }
    }
}

/// Input plane layout expected by the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum InputFormat {
    Unknown = 0,
    Classical112Plane = 1,
    WithCastlingPlane = 2,
    WithCanonicalization = 3,
    WithCanonicalizationHectoplies = 4,
    WithCanonicalizationV2 = 5,
    WithCanonicalizationHectopliesArmageddon = 132,
    WithCanonicalizationV2Armageddon = 133,
}

impl InputFormat {
    /// Schema name of the value.
    pub fn name(self) -> &'static str {
        match self {
            InputFormat::Unknown => "INPUT_UNKNOWN",
            InputFormat::Classical112Plane => "INPUT_CLASSICAL_112_PLANE",
            InputFormat::WithCastlingPlane => "INPUT_112_WITH_CASTLING_PLANE",
            InputFormat::WithCanonicalization => "INPUT_112_WITH_CANONICALIZATION",
            InputFormat::WithCanonicalizationHectoplies => {
                "INPUT_112_WITH_CANONICALIZATION_HECTOPLIES"
            }
            InputFormat::WithCanonicalizationV2 => "INPUT_112_WITH_CANONICALIZATION_V2",
            InputFormat::WithCanonicalizationHectopliesArmageddon => {
                "INPUT_112_WITH_CANONICALIZATION_HECTOPLIES_ARMAGEDDON"
            }
            InputFormat::WithCanonicalizationV2Armageddon => {
                "INPUT_112_WITH_CANONICALIZATION_V2_ARMAGEDDON"
            }
        }
    }
}

/// Kind of value the search receives from the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum OutputFormat {
    Unknown = 0,
    Classical = 1,
    Wdl = 2,
}

impl OutputFormat {
    /// Schema name of the value.
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Unknown => "OUTPUT_UNKNOWN",
            OutputFormat::Classical => "OUTPUT_CLASSICAL",
            OutputFormat::Wdl => "OUTPUT_WDL",
        }
    }
}

/// Body topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum NetworkStructure {
    Unknown = 0,
    /// Oldest topology; files carry no head format sub-fields.
    Classical = 1,
    Se = 2,
    ClassicalWithHeadformat = 3,
    SeWithHeadformat = 4,
    Onnx = 5,
    AttentionbodyWithHeadformat = 6,
    AttentionbodyWithMultiheadformat = 7,
    AbLegacyWithMultiheadformat = 134,
}

impl NetworkStructure {
    /// Schema name of the value.
    pub fn name(self) -> &'static str {
        match self {
            NetworkStructure::Unknown => "NETWORK_UNKNOWN",
            NetworkStructure::Classical => "NETWORK_CLASSICAL",
            NetworkStructure::Se => "NETWORK_SE",
            NetworkStructure::ClassicalWithHeadformat => "NETWORK_CLASSICAL_WITH_HEADFORMAT",
            NetworkStructure::SeWithHeadformat => "NETWORK_SE_WITH_HEADFORMAT",
            NetworkStructure::Onnx => "NETWORK_ONNX",
            NetworkStructure::AttentionbodyWithHeadformat => {
                "NETWORK_ATTENTIONBODY_WITH_HEADFORMAT"
            }
            NetworkStructure::AttentionbodyWithMultiheadformat => {
                "NETWORK_ATTENTIONBODY_WITH_MULTIHEADFORMAT"
            }
            NetworkStructure::AbLegacyWithMultiheadformat => {
                "NETWORK_AB_LEGACY_WITH_MULTIHEADFORMAT"
            }
        }
    }
}

/// Policy head kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum PolicyFormat {
    Unknown = 0,
    Classical = 1,
    Convolution = 2,
    Attention = 3,
}

impl PolicyFormat {
    /// Schema name of the value.
    pub fn name(self) -> &'static str {
        match self {
            PolicyFormat::Unknown => "POLICY_UNKNOWN",
            PolicyFormat::Classical => "POLICY_CLASSICAL",
            PolicyFormat::Convolution => "POLICY_CONVOLUTION",
            PolicyFormat::Attention => "POLICY_ATTENTION",
        }
    }
}

/// Value head kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ValueFormat {
    Unknown = 0,
    Classical = 1,
    Wdl = 2,
    Param = 3,
}

impl ValueFormat {
    /// Schema name of the value.
    pub fn name(self) -> &'static str {
        match self {
            ValueFormat::Unknown => "VALUE_UNKNOWN",
            ValueFormat::Classical => "VALUE_CLASSICAL",
            ValueFormat::Wdl => "VALUE_WDL",
            ValueFormat::Param => "VALUE_PARAM",
        }
    }
}

/// Moves-left head kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum MovesLeftFormat {
    None = 0,
    V1 = 1,
}

impl MovesLeftFormat {
    /// Schema name of the value.
    pub fn name(self) -> &'static str {
        match self {
            MovesLeftFormat::None => "MOVES_LEFT_NONE",
            MovesLeftFormat::V1 => "MOVES_LEFT_V1",
        }
    }
}

/// Activation used by a specific sub-network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ActivationFunction {
    Default = 0,
    Mish = 1,
    Relu = 2,
    None = 3,
    Tanh = 4,
    Sigmoid = 5,
    Selu = 6,
    Swish = 7,
    Relu2 = 8,
    Softmax = 9,
}

impl ActivationFunction {
    /// Schema name of the value.
    pub fn name(self) -> &'static str {
        match self {
            ActivationFunction::Default => "ACTIVATION_DEFAULT",
            ActivationFunction::Mish => "ACTIVATION_MISH",
            ActivationFunction::Relu => "ACTIVATION_RELU",
            ActivationFunction::None => "ACTIVATION_NONE",
            ActivationFunction::Tanh => "ACTIVATION_TANH",
            ActivationFunction::Sigmoid => "ACTIVATION_SIGMOID",
            ActivationFunction::Selu => "ACTIVATION_SELU",
            ActivationFunction::Swish => "ACTIVATION_SWISH",
            ActivationFunction::Relu2 => "ACTIVATION_RELU_2",
            ActivationFunction::Softmax => "ACTIVATION_SOFTMAX",
        }
    }

    /// Parse a training-config activation name.
    ///
    /// Unrecognised names map to [`ActivationFunction::None`], matching how
    /// the trainer treats a missing activation.
    pub fn from_config_name(name: &str) -> Self {
        match name {
            "relu" => ActivationFunction::Relu,
            "tanh" => ActivationFunction::Tanh,
            "sigmoid" => ActivationFunction::Sigmoid,
            "softmax" => ActivationFunction::Softmax,
            "selu" => ActivationFunction::Selu,
            "mish" => ActivationFunction::Mish,
            "swish" => ActivationFunction::Swish,
            "relu_2" | "sqrrelu" => ActivationFunction::Relu2,
            "default" => ActivationFunction::Default,
            _ => ActivationFunction::None,
        }
    }
}

/// Activation used wherever a sub-network does not name its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum DefaultActivation {
    Relu = 0,
    Mish = 1,
}

impl DefaultActivation {
    /// Schema name of the value.
    pub fn name(self) -> &'static str {
        match self {
            DefaultActivation::Relu => "DEFAULT_ACTIVATION_RELU",
            DefaultActivation::Mish => "DEFAULT_ACTIVATION_MISH",
        }
    }
}

/// Positional encoding used by the input embedding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum InputEmbeddingFormat {
    None = 0,
    PeMap = 1,
    PeDense = 2,
}

impl InputEmbeddingFormat {
    /// Schema name of the value.
    pub fn name(self) -> &'static str {
        match self {
            InputEmbeddingFormat::None => "INPUT_EMBEDDING_NONE",
            InputEmbeddingFormat::PeMap => "INPUT_EMBEDDING_PE_MAP",
            InputEmbeddingFormat::PeDense => "INPUT_EMBEDDING_PE_DENSE",
        }
    }
}

// ==================== Header messages ====================

/// Minimum reader version.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EngineVersion {
    #[prost(uint32, optional, tag = "1")]
    pub major: Option<u32>,
    #[prost(uint32, optional, tag = "2")]
    pub minor: Option<u32>,
    #[prost(uint32, optional, tag = "3")]
    pub patch: Option<u32>,
}

/// Architecture-format flags.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NetworkFormat {
    #[prost(enumeration = "InputFormat", optional, tag = "1")]
    pub input: Option<i32>,
    #[prost(enumeration = "OutputFormat", optional, tag = "2")]
    pub output: Option<i32>,
    #[prost(enumeration = "NetworkStructure", optional, tag = "3")]
    pub network: Option<i32>,
    #[prost(enumeration = "PolicyFormat", optional, tag = "4")]
    pub policy: Option<i32>,
    #[prost(enumeration = "ValueFormat", optional, tag = "5")]
    pub value: Option<i32>,
    #[prost(enumeration = "MovesLeftFormat", optional, tag = "6")]
    pub moves_left: Option<i32>,
    #[prost(enumeration = "DefaultActivation", optional, tag = "7")]
    pub default_activation: Option<i32>,
    #[prost(enumeration = "ActivationFunction", optional, tag = "8")]
    pub smolgen_activation: Option<i32>,
    #[prost(enumeration = "ActivationFunction", optional, tag = "9")]
    pub ffn_activation: Option<i32>,
    #[prost(enumeration = "InputEmbeddingFormat", optional, tag = "10")]
    pub input_embedding: Option<i32>,
}

/// Payload encoding plus architecture flags.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Format {
    #[prost(enumeration = "WeightsEncoding", optional, tag = "1")]
    pub weights_encoding: Option<i32>,
    #[prost(message, optional, tag = "2")]
    pub network_format: Option<NetworkFormat>,
}

/// Opaque trainer metadata, carried verbatim.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TrainingParams {
    #[prost(uint32, optional, tag = "1")]
    pub training_steps: Option<u32>,
    #[prost(float, optional, tag = "2")]
    pub learning_rate: Option<f32>,
    #[prost(float, optional, tag = "3")]
    pub mse_loss: Option<f32>,
    #[prost(float, optional, tag = "4")]
    pub policy_loss: Option<f32>,
    #[prost(float, optional, tag = "5")]
    pub accuracy: Option<f32>,
    #[prost(string, optional, tag = "6")]
    pub lc0_params: Option<String>,
}

// ==================== Weight messages ====================

/// One quantized tensor: an affine range plus packed little-endian u16 codes.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Layer {
    #[prost(float, optional, tag = "1")]
    pub min_val: Option<f32>,
    #[prost(float, optional, tag = "2")]
    pub max_val: Option<f32>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub params: Option<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConvBlock {
    #[prost(message, optional, tag = "1")]
    pub weights: Option<Layer>,
    #[prost(message, optional, tag = "2")]
    pub biases: Option<Layer>,
    #[prost(message, optional, tag = "3")]
    pub bn_means: Option<Layer>,
    #[prost(message, optional, tag = "4")]
    pub bn_stddivs: Option<Layer>,
    #[prost(message, optional, tag = "5")]
    pub bn_gammas: Option<Layer>,
    #[prost(message, optional, tag = "6")]
    pub bn_betas: Option<Layer>,
}

/// Squeeze-excitation unit.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SeUnit {
    #[prost(message, optional, tag = "1")]
    pub w1: Option<Layer>,
    #[prost(message, optional, tag = "2")]
    pub b1: Option<Layer>,
    #[prost(message, optional, tag = "3")]
    pub w2: Option<Layer>,
    #[prost(message, optional, tag = "4")]
    pub b2: Option<Layer>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Residual {
    #[prost(message, optional, tag = "1")]
    pub conv1: Option<ConvBlock>,
    #[prost(message, optional, tag = "2")]
    pub conv2: Option<ConvBlock>,
    #[prost(message, optional, tag = "3")]
    pub se: Option<SeUnit>,
}

/// Attention-logit generator.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Smolgen {
    #[prost(message, optional, tag = "1")]
    pub compress: Option<Layer>,
    #[prost(message, optional, tag = "2")]
    pub dense1_w: Option<Layer>,
    #[prost(message, optional, tag = "3")]
    pub dense1_b: Option<Layer>,
    #[prost(message, optional, tag = "4")]
    pub ln1_gammas: Option<Layer>,
    #[prost(message, optional, tag = "5")]
    pub ln1_betas: Option<Layer>,
    #[prost(message, optional, tag = "6")]
    pub dense2_w: Option<Layer>,
    #[prost(message, optional, tag = "7")]
    pub dense2_b: Option<Layer>,
    #[prost(message, optional, tag = "8")]
    pub ln2_gammas: Option<Layer>,
    #[prost(message, optional, tag = "9")]
    pub ln2_betas: Option<Layer>,
}

/// Multi-head attention.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Mha {
    #[prost(message, optional, tag = "1")]
    pub q_w: Option<Layer>,
    #[prost(message, optional, tag = "2")]
    pub q_b: Option<Layer>,
    #[prost(message, optional, tag = "3")]
    pub k_w: Option<Layer>,
    #[prost(message, optional, tag = "4")]
    pub k_b: Option<Layer>,
    #[prost(message, optional, tag = "5")]
    pub v_w: Option<Layer>,
    #[prost(message, optional, tag = "6")]
    pub v_b: Option<Layer>,
    #[prost(message, optional, tag = "7")]
    pub dense_w: Option<Layer>,
    #[prost(message, optional, tag = "8")]
    pub dense_b: Option<Layer>,
    #[prost(message, optional, tag = "9")]
    pub smolgen: Option<Smolgen>,
    #[prost(message, optional, tag = "10")]
    pub rpe_q: Option<Layer>,
    #[prost(message, optional, tag = "11")]
    pub rpe_k: Option<Layer>,
    #[prost(message, optional, tag = "12")]
    pub rpe_v: Option<Layer>,
    /// Input step size of the first activation quantizer.
    #[prost(message, optional, tag = "13")]
    pub s1: Option<Layer>,
    /// Input step size of the second activation quantizer.
    #[prost(message, optional, tag = "14")]
    pub s2: Option<Layer>,
}

/// Position-wise feed-forward block.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Ffn {
    #[prost(message, optional, tag = "1")]
    pub dense1_w: Option<Layer>,
    #[prost(message, optional, tag = "2")]
    pub dense1_b: Option<Layer>,
    #[prost(message, optional, tag = "3")]
    pub dense2_w: Option<Layer>,
    #[prost(message, optional, tag = "4")]
    pub dense2_b: Option<Layer>,
    #[prost(message, optional, tag = "5")]
    pub s1: Option<Layer>,
    #[prost(message, optional, tag = "6")]
    pub s2: Option<Layer>,
}

/// One transformer encoder layer.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EncoderLayer {
    #[prost(message, optional, tag = "1")]
    pub mha: Option<Mha>,
    #[prost(message, optional, tag = "2")]
    pub ln1_gammas: Option<Layer>,
    #[prost(message, optional, tag = "3")]
    pub ln1_betas: Option<Layer>,
    #[prost(message, optional, tag = "4")]
    pub ffn: Option<Ffn>,
    #[prost(message, optional, tag = "5")]
    pub ln2_gammas: Option<Layer>,
    #[prost(message, optional, tag = "6")]
    pub ln2_betas: Option<Layer>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PolicyHead {
    #[prost(message, optional, tag = "1")]
    pub ip_pol_w: Option<Layer>,
    #[prost(message, optional, tag = "2")]
    pub ip_pol_b: Option<Layer>,
    #[prost(message, optional, tag = "3")]
    pub ip2_pol_w: Option<Layer>,
    #[prost(message, optional, tag = "4")]
    pub ip2_pol_b: Option<Layer>,
    #[prost(message, optional, tag = "5")]
    pub ip3_pol_w: Option<Layer>,
    #[prost(message, optional, tag = "6")]
    pub ip3_pol_b: Option<Layer>,
    #[prost(message, optional, tag = "7")]
    pub ip4_pol_w: Option<Layer>,
    #[prost(message, repeated, tag = "8")]
    pub pol_encoder: Vec<EncoderLayer>,
    #[prost(uint32, optional, tag = "9")]
    pub pol_headcount: Option<u32>,
    #[prost(message, optional, tag = "10")]
    pub policy1: Option<ConvBlock>,
    #[prost(message, optional, tag = "11")]
    pub policy: Option<ConvBlock>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ValueHead {
    #[prost(message, optional, tag = "1")]
    pub ip_val_w: Option<Layer>,
    #[prost(message, optional, tag = "2")]
    pub ip_val_b: Option<Layer>,
    #[prost(message, optional, tag = "3")]
    pub ip1_val_w: Option<Layer>,
    #[prost(message, optional, tag = "4")]
    pub ip1_val_b: Option<Layer>,
    #[prost(message, optional, tag = "5")]
    pub ip2_val_w: Option<Layer>,
    #[prost(message, optional, tag = "6")]
    pub ip2_val_b: Option<Layer>,
    #[prost(message, optional, tag = "7")]
    pub ip_val_err_w: Option<Layer>,
    #[prost(message, optional, tag = "8")]
    pub ip_val_err_b: Option<Layer>,
    #[prost(message, optional, tag = "9")]
    pub ip_val_cat_w: Option<Layer>,
    #[prost(message, optional, tag = "10")]
    pub ip_val_cat_b: Option<Layer>,
    #[prost(message, optional, tag = "11")]
    pub value: Option<ConvBlock>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PolicyHeads {
    #[prost(message, optional, tag = "1")]
    pub ip_pol_w: Option<Layer>,
    #[prost(message, optional, tag = "2")]
    pub ip_pol_b: Option<Layer>,
    #[prost(message, optional, tag = "3")]
    pub vanilla: Option<PolicyHead>,
    #[prost(message, optional, tag = "4")]
    pub optimistic_st: Option<PolicyHead>,
    #[prost(message, optional, tag = "5")]
    pub soft: Option<PolicyHead>,
    #[prost(message, optional, tag = "6")]
    pub opponent: Option<PolicyHead>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ValueHeads {
    #[prost(message, optional, tag = "1")]
    pub winner: Option<ValueHead>,
    #[prost(message, optional, tag = "2")]
    pub q: Option<ValueHead>,
    #[prost(message, optional, tag = "3")]
    pub st: Option<ValueHead>,
}

/// Flat weight fields plus the three block lists.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Weights {
    // Input convnet
    #[prost(message, optional, tag = "1")]
    pub input: Option<ConvBlock>,
    #[prost(message, repeated, tag = "2")]
    pub residual: Vec<Residual>,

    // Input embedding for attention bodies
    #[prost(message, optional, tag = "37")]
    pub ip_emb_preproc_w: Option<Layer>,
    #[prost(message, optional, tag = "38")]
    pub ip_emb_preproc_b: Option<Layer>,
    #[prost(message, optional, tag = "25")]
    pub ip_emb_w: Option<Layer>,
    #[prost(message, optional, tag = "26")]
    pub ip_emb_b: Option<Layer>,
    #[prost(message, optional, tag = "39")]
    pub ip_emb_ln_gammas: Option<Layer>,
    #[prost(message, optional, tag = "40")]
    pub ip_emb_ln_betas: Option<Layer>,
    #[prost(message, optional, tag = "33")]
    pub ip_mult_gate: Option<Layer>,
    #[prost(message, optional, tag = "34")]
    pub ip_add_gate: Option<Layer>,
    #[prost(message, optional, tag = "41")]
    pub ip_emb_ffn: Option<Ffn>,
    #[prost(message, optional, tag = "42")]
    pub ip_emb_ffn_ln_gammas: Option<Layer>,
    #[prost(message, optional, tag = "43")]
    pub ip_emb_ffn_ln_betas: Option<Layer>,

    // Encoder stack
    #[prost(message, repeated, tag = "27")]
    pub encoder: Vec<EncoderLayer>,
    #[prost(uint32, optional, tag = "28")]
    pub headcount: Option<u32>,

    // Policy encoder stack
    #[prost(message, repeated, tag = "21")]
    pub pol_encoder: Vec<EncoderLayer>,
    #[prost(uint32, optional, tag = "24")]
    pub pol_headcount: Option<u32>,

    // Legacy single policy head
    #[prost(message, optional, tag = "11")]
    pub policy1: Option<ConvBlock>,
    #[prost(message, optional, tag = "3")]
    pub policy: Option<ConvBlock>,
    #[prost(message, optional, tag = "4")]
    pub ip_pol_w: Option<Layer>,
    #[prost(message, optional, tag = "5")]
    pub ip_pol_b: Option<Layer>,
    #[prost(message, optional, tag = "17")]
    pub ip2_pol_w: Option<Layer>,
    #[prost(message, optional, tag = "18")]
    pub ip2_pol_b: Option<Layer>,
    #[prost(message, optional, tag = "19")]
    pub ip3_pol_w: Option<Layer>,
    #[prost(message, optional, tag = "20")]
    pub ip3_pol_b: Option<Layer>,
    #[prost(message, optional, tag = "22")]
    pub ip4_pol_w: Option<Layer>,

    // Legacy single value head
    #[prost(message, optional, tag = "6")]
    pub value: Option<ConvBlock>,
    #[prost(message, optional, tag = "29")]
    pub ip_val_w: Option<Layer>,
    #[prost(message, optional, tag = "30")]
    pub ip_val_b: Option<Layer>,
    #[prost(message, optional, tag = "7")]
    pub ip1_val_w: Option<Layer>,
    #[prost(message, optional, tag = "8")]
    pub ip1_val_b: Option<Layer>,
    #[prost(message, optional, tag = "9")]
    pub ip2_val_w: Option<Layer>,
    #[prost(message, optional, tag = "10")]
    pub ip2_val_b: Option<Layer>,

    // Multi-head formats
    #[prost(message, optional, tag = "44")]
    pub value_heads: Option<ValueHeads>,
    #[prost(message, optional, tag = "45")]
    pub policy_heads: Option<PolicyHeads>,

    // Moves left head
    #[prost(message, optional, tag = "12")]
    pub moves_left: Option<ConvBlock>,
    #[prost(message, optional, tag = "31")]
    pub ip_mov_w: Option<Layer>,
    #[prost(message, optional, tag = "32")]
    pub ip_mov_b: Option<Layer>,
    #[prost(message, optional, tag = "13")]
    pub ip1_mov_w: Option<Layer>,
    #[prost(message, optional, tag = "14")]
    pub ip1_mov_b: Option<Layer>,
    #[prost(message, optional, tag = "15")]
    pub ip2_mov_w: Option<Layer>,
    #[prost(message, optional, tag = "16")]
    pub ip2_mov_b: Option<Layer>,

    // Global smolgen weights
    #[prost(message, optional, tag = "35")]
    pub smolgen_w: Option<Layer>,
    #[prost(message, optional, tag = "36")]
    pub smolgen_b: Option<Layer>,
}

/// Root container message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Net {
    #[prost(fixed32, optional, tag = "1")]
    pub magic: Option<u32>,
    #[prost(string, optional, tag = "2")]
    pub license: Option<String>,
    #[prost(message, optional, tag = "3")]
    pub min_version: Option<EngineVersion>,
    #[prost(message, optional, tag = "4")]
    pub format: Option<Format>,
    #[prost(message, optional, tag = "5")]
    pub training_params: Option<TrainingParams>,
    #[prost(message, optional, tag = "10")]
    pub weights: Option<Weights>,
}
