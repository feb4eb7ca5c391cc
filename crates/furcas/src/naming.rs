//! Hierarchical tensor names to container field paths.
//!
//! A tensor name is a `/`-separated path such as
//! `encoder_3/mha/smolgen/hidden1_dense/kernel:0`. The first segment selects
//! an entity through a dispatch table; each entry is a pure function from the
//! remaining segments to a [`FieldPath`]. The last segment is the weight kind
//! (`kernel`, `bias`, `gamma`, `beta`, `gate`) with any `:<n>` variable suffix
//! stripped.
//!
//! | first segment      | target                                    |
//! |--------------------|-------------------------------------------|
//! | `policy`           | `policy_heads.*`, or `pol_encoder[N-1]` for `policy/encoder_<N>` |
//! | `value`            | `value_heads.<head>.*`, or the flat legacy value fields |
//! | `moves_left`       | `ip{,1,2}_mov_*`                          |
//! | `encoder_<N>`      | `encoder[N-1]` with `mha.*`, `ffn.*` or layer-norm fields |
//! | `embedding`        | `ip_emb_*`, `ip_mult_gate`, `ip_add_gate` |
//! | `smol_weight_gen`  | `smolgen_{w,b}`                           |
//!
//! Anything else is rejected; a name is never silently dropped.

use furcas_core::{Error, Result};
use furcas_proto::{BlockKind, FieldPath, MAX_BLOCKS};

/// Policy head variants present in the multi-head schema.
pub const POLICY_HEADS: [&str; 4] = ["vanilla", "soft", "optimistic_st", "opponent"];

/// Value head variants present in the multi-head schema.
pub const VALUE_HEADS: [&str; 3] = ["winner", "q", "st"];

/// Prefix of encoder block entities.
const ENCODER_PREFIX: &str = "encoder_";

type EntityMapper = fn(&NameParts<'_>) -> Result<FieldPath>;

/// How a dispatch entry matches the first segment.
#[derive(Debug, Clone, Copy)]
enum Selector {
    Exact(&'static str),
    Prefix(&'static str),
}

impl Selector {
    fn matches(self, segment: &str) -> bool {
        match self {
            Selector::Exact(name) => segment == name,
            Selector::Prefix(prefix) => segment.starts_with(prefix),
        }
    }
}

const ENTITIES: &[(Selector, EntityMapper)] = &[
    (Selector::Exact("policy"), map_policy),
    (Selector::Exact("value"), map_value),
    (Selector::Exact("moves_left"), map_moves_left),
    (Selector::Exact("embedding"), map_embedding),
    (Selector::Exact("smol_weight_gen"), map_smolgen_weights),
    (Selector::Prefix(ENCODER_PREFIX), map_encoder),
];

/// Resolve a hierarchical tensor name to its container location.
pub fn map_name(name: &str) -> Result<FieldPath> {
    let parts = NameParts::new(name);
    let entity = parts.segment(0, "layer")?;
    let (_, mapper) = ENTITIES
        .iter()
        .find(|(selector, _)| selector.matches(entity))
        .ok_or_else(|| Error::unknown_name("layer", name))?;
    mapper(&parts)
}

/// Whether a name carries batch-renorm state.
pub fn is_renorm(name: &str) -> bool {
    name.contains("renorm")
}

/// Whether a name carries an attention head count rather than weights.
pub fn is_headcount(name: &str) -> bool {
    name.contains("headcount")
}

/// Segments of one tensor name.
struct NameParts<'a> {
    name: &'a str,
    segments: Vec<&'a str>,
}

impl<'a> NameParts<'a> {
    fn new(name: &'a str) -> Self {
        Self {
            name,
            segments: name.split('/').collect(),
        }
    }

    fn segment(&self, index: usize, entity: &'static str) -> Result<&'a str> {
        self.segments
            .get(index)
            .copied()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| self.reject(entity))
    }

    /// Segment with its `:<n>` variable suffix removed.
    fn stripped(&self, index: usize, entity: &'static str) -> Result<&'a str> {
        Ok(strip_suffix(self.segment(index, entity)?))
    }

    /// Weight kind from the last segment.
    fn kind(&self) -> &'a str {
        strip_suffix(self.segments.last().copied().unwrap_or_default())
    }

    fn reject(&self, entity: &'static str) -> Error {
        Error::unknown_name(entity, self.name)
    }

    /// `w` for kernels, `b` for biases.
    fn dense_kind(&self, entity: &'static str) -> Result<&'static str> {
        match self.kind() {
            "kernel" => Ok("w"),
            "bias" => Ok("b"),
            _ => Err(self.reject(entity)),
        }
    }

    /// `gammas` / `betas` for layer norms.
    fn norm_kind(&self, entity: &'static str) -> Result<&'static str> {
        match self.kind() {
            "gamma" => Ok("gammas"),
            "beta" => Ok("betas"),
            _ => Err(self.reject(entity)),
        }
    }
}

fn strip_suffix(segment: &str) -> &str {
    segment.split(':').next().unwrap_or(segment)
}

fn block_index(entity: &str, parts: &NameParts<'_>) -> Result<usize> {
    entity
        .strip_prefix(ENCODER_PREFIX)
        .and_then(|n| n.parse::<usize>().ok())
        .and_then(|n| n.checked_sub(1))
        .filter(|&index| index < MAX_BLOCKS)
        .ok_or_else(|| parts.reject("encoder"))
}

// ==================== Heads ====================

fn map_policy(parts: &NameParts<'_>) -> Result<FieldPath> {
    let head = parts.segment(1, "policy")?;

    if head.starts_with(ENCODER_PREFIX) {
        let index = block_index(head, parts)?;
        let path = encoder_body(parts, 2)?;
        return Ok(FieldPath::in_block(path, BlockKind::PolicyEncoder, index));
    }

    if head == "embedding" {
        let kind = parts.dense_kind("policy")?;
        return Ok(FieldPath::flat(format!("policy_heads.ip_pol_{}", kind)));
    }

    if !POLICY_HEADS.contains(&head) {
        return Err(parts.reject("policy"));
    }
    if parts.segment(2, "policy")? != "attention" {
        return Err(parts.reject("policy"));
    }

    let slot = match parts.segment(3, "attn_policy")? {
        "wq" => 2,
        "wk" => 3,
        "ppo" => 4,
        _ => return Err(parts.reject("attn_policy")),
    };
    let kind = parts.dense_kind("attn_policy")?;
    Ok(FieldPath::flat(format!(
        "policy_heads.{}.ip{}_pol_{}",
        head, slot, kind
    )))
}

fn map_value(parts: &NameParts<'_>) -> Result<FieldPath> {
    let head = parts.segment(1, "value")?;
    let prefix = if VALUE_HEADS.contains(&head) {
        format!("value_heads.{}.", head)
    } else {
        String::new()
    };

    let kind = parts.dense_kind("value")?;
    let field = match parts.segment(2, "value")? {
        "dense_error" => format!("ip_val_err_{}", kind),
        "dense_cat" => format!("ip_val_cat_{}", kind),
        "embedding" => format!("ip_val_{}", kind),
        "dense1" => format!("ip1_val_{}", kind),
        "dense2" => format!("ip2_val_{}", kind),
        _ => return Err(parts.reject("value")),
    };
    Ok(FieldPath::flat(prefix + &field))
}

fn map_moves_left(parts: &NameParts<'_>) -> Result<FieldPath> {
    let slot = match parts.segment(1, "moves_left")? {
        "embedding" => "",
        "dense1" => "1",
        "dense2" => "2",
        _ => return Err(parts.reject("moves_left")),
    };
    let kind = parts.dense_kind("moves_left")?;
    Ok(FieldPath::flat(format!("ip{}_mov_{}", slot, kind)))
}

// ==================== Body ====================

fn map_encoder(parts: &NameParts<'_>) -> Result<FieldPath> {
    let index = block_index(parts.segment(0, "encoder")?, parts)?;
    let path = encoder_body(parts, 1)?;
    Ok(FieldPath::in_block(path, BlockKind::Encoder, index))
}

/// Path inside one encoder layer, starting at segment `at`.
fn encoder_body(parts: &NameParts<'_>, at: usize) -> Result<String> {
    match parts.segment(at, "encoder")? {
        "mha" => Ok(format!("mha.{}", mha_field(parts, at + 1)?)),
        "ffn" => Ok(format!("ffn.{}", ffn_field(parts, at + 1)?)),
        norm => Ok(format!("{}_{}", norm, parts.norm_kind("encoder")?)),
    }
}

fn mha_field(parts: &NameParts<'_>, at: usize) -> Result<String> {
    let role = parts.stripped(at, "mha")?;
    match role {
        "smolgen" => Ok(format!("smolgen.{}", smolgen_field(parts, at + 1)?)),
        "quantize_1" => Ok("s1".to_string()),
        "quantize_2" => Ok("s2".to_string()),
        _ if role.starts_with("rpe") => Ok(role.to_string()),
        _ if role.starts_with("dense") => Ok(format!("dense_{}", parts.dense_kind("mha")?)),
        _ => match role.strip_prefix('w') {
            Some(projection @ ("q" | "k" | "v")) => {
                Ok(format!("{}_{}", projection, parts.dense_kind("mha")?))
            }
            _ => Err(parts.reject("mha")),
        },
    }
}

fn smolgen_field(parts: &NameParts<'_>, at: usize) -> Result<String> {
    const ENTITY: &str = "mha smolgen";
    match parts.segment(at, ENTITY)? {
        "compress" if parts.kind() == "kernel" => Ok("compress".to_string()),
        "hidden1_dense" => Ok(format!("dense1_{}", parts.dense_kind(ENTITY)?)),
        "hidden1_ln" => Ok(format!("ln1_{}", parts.norm_kind(ENTITY)?)),
        "gen_from" => Ok(format!("dense2_{}", parts.dense_kind(ENTITY)?)),
        "gen_from_ln" => Ok(format!("ln2_{}", parts.norm_kind(ENTITY)?)),
        _ => Err(parts.reject(ENTITY)),
    }
}

fn ffn_field(parts: &NameParts<'_>, at: usize) -> Result<String> {
    match parts.segment(at, "ffn")? {
        "quantize_1" => Ok("s1".to_string()),
        "quantize_2" => Ok("s2".to_string()),
        layer => Ok(format!("{}_{}", layer, parts.dense_kind("ffn")?)),
    }
}

// ==================== Input embedding ====================

fn map_embedding(parts: &NameParts<'_>) -> Result<FieldPath> {
    let part = parts.segment(1, "embedding")?;
    let path = match strip_suffix(part) {
        "kernel" => "ip_emb_w".to_string(),
        "bias" => "ip_emb_b".to_string(),
        "ffn" => format!("ip_emb_ffn.{}", ffn_field(parts, 2)?),
        "ln" | "ffn_ln" => format!("ip_emb_{}_{}", part, parts.norm_kind("embedding")?),
        "preprocess" => format!("ip_emb_preproc_{}", parts.dense_kind("embedding")?),
        "mult_gate" | "add_gate" => {
            if parts.stripped(2, "embedding")? != "gate" {
                return Err(parts.reject("embedding"));
            }
            format!("ip_{}", part)
        }
        _ => return Err(parts.reject("embedding")),
    };
    Ok(FieldPath::flat(path))
}

fn map_smolgen_weights(parts: &NameParts<'_>) -> Result<FieldPath> {
    let kind = parts.dense_kind("smol_weight_gen")?;
    Ok(FieldPath::flat(format!("smolgen_{}", kind)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(name: &str) -> String {
        let location = map_name(name).unwrap();
        assert_eq!(location.block(), None, "{}", name);
        location.path().to_string()
    }

    fn block(name: &str) -> (String, BlockKind, usize) {
        let location = map_name(name).unwrap();
        let block = location.block().unwrap();
        (location.path().to_string(), block.kind, block.index)
    }

    #[test]
    fn test_encoder_query_kernel() {
        let location = map_name("encoder_1/mha/wq/kernel:0").unwrap();
        assert_eq!(location.path(), "mha.q_w");
        assert_eq!(location.block_kind(), Some(BlockKind::Encoder));
        assert_eq!(location.block_index(), Some(0));
    }

    #[test]
    fn test_unknown_name_rejected() {
        let err = map_name("bogus/unknown/path").unwrap_err();
        assert!(matches!(err, Error::UnknownName { entity: "layer", .. }));
        assert!(err.to_string().contains("bogus/unknown/path"));
    }

    #[test]
    fn test_encoder_body() {
        assert_eq!(
            block("encoder_12/mha/smolgen/hidden1_ln/gamma:0"),
            ("mha.smolgen.ln1_gammas".to_string(), BlockKind::Encoder, 11)
        );
        assert_eq!(block("encoder_2/mha/smolgen/compress/kernel:0").0, "mha.smolgen.compress");
        assert_eq!(block("encoder_2/mha/smolgen/gen_from/bias:0").0, "mha.smolgen.dense2_b");
        assert_eq!(block("encoder_2/mha/dense/kernel:0").0, "mha.dense_w");
        assert_eq!(block("encoder_2/mha/wv/bias:0").0, "mha.v_b");
        assert_eq!(block("encoder_2/mha/rpe_q:0").0, "mha.rpe_q");
        assert_eq!(block("encoder_2/mha/quantize_2/s:0").0, "mha.s2");
        assert_eq!(block("encoder_2/ffn/dense1/kernel:0").0, "ffn.dense1_w");
        assert_eq!(block("encoder_2/ffn/quantize_1/s:0").0, "ffn.s1");
        assert_eq!(block("encoder_2/ln2/beta:0").0, "ln2_betas");
    }

    #[test]
    fn test_encoder_index_bounds() {
        assert!(map_name("encoder_0/ln1/gamma:0").is_err());
        assert_eq!(block("encoder_1024/ln1/gamma:0").2, MAX_BLOCKS - 1);
        let err = map_name("encoder_1025/ln1/gamma:0").unwrap_err();
        assert!(matches!(err, Error::UnknownName { entity: "encoder", .. }));
        assert!(map_name("encoder_4000000000/ln1/gamma:0").is_err());
    }

    #[test]
    fn test_policy_heads() {
        assert_eq!(flat("policy/embedding/kernel:0"), "policy_heads.ip_pol_w");
        assert_eq!(
            flat("policy/vanilla/attention/wq/kernel:0"),
            "policy_heads.vanilla.ip2_pol_w"
        );
        assert_eq!(
            flat("policy/optimistic_st/attention/ppo/kernel:0"),
            "policy_heads.optimistic_st.ip4_pol_w"
        );
        assert_eq!(
            flat("policy/opponent/attention/wk/bias:0"),
            "policy_heads.opponent.ip3_pol_b"
        );
        assert!(map_name("policy/next/attention/wq/kernel:0").is_err());
        assert!(map_name("policy/vanilla/attention/wz/kernel:0").is_err());
    }

    #[test]
    fn test_policy_encoder_blocks() {
        assert_eq!(
            block("policy/encoder_2/mha/wk/kernel:0"),
            ("mha.k_w".to_string(), BlockKind::PolicyEncoder, 1)
        );
    }

    #[test]
    fn test_value_heads() {
        assert_eq!(flat("value/winner/dense1/kernel:0"), "value_heads.winner.ip1_val_w");
        assert_eq!(flat("value/q/embedding/bias:0"), "value_heads.q.ip_val_b");
        assert_eq!(flat("value/st/dense_error/kernel:0"), "value_heads.st.ip_val_err_w");
        assert_eq!(flat("value/q/dense_cat/bias:0"), "value_heads.q.ip_val_cat_b");
        // unknown head names fall back to the flat legacy fields
        assert_eq!(flat("value/legacy/dense2/bias:0"), "ip2_val_b");
        assert!(map_name("value/q/dense3/kernel:0").is_err());
    }

    #[test]
    fn test_moves_left() {
        assert_eq!(flat("moves_left/embedding/kernel:0"), "ip_mov_w");
        assert_eq!(flat("moves_left/dense2/bias:0"), "ip2_mov_b");
        assert!(map_name("moves_left/conv/kernel:0").is_err());
    }

    #[test]
    fn test_embedding() {
        assert_eq!(flat("embedding/kernel:0"), "ip_emb_w");
        assert_eq!(flat("embedding/bias:0"), "ip_emb_b");
        assert_eq!(flat("embedding/preprocess/kernel:0"), "ip_emb_preproc_w");
        assert_eq!(flat("embedding/ln/gamma:0"), "ip_emb_ln_gammas");
        assert_eq!(flat("embedding/ffn_ln/beta:0"), "ip_emb_ffn_ln_betas");
        assert_eq!(flat("embedding/ffn/dense2/bias:0"), "ip_emb_ffn.dense2_b");
        assert_eq!(flat("embedding/mult_gate/gate:0"), "ip_mult_gate");
        assert_eq!(flat("embedding/add_gate/gate:0"), "ip_add_gate");
        assert!(map_name("embedding/add_gate/kernel:0").is_err());
    }

    #[test]
    fn test_smolgen_weights() {
        assert_eq!(flat("smol_weight_gen/kernel:0"), "smolgen_w");
        assert_eq!(flat("smol_weight_gen/bias:0"), "smolgen_b");
    }

    #[test]
    fn test_malformed_names() {
        for name in [
            "",
            "encoder_0/mha/wq/kernel:0",
            "encoder_x/mha/wq/kernel:0",
            "encoder_1",
            "encoder_1/mha/wq/gamma:0",
            "encoder_1/ln1/kernel:0",
            "encoder_1/mha/smolgen/compress/bias:0",
            "policy",
            "value/q",
        ] {
            let err = map_name(name).unwrap_err();
            assert!(matches!(err, Error::UnknownName { .. }), "{}: {}", name, err);
        }
    }

    #[test]
    fn test_exclusion_patterns() {
        assert!(is_renorm("encoder_1/ln1/renorm_mean:0"));
        assert!(is_headcount("encoder_1/mha/headcount:0"));
        assert!(!is_renorm("encoder_1/ln1/gamma:0"));
    }
}
