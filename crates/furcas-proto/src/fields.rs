//! Dotted field-path addressing of layers inside the schema.
//!
//! A field path such as `mha.smolgen.dense1_w` walks nested messages by name
//! and ends at a [`Layer`]. Block-list elements are addressed separately (see
//! [`FieldPath`]), so paths never contain indices.

use std::fmt;

use crate::schema::{
    ConvBlock, EncoderLayer, Ffn, Layer, Mha, PolicyHead, PolicyHeads, Residual, SeUnit, Smolgen,
    ValueHead, ValueHeads, Weights,
};

/// Upper bound on the length of any block list.
pub const MAX_BLOCKS: usize = 1024;

/// Which repeated block list a field lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `weights.residual[]`
    Residual,
    /// `weights.encoder[]`
    Encoder,
    /// `weights.pol_encoder[]`
    PolicyEncoder,
}

impl BlockKind {
    /// Name of the block list in the schema.
    pub fn list_name(self) -> &'static str {
        match self {
            BlockKind::Residual => "residual",
            BlockKind::Encoder => "encoder",
            BlockKind::PolicyEncoder => "pol_encoder",
        }
    }
}

/// Element of a block list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockRef {
    pub kind: BlockKind,
    pub index: usize,
}

/// Location of one layer: a field path, optionally inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    path: String,
    block: Option<BlockRef>,
}

impl FieldPath {
    /// Path into the flat `Weights` record.
    pub fn flat(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            block: None,
        }
    }

    /// Path into element `index` of the given block list.
    pub fn in_block(path: impl Into<String>, kind: BlockKind, index: usize) -> Self {
        Self {
            path: path.into(),
            block: Some(BlockRef { kind, index }),
        }
    }

    /// Dotted path within the record.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Block the path is relative to, if any.
    pub fn block(&self) -> Option<BlockRef> {
        self.block
    }

    /// Block kind, if the path is inside a block list.
    pub fn block_kind(&self) -> Option<BlockKind> {
        self.block.map(|b| b.kind)
    }

    /// Block index, if the path is inside a block list.
    pub fn block_index(&self) -> Option<usize> {
        self.block.map(|b| b.index)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.block {
            Some(block) => write!(f, "{}[{}].{}", block.kind.list_name(), block.index, self.path),
            None => f.write_str(&self.path),
        }
    }
}

/// Name-addressable access to the layers of a schema message.
pub trait LayerFields: Default {
    /// Whether `path` names a layer in this message's schema.
    fn has_path(path: &str) -> bool;

    /// Layer at `path`.
    ///
    /// `None` if the path is not in the schema, `Some(None)` if it is but the
    /// layer is unset.
    fn layer(&self, path: &str) -> Option<Option<&Layer>>;

    /// Mutable layer at `path`, creating it and any intermediate messages.
    ///
    /// Returns `None` without touching `self` if the path is not in the schema.
    fn layer_mut(&mut self, path: &str) -> Option<&mut Layer>;

    /// Visit every set layer with its dotted path.
    fn visit_layers(&self, prefix: &str, visit: &mut dyn FnMut(&str, &Layer));
}

fn split_path(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}

macro_rules! layer_fields {
    (
        $ty:ty {
            layers: [$($leaf:ident),* $(,)?],
            nested: [$($child:ident: $child_ty:ty),* $(,)?] $(,)?
        }
    ) => {
        impl LayerFields for $ty {
            fn has_path(path: &str) -> bool {
                match split_path(path) {
                    $((stringify!($leaf), None) => true,)*
                    $((stringify!($child), Some(rest)) => <$child_ty>::has_path(rest),)*
                    _ => false,
                }
            }

            fn layer(&self, path: &str) -> Option<Option<&Layer>> {
                match split_path(path) {
                    $((stringify!($leaf), None) => Some(self.$leaf.as_ref()),)*
                    $((stringify!($child), Some(rest)) => match self.$child.as_ref() {
                        Some(child) => child.layer(rest),
                        None => <$child_ty>::has_path(rest).then_some(None),
                    },)*
                    _ => None,
                }
            }

            fn layer_mut(&mut self, path: &str) -> Option<&mut Layer> {
                match split_path(path) {
                    $((stringify!($leaf), None) => Some(self.$leaf.get_or_insert_with(Layer::default)),)*
                    $((stringify!($child), Some(rest)) => {
                        if !<$child_ty>::has_path(rest) {
                            return None;
                        }
                        self.$child.get_or_insert_with(<$child_ty>::default).layer_mut(rest)
                    })*
                    _ => None,
                }
            }

            #[allow(unused_variables)]
            fn visit_layers(&self, prefix: &str, visit: &mut dyn FnMut(&str, &Layer)) {
                $(if let Some(layer) = self.$leaf.as_ref() {
                    visit(&format!("{}{}", prefix, stringify!($leaf)), layer);
                })*
                $(if let Some(child) = self.$child.as_ref() {
                    child.visit_layers(&format!("{}{}.", prefix, stringify!($child)), visit);
                })*
            }
        }
    };
}

layer_fields!(ConvBlock {
    layers: [weights, biases, bn_means, bn_stddivs, bn_gammas, bn_betas],
    nested: [],
});

layer_fields!(SeUnit {
    layers: [w1, b1, w2, b2],
    nested: [],
});

layer_fields!(Residual {
    layers: [],
    nested: [conv1: ConvBlock, conv2: ConvBlock, se: SeUnit],
});

layer_fields!(Smolgen {
    layers: [
        compress, dense1_w, dense1_b, ln1_gammas, ln1_betas, dense2_w, dense2_b, ln2_gammas,
        ln2_betas,
    ],
    nested: [],
});

layer_fields!(Mha {
    layers: [q_w, q_b, k_w, k_b, v_w, v_b, dense_w, dense_b, rpe_q, rpe_k, rpe_v, s1, s2],
    nested: [smolgen: Smolgen],
});

layer_fields!(Ffn {
    layers: [dense1_w, dense1_b, dense2_w, dense2_b, s1, s2],
    nested: [],
});

layer_fields!(EncoderLayer {
    layers: [ln1_gammas, ln1_betas, ln2_gammas, ln2_betas],
    nested: [mha: Mha, ffn: Ffn],
});

layer_fields!(PolicyHead {
    layers: [ip_pol_w, ip_pol_b, ip2_pol_w, ip2_pol_b, ip3_pol_w, ip3_pol_b, ip4_pol_w],
    nested: [policy1: ConvBlock, policy: ConvBlock],
});

layer_fields!(ValueHead {
    layers: [
        ip_val_w, ip_val_b, ip1_val_w, ip1_val_b, ip2_val_w, ip2_val_b, ip_val_err_w,
        ip_val_err_b, ip_val_cat_w, ip_val_cat_b,
    ],
    nested: [value: ConvBlock],
});

layer_fields!(PolicyHeads {
    layers: [ip_pol_w, ip_pol_b],
    nested: [
        vanilla: PolicyHead,
        optimistic_st: PolicyHead,
        soft: PolicyHead,
        opponent: PolicyHead,
    ],
});

layer_fields!(ValueHeads {
    layers: [],
    nested: [winner: ValueHead, q: ValueHead, st: ValueHead],
});

layer_fields!(Weights {
    layers: [
        ip_emb_preproc_w, ip_emb_preproc_b, ip_emb_w, ip_emb_b, ip_emb_ln_gammas, ip_emb_ln_betas,
        ip_mult_gate, ip_add_gate, ip_emb_ffn_ln_gammas, ip_emb_ffn_ln_betas,
        ip_pol_w, ip_pol_b, ip2_pol_w, ip2_pol_b, ip3_pol_w, ip3_pol_b, ip4_pol_w,
        ip_val_w, ip_val_b, ip1_val_w, ip1_val_b, ip2_val_w, ip2_val_b,
        ip_mov_w, ip_mov_b, ip1_mov_w, ip1_mov_b, ip2_mov_w, ip2_mov_b,
        smolgen_w, smolgen_b,
    ],
    nested: [
        input: ConvBlock,
        ip_emb_ffn: Ffn,
        policy1: ConvBlock,
        policy: ConvBlock,
        value: ConvBlock,
        value_heads: ValueHeads,
        policy_heads: PolicyHeads,
        moves_left: ConvBlock,
    ],
});
