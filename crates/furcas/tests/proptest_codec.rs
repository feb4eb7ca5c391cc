//! Property-based tests for quantization and name mapping.
//!
//! These tests verify that:
//! - Quantized values stay within one code step of the input
//! - Layout transposition is undone exactly
//! - Encoder names resolve deterministically to their block index
//!
//! Run with: cargo test --test proptest_codec

use proptest::prelude::*;

use furcas::{dequantize, export, import, map_name, quantize, Container, ImportOptions};
use furcas::{BlockKind, Tensor, TensorRequest};
use furcas_proto::InputFormat;

/// Strategy for a small dense or convolution shape.
fn shape_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop_oneof![
        prop::collection::vec(1usize..6, 1),
        prop::collection::vec(1usize..6, 2),
        prop::collection::vec(1usize..4, 4),
    ]
}

/// Strategy for a tensor with finite, moderately sized values.
fn tensor_strategy() -> impl Strategy<Value = Tensor> {
    shape_strategy().prop_flat_map(|shape| {
        let size: usize = shape.iter().product();
        prop::collection::vec(-8.0f32..8.0f32, size)
            .prop_map(move |data| Tensor::new(shape.clone(), data).unwrap())
    })
}

fn span(data: &[f32]) -> f32 {
    let lo = data.iter().copied().fold(f32::MAX, f32::min);
    let hi = data.iter().copied().fold(f32::MIN, f32::max);
    hi - lo
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        max_shrink_iters: 100,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_quantize_error_bounded(data in prop::collection::vec(-100.0f32..100.0f32, 2..256)) {
        let decoded = dequantize(&quantize(&data)).unwrap();
        prop_assert_eq!(decoded.len(), data.len());

        let tolerance = span(&data) / 65535.0 + 1e-4;
        for (original, restored) in data.iter().zip(&decoded) {
            prop_assert!((original - restored).abs() <= tolerance);
        }
    }

    #[test]
    fn prop_storage_layout_inverts(tensor in tensor_strategy()) {
        let stored = tensor.to_storage_layout().unwrap();
        let restored = Tensor::from_storage_layout(tensor.shape(), stored.into_data()).unwrap();
        prop_assert_eq!(restored, tensor);
    }

    #[test]
    fn prop_encoder_index(layer in 1usize..512, gamma in any::<bool>()) {
        let kind = if gamma { "gamma" } else { "beta" };
        let name = format!("encoder_{}/ln1/{}:0", layer, kind);

        let first = map_name(&name).unwrap();
        prop_assert_eq!(&first, &map_name(&name).unwrap());
        prop_assert_eq!(first.block_kind(), Some(BlockKind::Encoder));
        prop_assert_eq!(first.block_index(), Some(layer - 1));
    }

    #[test]
    fn prop_export_import_shape(tensor in tensor_strategy()) {
        let mut container = Container::new();
        container.set_input_format(InputFormat::WithCanonicalizationV2);
        let name = "encoder_1/ffn/dense1/kernel:0";
        export(&mut container, &[(name.to_string(), tensor.clone())]).unwrap();

        let request = TensorRequest::new(name, tensor.shape());
        let restored = import(&container, &[request], &ImportOptions::default()).unwrap();
        let restored = &restored[name];
        prop_assert_eq!(restored.shape(), tensor.shape());

        let tolerance = span(tensor.data()) / 65535.0 + 1e-5;
        for (original, value) in tensor.data().iter().zip(restored.data()) {
            prop_assert!((original - value).abs() <= tolerance);
        }
    }
}
