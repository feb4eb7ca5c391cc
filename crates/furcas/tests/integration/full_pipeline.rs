//! Export, save, load and import of a small attention-body network.

use std::collections::BTreeMap;

use furcas::{
    export, file, import, BlockKind, ContainerStats, Error, ImportOptions, NetConfig, Tensor,
    TensorRequest,
};
use furcas_proto::{NetworkStructure, PolicyFormat, ValueFormat};

fn weights(shape: &[usize], seed: f32) -> Tensor {
    let size: usize = shape.iter().product();
    let data = (0..size)
        .map(|i| ((i as f32 + seed) * 0.37).sin() * 0.5)
        .collect();
    Tensor::new(shape.to_vec(), data).unwrap()
}

fn model() -> Vec<(String, Tensor)> {
    let mut tensors = vec![
        ("embedding/kernel:0".to_string(), weights(&[112, 16], 1.0)),
        ("embedding/bias:0".to_string(), weights(&[16], 2.0)),
        ("policy/embedding/kernel:0".to_string(), weights(&[16, 16], 3.0)),
        (
            "policy/vanilla/attention/wq/kernel:0".to_string(),
            weights(&[16, 16], 4.0),
        ),
        ("value/winner/dense1/kernel:0".to_string(), weights(&[16, 8], 5.0)),
        ("value/winner/dense2/bias:0".to_string(), weights(&[3], 6.0)),
        ("moves_left/dense1/kernel:0".to_string(), weights(&[16, 8], 7.0)),
        ("smol_weight_gen/kernel:0".to_string(), weights(&[4, 64], 8.0)),
    ];
    for layer in 1..=2 {
        let seed = layer as f32 * 10.0;
        tensors.push((
            format!("encoder_{}/mha/wq/kernel:0", layer),
            weights(&[16, 16], seed),
        ));
        tensors.push((
            format!("encoder_{}/mha/smolgen/compress/kernel:0", layer),
            weights(&[16, 4], seed + 1.0),
        ));
        tensors.push((
            format!("encoder_{}/ffn/dense1/kernel:0", layer),
            weights(&[16, 32], seed + 2.0),
        ));
        tensors.push((format!("encoder_{}/ln1/gamma:0", layer), weights(&[16], seed + 3.0)));
        tensors.push((format!("encoder_{}/mha/headcount:0", layer), Tensor::from_vec(vec![2.0])));
    }
    tensors
}

fn config() -> NetConfig {
    NetConfig::from_json(
        r#"{
            "input_type": "canonical_v2",
            "default_activation": "mish",
            "encoder_layers": 2,
            "encoder_heads": 2,
            "smolgen_activation": "swish",
            "license": "GPL-3.0"
        }"#,
    )
    .unwrap()
}

fn requests(tensors: &[(String, Tensor)]) -> Vec<TensorRequest> {
    tensors
        .iter()
        .map(|(name, tensor)| TensorRequest::new(name.as_str(), tensor.shape()))
        .collect()
}

fn assert_close(name: &str, expected: &Tensor, actual: &Tensor) {
    assert_eq!(expected.shape(), actual.shape(), "{}", name);
    let (lo, hi) = expected
        .data()
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let tolerance = (hi - lo) / 65535.0 + 1e-6;
    for (i, (e, a)) in expected.data().iter().zip(actual.data()).enumerate() {
        assert!(
            (e - a).abs() <= tolerance,
            "{}[{}]: expected {}, got {}",
            name,
            i,
            e,
            a
        );
    }
}

#[test]
fn test_roundtrip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let tensors = model();

    let mut container = config().build_container().unwrap();
    let written = export(&mut container, &tensors).unwrap();
    // head counts are metadata, not layers
    assert_eq!(written, tensors.len() - 2);

    let path = file::save(&container, dir.path().join("net")).unwrap();
    assert!(path.to_string_lossy().ends_with("net.pb.gz"));

    let loaded = file::load(&path).unwrap();
    assert_eq!(loaded, container);
    assert_eq!(
        loaded.network_structure(),
        NetworkStructure::AttentionbodyWithMultiheadformat
    );
    assert_eq!(loaded.license(), Some("GPL-3.0"));

    let options = ImportOptions::default()
        .with_expected_policy(PolicyFormat::Attention)
        .with_expected_value(ValueFormat::Wdl);
    let restored = import(&loaded, &requests(&tensors), &options).unwrap();

    let expected: BTreeMap<_, _> = tensors
        .iter()
        .filter(|(name, _)| !name.contains("headcount"))
        .cloned()
        .collect();
    assert_eq!(restored.len(), expected.len());
    for (name, tensor) in &expected {
        assert_close(name, tensor, &restored[name]);
    }
}

#[test]
fn test_stats_after_export() {
    let mut container = config().build_container().unwrap();
    export(&mut container, &model()).unwrap();

    let stats = ContainerStats::collect(&container);
    assert_eq!(stats.encoder_blocks, 2);
    assert_eq!(stats.residual_blocks, 0);
    assert_eq!(stats.headcount, Some(2));
    assert_eq!(stats.layers, model().len() - 2);
    assert_eq!(container.block_count(BlockKind::Encoder), 2);
}

#[test]
fn test_unknown_tensor_aborts_export() {
    let mut tensors = model();
    tensors.push(("optimizer/momentum:0".to_string(), Tensor::from_vec(vec![0.0])));

    let mut container = config().build_container().unwrap();
    let err = export(&mut container, &tensors).unwrap_err();
    assert!(matches!(err, Error::Unmapped { ref name, .. } if name == "optimizer/momentum:0"));
}

#[test]
fn test_tolerant_import_skips_absent_tensors() {
    let mut container = config().build_container().unwrap();
    export(&mut container, &model()[..2]).unwrap();

    let requests = [
        TensorRequest::new("embedding/bias:0", [16]),
        TensorRequest::new("encoder_3/ffn/dense2/bias:0", [16]),
    ];
    assert!(import(&container, &requests, &ImportOptions::default()).is_err());

    let restored = import(&container, &requests, &ImportOptions::tolerant()).unwrap();
    assert_eq!(restored.keys().collect::<Vec<_>>(), ["embedding/bias:0"]);
}

#[test]
fn test_garbage_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.pb.gz");
    std::fs::write(&path, b"not a weight file").unwrap();

    let err = file::load(&path).unwrap_err();
    assert!(err.is_format_error(), "{}", err);
}
