//! Files written by older tooling.

use furcas::{export, file, import, Container, ImportOptions, Tensor, TensorRequest};
use furcas_proto::{
    InputFormat, MovesLeftFormat, NetworkStructure, OutputFormat, PolicyFormat, ValueFormat,
};

const INPUTS: usize = 112;
const OUTPUTS: usize = 4;

#[test]
fn test_classical_network_upgraded_on_load() {
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

    let container = Container::from_net(net).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = file::save(&container, dir.path().join("old")).unwrap();
    let loaded = file::load(path).unwrap();

    assert_eq!(
        loaded.network_structure(),
        NetworkStructure::ClassicalWithHeadformat
    );
    assert_eq!(loaded.policy_format(), PolicyFormat::Classical);
    assert_eq!(loaded.value_format(), ValueFormat::Classical);
    assert_eq!(loaded.output_format(), OutputFormat::Classical);
    assert_eq!(loaded.moves_left_format(), MovesLeftFormat::None);
}

#[test]
fn test_legacy_input_rescale_survives_file() {
    let mut container = Container::new();
    container.set_input_format(InputFormat::WithCastlingPlane);
    assert!(container.is_legacy_input());

    let kernel = Tensor::new(vec![INPUTS, OUTPUTS], vec![9.9; INPUTS * OUTPUTS]).unwrap();
    export(
        &mut container,
        &[("embedding/kernel:0".to_string(), kernel.clone())],
    )
    .unwrap();

    let bytes = file::to_bytes(&container).unwrap();
    let loaded = file::from_bytes(&bytes).unwrap();
    let request = [TensorRequest::new("embedding/kernel:0", [INPUTS, OUTPUTS])];

    let stored = import(&loaded, &request, &ImportOptions::default()).unwrap();
    let stored = &stored["embedding/kernel:0"];
    for out in 0..OUTPUTS {
        let v = stored.data()[109 * OUTPUTS + out];
        assert!((v - 0.1).abs() < 1e-4, "{}", v);
    }

    let options = ImportOptions::default().with_legacy_rescale_undone();
    let restored = import(&loaded, &request, &options).unwrap();
    for (e, a) in kernel.data().iter().zip(restored["embedding/kernel:0"].data()) {
        assert!((e - a).abs() < 1e-3, "expected {}, got {}", e, a);
    }
}
