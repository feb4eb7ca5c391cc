//! Furcas weight file tool
//!
//! ## Usage
//!
//! ```bash
//! # Summarize a weight file
//! furcas inspect nets/run1.pb.gz
//!
//! # Rewrite an old file with upgraded format flags
//! furcas upgrade old.pb.gz new.pb.gz
//!
//! # Pack a JSON tensor dump into a weight file
//! furcas export --config model.json --tensors weights.json nets/run1
//!
//! # Restore tensors as JSON
//! furcas import nets/run1.pb.gz --requests requests.json --output restored.json
//! ```
//!
//! Tensor dumps are JSON arrays of `{"name", "shape", "data"}` objects;
//! request files are arrays of `{"name", "shape"}`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use furcas::{
    export, file, import, ContainerStats, ImportOptions, NetConfig, Tensor, TensorRequest,
};
use furcas_proto::{PolicyFormat, ValueFormat};

#[derive(Parser, Debug)]
#[command(name = "furcas")]
#[command(author = "Daemoniorum LLC")]
#[command(version)]
#[command(about = "Furcas weight file tool", long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a summary of a weight file
    Inspect {
        /// Weight file
        file: PathBuf,
    },

    /// Load a weight file and write it back with upgraded format flags
    Upgrade {
        /// Input weight file
        input: PathBuf,

        /// Output path; `.pb.gz` is appended when it has no extension
        output: PathBuf,
    },

    /// Store a JSON tensor dump in a new weight file
    Export {
        /// Model format configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Tensor dump (JSON)
        #[arg(short, long)]
        tensors: PathBuf,

        /// Output path; `.pb.gz` is appended when it has no extension
        output: PathBuf,
    },

    /// Restore tensors from a weight file as a JSON dump
    Import {
        /// Weight file
        file: PathBuf,

        /// Tensor requests (JSON)
        #[arg(short, long)]
        requests: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip missing or mis-sized tensors instead of failing
        #[arg(long)]
        tolerant: bool,

        /// Multiply the legacy embedding channel back by 99
        #[arg(long)]
        undo_legacy_rescale: bool,

        /// Policy head the model expects (classical, convolution, attention)
        #[arg(long)]
        expect_policy: Option<String>,

        /// Value head the model expects (classical, wdl)
        #[arg(long)]
        expect_value: Option<String>,
    },
}

/// One tensor in a JSON dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TensorDump {
    name: String,
    shape: Vec<usize>,
    data: Vec<f32>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Inspect { file } => inspect(&file),
        Command::Upgrade { input, output } => upgrade(&input, &output),
        Command::Export {
            config,
            tensors,
            output,
        } => export_tensors(config.as_deref(), &tensors, &output),
        Command::Import {
            file,
            requests,
            output,
            tolerant,
            undo_legacy_rescale,
            expect_policy,
            expect_value,
        } => {
            let mut options = if tolerant {
                ImportOptions::tolerant()
            } else {
                ImportOptions::default()
            };
            options.undo_legacy_rescale = undo_legacy_rescale;
            if let Some(policy) = expect_policy {
                options = options.with_expected_policy(policy_format(policy)?);
            }
            if let Some(value) = expect_value {
                options = options.with_expected_value(value_format(value)?);
            }
            import_tensors(&file, &requests, output.as_deref(), &options)
        }
    }
}

fn inspect(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let container = file::load(path)?;
    let file_bytes = std::fs::metadata(path)?.len();
    let stats = ContainerStats::collect(&container).with_file_size(usize::try_from(file_bytes)?);
    println!("{}", stats);
    Ok(())
}

fn upgrade(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let container = file::load(input)?;
    let written = file::save(&container, output)?;
    info!(
        from = %input.display(),
        to = %written.display(),
        min_version = %container.min_version(),
        "upgraded weights"
    );
    Ok(())
}

fn export_tensors(
    config: Option<&Path>,
    tensors: &Path,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => NetConfig::from_file(path)?,
        None => NetConfig::default(),
    };
    let tensors = read_dump(tensors)?;

    let mut container = config.build_container()?;
    export(&mut container, &tensors)?;
    file::save(&container, output)?;
    Ok(())
}

fn import_tensors(
    path: &Path,
    requests: &Path,
    output: Option<&Path>,
    options: &ImportOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let container = file::load(path)?;
    let requests: Vec<TensorRequest> = serde_json::from_str(&std::fs::read_to_string(requests)?)?;

    let restored = import(&container, &requests, options)?;
    let json = serde_json::to_string(&to_dump(restored))?;
    match output {
        Some(output) => std::fs::write(output, json)?,
        None => println!("{}", json),
    }
    Ok(())
}

fn read_dump(path: &Path) -> Result<Vec<(String, Tensor)>, Box<dyn std::error::Error>> {
    let dump: Vec<TensorDump> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    let tensors = dump
        .into_iter()
        .map(|t| Tensor::new(t.shape, t.data).map(|tensor| (t.name, tensor)))
        .collect::<furcas::Result<Vec<_>>>()?;
    Ok(tensors)
}

fn to_dump(tensors: BTreeMap<String, Tensor>) -> Vec<TensorDump> {
    tensors
        .into_iter()
        .map(|(name, tensor)| TensorDump {
            name,
            shape: tensor.shape().to_vec(),
            data: tensor.into_data(),
        })
        .collect()
}

fn policy_format(name: String) -> furcas::Result<PolicyFormat> {
    NetConfig {
        policy: name,
        ..NetConfig::default()
    }
    .policy_format()
}

fn value_format(name: String) -> furcas::Result<ValueFormat> {
    NetConfig {
        value: name,
        ..NetConfig::default()
    }
    .value_format()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "furcas",
            "import",
            "net.pb.gz",
            "--requests",
            "req.json",
            "--tolerant",
            "--expect-value",
            "wdl",
        ])
        .unwrap();
        match args.command {
            Command::Import {
                tolerant,
                undo_legacy_rescale,
                expect_value,
                ..
            } => {
                assert!(tolerant);
                assert!(!undo_legacy_rescale);
                assert_eq!(expect_value.as_deref(), Some("wdl"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_head_names() {
        assert_eq!(policy_format("attention".into()).unwrap(), PolicyFormat::Attention);
        assert_eq!(value_format("classical".into()).unwrap(), ValueFormat::Classical);
        assert!(value_format("param".into()).is_err());
    }

    #[test]
    fn test_export_then_import() {
        let dir = tempfile::tempdir().unwrap();
        let dump = vec![TensorDump {
            name: "embedding/bias:0".to_string(),
            shape: vec![3],
            data: vec![0.0, 1.0, 0.0],
        }];
        let tensors = dir.path().join("weights.json");
        std::fs::write(&tensors, serde_json::to_string(&dump).unwrap()).unwrap();
        let requests = dir.path().join("requests.json");
        std::fs::write(&requests, r#"[{"name": "embedding/bias:0", "shape": [3]}]"#).unwrap();

        export_tensors(None, &tensors, &dir.path().join("net")).unwrap();

        let restored = dir.path().join("restored.json");
        import_tensors(
            &dir.path().join("net.pb.gz"),
            &requests,
            Some(&restored),
            &ImportOptions::default(),
        )
        .unwrap();

        let restored: Vec<TensorDump> =
            serde_json::from_str(&std::fs::read_to_string(restored).unwrap()).unwrap();
        assert_eq!(restored, dump);
        inspect(&dir.path().join("net.pb.gz")).unwrap();
    }
}
