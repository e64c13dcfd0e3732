//! Versioned parameter files.
//!
//! A file is a JSON object:
//!
//! ```json
//! {
//!   "format": "sigmoid-nn",
//!   "version": 1,
//!   "sizes": [2, 3, 1],
//!   "layers": [ { "biases": [..], "weights": [[..], ..] }, .. ],
//!   "success_rate": 0.75
//! }
//! ```
//!
//! `layers[i]` holds network layer `i + 1`, biases before weights, weights
//! row-major (one row per neuron of that layer). `success_rate` is absent or
//! `null` when the network was not evaluated; negative values are read the
//! same way.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};
use tracing::info;

use crate::error::{NetError, Result};
use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;
use crate::network::network::Network;

pub const FORMAT_TAG: &str = "sigmoid-nn";
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ParameterFile {
    format: String,
    version: u32,
    sizes: Vec<usize>,
    layers: Vec<LayerRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    success_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LayerRecord {
    biases: Vec<f64>,
    weights: Vec<Vec<f64>>,
}

/// A restored network plus the success rate recorded alongside it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedNetwork {
    pub network: Network,
    pub success_rate: Option<f64>,
}

impl Network {
    /// Writes the parameters to `path`, replacing any existing file.
    ///
    /// Parameters that are not all finite cannot be represented in JSON and
    /// fail with `NonFinite` before anything touches the disk.
    ///
    /// The data lands in a sibling `.partial` file first and is renamed into
    /// place only once fully written; on failure the partial file is removed.
    pub fn save(&self, path: impl AsRef<Path>, success_rate: Option<f64>) -> Result<()> {
        let path = path.as_ref();
        let record = self.record(success_rate)?;
        let partial = partial_path(path);
        let written = write_record(&partial, &record)
            .and_then(|_| fs::rename(&partial, path));
        if let Err(e) = written {
            let _ = fs::remove_file(&partial);
            return Err(NetError::Io(e));
        }

        info!(path = %path.display(), sizes = ?self.sizes(), ?success_rate, "saved network parameters");
        Ok(())
    }

    /// Reads a file written by [`Network::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<SavedNetwork> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let record: ParameterFile = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| NetError::CorruptFile(format!("{}: {e}", path.display())))?;
        let saved = restore(record)
            .map_err(|e| match e {
                NetError::CorruptFile(msg) => NetError::CorruptFile(format!("{}: {msg}", path.display())),
                other => other,
            })?;

        info!(path = %path.display(), sizes = ?saved.network.sizes(), "loaded network parameters");
        Ok(saved)
    }

    /// Restores only the network from a parameter file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Network> {
        Ok(Network::load(path)?.network)
    }

    /// Serializes the parameters to a JSON string in the file format.
    pub fn to_json(&self, success_rate: Option<f64>) -> Result<String> {
        serde_json::to_string(&self.record(success_rate)?).map_err(|e| NetError::Io(e.into()))
    }

    /// Parses a JSON string in the file format.
    pub fn from_json(json: &str) -> Result<SavedNetwork> {
        let record: ParameterFile = serde_json::from_str(json)
            .map_err(|e| NetError::CorruptFile(e.to_string()))?;
        restore(record)
    }

    fn record(&self, success_rate: Option<f64>) -> Result<ParameterFile> {
        let finite = self.layers().iter()
            .all(|l| l.biases.iter().chain(l.weights.iter()).all(|x| x.is_finite()));
        if !finite {
            return Err(NetError::NonFinite("network parameters"));
        }
        if success_rate.is_some_and(|r| !r.is_finite()) {
            return Err(NetError::NonFinite("success rate"));
        }
        Ok(ParameterFile {
            format: FORMAT_TAG.to_string(),
            version: FORMAT_VERSION,
            sizes: self.sizes().to_vec(),
            layers: self.layers().iter()
                .map(|l| LayerRecord { biases: l.biases.clone(), weights: l.weights.data.clone() })
                .collect(),
            success_rate: success_rate.filter(|r| *r >= 0.0),
        })
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

fn write_record(path: &Path, record: &ParameterFile) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, record)?;
    writer.flush()?;
    writer.get_ref().sync_all()
}

fn restore(record: ParameterFile) -> Result<SavedNetwork> {
    if record.format != FORMAT_TAG {
        return Err(NetError::CorruptFile(format!("unknown format tag {:?}", record.format)));
    }
    if record.version == 0 || record.version > FORMAT_VERSION {
        return Err(NetError::CorruptFile(format!("unsupported version {}", record.version)));
    }
    if record.sizes.len() < 2 || record.sizes.contains(&0) {
        return Err(NetError::CorruptFile(format!("invalid layer sizes {:?}", record.sizes)));
    }
    if record.layers.len() != record.sizes.len() - 1 {
        return Err(NetError::CorruptFile(format!(
            "{} layer sizes declared but {} layers stored",
            record.sizes.len(), record.layers.len()
        )));
    }

    let mut layers = Vec::with_capacity(record.layers.len());
    for (i, (entry, shape)) in record.layers.into_iter().zip(record.sizes.windows(2)).enumerate() {
        let (input_size, size) = (shape[0], shape[1]);
        let fits = entry.biases.len() == size
            && entry.weights.len() == size
            && entry.weights.iter().all(|row| row.len() == input_size);
        if !fits {
            return Err(NetError::CorruptFile(format!(
                "layer {} does not match declared shape {size}x{input_size}",
                i + 1
            )));
        }
        let weights = Matrix::from_data(entry.weights)
            .ok_or_else(|| NetError::CorruptFile(format!("layer {} has ragged weights", i + 1)))?;
        layers.push(Layer { weights, biases: entry.biases });
    }

    let network = Network::from_layers(layers)
        .map_err(|e| NetError::CorruptFile(e.to_string()))?;
    let success_rate = record.success_rate.filter(|r| *r >= 0.0);
    Ok(SavedNetwork { network, success_rate })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed() -> Network {
        Network::from_layers(vec![
            Layer {
                weights: Matrix::from_data(vec![vec![0.1, -0.2], vec![0.3, 0.4], vec![-0.5, 0.6]]).unwrap(),
                biases: vec![0.01, 0.02, 0.03],
            },
            Layer {
                weights: Matrix::from_data(vec![vec![1.0 / 3.0, 2.0 / 7.0, -0.9]]).unwrap(),
                biases: vec![-0.125],
            },
        ]).unwrap()
    }

    #[test]
    fn json_round_trip_is_exact() {
        let net = fixed();
        let saved = Network::from_json(&net.to_json(Some(0.5)).unwrap()).unwrap();
        assert_eq!(saved.network, net);
        assert_eq!(saved.success_rate, Some(0.5));
    }

    #[test]
    fn negative_rate_means_not_evaluated() {
        let json = fixed().to_json(Some(-1.0)).unwrap();
        assert!(!json.contains("success_rate"));
        assert_eq!(Network::from_json(&json).unwrap().success_rate, None);
    }

    #[test]
    fn zero_rate_survives() {
        let json = fixed().to_json(Some(0.0)).unwrap();
        assert_eq!(Network::from_json(&json).unwrap().success_rate, Some(0.0));
    }

    #[test]
    fn inconsistent_sizes_are_corrupt() {
        let json = fixed().to_json(None).unwrap().replace("\"sizes\":[2,3,1]", "\"sizes\":[2,4,1]");
        assert!(matches!(Network::from_json(&json), Err(NetError::CorruptFile(_))));
    }

    #[test]
    fn truncated_or_foreign_input_is_corrupt() {
        let json = fixed().to_json(None).unwrap();
        assert!(matches!(Network::from_json(&json[..json.len() / 2]), Err(NetError::CorruptFile(_))));
        let foreign = json.replace(FORMAT_TAG, "other");
        assert!(matches!(Network::from_json(&foreign), Err(NetError::CorruptFile(_))));
        let future = json.replace("\"version\":1", "\"version\":99");
        assert!(matches!(Network::from_json(&future), Err(NetError::CorruptFile(_))));
    }

    #[test]
    fn non_finite_parameters_are_not_serialized() {
        let net = Network::from_layers(vec![Layer {
            weights: Matrix::from_data(vec![vec![0.5, f64::NAN]]).unwrap(),
            biases: vec![0.0],
        }]).unwrap();
        assert!(matches!(net.to_json(None), Err(NetError::NonFinite(_))));
        assert!(matches!(fixed().to_json(Some(f64::INFINITY)), Err(NetError::NonFinite(_))));
    }

    #[test]
    fn partial_path_is_a_sibling() {
        assert_eq!(partial_path(Path::new("/tmp/net.json")), PathBuf::from("/tmp/net.json.partial"));
    }
}
