//! Labeled examples and dataset files.

use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};

/// One labeled (input, expected output) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub input: Vec<f64>,
    pub expected: Vec<f64>,
}

impl Example {
    pub fn new(input: Vec<f64>, expected: Vec<f64>) -> Example {
        Example { input, expected }
    }

    /// Example whose expected output is the one-hot encoding of `class`.
    pub fn classified(input: Vec<f64>, class: usize, classes: usize) -> Result<Example> {
        Ok(Example { input, expected: one_hot(class, classes)? })
    }
}

impl From<(Vec<f64>, Vec<f64>)> for Example {
    fn from((input, expected): (Vec<f64>, Vec<f64>)) -> Example {
        Example { input, expected }
    }
}

/// Vector of `classes` zeros with a one at `class`.
pub fn one_hot(class: usize, classes: usize) -> Result<Vec<f64>> {
    if class >= classes {
        return Err(NetError::mismatch("class index", classes, class));
    }
    let mut v = vec![0.0; classes];
    v[class] = 1.0;
    Ok(v)
}

/// Reads a JSON array of `{ "input": [...], "expected": [...] }` objects.
pub fn load_examples(path: impl AsRef<Path>) -> Result<Vec<Example>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| NetError::CorruptFile(format!("{}: {e}", path.display())))
}

/// Writes examples in the format read by [`load_examples`].
pub fn save_examples(path: impl AsRef<Path>, examples: &[Example]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer(writer, examples)
        .map_err(|e| NetError::Io(e.into()))
}
