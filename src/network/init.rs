use rand::distributions::Uniform;
use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};

/// Range weights are drawn from, uniformly and inclusively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightInit {
    pub min: f64,
    pub max: f64,
}

impl WeightInit {
    pub fn new(min: f64, max: f64) -> Result<WeightInit> {
        WeightInit { min, max }.validated()
    }

    pub fn validated(self) -> Result<WeightInit> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(NetError::InvalidHyperparameter(format!(
                "weight range [{}, {}] is empty or not finite",
                self.min, self.max
            )));
        }
        Ok(self)
    }

    pub(crate) fn distribution(&self) -> Uniform<f64> {
        Uniform::new_inclusive(self.min, self.max)
    }
}

impl Default for WeightInit {
    fn default() -> Self {
        WeightInit { min: -0.5, max: 0.5 }
    }
}
