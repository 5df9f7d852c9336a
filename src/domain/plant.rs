use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Generation technology of a plant.
///
/// The wire names are the ones used by the production-plan API
/// (`windturbine`, `gasfired`, `turbojet`); the short forms are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum PlantKind {
    #[serde(rename = "windturbine", alias = "wind")]
    #[strum(to_string = "wind")]
    Wind,
    #[serde(rename = "gasfired", alias = "gas")]
    #[strum(to_string = "gas")]
    Gas,
    #[serde(rename = "turbojet", alias = "kerosene", alias = "kerosine")]
    #[strum(to_string = "kerosene")]
    Kerosene,
}

impl PlantKind {
    /// Variable-resource plants follow the weather instead of a dispatch set-point.
    pub fn is_variable_resource(self) -> bool {
        matches!(self, PlantKind::Wind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PlantKind,
    /// Fuel-to-electricity conversion ratio, in (0, 1]
    pub efficiency: f64,
    /// Rated minimum output (MW)
    pub pmin: f64,
    /// Rated maximum output (MW)
    pub pmax: f64,
}

impl Plant {
    pub fn new(name: impl Into<String>, kind: PlantKind, efficiency: f64, pmin: f64, pmax: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            efficiency,
            pmin,
            pmax,
        }
    }

    pub fn wind(name: impl Into<String>, pmax: f64) -> Self {
        Self::new(name, PlantKind::Wind, 1.0, 0.0, pmax)
    }

    pub fn gas(name: impl Into<String>, efficiency: f64, pmin: f64, pmax: f64) -> Self {
        Self::new(name, PlantKind::Gas, efficiency, pmin, pmax)
    }

    pub fn kerosene(name: impl Into<String>, efficiency: f64, pmin: f64, pmax: f64) -> Self {
        Self::new(name, PlantKind::Kerosene, efficiency, pmin, pmax)
    }

    /// Check the rated envelope of this plant
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("plant name cannot be empty".to_string());
        }
        if !self.efficiency.is_finite() || self.efficiency <= 0.0 || self.efficiency > 1.0 {
            return Err(format!(
                "plant '{}': efficiency must be in (0, 1], got {}",
                self.name, self.efficiency
            ));
        }
        if !self.pmin.is_finite() || !self.pmax.is_finite() {
            return Err(format!("plant '{}': capacity is not finite", self.name));
        }
        if self.pmin < 0.0 {
            return Err(format!("plant '{}': pmin cannot be negative", self.name));
        }
        if self.pmin > self.pmax {
            return Err(format!(
                "plant '{}': pmin {} exceeds pmax {}",
                self.name, self.pmin, self.pmax
            ));
        }
        Ok(())
    }
}
