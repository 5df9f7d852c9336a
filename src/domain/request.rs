use serde::{Deserialize, Serialize};

use super::Plant;
use crate::dispatch::DispatchError;

/// Market conditions shared by every plant of a request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelPrices {
    /// Gas price (currency/MWh of fuel)
    pub gas_price: f64,
    /// Kerosene price (currency/MWh of fuel)
    pub kerosene_price: f64,
    /// CO2 allowance price (currency/ton)
    pub co2_price: f64,
    /// Share of rated wind capacity currently deliverable, in percent
    pub wind_availability: u8,
}

impl FuelPrices {
    pub fn wind_fraction(&self) -> f64 {
        f64::from(self.wind_availability) / 100.0
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.gas_price.is_finite() {
            return Err(format!("gas price is not finite: {}", self.gas_price));
        }
        if !self.kerosene_price.is_finite() {
            return Err(format!("kerosene price is not finite: {}", self.kerosene_price));
        }
        if !self.co2_price.is_finite() {
            return Err(format!("co2 price is not finite: {}", self.co2_price));
        }
        if self.wind_availability > 100 {
            return Err(format!(
                "wind availability must be between 0 and 100, got {}",
                self.wind_availability
            ));
        }
        Ok(())
    }
}

/// One dispatch request: the load to cover and the fleet to cover it with.
///
/// Plant order is meaningful, allocations come back in the same order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadRequest {
    /// Load to cover (MW)
    pub target_load: f64,
    pub fuels: FuelPrices,
    pub plants: Vec<Plant>,
}

impl LoadRequest {
    pub fn new(target_load: f64, fuels: FuelPrices, plants: Vec<Plant>) -> Self {
        Self {
            target_load,
            fuels,
            plants,
        }
    }

    /// Reject requests the dispatchers are not defined for
    pub fn validate(&self) -> Result<(), DispatchError> {
        if !self.target_load.is_finite() || self.target_load < 0.0 {
            return Err(DispatchError::Validation(format!(
                "target load must be a non-negative number, got {}",
                self.target_load
            )));
        }
        self.fuels.validate().map_err(DispatchError::Validation)?;
        for plant in &self.plants {
            plant.validate().map_err(DispatchError::Validation)?;
        }
        Ok(())
    }
}
