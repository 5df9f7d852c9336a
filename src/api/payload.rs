use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::{FuelPrices, LoadRequest, Plant, PlantKind};

/// Body of `POST /productionplan` and `POST /productionplanlinprog`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoadPayload {
    #[validate(range(min = 0.0))]
    pub load: f64,
    #[validate(nested)]
    pub fuels: FuelsPayload,
    #[validate(nested)]
    pub powerplants: Vec<PowerplantPayload>,
}

/// Market conditions, keyed with their units as the API publishes them
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FuelsPayload {
    #[serde(rename = "gas(euro/MWh)", alias = "gas")]
    #[validate(range(min = 0.0))]
    pub gas: f64,
    #[serde(rename = "kerosine(euro/MWh)", alias = "kerosine", alias = "kerosene")]
    #[validate(range(min = 0.0))]
    pub kerosine: f64,
    #[serde(rename = "co2(euro/ton)", alias = "co2")]
    #[validate(range(min = 0.0))]
    pub co2: f64,
    #[serde(rename = "wind(%)", alias = "wind")]
    #[validate(range(max = 100))]
    pub wind: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_capacity"))]
pub struct PowerplantPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PlantKind,
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub efficiency: f64,
    #[validate(range(min = 0.0))]
    pub pmin: f64,
    #[validate(range(min = 0.0))]
    pub pmax: f64,
}

fn validate_capacity(plant: &PowerplantPayload) -> Result<(), ValidationError> {
    if plant.pmin > plant.pmax {
        let mut err = ValidationError::new("pmin_exceeds_pmax");
        err.message = Some(
            format!(
                "plant '{}': pmin {} exceeds pmax {}",
                plant.name, plant.pmin, plant.pmax
            )
            .into(),
        );
        return Err(err);
    }
    Ok(())
}

impl From<PowerplantPayload> for Plant {
    fn from(p: PowerplantPayload) -> Self {
        Plant::new(p.name, p.kind, p.efficiency, p.pmin, p.pmax)
    }
}

impl From<FuelsPayload> for FuelPrices {
    fn from(f: FuelsPayload) -> Self {
        FuelPrices {
            gas_price: f.gas,
            kerosene_price: f.kerosine,
            co2_price: f.co2,
            // range-checked by `Validate`, saturate rather than wrap if it was skipped
            wind_availability: u8::try_from(f.wind.min(100)).unwrap_or(100),
        }
    }
}

impl From<LoadPayload> for LoadRequest {
    fn from(payload: LoadPayload) -> Self {
        LoadRequest::new(
            payload.load,
            payload.fuels.into(),
            payload.powerplants.into_iter().map(Plant::from).collect(),
        )
    }
}
