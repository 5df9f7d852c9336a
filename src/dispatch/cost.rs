use crate::domain::{FuelPrices, Plant, PlantKind};

/// Tons of CO2 charged per MWh of kerosene burnt
pub const CO2_CONVERSION_FACTOR: f64 = 0.3;

/// Cost of producing one MWh of electricity with `plant` (currency/MWh).
///
/// Wind is free. Thermal plants pay their fuel price scaled by efficiency;
/// kerosene additionally carries the carbon price as a per-MWh fuel surcharge.
pub fn unit_cost(plant: &Plant, fuels: &FuelPrices) -> f64 {
    match plant.kind {
        PlantKind::Wind => 0.0,
        PlantKind::Gas => fuels.gas_price / plant.efficiency,
        PlantKind::Kerosene => {
            (fuels.kerosene_price + CO2_CONVERSION_FACTOR * fuels.co2_price) / plant.efficiency
        }
    }
}
