use crate::domain::{FuelPrices, Plant, PlantKind};

/// Solver noise below this magnitude is treated as exact
pub const NOISE_FLOOR_MW: f64 = 1e-9;

/// Feasible output interval of a plant, `[lo, hi]` in MW
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputRange {
    pub lo: f64,
    pub hi: f64,
}

impl OutputRange {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// A range that admits exactly one set-point
    pub fn fixed(value: f64) -> Self {
        Self { lo: value, hi: value }
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// No controllable headroom, the plant either runs at `lo` or not at all
    pub fn is_fixed(&self) -> bool {
        self.width() <= NOISE_FLOOR_MW
    }

    pub fn contains(&self, value: f64, tolerance: f64) -> bool {
        value >= self.lo - tolerance && value <= self.hi + tolerance
    }

    /// Pull a solver value onto the range: values within the noise floor of
    /// a bound or of zero snap to it, the rest is clamped. Never yields `-0.0`.
    pub fn snap(&self, value: f64) -> f64 {
        let snapped = if (value - self.lo).abs() <= NOISE_FLOOR_MW {
            self.lo
        } else if (value - self.hi).abs() <= NOISE_FLOOR_MW {
            self.hi
        } else if value.abs() <= NOISE_FLOOR_MW {
            0.0
        } else {
            value
        };
        snapped.clamp(self.lo, self.hi) + 0.0
    }
}

/// Output interval `plant` can be dispatched in under current conditions.
///
/// Wind has no set-point: it delivers its availability-scaled capacity. Thermal
/// plants keep their rated envelope whatever the prices.
pub fn output_range(plant: &Plant, fuels: &FuelPrices) -> OutputRange {
    match plant.kind {
        PlantKind::Wind => OutputRange::fixed(plant.pmax * fuels.wind_fraction()),
        PlantKind::Gas | PlantKind::Kerosene => OutputRange::new(plant.pmin, plant.pmax),
    }
}
