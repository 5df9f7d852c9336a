use serde::{Deserialize, Serialize};

/// Output assigned to one plant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub name: String,
    /// Set-point in MW
    #[serde(rename = "p", alias = "power")]
    pub power: f64,
}

impl Allocation {
    pub fn new(name: impl Into<String>, power: f64) -> Self {
        Self {
            name: name.into(),
            power,
        }
    }
}

/// Sum of all set-points (MW)
pub fn total_power(allocations: &[Allocation]) -> f64 {
    allocations.iter().map(|a| a.power).sum()
}
