pub mod cost;
pub mod error;
pub mod feasibility;
pub mod merit_order;
pub mod strategies;
pub mod types;

pub use cost::*;
pub use error::*;
pub use feasibility::*;
pub use merit_order::*;
pub use strategies::*;
pub use types::*;
