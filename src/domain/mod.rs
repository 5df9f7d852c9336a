pub mod allocation;
pub mod plant;
pub mod request;

pub use allocation::*;
pub use plant::*;
pub use request::*;
