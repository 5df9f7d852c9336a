//! Economic dispatch for a fleet of wind, gas and kerosene power plants.
//!
//! The core ([`dispatch`]) is a set of pure functions over a validated
//! [`domain::LoadRequest`]: a greedy merit-order heuristic and an exact
//! linear-program solve. [`api`] and [`controller`] expose it over HTTP.

pub mod api;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod domain;
pub mod telemetry;
