//! oneM2M bridge for a simulated utility meter.
//!
//! This bridge provisions an application entity with two containers on a
//! oneM2M CSE, then publishes a simulated meter reading as a new content
//! instance at a fixed cadence for a bounded number of ticks.
//!
//! # Resource Tree
//!
//! ```text
//! /<cse-root>/MY_METER              application entity
//! /<cse-root>/MY_METER/DESCRIPTOR   static device description
//! /<cse-root>/MY_METER/DATA         one content instance per reading
//! ```
//!
//! Readings are text content instances whose body is `{"kWH": <value>}`.

pub mod config;
pub mod meter;
pub mod provision;
pub mod publisher;
