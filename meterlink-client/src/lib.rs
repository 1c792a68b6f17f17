//! Meterlink Resource Client
//!
//! Client-side abstractions for talking to a oneM2M CSE:
//!
//! - [`resources`] - Typed AE / container / content-instance bodies with
//!   oneM2M short-name serialization
//! - [`client`] - The [`ResourceClient`] capability trait and call outcomes
//! - [`http`] - The reqwest-based oneM2M HTTP binding
//!
//! Application code is written against [`ResourceClient`] so it can be
//! driven by a fake in tests; [`HttpResourceClient`] is the production
//! implementation.

pub mod client;
pub mod http;
pub mod resources;

pub use client::{ClientError, Outcome, ResourceClient};
pub use http::HttpResourceClient;
pub use resources::{Ae, Container, ContentInstance, Resource, ResourceKind};
