//! Cirrus Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Cirrus
//! architecture graph engine. It includes:
//!
//! - **Geometry**: Points, sizes and bounding boxes ([`geometry`] module)
//! - **Providers**: The closed set of cloud vendors ([`provider::Provider`])
//! - **Services**: Resolved service descriptors ([`service::ServiceDescriptor`])
//! - **Groups**: Containment groups and their types ([`group`] module)
//! - **Architecture**: The parsed aggregate and its connections ([`architecture`] module)

pub mod architecture;
pub mod error;
pub mod geometry;
pub mod group;
pub mod provider;
pub mod service;
