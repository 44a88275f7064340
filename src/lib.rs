//! Telemetry Registry - multi-tenant IoT telemetry registry
//!
//! Companies own locations, locations own sensors, and sensors push JSON
//! readings authenticated by their own API key. This library exposes the
//! core modules for testing and reuse.

pub mod auth;
pub mod common;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod routes;
