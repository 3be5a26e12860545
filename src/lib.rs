//! Linkrotator - a marketing link-rotation web service
//!
//! Serves the visitor page chain (landing → web results → optional
//! email-capture prelanding → external redirect) and the admin panel
//! that manages it.
//!
//! # Architecture
//! - `storage`: sea-orm backed content store, click tracking and analytics
//! - `services`: session identity, click recording, redirect resolution,
//!   GeoIP lookup and AI-assisted content generation
//! - `api`: actix-web HTTP surface (visitor + admin)
//! - `config`: TOML + environment configuration
//! - `errors`: unified error type with stable error codes

pub mod api;
pub mod config;
pub mod errors;
pub mod services;
pub mod storage;
pub mod utils;
