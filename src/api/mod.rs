//! HTTP API surface
//!
//! `visitor` serves the public page chain, `admin` the management panel.

pub mod admin;
pub mod visitor;
