//! Three-button media remote for the ESP32.
//!
//! The modules below the `embedded` feature gate need the ESP32 runtime and
//! radio; everything else builds on the host, which is where `cargo test`
//! runs. `transport` supplies the TCP [`remote::Connector`] the firmware uses.

#![cfg_attr(not(test), no_std)]

pub mod command;
pub mod config;
pub mod constants;
pub mod controller;
pub mod display;
pub mod http;
pub mod input;
pub mod remote;
pub mod station;
pub mod status;

#[cfg(feature = "embedded")]
pub mod transport;
#[cfg(feature = "embedded")]
pub mod wifi;
