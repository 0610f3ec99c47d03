//! gnob - rotary knob control engine
//!
//! Lets a user set a numeric value by scrolling, stepping or typing, with the
//! semantics of a native range input.
//!
//! This library provides:
//! - Wheel event normalization across host event models
//! - The knob engine: clamped, stepped values mapped to and from an angle
//! - A change notification bus
//! - Knob options (attributes, config file, environment)
//! - A headless control that turns input events into render snapshots

pub mod bus;
pub mod config;
pub mod control;
pub mod engine;
pub mod wheel;
