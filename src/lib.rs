//! Decision Master - Interactive Decision Wizard
//!
//! This crate implements the Robbins OOC/EMR method for structured
//! decision making: six gated stages from desired outcomes to a
//! committed, recorded decision, with optional AI-backed suggestions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
