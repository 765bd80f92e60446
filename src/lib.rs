//! Classroom Phases - class rooms that move through a course's phases.
//!
//! Each class room keeps an append-only event log; the current phase and
//! the accumulated phase timer are derived from it.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
