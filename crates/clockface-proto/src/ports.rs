//! Core port definitions for clockface adapters.
//!
//! This module exposes the host facilities the clock component consumes, so
//! higher level crates can swap the wall clock for a simulated one in tests.

pub mod clock;
