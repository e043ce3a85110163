// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test harness for contact form attack simulation.
//!
//! This module provides utilities for simulating various abuse patterns
//! against the form guard to validate its controls.

pub mod attacks;
pub mod generators;
pub mod metrics;
