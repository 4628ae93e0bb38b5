// ABOUTME: Core types for the NutriLens nutrition assessment platform
// ABOUTME: Foundation crate with error handling and the shared domain models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # NutriLens Core
//!
//! Foundation crate providing shared types for the NutriLens platform. It is
//! designed to change infrequently so the calculator and service layers can
//! compile incrementally on top of it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Assessment records, user profiles and meal logs

/// Unified error handling system with standard error codes
pub mod errors;

/// Core data models (assessment input/result, profile, meals)
pub mod models;
