// ABOUTME: Re-exports the domain models from nutrilens-core
// ABOUTME: Assessment records, user profiles and meal logs under one path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use nutrilens_core::models::*;
