// ABOUTME: Re-exports the unified error types from nutrilens-core
// ABOUTME: Keeps AppError and ErrorCode the same type across every workspace crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use nutrilens_core::errors::*;
