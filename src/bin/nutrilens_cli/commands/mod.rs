// ABOUTME: Re-exports command modules for nutrilens-cli
// ABOUTME: Provides the assess and config subcommands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod assess;
pub mod config;
