// ABOUTME: Helper modules for nutrilens-cli
// ABOUTME: Output formatting for assessments and errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
