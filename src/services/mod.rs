// ABOUTME: Domain service layer orchestrating the calculator, storage and AI collaborators
// ABOUTME: Physical assessment creation and meal photo analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services are async because their collaborators (assessment store, AI
//! models) are I/O bound. Every collaborator is injected as a trait object.

/// Physical assessment orchestration
pub mod assessment_service;

/// Assessment persistence port and in-memory adapter
pub mod assessment_store;

/// Meal photo analysis
pub mod meal_service;

pub use assessment_service::PhysicalAssessmentService;
pub use assessment_store::{AssessmentStore, CreateOutcome, InMemoryAssessmentStore};
pub use meal_service::{MealAnalysisService, NewMeal, MAX_DESCRIPTION_CHARS};
