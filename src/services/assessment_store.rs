// ABOUTME: Persistence port for physical assessments with an in-memory adapter
// ABOUTME: Atomic create-if-absent guarantees at most one assessment per user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::errors::AppResult;
use nutrilens_core::models::AssessmentResult;

/// Result of an atomic insert
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// The supplied assessment was stored
    Created(AssessmentResult),
    /// Another writer got there first; this is the stored assessment
    Existing(AssessmentResult),
}

impl CreateOutcome {
    /// The assessment now stored for the user
    #[must_use]
    pub fn into_stored(self) -> AssessmentResult {
        match self {
            Self::Created(assessment) | Self::Existing(assessment) => assessment,
        }
    }

    /// Whether this call performed the insert
    #[must_use]
    pub const fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Storage for the single assessment each user owns
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    /// Assessment of a user, if one exists
    async fn find(&self, user_id: Uuid) -> AppResult<Option<AssessmentResult>>;

    /// Store `assessment` unless the user already has one
    ///
    /// Must be atomic: concurrent callers for the same user observe exactly
    /// one `Created`.
    async fn create_if_absent(
        &self,
        user_id: Uuid,
        assessment: AssessmentResult,
    ) -> AppResult<CreateOutcome>;
}

/// Process-local store backed by a sharded concurrent map
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssessmentStore {
    assessments: Arc<DashMap<Uuid, AssessmentResult>>,
}

impl InMemoryAssessmentStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored assessments
    #[must_use]
    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }
}

#[async_trait]
impl AssessmentStore for InMemoryAssessmentStore {
    async fn find(&self, user_id: Uuid) -> AppResult<Option<AssessmentResult>> {
        Ok(self
            .assessments
            .get(&user_id)
            .map(|entry| entry.value().clone()))
    }

    async fn create_if_absent(
        &self,
        user_id: Uuid,
        assessment: AssessmentResult,
    ) -> AppResult<CreateOutcome> {
        // Entry API holds the shard lock across the check and the insert
        let outcome = match self.assessments.entry(user_id) {
            Entry::Occupied(existing) => CreateOutcome::Existing(existing.get().clone()),
            Entry::Vacant(slot) => {
                slot.insert(assessment.clone());
                CreateOutcome::Created(assessment)
            }
        };
        Ok(outcome)
    }
}
