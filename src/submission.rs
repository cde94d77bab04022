//! Submission Controller: owns the form and the single in-flight generation request.

use thiserror::Error;
use tracing::{info, warn};

use crate::models::{GenerationRequest, GenerationResult, ResultsHandoff};
use crate::service::{GenerationService, ServiceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    BusinessName,
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Failed(String),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("business name is required")] EmptyBusinessName,
    #[error("a generation request is already in flight")] AlreadyPending,
}

#[derive(Debug, Default)]
pub struct SubmissionController {
    business_name: String,
    description: String,
    phase: Phase,
}

impl SubmissionController {
    pub fn new() -> Self { Self::default() }

    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::BusinessName => self.business_name = value.into(),
            Field::Description => self.description = value.into(),
        }
    }

    pub fn business_name(&self) -> &str { &self.business_name }

    pub fn description(&self) -> &str { &self.description }

    pub fn phase(&self) -> &Phase { &self.phase }

    pub fn is_pending(&self) -> bool { self.phase == Phase::Pending }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.business_name.trim().is_empty() && !self.is_pending()
    }

    /// Moves to pending and snapshots the fields into the request to send.
    pub fn begin(&mut self) -> Result<GenerationRequest, SubmitRejected> {
        if self.is_pending() { return Err(SubmitRejected::AlreadyPending); }
        if self.business_name.trim().is_empty() { return Err(SubmitRejected::EmptyBusinessName); }
        self.phase = Phase::Pending;
        Ok(GenerationRequest::new(self.business_name.clone(), self.description.clone()))
    }

    /// Applies the outcome of the request started by [`begin`](Self::begin).
    ///
    /// Success yields the handoff for the results screen. Failure goes back to an editable
    /// form carrying the error; the fields are left as they were.
    pub fn resolve(&mut self, outcome: Result<GenerationResult, ServiceError>) -> Option<ResultsHandoff> {
        match outcome {
            Ok(data) => {
                self.phase = Phase::Idle;
                let handoff = ResultsHandoff::new(self.business_name.clone(), data);
                info!("✅ Marketing kit ready for '{}' (run {})", handoff.business_name, handoff.run_id);
                Some(handoff)
            }
            Err(e) => {
                warn!("❌ Generation failed: {}", e);
                self.phase = Phase::Failed(e.user_message());
                None
            }
        }
    }

    /// Issues exactly one request to `service` with the current field values.
    pub async fn submit<S>(&mut self, service: &S) -> Result<Option<ResultsHandoff>, SubmitRejected>
    where
        S: GenerationService + ?Sized,
    {
        let request = self.begin()?;
        info!("🚀 Submitting '{}' for generation", request.business_name);
        let outcome = service.generate(&request).await;
        Ok(self.resolve(outcome))
    }
}
