//! One certificate submission: acquire the paragraph, then compose the page.
//!
//! The trigger (the form's submit button) is an explicit [`Trigger`] value
//! owned by the caller and handed to [`submit`], which always leaves it
//! enabled again once the flow ends.

use tracing::{error, info};

use crate::agents::{acquire, TextSource};
use crate::certificate::CertificateRequest;
use crate::errors::SubmissionError;
use crate::pdf::{Composer, RenderedCertificate};

pub const IDLE_LABEL: &str = "Generate Certificate";
pub const BUSY_LABEL: &str = "Generating...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    /// The last submission failed; the control is usable again.
    Failed { diagnostic: String },
}

#[derive(Debug)]
pub struct Trigger {
    state: SubmissionState,
}

impl Default for Trigger {
    fn default() -> Self {
        Self::new()
    }
}

impl Trigger {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state != SubmissionState::Submitting
    }

    pub fn label(&self) -> &'static str {
        match self.state {
            SubmissionState::Submitting => BUSY_LABEL,
            _ => IDLE_LABEL,
        }
    }

    pub fn begin(&mut self) -> Result<(), SubmissionError> {
        if self.state == SubmissionState::Submitting {
            return Err(SubmissionError::AlreadySubmitting);
        }
        self.state = SubmissionState::Submitting;
        Ok(())
    }

    fn finish<T>(&mut self, outcome: &Result<T, SubmissionError>) {
        self.state = match outcome {
            Ok(_) => SubmissionState::Idle,
            Err(e) => SubmissionState::Failed {
                diagnostic: e.to_string(),
            },
        };
    }

    /// Clears a shown failure.
    pub fn acknowledge(&mut self) {
        if matches!(self.state, SubmissionState::Failed { .. }) {
            self.state = SubmissionState::Idle;
        }
    }
}

/// Runs acquisition then composition. Text service failures fall back
/// silently, except a missing credential, which is a deployment defect and
/// fails the submission before anything is composed.
pub async fn submit(
    trigger: &mut Trigger,
    source: &dyn TextSource,
    composer: &Composer,
    request: CertificateRequest,
) -> Result<RenderedCertificate, SubmissionError> {
    trigger.begin()?;
    let outcome = run(source, composer, request).await;
    trigger.finish(&outcome);
    if let Err(e) = &outcome {
        error!("Certificate submission failed: {}", e);
    }
    outcome
}

async fn run(
    source: &dyn TextSource,
    composer: &Composer,
    request: CertificateRequest,
) -> Result<RenderedCertificate, SubmissionError> {
    let request = request.validate()?;
    info!("Generating certificate for {}", request.name);

    let acquired = acquire(source, &request).await;
    if let Some(failure) = acquired.failure {
        if failure.is_configuration() {
            return Err(SubmissionError::Misconfigured(failure));
        }
    }

    Ok(composer.compose(&request, &acquired.body)?)
}
