//! Claim verification form state machine
//!
//! The form owns the claim text and a single tagged status. Rendering is
//! derived from the status alone, so an error banner and a result panel can
//! never be visible together.
//!
//! Submission is split in two halves so that any runtime can drive it:
//! [`ClaimForm::begin_submit`] validates and hands out an attempt ticket,
//! and [`ClaimForm::settle`] applies the outcome of that attempt. Settlements
//! for anything but the latest attempt are dropped.

use crate::{Verifier, VerificationResult, VerifyError, VerifyResult};

pub type Attempt = u64;

pub const SUBMIT_LABEL: &str = "Verify Claim";
pub const SUBMITTING_LABEL: &str = "Verifying...";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting {
        attempt: Attempt,
    },
    Failed(String),
    Succeeded(VerificationResult),
}

/// A submission that passed validation and should be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub attempt: Attempt,
    pub claim: String,
}

/// Everything a front end needs to draw the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub input_disabled: bool,
    pub submit_disabled: bool,
    pub submit_label: &'static str,
    pub error: Option<String>,
    pub result: Option<VerificationResult>,
}

#[derive(Debug, Clone, Default)]
pub struct ClaimForm {
    input: String,
    status: FormStatus,
    latest_attempt: Attempt,
}

impl ClaimForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.status, FormStatus::Submitting { .. })
    }

    /// Replace the claim text verbatim.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Validate the current input and enter `Submitting`.
    ///
    /// Returns `None` when nothing should be sent: either a request is
    /// already in flight, or the claim is blank (the status then carries
    /// the validation message).
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if self.is_submitting() {
            tracing::debug!("Submit ignored, attempt {} still in flight", self.latest_attempt);
            return None;
        }

        if self.input.trim().is_empty() {
            self.status = FormStatus::Failed(VerifyError::EmptyClaim.user_message());
            return None;
        }

        self.latest_attempt += 1;
        self.status = FormStatus::Submitting {
            attempt: self.latest_attempt,
        };

        Some(PendingSubmission {
            attempt: self.latest_attempt,
            claim: self.input.clone(),
        })
    }

    /// Apply the outcome of `attempt`. Returns `false` if it was stale.
    pub fn settle(
        &mut self,
        attempt: Attempt,
        outcome: VerifyResult<VerificationResult>,
    ) -> bool {
        let current = matches!(
            self.status,
            FormStatus::Submitting { attempt: a } if a == attempt
        );
        if !current {
            tracing::debug!("Dropping settlement for stale attempt {}", attempt);
            return false;
        }

        self.status = match outcome {
            Ok(result) => FormStatus::Succeeded(result),
            Err(err) => FormStatus::Failed(err.user_message()),
        };
        true
    }

    /// Forget any in-flight attempt, e.g. when the page is torn down.
    pub fn abandon(&mut self) {
        if self.is_submitting() {
            self.status = FormStatus::Idle;
        }
        // bump so a late settlement can never match
        self.latest_attempt += 1;
    }

    /// Run a whole submission against `verifier`.
    pub async fn submit<V>(&mut self, verifier: &V) -> &FormStatus
    where
        V: Verifier + ?Sized,
    {
        if let Some(pending) = self.begin_submit() {
            let outcome = verifier.verify(&pending.claim).await;
            self.settle(pending.attempt, outcome);
        }
        &self.status
    }

    pub fn view(&self) -> FormView {
        let submitting = self.is_submitting();
        let (error, result) = match &self.status {
            FormStatus::Failed(message) => (Some(message.clone()), None),
            FormStatus::Succeeded(result) => (None, Some(result.clone())),
            FormStatus::Idle | FormStatus::Submitting { .. } => (None, None),
        };

        FormView {
            input_disabled: submitting,
            submit_disabled: submitting,
            submit_label: if submitting { SUBMITTING_LABEL } else { SUBMIT_LABEL },
            error,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EMPTY_CLAIM_MESSAGE;
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};

    struct ScriptedVerifier {
        calls: Cell<usize>,
        outcome: RefCell<VerifyResult<VerificationResult>>,
    }

    impl ScriptedVerifier {
        fn new(outcome: VerifyResult<VerificationResult>) -> Self {
            Self {
                calls: Cell::new(0),
                outcome: RefCell::new(outcome),
            }
        }
    }

    #[async_trait(?Send)]
    impl Verifier for ScriptedVerifier {
        async fn verify(&self, _claim: &str) -> VerifyResult<VerificationResult> {
            self.calls.set(self.calls.get() + 1);
            self.outcome.borrow().clone()
        }
    }

    fn verdict(claim: &str, verification: &str) -> VerificationResult {
        VerificationResult {
            claim: claim.to_string(),
            verification: verification.to_string(),
        }
    }

    #[tokio::test]
    async fn test_blank_claim_never_calls_verifier() {
        let verifier = ScriptedVerifier::new(Ok(verdict("x", "y")));
        for blank in ["", "   ", "\n\t "] {
            let mut form = ClaimForm::new();
            form.set_input(blank);
            let status = form.submit(&verifier).await.clone();
            assert_eq!(status, FormStatus::Failed(EMPTY_CLAIM_MESSAGE.to_string()));
        }
        assert_eq!(verifier.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_success_replaces_previous_error() {
        let verifier = ScriptedVerifier::new(Ok(verdict("X", "Y")));
        let mut form = ClaimForm::new();
        form.submit(&verifier).await;
        assert!(form.view().error.is_some());

        form.set_input("X");
        form.submit(&verifier).await;

        let view = form.view();
        assert_eq!(view.error, None);
        assert_eq!(view.result, Some(verdict("X", "Y")));
        assert_eq!(verifier.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_rejection_shows_status_and_no_result() {
        let verifier = ScriptedVerifier::new(Err(VerifyError::Rejected { status: 500 }));
        let mut form = ClaimForm::new();
        form.set_input("The economy grew by 5% last quarter.");
        form.submit(&verifier).await;

        let view = form.view();
        assert!(view.error.unwrap().contains("500"));
        assert_eq!(view.result, None);
    }

    #[test]
    fn test_in_flight_disables_controls() {
        let mut form = ClaimForm::new();
        form.set_input("Taxes were cut by 10%.");

        let idle = form.view();
        assert!(!idle.submit_disabled);
        assert!(!idle.input_disabled);
        assert_eq!(idle.submit_label, SUBMIT_LABEL);

        let pending = form.begin_submit().unwrap();
        let busy = form.view();
        assert!(busy.submit_disabled);
        assert!(busy.input_disabled);
        assert_eq!(busy.submit_label, SUBMITTING_LABEL);
        assert_eq!(busy.error, None);
        assert_eq!(busy.result, None);

        assert!(form.settle(pending.attempt, Err(VerifyError::Transport("reset".into()))));
        let done = form.view();
        assert!(!done.submit_disabled);
        assert_eq!(done.submit_label, SUBMIT_LABEL);
    }

    #[test]
    fn test_second_submit_while_in_flight_is_ignored() {
        let mut form = ClaimForm::new();
        form.set_input("claim");
        let first = form.begin_submit().unwrap();
        assert_eq!(form.begin_submit(), None);
        assert_eq!(form.status(), &FormStatus::Submitting { attempt: first.attempt });
    }

    #[test]
    fn test_stale_settlement_is_dropped() {
        let mut form = ClaimForm::new();
        form.set_input("first");
        let first = form.begin_submit().unwrap();
        assert!(form.settle(first.attempt, Ok(verdict("first", "TRUE"))));

        form.set_input("second");
        let second = form.begin_submit().unwrap();
        assert!(second.attempt > first.attempt);

        assert!(!form.settle(first.attempt, Ok(verdict("first", "again"))));
        assert_eq!(form.status(), &FormStatus::Submitting { attempt: second.attempt });

        assert!(form.settle(second.attempt, Ok(verdict("second", "FALSE"))));
        assert_eq!(form.view().result, Some(verdict("second", "FALSE")));
    }

    #[test]
    fn test_abandon_invalidates_in_flight_attempt() {
        let mut form = ClaimForm::new();
        form.set_input("claim");
        let pending = form.begin_submit().unwrap();
        form.abandon();

        assert_eq!(form.status(), &FormStatus::Idle);
        assert!(!form.settle(pending.attempt, Ok(verdict("claim", "TRUE"))));
        assert_eq!(form.status(), &FormStatus::Idle);
    }

    #[test]
    fn test_claim_text_sent_untrimmed() {
        let mut form = ClaimForm::new();
        form.set_input("  Taxes were cut by 10%.\n");
        let pending = form.begin_submit().unwrap();
        assert_eq!(pending.claim, "  Taxes were cut by 10%.\n");
    }

    #[test]
    fn test_editing_keeps_status() {
        let mut form = ClaimForm::new();
        form.begin_submit();
        form.set_input("new text");
        assert_eq!(form.status(), &FormStatus::Failed(EMPTY_CLAIM_MESSAGE.to_string()));
        assert_eq!(form.input(), "new text");
    }
}
