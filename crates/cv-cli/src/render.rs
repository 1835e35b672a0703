//! Plain-text rendering of the form outcome

use cv_core::FormView;
use std::io::Write;

const PROMPT: &str = "> ";

pub fn render(view: &FormView) -> String {
    let mut out = String::new();

    if let Some(error) = &view.error {
        out.push_str(&format!("Error: {}\n", error));
    }

    if let Some(result) = &view.result {
        out.push_str(&format!("\nVerification Result\n{}\n", "=".repeat(50)));
        push_section(&mut out, "Original Claim", &result.claim);
        push_section(&mut out, "Verification", &result.verification);
    }

    out
}

fn push_section(out: &mut String, title: &str, body: &str) {
    out.push_str(&format!("\n{}\n", title));
    for line in body.lines() {
        out.push_str(&format!("  {}\n", line));
    }
}

/// Interactive prompt, flushed so it shows before the read.
pub fn write_prompt<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.write_all(PROMPT.as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cv_core::{ClaimForm, VerificationResult, VerifyError};

    /// Accepts writes, fails every flush.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_prompt_written() {
        let mut out = Vec::new();
        write_prompt(&mut out).unwrap();
        assert_eq!(out, b"> ");
    }

    #[test]
    fn test_prompt_flush_failure_is_reported() {
        let err = write_prompt(&mut ClosedPipe).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_idle_renders_nothing() {
        assert_eq!(render(&ClaimForm::new().view()), "");
    }

    #[test]
    fn test_result_sections() {
        let mut form = ClaimForm::new();
        form.set_input("Taxes were cut by 10%.");
        let pending = form.begin_submit().unwrap();
        form.settle(
            pending.attempt,
            Ok(VerificationResult {
                claim: "Taxes were cut by 10%.".to_string(),
                verification: "FALSE\nThe programme proposes no cut.".to_string(),
            }),
        );

        let text = render(&form.view());
        assert!(text.contains("Original Claim\n  Taxes were cut by 10%.\n"));
        assert!(text.contains("Verification\n  FALSE\n  The programme proposes no cut.\n"));
        assert!(!text.contains("Error:"));
    }

    #[test]
    fn test_error_only() {
        let mut form = ClaimForm::new();
        form.set_input("claim");
        let pending = form.begin_submit().unwrap();
        form.settle(pending.attempt, Err(VerifyError::Rejected { status: 500 }));

        let text = render(&form.view());
        assert!(text.starts_with("Error: Failed to get verification."));
        assert!(text.contains("500"));
        assert!(!text.contains("Original Claim"));
    }
}
