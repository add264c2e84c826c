//! Shared result types crossing the invoker boundary.

/// Outcome of a single model invocation.
///
/// Backend failures are data, not faults: every failure shape (missing
/// runner, timeout, non-zero exit) is captured here so callers can degrade
/// their output instead of aborting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationResult {
    Success(String),
    Failure(String),
}

impl InvocationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationResult::Success(_))
    }

    /// The text destined for the caller: the model output, or an annotated
    /// placeholder carrying the failure reason.
    pub fn into_text(self) -> String {
        match self {
            InvocationResult::Success(text) => text,
            InvocationResult::Failure(reason) => {
                format!("[model invocation failed: {reason}]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_text_passes_through() {
        let result = InvocationResult::Success("print(1)".to_string());
        assert_eq!(result.into_text(), "print(1)");
    }

    #[test]
    fn failure_text_is_annotated_with_reason() {
        let result = InvocationResult::Failure("timed out after 60s".to_string());
        let text = result.into_text();
        assert!(text.contains("model invocation failed"));
        assert!(text.contains("timed out after 60s"));
    }
}
