//! Submission lifecycle state machine.
//!
//! A submission moves through a fixed set of states; the state travels with
//! the draft and is returned in every response rather than living in
//! ambient session storage. Transitions outside the table below are
//! rejected with `AppError::InvalidState`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Lifecycle of one submission.
///
/// ```text
/// Empty -> Uploaded -> Summarized -> Edited -> Saved
///                           \__________________/
/// ```
///
/// `Summarized -> Saved` is legal (saving the seed summaries unchanged),
/// and `Edited -> Edited` allows repeated edits before saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Empty,
    Uploaded,
    Summarized,
    Edited,
    Saved,
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Empty => "empty",
            SubmissionState::Uploaded => "uploaded",
            SubmissionState::Summarized => "summarized",
            SubmissionState::Edited => "edited",
            SubmissionState::Saved => "saved",
        }
    }

    /// Whether a transition from `self` to `next` is allowed.
    pub fn can_transition_to(&self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Empty, Uploaded)
                | (Uploaded, Summarized)
                | (Summarized, Edited)
                | (Summarized, Saved)
                | (Edited, Edited)
                | (Edited, Saved)
        )
    }

    /// Transition to `next`, or fail with `InvalidState`.
    pub fn advance(&self, next: SubmissionState) -> Result<SubmissionState, AppError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(AppError::InvalidState(format!(
                "cannot move submission from '{}' to '{}'",
                self.as_str(),
                next.as_str()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let mut state = SubmissionState::Empty;
        for next in [
            SubmissionState::Uploaded,
            SubmissionState::Summarized,
            SubmissionState::Edited,
            SubmissionState::Saved,
        ] {
            state = state.advance(next).unwrap();
        }
        assert_eq!(state, SubmissionState::Saved);
    }

    #[test]
    fn test_save_without_edit_is_legal() {
        assert!(SubmissionState::Summarized.can_transition_to(SubmissionState::Saved));
    }

    #[test]
    fn test_repeated_edits_are_legal() {
        assert!(SubmissionState::Edited.can_transition_to(SubmissionState::Edited));
    }

    #[test]
    fn test_saved_is_terminal() {
        for next in [
            SubmissionState::Empty,
            SubmissionState::Uploaded,
            SubmissionState::Summarized,
            SubmissionState::Edited,
            SubmissionState::Saved,
        ] {
            assert!(!SubmissionState::Saved.can_transition_to(next));
        }
    }

    #[test]
    fn test_illegal_transition_is_invalid_state() {
        let err = SubmissionState::Empty
            .advance(SubmissionState::Saved)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&SubmissionState::Summarized).unwrap();
        assert_eq!(json, "\"summarized\"");
    }
}
