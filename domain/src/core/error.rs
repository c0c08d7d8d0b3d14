//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("no participants configured for the council")]
    EmptyRoster,

    #[error("{count} participants configured but the label alphabet has only {max} letters")]
    RosterTooLarge { count: usize, max: usize },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("'{0}' is not a valid draft label")]
    UnknownLabel(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_too_large_display() {
        let error = DomainError::RosterTooLarge { count: 7, max: 5 };
        assert_eq!(
            error.to_string(),
            "7 participants configured but the label alphabet has only 5 letters"
        );
    }

    #[test]
    fn unknown_label_display() {
        assert_eq!(
            DomainError::UnknownLabel('z').to_string(),
            "'z' is not a valid draft label"
        );
    }
}
