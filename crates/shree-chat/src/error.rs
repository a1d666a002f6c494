//! Error types for the conversation controller.

/// Errors from the chat controller and relay client.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("no language selected")]
    NoLanguage,
    #[error("input is disabled until the conversation is restarted")]
    InputDisabled,
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("relay error: {0}")]
    Relay(String),
    #[error("relay returned {status}: {message}")]
    RelayStatus { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::NoLanguage.to_string(), "no language selected");
        assert_eq!(
            ChatError::InputDisabled.to_string(),
            "input is disabled until the conversation is restarted"
        );
        assert_eq!(ChatError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(
            ChatError::Relay("connection refused".to_string()).to_string(),
            "relay error: connection refused"
        );
        assert_eq!(
            ChatError::RelayStatus {
                status: 500,
                message: "Missing API Key".to_string()
            }
            .to_string(),
            "relay returned 500: Missing API Key"
        );
    }

    #[test]
    fn test_errors_implement_debug() {
        let dbg = format!("{:?}", ChatError::InputDisabled);
        assert!(dbg.contains("InputDisabled"));
    }
}
