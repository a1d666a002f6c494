//! Pre-filled messaging deep link for handing a lead to a human agent.

use shree_core::config::HandoffConfig;

/// Build the outbound message for a lead summary.
pub fn handoff_message(summary: &str) -> String {
    format!(
        "Hello, I chatted with Anjali on the website.\n\n*My Requirement:*\n{}\n\nPlease share more details and floor plans.",
        summary
    )
}

/// A handoff link for one completed conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffLink {
    base_url: String,
    recipient: String,
    message: String,
}

impl HandoffLink {
    pub fn for_summary(config: &HandoffConfig, summary: &str) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            recipient: config.recipient.clone(),
            message: handoff_message(summary),
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// The unencoded message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// `<base_url>/<recipient>?text=<percent-encoded message>`.
    ///
    /// Everything outside `A-Z a-z 0-9 - _ . ~` is percent-encoded as UTF-8.
    pub fn url(&self) -> String {
        format!(
            "{}/{}?text={}",
            self.base_url,
            self.recipient,
            urlencoding::encode(&self.message)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_template() {
        assert_eq!(
            handoff_message("Office in Vesu, budget 50L"),
            "Hello, I chatted with Anjali on the website.\n\n*My Requirement:*\nOffice in Vesu, budget 50L\n\nPlease share more details and floor plans."
        );
    }

    #[test]
    fn test_url_encodes_ampersand_and_whitespace() {
        let link = HandoffLink::for_summary(&HandoffConfig::default(), "A & B");
        let url = link.url();

        assert!(url.starts_with("https://wa.me/917405139990?text="));
        assert!(url.contains("A%20%26%20B"));
        assert!(url.contains("%0A%0A"));
        let query = url.split_once("?text=").unwrap().1;
        assert!(!query.contains(' '));
        assert!(!query.contains('&'));
        assert!(!query.contains('\n'));
    }

    #[test]
    fn test_url_full_encoding() {
        let link = HandoffLink::for_summary(&HandoffConfig::default(), "Shop");
        assert_eq!(
            link.url(),
            "https://wa.me/917405139990?text=Hello%2C%20I%20chatted%20with%20Anjali%20on%20the%20website.%0A%0A%2AMy%20Requirement%3A%2A%0AShop%0A%0APlease%20share%20more%20details%20and%20floor%20plans."
        );
    }

    #[test]
    fn test_recipient_unchanged() {
        let link = HandoffLink::for_summary(&HandoffConfig::default(), "x");
        assert_eq!(link.recipient(), "917405139990");
    }

    #[test]
    fn test_custom_config_trailing_slash() {
        let config = HandoffConfig {
            base_url: "https://msg.example/".to_string(),
            recipient: "911111111111".to_string(),
        };
        let link = HandoffLink::for_summary(&config, "x");
        assert!(link.url().starts_with("https://msg.example/911111111111?text="));
    }

    #[test]
    fn test_non_ascii_summary_utf8_encoded() {
        let link = HandoffLink::for_summary(&HandoffConfig::default(), "વેસુ");
        assert!(link.url().contains("%E0%AA%B5"));
        assert!(link.message().contains("વેસુ"));
    }
}
