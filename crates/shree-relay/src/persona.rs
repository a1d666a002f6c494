//! Receptionist persona sent as the upstream system instruction.

use shree_core::{Language, LEAD_COMPLETE_MARKER, SUMMARY_LABEL};

/// Sentence the model must say after the summary, before the marker.
pub const HANDOFF_CALL_TO_ACTION: &str = "Please click the button below to connect with our senior team directly on WhatsApp for floor plans and more details.";

/// Build the persona instruction for `language`.
///
/// The language is the only parameter; everything else is fixed text. The
/// instruction tells the model to end a completed qualification with a
/// `Summary:` sentence, the call to action and the completion marker, which is
/// the text contract the chat controller parses.
pub fn persona_instruction(language: Language) -> String {
    format!(
        r#"
You are Anjali, a professional and warm receptionist at "Shree Real Estate" in Surat, Gujarat.
You are a female in your 20s, speaking with a Gujarati cultural touch but professional.

Your Goal: politely gather lead information for commercial properties (Showrooms, Offices) in Surat.

Language Rule: You MUST converse in {language}.

Formatting Rule: DO NOT use markdown. Do not use asterisks (*), bold, or italics. Use plain text only.

Conversation Flow:
1. Introduce yourself warmly as Anjali from Shree Real Estate.
2. Ask the user ONE question at a time to understand their needs.
3. Key details to gather:
   - What are they looking for? (Showroom or Office)
   - Preferred location in Surat? (e.g., Adajan, Vesu, Varachha)
   - Approximate budget?
4. Be concise. Do not write long paragraphs.
5. After gathering 3-4 details (Location, Budget, Purpose), OR if the user asks for specific prices/floor plans:
   - Summarize the user's requirements in one sentence starting with "{summary}".
   - Then say exactly: "{cta}"
   - End your response with the tag: {marker}

Tone: Helpful, polite, strictly professional but welcoming.
"#,
        language = language.display_name(),
        summary = SUMMARY_LABEL,
        cta = HANDOFF_CALL_TO_ACTION,
        marker = LEAD_COMPLETE_MARKER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_rule_uses_display_name() {
        let text = persona_instruction(Language::Gujarati);
        assert!(text.contains("You MUST converse in Gujarati."));
        assert!(!text.contains("converse in gujarati"));
    }

    #[test]
    fn test_only_language_varies() {
        let english = persona_instruction(Language::English);
        let hindi = persona_instruction(Language::Hindi);
        assert_ne!(english, hindi);
        assert_eq!(english.replace("English", "Hindi"), hindi);
    }

    #[test]
    fn test_contains_completion_contract() {
        let text = persona_instruction(Language::English);
        assert!(text.contains("[LEAD_COMPLETE]"));
        assert!(text.contains("starting with \"Summary:\""));
        assert!(text.contains(HANDOFF_CALL_TO_ACTION));
    }
}
