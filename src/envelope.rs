//! Wire format of the generation service's response.
//!
//! The service answers a tool request with a JSON envelope; only the
//! `component_code` field feeds the synthesis pipeline.  Transport is the
//! host's concern.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::CandidateSource;

/// One generated tool, as returned by the generation service.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GenerationEnvelope {
    pub tool_name: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub component_code: String,
}

/// Parse a raw service response and lift its source text into a
/// [`CandidateSource`].
pub fn candidate_from_json(raw: &str) -> anyhow::Result<CandidateSource> {
    let envelope: GenerationEnvelope =
        serde_json::from_str(raw).context("malformed generation envelope")?;
    log::debug!(
        "envelope for '{}': {} feature(s), {} bytes of source",
        envelope.tool_name,
        envelope.features.len(),
        envelope.component_code.len()
    );
    Ok(CandidateSource::new(envelope.component_code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_component_code() {
        let raw = r#"{
            "tool_name": "breathing-timer",
            "features": ["timer", "announcements"],
            "component_code": "const ToolComponent = () => <Label>hi</Label>;"
        }"#;
        let candidate = candidate_from_json(raw).unwrap();
        assert!(candidate.text.starts_with("const ToolComponent"));
    }

    #[test]
    fn features_default_to_empty() {
        let raw = r#"{"tool_name": "t", "component_code": "x"}"#;
        let envelope: GenerationEnvelope = serde_json::from_str(raw).unwrap();
        assert!(envelope.features.is_empty());
    }

    #[test]
    fn malformed_json_is_a_contextual_error() {
        let err = candidate_from_json("{not json").unwrap_err();
        assert!(err.to_string().contains("malformed generation envelope"));
    }

    #[test]
    fn missing_code_field_is_rejected() {
        assert!(candidate_from_json(r#"{"tool_name": "t"}"#).is_err());
    }
}
