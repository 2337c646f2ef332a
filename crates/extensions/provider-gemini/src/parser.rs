//! Response parsing.

use std::collections::HashMap;

use modelgate_protocols::{Completion, DriverError};

use crate::types::{GenerateContentResponse, Part};

/// Usage counters reported by this driver.
pub const TOKEN_FIELDS: [&str; 4] = [
    "PromptTokenCount",
    "CandidatesTokenCount",
    "CachedContentTokenCount",
    "TotalTokenCount",
];

/// Parse API response to a [`Completion`].
pub fn parse_response(response: GenerateContentResponse) -> Result<Completion, DriverError> {
    let stop_reason = match response.candidates.last() {
        Some(candidate) => candidate.finish_reason.clone(),
        None => return Err(DriverError::NoCompletion),
    };

    let fragments = response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .filter_map(|part| match part {
            Part::Text { text } => Some(text),
            _ => None,
        })
        .collect();

    let usage = response.usage_metadata.unwrap_or_default();
    let usage = HashMap::from([
        (TOKEN_FIELDS[0].to_string(), usage.prompt_token_count),
        (TOKEN_FIELDS[1].to_string(), usage.candidates_token_count),
        (TOKEN_FIELDS[2].to_string(), usage.cached_content_token_count),
        (TOKEN_FIELDS[3].to_string(), usage.total_token_count),
    ]);

    Ok(Completion::new(fragments, stop_reason.as_deref(), usage))
}
