//! Response parsing.

use std::collections::HashMap;

use modelgate_protocols::{Completion, DriverError};

use crate::api::ApiResponse;

/// Usage counters reported by this driver.
pub const TOKEN_FIELDS: [&str; 3] = ["CompletionTokens", "PromptTokens", "TotalTokens"];

/// Parse API response to a [`Completion`].
///
/// Every choice contributes its content, then its refusal. The finish
/// reason of the last choice becomes the stop fragment.
pub fn parse_response(response: ApiResponse) -> Result<Completion, DriverError> {
    let stop_reason = match response.choices.last() {
        Some(choice) => choice.finish_reason.clone(),
        None => return Err(DriverError::NoCompletion),
    };

    let mut fragments = Vec::new();
    for choice in response.choices {
        let message = choice.message;
        fragments.extend(message.content.filter(|s| !s.is_empty()));
        fragments.extend(message.refusal.filter(|s| !s.is_empty()));
    }

    let usage = response.usage.unwrap_or_default();
    let usage = HashMap::from([
        (TOKEN_FIELDS[0].to_string(), usage.completion_tokens),
        (TOKEN_FIELDS[1].to_string(), usage.prompt_tokens),
        (TOKEN_FIELDS[2].to_string(), usage.total_tokens),
    ]);

    Ok(Completion::new(fragments, stop_reason.as_deref(), usage))
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
