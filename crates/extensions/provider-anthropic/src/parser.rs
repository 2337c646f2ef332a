//! Response parsing.

use std::collections::HashMap;

use modelgate_protocols::{Completion, DriverError};

use crate::api::{ApiResponse, ResponseBlock};

/// Usage counters reported by this driver.
pub const TOKEN_FIELDS: [&str; 4] = [
    "InputTokens",
    "OutputTokens",
    "CacheCreationInputTokens",
    "CacheReadInputTokens",
];

/// Parse API response to a [`Completion`].
pub fn parse_response(response: ApiResponse) -> Result<Completion, DriverError> {
    if response.content.is_empty() {
        return Err(DriverError::NoCompletion);
    }

    let fragments = response
        .content
        .into_iter()
        .filter_map(|block| match block {
            ResponseBlock::Text { text } => Some(text),
            ResponseBlock::Other => None,
        })
        .collect();

    let usage = &response.usage;
    let usage = HashMap::from([
        (TOKEN_FIELDS[0].to_string(), usage.input_tokens),
        (TOKEN_FIELDS[1].to_string(), usage.output_tokens),
        (
            TOKEN_FIELDS[2].to_string(),
            usage.cache_creation_input_tokens.unwrap_or_default(),
        ),
        (
            TOKEN_FIELDS[3].to_string(),
            usage.cache_read_input_tokens.unwrap_or_default(),
        ),
    ]);

    Ok(Completion::new(fragments, response.stop_reason.as_deref(), usage))
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
