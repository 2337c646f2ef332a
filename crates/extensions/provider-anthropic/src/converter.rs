//! Request payload construction.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::api::{ApiMessage, ContentBlock, ImageSource};

/// One user message with a text block per turn, in order.
pub fn text_message(turns: &[&str]) -> ApiMessage {
    ApiMessage {
        role: "user".to_string(),
        content: turns
            .iter()
            .map(|turn| ContentBlock::Text {
                text: turn.to_string(),
            })
            .collect(),
    }
}

/// One user message holding the image followed by the prompt.
pub fn image_message(input: &str, data: &[u8], media_type: &str) -> ApiMessage {
    ApiMessage {
        role: "user".to_string(),
        content: vec![
            ContentBlock::Image {
                source: ImageSource {
                    source_type: "base64".to_string(),
                    media_type: media_type.to_string(),
                    data: STANDARD.encode(data),
                },
            },
            ContentBlock::Text {
                text: input.to_string(),
            },
        ],
    }
}

#[cfg(test)]
#[path = "converter_tests.rs"]
mod tests;
