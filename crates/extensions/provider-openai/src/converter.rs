//! Message construction for the Chat Completions API.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::api::{ApiMessage, ContentPart, ImageUrl, MessageContent};

/// One user message per turn, in order.
pub fn text_messages(turns: &[&str]) -> Vec<ApiMessage> {
    turns.iter().map(|turn| user_message(MessageContent::Text(turn.to_string()))).collect()
}

/// A single user message carrying the prompt and the image as a data URL.
pub fn image_message(input: &str, data: &[u8], media_type: &str) -> ApiMessage {
    user_message(MessageContent::Parts(vec![
        ContentPart::Text {
            text: input.to_string(),
        },
        ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: data_url(data, media_type),
            },
        },
    ]))
}

/// `data:<mime>;base64,<payload>`
pub fn data_url(data: &[u8], media_type: &str) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(data))
}

fn user_message(content: MessageContent) -> ApiMessage {
    ApiMessage {
        role: "user".to_string(),
        content,
    }
}
