use super::*;

#[test]
fn test_api_request_serialization() {
    let request = ApiRequest {
        model: "gpt-4o".to_string(),
        messages: vec![ApiMessage {
            role: "user".to_string(),
            content: MessageContent::Text("Hello".to_string()),
        }],
        max_tokens: None,
    };

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["model"], "gpt-4o");
    assert_eq!(json["messages"][0]["role"], "user");
    assert_eq!(json["messages"][0]["content"], "Hello");
    assert!(json.get("max_tokens").is_none());
}

#[test]
fn test_api_request_with_max_tokens() {
    let request = ApiRequest {
        model: "gpt-4o".to_string(),
        messages: vec![],
        max_tokens: Some(1000),
    };

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["max_tokens"], 1000);
}

#[test]
fn test_content_parts_serialization() {
    let content = MessageContent::Parts(vec![
        ContentPart::Text {
            text: "What is this?".to_string(),
        },
        ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: "data:image/png;base64,abc".to_string(),
            },
        },
    ]);

    let json = serde_json::to_value(&content).unwrap();
    assert_eq!(json[0]["type"], "text");
    assert_eq!(json[0]["text"], "What is this?");
    assert_eq!(json[1]["type"], "image_url");
    assert_eq!(json[1]["image_url"]["url"], "data:image/png;base64,abc");
}

#[test]
fn test_api_response_deserialization() {
    let json = serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "Hello!", "refusal": null},
            "logprobs": null,
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 10,
            "completion_tokens": 5,
            "total_tokens": 15,
            "prompt_tokens_details": {"cached_tokens": 0}
        }
    });

    let response: ApiResponse = serde_json::from_value(json).unwrap();
    assert_eq!(response.id, "chatcmpl-123");
    assert_eq!(response.choices.len(), 1);
    assert_eq!(response.choices[0].message.content.as_deref(), Some("Hello!"));
    assert!(response.choices[0].message.refusal.is_none());
    assert_eq!(response.choices[0].finish_reason.as_deref(), Some("stop"));

    let usage = response.usage.unwrap();
    assert_eq!(usage.prompt_tokens, 10);
    assert_eq!(usage.completion_tokens, 5);
    assert_eq!(usage.total_tokens, 15);
}

#[test]
fn test_api_response_refusal_and_missing_usage() {
    let json = serde_json::json!({
        "id": "chatcmpl-456",
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": null, "refusal": "I can't help with that."},
            "finish_reason": "stop"
        }]
    });

    let response: ApiResponse = serde_json::from_value(json).unwrap();
    assert!(response.choices[0].message.content.is_none());
    assert_eq!(
        response.choices[0].message.refusal.as_deref(),
        Some("I can't help with that.")
    );
    assert!(response.usage.is_none());
}
