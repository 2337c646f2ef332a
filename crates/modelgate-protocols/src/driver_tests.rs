use super::*;
use crate::error::ErrorKind;
use crate::types::Usage;

struct EchoDriver {
    model: String,
}

#[async_trait]
impl Driver for EchoDriver {
    fn name(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn query_with_text(&self, input: &str, context: &[String]) -> Result<Completion, DriverError> {
        let fragments = user_turns(input, context, None)
            .into_iter()
            .map(String::from)
            .collect();
        Ok(Completion::new(fragments, Some("echo"), Usage::new()))
    }

    async fn query_with_image(
        &self,
        input: &str,
        fs: &dyn FileSystem,
        path: &str,
    ) -> Result<Completion, DriverError> {
        let (_, content_type) = crate::media::read_image(fs, path).await?;
        Ok(Completion::new(vec![input.to_string(), content_type], None, Usage::new()))
    }
}

fn echo() -> EchoDriver {
    EchoDriver {
        model: "echo-1".to_string(),
    }
}

#[test]
fn test_user_turns_input_only() {
    assert_eq!(user_turns("q", &[], None), vec!["q"]);
}

#[test]
fn test_user_turns_context_order() {
    let context = vec!["c1".to_string(), "c2".to_string()];
    assert_eq!(user_turns("q", &context, None), vec!["q", "c1", "c2"]);
}

#[test]
fn test_user_turns_cache_after_context() {
    let context = vec!["c1".to_string()];
    let cached = vec!["k1".to_string(), "k2".to_string()];
    assert_eq!(
        user_turns("q", &context, Some(&cached)),
        vec!["q", "c1", "k1", "k2"]
    );
}

#[test]
fn test_driver_options_builder() {
    let options = DriverOptions::default()
        .with_base_url("http://localhost:9000")
        .with_max_tokens(100)
        .with_timeout(Duration::from_secs(3));
    assert_eq!(options.base_url.as_deref(), Some("http://localhost:9000"));
    assert_eq!(options.max_tokens, Some(100));
    assert_eq!(options.timeout, Some(Duration::from_secs(3)));
}

#[test]
fn test_driver_options_default() {
    let options = DriverOptions::default();
    assert!(options.base_url.is_none());
    assert!(options.max_tokens.is_none());
    assert!(options.timeout.is_none());
}

#[tokio::test]
async fn test_default_create_cache_unsupported() {
    let mut driver = echo();
    let err = driver
        .create_cache(vec!["ctx".to_string()], Duration::from_secs(60))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cache);
    assert!(!driver.has_cache());
}

#[tokio::test]
async fn test_default_clear_cache_is_noop() {
    let mut driver = echo();
    assert!(driver.clear_cache().await.is_ok());
}

#[tokio::test]
async fn test_trait_object_dispatch() {
    let driver: Box<dyn Driver> = Box::new(echo());
    assert_eq!(driver.name(), "echo");
    assert_eq!(driver.model(), "echo-1");

    let completion = driver
        .query_with_text("hi", &["there".to_string()])
        .await
        .unwrap();
    assert_eq!(completion.fragments, vec!["hi", "there", "stop: echo"]);
}

#[tokio::test]
async fn test_trait_object_image_query() {
    let fs = crate::fs::MapFs::new().with_file("x", &b"GIF89a\x01\x00"[..]);
    let driver: Box<dyn Driver> = Box::new(echo());
    let completion = driver.query_with_image("describe", &fs, "x").await.unwrap();
    assert_eq!(completion.fragments, vec!["describe", "image/gif"]);
}
