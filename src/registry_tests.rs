use super::*;
use modelgate_config::{ConfigLoader, ProviderConfig};
use modelgate_protocols::ErrorKind;

fn profile(backend: &str, model: &str) -> ProviderConfig {
    let mut provider = ProviderConfig::new(backend, model);
    provider.api_key = Some("key".to_string());
    provider
}

#[test]
fn test_backend_from_str() {
    assert_eq!("anthropic".parse::<Backend>().unwrap(), Backend::Anthropic);
    assert_eq!("google".parse::<Backend>().unwrap(), Backend::Google);
    assert_eq!("Gemini".parse::<Backend>().unwrap(), Backend::Google);
    assert_eq!(" openai ".parse::<Backend>().unwrap(), Backend::OpenAI);
}

#[test]
fn test_backend_from_str_unknown() {
    let err = "mistral".parse::<Backend>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(err.to_string().contains("mistral"));
}

#[test]
fn test_backend_display_round_trip() {
    for backend in Backend::ALL {
        assert_eq!(backend.to_string().parse::<Backend>().unwrap(), backend);
    }
    assert_eq!(Backend::Google.to_string(), "google");
}

#[test]
fn test_backend_token_fields() {
    assert_eq!(Backend::Anthropic.token_fields().len(), 4);
    assert_eq!(Backend::Google.token_fields().len(), 4);
    assert_eq!(Backend::OpenAI.token_fields(), &["CompletionTokens", "PromptTokens", "TotalTokens"]);
}

#[test]
fn test_connect_each_backend() {
    for (backend, model) in [
        (Backend::Anthropic, "claude-3-5-haiku"),
        (Backend::Google, "gemini-1.5-flash"),
        (Backend::OpenAI, "gpt-4o"),
    ] {
        let driver = connect(backend, model, "key").unwrap();
        assert_eq!(driver.name(), backend.name());
        assert_eq!(driver.model(), model);
        assert!(!driver.has_cache());
    }
}

#[test]
fn test_from_config_default_profile() {
    let mut config = Config::default();
    config.providers.insert("a".to_string(), profile("anthropic", "claude-3-5-haiku"));
    config.providers.insert("g".to_string(), profile("gemini", "gemini-1.5-pro"));
    config.default_provider = Some("g".to_string());

    let driver = from_config(&config, None).unwrap();
    assert_eq!(driver.name(), "google");
    assert_eq!(driver.model(), "gemini-1.5-pro");

    let driver = from_config(&config, Some("a")).unwrap();
    assert_eq!(driver.name(), "anthropic");
}

#[test]
fn test_from_config_loaded_toml() {
    let config = ConfigLoader::load_str(
        r#"
        [providers.local]
        backend = "openai"
        model = "llama3"
        api_key = "none"
        base_url = "http://localhost:11434/v1"
        timeout_seconds = 5
        "#,
    )
    .unwrap();

    let driver = from_config(&config, None).unwrap();
    assert_eq!(driver.name(), "openai");
    assert_eq!(driver.model(), "llama3");
}

#[test]
fn test_from_config_unknown_profile() {
    let config = Config::default();
    let err = from_config(&config, Some("nope")).err().unwrap();
    assert!(matches!(err, Error::Config(ConfigError::UnknownProvider(_))));
}

#[test]
fn test_from_config_missing_api_key() {
    let mut config = Config::default();
    config
        .providers
        .insert("main".to_string(), ProviderConfig::new("openai", "gpt-4o"));

    let err = from_config(&config, None).err().unwrap();
    match err {
        Error::Config(ConfigError::InvalidValue { field, .. }) => {
            assert_eq!(field, "providers.main.api_key");
        }
        other => panic!("Expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn test_from_config_unknown_backend() {
    let mut config = Config::default();
    config.providers.insert("main".to_string(), profile("mistral", "large"));

    let err = from_config(&config, None).err().unwrap();
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue { ref field, .. }) if field == "providers.main.backend"
    ));
}

#[test]
fn test_from_config_ignores_other_invalid_profiles() {
    let mut config = Config::default();
    config.providers.insert("good".to_string(), profile("openai", "gpt-4o"));
    config.providers.insert("bad".to_string(), profile("mistral", "large"));

    assert!(from_config(&config, Some("good")).is_ok());
}
