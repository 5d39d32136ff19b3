use std::env;
use secrecy::SecretString;

/// Tunables of the skill-to-quiz pipeline, passed into it rather than read globally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineLimits {
    /// Ceiling on `skills * questions_per_skill` for one request.
    pub max_mcqs: usize,
    /// Skills sent to the model per generation call.
    pub chunk_size: usize,
    /// Characters of extracted content included with every chunk.
    pub excerpt_chars: usize,
    /// Generation calls allowed in flight at once. Results keep chunk order.
    pub chunk_concurrency: usize,
}

impl Default for PipelineLimits {
    fn default() -> Self {
        Self {
            max_mcqs: 200,
            chunk_size: 10,
            excerpt_chars: 1000,
            chunk_concurrency: 1,
        }
    }
}

impl PipelineLimits {
    /// One chunk holding every skill; the single-call variant of generation.
    pub fn single_shot(self) -> Self {
        Self {
            chunk_size: usize::MAX,
            ..self
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub openai_api_key: SecretString,
    pub openai_api_base: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub limits: PipelineLimits,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = PipelineLimits::default();
        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env_parse("WEB_SERVER_PORT", 8000),
            openai_api_key: SecretString::from(env::var("OPENAI_API_KEY").unwrap_or_default()),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            llm_temperature: env_parse("LLM_TEMPERATURE", 0.3),
            limits: PipelineLimits {
                max_mcqs: env_parse("MAX_MCQS", defaults.max_mcqs),
                chunk_size: env_parse("SKILL_CHUNK_SIZE", defaults.chunk_size),
                excerpt_chars: env_parse("CONTENT_EXCERPT_CHARS", defaults.excerpt_chars),
                chunk_concurrency: env_parse("CHUNK_CONCURRENCY", defaults.chunk_concurrency),
            },
        }
    }

    /// Validate that the configuration can actually serve requests.
    /// Panics on a missing model credential or zero-valued limits.
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.openai_api_key.expose_secret().trim().is_empty() {
            panic!("FATAL: OPENAI_API_KEY is not set! The language model cannot be reached without it.");
        }

        if self.limits.max_mcqs == 0 || self.limits.chunk_size == 0 {
            panic!(
                "FATAL: MAX_MCQS ({}) and SKILL_CHUNK_SIZE ({}) must both be positive.",
                self.limits.max_mcqs, self.limits.chunk_size
            );
        }

        if self.limits.chunk_concurrency == 0 {
            panic!("FATAL: CHUNK_CONCURRENCY must be at least 1.");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
            openai_api_key: SecretString::from("sk-test".to_string()),
            openai_api_base: "http://localhost:1234/v1".to_string(),
            llm_model: "test-model".to_string(),
            llm_temperature: 0.0,
            limits: PipelineLimits::default(),
        }
    }
}
