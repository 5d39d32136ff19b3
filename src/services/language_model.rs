use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use secrecy::ExposeSecret;

use crate::{
    config::Config,
    constants::prompts::AgentProfile,
    errors::{AppError, AppResult},
};

/// "Instructions in, free-form text out." Nothing about the reply's format is guaranteed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, agent: &AgentProfile, instructions: &str) -> AppResult<String>;
}

/// Chat-completions client for any OpenAI-compatible endpoint.
pub struct OpenAiLanguageModel {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAiLanguageModel {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.openai_api_key.expose_secret())
            .with_api_base(&config.openai_api_base);

        Self {
            client: Client::with_config(openai_config),
            model: config.llm_model.clone(),
            temperature: config.llm_temperature,
        }
    }

    fn build_messages(
        agent: &AgentProfile,
        instructions: &str,
    ) -> AppResult<Vec<ChatCompletionRequestMessage>> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(agent.system_prompt())
            .build()?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(instructions)
            .build()?;

        Ok(vec![
            ChatCompletionRequestMessage::System(system),
            ChatCompletionRequestMessage::User(user),
        ])
    }
}

#[async_trait]
impl LanguageModel for OpenAiLanguageModel {
    async fn complete(&self, agent: &AgentProfile, instructions: &str) -> AppResult<String> {
        log::debug!(
            "Calling model {} as '{}' ({} chars of instructions)",
            self.model,
            agent.role,
            instructions.len()
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(Self::build_messages(agent, instructions)?)
            .temperature(self.temperature)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            log::error!("Language model call failed for '{}': {}", agent.role, e);
            AppError::from(e)
        })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                AppError::ModelError(format!("'{}' returned an empty completion", agent.role))
            })
    }
}
