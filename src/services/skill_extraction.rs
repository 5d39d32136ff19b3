use serde_json::{Map, Value};

use crate::{
    constants::prompts::{skill_extraction_prompt, SKILL_EXTRACTOR},
    errors::{AppError, AppResult},
    models::domain::SkillMap,
    services::{
        json_recovery::{recover_json_object, response_prefix},
        language_model::LanguageModel,
    },
};

const DIAGNOSTIC_PREFIX_CHARS: usize = 1000;

/// Ask the model to split `content` into modules and list skills for each.
pub async fn extract_skills(model: &dyn LanguageModel, content: &str) -> AppResult<SkillMap> {
    let reply = model
        .complete(&SKILL_EXTRACTOR, &skill_extraction_prompt(content))
        .await?;

    let object = recover_json_object(&reply).map_err(|e| {
        log::error!(
            "Skill extraction reply was not usable JSON ({}):\n{}",
            e,
            response_prefix(&reply, DIAGNOSTIC_PREFIX_CHARS)
        );
        AppError::SkillExtractionFailed(e.to_string())
    })?;

    let skills = coerce_skill_map(object);
    log::info!("Model proposed {} module(s)", skills.len());
    Ok(skills)
}

/// Arrays keep their non-blank string entries; anything else becomes an empty list.
fn coerce_skill_map(object: Map<String, Value>) -> SkillMap {
    object
        .into_iter()
        .map(|(module, value)| {
            let skills = match value {
                Value::Array(items) => items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                        _ => None,
                    })
                    .collect(),
                _ => Vec::new(),
            };
            (module, skills)
        })
        .collect()
}
