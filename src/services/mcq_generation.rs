use futures::stream::{self, StreamExt, TryStreamExt};
use serde_json::Value;

use crate::{
    config::PipelineLimits,
    constants::prompts::{mcq_generation_prompt, ASSESSMENT_GENERATOR},
    errors::AppResult,
    models::domain::{FlatSkill, Mcq},
    services::{
        json_recovery::{recover_json_object, response_prefix, JsonRecoveryError},
        language_model::LanguageModel,
    },
};

const DIAGNOSTIC_PREFIX_CHARS: usize = 1000;

/// Contiguous groups of at most `chunk_size` skills; the last group may be shorter.
pub fn chunk_skills(flat_skills: &[FlatSkill], chunk_size: usize) -> Vec<&[FlatSkill]> {
    flat_skills.chunks(chunk_size.max(1)).collect()
}

/// The first `excerpt_chars` characters of the content, shared by every chunk.
pub fn content_excerpt(content: &str, excerpt_chars: usize) -> &str {
    response_prefix(content, excerpt_chars)
}

/// Pull valid questions out of a chunk reply.
///
/// A missing or non-array `mc_questions` yields no questions. Entries that do
/// not fit the MCQ shape are skipped individually.
pub fn parse_chunk_reply(reply: &str) -> Result<Vec<Mcq>, JsonRecoveryError> {
    let mut object = recover_json_object(reply)?;

    let entries = match object.remove("mc_questions") {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            log::warn!("'mc_questions' is not a list (got {}), ignoring it", other);
            return Ok(Vec::new());
        }
        None => return Ok(Vec::new()),
    };

    let total = entries.len();
    let questions: Vec<Mcq> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Mcq>(entry) {
            Ok(mcq) => Some(mcq),
            Err(e) => {
                log::warn!("Dropping malformed MCQ entry: {}", e);
                None
            }
        })
        .collect();

    if questions.len() < total {
        log::warn!("Kept {} of {} MCQ entries", questions.len(), total);
    }
    Ok(questions)
}

async fn generate_chunk(
    model: &dyn LanguageModel,
    index: usize,
    chunk: &[FlatSkill],
    questions_per_skill: usize,
    excerpt: &str,
) -> AppResult<Vec<Mcq>> {
    log::info!(
        "Generating MCQs for chunk {} ({} skill(s), {} question(s) requested)",
        index + 1,
        chunk.len(),
        chunk.len() * questions_per_skill
    );

    let prompt = mcq_generation_prompt(chunk, questions_per_skill, excerpt);
    let reply = model.complete(&ASSESSMENT_GENERATOR, &prompt).await?;

    match parse_chunk_reply(&reply) {
        Ok(questions) => Ok(questions),
        Err(e) => {
            log::warn!(
                "JSON parsing error in chunk {} ({}), skipping it:\n{}",
                index + 1,
                e,
                response_prefix(&reply, DIAGNOSTIC_PREFIX_CHARS)
            );
            Ok(Vec::new())
        }
    }
}

/// Generate MCQs chunk by chunk and concatenate them in chunk order.
///
/// A chunk whose reply cannot be parsed contributes nothing; a failed model
/// call aborts the whole generation.
pub async fn generate_mcqs(
    model: &dyn LanguageModel,
    flat_skills: &[FlatSkill],
    questions_per_skill: usize,
    content: &str,
    limits: &PipelineLimits,
) -> AppResult<Vec<Mcq>> {
    let excerpt = content_excerpt(content, limits.excerpt_chars);
    let chunks = chunk_skills(flat_skills, limits.chunk_size);

    let per_chunk: Vec<Vec<Mcq>> = stream::iter(chunks.into_iter().enumerate())
        .map(|(index, chunk)| generate_chunk(model, index, chunk, questions_per_skill, excerpt))
        .buffered(limits.chunk_concurrency.max(1))
        .try_collect()
        .await?;

    Ok(per_chunk.into_iter().flatten().collect())
}
