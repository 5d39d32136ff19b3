use std::sync::Arc;

use crate::{
    config::PipelineLimits,
    errors::{AppError, AppResult},
    models::{domain::Mcq, dto::response::QuizResult},
    services::{
        language_model::LanguageModel,
        mcq_generation::{chunk_skills, generate_mcqs},
        pdf_extractor,
        skill_extraction::extract_skills,
        skill_normalizer::{normalize, NormalizedSkills},
    },
};

/// Where a request currently is in the pipeline. Used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Extracting,
    ExtractingSkills,
    Normalizing,
    GeneratingChunks { chunks: usize },
    Assembling,
    Done,
    Failed,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::Extracting => write!(f, "extracting"),
            PipelineStage::ExtractingSkills => write!(f, "extracting_skills"),
            PipelineStage::Normalizing => write!(f, "normalizing"),
            PipelineStage::GeneratingChunks { chunks } => write!(f, "generating_chunks({})", chunks),
            PipelineStage::Assembling => write!(f, "assembling"),
            PipelineStage::Done => write!(f, "done"),
            PipelineStage::Failed => write!(f, "failed"),
        }
    }
}

fn enter(stage: PipelineStage) {
    log::info!("Quiz pipeline stage: {}", stage);
}

/// Package the normalizer output and generated questions into the response body.
pub fn assemble(normalized: NormalizedSkills, mc_questions: Vec<Mcq>) -> QuizResult {
    QuizResult {
        total_skills: normalized.total_skills(),
        total_mcqs_expected: normalized.total_mcqs_expected(),
        actual_mcqs: mc_questions.len(),
        skills: normalized.skills,
        mc_questions,
    }
}

/// PDF -> skills -> capped skill list -> chunked MCQs -> [`QuizResult`].
///
/// Stateless between calls; one instance is shared by every request.
pub struct QuizPipeline {
    model: Arc<dyn LanguageModel>,
    limits: PipelineLimits,
}

impl QuizPipeline {
    pub fn new(model: Arc<dyn LanguageModel>, limits: PipelineLimits) -> Self {
        Self { model, limits }
    }

    pub fn limits(&self) -> &PipelineLimits {
        &self.limits
    }

    /// Run the whole pipeline on raw PDF bytes.
    ///
    /// Fails with [`AppError::PdfUnreadable`] before any model call when no
    /// text can be extracted.
    pub async fn run_pdf(&self, pdf_bytes: Vec<u8>, questions_per_skill: usize) -> AppResult<QuizResult> {
        enter(PipelineStage::Extracting);
        let content = tokio::task::spawn_blocking(move || pdf_extractor::extract_text(&pdf_bytes))
            .await
            .map_err(|e| AppError::InternalError(format!("PDF extraction task failed: {}", e)))?;
        if content.trim().is_empty() {
            enter(PipelineStage::Failed);
            return Err(AppError::PdfUnreadable);
        }

        self.run(&content, questions_per_skill).await
    }

    /// Run the pipeline on already-extracted text.
    pub async fn run(&self, content: &str, questions_per_skill: usize) -> AppResult<QuizResult> {
        if questions_per_skill == 0 {
            return Err(AppError::ValidationError(
                "questions per skill must be positive".to_string(),
            ));
        }

        let result = self.run_stages(content, questions_per_skill).await;
        match &result {
            Ok(quiz) => {
                log::info!(
                    "Quiz ready: {} skill(s), {} of {} expected MCQs",
                    quiz.total_skills,
                    quiz.actual_mcqs,
                    quiz.total_mcqs_expected
                );
                enter(PipelineStage::Done);
            }
            Err(e) => {
                log::error!("Quiz pipeline aborted: {}", e);
                enter(PipelineStage::Failed);
            }
        }
        result
    }

    async fn run_stages(&self, content: &str, questions_per_skill: usize) -> AppResult<QuizResult> {
        enter(PipelineStage::ExtractingSkills);
        let skills = extract_skills(self.model.as_ref(), content).await?;

        enter(PipelineStage::Normalizing);
        let normalized = normalize(skills, questions_per_skill, self.limits.max_mcqs);

        enter(PipelineStage::GeneratingChunks {
            chunks: chunk_skills(&normalized.flat_skills, self.limits.chunk_size).len(),
        });
        let mc_questions = generate_mcqs(
            self.model.as_ref(),
            &normalized.flat_skills,
            questions_per_skill,
            content,
            &self.limits,
        )
        .await?;

        enter(PipelineStage::Assembling);
        Ok(assemble(normalized, mc_questions))
    }
}
