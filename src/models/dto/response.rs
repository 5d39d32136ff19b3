use serde::{Deserialize, Serialize};

use crate::models::domain::{Mcq, SkillMap};

/// Body of a successful `POST /run-crew/`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuizResult {
    pub skills: SkillMap,
    pub total_skills: usize,
    pub total_mcqs_expected: usize,
    pub actual_mcqs: usize,
    pub mc_questions: Vec<Mcq>,
}

/// Body of every non-200 response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
