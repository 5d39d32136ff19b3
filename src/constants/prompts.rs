use crate::models::domain::FlatSkill;

/// Persona handed to the language model as its system message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentProfile {
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
}

impl AgentProfile {
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}. {}\nYour personal goal is: {}",
            self.role, self.backstory, self.goal
        )
    }
}

pub const SKILL_EXTRACTOR: AgentProfile = AgentProfile {
    role: "Skill Extractor",
    goal: "Extract key skills per module from the learning content",
    backstory: "You are an expert instructional designer and curriculum author.",
};

pub const ASSESSMENT_GENERATOR: AgentProfile = AgentProfile {
    role: "Assessment Generator",
    goal: "Generate multiple-choice questions from skills and content",
    backstory: "You are an experienced learning assessment expert who writes expert-level quizzes.",
};

const SKILL_EXTRACTION_TEMPLATE: &str = "From the following course content, extract skills grouped by modules. \
Each module should have 5 to 10 concise, unique, technical skills. \
Respond strictly in JSON like: {\"Module X: Title\": [\"Skill 1\", \"Skill 2\", ...]}\n\nContent:\n";

const MCQ_SHAPE: &str = "{\"mc_questions\": [{\"question\": \"...\", \"answers\": [\"correct\", \"wrong1\", \"wrong2\", \"wrong3\"], \"topic\": \"...\", \"difficulty\": \"easy|medium|hard\"}, ...]}";

pub fn skill_extraction_prompt(content: &str) -> String {
    format!("{}{}", SKILL_EXTRACTION_TEMPLATE, content)
}

pub fn mcq_generation_prompt(chunk: &[FlatSkill], questions_per_skill: usize, excerpt: &str) -> String {
    let skill_lines = chunk
        .iter()
        .map(FlatSkill::prompt_line)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Generate {total} MCQs based on the following skills. \
Each skill should inspire {per_skill} questions. \
Every question has exactly 4 answers with the correct answer first. \
Respond in JSON: {shape}\n\nSkills:\n{skills}\n\nContent:\n{excerpt}",
        total = questions_per_skill * chunk.len(),
        per_skill = questions_per_skill,
        shape = MCQ_SHAPE,
        skills = skill_lines,
        excerpt = excerpt,
    )
}
