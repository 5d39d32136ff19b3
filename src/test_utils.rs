use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    constants::prompts::AgentProfile,
    errors::{AppError, AppResult},
    services::language_model::LanguageModel,
};

#[cfg(test)]
pub mod fixtures {
    use serde_json::{json, Value};

    use crate::models::domain::{FlatSkill, SkillMap};

    /// `count` distinct skill labels for `module`.
    pub fn module_skills(module: &str, count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("{} skill {}", module, i)).collect()
    }

    /// A skill map with the given modules and skill counts, in order.
    pub fn skill_map(modules: &[(&str, usize)]) -> SkillMap {
        modules
            .iter()
            .map(|(module, count)| (module.to_string(), module_skills(module, *count)))
            .collect()
    }

    pub fn flat_skills(count: usize) -> Vec<FlatSkill> {
        (1..=count)
            .map(|i| FlatSkill::new(format!("Module {}", (i - 1) / 10 + 1), format!("Skill {}", i)))
            .collect()
    }

    pub fn mcq_value(question: &str) -> Value {
        json!({
            "question": question,
            "answers": ["correct", "wrong 1", "wrong 2", "wrong 3"],
            "topic": "Rust",
            "difficulty": "medium"
        })
    }

    /// A fenced model reply carrying `count` well-formed questions tagged with `tag`.
    pub fn mcq_reply(tag: &str, count: usize) -> String {
        let questions: Vec<Value> = (1..=count)
            .map(|i| mcq_value(&format!("{} question {}", tag, i)))
            .collect();
        format!(
            "Here are your questions:\n```json\n{}\n```",
            json!({ "mc_questions": questions })
        )
    }
}

/// Replays canned replies in call order and records every prompt it receives.
pub struct ScriptedLanguageModel {
    replies: Mutex<VecDeque<AppResult<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLanguageModel {
    pub fn new(replies: Vec<AppResult<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().expect("prompts lock").len()
    }
}

#[async_trait]
impl LanguageModel for ScriptedLanguageModel {
    async fn complete(&self, _agent: &AgentProfile, instructions: &str) -> AppResult<String> {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(instructions.to_string());
        self.replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or_else(|| Err(AppError::ModelError("no scripted reply left".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::constants::prompts::SKILL_EXTRACTOR;

    #[test]
    fn test_fixtures_skill_map() {
        let map = skill_map(&[("A", 2), ("B", 1)]);
        assert_eq!(map["A"], vec!["A skill 1", "A skill 2"]);
        assert_eq!(map["B"], vec!["B skill 1"]);
    }

    #[test]
    fn test_fixtures_flat_skills_group_by_ten() {
        let skills = flat_skills(11);
        assert_eq!(skills[9].module, "Module 1");
        assert_eq!(skills[10].module, "Module 2");
    }

    #[actix_web::test]
    async fn test_scripted_model_replays_in_order() {
        let model = ScriptedLanguageModel::new(vec![Ok("one".into()), Ok("two".into())]);

        assert_eq!(model.complete(&SKILL_EXTRACTOR, "p1").await.unwrap(), "one");
        assert_eq!(model.complete(&SKILL_EXTRACTOR, "p2").await.unwrap(), "two");
        assert!(model.complete(&SKILL_EXTRACTOR, "p3").await.is_err());
        assert_eq!(model.prompts(), vec!["p1", "p2", "p3"]);
    }
}
