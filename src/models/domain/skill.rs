use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Module label -> skill labels, in the order the model listed them.
pub type SkillMap = IndexMap<String, Vec<String>>;

/// One skill tagged with the module it was listed under.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FlatSkill {
    pub module: String,
    pub skill: String,
}

impl FlatSkill {
    pub fn new(module: impl Into<String>, skill: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            skill: skill.into(),
        }
    }

    /// Line used when listing the skill in a generation prompt.
    pub fn prompt_line(&self) -> String {
        format!("- {} ({})", self.skill, self.module)
    }
}
