use std::ops::RangeInclusive;

use crate::models::domain::{FlatSkill, SkillMap};

/// Skill counts a module must fall within to be kept.
pub const SKILLS_PER_MODULE: RangeInclusive<usize> = 5..=10;

/// Output of the normalizer, consumed by generation and by the result assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSkills {
    /// Modules that passed the size filter, before the global cap is applied.
    pub skills: SkillMap,
    /// Skills that will be generated for, after the global cap.
    pub flat_skills: Vec<FlatSkill>,
    pub questions_per_skill: usize,
}

impl NormalizedSkills {
    pub fn total_skills(&self) -> usize {
        self.flat_skills.len()
    }

    pub fn total_mcqs_expected(&self) -> usize {
        self.total_skills() * self.questions_per_skill
    }
}

/// Keep modules listing 5–10 skills, in their original order.
pub fn filter_modules(skills: SkillMap) -> SkillMap {
    skills
        .into_iter()
        .filter(|(_, list)| SKILLS_PER_MODULE.contains(&list.len()))
        .map(|(module, mut list)| {
            list.truncate(*SKILLS_PER_MODULE.end());
            (module, list)
        })
        .collect()
}

/// Module order, then skill order within each module.
pub fn flatten(skills: &SkillMap) -> Vec<FlatSkill> {
    skills
        .iter()
        .flat_map(|(module, list)| list.iter().map(move |skill| FlatSkill::new(module, skill)))
        .collect()
}

/// How many skills fit under `max_mcqs` at `questions_per_skill` questions each.
pub fn max_skills(max_mcqs: usize, questions_per_skill: usize) -> usize {
    max_mcqs.checked_div(questions_per_skill).unwrap_or(0)
}

/// Filter, flatten and prefix-cap a skill map. Never fails; zero surviving
/// modules just means zero skills.
pub fn normalize(skills: SkillMap, questions_per_skill: usize, max_mcqs: usize) -> NormalizedSkills {
    let skills = filter_modules(skills);
    let mut flat_skills = flatten(&skills);

    let cap = max_skills(max_mcqs, questions_per_skill);
    if flat_skills.len() > cap {
        log::info!(
            "Capping {} skills to {} ({} MCQs max at {} per skill)",
            flat_skills.len(),
            cap,
            max_mcqs,
            questions_per_skill
        );
        flat_skills.truncate(cap);
    }

    NormalizedSkills {
        skills,
        flat_skills,
        questions_per_skill,
    }
}
