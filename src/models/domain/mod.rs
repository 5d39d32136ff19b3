pub mod mcq;
pub mod skill;
pub use mcq::{Difficulty, Mcq};
pub use skill::{FlatSkill, SkillMap};
