use serde::Deserialize;
use validator::Validate;

fn default_num_questions() -> u32 {
    2
}

/// Query string of `POST /run-crew/`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RunCrewParams {
    #[serde(default = "default_num_questions")]
    #[validate(range(min = 1, max = 5, message = "num_questions must be between 1 and 5"))]
    pub num_questions: u32,
}
