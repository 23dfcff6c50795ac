use serde::{Deserialize, Serialize};

/// A recipe step. `step_number` is 1-based and contiguous within a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub step_number: u32,
    pub description: String,
}

/// Step as sent in a create/update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionStep {
    pub step_number: u32,
    pub description: String,
}

impl From<&Instruction> for InstructionStep {
    fn from(i: &Instruction) -> Self {
        Self {
            step_number: i.step_number,
            description: i.description.clone(),
        }
    }
}
