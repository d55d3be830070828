use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trainer {
    pub id: String,
    pub name: String,
    pub tech_stack: Vec<String>,
    pub rating: f64,
    pub experience: u32,
}

impl Trainer {
    /// Advisory eligibility check used when shortlisting trainers for a
    /// request. A trainer qualifies when any declared stack token contains
    /// the training's technology string, or the technology string contains
    /// the trainer's primary token. Case-insensitive both ways; callers may
    /// still assign a trainer outside the shortlist.
    pub fn matches_technology(&self, technology: &str) -> bool {
        let tech = technology.to_lowercase();
        self.tech_stack
            .iter()
            .any(|token| token.to_lowercase().contains(&tech))
            || self
                .tech_stack
                .first()
                .map_or(false, |primary| tech.contains(&primary.to_lowercase()))
    }
}
