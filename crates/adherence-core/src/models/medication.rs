use serde::{Deserialize, Serialize};

/// The medication a prediction is generated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub doses_per_day: u8,
    #[serde(default)]
    pub special_instructions: Vec<String>,
    /// Missing a dose carries clinical risk (e.g. anticoagulants, insulin).
    #[serde(default)]
    pub is_critical: bool,
}

impl Medication {
    pub fn new(id: impl Into<String>, name: impl Into<String>, doses_per_day: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            doses_per_day,
            special_instructions: Vec::new(),
            is_critical: false,
        }
    }

    /// Regimen complexity in [0, 1]: more daily doses and special instructions are harder.
    pub fn complexity(&self) -> f64 {
        let doses = f64::from(self.doses_per_day.saturating_sub(1)) / 3.0;
        let instructions = self.special_instructions.len() as f64 * 0.1;
        (doses + instructions).clamp(0.0, 1.0)
    }
}
