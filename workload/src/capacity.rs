use serde::{Deserialize, Serialize};

/// A designer's declared weekly availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignerCapacity {
    pub designer_name: String,
    pub weekly_available_hours: f64,
}

impl DesignerCapacity {
    pub fn new(designer_name: impl Into<String>, weekly_available_hours: f64) -> Self {
        Self {
            designer_name: designer_name.into(),
            weekly_available_hours,
        }
    }
}
