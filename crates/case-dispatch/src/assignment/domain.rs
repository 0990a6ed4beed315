use serde::{Deserialize, Serialize};

/// Identifier wrapper for debt cases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(pub String);

/// Identifier wrapper for disposal organizations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(pub String);

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a single debt case handed to the engine by the case source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDetail {
    pub id: CaseId,
    pub case_code: String,
    pub debtor_name: String,
    #[serde(default)]
    pub debtor_id_card: String,
    #[serde(default)]
    pub debtor_phone: Option<String>,
    pub loan_amount: f64,
    pub remaining_amount: f64,
    pub overdue_days: u32,
    pub region: String,
    pub product_type: String,
    /// Account age in months.
    #[serde(default)]
    pub account_age: u32,
}

/// Disposal organization as supplied by the roster for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationProfile {
    pub id: OrganizationId,
    pub name: String,
    pub region: String,
    pub capacity: u32,
    pub current_load: u32,
    /// Percentage, 0-100.
    pub success_rate: f64,
    /// Percentage, 0-100.
    pub avg_recovery_rate: f64,
    pub avg_disposal_days: f64,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl OrganizationProfile {
    /// Share of declared capacity already in use. Zero-capacity rosters report 0.
    pub fn load_rate(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.current_load as f64 / self.capacity as f64
        }
    }

    pub fn has_specialty_containing(&self, needle: &str) -> bool {
        self.specialties.iter().any(|tag| tag.contains(needle))
    }
}
