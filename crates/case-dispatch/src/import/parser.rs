use super::ImportError;
use crate::assignment::{CaseDetail, CaseId, OrganizationId, OrganizationProfile};
use crate::config::parse_flag;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_cases<R: Read>(reader: R) -> Result<Vec<CaseDetail>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut cases = Vec::new();
    for record in csv_reader.deserialize::<CaseRow>() {
        cases.push(record?.into_case());
    }

    Ok(cases)
}

pub(crate) fn parse_organizations<R: Read>(
    reader: R,
) -> Result<Vec<OrganizationProfile>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut organizations = Vec::new();
    for (index, record) in csv_reader.deserialize::<OrganizationRow>().enumerate() {
        // Header is line 1.
        let line = index as u64 + 2;
        organizations.push(record?.into_profile(line)?);
    }

    Ok(organizations)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaseRow {
    id: String,
    case_code: String,
    debtor_name: String,
    #[serde(default)]
    debtor_id_card: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    debtor_phone: Option<String>,
    loan_amount: f64,
    remaining_amount: f64,
    overdue_days: u32,
    region: String,
    product_type: String,
    #[serde(default)]
    account_age: u32,
}

impl CaseRow {
    fn into_case(self) -> CaseDetail {
        CaseDetail {
            id: CaseId(self.id),
            case_code: self.case_code,
            debtor_name: self.debtor_name,
            debtor_id_card: self.debtor_id_card,
            debtor_phone: self.debtor_phone,
            loan_amount: self.loan_amount,
            remaining_amount: self.remaining_amount,
            overdue_days: self.overdue_days,
            region: self.region,
            product_type: self.product_type,
            account_age: self.account_age,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrganizationRow {
    id: String,
    name: String,
    region: String,
    capacity: u32,
    current_load: u32,
    success_rate: f64,
    avg_recovery_rate: f64,
    avg_disposal_days: f64,
    #[serde(default)]
    specialties: String,
    #[serde(default)]
    rating: f64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_active: Option<String>,
}

impl OrganizationRow {
    fn into_profile(self, line: u64) -> Result<OrganizationProfile, ImportError> {
        let is_active = match self.is_active.as_deref() {
            None => true,
            Some(raw) => parse_flag(raw).ok_or_else(|| ImportError::InvalidField {
                line,
                field: "isActive",
                value: raw.to_string(),
            })?,
        };

        Ok(OrganizationProfile {
            id: OrganizationId(self.id),
            name: self.name,
            region: self.region,
            capacity: self.capacity,
            current_load: self.current_load,
            success_rate: self.success_rate,
            avg_recovery_rate: self.avg_recovery_rate,
            avg_disposal_days: self.avg_disposal_days,
            specialties: split_tags(&self.specialties),
            rating: self.rating,
            is_active,
        })
    }
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(|c| c == ';' || c == '|')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
