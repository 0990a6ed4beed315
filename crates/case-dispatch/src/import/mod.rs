//! Loading case batches and organization rosters from platform exports.

mod parser;

use crate::assignment::{CaseDetail, OrganizationProfile};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
    },
    UnsupportedFormat(PathBuf),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read export: {}", err),
            ImportError::Csv(err) => write!(f, "invalid CSV data: {}", err),
            ImportError::Json(err) => write!(f, "invalid JSON data: {}", err),
            ImportError::InvalidField { line, field, value } => {
                write!(f, "line {}: invalid {} value '{}'", line, field, value)
            }
            ImportError::UnsupportedFormat(path) => write!(
                f,
                "unsupported export format for {} (expected .csv or .json)",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::Json(err) => Some(err),
            ImportError::InvalidField { .. } | ImportError::UnsupportedFormat(_) => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(ImportError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

pub struct CaseImporter;

impl CaseImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CaseDetail>, ImportError> {
        let path = path.as_ref();
        let format = ExportFormat::from_path(path)?;
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, format)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        format: ExportFormat,
    ) -> Result<Vec<CaseDetail>, ImportError> {
        match format {
            ExportFormat::Csv => parser::parse_cases(reader),
            ExportFormat::Json => from_json(reader),
        }
    }
}

pub struct OrganizationImporter;

impl OrganizationImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<OrganizationProfile>, ImportError> {
        let path = path.as_ref();
        let format = ExportFormat::from_path(path)?;
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, format)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        format: ExportFormat,
    ) -> Result<Vec<OrganizationProfile>, ImportError> {
        match format {
            ExportFormat::Csv => parser::parse_organizations(reader),
            ExportFormat::Json => from_json(reader),
        }
    }
}

fn from_json<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, ImportError> {
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_is_chosen_by_extension() {
        assert_eq!(
            ExportFormat::from_path(Path::new("batch/cases.CSV")).expect("csv"),
            ExportFormat::Csv
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("roster.json")).expect("json"),
            ExportFormat::Json
        );
        assert!(matches!(
            ExportFormat::from_path(Path::new("roster.xlsx")),
            Err(ImportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn json_roster_imports() {
        let json = r#"[{
            "id": "org-1",
            "name": "Eastern Recovery",
            "region": "Shanghai",
            "capacity": 120,
            "currentLoad": 40,
            "successRate": 78.0,
            "avgRecoveryRate": 31.5,
            "avgDisposalDays": 52.0,
            "specialties": ["credit card"],
            "rating": 4.2,
            "isActive": false
        }]"#;

        let roster = OrganizationImporter::from_reader(json.as_bytes(), ExportFormat::Json)
            .expect("roster imports");

        assert_eq!(roster.len(), 1);
        assert!(!roster[0].is_active);
        assert_eq!(roster[0].current_load, 40);
    }

    #[test]
    fn malformed_json_surfaces_json_error() {
        let result = CaseImporter::from_reader("{ not json".as_bytes(), ExportFormat::Json);
        assert!(matches!(result, Err(ImportError::Json(_))));
    }
}
