use crate::filter::VariantFilter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub filter: VariantFilter,
    pub config_fingerprint: String,
    pub deactivated_variants: u32,
    pub deactivated_articles: u32,
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub number: String,
    pub name: String,
}
