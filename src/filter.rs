use crate::{catalog::VariantRecord, config};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantFilter {
    pub in_stock: i64,
    pub active: bool,
    pub last_stock: Option<bool>,
}

pub fn selection(job: &config::Job) -> VariantFilter {
    VariantFilter {
        in_stock: 0,
        active: true,
        last_stock: if job.only_last_stock { Some(true) } else { None },
    }
}

impl VariantFilter {
    pub fn matches(&self, variant: &VariantRecord) -> bool {
        variant.in_stock == self.in_stock
            && variant.active == self.active
            && self.last_stock.is_none_or(|ls| variant.last_stock == ls)
    }
}
