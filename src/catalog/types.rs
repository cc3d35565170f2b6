use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantRecord {
    pub number: String,
    pub article_name: String,
    pub in_stock: i64,
    pub active: bool,
    pub main_variant: bool,
    pub last_stock: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VariantUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ArticleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_variant_active: Option<bool>,
}
