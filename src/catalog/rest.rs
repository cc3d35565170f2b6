use super::{types::*, Catalog};
use crate::config;
use crate::error::CatalogError;
use crate::filter::VariantFilter;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub struct RestCatalog {
    client: reqwest::blocking::Client,
    base_url: String,
    api_user: String,
    api_key: String,
}

impl RestCatalog {
    pub fn new(shop: &config::Shop) -> Result<Self, CatalogError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(shop.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: shop.base_url.trim_end_matches('/').to_string(),
            api_user: shop.api_user.clone(),
            api_key: shop.api_key.clone(),
        })
    }

    pub fn ping(&self) -> Result<String, CatalogError> {
        let url = self.url("version");
        let value: serde_json::Value = self.get_json(&url, &[])?;
        Ok(value
            .pointer("/data/version")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    fn get_json<O: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<O, CatalogError> {
        debug!("GET {url}");
        let resp = self
            .client
            .get(url)
            .basic_auth(&self.api_user, Some(&self.api_key))
            .query(query)
            .send()?;
        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|source| CatalogError::Decode {
            url: url.to_string(),
            source,
        })
    }

    fn put_json<B: serde::Serialize>(&self, url: &str, body: &B) -> Result<(), CatalogError> {
        debug!("PUT {url}");
        let resp = self
            .client
            .put(url)
            .basic_auth(&self.api_user, Some(&self.api_key))
            .query(&[("useNumberAsId", "true")])
            .json(body)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text()?;
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }
        Ok(())
    }
}

fn filter_query(filter: &VariantFilter) -> Vec<(String, String)> {
    let mut query = vec![
        ("filter[0][property]".to_string(), "inStock".to_string()),
        ("filter[0][value]".to_string(), filter.in_stock.to_string()),
        ("filter[1][property]".to_string(), "active".to_string()),
        (
            "filter[1][value]".to_string(),
            (filter.active as i32).to_string(),
        ),
    ];
    if let Some(last_stock) = filter.last_stock {
        query.push(("filter[2][property]".to_string(), "lastStock".to_string()));
        query.push((
            "filter[2][value]".to_string(),
            (last_stock as i32).to_string(),
        ));
    }
    query
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    data: Vec<WireVariant>,
}

// Wire shape of the shop admin API: a variant row carries its parent
// article inline, and kind == 1 marks the article's main variant.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireVariant {
    number: String,
    #[serde(default)]
    in_stock: i64,
    #[serde(default)]
    active: bool,
    #[serde(default)]
    kind: i32,
    #[serde(default)]
    last_stock: bool,
    #[serde(default)]
    article: WireArticle,
}

#[derive(Debug, Default, Deserialize)]
struct WireArticle {
    #[serde(default)]
    name: String,
}

impl From<WireVariant> for VariantRecord {
    fn from(wire: WireVariant) -> Self {
        VariantRecord {
            number: wire.number,
            article_name: wire.article.name,
            in_stock: wire.in_stock,
            active: wire.active,
            main_variant: wire.kind == 1,
            last_stock: wire.last_stock,
        }
    }
}

impl Catalog for RestCatalog {
    fn list_variants(
        &self,
        filter: &VariantFilter,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<VariantRecord>, CatalogError> {
        let url = self.url("variants");
        let mut query = filter_query(filter);
        query.push(("start".to_string(), offset.to_string()));
        query.push(("limit".to_string(), limit.to_string()));
        let resp: ListResponse = self.get_json(&url, &query)?;
        Ok(resp.data.into_iter().map(VariantRecord::from).collect())
    }

    fn update_variant(&self, number: &str, update: &VariantUpdate) -> Result<(), CatalogError> {
        let url = self.url(&format!("variants/{number}"));
        self.put_json(&url, update)
    }

    fn update_article(&self, number: &str, update: &ArticleUpdate) -> Result<(), CatalogError> {
        let url = self.url(&format!("articles/{number}"));
        let mut body = serde_json::Map::new();
        if let Some(active) = update.active {
            body.insert("active".to_string(), active.into());
        }
        if let Some(main_active) = update.main_variant_active {
            body.insert(
                "mainDetail".to_string(),
                serde_json::json!({ "active": main_active }),
            );
        }
        self.put_json(&url, &body)
    }
}
