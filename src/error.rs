use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog returned {status} for {url}: {body}")]
    Status { status: u16, url: String, body: String },
    #[error("decoding catalog response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("scan stalled: variant {number} still matched after its update")]
    StalledScan { number: String },
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("rendering notification: {0}")]
    Template(#[from] tera::Error),
    #[error("building mail message: {0}")]
    Message(String),
    #[error("sending mail: {0}")]
    Send(String),
}

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
