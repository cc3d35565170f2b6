use crate::{
    catalog::{ArticleUpdate, Catalog, VariantUpdate},
    config::Config,
    error::{CatalogError, SweepError},
    filter,
    notify::{self, Notifier},
    report::{ReportEntry, SweepReport},
    util::sha256_hex,
};
use std::collections::HashSet;
use tracing::{debug, info};

pub struct SweepJob<C: Catalog, N: Notifier> {
    cfg: Config,
    catalog: C,
    notifier: N,
}

#[derive(Debug)]
pub struct SweepOutput {
    pub report: SweepReport,
    pub notified: Option<String>,
}

impl<C: Catalog, N: Notifier> SweepJob<C, N> {
    pub fn new(cfg: &Config, catalog: C, notifier: N) -> Self {
        Self {
            cfg: cfg.clone(),
            catalog,
            notifier,
        }
    }

    pub fn run(&self) -> Result<SweepOutput, SweepError> {
        let recipient = self.preflight()?;

        let filter = filter::selection(&self.cfg.job);
        info!(
            "scan in_stock={} active={} last_stock={:?} page_size={}",
            filter.in_stock, filter.active, filter.last_stock, self.cfg.catalog.page_size
        );

        let mut entries: Vec<ReportEntry> = Vec::new();
        let mut articles_off: u32 = 0;
        let mut seen: HashSet<String> = HashSet::new();

        loop {
            // Deactivation drops rows out of the filter, so rescanning
            // always starts at offset 0 and stops on an empty page.
            let page = self
                .catalog
                .list_variants(&filter, 0, self.cfg.catalog.page_size)?;
            if page.is_empty() {
                break;
            }
            info!("deactivating {} variants", page.len());

            for variant in &page {
                if self.cfg.catalog.follow_pages && !seen.insert(variant.number.clone()) {
                    return Err(CatalogError::StalledScan {
                        number: variant.number.clone(),
                    }
                    .into());
                }
                entries.push(ReportEntry {
                    number: variant.number.clone(),
                    name: variant.article_name.clone(),
                });
                if variant.main_variant {
                    debug!("deactivating article {} (main variant)", variant.number);
                    self.catalog.update_article(
                        &variant.number,
                        &ArticleUpdate {
                            active: Some(false),
                            main_variant_active: Some(false),
                        },
                    )?;
                    articles_off += 1;
                } else {
                    debug!("deactivating variant {}", variant.number);
                    self.catalog
                        .update_variant(&variant.number, &VariantUpdate { active: Some(false) })?;
                }
            }

            if !self.cfg.catalog.follow_pages {
                break;
            }
        }

        let report = SweepReport {
            filter,
            config_fingerprint: sha256_hex(self.cfg.normalized_for_hash().as_bytes()),
            deactivated_variants: entries.len() as u32,
            deactivated_articles: articles_off,
            entries,
        };

        let notified = match recipient {
            Some(recipient) => {
                info!(
                    "notifying {} about {} deactivations",
                    recipient,
                    report.entries.len()
                );
                self.notifier.notify(&report, &recipient)?;
                Some(recipient)
            }
            None => {
                debug!("notification disabled");
                None
            }
        };

        Ok(SweepOutput { report, notified })
    }

    // Resolves the recipient up front so an unusable mail setup aborts
    // before any variant is touched.
    fn preflight(&self) -> Result<Option<String>, SweepError> {
        if !self.cfg.job.send_notification {
            return Ok(None);
        }
        let recipient =
            notify::resolve_recipient(&self.cfg.job.notify_email, &self.cfg.mail.system_address);
        if !notify::is_valid_address(&recipient) {
            return Err(SweepError::Config(format!(
                "send_notification is on but neither job.notify_email ({:?}) nor \
                 mail.system_address ({:?}) is a usable address",
                self.cfg.job.notify_email, self.cfg.mail.system_address
            )));
        }
        Ok(Some(recipient))
    }
}
