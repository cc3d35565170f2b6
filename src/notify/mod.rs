pub mod smtp;
pub mod template;

use crate::error::NotifyError;
use crate::report::SweepReport;
use regex::Regex;
use std::sync::LazyLock;

pub use smtp::SmtpNotifier;
pub use template::MailRenderer;

pub const MAIL_SUBJECT: &str = "Automatisch deaktivierte Artikel";

#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

pub trait Notifier {
    fn notify(&self, report: &SweepReport, recipient: &str) -> Result<(), NotifyError>;
}

static ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("address pattern")
});

pub fn is_valid_address(addr: &str) -> bool {
    ADDRESS.is_match(addr)
}

/// The configured address wins when it is usable, otherwise the shop's
/// system address takes over. Resolution itself never fails.
pub fn resolve_recipient(configured: &str, system_address: &str) -> String {
    if is_valid_address(configured) {
        configured.to_string()
    } else {
        system_address.to_string()
    }
}
