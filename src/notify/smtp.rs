use super::{MailRenderer, Notifier};
use crate::config;
use crate::error::NotifyError;
use crate::report::SweepReport;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::{Message, SmtpTransport, Transport};
use tracing::debug;

pub struct SmtpNotifier {
    transport: SmtpTransport,
    renderer: MailRenderer,
    mail: config::Mail,
}

impl SmtpNotifier {
    pub fn new(mail: &config::Mail) -> Result<Self, NotifyError> {
        let transport = SmtpTransport::builder_dangerous(&mail.smtp_host)
            .port(mail.smtp_port)
            .build();
        Ok(Self {
            transport,
            renderer: MailRenderer::new()?,
            mail: mail.clone(),
        })
    }

    pub fn verify(&self) -> Result<(), NotifyError> {
        match self.transport.test_connection() {
            Ok(true) => Ok(()),
            Ok(false) => Err(NotifyError::Send("smtp connection test failed".into())),
            Err(err) => Err(NotifyError::Send(format!(
                "smtp connection test failed: {err}"
            ))),
        }
    }

    fn from_mailbox(&self) -> Result<Mailbox, NotifyError> {
        // The dedicated sender address wins; the shop's system address
        // covers setups that configure only one mail identity.
        let address = if self.mail.from_address.is_empty() {
            &self.mail.system_address
        } else {
            &self.mail.from_address
        };
        let parsed = if self.mail.from_name.is_empty() {
            address.parse()
        } else {
            format!("{} <{}>", self.mail.from_name, address).parse()
        };
        parsed.map_err(|err| NotifyError::Message(format!("sender address {address:?}: {err}")))
    }
}

impl Notifier for SmtpNotifier {
    fn notify(&self, report: &SweepReport, recipient: &str) -> Result<(), NotifyError> {
        let email = self.renderer.render(report, recipient, &self.mail.from_name)?;
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|err| NotifyError::Message(format!("recipient {recipient:?}: {err}")))?;
        let message = Message::builder()
            .from(self.from_mailbox()?)
            .to(to)
            .subject(email.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body),
                    ),
            )
            .map_err(|err| NotifyError::Message(err.to_string()))?;
        debug!("smtp send to {recipient} via {}", self.mail.smtp_host);
        self.transport
            .send(&message)
            .map_err(|err| NotifyError::Send(err.to_string()))?;
        Ok(())
    }
}
