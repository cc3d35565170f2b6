use super::{EmailMessage, MAIL_SUBJECT};
use crate::error::NotifyError;
use crate::report::SweepReport;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera, Value};
use unicode_normalization::UnicodeNormalization;

pub struct MailRenderer {
    engine: Tera,
}

#[derive(Debug, Serialize)]
struct Row {
    position: usize,
    number: String,
    name: String,
}

impl MailRenderer {
    pub fn new() -> Result<Self, NotifyError> {
        let mut engine = Tera::default();
        engine.add_raw_templates(vec![
            (
                "notification.txt",
                include_str!("../../templates/notification.txt"),
            ),
            (
                "notification.html",
                include_str!("../../templates/notification.html"),
            ),
        ])?;
        engine.register_filter("fill", fill);
        Ok(Self { engine })
    }

    pub fn render(
        &self,
        report: &SweepReport,
        recipient: &str,
        shop_name: &str,
    ) -> Result<EmailMessage, NotifyError> {
        let rows: Vec<Row> = report
            .entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| Row {
                position: idx + 1,
                number: entry.number.clone(),
                name: entry.name.nfc().collect(),
            })
            .collect();

        let mut context = Context::new();
        context.insert("articles", &rows);
        context.insert("shop_name", shop_name);

        let text_body = self.engine.render("notification.txt", &context)?;
        let html_body = self.engine.render("notification.html", &context)?;
        Ok(EmailMessage {
            to: recipient.to_string(),
            subject: MAIL_SUBJECT.to_string(),
            text_body,
            html_body,
        })
    }
}

// Pads a column to `width` with trailing spaces; longer values pass through.
fn fill(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let width = args
        .get("width")
        .and_then(Value::as_u64)
        .ok_or_else(|| tera::Error::msg("fill: missing width argument"))? as usize;
    let mut out = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => {
            return Err(tera::Error::msg(format!(
                "fill: unsupported value {other}"
            )));
        }
    };
    let len = out.chars().count();
    if len < width {
        out.push_str(&" ".repeat(width - len));
    }
    Ok(Value::String(out))
}
