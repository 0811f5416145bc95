//! Report delivery by email: the finished artifact is attached and sent
//! over SMTP to an already validated recipient list.

use std::path::{Path, PathBuf};

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, Message};
use lettre::{SmtpTransport, Transport};

use crate::config::MailConfig;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid mailbox address '{value}': {source}")]
    Address {
        value: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("failed to read report attachment {}: {source}", path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to assemble report email: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("failed to send report email: {0}")]
    Send(#[from] lettre::transport::smtp::Error),
}

/// Sends the report artifact to each recipient. The message subject is the
/// artifact's file name.
pub fn send_report(
    config: &MailConfig,
    recipients: &[String],
    artifact: &Path,
) -> Result<(), MailError> {
    let file_name = artifact
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());

    let mut message = Message::builder()
        .from(parse_mailbox(&config.from)?)
        .subject(file_name.clone());
    for recipient in recipients {
        message = message.to(parse_mailbox(recipient)?);
    }

    let content = std::fs::read(artifact).map_err(|source| MailError::Attachment {
        path: artifact.to_path_buf(),
        source,
    })?;
    let attachment = Attachment::new(file_name).body(content, ContentType::TEXT_PLAIN);

    let email = message.singlepart(attachment)?;
    let transport = SmtpTransport::from_url(&config.smtp_url)?.build();
    transport.send(&email)?;

    tracing::info!(recipients = recipients.len(), "report email sent");
    Ok(())
}

fn parse_mailbox(value: &str) -> Result<Mailbox, MailError> {
    value.parse().map_err(|source| MailError::Address {
        value: value.to_string(),
        source,
    })
}
