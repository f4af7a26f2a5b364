//! Mailer trait and SMTP implementation.

use lettre::message::{Mailbox, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::{PoolConfig, SmtpTransportBuilder};
use lettre::{Message, SmtpTransport, Transport};
use tracing::{error, info, warn};

use super::EmailMessage;
use crate::config::{MailSettings, SmtpSettings};
use crate::error::SendError;

/// Recipients a message actually reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendReport {
    pub delivered: Vec<String>,
}

/// Delivery seam for rendered notifications.
///
/// Every recipient is attempted; if any of them fails the whole send is an
/// error listing the failed addresses.
pub trait Mailer {
    fn send(&self, message: &EmailMessage) -> Result<SendReport, SendError>;
}

/// Blocking SMTP mailer using STARTTLS and login credentials.
///
/// The transport keeps a pool of at most one connection, so a send logs in once
/// and delivers to every recipient over that session. The session is closed when
/// the mailer is dropped.
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(smtp: &SmtpSettings, mail: &MailSettings) -> Result<Self, SendError> {
        crate::api::install_crypto_provider();

        let from: Mailbox = mail
            .sender_email
            .parse()
            .map_err(|_| SendError::Address(mail.sender_email.clone()))?;

        let builder = SmtpTransport::starttls_relay(&smtp.server)
            .map_err(|e| SendError::Transport(e.to_string()))?
            .port(smtp.port)
            .timeout(Some(smtp.timeout))
            .credentials(Credentials::new(
                mail.sender_email.clone(),
                mail.sender_password.clone(),
            ));

        info!("SMTP transport ready for {}:{}", smtp.server, smtp.port);
        Ok(Self::with_builder(builder, from))
    }

    fn with_builder(builder: SmtpTransportBuilder, from: Mailbox) -> Self {
        let transport = builder
            .pool_config(PoolConfig::new().max_size(1))
            .build();
        Self { transport, from }
    }

    fn build_message(&self, message: &EmailMessage, to: &str) -> Result<Message, SendError> {
        let mailbox: Mailbox = to
            .parse()
            .map_err(|_| SendError::Address(to.to_string()))?;

        Message::builder()
            .from(self.from.clone())
            .to(mailbox)
            .subject(&message.subject)
            .singlepart(SinglePart::html(message.html_body.clone()))
            .map_err(|e| SendError::Build(e.to_string()))
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, message: &EmailMessage) -> Result<SendReport, SendError> {
        if message.recipients.is_empty() {
            return Err(SendError::Build("at least one recipient required".into()));
        }

        let mut report = SendReport::default();
        let mut failed = Vec::new();

        for recipient in message.recipients.iter() {
            let outcome = self
                .build_message(message, recipient)
                .and_then(|email| {
                    self.transport
                        .send(&email)
                        .map_err(|e| SendError::Transport(e.to_string()))
                });
            match outcome {
                Ok(_) => {
                    info!("Email sent to {}", crate::config::mask(recipient));
                    report.delivered.push(recipient.to_string());
                }
                Err(e) => {
                    error!("Failed to send to {}: {}", crate::config::mask(recipient), e);
                    failed.push(recipient.to_string());
                }
            }
        }

        if !failed.is_empty() {
            if !report.delivered.is_empty() {
                warn!(
                    "Partially delivered: {}/{} recipient(s)",
                    report.delivered.len(),
                    message.recipients.len()
                );
            }
            return Err(SendError::Delivery {
                failed,
                delivered: report.delivered.len(),
            });
        }

        info!("Delivered to {} recipient(s)", report.delivered.len());
        Ok(report)
    }
}
