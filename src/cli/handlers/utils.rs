use colored::Colorize;

use super::CommandContext;
use crate::config::MailSettings;
use crate::error::Result;
use crate::mail::{EmailMessage, Mailer, Recipients, SmtpMailer};

/// Mail settings for a send, or `None` for a dry run.
///
/// Called before any network traffic so incomplete settings fail fast.
pub fn mail_settings(ctx: &CommandContext, dry_run: bool) -> Result<Option<&MailSettings>> {
    if dry_run {
        return Ok(None);
    }
    Ok(Some(ctx.config.mail()?))
}

/// Recipients for this run: everyone, or only the primary address in test mode.
pub fn recipients_for(ctx: &CommandContext, mail: &MailSettings) -> Recipients {
    if ctx.config.test_run {
        tracing::info!("TEST_RUN mode - sending only to the primary recipient");
        mail.recipients.only_primary()
    } else {
        mail.recipients.clone()
    }
}

pub fn send_message(ctx: &CommandContext, mail: &MailSettings, message: &EmailMessage) -> Result<()> {
    let mailer = SmtpMailer::new(&ctx.config.smtp, mail)?;
    let report = mailer.send(message)?;
    println!(
        "{} \"{}\" to {} recipient(s)",
        "Sent".green(),
        message.subject,
        report.delivered.len().to_string().cyan()
    );
    Ok(())
}
