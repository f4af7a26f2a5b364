//! Email delivery.
//!
//! [`EmailMessage`] is the rendered notification, [`Recipients`] the
//! case-insensitively de-duplicated address list, and [`Mailer`] the seam between
//! the pipeline and the transport. [`SmtpMailer`] sends over STARTTLS with
//! [lettre](https://lettre.rs).

mod mailer;
mod message;

pub use mailer::{Mailer, SendReport, SmtpMailer};
pub use message::{EmailMessage, Recipients};
