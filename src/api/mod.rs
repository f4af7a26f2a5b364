//! Client for the SchoolCafe menu API.
//!
//! [`MenuFetcher`] issues one blocking GET per serving date and hands the body to
//! [`parse_menu_payload`], which flattens the category → items object into
//! [`RawMenuItem`](crate::model::RawMenuItem)s. A day without a menu is an empty
//! list, never an error.

mod client;
mod payload;

pub use client::{MAX_ERROR_BODY, MenuFetcher, MenuSource};
pub use payload::{is_prek_label, parse_menu_payload};

/// Install the ring crypto provider for rustls. Later calls are no-ops.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}
