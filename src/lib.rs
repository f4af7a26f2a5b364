//! # menu-notifier - School lunch menus by email
//!
//! Fetches the lunch menu for a configured school, grade and serving line from the
//! SchoolCafe API, groups it into categories and emails it as an HTML message.
//!
//! ## Features
//!
//! - **Daily run**: tomorrow's full menu with serving sizes, calories and allergens
//! - **Weekly run**: an entrée-only overview of the coming school week
//! - **Pre-K badges**: entrées shared with the Pre-K menu are marked
//! - **Test mode**: `TEST_RUN=true` uses today's menu and mails only the primary recipient
//!
//! ## Quick Start
//!
//! ```bash
//! export SCHOOL_ID=... GRADE=01 SERVING_LINE="Main Line" MEAL_TYPE=Lunch
//!
//! # Preview without sending
//! menu-notifier daily --dry-run > tomorrow.html
//!
//! # Send the weekly overview
//! menu-notifier weekly
//! ```
//!
//! ## Modules
//!
//! - [`api`]: Menu API client and payload parsing
//! - [`config`]: Environment-driven configuration
//! - [`model`]: Menu items, queries and reports
//! - [`normalize`]: Grouping, de-duplication and entrée extraction
//! - [`render`]: HTML email rendering
//! - [`mail`]: Recipients and SMTP delivery

/// Menu API client.
pub mod api;

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading from the environment and `.env`.
pub mod config;

/// Error types and result aliases.
///
/// Defines one error enum per stage plus the aggregate `NotifierError`.
pub mod error;

pub mod logging;

/// Email delivery.
pub mod mail;

/// Data models for menus and reports.
pub mod model;

pub mod normalize;

/// Daily and weekly report assembly.
pub mod notifier;

/// HTML rendering of reports.
pub mod render;

pub mod schedule;
