//! pagewait: Condition waiters and page objects for end-to-end browser tests
//!
//! UI state changes asynchronously: a list re-renders after a delete, a heading
//! mounts after a network round-trip. A single check is racy, so every
//! page-object wait here polls a fresh query against the live page until the
//! condition holds or a timeout elapses.
//!
//! The browser itself is behind the [`Driver`] trait. Element references
//! ([`ElementFinder`], [`ElementArrayFinder`]) are lazy and re-resolve their
//! selector on every query.
//!
//! # Examples
//!
//! ## Waiting on an entity list
//!
//! ```ignore
//! use pagewait::{Page, by, wait_until_count, wait_until_displayed};
//! use std::time::Duration;
//!
//! async fn delete_last_row(page: &Page) -> pagewait::Result<()> {
//!     let heading = page.element(by::id("shipment-heading"));
//!     wait_until_displayed(&heading, Some(Duration::from_secs(5))).await?;
//!
//!     let rows = page.element_all(by::css("div table .btn-danger"));
//!     let before = rows.count().await?;
//!     rows.last().click().await?;
//!     page.element(by::id("jhi-confirm-delete-shipment")).click().await?;
//!
//!     wait_until_count(&rows, before - 1, Some(Duration::from_secs(5))).await
//! }
//! ```
//!
//! ## Page objects
//!
//! ```ignore
//! use pagewait::pages::{EntityComponentsPage, EntityDeleteDialog, PRODUCT_CATEGORY};
//!
//! let list = EntityComponentsPage::new(&page, &PRODUCT_CATEGORY);
//! list.wait_until_loaded().await?;
//! let before = list.count_delete_buttons().await?;
//! list.click_on_last_delete_button().await?;
//! EntityDeleteDialog::new(&page, &PRODUCT_CATEGORY)
//!     .click_on_confirm_button()
//!     .await?;
//! list.wait_until_delete_buttons_length(before - 1).await?;
//! ```

mod config;
mod driver;
mod element;
mod error;
pub mod fake;
pub mod pages;
mod selector;
mod wait;

// Re-export error types
pub use error::{Error, Result};

// Re-export configuration
pub use config::{
    DEFAULT_POLL_INTERVAL, DEFAULT_WAIT_TIMEOUT, POLL_INTERVAL_ENV, TIMEOUT_ENV, WaitOptions,
};

// Re-export driver capability and element references
pub use driver::Driver;
pub use element::{ElementArrayFinder, ElementFinder, Page, Position};
pub use selector::{Selector, by};

// Re-export the condition waiter
pub use wait::{
    Waiter, wait_until_any_displayed, wait_until_count, wait_until_displayed, wait_until_hidden,
};
