// Delete flow example against the in-memory driver
//
// Run with:
// RUST_LOG=pagewait=debug cargo run --package pagewait --example delete_flow

use pagewait::fake::{FakeDriver, FakeNode};
use pagewait::pages::{
    DELETE_BUTTONS_CSS, EntityComponentsPage, EntityDeleteDialog, PRODUCT_CATEGORY,
};
use pagewait::{WaitOptions, Waiter, by};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let options = WaitOptions::from_env()?;
    println!("✓ Wait options: {:?} timeout, {:?} poll", options.timeout, options.poll_interval);

    // Build a product category list that renders its rows after 300ms
    let driver = Arc::new(FakeDriver::new());
    let rows = by::css(DELETE_BUTTONS_CSS);
    let confirm = by::id(PRODUCT_CATEGORY.confirm_delete_id);
    driver.add(&by::id(PRODUCT_CATEGORY.heading_id), FakeNode::visible("Product Categories"));
    driver.add(&confirm, FakeNode::visible("Delete"));
    driver.schedule(Duration::from_millis(300), {
        let rows = rows.clone();
        move |d| d.add_nodes(&rows, 3)
    });

    // Confirming a delete removes the last row after a server round-trip
    let weak = Arc::downgrade(&driver);
    driver.on_click(&confirm, move |_| {
        if let Some(driver) = weak.upgrade() {
            let rows = rows.clone();
            driver.schedule(Duration::from_millis(200), move |d| {
                d.remove_last(&rows);
            });
        }
    });

    let page = driver.page();
    let list = EntityComponentsPage::with_waiter(&page, &PRODUCT_CATEGORY, Waiter::new(options));
    let dialog = EntityDeleteDialog::new(&page, &PRODUCT_CATEGORY);

    list.wait_until_loaded().await?;
    println!("✓ List loaded: {}", list.title().text().await?);

    let before = list.count_delete_buttons().await?;
    println!("✓ {} rows", before);

    list.click_on_last_delete_button().await?;
    dialog.click_on_confirm_button().await?;
    list.wait_until_delete_buttons_length(before - 1).await?;
    println!("✓ {} rows after delete", list.count_delete_buttons().await?);

    Ok(())
}
