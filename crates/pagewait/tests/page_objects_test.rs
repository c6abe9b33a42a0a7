// Integration tests for the entity page objects
//
// Drives the list page / delete dialog pair through the delete flow the
// generated e2e suites run for every entity, against a scripted fake page.

mod common;

use pagewait::fake::{FakeDriver, FakeNode};
use pagewait::pages::{
    CREATE_BUTTON_ID, DELETE_BUTTONS_CSS, EntityComponentsPage, EntityDeleteDialog, EntityPage,
    NOTIFICATION, PRODUCT_CATEGORY, SHIPMENT,
};
use pagewait::{Error, Position, by};
use std::sync::Arc;
use std::time::Duration;

/// Lays out a loaded entity list with `rows` rows and wires the delete flow:
/// clicking a delete button opens the dialog, confirming removes the last row
/// after a short server round-trip and closes the dialog.
fn entity_list(driver: &Arc<FakeDriver>, entity: &EntityPage, rows: usize) {
    let delete_buttons = by::css(DELETE_BUTTONS_CSS);
    let question = by::id(entity.delete_question_id);
    let confirm = by::id(entity.confirm_delete_id);

    driver.add(&by::id(entity.heading_id), FakeNode::visible(entity.name));
    driver.add(&by::id(CREATE_BUTTON_ID), FakeNode::visible("Create"));
    driver.add_nodes(&delete_buttons, rows);

    driver.on_click(&delete_buttons, {
        let question = question.clone();
        let confirm = confirm.clone();
        move |d| {
            d.add(&question, FakeNode::visible("Are you sure?"));
            d.add(&confirm, FakeNode::visible("Delete"));
        }
    });

    let weak = Arc::downgrade(driver);
    driver.on_click(&confirm.clone(), move |d| {
        d.clear(&question);
        d.clear(&confirm);
        if let Some(driver) = weak.upgrade() {
            let delete_buttons = delete_buttons.clone();
            driver.schedule(Duration::from_millis(250), move |d| {
                d.remove_last(&delete_buttons);
            });
        }
    });
}

async fn run_delete_flow(entity: EntityPage) -> anyhow::Result<()> {
    let (driver, page) = common::fake_page();
    entity_list(&driver, &entity, 3);

    let list = EntityComponentsPage::with_waiter(&page, &entity, common::waiter());
    let dialog = EntityDeleteDialog::new(&page, &entity);

    list.wait_until_loaded().await?;
    assert_eq!(list.title().text().await?, entity.name);

    let before = list.count_delete_buttons().await?;
    assert_eq!(before, 3);

    list.click_on_last_delete_button().await?;
    common::waiter()
        .until_displayed(dialog.dialog_title(), None)
        .await?;
    dialog.click_on_confirm_button().await?;

    list.wait_until_delete_buttons_length(before - 1).await?;
    assert_eq!(list.count_delete_buttons().await?, 2);
    assert!(!dialog.dialog_title().is_present().await?);

    let clicks = driver.clicks();
    assert_eq!(
        clicks,
        vec![
            (by::css(DELETE_BUTTONS_CSS), 2),
            (by::id(entity.confirm_delete_id), 0),
        ]
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_shipment_delete_flow() {
    common::init_tracing();
    run_delete_flow(SHIPMENT).await.expect("shipment delete flow");
}

#[tokio::test(start_paused = true)]
async fn test_notification_delete_flow() {
    common::init_tracing();
    run_delete_flow(NOTIFICATION)
        .await
        .expect("notification delete flow");
}

#[tokio::test(start_paused = true)]
async fn test_product_category_delete_flow() {
    common::init_tracing();
    run_delete_flow(PRODUCT_CATEGORY)
        .await
        .expect("product category delete flow");
}

#[tokio::test(start_paused = true)]
async fn test_wait_until_loaded_times_out_on_empty_table() {
    common::init_tracing();
    let (driver, page) = common::fake_page();
    driver.add(&by::id(SHIPMENT.heading_id), FakeNode::visible("Shipments"));

    let list = EntityComponentsPage::with_waiter(&page, &SHIPMENT, common::waiter());
    let err = list.wait_until_loaded().await.expect_err("No rows ever load");

    assert!(err.is_timeout());
    assert!(err.to_string().starts_with("shipment list did not load: Timeout after 5s"));
}

#[tokio::test(start_paused = true)]
async fn test_delete_buttons_length_with_explicit_timeout() {
    common::init_tracing();
    let (driver, page) = common::fake_page();
    driver.add_nodes(&by::css(DELETE_BUTTONS_CSS), 1);

    let list = EntityComponentsPage::new(&page, &PRODUCT_CATEGORY);
    let err = list
        .wait_until_delete_buttons_length_within(0, Some(Duration::from_millis(300)))
        .await
        .expect_err("Row is never deleted");
    assert!(err.to_string().contains("(last observed: 1)"));

    driver.clear(&by::css(DELETE_BUTTONS_CSS));
    list.wait_until_delete_buttons_length(0)
        .await
        .expect("Empty table satisfies length 0");
}

#[tokio::test]
async fn test_create_button_click() {
    common::init_tracing();
    let (driver, page) = common::fake_page();
    driver.add(&by::id(CREATE_BUTTON_ID), FakeNode::visible("Create a new Notification"));

    let list = EntityComponentsPage::new(&page, &NOTIFICATION);
    list.click_on_create_button().await.expect("click create");

    assert_eq!(driver.clicks(), vec![(by::id(CREATE_BUTTON_ID), 0)]);
}

#[tokio::test]
async fn test_click_on_last_delete_button_with_no_rows() {
    common::init_tracing();
    let (_driver, page) = common::fake_page();
    let list = EntityComponentsPage::new(&page, &SHIPMENT);

    let err = list
        .click_on_last_delete_button()
        .await
        .expect_err("Nothing to click");
    assert!(matches!(err, Error::ElementNotFound(_)));
    assert_eq!(list.delete_buttons().last().position(), Position::Last);
    assert_eq!(list.count_delete_buttons().await.unwrap(), 0);
}
