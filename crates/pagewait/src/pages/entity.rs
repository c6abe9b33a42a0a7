// Entity list page and delete dialog page objects

use crate::element::{ElementArrayFinder, ElementFinder, Page};
use crate::error::Result;
use crate::selector::by;
use crate::wait::Waiter;
use std::time::Duration;

/// Id of the "create new entity" button shared by every entity list view.
pub const CREATE_BUTTON_ID: &str = "jh-create-entity";

/// CSS matching the per-row delete buttons of an entity table.
pub const DELETE_BUTTONS_CSS: &str = "div table .btn-danger";

/// Element ids that vary between entity views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityPage {
    /// Entity name as it appears in routes, e.g. `product-category`
    pub name: &'static str,
    /// Id of the list view heading
    pub heading_id: &'static str,
    /// Id of the delete dialog's question text
    pub delete_question_id: &'static str,
    /// Id of the delete dialog's confirm button
    pub confirm_delete_id: &'static str,
}

/// Shipment list view (invoice service).
pub const SHIPMENT: EntityPage = EntityPage {
    name: "shipment",
    heading_id: "shipment-heading",
    delete_question_id: "storeApp.invoiceShipment.delete.question",
    confirm_delete_id: "jhi-confirm-delete-shipment",
};

/// Notification list view (notification service).
pub const NOTIFICATION: EntityPage = EntityPage {
    name: "notification",
    heading_id: "notification-heading",
    delete_question_id: "storeApp.notificationNotification.delete.question",
    confirm_delete_id: "jhi-confirm-delete-notification",
};

/// Product category list view.
pub const PRODUCT_CATEGORY: EntityPage = EntityPage {
    name: "product-category",
    heading_id: "product-category-heading",
    delete_question_id: "storeApp.productCategory.delete.question",
    confirm_delete_id: "jhi-confirm-delete-productCategory",
};

/// Page object for an entity list view.
///
/// # Example
///
/// ```ignore
/// use pagewait::pages::{EntityComponentsPage, SHIPMENT};
///
/// let shipments = EntityComponentsPage::new(&page, &SHIPMENT);
/// shipments.wait_until_loaded().await?;
/// let before = shipments.count_delete_buttons().await?;
/// shipments.click_on_last_delete_button().await?;
/// // ... confirm in the dialog ...
/// shipments.wait_until_delete_buttons_length(before - 1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct EntityComponentsPage {
    entity: EntityPage,
    create_button: ElementFinder,
    delete_buttons: ElementArrayFinder,
    title: ElementFinder,
    waiter: Waiter,
}

impl EntityComponentsPage {
    /// Creates the page object with default wait options.
    pub fn new(page: &Page, entity: &EntityPage) -> Self {
        Self::with_waiter(page, entity, Waiter::default())
    }

    /// Creates the page object with a custom waiter.
    pub fn with_waiter(page: &Page, entity: &EntityPage, waiter: Waiter) -> Self {
        Self {
            entity: *entity,
            create_button: page.element(by::id(CREATE_BUTTON_ID)),
            delete_buttons: page.element_all(by::css(DELETE_BUTTONS_CSS)),
            title: page.element(by::id(entity.heading_id)),
            waiter,
        }
    }

    pub fn entity(&self) -> &EntityPage {
        &self.entity
    }

    pub async fn click_on_create_button(&self) -> Result<()> {
        self.create_button.click().await
    }

    pub async fn click_on_last_delete_button(&self) -> Result<()> {
        self.delete_buttons.last().click().await
    }

    pub async fn count_delete_buttons(&self) -> Result<usize> {
        self.delete_buttons.count().await
    }

    /// The list heading. Returned as a reference so callers can wait on it or read its text.
    pub fn title(&self) -> &ElementFinder {
        &self.title
    }

    pub fn delete_buttons(&self) -> &ElementArrayFinder {
        &self.delete_buttons
    }

    /// Waits until the table has rendered at least one row.
    pub async fn wait_until_loaded(&self) -> Result<()> {
        self.waiter
            .until_displayed(&self.delete_buttons.first(), None)
            .await
            .map_err(|e| e.context(format!("{} list did not load", self.entity.name)))
    }

    /// Waits until the table has exactly `length` rows.
    pub async fn wait_until_delete_buttons_length(&self, length: usize) -> Result<()> {
        self.wait_until_delete_buttons_length_within(length, None).await
    }

    /// Like [`wait_until_delete_buttons_length`](Self::wait_until_delete_buttons_length)
    /// with an explicit timeout.
    pub async fn wait_until_delete_buttons_length_within(
        &self,
        length: usize,
        timeout: Option<Duration>,
    ) -> Result<()> {
        self.waiter
            .until_count(&self.delete_buttons, length, timeout)
            .await
    }
}

/// Page object for an entity's delete confirmation dialog.
#[derive(Debug, Clone)]
pub struct EntityDeleteDialog {
    dialog_title: ElementFinder,
    confirm_button: ElementFinder,
}

impl EntityDeleteDialog {
    pub fn new(page: &Page, entity: &EntityPage) -> Self {
        Self {
            dialog_title: page.element(by::id(entity.delete_question_id)),
            confirm_button: page.element(by::id(entity.confirm_delete_id)),
        }
    }

    pub fn dialog_title(&self) -> &ElementFinder {
        &self.dialog_title
    }

    pub async fn click_on_confirm_button(&self) -> Result<()> {
        self.confirm_button.click().await
    }
}
