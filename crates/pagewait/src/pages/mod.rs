// Page objects for the store application's entity views
//
// Every generated entity list view has the same shape: a heading, a create
// button, a table with one delete button per row, and a delete confirmation
// dialog. Only the element ids differ, so one pair of page objects is
// parameterized by an `EntityPage` descriptor.

mod entity;

pub use entity::{
    CREATE_BUTTON_ID, DELETE_BUTTONS_CSS, EntityComponentsPage, EntityDeleteDialog, EntityPage,
    NOTIFICATION, PRODUCT_CATEGORY, SHIPMENT,
};
