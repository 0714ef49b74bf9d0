//! Menu Item Errors

use salvo::http::StatusError;
use tracing::error;

use lemon_app::domain::menu_items::MenuItemsServiceError;

pub(crate) fn into_status_error(error: MenuItemsServiceError) -> StatusError {
    match error {
        MenuItemsServiceError::AlreadyExists => {
            StatusError::bad_request().brief("Duplicate menu-items are not allowed")
        }
        MenuItemsServiceError::NotFound => StatusError::not_found().brief("Menu item not found"),
        MenuItemsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown category")
        }
        MenuItemsServiceError::MissingRequiredData
        | MenuItemsServiceError::InvalidData
        | MenuItemsServiceError::InvalidPrice(_) => {
            StatusError::bad_request().brief("Invalid menu-item payload")
        }
        MenuItemsServiceError::Sql(source) => {
            error!("menu item storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
