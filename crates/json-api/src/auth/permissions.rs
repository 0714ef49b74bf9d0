//! Role checks applied by handlers.

use salvo::prelude::StatusError;

use lemon_app::{
    auth::AuthenticatedUser,
    domain::{orders::data::OrderScope, users::records::Role},
};

pub(crate) const NOT_A_MANAGER: &str = "User is not a manager";
pub(crate) const NOT_A_CUSTOMER: &str = "User is not a Customer";
pub(crate) const MENU_EDIT_FORBIDDEN: &str = "Non-Manager cannot edit menu-items";
pub(crate) const ORDER_EDIT_FORBIDDEN: &str = "Customers cannot update orders";
pub(crate) const ORDER_ASSIGN_FORBIDDEN: &str = "Only managers can assign delivery crew";

fn forbidden(brief: &str) -> StatusError {
    StatusError::forbidden().brief(brief.to_string())
}

fn require_role(
    user: &AuthenticatedUser,
    role: Role,
    brief: &str,
) -> Result<(), StatusError> {
    if user.has_role(role) {
        Ok(())
    } else {
        Err(forbidden(brief))
    }
}

pub(crate) fn require_manager(user: &AuthenticatedUser) -> Result<(), StatusError> {
    require_role(user, Role::Manager, NOT_A_MANAGER)
}

pub(crate) fn require_menu_editor(user: &AuthenticatedUser) -> Result<(), StatusError> {
    require_role(user, Role::Manager, MENU_EDIT_FORBIDDEN)
}

pub(crate) fn require_customer(user: &AuthenticatedUser) -> Result<(), StatusError> {
    if user.is_customer() {
        Ok(())
    } else {
        Err(forbidden(NOT_A_CUSTOMER))
    }
}

/// Managers see every order, delivery crew their assignments, customers their own.
pub(crate) fn order_scope(user: &AuthenticatedUser) -> OrderScope {
    if user.is_manager() {
        OrderScope::All
    } else if user.is_delivery_crew() {
        OrderScope::AssignedTo(user.uuid)
    } else {
        OrderScope::PlacedBy(user.uuid)
    }
}

/// Managers may change anything on an order; delivery crew only the status.
pub(crate) fn order_update_scope(
    user: &AuthenticatedUser,
    assigns_crew: bool,
) -> Result<OrderScope, StatusError> {
    match order_scope(user) {
        OrderScope::PlacedBy(_) => Err(forbidden(ORDER_EDIT_FORBIDDEN)),
        OrderScope::AssignedTo(_) if assigns_crew => Err(forbidden(ORDER_ASSIGN_FORBIDDEN)),
        scope => Ok(scope),
    }
}
