//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use smallvec::{SmallVec, smallvec};

use lemon_app::{
    auth::{AuthenticatedUser, MockAuthService},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        categories::{MockCategoriesService, records::CategoryUuid},
        menu_items::{
            MockMenuItemsService,
            records::{MenuItemRecord, MenuItemUuid},
        },
        orders::MockOrdersService,
        users::{
            MockUsersService,
            records::{Role, UserRecord, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

/// Service mocks with no expectations; any unexpected call fails the test.
pub(crate) struct Mocks {
    pub(crate) users: MockUsersService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) menu_items: MockMenuItemsService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) auth: MockAuthService,
}

impl Mocks {
    pub(crate) fn new() -> Self {
        Self {
            users: MockUsersService::new(),
            categories: MockCategoriesService::new(),
            menu_items: MockMenuItemsService::new(),
            carts: MockCartsService::new(),
            orders: MockOrdersService::new(),
            auth: MockAuthService::new(),
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::shared(AppContext {
            users: Arc::new(self.users),
            categories: Arc::new(self.categories),
            menu_items: Arc::new(self.menu_items),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            auth: Arc::new(self.auth),
        })
    }
}

/// Stands in for the auth middleware with a fixed user.
pub(crate) struct InjectUser(pub(crate) AuthenticatedUser);

#[handler]
impl InjectUser {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_authenticated_user(self.0.clone());
        ctrl.call_next(req, depot, res).await;
    }
}

/// A service that runs `route` as `user` against `mocks`.
pub(crate) fn service_as(user: &AuthenticatedUser, mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(InjectUser(user.clone()))
            .push(route),
    )
}

fn user_with(username: &str, roles: SmallVec<[Role; 2]>) -> AuthenticatedUser {
    AuthenticatedUser {
        uuid: UserUuid::new(),
        username: username.to_string(),
        roles,
    }
}

pub(crate) fn manager() -> AuthenticatedUser {
    user_with("mario", smallvec![Role::Manager])
}

pub(crate) fn delivery_crew() -> AuthenticatedUser {
    user_with("adrian", smallvec![Role::DeliveryCrew])
}

pub(crate) fn customer() -> AuthenticatedUser {
    user_with("tilly", smallvec![])
}

pub(crate) fn make_user(username: &str, roles: &[Role]) -> UserRecord {
    UserRecord {
        uuid: UserUuid::new(),
        username: username.to_string(),
        email: format!("{username}@littlelemon.test"),
        roles: roles.iter().copied().collect(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_menu_item(uuid: MenuItemUuid, title: &str, price: u64) -> MenuItemRecord {
    MenuItemRecord {
        uuid,
        title: title.to_string(),
        price,
        featured: false,
        category_uuid: CategoryUuid::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}
