//! Test helpers.

use std::{collections::BTreeMap, sync::Arc};

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    accounts::{
        MockAccountsService,
        records::{UserRecord, UserUuid},
    },
    context::AppContext,
    domain::{
        carts::MockCartsService,
        catalog::{
            MockCatalogService,
            records::{BrandUuid, CategoryUuid, ProductRecord, ProductUuid},
        },
        reviews::MockReviewsService,
        wishlists::MockWishlistsService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

/// Well-formed but unissued session token.
pub(crate) const TEST_BEARER_TOKEN: &str = concat!(
    "sf_v1_00000000000000000000000000000000.",
    "0707070707070707070707070707070707070707070707070707070707070707"
);

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    depot.insert_bearer_token(TEST_BEARER_TOKEN);
    ctrl.call_next(req, depot, res).await;
}

/// Service mocks behind a test [`State`]. Unset services reject every call.
pub(crate) struct TestServices {
    pub catalog: MockCatalogService,
    pub carts: MockCartsService,
    pub reviews: MockReviewsService,
    pub wishlists: MockWishlistsService,
    pub accounts: MockAccountsService,
}

impl Default for TestServices {
    fn default() -> Self {
        Self {
            catalog: strict_catalog_mock(),
            carts: strict_carts_mock(),
            reviews: strict_reviews_mock(),
            wishlists: strict_wishlists_mock(),
            accounts: strict_accounts_mock(),
        }
    }
}

impl TestServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            catalog: Arc::new(self.catalog),
            carts: Arc::new(self.carts),
            reviews: Arc::new(self.reviews),
            wishlists: Arc::new(self.wishlists),
            accounts: Arc::new(self.accounts),
        })
    }

    /// Serve `route` without authentication.
    pub(crate) fn public(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }

    /// Serve `route` as [`TEST_USER_UUID`].
    pub(crate) fn authenticated(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_user)
                .push(route),
        )
    }
}

fn strict_catalog_mock() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog.expect_create_category().never();
    catalog.expect_create_brand().never();
    catalog.expect_create_product().never();
    catalog.expect_create_variant().never();
    catalog.expect_add_image().never();
    catalog.expect_list_categories().never();
    catalog.expect_list_brands().never();
    catalog.expect_get_product().never();
    catalog.expect_get_variant().never();
    catalog.expect_list_products().never();
    catalog.expect_get_product_details().never();

    catalog
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_view_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_quantity().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_reviews_mock() -> MockReviewsService {
    let mut reviews = MockReviewsService::new();

    reviews.expect_create_review().never();
    reviews.expect_list_reviews().never();

    reviews
}

fn strict_wishlists_mock() -> MockWishlistsService {
    let mut wishlists = MockWishlistsService::new();

    wishlists.expect_list_items().never();
    wishlists.expect_add_product().never();
    wishlists.expect_remove_product().never();

    wishlists
}

fn strict_accounts_mock() -> MockAccountsService {
    let mut accounts = MockAccountsService::new();

    accounts.expect_register().never();
    accounts.expect_login().never();
    accounts.expect_authenticate_bearer().never();
    accounts.expect_logout().never();
    accounts.expect_get_profile().never();
    accounts.expect_update_profile().never();

    accounts
}

pub(crate) fn make_product(name: &str, slug: &str, price: Decimal) -> ProductRecord {
    ProductRecord {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        slug: slug.to_string(),
        sku: format!("SKU-{slug}"),
        brand_uuid: BrandUuid::new(),
        brand_name: "Acme".to_string(),
        category_uuid: CategoryUuid::new(),
        category_name: "Lighting".to_string(),
        category_slug: "lighting".to_string(),
        description: String::new(),
        short_description: String::new(),
        features: Vec::new(),
        specifications: BTreeMap::new(),
        price,
        original_price: None,
        discount_percentage: 0,
        stock_quantity: 5,
        min_stock_level: 5,
        max_order_quantity: 10,
        is_active: true,
        is_featured: false,
        is_bestseller: false,
        is_new_arrival: false,
        tags: String::new(),
        weight: None,
        dimensions: String::new(),
        free_shipping: false,
        shipping_class: "standard".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_user(uuid: UserUuid) -> UserRecord {
    UserRecord {
        uuid,
        email: "ada@example.com".to_string(),
        username: "ada".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        phone_number: String::new(),
        date_of_birth: None,
        address_line_1: String::new(),
        address_line_2: String::new(),
        city: String::new(),
        state: String::new(),
        country: String::new(),
        postal_code: String::new(),
        is_active: true,
        is_email_verified: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
