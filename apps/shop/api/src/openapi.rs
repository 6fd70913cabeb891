use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the `bearer_auth` scheme referenced by protected handlers
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&BearerAuth),
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Shop API",
        version = "0.1.0",
        description = "Accounts, catalog, cart, orders, payments, shipments, reviews, wishlists, contact messages and admin statistics"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/auth", api = domain_accounts::handlers::auth::ApiDoc),
        (path = "/users", api = domain_accounts::handlers::users::ApiDoc),
        (path = "/products", api = domain_catalog::handlers::products::ApiDoc),
        (path = "/categories", api = domain_catalog::handlers::categories::ApiDoc),
        (path = "/cart", api = domain_cart::handlers::ApiDoc),
        (path = "/orders", api = domain_orders::handlers::ApiDoc),
        (path = "/payments", api = domain_payments::handlers::ApiDoc),
        (path = "/shipments", api = domain_shipments::handlers::ApiDoc),
        (path = "/reviews", api = domain_reviews::handlers::ApiDoc),
        (path = "/wishlists", api = domain_wishlists::handlers::ApiDoc),
        (path = "/contacts", api = domain_contacts::handlers::ApiDoc),
        (path = "/statistics", api = domain_statistics::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
