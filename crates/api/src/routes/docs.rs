//! `OpenAPI` document and Swagger UI for the REST surface.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::{customers, orders};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ecommerce API",
        version = "1.0.0",
        description = "Ecommerce order management API"
    ),
    paths(
        customers::list_orders,
        customers::page_orders,
        customers::recommendations,
        orders::get_order,
        orders::create_order,
        orders::update_order,
        orders::delete_order,
        orders::get_tracking,
    ),
    tags(
        (name = "Orders", description = "Order management"),
        (name = "Shipping", description = "Shipping status"),
        (name = "Recommendations", description = "Product recommendations"),
    )
)]
pub struct ApiDoc;

/// Where the interactive documentation is mounted.
pub const DOCS_PATH: &str = "/api-docs";

/// Swagger UI at `/api-docs/` over the document served at
/// `/api-docs/openapi.json`.
#[must_use]
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(DOCS_PATH).url("/api-docs/openapi.json", ApiDoc::openapi())
}
