use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Stock ---
        handlers::stock::create_stock_item,
        handlers::stock::list_stock_items,

        // --- Sales ---
        handlers::sales::list_materials,
        handlers::sales::preview_amount,
        handlers::sales::create_sale,
        handlers::sales::list_my_sales,
        handlers::sales::update_sale,
        handlers::sales::delete_sale,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,
        handlers::dashboard::export_sales,

        // --- Live ---
        handlers::live::sales_stream,
        handlers::live::stock_stream,

        // --- Documents ---
        handlers::documents::capture_document,
        handlers::documents::list_documents,
        handlers::documents::release_documents,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Stock ---
            models::stock::StockCategory,
            models::stock::StockUnit,
            models::stock::StockItem,
            models::stock::CreateStockItemPayload,

            // --- Sales ---
            models::sales::SaleUnit,
            models::sales::Sale,
            models::sales::SalePayload,
            handlers::sales::PreviewResponse,

            // --- Analytics ---
            models::analytics::SalesTotals,
            models::analytics::ShopAggregate,
            models::analytics::MaterialAggregate,
            models::analytics::MaterialSlice,
            models::analytics::DailyPoint,
            models::analytics::SalesAnalytics,
            handlers::dashboard::DashboardResponse,

            // --- Documents ---
            handlers::documents::DocumentMeta,
            handlers::documents::CaptureDocumentPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Sign-in and registration"),
        (name = "Users", description = "Authenticated account data"),
        (name = "Stock", description = "Stock item entry and listing"),
        (name = "Sales", description = "Per-customer transaction recording"),
        (name = "Dashboard", description = "Aggregated analytics and CSV export"),
        (name = "Live", description = "Full-snapshot SSE streams"),
        (name = "Documents", description = "In-memory scanner captures")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
