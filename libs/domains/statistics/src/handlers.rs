use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{
    Principal,
    errors::responses::{
        ForbiddenResponse, InternalServerErrorResponse, ServiceUnavailableResponse,
        UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::StatisticsResult;
use crate::models::{
    CategoryCount, DailyCount, LowStockProduct, OverviewStats, ProductStats, SalesStats,
    StatusCount, TopSellingProduct, UserStats,
};
use crate::repository::StatisticsRepository;
use crate::service::StatisticsService;

pub const TAG: &str = "statistics";

/// OpenAPI documentation for the statistics endpoints
#[derive(OpenApi)]
#[openapi(
    paths(overview, sales, products, users),
    components(
        schemas(
            OverviewStats,
            SalesStats,
            StatusCount,
            ProductStats,
            TopSellingProduct,
            CategoryCount,
            LowStockProduct,
            UserStats,
            DailyCount
        ),
        responses(
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = TAG, description = "Admin dashboard statistics")
    )
)]
pub struct ApiDoc;

/// Create the statistics router
pub fn router<R: StatisticsRepository + 'static>(service: StatisticsService<R>) -> Router {
    Router::new()
        .route("/overview", get(overview))
        .route("/sales", get(sales))
        .route("/products", get(products))
        .route("/users", get(users))
        .with_state(Arc::new(service))
}

/// Store-wide totals
#[utoipa::path(
    get,
    path = "/overview",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Totals", body = OverviewStats),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn overview<R: StatisticsRepository>(
    State(service): State<Arc<StatisticsService<R>>>,
    principal: Principal,
) -> StatisticsResult<Json<OverviewStats>> {
    Ok(Json(service.overview(principal).await?))
}

/// Orders and revenue for today and the last 30 days
#[utoipa::path(
    get,
    path = "/sales",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sales figures", body = SalesStats),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn sales<R: StatisticsRepository>(
    State(service): State<Arc<StatisticsService<R>>>,
    principal: Principal,
) -> StatisticsResult<Json<SalesStats>> {
    Ok(Json(service.sales(principal).await?))
}

/// Best sellers, category spread and low stock
#[utoipa::path(
    get,
    path = "/products",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product figures", body = ProductStats),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn products<R: StatisticsRepository>(
    State(service): State<Arc<StatisticsService<R>>>,
    principal: Principal,
) -> StatisticsResult<Json<ProductStats>> {
    Ok(Json(service.products(principal).await?))
}

/// Sign-ups, activity and the 7-day registration trend
#[utoipa::path(
    get,
    path = "/users",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User figures", body = UserStats),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn users<R: StatisticsRepository>(
    State(service): State<Arc<StatisticsService<R>>>,
    principal: Principal,
) -> StatisticsResult<Json<UserStats>> {
    Ok(Json(service.users(principal).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockStatisticsRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_overview_requires_admin() {
        let request = Request::builder()
            .uri("/overview")
            .extension(Principal::user(Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = router(StatisticsService::new(MockStatisticsRepository::new()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_sales_returns_snake_case_json() {
        let mut repo = MockStatisticsRepository::new();
        repo.expect_sales().returning(|window| {
            Ok(SalesStats {
                today_orders: 2,
                monthly_orders: 9,
                today_revenue: 40.0,
                monthly_revenue: 310.0,
                order_status_stats: vec![StatusCount {
                    status: "pending".to_string(),
                    count: 2,
                }],
                timestamp: window.now,
            })
        });

        let request = Request::builder()
            .uri("/sales")
            .extension(Principal::admin(Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = router(StatisticsService::new(repo))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["monthly_orders"], 9);
        assert_eq!(body["order_status_stats"][0]["status"], "pending");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_storage_outage_is_503() {
        let mut repo = MockStatisticsRepository::new();
        repo.expect_overview().returning(|_| {
            Err(sea_orm::DbErr::ConnectionAcquire(sea_orm::ConnAcquireErr::Timeout).into())
        });

        let request = Request::builder()
            .uri("/overview")
            .extension(Principal::admin(Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = router(StatisticsService::new(repo))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
