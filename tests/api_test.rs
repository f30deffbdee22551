use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use pet_resort_pricing::{app, pricing::PricingService, pricing::RatePolicy, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    let pricing = PricingService::new(RatePolicy::default()).unwrap();
    app(AppState::new(pricing), false)
}

async fn post_quote(body: Value) -> (StatusCode, Value) {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/pricing/quote")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let response = test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_reference_quotes() {
    let cases = [
        (json!({ "type": "boarding", "nights": 3, "lodging": "room", "dogs": 1 }), "111.00"),
        (json!({ "type": "boarding", "nights": 2, "lodging": "room", "dogs": 2 }), "118.00"),
        (json!({ "type": "boarding", "nights": 7, "lodging": "suite", "dogs": 1 }), "277.20"),
        (
            json!({
                "type": "boarding",
                "nights": 2,
                "lodging": "suite",
                "dogs": 1,
                "daycare_with_boarding": true,
                "fees": { "early": true, "late": true, "flea": true }
            }),
            // 44*2 + 15*2 + (10 + 20 + 15) = 163.00, not 153.00
            "163.00",
        ),
        (json!({ "type": "daycare", "days": 1, "use_daycare_package": true }), "0.00"),
    ];

    for (request, expected_total) in cases {
        let (status, body) = post_quote(request.clone()).await;
        assert_eq!(status, StatusCode::OK, "{}", request);
        assert_eq!(body["total"], expected_total, "{}", request);
    }
}

#[tokio::test]
async fn test_daycare_package_reports_credits_used() {
    let (_, body) = post_quote(json!({ "type": "daycare", "days": 1, "useDaycarePackage": true })).await;

    assert_eq!(body["subtotal"], "30.00");
    assert_eq!(body["discount_total"], "30.00");
    assert_eq!(body["meta"]["packageCreditsUsed"], 1);
}

#[tokio::test]
async fn test_daycare_package_short_balance() {
    let (_, body) = post_quote(json!({
        "type": "daycare",
        "days": 2,
        "useDaycarePackage": true,
        "availableCredits": 1
    }))
    .await;

    assert_eq!(body["total"], "60.00");
    assert_eq!(body["meta"], json!({ "packageShortfall": 1 }));
}

#[tokio::test]
async fn test_negative_nights_rejected_zero_clamped() {
    let (status, body) = post_quote(json!({ "nights": -1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "nights");

    let (status, body) = post_quote(json!({ "nights": 0 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lines"][0]["qty"], 1);
    assert_eq!(body["total"], "37.00");
}
