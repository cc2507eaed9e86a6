//! Integration tests for the billing snapshot and the Excel export.

use http::StatusCode;
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use serde_json::json;
use sqlx::PgPool;

use crate::helpers::{TestApp, id_of};

#[sqlx::test(migrations = "./migrations")]
async fn test_billing_snapshot_counts_unbilled_only(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let customer = app.customer("Muster GmbH").await;
    let holz = app.category("Holz").await;
    let brett = app.product("Brett", holz, 10.5).await;
    let latte = app.product("Latte", holz, 4.0).await;

    let billed = id_of(&app.attach(customer, brett, 3).await.body);
    app.call(
        "PUT",
        &format!("/api/customer-products/{billed}/toggle-billed"),
        None,
    )
    .await;
    app.attach(customer, latte, 2).await;
    app.attach(customer, brett, 1).await;

    let snapshot = app
        .call("GET", &format!("/api/customers/{customer}/billing"), None)
        .await;
    assert_eq!(snapshot.status, StatusCode::OK);

    let items = snapshot.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    // 10.50 * 1 + 4.00 * 2
    assert_eq!(snapshot.body["total"].as_f64(), Some(18.5));

    let missing = app.call("GET", "/api/customers/777777/billing", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_excel_export_download(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let customer = app.customer("Muster GmbH").await;
    let holz = app.category("Holz").await;
    let brett = app.product("Brett", holz, 10.5).await;
    app.attach(customer, brett, 2).await;
    app.call(
        "POST",
        "/api/customer-products/custom",
        Some(json!({ "customer_id": customer, "name": "Anfahrt" })),
    )
    .await;

    let response = app
        .send(
            "GET",
            &format!("/api/customer-products/export/excel/{customer}"),
            None,
            Some(&app.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers[CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        response.headers[CONTENT_DISPOSITION],
        format!("attachment; filename=\"kunde_{customer}.xlsx\"").as_str()
    );
    assert!(response.bytes.starts_with(b"PK"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_excel_export_unknown_customer(pool: PgPool) {
    let app = TestApp::new(pool).await;

    let response = app
        .call("GET", "/api/customer-products/export/excel/31337", None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}
