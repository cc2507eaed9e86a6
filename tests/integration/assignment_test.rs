//! Integration tests for the assignment endpoints.

use http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use crate::helpers::{TestApp, id_of};

struct Seed {
    customer: i64,
    brett: i64,
    latte: i64,
}

async fn seed(app: &TestApp) -> Seed {
    let customer = app.customer("Muster GmbH").await;
    let holz = app.category("Holz").await;
    Seed {
        customer,
        brett: app.product("Brett", holz, 10.5).await,
        latte: app.product("Latte", holz, 4.0).await,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_attach_created_then_incremented(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let s = seed(&app).await;

    let first = app.attach(s.customer, s.brett, 2).await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["quantity"], 2);
    assert_eq!(first.body["product_name"], "Brett");
    assert_eq!(first.body["category_name"], "Holz");

    let second = app.attach(s.customer, s.brett, 3).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(id_of(&second.body), id_of(&first.body));
    assert_eq!(second.body["quantity"], 5);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_attach_with_customer_id_from_route_string(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let s = seed(&app).await;

    let response = app
        .call(
            "POST",
            "/api/customer-products",
            Some(json!({ "customer_id": s.customer.to_string(), "product_id": s.latte })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["customer_id"], s.customer);
    assert_eq!(response.body["quantity"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_attach_validation_and_unknown_ids(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let s = seed(&app).await;

    let response = app.attach(s.customer, s.brett, 0).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .call(
            "POST",
            "/api/customer-products",
            Some(json!({ "product_id": s.brett })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app.attach(s.customer, 999_999, 1).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_toggle_merge_scenario(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let s = seed(&app).await;

    let first = id_of(&app.attach(s.customer, s.brett, 3).await.body);
    let toggled = app
        .call("PUT", &format!("/api/customer-products/{first}/toggle-billed"), None)
        .await;
    assert_eq!(toggled.status, StatusCode::OK);
    assert_eq!(toggled.body["is_billed"], true);
    assert_eq!(toggled.body["merged"], false);

    let second = app.attach(s.customer, s.brett, 2).await;
    assert_eq!(second.status, StatusCode::CREATED);
    let second = id_of(&second.body);

    let merged = app
        .call("PUT", &format!("/api/customer-products/{second}/toggle-billed"), None)
        .await;
    assert_eq!(merged.status, StatusCode::OK);
    assert_eq!(merged.body["merged"], true);
    assert_eq!(id_of(&merged.body), first);
    assert_eq!(merged.body["quantity"], 5);

    let rows = app
        .call(
            "GET",
            &format!("/api/customer-products/customer/{}", s.customer),
            None,
        )
        .await;
    assert_eq!(rows.body.as_array().map(Vec::len), Some(1));

    let gone = app
        .call("PUT", &format!("/api/customer-products/{second}/increase"), None)
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_decrease_to_deletion(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let s = seed(&app).await;
    let id = id_of(&app.attach(s.customer, s.brett, 1).await.body);

    let up = app
        .call("PUT", &format!("/api/customer-products/{id}/increase"), None)
        .await;
    assert_eq!(up.body["quantity"], 2);

    let down = app
        .call("PUT", &format!("/api/customer-products/{id}/decrease"), None)
        .await;
    assert_eq!(down.status, StatusCode::OK);
    assert_eq!(down.body["quantity"], 1);

    let deleted = app
        .call("PUT", &format!("/api/customer-products/{id}/decrease"), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body, json!({ "deleted": true }));

    let again = app
        .call("PUT", &format!("/api/customer-products/{id}/decrease"), None)
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_set_quantity_rules(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let s = seed(&app).await;
    let id = id_of(&app.attach(s.customer, s.brett, 4).await.body);
    let path = format!("/api/customer-products/{id}");

    let zero = app.call("PUT", &path, Some(json!({ "quantity": 0 }))).await;
    assert_eq!(zero.status, StatusCode::OK);
    assert_eq!(zero.body["quantity"], 0);

    for bad in [json!(-1), json!("3"), json!(1.5), json!(null)] {
        let response = app.call("PUT", &path, Some(json!({ "quantity": bad }))).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "quantity {bad}");
    }

    let missing = app
        .call(
            "PUT",
            "/api/customer-products/424242",
            Some(json!({ "quantity": 1 })),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_update_rolls_back_on_unknown_id(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let s = seed(&app).await;
    let a = id_of(&app.attach(s.customer, s.brett, 1).await.body);
    let b = id_of(&app.attach(s.customer, s.latte, 1).await.body);

    let failed = app
        .call(
            "PUT",
            "/api/customer-products/bulk-update",
            Some(json!({ "updates": [
                { "id": a, "quantity": 7 },
                { "id": 987_654, "quantity": 1 },
            ] })),
        )
        .await;
    assert_eq!(failed.status, StatusCode::NOT_FOUND);

    let rows = app
        .call(
            "GET",
            &format!("/api/customer-products/customer/{}", s.customer),
            None,
        )
        .await;
    let quantities: Vec<_> = rows
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["quantity"].as_i64().unwrap())
        .collect();
    assert_eq!(quantities, vec![1, 1]);

    let ok = app
        .call(
            "PUT",
            "/api/customer-products/bulk-update",
            Some(json!({ "updates": [
                { "id": a, "quantity": 7 },
                { "id": b, "quantity": 3 },
            ] })),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body, json!({ "success": true, "updated": 2 }));

    let empty = app
        .call(
            "PUT",
            "/api/customer-products/bulk-update",
            Some(json!({ "updates": [] })),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_summary_and_remove(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let s = seed(&app).await;
    app.attach(s.customer, s.brett, 2).await;
    let latte = id_of(&app.attach(s.customer, s.latte, 5).await.body);

    let summary = app
        .call(
            "GET",
            &format!("/api/customer-products/customer/{}/summary", s.customer),
            None,
        )
        .await;
    assert_eq!(summary.body, json!({ "totalProducts": 7, "distinctProducts": 2 }));

    let removed = app
        .call("DELETE", &format!("/api/customer-products/{latte}"), None)
        .await;
    assert_eq!(removed.body, json!({ "deleted": true }));

    let removed = app
        .call("DELETE", &format!("/api/customer-products/{latte}"), None)
        .await;
    assert_eq!(removed.status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_custom_product_flow(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let s = seed(&app).await;

    let custom = app
        .call(
            "POST",
            "/api/customer-products/custom",
            Some(json!({ "customer_id": s.customer, "name": "Sonderleistung", "price": 150 })),
        )
        .await;
    assert_eq!(custom.status, StatusCode::CREATED);
    assert_eq!(custom.body["quantity"], 1);
    assert_eq!(custom.body["is_billed"], false);
    assert_eq!(custom.body["product_name"], "Sonderleistung");

    let catalog = app.call("GET", "/api/products", None).await;
    let names: Vec<_> = catalog
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Brett", "Latte"]);
}
