//! Integration tests for customers, categories, and products.

use http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use crate::helpers::{TestApp, id_of};

#[sqlx::test(migrations = "./migrations")]
async fn test_customer_lifecycle(pool: PgPool) {
    let app = TestApp::new(pool).await;

    let missing_name = app
        .call("POST", "/api/customers", Some(json!({ "phone": "0123" })))
        .await;
    assert_eq!(missing_name.status, StatusCode::BAD_REQUEST);

    let id = app.customer("Muster GmbH").await;

    let updated = app
        .call(
            "PUT",
            &format!("/api/customers/{id}"),
            Some(json!({ "name": "Muster AG", "project_type": "Neubau" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["name"], "Muster AG");
    assert_eq!(updated.body["project_type"], "Neubau");

    let archived = app.call("DELETE", &format!("/api/customers/{id}"), None).await;
    assert_eq!(archived.body["is_archived"], true);

    let active = app.call("GET", "/api/customers", None).await;
    assert_eq!(active.body, json!([]));
    let archived_list = app.call("GET", "/api/customers/archived/list", None).await;
    assert_eq!(archived_list.body.as_array().map(Vec::len), Some(1));

    let restored = app
        .call("PUT", &format!("/api/customers/{id}/restore"), None)
        .await;
    assert_eq!(restored.body["is_archived"], false);

    let missing = app
        .call(
            "PUT",
            "/api/customers/99999",
            Some(json!({ "name": "Niemand" })),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_category_tree_and_cycle(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let root = app.category("Baumaterial").await;

    let child = app
        .call(
            "POST",
            "/api/products/categories",
            Some(json!({ "name": "Holz", "parent_id": root })),
        )
        .await;
    assert_eq!(child.status, StatusCode::CREATED);
    let child = id_of(&child.body);

    let tree = app.call("GET", "/api/products/categories/tree", None).await;
    assert_eq!(tree.body[0]["id"], root);
    assert_eq!(tree.body[0]["children"][0]["id"], child);

    let cycle = app
        .call(
            "PUT",
            &format!("/api/products/categories/{root}/parent"),
            Some(json!({ "parent_id": child })),
        )
        .await;
    assert_eq!(cycle.status, StatusCode::BAD_REQUEST);

    let detached = app
        .call(
            "PUT",
            &format!("/api/products/categories/{child}/parent"),
            Some(json!({ "parent_id": null })),
        )
        .await;
    assert_eq!(detached.status, StatusCode::OK);
    assert_eq!(detached.body["parent_id"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_product_listing_and_restrict_delete(pool: PgPool) {
    let app = TestApp::new(pool).await;
    let holz = app.category("Holz").await;
    let brett = app.product("Brett", holz, 10.5).await;
    let latte = app.product("Latte", holz, 4.0).await;

    let no_category = app
        .call("POST", "/api/products", Some(json!({ "name": "Ohne" })))
        .await;
    assert_eq!(no_category.status, StatusCode::BAD_REQUEST);

    let toggled = app
        .call("PUT", &format!("/api/products/{latte}/toggle-active"), None)
        .await;
    assert_eq!(toggled.body["is_active"], false);

    let catalog = app.call("GET", "/api/products", None).await;
    assert_eq!(catalog.body.as_array().map(Vec::len), Some(1));
    let all = app.call("GET", "/api/products/all", None).await;
    assert_eq!(all.body.as_array().map(Vec::len), Some(2));
    assert_eq!(all.body[0]["name"], "Brett");

    let customer = app.customer("Muster GmbH").await;
    app.attach(customer, brett, 1).await;

    let blocked = app
        .call("DELETE", &format!("/api/products/{brett}/permanent"), None)
        .await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);

    let deleted = app
        .call("DELETE", &format!("/api/products/{latte}/permanent"), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["deleted"], true);

    let gone = app.call("GET", &format!("/api/products/{latte}"), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}
