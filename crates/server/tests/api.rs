use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use service::test_support::get_db;
use service::{PageLimits, Services};
use tower::ServiceExt;

async fn app() -> anyhow::Result<Router> {
    let db = get_db().await?;
    let services = Services::new(db, PageLimits::new(20, 50), std::time::Duration::from_secs(5));
    Ok(server::build_app(services))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v)?)
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body)?).await?;
    let status = res.status();
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

#[tokio::test]
async fn health_is_ok() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = call(&app, Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
    Ok(())
}

#[tokio::test]
async fn location_type_crud_over_http() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, created) = call(
        &app,
        Method::POST,
        "/api/v1/location-types",
        Some(json!({ "code": "Corporate", "displayName": "HQ" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["code"], "Corporate");
    assert_eq!(created["createdAt"], created["updatedAt"]);
    assert!(created["deletedAt"].is_null());
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = call(&app, Method::GET, &format!("/api/v1/location-types/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, patched) = call(
        &app,
        Method::PATCH,
        &format!("/api/v1/location-types/{id}"),
        Some(json!({ "description": "head office" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["description"], "head office");
    assert_eq!(patched["displayName"], "HQ");

    let (status, _) = call(&app, Method::DELETE, &format!("/api/v1/location-types/{id}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = call(&app, Method::GET, &format!("/api/v1/location-types/{id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");

    let (_, page) = call(&app, Method::GET, "/api/v1/location-types", None).await?;
    assert_eq!(page["total"], 0);
    Ok(())
}

#[tokio::test]
async fn validation_errors_list_every_issue() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/license-types",
        Some(json!({ "code": "X", "renewalPeriodMonths": -2 })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    let paths: Vec<&str> = body["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["code", "displayName", "renewalPeriodMonths"]);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> anyhow::Result<()> {
    let app = app().await?;
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/license-types")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let res = app.oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn duplicate_code_is_a_conflict() -> anyhow::Result<()> {
    let app = app().await?;
    let payload = json!({ "code": "MD", "displayName": "Physician" });
    let (status, _) = call(&app, Method::POST, "/api/v1/license-types", Some(payload.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = call(&app, Method::POST, "/api/v1/license-types", Some(payload)).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
    Ok(())
}

#[tokio::test]
async fn malformed_and_unknown_ids_are_not_found() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, _) = call(&app, Method::GET, "/api/v1/providers/not-a-uuid", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let unknown = uuid::Uuid::new_v4();
    let (status, _) = call(
        &app,
        Method::PUT,
        &format!("/api/v1/facilities/{unknown}"),
        Some(json!({ "city": "Nowhere" })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::DELETE, &format!("/api/v1/facilities/{unknown}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn paging_query_is_lenient_and_clamped() -> anyhow::Result<()> {
    let app = app().await?;
    for i in 0..15 {
        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/license-types",
            Some(json!({ "code": format!("LT{i:02}"), "displayName": "Seed" })),
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, page) = call(&app, Method::GET, "/api/v1/license-types?page=2&pageSize=10", None).await?;
    assert_eq!(page["items"].as_array().unwrap().len(), 5);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["total"], 15);

    let (status, page) = call(&app, Method::GET, "/api/v1/license-types?page=abc&pageSize=xyz", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["page"], 1);
    assert_eq!(page["pageSize"], 20);

    let (_, page) = call(&app, Method::GET, "/api/v1/license-types?pageSize=1000", None).await?;
    assert_eq!(page["pageSize"], 50);
    Ok(())
}

#[tokio::test]
async fn provider_links_to_license_type() -> anyhow::Result<()> {
    let app = app().await?;
    let (_, lt) = call(
        &app,
        Method::POST,
        "/api/v1/license-types",
        Some(json!({ "code": "DO", "displayName": "Osteopath", "renewalPeriodMonths": 24 })),
    )
    .await?;

    let (status, provider) = call(
        &app,
        Method::POST,
        "/api/v1/providers",
        Some(json!({
            "firstName": "Grace",
            "lastName": "Hopper",
            "npi": "1234567893",
            "licenseTypeId": lt["id"],
            "licenseNumber": "DO-7",
            "licenseExpiresOn": "2028-02-29",
            "email": "grace@example.org"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(provider["licenseExpiresOn"], "2028-02-29");
    assert_eq!(provider["licenseTypeId"], lt["id"]);

    let (status, audit) = call(
        &app,
        Method::POST,
        "/api/v1/audit-logs",
        Some(json!({
            "entityType": "provider",
            "entityId": provider["id"],
            "action": "create",
            "actor": "registrar",
            "occurredAt": "2024-03-01T09:30:00Z"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(audit["entityId"], provider["id"]);
    Ok(())
}

#[tokio::test]
async fn unreachable_storage_is_503() -> anyhow::Result<()> {
    let db = get_db().await?;
    let services = Services::new(db.clone(), PageLimits::default(), std::time::Duration::from_secs(5));
    let app = server::build_app(services);
    db.close().await?;

    let (status, body) = call(&app, Method::GET, "/api/v1/license-types", None).await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Service Unavailable");

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/license-types",
        Some(json!({ "code": "MD", "displayName": "Physician" })),
    )
    .await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn huge_page_number_returns_an_empty_page() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/license-types",
        Some(json!({ "code": "MD", "displayName": "Physician" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, page) = call(
        &app,
        Method::GET,
        "/api/v1/license-types?page=100000000000000000&pageSize=100",
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items"], json!([]));
    assert_eq!(page["total"], 1);
    Ok(())
}
