//! HttpClient against a mock tenant served by axum.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use atlan_client::{AtlanApi, AtlanClient, AtlanConfig, AtlanError, GetOptions, HttpClient};
use atlan_core::enums::AtlanDeleteType;
use atlan_core::error::ErrorCode;
use atlan_core::search::FluentSearch;
use atlan_core::tag::TagPropagation;
use axum::{
    extract::{Path, Query, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

const TOKEN: &str = "test-token";
const QN: &str = "default/snowflake/1700000000/db/sch/orders";
const GUID: &str = "0a1b2c3d-0000-4000-8000-000000000001";

#[derive(Debug, Clone)]
struct Seen {
    path: String,
    query: String,
    body: Option<Value>,
}

#[derive(Clone, Default)]
struct Tenant {
    seen: Arc<Mutex<Vec<Seen>>>,
    bulk_attempts: Arc<AtomicUsize>,
    search_attempts: Arc<AtomicUsize>,
    partial_attempts: Arc<AtomicUsize>,
}

impl Tenant {
    fn record(&self, path: &str, query: Option<String>, body: Option<Value>) {
        self.seen.lock().unwrap().push(Seen {
            path: path.to_string(),
            query: query.unwrap_or_default(),
            body,
        });
    }

    fn last(&self, path: &str) -> Seen {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|s| s.path == path)
            .cloned()
            .unwrap()
    }
}

fn table_json() -> Value {
    json!({
        "typeName": "Table",
        "guid": GUID,
        "status": "ACTIVE",
        "attributes": {"qualifiedName": QN, "name": "orders"}
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

async fn get_by_guid(
    State(tenant): State<Tenant>,
    Path(guid): Path<String>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "bad token").into_response();
    }
    tenant.record("guid", query, None);
    if guid != GUID {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "errorCode": "ATLAS-404-00-005",
                "errorMessage": format!("Given instance guid {} is invalid/not found", guid)
            })),
        )
            .into_response();
    }
    Json(json!({ "entity": table_json() })).into_response()
}

async fn bulk_save(
    State(tenant): State<Tenant>,
    RawQuery(query): RawQuery,
    Json(body): Json<Value>,
) -> Response {
    tenant.record("bulk", query, Some(body));
    if tenant.bulk_attempts.fetch_add(1, Ordering::SeqCst) < 2 {
        return (StatusCode::SERVICE_UNAVAILABLE, "warming up").into_response();
    }
    Json(json!({ "mutatedEntities": { "UPDATE": [table_json()] } })).into_response()
}

async fn bulk_delete(State(tenant): State<Tenant>, RawQuery(query): RawQuery) -> Response {
    tenant.record("delete", query, None);
    let mut deleted = table_json();
    deleted["status"] = json!("DELETED");
    Json(json!({ "mutatedEntities": { "DELETE": [deleted] } })).into_response()
}

async fn partial_update(State(tenant): State<Tenant>, Path(_type_name): Path<String>) -> Response {
    tenant.partial_attempts.fetch_add(1, Ordering::SeqCst);
    (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
}

async fn add_tags(
    State(tenant): State<Tenant>,
    Path(type_name): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    let qn = params.get("attr:qualifiedName").cloned().unwrap_or_default();
    tenant.record("tags", Some(format!("{}|{}", type_name, qn)), Some(body));
    StatusCode::NO_CONTENT.into_response()
}

async fn index_search(State(tenant): State<Tenant>, Json(body): Json<Value>) -> Response {
    tenant.record("search", None, Some(body));
    if tenant.search_attempts.fetch_add(1, Ordering::SeqCst) == 0 {
        return (StatusCode::TOO_MANY_REQUESTS, [("retry-after", "0")], "slow down").into_response();
    }
    Json(json!({ "approximateCount": 1, "entities": [table_json()] })).into_response()
}

async fn typedefs(State(tenant): State<Tenant>, RawQuery(query): RawQuery) -> Response {
    tenant.record("typedefs", query, None);
    Json(json!({
        "classificationDefs": [{"name": "aB12cD34", "displayName": "PII"}]
    }))
    .into_response()
}

async fn spawn(tenant: Tenant) -> String {
    let app = Router::new()
        .route("/api/meta/entity/guid/:guid", get(get_by_guid))
        .route("/api/meta/entity/bulk", post(bulk_save).delete(bulk_delete))
        .route(
            "/api/meta/entity/uniqueAttribute/type/:type_name",
            post(partial_update),
        )
        .route(
            "/api/meta/entity/uniqueAttribute/type/:type_name/classifications",
            post(add_tags),
        )
        .route("/api/meta/search/indexsearch", post(index_search))
        .route("/api/meta/types/typedefs", get(typedefs))
        .with_state(tenant);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn http(base_url: &str, token: &str) -> HttpClient {
    HttpClient::new(AtlanConfig::new(base_url, token).unwrap().with_timeout_secs(5)).unwrap()
}

#[tokio::test]
async fn get_by_guid_sends_auth_and_flags() {
    let tenant = Tenant::default();
    let base = spawn(tenant.clone()).await;
    let entity = http(&base, TOKEN)
        .get_by_guid(GUID, GetOptions::with_relationships(true))
        .await
        .unwrap();
    assert_eq!(entity.qualified_name(), Some(QN));
    let seen = tenant.last("guid");
    assert!(seen.query.contains("minExtInfo=false"));
    assert!(seen.query.contains("ignoreRelationships=false"));
}

#[tokio::test]
async fn status_codes_map_to_errors() {
    let tenant = Tenant::default();
    let base = spawn(tenant.clone()).await;

    let err = http(&base, "wrong")
        .get_by_guid(GUID, GetOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AtlanError::Authentication(_)));

    let err = http(&base, TOKEN)
        .get_by_guid("0a1b2c3d-0000-4000-8000-0000000000ff", GetOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::NotFoundOnServer));
    assert!(err.to_string().contains("ATLAS-404-00-005"));
}

#[tokio::test]
async fn server_errors_are_retried_until_success() {
    let tenant = Tenant::default();
    let base = spawn(tenant.clone()).await;
    let client = AtlanClient::new(Arc::new(http(&base, TOKEN)));

    let updated = client
        .remove_certificate_entity("Table", QN, "orders")
        .await
        .unwrap();
    assert!(updated.is_some());
    assert_eq!(tenant.bulk_attempts.load(Ordering::SeqCst), 3);

    let seen = tenant.last("bulk");
    assert!(seen.query.contains("replaceClassifications=false"));
    let body = seen.body.unwrap();
    assert_eq!(body["entities"][0]["attributes"]["certificateStatus"], Value::Null);
    assert_eq!(body["entities"][0]["attributes"]["qualifiedName"], json!(QN));
}

#[tokio::test]
async fn retries_give_up_after_max_retries() {
    let tenant = Tenant::default();
    let base = spawn(tenant.clone()).await;
    let api = HttpClient::new(
        AtlanConfig::new(&base, TOKEN)
            .unwrap()
            .with_max_retries(1),
    )
    .unwrap();
    let err = api
        .partial_update("Table", QN, atlan_core::Entity::new("Table"))
        .await
        .unwrap_err();
    assert!(matches!(err, AtlanError::Api { status: 500, .. }));
    assert_eq!(tenant.partial_attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn rate_limit_waits_and_retries() {
    let tenant = Tenant::default();
    let base = spawn(tenant.clone()).await;
    let request = FluentSearch::for_type_name("Table", false).to_request();
    let response = http(&base, TOKEN).search(&request).await.unwrap();
    assert_eq!(response.approximate_count, 1);
    assert_eq!(tenant.search_attempts.load(Ordering::SeqCst), 2);

    let body = tenant.last("search").body.unwrap();
    assert_eq!(body["dsl"]["size"], json!(100));
    assert!(body["dsl"]["query"]["bool"]["filter"].is_array());
}

#[tokio::test]
async fn delete_sends_every_guid() {
    let tenant = Tenant::default();
    let base = spawn(tenant.clone()).await;
    let response = http(&base, TOKEN)
        .delete(&[GUID.to_string(), "other".to_string()], AtlanDeleteType::Purge)
        .await
        .unwrap();
    assert_eq!(response.mutated_entities.deleted.len(), 1);
    let query = tenant.last("delete").query;
    assert!(query.contains(&format!("guid={}", GUID)));
    assert!(query.contains("guid=other"));
    assert!(query.contains("deleteType=PURGE"));
}

#[tokio::test]
async fn tags_are_translated_before_attaching() {
    let tenant = Tenant::default();
    let base = spawn(tenant.clone()).await;
    let client = AtlanClient::new(Arc::new(http(&base, TOKEN)));
    client
        .append_atlan_tags_entity("Table", QN, &["PII"], &TagPropagation::default())
        .await
        .unwrap();

    assert!(tenant.last("typedefs").query.contains("type=classification"));
    let seen = tenant.last("tags");
    assert_eq!(seen.query, format!("Table|{}", QN));
    let body = seen.body.unwrap();
    assert_eq!(body[0]["typeName"], json!("aB12cD34"));
    assert_eq!(body[0]["propagate"], json!(true));
}
