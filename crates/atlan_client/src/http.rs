//! HttpClient: AtlanApi over the tenant's REST API.

use std::time::Duration;

use async_trait::async_trait;
use atlan_core::entity::Entity;
use atlan_core::enums::AtlanDeleteType;
use atlan_core::error::{AtlanError, ErrorCode, Result};
use atlan_core::mutation::AssetMutationResponse;
use atlan_core::search::{IndexSearchRequest, IndexSearchResponse};
use atlan_core::tag::{AtlanTag, AtlanTagDef, TypeDefResponse};
use rand::Rng;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

use crate::config::AtlanConfig;
use crate::{AtlanApi, GetOptions, SaveOptions};

// Routes relative to the base URL; caller-supplied segments are appended
// percent-encoded.
const ENTITY_BY_GUID: &str = "api/meta/entity/guid";
const ENTITY_BY_UNIQUE_ATTRIBUTE: &str = "api/meta/entity/uniqueAttribute/type";
const ENTITY_BULK: &str = "api/meta/entity/bulk";
const INDEX_SEARCH: &str = "api/meta/search/indexsearch";
const TYPEDEFS: &str = "api/meta/types/typedefs";
const QUALIFIED_NAME_PARAM: &str = "attr:qualifiedName";

const INITIAL_BACKOFF_MS: u64 = 100;
const MAX_BACKOFF: Duration = Duration::from_secs(30);
const DEFAULT_RETRY_AFTER_SECS: u64 = 1;
const MAX_ERROR_BODY: usize = 500;

#[derive(Serialize)]
struct EntityRequest<'a> {
    entity: &'a Entity,
}

#[derive(Serialize)]
struct EntitiesRequest<'a> {
    entities: &'a [Entity],
}

#[derive(Deserialize)]
struct EntityResponse {
    entity: Entity,
}

/// Error body returned by the tenant.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub struct HttpClient {
    client: Client,
    config: AtlanConfig,
}

impl HttpClient {
    pub fn new(config: AtlanConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| AtlanError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url).map_err(|e| {
            AtlanError::Config(format!("invalid base URL '{}': {}", self.config.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                AtlanError::Config(format!(
                    "base URL '{}' cannot carry a path",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &[&str],
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<T> {
        let text = self.execute(method, path, query, body).await?;
        serde_json::from_str(&text).map_err(AtlanError::from)
    }

    /// Sends a request, retrying rate limits, server errors and connection
    /// failures with exponential backoff. Returns the response body.
    async fn execute(
        &self,
        method: Method,
        path: &[&str],
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<String> {
        let url = self.url(path)?;
        let mut delay = Duration::from_millis(INITIAL_BACKOFF_MS);
        let mut attempt = 0;

        loop {
            debug!(method = %method, url = %url, attempt, "atlan request");
            let mut request = self
                .client
                .request(method.clone(), url.clone())
                .bearer_auth(&self.config.api_token)
                .query(query);
            if let Some(body) = &body {
                request = request.json(body);
            }

            let error = match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = response
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.trim().parse::<u64>().ok())
                            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                        if attempt < self.config.max_retries {
                            warn!(url = %url, retry_after, "rate limited, waiting");
                            sleep(Duration::from_secs(retry_after)).await;
                            attempt += 1;
                            continue;
                        }
                        return Err(AtlanError::RateLimited(retry_after));
                    }
                    let text = response.text().await.map_err(|e| {
                        AtlanError::Connection(format!("failed to read response body: {}", e))
                    })?;
                    if status.is_success() {
                        return Ok(text);
                    }
                    let error = status_error(status, &text);
                    if !error.is_retryable() {
                        return Err(error);
                    }
                    error
                }
                Err(e) if e.is_timeout() => AtlanError::Timeout(e.to_string()),
                Err(e) if e.is_connect() => AtlanError::Connection(e.to_string()),
                Err(e) => return Err(AtlanError::Connection(e.to_string())),
            };

            if attempt >= self.config.max_retries {
                return Err(error);
            }
            warn!(url = %url, attempt, error = %error, "retrying after {:?}", delay);
            sleep(delay).await;
            let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..INITIAL_BACKOFF_MS));
            delay = std::cmp::min(delay * 2 + jitter, MAX_BACKOFF);
            attempt += 1;
        }
    }
}

/// Maps a non-success status and body onto the SDK error.
pub(crate) fn status_error(status: StatusCode, body: &str) -> AtlanError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let detail = parsed
        .error_message
        .or(parsed.message)
        .unwrap_or_else(|| body.chars().take(MAX_ERROR_BODY).collect());
    let message = match parsed.error_code {
        Some(code) => format!("{} ({})", detail, code),
        None => detail,
    };
    match status {
        StatusCode::BAD_REQUEST => AtlanError::invalid_request(ErrorCode::RejectedByServer, message),
        StatusCode::UNAUTHORIZED => AtlanError::Authentication(message),
        StatusCode::FORBIDDEN => AtlanError::Permission(message),
        StatusCode::NOT_FOUND => AtlanError::not_found(ErrorCode::NotFoundOnServer, message),
        StatusCode::CONFLICT => AtlanError::Conflict(message),
        s => AtlanError::Api {
            status: s.as_u16(),
            message,
        },
    }
}

fn get_params(options: GetOptions) -> Vec<(&'static str, String)> {
    vec![
        ("minExtInfo", options.min_ext_info.to_string()),
        ("ignoreRelationships", options.ignore_relationships.to_string()),
    ]
}

fn route<'a>(base: &'a str, segments: &[&'a str]) -> Vec<&'a str> {
    base.split('/').chain(segments.iter().copied()).collect()
}

#[async_trait]
impl AtlanApi for HttpClient {
    async fn get_by_guid(&self, guid: &str, options: GetOptions) -> Result<Entity> {
        let path = route(ENTITY_BY_GUID, &[guid]);
        let response: EntityResponse = self
            .request_json(Method::GET, &path, &get_params(options), None)
            .await?;
        Ok(response.entity)
    }

    async fn get_by_unique_attribute(
        &self,
        type_name: &str,
        qualified_name: &str,
        options: GetOptions,
    ) -> Result<Entity> {
        let mut query = get_params(options);
        query.push((QUALIFIED_NAME_PARAM, qualified_name.to_string()));
        let response: EntityResponse = self
            .request_json(
                Method::GET,
                &route(ENTITY_BY_UNIQUE_ATTRIBUTE, &[type_name]),
                &query,
                None,
            )
            .await?;
        Ok(response.entity)
    }

    async fn partial_update(
        &self,
        type_name: &str,
        qualified_name: &str,
        entity: Entity,
    ) -> Result<AssetMutationResponse> {
        let body = serde_json::to_value(EntityRequest { entity: &entity })?;
        self.request_json(
            Method::POST,
            &route(ENTITY_BY_UNIQUE_ATTRIBUTE, &[type_name]),
            &[(QUALIFIED_NAME_PARAM, qualified_name.to_string())],
            Some(body),
        )
        .await
    }

    async fn save(
        &self,
        entities: Vec<Entity>,
        options: SaveOptions,
    ) -> Result<AssetMutationResponse> {
        let body = serde_json::to_value(EntitiesRequest {
            entities: &entities,
        })?;
        let query = [
            ("replaceClassifications", options.replace_atlan_tags.to_string()),
            (
                "replaceBusinessAttributes",
                options.replace_custom_metadata.to_string(),
            ),
            (
                "overwriteBusinessAttributes",
                options.overwrite_custom_metadata.to_string(),
            ),
        ];
        self.request_json(Method::POST, &route(ENTITY_BULK, &[]), &query, Some(body))
            .await
    }

    async fn delete(
        &self,
        guids: &[String],
        delete_type: AtlanDeleteType,
    ) -> Result<AssetMutationResponse> {
        let mut query: Vec<(&str, String)> = guids.iter().map(|g| ("guid", g.clone())).collect();
        query.push(("deleteType", delete_type.to_string()));
        self.request_json(Method::DELETE, &route(ENTITY_BULK, &[]), &query, None)
            .await
    }

    async fn add_atlan_tags(
        &self,
        type_name: &str,
        qualified_name: &str,
        tags: Vec<AtlanTag>,
    ) -> Result<()> {
        let path = route(ENTITY_BY_UNIQUE_ATTRIBUTE, &[type_name, "classifications"]);
        let body = serde_json::to_value(&tags)?;
        self.execute(
            Method::POST,
            &path,
            &[(QUALIFIED_NAME_PARAM, qualified_name.to_string())],
            Some(body),
        )
        .await?;
        Ok(())
    }

    async fn remove_atlan_tag(
        &self,
        type_name: &str,
        qualified_name: &str,
        tag_id: &str,
    ) -> Result<()> {
        let path = route(
            ENTITY_BY_UNIQUE_ATTRIBUTE,
            &[type_name, "classification", tag_id],
        );
        self.execute(
            Method::DELETE,
            &path,
            &[(QUALIFIED_NAME_PARAM, qualified_name.to_string())],
            None,
        )
        .await?;
        Ok(())
    }

    async fn search(&self, request: &IndexSearchRequest) -> Result<IndexSearchResponse> {
        let body = serde_json::to_value(request)?;
        self.request_json(Method::POST, &route(INDEX_SEARCH, &[]), &[], Some(body))
            .await
    }

    async fn atlan_tag_defs(&self) -> Result<Vec<AtlanTagDef>> {
        let response: TypeDefResponse = self
            .request_json(
                Method::GET,
                &route(TYPEDEFS, &[]),
                &[("type", "classification".to_string())],
                None,
            )
            .await?;
        Ok(response.classification_defs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let err = status_error(StatusCode::BAD_REQUEST, r#"{"errorCode":"ATLAS-400-00-01A","errorMessage":"bad attribute"}"#);
        assert_eq!(err.code(), Some(ErrorCode::RejectedByServer));
        assert!(err.to_string().contains("bad attribute (ATLAS-400-00-01A)"));

        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, ""),
            AtlanError::Authentication(_)
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, ""),
            AtlanError::Permission(_)
        ));
        assert_eq!(
            status_error(StatusCode::NOT_FOUND, "gone").code(),
            Some(ErrorCode::NotFoundOnServer)
        );
        assert!(matches!(
            status_error(StatusCode::CONFLICT, ""),
            AtlanError::Conflict(_)
        ));
        let err = status_error(StatusCode::BAD_GATEWAY, "upstream");
        assert_eq!(err.http_status(), 502);
        assert!(err.is_retryable());
    }

    #[test]
    fn plain_text_bodies_are_truncated() {
        let body = "x".repeat(2000);
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, &body);
        match err {
            AtlanError::Api { message, .. } => assert_eq!(message.len(), MAX_ERROR_BODY),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn path_segments_are_escaped() {
        let client = HttpClient::new(AtlanConfig::new("https://acme.atlan.com/", "t").unwrap()).unwrap();
        let url = client.url(&route(ENTITY_BY_GUID, &["a/b?c d"])).unwrap();
        assert_eq!(
            url.as_str(),
            "https://acme.atlan.com/api/meta/entity/guid/a%2Fb%3Fc%20d"
        );

        let client =
            HttpClient::new(AtlanConfig::new("https://acme.atlan.com/tenant", "t").unwrap()).unwrap();
        let url = client
            .url(&route(ENTITY_BY_UNIQUE_ATTRIBUTE, &["Table", "classification", "x1Y2z3"]))
            .unwrap();
        assert_eq!(
            url.path(),
            "/tenant/api/meta/entity/uniqueAttribute/type/Table/classification/x1Y2z3"
        );
    }

    #[test]
    fn get_options_become_query_flags() {
        let params = get_params(GetOptions::with_relationships(true));
        assert_eq!(params[0], ("minExtInfo", "false".to_string()));
        assert_eq!(params[1], ("ignoreRelationships", "false".to_string()));
    }
}
