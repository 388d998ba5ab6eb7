use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{cms::mutations::Mutation, config::CmsConfig, errors::AppError};

/// Handle to the CMS HTTP API.
///
/// Cheap to clone: the inner `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: Client,
    base_url: String,
    api_version: String,
    dataset: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: T,
}

#[derive(Debug, Serialize)]
struct MutateRequest<'a> {
    mutations: &'a [Mutation],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutateResponse {
    pub transaction_id: String,
    #[serde(default)]
    pub results: Vec<MutationResult>,
}

#[derive(Debug, Deserialize)]
pub struct MutationResult {
    pub id: String,
    #[serde(default)]
    pub operation: Option<String>,
}

/// Named parameters of a GROQ query, bound as `$name`.
#[derive(Debug, Default, Clone)]
pub struct QueryParams(Vec<(String, Value)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.0.push((name.to_string(), value.into()));
        self
    }

    fn to_query_pairs(&self) -> Vec<(String, String)> {
        // The query endpoint expects each parameter as a JSON literal.
        self.0
            .iter()
            .map(|(name, value)| (format!("${name}"), value.to_string()))
            .collect()
    }
}

impl CmsClient {
    pub fn new(config: &CmsConfig, timeout_seconds: u64) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            api_version: config.api_version.clone(),
            dataset: config.dataset.clone(),
            token: config.token.clone(),
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v{}/data/{}/{}",
            self.base_url, self.api_version, action, self.dataset
        )
    }

    /// Runs a GROQ query and deserializes its `result`.
    pub async fn query<T: DeserializeOwned>(
        &self,
        groq: &str,
        params: &QueryParams,
    ) -> Result<T, AppError> {
        let url = self.endpoint("query");
        let mut pairs = vec![("query".to_string(), groq.to_string())];
        pairs.extend(params.to_query_pairs());

        let mut request = self.http.get(&url).query(&pairs);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let body = read_success_body(response).await?;

        let parsed: QueryResponse<T> = serde_json::from_slice(&body).map_err(|e| {
            AppError::InvalidRecord(format!("Unexpected CMS result shape: {e}"))
        })?;

        Ok(parsed.result)
    }

    /// Applies mutations in a single transaction.
    pub async fn mutate(&self, mutations: &[Mutation]) -> Result<MutateResponse, AppError> {
        let token = self.token.as_deref().ok_or_else(|| {
            AppError::EnvError("CMS_API_TOKEN must be set to modify content".into())
        })?;

        let url = format!("{}?returnIds=true", self.endpoint("mutate"));
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&MutateRequest { mutations })
            .send()
            .await?;
        let body = read_success_body(response).await?;

        serde_json::from_slice(&body)
            .map_err(|e| AppError::Serialization(format!("Unexpected CMS mutate response: {e}")))
    }

    /// Cheapest possible round trip, used by the health check.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.query::<Value>("count(*[_type == \"season\"])", &QueryParams::new())
            .await
            .map(|_| ())
    }
}

async fn read_success_body(response: reqwest::Response) -> Result<Vec<u8>, AppError> {
    let status = response.status();
    let body = response.bytes().await?;

    if status.is_success() {
        return Ok(body.to_vec());
    }

    Err(AppError::CmsQueryError {
        status: status.as_u16(),
        message: error_description(status, &body),
    })
}

fn error_description(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|json| {
            json.pointer("/error/description")
                .or_else(|| json.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown CMS error")
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    fn client_for(server: &MockServer, token: Option<&str>) -> CmsClient {
        let config = CmsConfig {
            project_id: "test".into(),
            api_host: Some(server.uri()),
            token: token.map(str::to_string),
            ..CmsConfig::default()
        };
        CmsClient::new(&config, 5).unwrap()
    }

    #[tokio::test]
    async fn query_binds_params_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2024-01-01/data/query/production"))
            .and(query_param("$id", "\"team-1\""))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "ms": 3, "result": ["ok"] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let result: Vec<String> = client
            .query("*[_id == $id]", &QueryParams::new().with("id", "team-1"))
            .await
            .unwrap();

        assert_eq!(result, vec!["ok".to_string()]);
    }

    #[tokio::test]
    async fn query_surfaces_cms_error_description() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "description": "expected '}' following object body" }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client
            .query::<Value>("*[", &QueryParams::new())
            .await
            .unwrap_err();

        match err {
            AppError::CmsQueryError { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("following object body"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_shape_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": 42 })))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client
            .query::<Vec<String>>("*", &QueryParams::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidRecord(_)));
    }

    #[tokio::test]
    async fn mutate_requires_token() {
        let server = MockServer::start().await;
        let client = client_for(&server, None);

        let err = client
            .mutate(&[Mutation::delete("season-1")])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::EnvError(_)));
    }

    #[tokio::test]
    async fn mutate_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2024-01-01/data/mutate/production"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transactionId": "tx-1",
                "results": [{ "id": "season-1", "operation": "delete" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("secret-token"));
        let response = client
            .mutate(&[Mutation::delete("season-1")])
            .await
            .unwrap();

        assert_eq!(response.transaction_id, "tx-1");
        assert_eq!(response.results[0].id, "season-1");
    }
}
