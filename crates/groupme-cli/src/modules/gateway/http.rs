use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use std::time::{Duration, Instant};
use tracing::debug;

use groupme_core::api::{decode_group, error_message, AddMembersRequest, UpdateMemberRequest};
use groupme_core::{
    validate_nickname, AddMemberPayload, GroupGateway, GroupId, GroupSnapshot, MembershipId,
    SyncError, SyncResult, REQUEST_TIMEOUT_SECS,
};

const ACCESS_TOKEN_HEADER: &str = "X-Access-Token";

pub(crate) fn build_client(allow_insecure: bool) -> anyhow::Result<reqwest::Client> {
    build_client_with_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS), allow_insecure)
}

pub(crate) fn build_client_with_timeout(
    timeout: Duration,
    allow_insecure: bool,
) -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .danger_accept_invalid_certs(allow_insecure)
        .build()?;
    Ok(client)
}

/// GroupMe v3 gateway. The token travels both as the `token` query
/// parameter and in the `X-Access-Token` header.
pub(crate) struct HttpGateway {
    client: reqwest::Client,
    base: String,
    token: String,
}

impl HttpGateway {
    pub(crate) fn new(client: reqwest::Client, base: &str, token: &str) -> Self {
        Self {
            client,
            base: base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        let mut url = format!("{}{}", self.base, path);
        append_params(&mut url, vec![("token".to_string(), self.token.clone())]);
        url
    }

    async fn send(
        &self,
        method: Method,
        path: String,
        payload: Option<serde_json::Value>,
    ) -> SyncResult<String> {
        let url = self.url(&path);
        let builder = self
            .client
            .request(method.clone(), url)
            .header(ACCESS_TOKEN_HEADER, &self.token);
        let builder = match payload {
            Some(payload) => builder.json(&payload),
            None if method == Method::POST => builder.header(CONTENT_TYPE, "application/json"),
            None => builder,
        };
        debug!(method = %method, path = %path, "groupme request");
        let start = Instant::now();
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!(
            method = %method,
            path = %path,
            status = %status,
            elapsed_ms = start.elapsed().as_millis(),
            "groupme response"
        );
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(SyncError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(body)
    }

    async fn post(&self, path: String, payload: Option<serde_json::Value>) -> SyncResult<()> {
        self.send(Method::POST, path, payload).await.map(|_| ())
    }
}

fn transport_error(err: reqwest::Error) -> SyncError {
    if err.is_timeout() {
        return SyncError::network("request timed out");
    }
    SyncError::network(err.to_string())
}

fn encode_json<T: serde::Serialize>(value: &T) -> SyncResult<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|err| SyncError::validation(format!("cannot encode request: {err}")))
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[async_trait]
impl GroupGateway for HttpGateway {
    async fn get_group(&self, group_id: &GroupId) -> SyncResult<GroupSnapshot> {
        let path = format!("/groups/{}", segment(group_id.as_str()));
        let body = self.send(Method::GET, path, None).await?;
        decode_group(group_id, &body)
    }

    async fn add_member(&self, group_id: &GroupId, payload: &AddMemberPayload) -> SyncResult<()> {
        let path = format!("/groups/{}/members/add", segment(group_id.as_str()));
        let body = encode_json(&AddMembersRequest::from(payload))?;
        self.post(path, Some(body)).await
    }

    async fn remove_member(
        &self,
        group_id: &GroupId,
        membership_id: &MembershipId,
    ) -> SyncResult<()> {
        let path = format!(
            "/groups/{}/members/{}/remove",
            segment(group_id.as_str()),
            segment(membership_id.as_str())
        );
        self.post(path, None).await
    }

    async fn update_member(
        &self,
        group_id: &GroupId,
        membership_id: &MembershipId,
        nickname: &str,
    ) -> SyncResult<()> {
        validate_nickname(nickname)?;
        let path = format!(
            "/groups/{}/members/{}/update",
            segment(group_id.as_str()),
            segment(membership_id.as_str())
        );
        let body = encode_json(&UpdateMemberRequest {
            nickname: nickname.to_string(),
        })?;
        self.post(path, Some(body)).await
    }
}

pub(crate) fn append_params(url: &mut String, params: Vec<(String, String)>) {
    if params.is_empty() {
        return;
    }
    let query = params
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
        .collect::<Vec<String>>()
        .join("&");
    url.push('?');
    url.push_str(&query);
}
