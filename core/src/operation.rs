//! Unsent request descriptors and the JSON encode/decode hooks around them.
//!
//! # Design
//! An `OperationRequest` is what the client's builder methods return. It is
//! inert until someone calls `build` (pre-send: headers and JSON body) and,
//! after the round-trip, `parse` (post-receive: drain body, classify status,
//! decode). `MediaTailorClient::send` chains the two around a signer and a
//! transport, but callers may drive them by hand as well.

use std::io::Read;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::PlaybackConfiguration;

pub const CONTENT_TYPE: &str = "application/json; charset=UTF-8";
pub const TARGET_HEADER: &str = "x-amz-target";
pub const INVOCATION_ID_HEADER: &str = "amz-sdk-invocation-id";

/// Static description of one API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: String,
}

/// An operation bound to an endpoint and parameters, not yet sent.
#[derive(Debug, Clone)]
pub struct OperationRequest {
    pub operation: Operation,
    pub endpoint: String,
    pub target_prefix: &'static str,
    pub params: Option<PlaybackConfiguration>,
    pub invocation_id: Uuid,
    /// Extra headers appended after the ones `build` always sets.
    pub headers: Vec<(String, String)>,
}

/// Closed set of ways a response status is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusClass {
    Ok,
    NoContent,
    Unauthorized,
    Unexpected,
}

fn classify(status: u16) -> StatusClass {
    match status {
        200 => StatusClass::Ok,
        201..=299 => StatusClass::NoContent,
        403 => StatusClass::Unauthorized,
        _ => StatusClass::Unexpected,
    }
}

impl OperationRequest {
    pub(crate) fn new(
        operation: Operation,
        endpoint: String,
        target_prefix: &'static str,
        params: Option<PlaybackConfiguration>,
    ) -> Self {
        Self {
            operation,
            endpoint,
            target_prefix,
            params,
            invocation_id: Uuid::new_v4(),
            headers: Vec::new(),
        }
    }

    /// Pre-send hook: produce the wire request.
    ///
    /// The JSON content type is set on every request. Parameters, when
    /// present, become the body; failing to encode them is an error rather
    /// than a silently empty body.
    pub fn build(&self) -> Result<HttpRequest, ApiError> {
        let body = match &self.params {
            Some(params) => Some(serde_json::to_string(params).map_err(ApiError::RequestEncoding)?),
            None => None,
        };

        let mut headers = vec![
            ("content-type".to_string(), CONTENT_TYPE.to_string()),
            (
                TARGET_HEADER.to_string(),
                format!("{}.{}", self.target_prefix, self.operation.name),
            ),
            (INVOCATION_ID_HEADER.to_string(), self.invocation_id.to_string()),
        ];
        headers.extend(self.headers.iter().cloned());

        debug!(
            operation = self.operation.name,
            method = %self.operation.method,
            path = %self.operation.path,
            invocation_id = %self.invocation_id,
            has_body = body.is_some(),
            "built request"
        );

        Ok(HttpRequest {
            method: self.operation.method,
            url: format!("{}{}", self.endpoint, self.operation.path),
            headers,
            body,
        })
    }

    /// Post-receive hook: drain and release the body, then map the status.
    ///
    /// A 200 with an empty body yields the default configuration. A body that
    /// cannot be read is treated as empty.
    pub fn parse(&self, response: HttpResponse) -> Result<PlaybackConfiguration, ApiError> {
        let HttpResponse { status, body, .. } = response;
        let data = self.drain(body);

        debug!(
            operation = self.operation.name,
            invocation_id = %self.invocation_id,
            status,
            body_len = data.len(),
            "received response"
        );

        match classify(status) {
            StatusClass::Ok if data.is_empty() => Ok(PlaybackConfiguration::default()),
            StatusClass::Ok => serde_json::from_slice(&data).map_err(ApiError::Serialization),
            StatusClass::NoContent => Ok(PlaybackConfiguration::default()),
            StatusClass::Unauthorized => Err(ApiError::AccessDenied {
                message: String::from_utf8_lossy(&data).into_owned(),
            }),
            StatusClass::Unexpected => {
                warn!(
                    operation = self.operation.name,
                    invocation_id = %self.invocation_id,
                    status,
                    "unexpected response status"
                );
                Err(ApiError::UnexpectedStatus {
                    status,
                    body: String::from_utf8_lossy(&data).into_owned(),
                })
            }
        }
    }

    // Takes the stream by value so it is closed when this returns.
    fn drain(&self, mut body: Box<dyn Read + Send>) -> Vec<u8> {
        let mut buf = Vec::new();
        match body.read_to_end(&mut buf) {
            Ok(_) => buf,
            Err(e) => {
                warn!(
                    operation = self.operation.name,
                    invocation_id = %self.invocation_id,
                    error = %e,
                    "failed reading response body"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn get_request() -> OperationRequest {
        OperationRequest::new(
            Operation {
                name: "GetPlaybackConfiguration",
                method: HttpMethod::Get,
                path: "/playbackConfiguration/cfg1".to_string(),
            },
            "http://localhost:3000".to_string(),
            "MediaTailor_20170914",
            None,
        )
    }

    /// Reader that counts drops and optionally fails.
    struct TrackedBody {
        data: io::Cursor<Vec<u8>>,
        fail: bool,
        drops: Arc<AtomicUsize>,
    }

    impl Read for TrackedBody {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
            }
            self.data.read(buf)
        }
    }

    impl Drop for TrackedBody {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn tracked(status: u16, body: &str, fail: bool) -> (HttpResponse, Arc<AtomicUsize>) {
        let drops = Arc::new(AtomicUsize::new(0));
        let reader = TrackedBody {
            data: io::Cursor::new(body.as_bytes().to_vec()),
            fail,
            drops: drops.clone(),
        };
        (HttpResponse::from_reader(status, reader), drops)
    }

    #[test]
    fn build_without_params_has_no_body() {
        let req = get_request().build().unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/playbackConfiguration/cfg1");
        assert!(req.body.is_none());
        assert_eq!(req.header("content-type"), Some(CONTENT_TYPE));
        assert_eq!(
            req.header(TARGET_HEADER),
            Some("MediaTailor_20170914.GetPlaybackConfiguration")
        );
    }

    #[test]
    fn build_carries_invocation_id_and_extra_headers() {
        let mut op = get_request();
        op.headers.push(("x-trace".to_string(), "abc".to_string()));
        let req = op.build().unwrap();
        let id = op.invocation_id.to_string();
        assert_eq!(req.header(INVOCATION_ID_HEADER), Some(id.as_str()));
        assert_eq!(req.header("x-trace"), Some("abc"));
    }

    #[test]
    fn build_encodes_params_as_json() {
        let mut op = get_request();
        op.params = Some(PlaybackConfiguration::named("cfg1").with_slate_ad_url("https://slate"));
        let req = op.build().unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"Name": "cfg1", "SlateAdUrl": "https://slate"}));
    }

    #[test]
    fn invocation_ids_are_unique() {
        assert_ne!(get_request().invocation_id, get_request().invocation_id);
    }

    #[test]
    fn parse_ok_decodes_configuration() {
        let response = HttpResponse::new(200, r#"{"Name":"cfg1","PlaybackEndpointPrefix":"/v1/"}"#);
        let config = get_request().parse(response).unwrap();
        assert_eq!(config.name.as_deref(), Some("cfg1"));
        assert_eq!(config.playback_endpoint_prefix.as_deref(), Some("/v1/"));
        assert_eq!(
            config,
            PlaybackConfiguration {
                name: Some("cfg1".to_string()),
                playback_endpoint_prefix: Some("/v1/".to_string()),
                ..PlaybackConfiguration::default()
            }
        );
    }

    #[test]
    fn parse_ok_with_bad_json_is_serialization_error() {
        let err = get_request().parse(HttpResponse::new(200, "not-json")).unwrap_err();
        assert!(matches!(err, ApiError::Serialization(_)));
        assert_eq!(err.code(), "SerializationError");
    }

    #[test]
    fn parse_ok_with_empty_body_yields_default() {
        let config = get_request().parse(HttpResponse::new(200, "")).unwrap();
        assert_eq!(config, PlaybackConfiguration::default());
    }

    #[test]
    fn parse_no_content_yields_default() {
        let config = get_request().parse(HttpResponse::new(204, "")).unwrap();
        assert_eq!(config, PlaybackConfiguration::default());
    }

    #[test]
    fn parse_forbidden_carries_raw_body() {
        let err = get_request()
            .parse(HttpResponse::new(403, "access denied: quota exceeded"))
            .unwrap_err();
        assert!(matches!(err, ApiError::AccessDenied { .. }));
        assert_eq!(err.message(), "access denied: quota exceeded");
    }

    #[test]
    fn parse_server_error_is_unexpected_status() {
        let err = get_request().parse(HttpResponse::new(500, "internal")).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedStatus { status: 500, .. }));
        assert_eq!(err.message(), "internal");
    }

    #[test]
    fn parse_not_found_with_empty_body_is_still_an_error() {
        let err = get_request().parse(HttpResponse::new(404, "")).unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn body_is_released_once_on_success_and_error() {
        let (response, drops) = tracked(200, r#"{"Name":"a"}"#, false);
        get_request().parse(response).unwrap();
        assert_eq!(drops.load(Ordering::SeqCst), 1);

        let (response, drops) = tracked(200, "not-json", false);
        get_request().parse(response).unwrap_err();
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unreadable_body_is_treated_as_empty() {
        let (response, drops) = tracked(200, r#"{"Name":"a"}"#, true);
        let config = get_request().parse(response).unwrap();
        assert_eq!(config, PlaybackConfiguration::default());
        assert_eq!(drops.load(Ordering::SeqCst), 1);

        let (response, _) = tracked(403, "denied", true);
        let err = get_request().parse(response).unwrap_err();
        assert_eq!(err.message(), "");
    }
}
