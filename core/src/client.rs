//! Request builder and pipeline for the playback-configuration API.
//!
//! # Design
//! `MediaTailorClient` holds the service metadata, the resolved endpoint, a
//! signer and the optional per-instance hooks. It carries no mutable state
//! between calls. Each operation has a `*_request` method returning an unsent
//! `OperationRequest`; `send` runs it through build, sign, the caller's
//! `Transport`, and parse. The caller always owns the network I/O.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::{ClientConfig, ENDPOINTS_ID, SERVICE_NAME};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::operation::{Operation, OperationRequest};
use crate::transport::{NoSigning, Signer, SigningContext, Transport};
use crate::types::PlaybackConfiguration;

pub const SIGNING_NAME: &str = "mediatailor";
pub const API_VERSION: &str = "2017-09-14";
pub const JSON_VERSION: &str = "1.1";
pub const TARGET_PREFIX: &str = "MediaTailor_20170914";

/// Runs once when a client is built.
pub type ClientInitHook = Arc<dyn Fn(&mut MediaTailorClient) + Send + Sync>;

/// Runs on every operation request a client creates.
pub type RequestInitHook = Arc<dyn Fn(&MediaTailorClient, &mut OperationRequest) + Send + Sync>;

/// Fixed identity of the service the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMetadata {
    pub service_name: &'static str,
    pub endpoints_id: &'static str,
    pub signing_name: &'static str,
    pub signing_region: String,
    pub api_version: &'static str,
    pub json_version: &'static str,
    pub target_prefix: &'static str,
}

impl ServiceMetadata {
    fn for_region(region: String) -> Self {
        Self {
            service_name: SERVICE_NAME,
            endpoints_id: ENDPOINTS_ID,
            signing_name: SIGNING_NAME,
            signing_region: region,
            api_version: API_VERSION,
            json_version: JSON_VERSION,
            target_prefix: TARGET_PREFIX,
        }
    }
}

/// Client for the playback-configuration resource.
#[derive(Clone)]
pub struct MediaTailorClient {
    metadata: ServiceMetadata,
    endpoint: String,
    signer: Arc<dyn Signer>,
    request_init: Option<RequestInitHook>,
}

impl MediaTailorClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::builder().config(config).build()
    }

    pub fn builder() -> MediaTailorClientBuilder {
        MediaTailorClientBuilder::default()
    }

    pub fn metadata(&self) -> &ServiceMetadata {
        &self.metadata
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn set_endpoint(&mut self, endpoint: &str) {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
    }

    pub fn signing_context(&self) -> SigningContext {
        SigningContext {
            signing_name: self.metadata.signing_name,
            region: self.metadata.signing_region.clone(),
        }
    }

    pub fn get_config_request(&self, name: &str) -> OperationRequest {
        let op = Operation {
            name: "GetPlaybackConfiguration",
            method: HttpMethod::Get,
            path: format!("/playbackConfiguration/{name}"),
        };
        self.new_request(op, None)
    }

    /// The body's `name` is replaced by `name`, so the resource identity is
    /// always the one the caller asked for.
    pub fn put_config_request(&self, name: &str, mut body: PlaybackConfiguration) -> OperationRequest {
        let op = Operation {
            name: "PutPlaybackConfiguration",
            method: HttpMethod::Put,
            path: "/playbackConfiguration".to_string(),
        };
        body.name = Some(name.to_string());
        self.new_request(op, Some(body))
    }

    pub fn delete_config_request(&self, name: &str) -> OperationRequest {
        let op = Operation {
            name: "DeletePlaybackConfiguration",
            method: HttpMethod::Delete,
            path: format!("/playbackConfiguration/{name}"),
        };
        self.new_request(op, None)
    }

    /// Build, sign, execute and parse `request`.
    pub fn send<T: Transport>(
        &self,
        request: &OperationRequest,
        transport: T,
    ) -> Result<PlaybackConfiguration, ApiError> {
        let mut http = request.build()?;
        self.signer.sign(&mut http, &self.signing_context())?;
        debug!(
            operation = request.operation.name,
            invocation_id = %request.invocation_id,
            url = %http.url,
            "sending request"
        );
        let response = transport.execute(http)?;
        request.parse(response)
    }

    pub fn get_config<T: Transport>(&self, name: &str, transport: T) -> Result<PlaybackConfiguration, ApiError> {
        self.send(&self.get_config_request(name), transport)
    }

    pub fn put_config<T: Transport>(
        &self,
        name: &str,
        body: PlaybackConfiguration,
        transport: T,
    ) -> Result<PlaybackConfiguration, ApiError> {
        self.send(&self.put_config_request(name, body), transport)
    }

    pub fn delete_config<T: Transport>(&self, name: &str, transport: T) -> Result<PlaybackConfiguration, ApiError> {
        self.send(&self.delete_config_request(name), transport)
    }

    fn new_request(&self, op: Operation, params: Option<PlaybackConfiguration>) -> OperationRequest {
        let mut request = OperationRequest::new(op, self.endpoint.clone(), self.metadata.target_prefix, params);
        if let Some(init) = &self.request_init {
            init(self, &mut request);
        }
        request
    }
}

impl fmt::Debug for MediaTailorClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaTailorClient")
            .field("metadata", &self.metadata)
            .field("endpoint", &self.endpoint)
            .field("request_init", &self.request_init.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for `MediaTailorClient`. Everything is optional.
#[derive(Default)]
pub struct MediaTailorClientBuilder {
    config: ClientConfig,
    signer: Option<Arc<dyn Signer>>,
    client_init: Option<ClientInitHook>,
    request_init: Option<RequestInitHook>,
}

impl MediaTailorClientBuilder {
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.config.region = Some(region.into());
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = Some(endpoint.into());
        self
    }

    pub fn signer(mut self, signer: impl Signer + 'static) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    pub fn on_client_init(mut self, hook: impl Fn(&mut MediaTailorClient) + Send + Sync + 'static) -> Self {
        self.client_init = Some(Arc::new(hook));
        self
    }

    pub fn on_request_init(
        mut self,
        hook: impl Fn(&MediaTailorClient, &mut OperationRequest) + Send + Sync + 'static,
    ) -> Self {
        self.request_init = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> MediaTailorClient {
        let mut client = MediaTailorClient {
            metadata: ServiceMetadata::for_region(self.config.resolved_region()),
            endpoint: self.config.resolved_endpoint(),
            signer: self.signer.unwrap_or_else(|| Arc::new(NoSigning) as Arc<dyn Signer>),
            request_init: self.request_init,
        };
        if let Some(init) = self.client_init {
            init(&mut client);
        }
        debug!(
            region = %client.metadata.signing_region,
            endpoint = %client.endpoint,
            "built mediatailor client"
        );
        client
    }
}
