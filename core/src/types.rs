//! Domain DTOs for the playback-configuration API.
//!
//! # Design
//! Every field is optional and skipped when absent, so a value serialized and
//! parsed back keeps the same set of populated fields and never grows `null`
//! entries. Wire names are PascalCase; the CDN ad segment field keeps the
//! service's historical `AdSegmentURL` spelling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named playback configuration as stored by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PlaybackConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_initialization_endpoint_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_decision_server_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_content_source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slate_ad_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdn_configuration: Option<CdnConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hls_configuration: Option<HlsConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playback_endpoint_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// CDN rewriting rules for ad and content segments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CdnConfiguration {
    #[serde(rename = "AdSegmentURL", skip_serializing_if = "Option::is_none")]
    pub ad_segment_url: Option<String>,
    #[serde(rename = "ContentSegmentUrlPrefix", skip_serializing_if = "Option::is_none")]
    pub content_segment_url_prefix: Option<String>,
}

/// Base path for HLS manifest delivery.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HlsConfiguration {
    #[serde(rename = "ManifestEndpointPrefix", skip_serializing_if = "Option::is_none")]
    pub manifest_endpoint_prefix: Option<String>,
}

impl PlaybackConfiguration {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_ad_decision_server_url(mut self, url: impl Into<String>) -> Self {
        self.ad_decision_server_url = Some(url.into());
        self
    }

    pub fn with_video_content_source_url(mut self, url: impl Into<String>) -> Self {
        self.video_content_source_url = Some(url.into());
        self
    }

    pub fn with_slate_ad_url(mut self, url: impl Into<String>) -> Self {
        self.slate_ad_url = Some(url.into());
        self
    }

    pub fn with_cdn_configuration(mut self, cdn: CdnConfiguration) -> Self {
        self.cdn_configuration = Some(cdn);
        self
    }

    /// HLS manifest endpoint prefix, or `""` when the service has not
    /// assigned an HLS configuration.
    pub fn manifest_endpoint_prefix(&self) -> &str {
        self.hls_configuration
            .as_ref()
            .and_then(|hls| hls.manifest_endpoint_prefix.as_deref())
            .unwrap_or("")
    }
}

/// Renders the configuration as indented JSON.
impl fmt::Display for PlaybackConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(self) {
            Ok(pretty) => f.write_str(&pretty),
            Err(e) => write!(f, "{e}"),
        }
    }
}
