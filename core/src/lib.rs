//! Client core for the MediaTailor playback-configuration API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). Signing and transport are
//! supplied by the caller through the `Signer` and `Transport` traits.
//!
//! # Design
//! - `MediaTailorClient` holds fixed service metadata, an endpoint, a signer
//!   and optional per-instance init hooks; it keeps no state between calls.
//! - Each operation returns an unsent `OperationRequest`. Its `build` and
//!   `parse` methods are the JSON pre-send and post-receive hooks.
//! - Response status is mapped to a closed set: 2xx success, 403
//!   `AccessDenied`, anything else `UnexpectedStatus`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod operation;
pub mod transport;
pub mod types;

pub use client::{MediaTailorClient, MediaTailorClientBuilder, ServiceMetadata};
pub use config::{ClientConfig, DEFAULT_REGION};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use operation::{Operation, OperationRequest};
pub use transport::{NoSigning, Signer, SigningContext, Transport};
pub use types::{CdnConfiguration, HlsConfiguration, PlaybackConfiguration};
