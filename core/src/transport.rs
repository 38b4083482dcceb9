//! Seams to the collaborators that own signing and network I/O.
//!
//! The core never implements SigV4 or opens sockets. A `Signer` decorates a
//! built `HttpRequest` with authentication headers and a `Transport` turns it
//! into an `HttpResponse`. Retries, timeouts and connection pooling live
//! behind `Transport`.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Signing scope for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    pub signing_name: &'static str,
    pub region: String,
}

pub trait Signer: Send + Sync {
    fn sign(&self, request: &mut HttpRequest, ctx: &SigningContext) -> Result<(), ApiError>;
}

pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Leaves requests untouched, for endpoints that do not verify signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSigning;

impl Signer for NoSigning {
    fn sign(&self, _request: &mut HttpRequest, _ctx: &SigningContext) -> Result<(), ApiError> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}
