//! Trait for calling upstream providers with cacheable requests.

use async_trait::async_trait;

/// Trait for calling an upstream provider.
///
/// The read-through fetcher calls an `Upstream` on cache miss, with the
/// original (non-normalized) request parameters. The trait is
/// provider-agnostic: geocoding, weather, and plan generation all implement
/// it over their own request and error types.
///
/// # Examples
///
/// ```rust,ignore
/// use wanderly_core::Upstream;
///
/// struct StaticUpstream {
///     response: MyResponse,
/// }
///
/// #[async_trait]
/// impl Upstream<MyRequest> for StaticUpstream {
///     type Response = MyResponse;
///     type Error = std::convert::Infallible;
///
///     async fn call(&self, _req: MyRequest) -> Result<Self::Response, Self::Error> {
///         Ok(self.response.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait Upstream<Req>: Send + Sync {
    /// The response type returned by the upstream provider.
    type Response;

    /// The error type the provider fails with. Upstream errors are
    /// terminal: the fetcher propagates them to the caller unchanged.
    type Error;

    /// Call the upstream provider with the given request.
    async fn call(&self, req: Req) -> Result<Self::Response, Self::Error>;
}
