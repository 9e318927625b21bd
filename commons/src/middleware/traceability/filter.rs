//! Middleware sequencing trace extraction, timing, and composition.

use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use super::{RequestHeaderExtractor, ResponseHeaderCompositor, TraceDatafill};

/// Traceability middleware stamping correlation headers on every response.
///
/// Wraps the downstream handler chain: inbound headers are extracted into a
/// per-request trace data set on arrival, and after the handlers resolve the
/// elapsed duration is added and the whole set is written onto the response
/// headers. Handler failures propagate untouched; translating them into
/// responses is the error mapping boundary's job, not this filter's.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use commons::middleware::traceability::{TraceDatafill, Traceability};
///
/// let app = App::new().wrap(Traceability::new(TraceDatafill::new("example-service")));
/// ```
#[derive(Debug, Clone)]
pub struct Traceability {
    datafill: Arc<TraceDatafill>,
}

impl Traceability {
    /// Create the middleware from a fully constructed header vocabulary.
    #[must_use]
    pub fn new(datafill: TraceDatafill) -> Self {
        Self {
            datafill: Arc::new(datafill),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Traceability
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceabilityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceabilityMiddleware {
            service,
            datafill: Arc::clone(&self.datafill),
            extractor: RequestHeaderExtractor::new(Arc::clone(&self.datafill)),
            compositor: ResponseHeaderCompositor::new(Arc::clone(&self.datafill)),
        }))
    }
}

/// Service wrapper produced by [`Traceability`].
///
/// Applications should not use this type directly.
pub struct TraceabilityMiddleware<S> {
    service: S,
    datafill: Arc<TraceDatafill>,
    extractor: RequestHeaderExtractor,
    compositor: ResponseHeaderCompositor,
}

impl<S, B> Service<ServiceRequest> for TraceabilityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let mut trace_data = self.extractor.extract(req.headers());
        debug!(?trace_data, "inbound trace data");
        let started = Instant::now();
        let duration_key = self.datafill.duration.clone();
        let compositor = self.compositor.clone();
        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            // The header map is still mutable here: middleware unwinds before
            // Actix serializes the response head. A completion-stage hook
            // would fire after the headers are committed and is too late.
            let elapsed_ms = started.elapsed().as_millis();
            trace_data.insert(duration_key, elapsed_ms.to_string());
            compositor.compose(&trace_data, res.response_mut().headers_mut());
            Ok(res)
        })
    }
}
