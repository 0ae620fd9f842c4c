use axum::http::{header, HeaderName, HeaderValue, Request, Response};
use std::task::{Context, Poll};
use tower::{Layer, Service};

use crate::analytics::AnalyticsConfig;

/// Security header names
const X_CONTENT_TYPE_OPTIONS: HeaderName = HeaderName::from_static("x-content-type-options");
const X_FRAME_OPTIONS: HeaderName = HeaderName::from_static("x-frame-options");
const X_XSS_PROTECTION: HeaderName = HeaderName::from_static("x-xss-protection");
const STRICT_TRANSPORT_SECURITY: HeaderName =
    HeaderName::from_static("strict-transport-security");
const CONTENT_SECURITY_POLICY: HeaderName = HeaderName::from_static("content-security-policy");
const REFERRER_POLICY: HeaderName = HeaderName::from_static("referrer-policy");
const PERMISSIONS_POLICY: HeaderName = HeaderName::from_static("permissions-policy");

/// Security header values
const NOSNIFF: &str = "nosniff";
const DENY: &str = "DENY";
const XSS_BLOCK: &str = "1; mode=block";
const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
const CSP_API_VALUE: &str = "default-src 'none'; frame-ancestors 'none'";
const CSP_PAGE_BASE: &str = "default-src 'self'; img-src 'self' https: data:; \
                             style-src 'self' 'unsafe-inline'; frame-ancestors 'none'";
const REFERRER_POLICY_VALUE: &str = "strict-origin-when-cross-origin";
const PERMISSIONS_POLICY_VALUE: &str = "geolocation=(), microphone=(), camera=()";
const POSTHOG_ASSETS: &str = "https://*.posthog.com";

#[derive(Clone)]
pub struct SecurityHeadersLayer {
    include_hsts: bool,
    page_csp: HeaderValue,
}

/// Content-Security-Policy for HTML pages, widened for PostHog when enabled
fn page_csp(analytics: &AnalyticsConfig) -> HeaderValue {
    if !analytics.is_enabled() {
        return HeaderValue::from_static(CSP_PAGE_BASE);
    }

    let mut sources = String::from("'self'");
    if let Some(origin) = analytics.external_origin() {
        sources.push(' ');
        sources.push_str(origin);
    }
    sources.push(' ');
    sources.push_str(POSTHOG_ASSETS);

    let csp = format!(
        "{CSP_PAGE_BASE}; script-src {sources} 'unsafe-inline'; connect-src {sources}"
    );

    HeaderValue::from_str(&csp).unwrap_or_else(|e| {
        tracing::warn!("Security: invalid analytics host in CSP, using base policy: {}", e);
        HeaderValue::from_static(CSP_PAGE_BASE)
    })
}

impl SecurityHeadersLayer {
    pub fn new(include_hsts: bool, analytics: &AnalyticsConfig) -> Self {
        if include_hsts {
            tracing::info!("Security: HSTS header enabled (production mode)");
        } else {
            tracing::info!("Security: HSTS header disabled (development mode)");
        }

        Self {
            include_hsts,
            page_csp: page_csp(analytics),
        }
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeadersService {
            inner,
            include_hsts: self.include_hsts,
            page_csp: self.page_csp.clone(),
        }
    }
}

#[derive(Clone)]
pub struct SecurityHeadersService<S> {
    inner: S,
    include_hsts: bool,
    page_csp: HeaderValue,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for SecurityHeadersService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ResBody: Default,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = SecurityHeadersFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        SecurityHeadersFuture {
            future: self.inner.call(request),
            include_hsts: self.include_hsts,
            page_csp: self.page_csp.clone(),
        }
    }
}

#[pin_project::pin_project]
pub struct SecurityHeadersFuture<F> {
    #[pin]
    future: F,
    include_hsts: bool,
    page_csp: HeaderValue,
}

impl<F, ResBody, E> std::future::Future for SecurityHeadersFuture<F>
where
    F: std::future::Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ResBody>, E>;

    fn poll(self: std::pin::Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        match this.future.poll(cx) {
            Poll::Ready(Ok(mut response)) => {
                let headers = response.headers_mut();

                let is_html = headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .is_some_and(|v| v.starts_with("text/html"));

                let csp = if is_html {
                    this.page_csp.clone()
                } else {
                    HeaderValue::from_static(CSP_API_VALUE)
                };

                headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static(NOSNIFF));
                headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static(DENY));
                headers.insert(X_XSS_PROTECTION, HeaderValue::from_static(XSS_BLOCK));
                headers.insert(CONTENT_SECURITY_POLICY, csp);
                headers.insert(
                    REFERRER_POLICY,
                    HeaderValue::from_static(REFERRER_POLICY_VALUE),
                );
                headers.insert(
                    PERMISSIONS_POLICY,
                    HeaderValue::from_static(PERMISSIONS_POLICY_VALUE),
                );

                // Only add HSTS in production (HTTPS environments)
                if *this.include_hsts {
                    headers.insert(
                        STRICT_TRANSPORT_SECURITY,
                        HeaderValue::from_static(HSTS_VALUE),
                    );
                }

                Poll::Ready(Ok(response))
            }
            Poll::Ready(Err(e)) => Poll::Ready(Err(e)),
            Poll::Pending => Poll::Pending,
        }
    }
}

pub fn create_security_headers_layer(
    production: bool,
    analytics: &AnalyticsConfig,
) -> SecurityHeadersLayer {
    SecurityHeadersLayer::new(production, analytics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use tower::{service_fn, ServiceExt};

    async fn respond(layer: SecurityHeadersLayer, content_type: &'static str) -> Response<String> {
        let service = layer.layer(service_fn(move |_req: Request<()>| async move {
            Ok::<_, Infallible>(
                Response::builder()
                    .header(header::CONTENT_TYPE, content_type)
                    .body(String::new())
                    .unwrap(),
            )
        }));

        service.oneshot(Request::new(())).await.unwrap()
    }

    #[test]
    fn test_security_headers_layer_creation() {
        let layer = SecurityHeadersLayer::new(false, &AnalyticsConfig::default());
        assert!(!layer.include_hsts);

        let layer_with_hsts = SecurityHeadersLayer::new(true, &AnalyticsConfig::default());
        assert!(layer_with_hsts.include_hsts);
    }

    #[tokio::test]
    async fn test_api_responses_get_strict_csp() {
        let layer = SecurityHeadersLayer::new(false, &AnalyticsConfig::default());
        let response = respond(layer, "application/json").await;

        assert_eq!(response.headers()[CONTENT_SECURITY_POLICY], CSP_API_VALUE);
        assert_eq!(response.headers()[X_FRAME_OPTIONS], DENY);
        assert!(response.headers().get(STRICT_TRANSPORT_SECURITY).is_none());
    }

    #[tokio::test]
    async fn test_pages_allow_analytics_host() {
        let analytics = AnalyticsConfig::new(
            Some("phc_abc".into()),
            Some("https://eu.i.posthog.com".into()),
        );
        let layer = SecurityHeadersLayer::new(true, &analytics);
        let response = respond(layer, "text/html; charset=utf-8").await;

        let csp = response.headers()[CONTENT_SECURITY_POLICY].to_str().unwrap();
        assert!(csp.starts_with("default-src 'self'"));
        assert!(csp.contains("script-src 'self' https://eu.i.posthog.com"));
        assert_eq!(response.headers()[STRICT_TRANSPORT_SECURITY], HSTS_VALUE);
    }

    #[test]
    fn test_page_csp_without_analytics() {
        assert_eq!(page_csp(&AnalyticsConfig::default()), CSP_PAGE_BASE);
    }
}
