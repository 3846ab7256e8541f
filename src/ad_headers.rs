use ntex::http::header::{self, HeaderValue};
use ntex::service::{Middleware, Service, ServiceCtx};
use ntex::web::{ErrorRenderer, WebRequest, WebResponse};

const AD_SCRIPT: &str = "adsbygoogle.js";

/// Responses for the ad script must never be cached by browsers or proxies.
pub fn is_ad_script(content_type: Option<&str>, path: &str) -> bool {
    let by_type = content_type.map(|ct| ct.contains(AD_SCRIPT)).unwrap_or(false);
    let by_path = path.rsplit('/').next() == Some(AD_SCRIPT);
    by_type || by_path
}

/// Adds no-cache headers to ad script responses, whatever route produced them.
pub struct AdScriptNoCache;

impl<S> Middleware<S> for AdScriptNoCache {
    type Service = AdScriptNoCacheMiddleware<S>;

    fn create(&self, service: S) -> Self::Service {
        AdScriptNoCacheMiddleware { service }
    }
}

pub struct AdScriptNoCacheMiddleware<S> {
    service: S,
}

impl<S, Err> Service<WebRequest<Err>> for AdScriptNoCacheMiddleware<S>
where
    S: Service<WebRequest<Err>, Response = WebResponse>,
    Err: ErrorRenderer,
{
    type Response = WebResponse;
    type Error = S::Error;

    async fn call(&self, req: WebRequest<Err>, ctx: ServiceCtx<'_, Self>) -> Result<Self::Response, Self::Error> {
        let path = req.path().to_string();
        let mut res = ctx.call(&self.service, req).await?;

        let content_type = res.headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        if is_ad_script(content_type, &path) {
            let headers = res.headers_mut();
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store, must-revalidate"));
            headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
            headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
        }

        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ad_script() {
        assert!(is_ad_script(Some("text/javascript; name=adsbygoogle.js"), "/whatever"));
        assert!(is_ad_script(Some("application/javascript"), "/static/adsbygoogle.js"));
        assert!(is_ad_script(None, "/adsbygoogle.js"));
        assert!(!is_ad_script(Some("application/javascript"), "/static/app.js"));
        assert!(!is_ad_script(Some("text/html; charset=utf-8"), "/blog.html"));
        assert!(!is_ad_script(None, "/static/adsbygoogle.js.map"));
    }
}
