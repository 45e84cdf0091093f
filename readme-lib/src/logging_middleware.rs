use http::Extensions;
use log::{log, Level};
use reqwest::{Request, Response, Url};
use reqwest_middleware::{Middleware, Next, Result};

const REDACTED_QUERY_KEYS: [&str; 1] = ["key"];

pub struct LoggingMiddleware {
    level: Level,
}

impl LoggingMiddleware {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

#[async_trait::async_trait]
impl Middleware for LoggingMiddleware {
    async fn handle(
        &self,
        request: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        log!(
            self.level,
            "begin request {} {}",
            request.method(),
            redact_url(request.url())
        );
        let result = next.run(request, extensions).await;
        match result.as_ref() {
            Ok(response) => {
                log!(self.level, "received response {}", response.status());
            }
            Err(e) => {
                log!(self.level, "request failed {:?}", e);
            }
        }
        result
    }
}

/// Replaces credential-bearing query values so URLs can be logged.
fn redact_url(url: &Url) -> Url {
    if !url
        .query_pairs()
        .any(|(k, _)| REDACTED_QUERY_KEYS.contains(&k.as_ref()))
    {
        return url.clone();
    }

    let pairs = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if REDACTED_QUERY_KEYS.contains(&k.as_ref()) {
                String::from("REDACTED")
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect::<Vec<_>>();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}
