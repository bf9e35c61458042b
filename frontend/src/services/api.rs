use gloo_net::http::Request;
use shared::{CalendarLoader, HttpResponse, LoadError, LoadResult, Transport};

use crate::config::CalendarConfig;

/// Browser transport backed by `fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    async fn get(&self, url: &str) -> LoadResult<HttpResponse> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| LoadError::Network(format!("{:?}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Network(format!("Failed to read body: {:?}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

pub struct ApiService;

impl ApiService {
    pub fn calendar_loader(config: &CalendarConfig) -> CalendarLoader<GlooTransport> {
        if config.uses_placeholder_url() {
            tracing::warn!(
                "Events endpoint is still the placeholder {}; set CALENDAR_EVENTS_URL at build time",
                config.events_url
            );
        }

        CalendarLoader::new(GlooTransport, config.events_url.clone())
            .with_mapping(config.event_mapping())
    }
}
