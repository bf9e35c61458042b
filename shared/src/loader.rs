use std::future::Future;

use crate::api::{FetchRange, RepairRecord};
use crate::error::{LoadError, LoadResult};
use crate::models::{CalendarEvent, EventMapping};

const HTTP_OK: u16 = 200;

/// Raw response handed back by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Performs the single GET the loader needs.
pub trait Transport {
    fn get(&self, url: &str) -> impl Future<Output = LoadResult<HttpResponse>>;
}

/// Fetches repairs from one fixed endpoint and turns them into calendar events.
#[derive(Debug, Clone)]
pub struct CalendarLoader<T> {
    transport: T,
    url: String,
    mapping: EventMapping,
}

impl<T: Transport> CalendarLoader<T> {
    pub fn new(transport: T, url: impl Into<String>) -> Self {
        Self {
            transport,
            url: url.into(),
            mapping: EventMapping::default(),
        }
    }

    pub fn with_mapping(mut self, mapping: EventMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// One GET, no parameters, no retry.
    pub async fn fetch_events(&self) -> LoadResult<Vec<CalendarEvent>> {
        let response = self.transport.get(&self.url).await?;

        if response.status != HTTP_OK {
            return Err(LoadError::Status(response.status));
        }

        let items: Vec<serde_json::Value> = serde_json::from_str(&response.body)?;
        let records = items.into_iter().map(RepairRecord::from_value).collect();
        Ok(self.mapping.map_records(records))
    }

    /// Callback form used by the widget. The requested range does not reach
    /// the endpoint, and the failure callback gets no details.
    pub async fn load_events<S, F>(&self, range: Option<FetchRange>, on_success: S, on_failure: F)
    where
        S: FnOnce(Vec<CalendarEvent>),
        F: FnOnce(),
    {
        match range {
            Some(r) => tracing::debug!(start = %r.start, end = %r.end, days = r.days(), "Widget requested events"),
            None => tracing::debug!("Widget requested events for an unparsed range"),
        }

        match self.fetch_events().await {
            Ok(events) => {
                tracing::debug!(count = events.len(), url = %self.url, "Loaded events");
                on_success(events);
            }
            Err(e) => {
                tracing::warn!(url = %self.url, "Failed to load events: {}", e);
                on_failure();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventId;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    struct StubTransport {
        response: Result<HttpResponse, String>,
        calls: Cell<usize>,
        last_url: RefCell<Option<String>>,
    }

    impl StubTransport {
        fn ok(status: u16, body: &str) -> Self {
            Self {
                response: Ok(HttpResponse {
                    status,
                    body: body.to_string(),
                }),
                calls: Cell::new(0),
                last_url: RefCell::new(None),
            }
        }

        fn unreachable() -> Self {
            Self {
                response: Err("connection refused".to_string()),
                calls: Cell::new(0),
                last_url: RefCell::new(None),
            }
        }
    }

    impl Transport for &StubTransport {
        async fn get(&self, url: &str) -> LoadResult<HttpResponse> {
            self.calls.set(self.calls.get() + 1);
            *self.last_url.borrow_mut() = Some(url.to_string());
            self.response.clone().map_err(LoadError::Network)
        }
    }

    /// Runs `load_events` and reports which callback fired.
    fn run(transport: &StubTransport) -> Result<Vec<CalendarEvent>, ()> {
        let loader = CalendarLoader::new(transport, "/your-endpoint-url");
        let outcome = RefCell::new(None);
        block_on(loader.load_events(
            None,
            |events| *outcome.borrow_mut() = Some(Ok(events)),
            || *outcome.borrow_mut() = Some(Err(())),
        ));
        outcome.into_inner().expect("a callback must fire")
    }

    #[test]
    fn test_single_record_success() {
        let transport = StubTransport::ok(
            200,
            r#"[{"repair_id":1,"start_date":"2024-01-01","end_date":"2024-01-02"}]"#,
        );
        let events = run(&transport).unwrap();
        assert_eq!(
            events,
            vec![CalendarEvent {
                id: Some(EventId::Number(1)),
                start: Some(serde_json::json!("2024-01-01")),
                end: Some(serde_json::json!("2024-01-02")),
                ..Default::default()
            }]
        );
        assert_eq!(transport.calls.get(), 1);
    }

    #[test]
    fn test_empty_array_is_success() {
        let transport = StubTransport::ok(200, "[]");
        assert_eq!(run(&transport), Ok(Vec::new()));
    }

    #[test]
    fn test_server_error_is_failure() {
        let transport = StubTransport::ok(500, r#"{"detail":"boom"}"#);
        assert_eq!(run(&transport), Err(()));
    }

    #[test]
    fn test_non_200_success_status_is_failure() {
        let transport = StubTransport::ok(204, "[]");
        assert_eq!(run(&transport), Err(()));
    }

    #[test]
    fn test_malformed_body_is_failure() {
        let transport = StubTransport::ok(200, "<html>oops</html>");
        assert_eq!(run(&transport), Err(()));
    }

    #[test]
    fn test_object_body_is_failure() {
        let transport = StubTransport::ok(200, r#"{"repair_id":1}"#);
        assert_eq!(run(&transport), Err(()));
    }

    #[test]
    fn test_network_error_is_failure() {
        let transport = StubTransport::unreachable();
        assert_eq!(run(&transport), Err(()));
    }

    #[test]
    fn test_missing_field_still_succeeds() {
        let transport =
            StubTransport::ok(200, r#"[{"repair_id":5,"start_date":"2024-02-01"}]"#);
        let events = run(&transport).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, Some(EventId::Number(5)));
        assert!(events[0].end.is_none());
    }

    #[test]
    fn test_mistyped_record_does_not_drop_the_batch() {
        let transport = StubTransport::ok(
            200,
            r#"[
                {"repair_id":1,"start_date":"2024-01-01","end_date":"2024-01-02"},
                {"repair_id":2,"start_date":1704067200000,"end_date":1704153600000},
                {"repair_id":1.0,"start_date":"2024-01-03","end_date":"2024-01-04"},
                7
            ]"#,
        );
        let events = run(&transport).unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].start, Some(serde_json::json!("2024-01-01")));
        assert_eq!(events[1].id, Some(EventId::Number(2)));
        assert_eq!(events[1].start, Some(serde_json::json!(1704067200000i64)));
        assert_eq!(events[2].id, Some(EventId::Other(serde_json::json!(1.0))));
        assert_eq!(events[3], CalendarEvent::default());
    }

    #[test]
    fn test_range_is_not_forwarded() {
        let transport = StubTransport::ok(200, "[]");
        let loader = CalendarLoader::new(&transport, "/your-endpoint-url");
        let range = FetchRange::parse("2024-01-01", "2024-02-01");
        block_on(loader.load_events(range, |_| {}, || {}));
        assert_eq!(
            transport.last_url.borrow().as_deref(),
            Some("/your-endpoint-url")
        );
    }

    #[test]
    fn test_repeated_loads_are_equal() {
        let body = r#"[
            {"repair_id":1,"start_date":"2024-01-01","end_date":"2024-01-02"},
            {"repair_id":"b","start_date":"2024-01-05","end_date":"2024-01-09","active":true}
        ]"#;
        let transport = StubTransport::ok(200, body);
        let first = run(&transport).unwrap();
        let second = run(&transport).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(transport.calls.get(), 2);
    }

    #[test]
    fn test_fetch_events_reports_cause() {
        let transport = StubTransport::ok(503, "");
        let loader = CalendarLoader::new(&transport, "/events");
        match block_on(loader.fetch_events()) {
            Err(LoadError::Status(503)) => {}
            other => panic!("unexpected result: {:?}", other),
        }

        let transport = StubTransport::ok(200, "not json");
        let loader = CalendarLoader::new(&transport, "/events");
        assert!(matches!(
            block_on(loader.fetch_events()),
            Err(LoadError::Decode(_))
        ));
    }

    #[test]
    fn test_mapping_is_applied() {
        let transport = StubTransport::ok(
            200,
            r#"[{"repair_id":8,"start_date":"2024-01-01","end_date":"2024-01-02","car_name":"Golf"}]"#,
        );
        let loader = CalendarLoader::new(&transport, "/events").with_mapping(EventMapping {
            detail_url_prefix: Some("repairs/".to_string()),
        });
        let events = block_on(loader.fetch_events()).unwrap();
        assert_eq!(events[0].url.as_deref(), Some("repairs/8"));
        assert_eq!(events[0].title, Some(serde_json::json!("Golf")));
    }
}
