use std::fmt;
use std::str::FromStr;

use shared::EventMapping;

/// Placeholder path the page ships with until a real endpoint is wired in.
pub const DEFAULT_EVENTS_URL: &str = "/your-endpoint-url";
pub const DEFAULT_MOUNT_ID: &str = "calendar";

/// View the widget opens on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InitialView {
    #[default]
    DayGridMonth,
    DayGridWeek,
    TimeGridWeek,
    TimeGridDay,
    ListWeek,
}

impl InitialView {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DayGridMonth => "dayGridMonth",
            Self::DayGridWeek => "dayGridWeek",
            Self::TimeGridWeek => "timeGridWeek",
            Self::TimeGridDay => "timeGridDay",
            Self::ListWeek => "listWeek",
        }
    }
}

impl fmt::Display for InitialView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InitialView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dayGridMonth" => Ok(Self::DayGridMonth),
            "dayGridWeek" => Ok(Self::DayGridWeek),
            "timeGridWeek" => Ok(Self::TimeGridWeek),
            "timeGridDay" => Ok(Self::TimeGridDay),
            "listWeek" => Ok(Self::ListWeek),
            other => Err(format!("Unknown calendar view: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarConfig {
    pub events_url: String,
    pub mount_id: String,
    pub initial_view: InitialView,
    pub detail_url_prefix: Option<String>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            events_url: DEFAULT_EVENTS_URL.to_string(),
            mount_id: DEFAULT_MOUNT_ID.to_string(),
            initial_view: InitialView::default(),
            detail_url_prefix: None,
        }
    }
}

impl CalendarConfig {
    /// Reads overrides baked in at build time; a browser has no runtime env.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| match key {
            "CALENDAR_EVENTS_URL" => option_env!("CALENDAR_EVENTS_URL"),
            "CALENDAR_MOUNT_ID" => option_env!("CALENDAR_MOUNT_ID"),
            "CALENDAR_INITIAL_VIEW" => option_env!("CALENDAR_INITIAL_VIEW"),
            "CALENDAR_DETAIL_URL_PREFIX" => option_env!("CALENDAR_DETAIL_URL_PREFIX"),
            _ => None,
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<&'static str>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let initial_view = match var("CALENDAR_INITIAL_VIEW").map(str::parse::<InitialView>) {
            Some(Ok(view)) => view,
            Some(Err(e)) => {
                tracing::warn!("{}, falling back to {}", e, defaults.initial_view);
                defaults.initial_view
            }
            None => defaults.initial_view,
        };

        Self {
            events_url: var("CALENDAR_EVENTS_URL")
                .map(str::to_string)
                .unwrap_or(defaults.events_url),
            mount_id: var("CALENDAR_MOUNT_ID")
                .map(str::to_string)
                .unwrap_or(defaults.mount_id),
            initial_view,
            detail_url_prefix: var("CALENDAR_DETAIL_URL_PREFIX").map(str::to_string),
        }
    }

    pub fn uses_placeholder_url(&self) -> bool {
        self.events_url == DEFAULT_EVENTS_URL
    }

    pub fn event_mapping(&self) -> EventMapping {
        EventMapping {
            detail_url_prefix: self.detail_url_prefix.clone(),
        }
    }
}
