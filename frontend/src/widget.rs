//! Bindings to the FullCalendar widget loaded by the host page.
//!
//! The widget owns layout, navigation and rendering. We hand it an `events`
//! function that runs a [`CalendarLoader`] and reports back through the
//! widget's success/failure callbacks.

use std::rc::Rc;

use js_sys::{Function, Object, Reflect, JSON};
use shared::{CalendarEvent, CalendarLoader, FetchInfo, FetchRange, Transport};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::{CalendarConfig, InitialView};
use crate::services::api::ApiService;

#[wasm_bindgen(js_namespace = FullCalendar)]
extern "C" {
    type Calendar;

    #[wasm_bindgen(constructor, catch)]
    fn new(el: &Element, options: &Object) -> Result<Calendar, JsValue>;

    #[wasm_bindgen(method)]
    fn render(this: &Calendar);

    #[wasm_bindgen(method)]
    fn destroy(this: &Calendar);
}

type EventsFn = dyn FnMut(JsValue, Function, Function);

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Mount element #{0} not found")]
    MissingMount(String),

    #[error("Calendar widget error: {0}")]
    Js(String),
}

impl From<JsValue> for WidgetError {
    fn from(value: JsValue) -> Self {
        Self::Js(format!("{:?}", value))
    }
}

/// A constructed widget. Dropping it tears the widget down.
pub struct CalendarWidget {
    calendar: Calendar,
    // Called by the widget for as long as it lives.
    _events: Closure<EventsFn>,
}

impl CalendarWidget {
    pub fn new<T>(
        element: &Element,
        view: InitialView,
        loader: CalendarLoader<T>,
    ) -> Result<Self, WidgetError>
    where
        T: Transport + 'static,
    {
        let events = events_source(loader);

        let options = Object::new();
        Reflect::set(&options, &"initialView".into(), &view.as_str().into())?;
        Reflect::set(&options, &"events".into(), events.as_ref())?;

        let calendar = Calendar::new(element, &options)?;

        Ok(Self {
            calendar,
            _events: events,
        })
    }

    pub fn render(&self) {
        self.calendar.render();
    }
}

impl Drop for CalendarWidget {
    fn drop(&mut self) {
        self.calendar.destroy();
    }
}

/// Finds the mount point, builds the widget and renders it once.
pub fn initialize(config: &CalendarConfig) -> Result<CalendarWidget, WidgetError> {
    let element = gloo::utils::document()
        .get_element_by_id(&config.mount_id)
        .ok_or_else(|| WidgetError::MissingMount(config.mount_id.clone()))?;

    let loader = ApiService::calendar_loader(config);
    let widget = CalendarWidget::new(&element, config.initial_view, loader)?;
    widget.render();

    tracing::info!(
        view = %config.initial_view,
        url = %config.events_url,
        "Calendar rendered"
    );
    Ok(widget)
}

fn events_source<T>(loader: CalendarLoader<T>) -> Closure<EventsFn>
where
    T: Transport + 'static,
{
    let loader = Rc::new(loader);

    Closure::new(move |info: JsValue, success: Function, failure: Function| {
        let loader = Rc::clone(&loader);
        let range = fetch_range(&info);

        wasm_bindgen_futures::spawn_local(async move {
            let fail = || {
                if let Err(e) = failure.call0(&JsValue::NULL) {
                    tracing::error!("Widget failure callback threw: {:?}", e);
                }
            };
            let succeed = |events: Vec<CalendarEvent>| {
                match to_js(&events).and_then(|value| success.call1(&JsValue::NULL, &value)) {
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!("Could not hand events to the widget: {:?}", e);
                        fail();
                    }
                }
            };

            loader.load_events(range, succeed, fail).await;
        });
    })
}

fn fetch_range(info: &JsValue) -> Option<FetchRange> {
    let json: String = JSON::stringify(info).ok()?.into();
    serde_json::from_str::<FetchInfo>(&json).ok()?.range()
}

fn to_js(events: &[CalendarEvent]) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(events).map_err(|e| JsValue::from_str(&e.to_string()))?;
    JSON::parse(&json)
}
