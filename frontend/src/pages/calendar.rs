use yew::prelude::*;

use crate::config::CalendarConfig;
use crate::widget;

#[function_component(CalendarPage)]
pub fn calendar_page() -> Html {
    let config = use_memo((), |_| CalendarConfig::from_env());

    {
        let config = config.clone();

        // The mount point exists once the first render is committed.
        use_effect_with((), move |_| {
            let calendar = match widget::initialize(&config) {
                Ok(calendar) => Some(calendar),
                Err(e) => {
                    tracing::error!("Failed to initialize calendar: {}", e);
                    None
                }
            };
            move || drop(calendar)
        });
    }

    html! {
        <div class="container">
            <h2>{ "Repair Schedule" }</h2>
            <div id={config.mount_id.clone()} class="calendar"></div>
        </div>
    }
}
