use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{calendar::CalendarPage, not_found::NotFound};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Calendar,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Calendar => html! { <CalendarPage /> },
        Route::NotFound => html! { <NotFound /> },
    }
}
