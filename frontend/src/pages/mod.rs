pub mod calendar;
pub mod not_found;
