pub mod calendar;
pub mod metric;
pub mod observation;
pub mod record;
pub mod station;
