pub mod csv;
pub mod frame;
pub mod history;
