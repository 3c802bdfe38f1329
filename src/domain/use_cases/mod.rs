pub mod form_controller;
pub mod resume;
