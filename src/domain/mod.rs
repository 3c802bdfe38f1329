pub mod entities;
pub mod form;
pub mod use_cases;
