pub mod flash;
pub mod html;
