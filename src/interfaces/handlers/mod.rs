pub mod forms;
pub mod home;
pub mod system;
