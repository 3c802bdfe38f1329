pub mod form;
pub mod landing;
pub mod layout;
