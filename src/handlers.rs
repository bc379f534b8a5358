pub mod admin;
pub mod catalog;
pub mod orders;
pub mod settings;
pub mod uploads;
