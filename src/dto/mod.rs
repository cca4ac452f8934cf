pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod menu;
pub mod orders;
pub mod users;
