//! Request handlers for the Pitchside web server

pub mod contact;
pub mod feeds;
pub mod flash;
pub mod health;
pub mod pages;

pub use contact::submit_contact;
pub use feeds::{news, scores};
pub use health::health_check;
pub use pages::{about, contact_page, home, login_page, register_page};
