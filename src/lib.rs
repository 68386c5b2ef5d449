pub mod clock;
pub mod collision;
pub mod compute;
pub mod config;
pub mod draw;
pub mod entities;
pub mod error;
pub mod input;
pub mod session;
