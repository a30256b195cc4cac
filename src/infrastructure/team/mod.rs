//! Team roster actions

mod service;

pub use service::TeamService;
