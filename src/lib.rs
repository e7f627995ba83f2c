pub mod clients;
pub mod config;
pub mod controller;
pub mod geolocation;
pub mod headless;
pub mod input;
pub mod marker;
pub mod net;
pub mod notification;
pub mod overlay;
pub mod page;
pub mod types;
