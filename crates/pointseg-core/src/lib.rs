pub mod composite;
pub mod config;
pub mod consts;
pub mod controller;
pub mod display;
pub mod error;
pub mod fingerprint;
pub mod mapping;
pub mod model;
pub mod output;
pub mod session;
