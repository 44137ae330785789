pub mod certificate;
pub mod collector;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod storage;
pub mod templates;
