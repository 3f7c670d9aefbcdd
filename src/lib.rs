// Library for tests and demos to access modules

pub mod config;
pub mod error;
pub mod models;
pub mod proxy;
pub mod results_repo;
pub mod routes;
pub mod validator;
pub mod version;
pub mod views;
