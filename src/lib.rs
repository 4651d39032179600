// Library for tests to access modules

pub mod aggregation;
pub mod calendar;
pub mod config;
pub mod error;
pub mod forecast;
pub mod jokes;
pub mod models;
pub mod openweather;
pub mod routes;
