pub mod ai_client;
pub mod config;
pub mod digest;
pub mod domain;
pub mod email_client;
pub mod news_client;
pub mod routes;
pub mod startup;
pub mod storage;
pub mod telemetry;
pub mod weather_client;
