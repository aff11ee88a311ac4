pub mod cli;
pub mod config;
pub mod descriptor;
pub mod driver;
pub mod error;
pub mod i18n;
pub mod microsoft;
pub mod naming;
pub mod pipeline;
pub mod proxies;
pub mod registration;
