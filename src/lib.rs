pub mod address;
pub mod api;
pub mod config;
pub mod error;
pub mod market;
pub mod metadata;
pub mod pages;
pub mod run;
pub mod types;
pub mod view;
