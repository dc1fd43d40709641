pub mod config;
pub mod constants;
pub mod detail;
pub mod domain;
pub mod error;
pub mod geo;
pub mod jsonld;
pub mod listing;
pub mod logging;
pub mod map_feed;
pub mod markers;
pub mod pagination;
pub mod pdf;
pub mod storage;
pub mod terms;
pub mod urls;
pub mod web;
