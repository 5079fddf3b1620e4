// src/lib.rs

//! Gojoin catalog library
//!
//! Castle records with multilingual names, filtered by region, prefecture
//! and a free-text query, with the view encoded in a shareable URL fragment.

pub mod catalog;
pub mod error;
pub mod locale;
pub mod models;
pub mod pipeline;
pub mod query;
pub mod share;
pub mod storage;
pub mod store;
