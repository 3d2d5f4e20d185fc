//! NaPTAN stop access.
//!
//! Fetches bus, rail and ferry stop records from the UK National Public
//! Transport Access Nodes API, turns them into typed [`domain::Stop`]s and
//! serves them over HTTP as JSON, CSV, GeoJSON and an HTML map.

pub mod api;
pub mod cache;
pub mod config;
pub mod domain;
pub mod export;
pub mod geo;
pub mod web;
