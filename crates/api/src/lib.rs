//! Ordergraph API: orders, shipping and recommendations over REST and GraphQL.
//!
//! This crate provides the server as a library so the router can be driven
//! from tests without a network listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
