//! Silver Saints Storefront library.
//!
//! This crate provides the static site server as a library, allowing the
//! router to be tested without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
