//! Integration tests for Silver Saints.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p silver-saints-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Cart behaviour through the public core API
//! - `storefront_routes` - Static site router, driven in-process
