//! Named page routes.
//!
//! Each page is a static HTML file in the site directory; the routes only
//! give them clean URLs. The files under `crates/storefront/public` are
//! placeholder shells that let the server run out of the box. A deployment
//! points `STOREFRONT_SITE_DIR` at the built site, which replaces them along
//! with its scripts, styles and media.

use std::path::Path;

use axum::Router;
use tower_http::services::ServeFile;

/// Landing page, served at `/`.
pub const INDEX_PAGE: &str = "index.html";

/// Collection page, served at `/collection`.
pub const COLLECTION_PAGE: &str = "collection.html";

/// Create the page routes for files under `site_dir`.
pub fn page_routes(site_dir: &Path) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(site_dir.join(INDEX_PAGE)))
        .route_service("/collection", ServeFile::new(site_dir.join(COLLECTION_PAGE)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    fn bundled(page: &str) -> String {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("public")
            .join(page);
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_bundled_shells_link_each_other() {
        assert!(bundled(INDEX_PAGE).contains(r#"href="/collection""#));
        assert!(bundled(COLLECTION_PAGE).contains(r#"href="/""#));
    }

    #[test]
    fn test_bundled_collection_has_cart_mount_point() {
        let html = bundled(COLLECTION_PAGE);
        assert!(html.contains(r#"id="cartItems""#));
        assert!(html.contains("YOUR CART IS EMPTY"));
    }
}
