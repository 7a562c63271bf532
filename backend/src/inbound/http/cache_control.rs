//! Shared cache-control policies for HTTP handlers.

/// Rendered pages depend on the session and any pending notice.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// Bundled stylesheet and script change only between releases.
pub const PUBLIC_ONE_HOUR: &str = "public, max-age=3600";

/// Cache-control header tuple for rendered pages.
pub const fn private_no_cache_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_CACHE_MUST_REVALIDATE)
}

/// Cache-control header tuple for static assets.
pub const fn public_asset_header() -> (&'static str, &'static str) {
    ("Cache-Control", PUBLIC_ONE_HOUR)
}
