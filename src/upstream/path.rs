//! Upstream path derivation.

use url::Url;

use crate::error::{GatewayError, Result};

/// Return the directory part of a canonical URL's path, including the
/// trailing `/` (everything between the authority and the file name).
pub fn directory_prefix(canonical_url: &str) -> Result<String> {
    let invalid = |reason: String| GatewayError::InvalidUpstreamUrl {
        url: canonical_url.to_string(),
        reason,
    };

    let url = Url::parse(canonical_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid(format!("unsupported url scheme {:?}", url.scheme())));
    }

    let path = url.path();
    let end = path.rfind('/').map_or(0, |i| i + 1);
    Ok(path[..end].to_string())
}

/// Rebuild the real upstream URL for one media file.
///
/// `{scheme}://{host}/{token}{directory prefix}{file_name}`
pub fn upstream_media_url(
    scheme: &str,
    host: &str,
    token: &str,
    canonical_url: &str,
    file_name: &str,
) -> Result<String> {
    let prefix = directory_prefix(canonical_url)?;
    Ok(format!("{scheme}://{host}/{token}{prefix}{file_name}"))
}
