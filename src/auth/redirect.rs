//! Post-login redirect resolution and logout-callback matching.

use url::Url;

use crate::config::AppConfig;

/// Path to navigate to after the sign-in callback.
///
/// `redirect_to` is resolved against the app origin. It is kept only when it
/// stays on the same origin and does not point back into the auth routes;
/// otherwise the home route is used.
pub fn resolve_redirect_path(redirect_to: Option<&str>, config: &AppConfig) -> String {
    let fallback = config.routes.home.clone();
    let Some(candidate) = redirect_to.filter(|c| !c.is_empty()) else {
        return fallback;
    };
    let Ok(base) = Url::parse(&config.app_origin) else {
        return fallback;
    };
    let Ok(resolved) = base.join(candidate) else {
        return fallback;
    };
    if resolved.origin() != base.origin() {
        tracing::debug!(redirect_to = candidate, "Ignoring cross-origin redirect");
        return fallback;
    }

    let mut path = resolved.path().to_string();
    if let Some(query) = resolved.query() {
        path.push('?');
        path.push_str(query);
    }
    if let Some(fragment) = resolved.fragment() {
        path.push('#');
        path.push_str(fragment);
    }

    if path.is_empty()
        || path == config.routes.auth_callback
        || path == config.routes.silent_refresh
        || path.starts_with("/auth/")
    {
        return fallback;
    }
    path
}

/// Whether `current_url` is the post-logout redirect target (origin + path).
///
/// An unparseable target falls back to the issuer origin and `/`.
pub fn is_logout_callback(current_url: &str, config: &AppConfig) -> bool {
    let Ok(current) = Url::parse(current_url) else {
        return false;
    };
    let (origin, path) = match Url::parse(&config.oidc.post_logout_redirect_uri) {
        Ok(target) => (target.origin(), target.path().to_string()),
        Err(_) => match Url::parse(&config.oidc.issuer) {
            Ok(issuer) => (issuer.origin(), "/".to_string()),
            Err(_) => return false,
        },
    };
    current.origin() == origin && current.path() == path
}
