//! Default URL and scope constants for the Thesis Wallet SDK.

/// Default application name.
pub const DEFAULT_APP_NAME: &str = "Thesis Wallet";

/// Default origin the wallet front end is served from.
pub const DEFAULT_APP_ORIGIN: &str = "http://localhost:5173";

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default OIDC issuer (Keycloak realm).
pub const DEFAULT_OIDC_ISSUER: &str = "http://localhost:8080/realms/thesis";

/// Default OIDC client id.
pub const DEFAULT_OIDC_CLIENT_ID: &str = "frontend";

/// Default requested scopes.
pub const DEFAULT_OIDC_SCOPE: &str = "openid profile email thesis-access";
