//! Keycloak session adapter: login redirects, code exchange, silent
//! refresh, and the recurring refresh task.
//!
//! DESIGN
//! ======
//! [`Session`] is constructed once at the app root and shared via context;
//! there is no global instance. It speaks the authorization-code + PKCE
//! flow directly against the realm's OpenID Connect endpoints: `login()`
//! stores a verifier and redirects away, `initialize()` picks the code up
//! on return and exchanges it, and a stored refresh token silently revives
//! the session on later visits. URL building, PKCE math, and token
//! acceptance are plain functions so the protocol layer tests natively;
//! only the HTTP calls and redirects live behind the `hydrate` gate.

#[cfg(test)]
#[path = "oidc_test.rs"]
mod oidc_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(any(test, feature = "hydrate"))]
use base64::Engine;
#[cfg(any(test, feature = "hydrate"))]
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use leptos::prelude::*;
#[cfg(any(test, feature = "hydrate"))]
use sha2::{Digest, Sha256};

#[cfg(any(test, feature = "hydrate"))]
use crate::net::types::TokenResponse;
use crate::state::session::SessionState;
#[cfg(any(test, feature = "hydrate"))]
use crate::state::session::{TokenSet, UserProfile};
#[cfg(any(test, feature = "hydrate"))]
use crate::util::jwt;
use crate::util::storage;

/// localStorage keys for the login round trip and session revival.
const VERIFIER_KEY: &str = "storefront_pkce_verifier";
const LOGIN_STATE_KEY: &str = "storefront_login_state";
const REFRESH_TOKEN_KEY: &str = "storefront_refresh_token";

/// Minimum remaining token validity that triggers a silent renewal.
pub const REFRESH_MIN_VALIDITY_SECS: i64 = 30;

/// Tick length of the recurring refresh task.
#[cfg(feature = "hydrate")]
const REFRESH_INTERVAL_SECS: u64 = 30;

/// Identity-provider connection settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Keycloak base URL without a trailing slash.
    pub base_url: String,
    pub realm: String,
    pub client_id: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:9443".to_owned(),
            realm: "parcial-realm".to_owned(),
            client_id: "web-client".to_owned(),
        }
    }
}

#[cfg(any(test, feature = "hydrate"))]
impl SessionConfig {
    fn authorize_endpoint(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/auth",
            self.base_url, self.realm
        )
    }

    fn token_endpoint(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.base_url, self.realm
        )
    }

    fn logout_endpoint(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/logout",
            self.base_url, self.realm
        )
    }
}

/// Shared handle to the login session.
///
/// Clones share the same underlying state, so pages can keep a copy in
/// async tasks while components read the signal through context.
#[derive(Clone)]
pub struct Session {
    /// Reactive session state. The adapter is the only writer.
    pub state: RwSignal<SessionState>,
    /// Provider settings the adapter was constructed with.
    pub config: SessionConfig,
    init_started: Arc<AtomicBool>,
    refresh_alive: Arc<AtomicBool>,
}

impl Session {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            state: RwSignal::new(SessionState::default()),
            config,
            init_started: Arc::new(AtomicBool::new(false)),
            refresh_alive: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Resolve the session once at startup. Calling again returns the
    /// current outcome without re-running the flow.
    ///
    /// Resolution order: an authorization code in the URL is exchanged
    /// first, then a stored refresh token is tried silently, otherwise the
    /// visitor stays anonymous.
    pub async fn initialize(&self) -> bool {
        if self.init_started.swap(true, Ordering::Relaxed) {
            return self.state.with_untracked(SessionState::authenticated);
        }
        #[cfg(feature = "hydrate")]
        {
            if let Some((code, state)) = current_auth_code() {
                if self.exchange_code(&code, &state).await {
                    clear_login_query();
                    self.start_refresh_task();
                    return true;
                }
            }
            if let Some(refresh_token) = storage::load_string(REFRESH_TOKEN_KEY) {
                match self.refresh_with(&refresh_token).await {
                    Ok(()) => {
                        self.start_refresh_task();
                        return true;
                    }
                    Err(e) => leptos::logging::warn!("stored session restore failed: {e}"),
                }
            }
        }
        self.state.update(SessionState::mark_unauthenticated);
        false
    }

    /// Current bearer token, straight from memory. No freshness guarantee;
    /// callers needing one go through [`Session::refresh_if_needed`] first.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.with_untracked(SessionState::token)
    }

    /// Silently renew the access token when it expires within
    /// `min_validity_secs`. A negative threshold forces the renewal.
    /// Resolves to whether a refresh actually happened.
    ///
    /// # Errors
    ///
    /// Propagates the identity provider's rejection so callers can fall
    /// back to a fresh login.
    pub async fn refresh_if_needed(&self, min_validity_secs: i64) -> Result<bool, String> {
        #[cfg(feature = "hydrate")]
        {
            let tokens = self.state.with_untracked(|s| s.tokens.clone());
            let Some(tokens) = tokens else {
                return Err("no session to refresh".to_owned());
            };
            if !tokens.expires_within(now_secs(), min_validity_secs) {
                return Ok(false);
            }
            self.refresh_with(&tokens.refresh_token).await?;
            Ok(true)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = min_validity_secs;
            Err("not available on server".to_owned())
        }
    }

    /// Redirect the browser to the provider's login page (authorization
    /// code + PKCE). Not locally resumable; the provider sends the user
    /// back with a code that [`Session::initialize`] exchanges.
    pub fn login(&self) {
        #[cfg(feature = "hydrate")]
        {
            let verifier = new_verifier();
            let state = uuid::Uuid::new_v4().simple().to_string();
            storage::save_string(VERIFIER_KEY, &verifier);
            storage::save_string(LOGIN_STATE_KEY, &state);
            let url = authorize_url(
                &self.config,
                &redirect_uri(),
                &state,
                &code_challenge(&verifier),
            );
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(&url);
            }
        }
    }

    /// End the session: stop the refresh task, drop stored credentials,
    /// reset local state, and redirect to the provider's logout page.
    pub fn logout(&self) {
        self.stop_refresh_task();
        storage::remove(REFRESH_TOKEN_KEY);
        storage::remove(VERIFIER_KEY);
        storage::remove(LOGIN_STATE_KEY);
        self.state.update(SessionState::reset);
        #[cfg(feature = "hydrate")]
        {
            let url = logout_url(&self.config, &origin());
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(&url);
            }
        }
    }

    /// Accept a token endpoint response: decode the identity, persist the
    /// refresh token, and enter (or stay in) the authenticated phase.
    #[cfg(any(test, feature = "hydrate"))]
    fn accept_tokens(&self, tokens: &TokenResponse) -> Result<(), String> {
        let claims = jwt::decode_claims(&tokens.access_token)
            .ok_or_else(|| "access token payload did not decode".to_owned())?;
        let expires_at = if claims.exp > 0 {
            claims.exp
        } else {
            now_secs() + tokens.expires_in
        };
        let user = UserProfile::from_claims(&claims);
        storage::save_string(REFRESH_TOKEN_KEY, &tokens.refresh_token);
        self.state.update(|s| {
            s.authenticate(
                user,
                TokenSet {
                    access_token: tokens.access_token.clone(),
                    refresh_token: tokens.refresh_token.clone(),
                    expires_at,
                },
            );
        });
        Ok(())
    }

    #[cfg(feature = "hydrate")]
    async fn exchange_code(&self, code: &str, returned_state: &str) -> bool {
        let stored_state = storage::load_string(LOGIN_STATE_KEY);
        if stored_state.as_deref() != Some(returned_state) {
            leptos::logging::warn!("login state mismatch; discarding authorization code");
            return false;
        }
        let Some(verifier) = storage::load_string(VERIFIER_KEY) else {
            leptos::logging::warn!("missing PKCE verifier; discarding authorization code");
            return false;
        };
        storage::remove(VERIFIER_KEY);
        storage::remove(LOGIN_STATE_KEY);

        let body = code_exchange_body(&self.config, code, &verifier, &redirect_uri());
        match self.request_tokens(body).await {
            Ok(()) => true,
            Err(e) => {
                leptos::logging::warn!("authorization code exchange failed: {e}");
                false
            }
        }
    }

    #[cfg(feature = "hydrate")]
    async fn refresh_with(&self, refresh_token: &str) -> Result<(), String> {
        let body = refresh_grant_body(&self.config, refresh_token);
        self.request_tokens(body).await
    }

    #[cfg(feature = "hydrate")]
    async fn request_tokens(&self, body: String) -> Result<(), String> {
        let resp = gloo_net::http::Request::post(&self.config.token_endpoint())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("token endpoint answered {}", resp.status()));
        }
        let tokens: TokenResponse = resp.json().await.map_err(|e| e.to_string())?;
        self.accept_tokens(&tokens)
    }

    /// Begin the recurring silent-refresh task. One task per session;
    /// further calls while it is alive are no-ops.
    #[cfg(feature = "hydrate")]
    fn start_refresh_task(&self) {
        if self.refresh_alive.swap(true, Ordering::Relaxed) {
            return;
        }
        let alive = Arc::clone(&self.refresh_alive);
        let session = self.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_secs(REFRESH_INTERVAL_SECS))
                    .await;
                if !alive.load(Ordering::Relaxed) {
                    break;
                }
                match session.refresh_if_needed(REFRESH_MIN_VALIDITY_SECS).await {
                    Ok(true) => leptos::logging::log!("access token silently refreshed"),
                    Ok(false) => {}
                    Err(e) => leptos::logging::warn!("silent token refresh failed: {e}"),
                }
            }
        });
    }

    /// Stop the recurring refresh task; it exits at its next tick.
    fn stop_refresh_task(&self) {
        self.refresh_alive.store(false, Ordering::Relaxed);
    }
}

/// Random high-entropy PKCE verifier (64 hex chars).
#[cfg(any(test, feature = "hydrate"))]
fn new_verifier() -> String {
    format!(
        "{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}

/// S256 code challenge for a PKCE verifier (RFC 7636).
#[cfg(any(test, feature = "hydrate"))]
fn code_challenge(verifier: &str) -> String {
    let digest = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}

#[cfg(any(test, feature = "hydrate"))]
fn authorize_url(config: &SessionConfig, redirect_uri: &str, state: &str, challenge: &str) -> String {
    format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}&code_challenge={}&code_challenge_method=S256",
        config.authorize_endpoint(),
        urlencoding::encode(&config.client_id),
        urlencoding::encode(redirect_uri),
        urlencoding::encode("openid profile email"),
        urlencoding::encode(state),
        urlencoding::encode(challenge),
    )
}

#[cfg(any(test, feature = "hydrate"))]
fn logout_url(config: &SessionConfig, post_logout_redirect_uri: &str) -> String {
    format!(
        "{}?client_id={}&post_logout_redirect_uri={}",
        config.logout_endpoint(),
        urlencoding::encode(&config.client_id),
        urlencoding::encode(post_logout_redirect_uri),
    )
}

#[cfg(any(test, feature = "hydrate"))]
fn form_encode(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(any(test, feature = "hydrate"))]
fn code_exchange_body(
    config: &SessionConfig,
    code: &str,
    verifier: &str,
    redirect_uri: &str,
) -> String {
    form_encode(&[
        ("grant_type", "authorization_code"),
        ("client_id", &config.client_id),
        ("code", code),
        ("redirect_uri", redirect_uri),
        ("code_verifier", verifier),
    ])
}

#[cfg(any(test, feature = "hydrate"))]
fn refresh_grant_body(config: &SessionConfig, refresh_token: &str) -> String {
    form_encode(&[
        ("grant_type", "refresh_token"),
        ("client_id", &config.client_id),
        ("refresh_token", refresh_token),
    ])
}

/// Extract the `code` and `state` parameters from a location search
/// string. Keycloak appends extra parameters (`session_state`, `iss`);
/// those are ignored.
#[cfg(any(test, feature = "hydrate"))]
fn auth_code_from_search(search: &str) -> Option<(String, String)> {
    let query = search.strip_prefix('?').unwrap_or(search);
    let mut code = None;
    let mut state = None;
    for pair in query.split('&') {
        let mut parts = pair.splitn(2, '=');
        let key = parts.next().unwrap_or("");
        let value = parts.next().unwrap_or("");
        match key {
            "code" => code = Some(value.to_owned()),
            "state" => state = Some(value.to_owned()),
            _ => {}
        }
    }
    Some((code?, state?))
}

/// Current wall-clock time in unix seconds.
#[cfg(any(test, feature = "hydrate"))]
fn now_secs() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let secs = (js_sys::Date::now() / 1000.0) as i64;
        secs
    }
    #[cfg(not(feature = "hydrate"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}

#[cfg(feature = "hydrate")]
fn current_auth_code() -> Option<(String, String)> {
    let search = web_sys::window()?.location().search().ok()?;
    auth_code_from_search(&search)
}

/// Strip the `?code=...&state=...` query after a successful exchange so a
/// reload does not retry a consumed code.
#[cfg(feature = "hydrate")]
fn clear_login_query() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let path = window
        .location()
        .pathname()
        .unwrap_or_else(|_| "/".to_owned());
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
    }
}

#[cfg(feature = "hydrate")]
fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "/".to_owned())
}

/// Where the provider sends the user after login. The dashboard route
/// doubles as the OAuth callback.
#[cfg(feature = "hydrate")]
fn redirect_uri() -> String {
    format!("{}/dashboard", origin())
}
