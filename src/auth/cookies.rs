use axum::http::{header, request::Parts};

use crate::config::CookieConfig;

fn attributes(cfg: &CookieConfig) -> &'static str {
    if cfg.secure {
        "HttpOnly; SameSite=Strict; Path=/; Secure"
    } else {
        "HttpOnly; SameSite=Strict; Path=/"
    }
}

pub fn session_cookie(cfg: &CookieConfig, token: &str, max_age_secs: u64) -> String {
    format!(
        "{}={}; {}; Max-Age={}",
        cfg.name,
        token,
        attributes(cfg),
        max_age_secs
    )
}

pub fn clear_session_cookie(cfg: &CookieConfig) -> String {
    format!("{}=; {}; Max-Age=0", cfg.name, attributes(cfg))
}

/// Value of the cookie `name`, looking across every `Cookie` header.
pub fn cookie_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .map(|s| s.trim())
        .find_map(|cookie| {
            let (key, val) = cookie.split_once('=')?;
            (key.trim() == name).then(|| val.trim())
        })
        .filter(|v| !v.is_empty())
}
