//! One-time notices shown on the page rendered after a redirect.
//!
//! A handler that mutates the catalog returns a [`Notice`] alongside its
//! redirect. The notice rides in a cookie and is removed by the next page
//! that renders it.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    fn encode(&self) -> Option<String> {
        serde_json::to_vec(self)
            .ok()
            .map(|json| URL_SAFE_NO_PAD.encode(json))
    }

    fn decode(value: &str) -> Option<Self> {
        let json = URL_SAFE_NO_PAD.decode(value).ok()?;
        serde_json::from_slice(&json).ok()
    }
}

/// Reads and writes the notice cookie
#[derive(Debug, Clone)]
pub struct NoticeCookie {
    name: String,
}

impl NoticeCookie {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Attach a notice for the next rendered page
    pub fn put(&self, jar: CookieJar, notice: &Notice) -> CookieJar {
        match notice.encode() {
            Some(value) => jar.add(
                Cookie::build((self.name.clone(), value))
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax),
            ),
            None => jar,
        }
    }

    /// Take the pending notice, if any, clearing the cookie
    pub fn take(&self, jar: CookieJar) -> (CookieJar, Option<Notice>) {
        let notice = match jar.get(&self.name) {
            Some(cookie) => Notice::decode(cookie.value()),
            None => return (jar, None),
        };
        let jar = jar.remove(Cookie::build((self.name.clone(), "")).path("/"));
        (jar, notice)
    }
}
