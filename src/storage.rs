//! ブラウザ Cookie を使った名前付き・期限付きのレコード保存。
//!
//! レコードは JSON にシリアライズし、`encodeURIComponent` 相当でエスケープして
//! `name=value;expires=...;path=/` の形で書き込む。
//!
//! 書き込み先は [`CookieJar`] で抽象化している。WASM では `document.cookie`
//! ([`DocumentJar`])、ネイティブ（テスト）ではメモリ上の [`MemoryJar`] を使う。

use chrono::{DateTime, Duration, Utc};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Characters `encodeURIComponent` leaves unescaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Cookie の有効期限（日）。
pub const DEFAULT_TTL_DAYS: i64 = 7;

/// Cookie の path 属性。サイト全体から見えるようにルートに置く。
const ROOT_PATH: &str = "/";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to serialize record `{name}`: {source}")]
    Serialize {
        name: String,
        source: serde_json::Error,
    },
    #[error("record `{name}` is not valid UTF-8 once unescaped: {source}")]
    Unescape {
        name: String,
        source: std::str::Utf8Error,
    },
    #[error("record `{name}` is not valid JSON: {source}")]
    Parse {
        name: String,
        source: serde_json::Error,
    },
    #[error("failed to write cookie `{name}`: {reason}")]
    Write { name: String, reason: String },
    #[error("cookie storage unavailable: {0}")]
    Unavailable(String),
}

/// A single cookie as written by [`save`]. `value` is already escaped.
#[derive(Clone, Debug, PartialEq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub expires: DateTime<Utc>,
    pub path: String,
}

impl Cookie {
    /// The `document.cookie` assignment string.
    pub fn header(&self) -> String {
        format!(
            "{}={};expires={};path={}",
            self.name,
            self.value,
            self.expires.format("%a, %d %b %Y %H:%M:%S GMT"),
            self.path
        )
    }
}

/// A `document.cookie`-shaped store.
pub trait CookieJar {
    /// All live cookies as `name=value` pairs joined by `"; "`.
    fn cookie_string(&self) -> Result<String, StorageError>;

    /// Create or replace a cookie.
    fn set_cookie(&mut self, cookie: &Cookie) -> Result<(), StorageError>;
}

/// Save `record` under `name` for [`DEFAULT_TTL_DAYS`] days.
pub fn save<J, T>(jar: &mut J, name: &str, record: &T, now: DateTime<Utc>) -> Result<(), StorageError>
where
    J: CookieJar + ?Sized,
    T: Serialize + ?Sized,
{
    save_with_ttl(jar, name, record, DEFAULT_TTL_DAYS, now)
}

pub fn save_with_ttl<J, T>(
    jar: &mut J,
    name: &str,
    record: &T,
    ttl_days: i64,
    now: DateTime<Utc>,
) -> Result<(), StorageError>
where
    J: CookieJar + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(record).map_err(|source| StorageError::Serialize {
        name: name.to_string(),
        source,
    })?;

    let cookie = Cookie {
        name: name.to_string(),
        value: utf8_percent_encode(&json, URI_COMPONENT).to_string(),
        expires: now + Duration::days(ttl_days),
        path: ROOT_PATH.to_string(),
    };
    jar.set_cookie(&cookie)
}

/// Load the record stored under `name`, or `default` when there is none.
///
/// A stored value that does not unescape or parse is an error; it is never
/// silently replaced by `default`.
pub fn load<J, T>(jar: &J, name: &str, default: T) -> Result<T, StorageError>
where
    J: CookieJar + ?Sized,
    T: DeserializeOwned,
{
    let cookies = jar.cookie_string()?;
    for pair in cookies.split("; ") {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key != name {
            continue;
        }

        let json = percent_decode_str(value)
            .decode_utf8()
            .map_err(|source| StorageError::Unescape {
                name: name.to_string(),
                source,
            })?;
        return serde_json::from_str(&json).map_err(|source| StorageError::Parse {
            name: name.to_string(),
            source,
        });
    }
    Ok(default)
}

/// Current wall-clock time, used for cookie expiry.
#[cfg(target_arch = "wasm32")]
pub fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// The cookie jar for the current platform.
#[cfg(target_arch = "wasm32")]
pub fn browser_jar() -> Result<Box<dyn CookieJar>, StorageError> {
    Ok(Box::new(DocumentJar::new()?))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn browser_jar() -> Result<Box<dyn CookieJar>, StorageError> {
    Ok(Box::new(MemoryJar::new(now())))
}

// ── DocumentJar ────────────────────────────────────────────────

/// `document.cookie` of the current page.
#[cfg(target_arch = "wasm32")]
pub struct DocumentJar {
    document: web_sys::HtmlDocument,
}

#[cfg(target_arch = "wasm32")]
impl DocumentJar {
    pub fn new() -> Result<Self, StorageError> {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| StorageError::Unavailable("no document".into()))?;
        let document = document
            .dyn_into::<web_sys::HtmlDocument>()
            .map_err(|_| StorageError::Unavailable("document is not an HTML document".into()))?;
        Ok(Self { document })
    }
}

#[cfg(target_arch = "wasm32")]
impl CookieJar for DocumentJar {
    fn cookie_string(&self) -> Result<String, StorageError> {
        self.document
            .cookie()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set_cookie(&mut self, cookie: &Cookie) -> Result<(), StorageError> {
        self.document
            .set_cookie(&cookie.header())
            .map_err(|e| StorageError::Write {
                name: cookie.name.clone(),
                reason: format!("{e:?}"),
            })
    }
}

// ── MemoryJar ──────────────────────────────────────────────────

/// In-memory cookie store that honours expiry like a browser would.
#[derive(Debug)]
pub struct MemoryJar {
    cookies: Vec<Cookie>,
    clock: DateTime<Utc>,
}

impl MemoryJar {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            cookies: Vec::new(),
            clock: now,
        }
    }

    #[cfg(test)]
    /// Move the jar's clock forward; cookies past their expiry disappear.
    pub fn advance_to(&mut self, now: DateTime<Utc>) {
        self.clock = now;
        let clock = self.clock;
        self.cookies.retain(|c| c.expires > clock);
    }

    #[cfg(test)]
    /// Store a raw, pre-escaped value with the default lifetime.
    pub fn insert_raw(&mut self, name: &str, value: &str) {
        let cookie = Cookie {
            name: name.to_string(),
            value: value.to_string(),
            expires: self.clock + Duration::days(DEFAULT_TTL_DAYS),
            path: ROOT_PATH.to_string(),
        };
        self.upsert(cookie);
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.cookies.iter().find(|c| c.name == name)
    }

    fn upsert(&mut self, cookie: Cookie) {
        self.cookies
            .retain(|c| !(c.name == cookie.name && c.path == cookie.path));
        // Writing an already-expired cookie deletes it.
        if cookie.expires > self.clock {
            self.cookies.push(cookie);
        }
    }
}

impl CookieJar for MemoryJar {
    fn cookie_string(&self) -> Result<String, StorageError> {
        Ok(self
            .cookies
            .iter()
            .filter(|c| c.expires > self.clock)
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; "))
    }

    fn set_cookie(&mut self, cookie: &Cookie) -> Result<(), StorageError> {
        self.upsert(cookie.clone());
        Ok(())
    }
}
