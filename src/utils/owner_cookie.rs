//! Anonymous owner identification via the `user_id` cookie.

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use uuid::Uuid;

/// Cookie carrying the caller's owner ID.
pub const OWNER_COOKIE: &str = "user_id";

/// One year, in seconds.
const OWNER_COOKIE_MAX_AGE: u64 = 365 * 24 * 60 * 60;

const MAX_OWNER_ID_LEN: usize = 64;

/// Resolved caller identity for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub id: String,
    /// True if the ID was minted for this request and must be sent back.
    pub is_new: bool,
}

impl Owner {
    /// Reads the owner from the `Cookie` header, minting a new ID if absent.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match read_owner_cookie(headers) {
            Some(id) => Self { id, is_new: false },
            None => Self {
                id: Uuid::new_v4().to_string(),
                is_new: true,
            },
        }
    }

    /// `Set-Cookie` value for a freshly minted ID, `None` otherwise.
    pub fn set_cookie_header(&self) -> Option<HeaderValue> {
        if !self.is_new {
            return None;
        }

        HeaderValue::from_str(&format!(
            "{OWNER_COOKIE}={}; Path=/; Max-Age={OWNER_COOKIE_MAX_AGE}; HttpOnly; SameSite=Lax",
            self.id
        ))
        .ok()
    }
}

/// Extracts a usable `user_id` value from the `Cookie` header.
///
/// Empty, overlong, or non-token values are treated as absent.
pub fn read_owner_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|cookie_header| cookie_header.to_str().ok())
        .flat_map(|cookie_str| cookie_str.split(';'))
        .find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(OWNER_COOKIE), Some(value)) => Some(value.trim().to_string()),
                _ => None,
            }
        })
        .filter(|value| is_valid_owner_id(value))
}

fn is_valid_owner_id(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_OWNER_ID_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_reads_user_id_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; user_id=abc-123; lang=en");
        assert_eq!(read_owner_cookie(&headers), Some("abc-123".to_string()));
    }

    #[test]
    fn test_missing_cookie_mints_new_owner() {
        let owner = Owner::from_headers(&HeaderMap::new());

        assert!(owner.is_new);
        assert!(Uuid::parse_str(&owner.id).is_ok());

        let cookie = owner.set_cookie_header().unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with(&format!("user_id={}", owner.id)));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=31536000"));
    }

    #[test]
    fn test_existing_cookie_is_reused_without_set_cookie() {
        let owner = Owner::from_headers(&headers_with_cookie("user_id=alice"));

        assert_eq!(owner.id, "alice");
        assert!(!owner.is_new);
        assert!(owner.set_cookie_header().is_none());
    }

    #[test]
    fn test_malformed_values_are_ignored() {
        assert_eq!(read_owner_cookie(&headers_with_cookie("user_id=")), None);
        assert_eq!(
            read_owner_cookie(&headers_with_cookie("user_id=a b")),
            None
        );
        assert_eq!(
            read_owner_cookie(&headers_with_cookie(&format!("user_id={}", "x".repeat(65)))),
            None
        );
    }
}
