//! Transient status messages
//!
//! One-shot `category:message` cookie consumed by the rendering layer on
//! the next page load, mirroring classic flash-message semantics. The
//! message is percent-encoded so the cookie value stays within RFC 6265
//! cookie-octets; the rendering layer decodes it.

use axum_extra::extract::cookie::Cookie;

/// Name of the flash cookie
pub const FLASH_COOKIE: &str = "flash";

/// Build a flash cookie. Categories in use: success, danger, warning, info.
pub fn flash(category: &str, message: &str) -> Cookie<'static> {
    let value = format!("{category}:{}", urlencoding::encode(message));
    Cookie::build((FLASH_COOKIE, value)).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_cookie_encodes_category_and_message() {
        let cookie = flash("success", "Logged in successfully.");
        assert_eq!(cookie.name(), FLASH_COOKIE);
        assert_eq!(cookie.value(), "success:Logged%20in%20successfully.");
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn flash_value_stays_within_cookie_octets() {
        let cookie = flash("danger", "a message; with \"odd\" chars, and spaces");
        for byte in cookie.value().bytes() {
            // RFC 6265 cookie-octet: printable US-ASCII minus DQUOTE,
            // comma, semicolon and backslash.
            assert!(byte > 0x20 && byte < 0x7f);
            assert!(!matches!(byte, b'"' | b',' | b';' | b'\\'));
        }
    }
}
