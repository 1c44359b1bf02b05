use crate::error::{ErrorKind, Result};
use regex::Regex;
use scraper::{Html, Selector};
use sha1::{Digest, Sha1};
use std::sync::LazyLock;

/// Matches the login page's client-side hashing call, e.g.
/// `CryptoJS.SHA1('abcd1234-' + form['password'].value)`.
static SALT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"CryptoJS\.SHA1\('([^']+)-'\s*\+\s*form(?:\[[^\]]*?password[^\]]*?\]|\.password)\.value\)",
    )
    .expect("salt pattern is a valid regex")
});

/// Extracts the per-session salt from the inline scripts of the login page.
pub fn extract_salt(login_page: &str) -> Result<String> {
    let document = Html::parse_document(login_page);
    let scripts = Selector::parse("script")
        .map_err(|e| ErrorKind::ParseError(format!("script selector: {e}")))?;

    document
        .select(&scripts)
        .find_map(|script| {
            let text: String = script.text().collect();
            SALT_PATTERN
                .captures(&text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
        })
        .ok_or_else(|| ErrorKind::SaltNotFound.into())
}

/// `hex(SHA1("<salt>-<password>"))`, lowercase, as the portal's login form computes it.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(salt.as_bytes());
    hasher.update(b"-");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_PAGE: &str = r#"<html><head>
        <script src="/eams/static/scripts/jquery.js"></script>
        <script>var x = 1;</script>
        <script type="text/javascript">
            function checkLogin(form){
                form['password'].value = CryptoJS.SHA1('5e9b3f1a-2c4d-4e8f-9a0b-1c2d3e4f5a6b-' + form['password'].value);
                return true;
            }
        </script></head><body></body></html>"#;

    #[test]
    fn salt_is_read_from_bracketed_form_access() {
        assert_eq!(
            extract_salt(LOGIN_PAGE).unwrap(),
            "5e9b3f1a-2c4d-4e8f-9a0b-1c2d3e4f5a6b"
        );
    }

    #[test]
    fn salt_is_read_from_dotted_form_access() {
        let page = "<script>CryptoJS.SHA1('abcd1234-' + form.password.value)</script>";
        assert_eq!(extract_salt(page).unwrap(), "abcd1234");
    }

    #[test]
    fn missing_salt_is_reported() {
        let err = extract_salt("<html><script>login()</script></html>").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::SaltNotFound));
    }

    #[test]
    fn salt_outside_script_is_ignored() {
        let page = "<p>CryptoJS.SHA1('abcd1234-' + form.password.value)</p>";
        assert!(extract_salt(page).is_err());
    }

    #[test]
    fn hash_matches_known_vector() {
        assert_eq!(
            hash_password("abcd1234", "secret"),
            "00c956935d529e47b97705e4ee2e2afa98803465"
        );
        assert_eq!(hash_password("xyz", "pw"), "a1a529b824820d52ceeefb36e3f72d893195a360");
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash_password("s", "p"), hash_password("s", "p"));
        assert_ne!(hash_password("s", "p"), hash_password("t", "p"));
    }
}
