//! Stylesheet `url(...)` rewriting.
//!
//! # Algorithm
//! 1. Non UTF-8 bodies are returned untouched.
//! 2. Each `url(` ... `)` is matched at a single nesting level: the inner
//!    token ends at the first `)`. Values containing parentheses are cut
//!    short, same as any regex-based rewriter.
//! 3. The token is trimmed of whitespace and surrounding quotes.
//! 4. `data:`, `http:` and `https:` tokens are kept; anything else is joined
//!    onto the stylesheet URL.
//! 5. The absolute URL is fully percent-encoded into
//!    `url('/api/asset?url=...')`.
//!
//! Rewriting is not idempotent: an already proxied reference is relative,
//! so it gets joined and wrapped a second time.
//!
//! Characters the URL join itself escapes (spaces, non-ASCII) are encoded
//! twice: `a b.png` ends up as `a%2520b.png`. One decode by the asset
//! endpoint yields `a%20b.png`, which names the same upstream resource.

use std::borrow::Cow;
use std::sync::LazyLock;

use axum::body::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::{Captures, Regex};
use url::Url;

/// Local endpoint proxied references point at.
const ASSET_ENDPOINT: &str = "/api/asset?url=";

/// Everything except ASCII alphanumerics and `-._~` is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

static URL_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"url\(([^)]+)\)").expect("static pattern"));

/// Rewrite every `url(...)` reference in a stylesheet body.
pub fn rewrite(body: Bytes, base: &Url) -> Bytes {
    let Ok(text) = std::str::from_utf8(&body) else {
        tracing::debug!(base = %base, "Stylesheet is not UTF-8, passing through");
        return body;
    };

    let mut count = 0usize;
    let rewritten = URL_REFERENCE.replace_all(text, |caps: &Captures| {
        count += 1;
        let absolute = absolutize(&caps[1], base);
        format!("url('{}')", proxied_asset_url(&absolute))
    });

    tracing::debug!(base = %base, references = count, "Rewrote stylesheet");

    match rewritten {
        Cow::Borrowed(_) => body,
        Cow::Owned(text) => Bytes::from(text),
    }
}

/// Local URL that fetches `absolute` through the asset endpoint.
pub fn proxied_asset_url(absolute: &str) -> String {
    format!("{}{}", ASSET_ENDPOINT, utf8_percent_encode(absolute, COMPONENT))
}

fn absolutize<'a>(token: &'a str, base: &Url) -> Cow<'a, str> {
    let reference = token.trim().trim_matches(|c| c == '"' || c == '\'');

    if reference.starts_with("data:")
        || reference.starts_with("http:")
        || reference.starts_with("https:")
    {
        return Cow::Borrowed(reference);
    }

    match base.join(reference) {
        Ok(url) => Cow::Owned(url.into()),
        Err(_) => Cow::Borrowed(reference),
    }
}
