use url::Url;

/// URL seen by routes nested under a match that consumed `matched_text` at
/// `offset` of `url`'s path. Search, hash, scheme and host are kept.
#[tracing::instrument(level = "trace", skip(url), fields(path = %url.path()))]
pub fn residual(url: &Url, matched_text: &str, offset: usize) -> Url {
    if matched_text.is_empty() {
        return url.clone();
    }
    let path = residual_path(url.path(), matched_text, offset);
    let mut next = url.clone();
    next.set_path(&path);
    next
}

pub fn residual_path(path: &str, matched_text: &str, offset: usize) -> String {
    if matched_text.is_empty() {
        return path.to_string();
    }

    let span = offset
        .checked_add(matched_text.len())
        .and_then(|end| Some((path.get(..offset)?, path.get(offset..end)?, path.get(end..)?)));
    let Some((before, consumed, after)) = span else {
        tracing::warn!(path, offset, matched_text, "matched span lies outside the path");
        return path.to_string();
    };
    if consumed != matched_text {
        tracing::warn!(path, offset, matched_text, "matched span does not match the path");
        return path.to_string();
    }

    let mut out = String::with_capacity(before.len() + after.len() + 1);
    out.push_str(before);
    out.push_str(after);
    if out.is_empty() {
        out.push('/');
    }
    out
}
