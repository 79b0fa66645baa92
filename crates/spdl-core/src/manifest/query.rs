//! Query-parameter helpers for the manifest normalizer.
//!
//! Keys are compared ASCII case-insensitively. When a key repeats, the last
//! value wins but the first position is kept.

pub(super) const PROVIDER: &str = "provider";
pub(super) const DOC_ID: &str = "docId";
pub(super) const FORMAT: &str = "format";
pub(super) const PART: &str = "part";

pub(super) const FORMAT_DASH: &str = "dash";
pub(super) const PART_INDEX: &str = "index";

const CANONICAL_KEYS: [&str; 4] = [PROVIDER, DOC_ID, FORMAT, PART];

pub(super) type Pairs = Vec<(String, String)>;

/// Last value for `key`, compared case-insensitively.
pub(super) fn find<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .rev()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.as_str())
}

/// Like [`find`], but treats an empty value as absent.
pub(super) fn find_non_empty<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    find(pairs, key).filter(|v| !v.is_empty())
}

/// Keeps only `provider`, `docId`, `format` and `part`, in their original
/// spelling and order, collapsing case-insensitive duplicates.
pub(super) fn retain_canonical(pairs: &[(String, String)]) -> Pairs {
    let mut out: Pairs = Vec::with_capacity(CANONICAL_KEYS.len());
    for (k, v) in pairs {
        if !CANONICAL_KEYS.iter().any(|c| k.eq_ignore_ascii_case(c)) {
            continue;
        }
        match out.iter_mut().find(|(ok, _)| ok.eq_ignore_ascii_case(k)) {
            Some(existing) => existing.1 = v.clone(),
            None => out.push((k.clone(), v.clone())),
        }
    }
    out
}

/// Sets `key` to `value` in place (keeping the existing key spelling), or
/// appends it.
pub(super) fn upsert(pairs: &mut Pairs, key: &str, value: &str) {
    match pairs.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
        Some(existing) => existing.1 = value.to_string(),
        None => pairs.push((key.to_string(), value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Pairs {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn find_is_case_insensitive_and_last_wins() {
        let p = pairs(&[("DocID", "a"), ("x", "1"), ("docid", "b")]);
        assert_eq!(find(&p, DOC_ID), Some("b"));
        assert_eq!(find(&p, PROVIDER), None);
    }

    #[test]
    fn find_non_empty_skips_blank_values() {
        let p = pairs(&[("provider", "")]);
        assert_eq!(find(&p, PROVIDER), Some(""));
        assert_eq!(find_non_empty(&p, PROVIDER), None);
    }

    #[test]
    fn retain_drops_unknown_keys_and_keeps_spelling() {
        let p = pairs(&[
            ("provider", "spo"),
            ("access_token", "secret"),
            ("DocId", "abc"),
            ("segmentTime", "12"),
            ("Format", "hls"),
        ]);
        assert_eq!(
            retain_canonical(&p),
            pairs(&[("provider", "spo"), ("DocId", "abc"), ("Format", "hls")])
        );
    }

    #[test]
    fn retain_collapses_duplicates_in_first_position() {
        let p = pairs(&[("part", "mediasegment"), ("provider", "spo"), ("PART", "index")]);
        assert_eq!(
            retain_canonical(&p),
            pairs(&[("part", "index"), ("provider", "spo")])
        );
    }

    #[test]
    fn upsert_replaces_or_appends() {
        let mut p = pairs(&[("Format", "hls")]);
        upsert(&mut p, FORMAT, FORMAT_DASH);
        upsert(&mut p, PART, PART_INDEX);
        assert_eq!(p, pairs(&[("Format", "dash"), ("part", "index")]));
    }
}
