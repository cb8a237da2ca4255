//! DOI normalization and request-path encoding.

/// Resolver URL prefixes users commonly paste in front of a DOI.
const DOI_URL_PREFIXES: [&str; 4] = [
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
];

/// Normalizes a user-supplied identifier to a bare DOI.
///
/// Trims whitespace, strips resolver URL prefixes and a case-insensitive
/// `doi:` prefix. Only identifiers pasted as resolver URLs are
/// percent-decoded; a bare DOI may legitimately contain `%`. No syntax
/// validation is done here; the registry is the authority on whether a DOI is
/// well formed.
#[must_use]
pub fn normalize_doi(input: &str) -> String {
    let mut doi = input.trim();
    let mut from_url = false;

    for prefix in &DOI_URL_PREFIXES {
        if let Some(head) = doi.get(..prefix.len())
            && head.eq_ignore_ascii_case(prefix)
        {
            doi = &doi[prefix.len()..];
            from_url = true;
            break;
        }
    }

    if let Some(head) = doi.get(..4)
        && head.eq_ignore_ascii_case("doi:")
    {
        doi = doi[4..].trim_start();
    }

    if !from_url {
        return doi.trim().to_string();
    }
    match urlencoding::decode(doi) {
        Ok(decoded) => decoded.trim().to_string(),
        Err(_) => doi.trim().to_string(),
    }
}

/// Percent-encodes a DOI for use as a URL path, keeping `/` separators.
#[must_use]
pub(crate) fn encode_doi_path(doi: &str) -> String {
    doi.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
