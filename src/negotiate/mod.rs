//! Accept header content negotiation
//!
//! Resolves whether a response should be serialized as JSON (the default)
//! or CBOR, following the RFC 9110 Section 12.5.1 precedence rules:
//! quality value is the primary ranking factor and media-range specificity
//! only breaks quality ties.

use std::fmt;


/// One parsed entry from an `Accept` header.
///
/// `kind` and `subtype` are lowercased; `q` defaults to 1.0 when the
/// parameter is missing or unparseable.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRange {
    /// Type component, lowercased ("application", "*")
    pub kind: String,
    /// Subtype component, lowercased ("json", "*")
    pub subtype: String,
    /// Quality weight in `0.0..=1.0`, default 1.0
    pub q: f64,
}

/// Parse an `Accept` header value into media ranges per RFC 9110.
///
/// Parsing is tolerant: empty segments are skipped, a missing slash yields
/// subtype `*`, and a bad or out-of-range q value falls back to 1.0. The
/// returned order matches input order; ranking happens in [`prefer_cbor`].
pub fn parse_accept(header: &str) -> Vec<MediaRange> {
    if header.is_empty() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    for part in header.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let mut q = 1.0_f64;
        let media_type = match part.split_once(';') {
            Some((before, after)) => {
                for param in after.split(';') {
                    let Some((key, raw)) = param.trim().split_once('=') else {
                        continue;
                    };
                    if !key.trim().eq_ignore_ascii_case("q") {
                        continue;
                    }
                    if let Ok(qval) = raw.trim().parse::<f64>() {
                        if (0.0..=1.0).contains(&qval) {
                            q = qval;
                        }
                    }
                }
                before.trim()
            }
            None => part,
        };

        let (kind, subtype) = match media_type.split_once('/') {
            Some((t, s)) => (t.trim().to_lowercase(), s.trim().to_lowercase()),
            None => (media_type.trim().to_lowercase(), "*".to_string()),
        };

        ranges.push(MediaRange { kind, subtype, q });
    }
    ranges
}

/// Determine the preferred response format from an `Accept` header.
///
/// Returns `true` when CBOR is preferred, `false` for JSON (the default).
/// CBOR is only chosen when it strictly dominates by quality or, at equal
/// quality, by specificity; every tie falls back to JSON.
pub fn prefer_cbor(header: &str) -> bool {
    let ranges = parse_accept(header);
    if ranges.is_empty() {
        return false;
    }

    let mut cbor_q = -1.0_f64;
    let mut json_q = -1.0_f64;
    let mut cbor_specificity = 0_u8;
    let mut json_specificity = 0_u8;

    for mr in &ranges {
        // q=0 is an explicit exclusion and never contributes a candidate.
        if mr.q == 0.0 {
            continue;
        }

        let mut matches_cbor = false;
        let mut matches_json = false;
        let specificity: u8;

        if mr.kind == "application" && mr.subtype == "problem+cbor" {
            matches_cbor = true;
            specificity = 4;
        } else if mr.kind == "application" && mr.subtype == "problem+json" {
            matches_json = true;
            specificity = 4;
        } else if mr.kind == "application" && mr.subtype == "cbor" {
            matches_cbor = true;
            specificity = 3;
        } else if mr.kind == "application" && mr.subtype == "json" {
            matches_json = true;
            specificity = 3;
        } else if mr.kind == "application" && mr.subtype.ends_with("+cbor") {
            matches_cbor = true;
            specificity = 3;
        } else if mr.kind == "application" && mr.subtype.ends_with("+json") {
            matches_json = true;
            specificity = 3;
        } else if mr.kind == "application" && mr.subtype == "*" {
            matches_cbor = true;
            matches_json = true;
            specificity = 2;
        } else if mr.kind == "*" && mr.subtype == "*" {
            matches_cbor = true;
            matches_json = true;
            specificity = 1;
        } else {
            continue;
        }

        if matches_cbor
            && (specificity > cbor_specificity
                || (specificity == cbor_specificity && mr.q > cbor_q))
        {
            cbor_q = mr.q;
            cbor_specificity = specificity;
        }
        if matches_json
            && (specificity > json_specificity
                || (specificity == json_specificity && mr.q > json_q))
        {
            json_q = mr.q;
            json_specificity = specificity;
        }
    }

    if cbor_q <= 0.0 && json_q <= 0.0 {
        return false;
    }
    if cbor_q > json_q {
        return true;
    }
    if json_q > cbor_q {
        return false;
    }
    cbor_specificity > json_specificity
}

/// Wire format of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// `application/json` (default)
    #[default]
    Json,
    /// `application/cbor`
    Cbor,
}

impl Format {
    /// Resolve the format from an `Accept` header value.
    pub fn from_accept(header: &str) -> Self {
        if prefer_cbor(header) {
            Format::Cbor
        } else {
            Format::Json
        }
    }

    /// Content type for regular payloads.
    pub fn content_type(self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Cbor => "application/cbor",
        }
    }

    /// Content type for RFC 9457 problem payloads.
    pub fn problem_content_type(self) -> &'static str {
        match self {
            Format::Json => "application/problem+json",
            Format::Cbor => "application/problem+cbor",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.content_type())
    }
}
