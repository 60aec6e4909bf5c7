//! Fixture document generation from an endpoint list.
//!
//! Turns route paths such as `/rooms/:room/presence` into raw GET fixtures
//! whose `:param` segments are replaced with placeholders pointing at a few
//! seed fixtures run first.

use regex::Regex;
use serde_json::{json, Value};
use std::sync::LazyLock;
use tracing::debug;

/// Matches a `:param` route segment.
static PARAM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":[a-zA-Z]+").expect("PARAM_REGEX must compile"));

/// Paths containing any of these are not generated.
pub const IGNORED_PATHS: &[&str] = &["boxes", "_ks_"];

/// Route parameters and the placeholders that replace them.
pub const PARAM_PLACEHOLDERS: &[(&str, &str)] = &[
    (":domain", "${xdomain.domain_id}"),
    (":roomId", "${xrooms[0].id}"),
    (":room", "${xrooms[0].id}"),
];

/// Why an endpoint line produced no fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skipped {
    /// The path matched an ignore pattern.
    Ignored(String),
    /// The path has a parameter with no known placeholder.
    Unreplaceable(String),
}

impl std::fmt::Display for Skipped {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Skipped::Ignored(line) => write!(f, "Ignoring {}", line),
            Skipped::Unreplaceable(line) => write!(f, "Unable to replace {}", line),
        }
    }
}

/// Result of generating a document.
#[derive(Debug, Clone)]
pub struct Generated {
    /// The fixture document.
    pub document: Value,
    /// Lines that were skipped, in input order.
    pub skipped: Vec<Skipped>,
}

/// The fixtures every generated document starts with.
pub fn seed_fixtures() -> Vec<Value> {
    vec![
        json!({"name": "xdomain", "path": "/", "method": "get", "silent": true}),
        json!({"name": "xrooms", "path": "/rooms", "method": "get", "silent": true}),
        json!({"name": "xmeetings", "path": "/meetings", "method": "get"}),
    ]
}

/// Build one raw GET fixture from an endpoint path, or explain why not.
pub fn endpoint_fixture(line: &str) -> Result<Value, Skipped> {
    let line = line.trim_end();

    if IGNORED_PATHS.iter().any(|ignored| line.contains(ignored)) {
        return Err(Skipped::Ignored(line.to_string()));
    }

    let path = line.strip_prefix('/').unwrap_or(line);
    let name = path.replace('/', "-");

    if PARAM_REGEX
        .find_iter(path)
        .any(|param| placeholder_for(param.as_str()).is_none())
    {
        return Err(Skipped::Unreplaceable(path.to_string()));
    }

    let resolved = PARAM_REGEX.replace_all(path, |caps: &regex::Captures<'_>| {
        placeholder_for(&caps[0]).unwrap_or_default().to_string()
    });

    Ok(json!({
        "name": name,
        "path": resolved,
        "method": "get",
        "raw": true,
    }))
}

fn placeholder_for(param: &str) -> Option<&'static str> {
    PARAM_PLACEHOLDERS
        .iter()
        .find(|(known, _)| *known == param)
        .map(|(_, placeholder)| *placeholder)
}

/// Generate a fixture document from endpoint paths, one per line.
pub fn generate<'a>(lines: impl IntoIterator<Item = &'a str>) -> Generated {
    let mut fixtures = seed_fixtures();
    let mut skipped = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        match endpoint_fixture(line) {
            Ok(fixture) => fixtures.push(fixture),
            Err(reason) => {
                debug!("{}", reason);
                skipped.push(reason);
            }
        }
    }

    Generated {
        document: json!({ "fixtures": fixtures }),
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{parse_document, validate};

    #[test]
    fn plain_endpoint_becomes_raw_get() {
        let fixture = endpoint_fixture("/meetings/recent").unwrap();
        assert_eq!(
            fixture,
            json!({"name": "meetings-recent", "path": "meetings/recent", "method": "get", "raw": true})
        );
    }

    #[test]
    fn known_params_become_placeholders() {
        let fixture = endpoint_fixture("/rooms/:room/presence").unwrap();
        assert_eq!(fixture["name"], "rooms-:room-presence");
        assert_eq!(fixture["path"], "rooms/${xrooms[0].id}/presence");
    }

    #[test]
    fn domain_param_uses_domain_fixture() {
        let fixture = endpoint_fixture("/domains/:domain").unwrap();
        assert_eq!(fixture["path"], "domains/${xdomain.domain_id}");
    }

    #[test]
    fn room_id_param_is_not_split() {
        let fixture = endpoint_fixture("/recordings/:roomId").unwrap();
        assert_eq!(fixture["path"], "recordings/${xrooms[0].id}");
    }

    #[test]
    fn overlapping_param_names_are_replaced_whole() {
        let fixture = endpoint_fixture("/rooms/:room/:roomId").unwrap();
        assert_eq!(fixture["path"], "rooms/${xrooms[0].id}/${xrooms[0].id}");
    }

    #[test]
    fn unknown_params_are_skipped() {
        assert_eq!(
            endpoint_fixture("/meetings/:meetingId"),
            Err(Skipped::Unreplaceable("meetings/:meetingId".to_string()))
        );
    }

    #[test]
    fn ignored_paths_are_skipped() {
        assert!(matches!(
            endpoint_fixture("/boxes/list"),
            Err(Skipped::Ignored(_))
        ));
        assert!(matches!(
            endpoint_fixture("/_ks_/status"),
            Err(Skipped::Ignored(_))
        ));
    }

    #[test]
    fn generated_document_is_valid() {
        let generated = generate(["/rooms/:room", "/presence", "/boxes", "", "/x/:nope"]);
        assert_eq!(generated.skipped.len(), 2);

        let text = generated.document.to_string();
        let doc = parse_document(&text, "generated").unwrap();
        let fixtures = validate(&doc.fixtures).unwrap();
        let names: Vec<_> = fixtures.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["xdomain", "xrooms", "xmeetings", "rooms-:room", "presence"]
        );
    }
}
