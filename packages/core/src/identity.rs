//! Compliant URI composition and checking.
//!
//! A compliant identity is `namespace / [type path /] display id [/ version]`
//! for a top-level object, and `parent persistent identity / display id
//! [/ version]` for a nested one. The persistent identity is the same URI
//! without the version segment.

use crate::config::Config;
use crate::error::{Result, SbolError};
use crate::types::Uri;
use crate::validation::{is_valid_version, validate_display_id};

/// An identity together with its version-free persistent form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedIdentity {
    pub identity: Uri,
    pub persistent_identity: Uri,
}

/// Compose a URI from its parts.
///
/// With `compliant` set, `id` is a display id and the result is
/// `namespace/type/path/id[/version]`. Without it, `id` is taken to be the
/// caller's full URI and is returned unchanged once it parses.
pub fn compose_uri(
    namespace: &str,
    type_path: &[&str],
    id: &str,
    version: Option<&str>,
    compliant: bool,
) -> Result<Uri> {
    if !compliant {
        return Uri::parse(id);
    }
    Ok(compose(namespace, type_path, id, version)?.identity)
}

fn compose(
    base: &str,
    type_path: &[&str],
    display_id: &str,
    version: Option<&str>,
) -> Result<ComposedIdentity> {
    validate_display_id(display_id)?;
    if let Some(v) = version {
        if !is_valid_version(v) {
            return Err(SbolError::invalid_uri(
                format!("{base}/{display_id}/{v}"),
                format!("version {v:?} is not a valid version string"),
            ));
        }
    }
    let mut persistent = base.trim_end_matches('/').to_owned();
    for segment in type_path {
        persistent.push('/');
        persistent.push_str(segment);
    }
    persistent.push('/');
    persistent.push_str(display_id);
    let persistent_identity = Uri::parse(persistent)?;
    let identity = match version {
        Some(v) => Uri::trusted(format!("{persistent_identity}/{v}")),
        None => persistent_identity.clone(),
    };
    Ok(ComposedIdentity {
        identity,
        persistent_identity,
    })
}

/// Identity of a new top-level object of type `type_name`, or `None` when the
/// configuration cannot resolve one (compliance off, or no namespace set).
pub fn top_level_identity(
    config: &Config,
    type_name: &str,
    display_id: &str,
    version: Option<&str>,
) -> Result<Option<ComposedIdentity>> {
    let Some(namespace) = config.namespace().filter(|_| config.compliant_uris) else {
        return Ok(None);
    };
    let type_path: &[&str] = if config.typed_uris { &[type_name] } else { &[] };
    compose(namespace, type_path, display_id, version).map(Some)
}

/// Identity of a child with `display_id` under a parent whose persistent
/// identity is `parent_persistent`.
pub fn child_identity(
    parent_persistent: &str,
    display_id: &str,
    version: Option<&str>,
) -> Result<ComposedIdentity> {
    compose(parent_persistent, &[], display_id, version)
}

/// Why an object's identity fields do not follow the compliant scheme, if they
/// don't. `parent_persistent` is the owning object's persistent identity for
/// nested objects.
pub fn compliance_issue(
    identity: &str,
    persistent_identity: Option<&str>,
    display_id: Option<&str>,
    version: Option<&str>,
    parent_persistent: Option<&str>,
) -> Option<String> {
    let Some(display_id) = display_id else {
        return Some("missing display id".into());
    };
    if validate_display_id(display_id).is_err() {
        return Some(format!("display id {display_id:?} is invalid"));
    }
    let Some(persistent) = persistent_identity else {
        return Some("missing persistent identity".into());
    };
    if !persistent.ends_with(&format!("/{display_id}")) {
        return Some(format!(
            "persistent identity {persistent} does not end with its display id {display_id}"
        ));
    }
    let expected = match version {
        Some(v) => format!("{persistent}/{v}"),
        None => persistent.to_owned(),
    };
    if identity != expected {
        return Some(format!("identity {identity} should be {expected}"));
    }
    if let Some(parent) = parent_persistent {
        let expected = format!("{}/{display_id}", parent.trim_end_matches('/'));
        if persistent != expected {
            return Some(format!(
                "persistent identity {persistent} should extend its parent's as {expected}"
            ));
        }
    }
    None
}

/// Does this identity follow the compliant scheme?
pub fn is_compliant(
    identity: &str,
    persistent_identity: Option<&str>,
    display_id: Option<&str>,
    version: Option<&str>,
    parent_persistent: Option<&str>,
) -> bool {
    compliance_issue(identity, persistent_identity, display_id, version, parent_persistent)
        .is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_compliant_typed() {
        let uri = compose_uri(
            "http://examples.org",
            &["ModuleDefinition"],
            "foo",
            Some("1"),
            true,
        )
        .unwrap();
        assert_eq!(uri.as_str(), "http://examples.org/ModuleDefinition/foo/1");
    }

    #[test]
    fn compose_strips_trailing_slash_and_skips_missing_version() {
        let uri = compose_uri("http://examples.org/", &[], "foo", None, true).unwrap();
        assert_eq!(uri.as_str(), "http://examples.org/foo");
    }

    #[test]
    fn compose_non_compliant_returns_supplied_uri() {
        let uri = compose_uri("ignored", &["X"], "http://other.org/thing#1", None, false).unwrap();
        assert_eq!(uri.as_str(), "http://other.org/thing#1");
        assert!(compose_uri("", &[], "not a uri", None, false).is_err());
    }

    #[test]
    fn compose_rejects_bad_parts() {
        assert!(matches!(
            compose_uri("http://examples.org", &[], "1foo", None, true),
            Err(SbolError::InvalidDisplayId(_))
        ));
        assert!(matches!(
            compose_uri("http://examples.org", &[], "foo", Some("v1"), true),
            Err(SbolError::InvalidUri { .. })
        ));
        assert!(matches!(
            compose_uri("examples", &[], "foo", None, true),
            Err(SbolError::InvalidUri { .. })
        ));
    }

    #[test]
    fn top_level_follows_config() {
        let config = Config::default();
        let id = top_level_identity(&config, "ModuleDefinition", "foo", Some("1"))
            .unwrap()
            .unwrap();
        assert_eq!(id.identity.as_str(), "http://examples.org/ModuleDefinition/foo/1");
        assert_eq!(
            id.persistent_identity.as_str(),
            "http://examples.org/ModuleDefinition/foo"
        );

        let untyped = config.clone().with_typed_uris(false);
        let id = top_level_identity(&untyped, "ModuleDefinition", "foo", Some("1"))
            .unwrap()
            .unwrap();
        assert_eq!(id.identity.as_str(), "http://examples.org/foo/1");

        let no_ns = config.with_namespace("");
        assert!(top_level_identity(&no_ns, "ModuleDefinition", "foo", None)
            .unwrap()
            .is_none());
    }

    #[test]
    fn child_extends_parent_persistent_identity() {
        let id = child_identity("http://examples.org/ModuleDefinition/foo", "bar", Some("1")).unwrap();
        assert_eq!(id.identity.as_str(), "http://examples.org/ModuleDefinition/foo/bar/1");
    }

    #[test]
    fn compliance() {
        let parent = "http://examples.org/ModuleDefinition/foo";
        assert!(is_compliant(
            "http://examples.org/ModuleDefinition/foo/bar/1",
            Some("http://examples.org/ModuleDefinition/foo/bar"),
            Some("bar"),
            Some("1"),
            Some(parent),
        ));
        assert!(!is_compliant(
            "http://examples.org/ModuleDefinition/foo/bar/2",
            Some("http://examples.org/ModuleDefinition/foo/bar"),
            Some("bar"),
            Some("1"),
            Some(parent),
        ));
        assert!(compliance_issue("http://x.org/a", None, Some("a"), None, None).is_some());
        assert!(compliance_issue("http://x.org/a", Some("http://x.org/a"), None, None, None).is_some());
    }
}
