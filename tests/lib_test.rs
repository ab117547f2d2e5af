//! Library integration tests.

use std::path::Path;

use hoist::cache::{ArtifactIdentity, CacheLocator};
use hoist::config::{ArtifactSettings, IniConfig};
use hoist::runtime::{decide, Runtime, RuntimeDecision, RuntimeDescriptor, RuntimePolicy};
use hoist::HoistError;

#[test]
fn error_types_are_public() {
    let err = HoistError::MissingConfigKey {
        key: "artifact_version".into(),
        file: "hoist.ini".into(),
    };
    assert!(err.to_string().contains("artifact_version"));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn checksum_mismatch_has_its_own_exit_code() {
    let err = HoistError::ChecksumMismatch {
        filename: "a".into(),
        expected: "00".into(),
        actual: "11".into(),
    };
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> hoist::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn config_to_cache_path() {
    let config = IniConfig::parse(
        Path::new("hoist.ini"),
        "[DEFAULT]\n\
         host = http://example\n\
         artifact_version = 2.0.1\n\
         artifact_base_url = %(host)s/releases/\n\
         artifact_name = tool\n",
    )
    .unwrap();
    let settings = ArtifactSettings::from_config(&config).unwrap();
    let identity = ArtifactIdentity::from_pattern(
        &settings.filename_pattern,
        &settings.version,
        RuntimeDescriptor::new(3, 9),
    )
    .unwrap();

    assert_eq!(identity.as_str(), "tool-2.0.1-py39");
    assert_eq!(
        settings.artifact_url(identity.as_str()),
        "http://example/releases/2.0.1/tool-2.0.1-py39"
    );
    assert_eq!(
        CacheLocator::new("/home/u/.hoist").locate(&settings.name, &identity),
        Path::new("/home/u/.hoist/bin/tool/tool-2.0.1-py39")
    );
}

#[test]
fn runtime_decision_is_public() {
    let active = Runtime {
        path: "/usr/bin/python3".into(),
        descriptor: RuntimeDescriptor::new(3, 8),
    };
    let decision = decide(&RuntimePolicy::default(), &active, None, false, |_| None).unwrap();
    assert_eq!(decision, RuntimeDecision::Continue(active));
}
