//! Human readable rendering of API objects

use serde::Serialize;
use std::fmt::Debug;

/// Render `value` as JSON indented with four spaces.
///
/// If serialization fails the debug representation is returned instead, so
/// callers always get something printable.
pub fn pretty_string<T: Serialize + Debug>(value: &T) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);

    match value.serialize(&mut ser) {
        // serde_json only emits valid UTF-8
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(e) => {
            crate::log_warn!("Unable to marshal, Error: {}", e);
            format!("{:#?}", value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::{Error, Serializer};
    use std::collections::BTreeMap;

    #[derive(Debug)]
    struct Unserializable {
        name: &'static str,
    }

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom(format!("refusing to serialize {}", self.name)))
        }
    }

    #[test]
    fn test_pretty_uses_four_space_indent() {
        let mut map = BTreeMap::new();
        map.insert("app", "demo");
        let out = pretty_string(&map);
        assert_eq!(out, "{\n    \"app\": \"demo\"\n}");
    }

    #[test]
    fn test_pretty_falls_back_to_debug() {
        let out = pretty_string(&Unserializable { name: "my-test-pod" });
        assert!(!out.is_empty());
        assert!(out.contains("Unserializable"));
        assert!(out.contains("my-test-pod"));
    }
}
