//! Header lookup for webhook requests.
//!
//! HTTP layers hand headers over in many shapes. [`SignatureHeaders`] is the
//! one lookup the verifier needs, implemented for the common ones. Names are
//! matched exactly (case-sensitive).

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::{Map, Value};

use crate::SIGNATURE_HEADER;

/// A header map the verifier can read the signature from.
pub trait SignatureHeaders {
    /// Returns the value of `name`, or `None` if it is absent or null.
    fn header(&self, name: &str) -> Option<&str>;

    /// Returns the `X-Hmac-Signature` value.
    fn signature(&self) -> Option<&str> {
        self.header(SIGNATURE_HEADER)
    }
}

impl<S: BuildHasher> SignatureHeaders for HashMap<String, String, S> {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<S: BuildHasher> SignatureHeaders for HashMap<String, Option<String>, S> {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Option::as_deref)
    }
}

impl<S: BuildHasher> SignatureHeaders for HashMap<&str, &str, S> {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).copied()
    }
}

impl SignatureHeaders for BTreeMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl SignatureHeaders for Map<String, Value> {
    fn header(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Value::Null => None,
            Value::String(value) => Some(value),
            // Present but not text: can never equal a digest
            _ => Some(""),
        }
    }
}

impl<K: AsRef<str>, V: AsRef<str>> SignatureHeaders for [(K, V)] {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| AsRef::<str>::as_ref(key) == name)
            .map(|(_, value)| AsRef::<str>::as_ref(value))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> SignatureHeaders for Vec<(K, V)> {
    fn header(&self, name: &str) -> Option<&str> {
        self.as_slice().header(name)
    }
}

impl<T: SignatureHeaders + ?Sized> SignatureHeaders for &T {
    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hash_map() {
        let mut headers = HashMap::new();
        headers.insert("X-Hmac-Signature".to_string(), "sig".to_string());

        assert_eq!(headers.signature(), Some("sig"));
    }

    #[test]
    fn test_name_is_case_sensitive() {
        let mut headers = HashMap::new();
        headers.insert("x-hmac-signature".to_string(), "sig".to_string());

        assert_eq!(headers.signature(), None);
    }

    #[test]
    fn test_null_value_is_absent() {
        let mut headers: HashMap<String, Option<String>> = HashMap::new();
        headers.insert("X-Hmac-Signature".to_string(), None);
        assert_eq!(headers.signature(), None);

        let json = json!({"X-Hmac-Signature": null});
        assert_eq!(json.as_object().unwrap().signature(), None);
    }

    #[test]
    fn test_json_map() {
        let json = json!({"Content-Type": "application/json", "X-Hmac-Signature": "sig"});
        assert_eq!(json.as_object().unwrap().signature(), Some("sig"));

        let numeric = json!({"X-Hmac-Signature": 42});
        assert_eq!(numeric.as_object().unwrap().signature(), Some(""));
    }

    #[test]
    fn test_pairs() {
        let headers = [("Host", "example.com"), ("X-Hmac-Signature", "sig")];
        assert_eq!(headers[..].signature(), Some("sig"));

        let owned = vec![("X-Hmac-Signature".to_string(), "other".to_string())];
        assert_eq!(owned.signature(), Some("other"));
    }

    #[test]
    fn test_btree_map() {
        let headers = BTreeMap::from([("X-Hmac-Signature".to_string(), "sig".to_string())]);
        assert_eq!((&headers).signature(), Some("sig"));
    }
}
