//! Query Parameter Encoder
//!
//! Flattens the set fields of a request configuration into a canonical
//! query string.
//!
//! Rules:
//! - only fields holding `Some(..)` are emitted, in declaration order
//! - list values become repeated `key=value` pairs in list order, so an empty
//!   list emits nothing
//! - booleans are `true` / `false`
//! - string maps become `key=name:value` pairs sorted by name
//! - keys and values are percent-encoded
//!
//! The same set of assigned fields always produces byte-identical output.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A value that knows how to expand itself into query pairs.
pub trait QueryValue {
    fn push_pairs(&self, key: &str, pairs: &mut Vec<(String, String)>);
}

impl QueryValue for str {
    fn push_pairs(&self, key: &str, pairs: &mut Vec<(String, String)>) {
        pairs.push((key.to_string(), self.to_string()));
    }
}

impl QueryValue for String {
    fn push_pairs(&self, key: &str, pairs: &mut Vec<(String, String)>) {
        self.as_str().push_pairs(key, pairs);
    }
}

impl QueryValue for bool {
    fn push_pairs(&self, key: &str, pairs: &mut Vec<(String, String)>) {
        let value = if *self { "true" } else { "false" };
        pairs.push((key.to_string(), value.to_string()));
    }
}

macro_rules! display_query_value {
    ($($ty:ty),*) => {
        $(
            impl QueryValue for $ty {
                fn push_pairs(&self, key: &str, pairs: &mut Vec<(String, String)>) {
                    pairs.push((key.to_string(), self.to_string()));
                }
            }
        )*
    };
}

display_query_value!(i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl<T: QueryValue> QueryValue for [T] {
    fn push_pairs(&self, key: &str, pairs: &mut Vec<(String, String)>) {
        for item in self {
            item.push_pairs(key, pairs);
        }
    }
}

impl<T: QueryValue> QueryValue for Vec<T> {
    fn push_pairs(&self, key: &str, pairs: &mut Vec<(String, String)>) {
        self.as_slice().push_pairs(key, pairs);
    }
}

impl QueryValue for BTreeMap<String, String> {
    fn push_pairs(&self, key: &str, pairs: &mut Vec<(String, String)>) {
        for (name, value) in self {
            pairs.push((key.to_string(), format!("{name}:{value}")));
        }
    }
}

impl QueryValue for HashMap<String, String> {
    fn push_pairs(&self, key: &str, pairs: &mut Vec<(String, String)>) {
        let sorted: BTreeMap<String, String> =
            self.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        sorted.push_pairs(key, pairs);
    }
}

/// Ordered list of decoded query pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `key` when it is set; `None` leaves the query untouched.
    pub fn push<V: QueryValue + ?Sized>(&mut self, key: &str, value: Option<&V>) -> &mut Self {
        if let Some(value) = value {
            value.push_pairs(key, &mut self.pairs);
        }
        self
    }

    /// Append a single raw pair.
    pub fn push_pair(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Append per-call addons after the existing pairs.
    pub fn extend_addons(&mut self, addons: &BTreeMap<String, String>) -> &mut Self {
        for (key, value) in addons {
            self.pairs.push((key.clone(), value.clone()));
        }
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// All values recorded under `key`, in order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Percent-encoded `k=v&k=v` form.
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// A request configuration that can be flattened into query pairs.
pub trait QueryParameters {
    fn to_query(&self) -> QueryString;
}

impl QueryParameters for QueryString {
    fn to_query(&self) -> QueryString {
        self.clone()
    }
}

/// Attach `query` to `path`, joining with `&` when the path already has one.
pub fn append_query(path: &str, query: &QueryString) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{}", query.encode())
}

/// Implements [`QueryParameters`] for a struct of `Option` fields, mapping
/// each field to its wire token. Pairs follow the order listed here.
macro_rules! impl_query_parameters {
    ($ty:ty { $($field:ident => $token:literal),* $(,)? }) => {
        impl $crate::query::QueryParameters for $ty {
            fn to_query(&self) -> $crate::query::QueryString {
                let mut query = $crate::query::QueryString::new();
                $( query.push($token, self.$field.as_ref()); )*
                query
            }
        }
    };
}

pub(crate) use impl_query_parameters;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Default)]
    struct Options {
        model: Option<String>,
        punctuate: Option<bool>,
        redact: Option<Vec<String>>,
        utt_split: Option<f64>,
        alternatives: Option<i32>,
        extra: Option<BTreeMap<String, String>>,
    }

    impl_query_parameters!(Options {
        model => "model",
        punctuate => "punctuate",
        redact => "redact",
        utt_split => "utt_split",
        alternatives => "alternatives",
        extra => "extra",
    });

    #[test]
    fn set_fields_only_and_empty_list_is_absent() {
        let options = Options {
            model: Some("nova-2".into()),
            punctuate: Some(true),
            redact: Some(vec![]),
            ..Default::default()
        };
        let encoded = options.to_query().encode();
        assert!(encoded.contains("model=nova-2&punctuate=true"));
        assert!(!encoded.contains("redact"));
        assert_eq!(encoded, "model=nova-2&punctuate=true");
    }

    #[test]
    fn explicit_false_and_zero_are_emitted() {
        let options = Options {
            punctuate: Some(false),
            alternatives: Some(0),
            ..Default::default()
        };
        assert_eq!(options.to_query().encode(), "punctuate=false&alternatives=0");
    }

    #[test]
    fn lists_repeat_in_order() {
        let options = Options {
            redact: Some(vec!["pci".into(), "numbers".into(), "ssn".into()]),
            ..Default::default()
        };
        assert_eq!(
            options.to_query().encode(),
            "redact=pci&redact=numbers&redact=ssn"
        );
    }

    #[test]
    fn values_are_percent_encoded() {
        let options = Options {
            model: Some("a b&c=d/é".into()),
            utt_split: Some(0.8),
            ..Default::default()
        };
        assert_eq!(
            options.to_query().encode(),
            "model=a%20b%26c%3Dd%2F%C3%A9&utt_split=0.8"
        );
    }

    #[test]
    fn extra_map_is_sorted_name_value_pairs() {
        let mut extra = BTreeMap::new();
        extra.insert("zeta".to_string(), "1".to_string());
        extra.insert("alpha".to_string(), "two".to_string());
        let options = Options {
            extra: Some(extra),
            ..Default::default()
        };
        let query = options.to_query();
        assert_eq!(query.get_all("extra"), vec!["alpha:two", "zeta:1"]);
        assert_eq!(query.encode(), "extra=alpha%3Atwo&extra=zeta%3A1");
    }

    #[test]
    fn hash_map_values_encode_in_key_order() {
        let mut extra = HashMap::new();
        extra.insert("b".to_string(), "2".to_string());
        extra.insert("a".to_string(), "1".to_string());
        let mut query = QueryString::new();
        query.push("extra", Some(&extra));
        assert_eq!(query.get_all("extra"), vec!["a:1", "b:2"]);
    }

    #[test]
    fn addons_follow_configuration_pairs() {
        let mut query = Options {
            model: Some("nova-2".into()),
            ..Default::default()
        }
        .to_query();
        let mut addons = BTreeMap::new();
        addons.insert("tier".to_string(), "enhanced".to_string());
        addons.insert("beta".to_string(), "true".to_string());
        query.extend_addons(&addons);
        assert_eq!(query.encode(), "model=nova-2&beta=true&tier=enhanced");
    }

    #[test]
    fn append_query_handles_empty_and_existing_query() {
        let empty = QueryString::new();
        assert_eq!(append_query("/v1/listen", &empty), "/v1/listen");

        let mut query = QueryString::new();
        query.push_pair("model", "nova-2");
        assert_eq!(append_query("/v1/listen", &query), "/v1/listen?model=nova-2");
        assert_eq!(
            append_query("/v1/listen?tag=a", &query),
            "/v1/listen?tag=a&model=nova-2"
        );
    }

    fn arb_options() -> impl Strategy<Value = Options> {
        (
            proptest::option::of("[a-z0-9 &=-]{0,12}"),
            proptest::option::of(any::<bool>()),
            proptest::option::of(proptest::collection::vec("[a-z]{1,6}", 0..4)),
            proptest::option::of(-1000i32..1000),
        )
            .prop_map(|(model, punctuate, redact, alternatives)| Options {
                model,
                punctuate,
                redact,
                alternatives,
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn encoding_is_deterministic(options in arb_options()) {
            let first = options.to_query().encode();
            let second = options.clone().to_query().encode();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn unset_fields_never_appear(options in arb_options()) {
            let query = options.to_query();
            prop_assert_eq!(query.contains_key("model"), options.model.is_some());
            prop_assert_eq!(query.contains_key("punctuate"), options.punctuate.is_some());
            prop_assert_eq!(query.contains_key("alternatives"), options.alternatives.is_some());
            let redact_len = options.redact.as_ref().map(|r| r.len()).unwrap_or(0);
            prop_assert_eq!(query.get_all("redact").len(), redact_len);
            prop_assert!(!query.contains_key("utt_split"));
            prop_assert!(!query.contains_key("extra"));
        }
    }
}
