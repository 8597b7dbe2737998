use std::convert::Infallible;
use std::fmt::{self, Display};
use std::str::FromStr;

use indexmap::IndexMap;
use indexmap::map::Iter;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Reserved GFF3 tags, written first and in this order when a map is encoded.
pub const RESERVED_ATTRIBUTES: [&str; 9] = [
    "ID",
    "Name",
    "Parent",
    "Target",
    "Gap",
    "Derives_from",
    "Note",
    "Dbxref",
    "Ontology_term",
];

/// Characters that would otherwise break the `key=value;key=value` grammar.
/// Commas are left alone since they separate multiple values of one tag.
const ATTRIBUTE_VALUE: &AsciiSet = &CONTROLS.add(b'%').add(b';').add(b'=').add(b'&');

///
/// Ordered mapping of attribute tags to their (unescaped) values.
///
/// Keys are unique; inserting an existing key replaces the value but keeps the
/// position of the first insert.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: IndexMap<String, String>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Decode an attribute column such as `ID=gene1;Name=abc%3B1`.
    ///
    /// A piece without `=` is kept as a flag whose value is its own text. An
    /// empty column or a lone `.` yields an empty map. Values that do not
    /// percent-decode to valid UTF-8 are kept exactly as written.
    ///
    pub fn decode(s: &str) -> Self {
        let mut map = AttributeMap::new();
        let s = s.trim();
        if s.is_empty() || s == "." {
            return map;
        }

        for piece in s.split(';') {
            if piece.trim().is_empty() {
                continue;
            }
            match piece.split_once('=') {
                Some((key, value)) => {
                    let key = key.trim();
                    if key.is_empty() {
                        continue;
                    }
                    map.insert(key, unescape(value));
                }
                None => {
                    let flag = piece.trim();
                    map.insert(flag, flag);
                }
            }
        }

        map
    }

    ///
    /// Encode the map back into attribute-column text.
    ///
    /// Reserved tags come first in [`RESERVED_ATTRIBUTES`] order, followed by
    /// every other tag in insertion order. Values are percent-escaped.
    ///
    pub fn encode(&self) -> String {
        let reserved = RESERVED_ATTRIBUTES
            .iter()
            .filter_map(|key| self.entries.get_key_value(*key));
        let others = self
            .entries
            .iter()
            .filter(|(key, _)| !RESERVED_ATTRIBUTES.contains(&key.as_str()));

        reserved
            .chain(others)
            .map(|(key, value)| format!("{}={}", key, escape(value)))
            .collect::<Vec<_>>()
            .join(";")
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    ///
    /// Get the comma-separated values of a multi-valued tag (e.g. `Parent=a,b`).
    ///
    pub fn get_values(&self, key: &str) -> Vec<&str> {
        match self.get(key) {
            Some(value) => value
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_, String, String> {
        self.entries.iter()
    }
}

fn unescape(value: &str) -> String {
    match percent_decode_str(value).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.to_string(),
    }
}

fn escape(value: &str) -> String {
    utf8_percent_encode(value, ATTRIBUTE_VALUE).to_string()
}

impl FromStr for AttributeMap {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AttributeMap::decode(s))
    }
}

impl Display for AttributeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.encode())
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = AttributeMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("   ")]
    fn test_decode_empty_column(#[case] column: &str) {
        assert!(AttributeMap::decode(column).is_empty());
    }

    #[rstest]
    fn test_decode_keeps_file_order() {
        let map = AttributeMap::decode("ID=YAL069W;Name=YAL069W;dbxref=NCBI:NC_001133");
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["ID", "Name", "dbxref"]);
        assert_eq!(map.get("dbxref"), Some("NCBI:NC_001133"));
    }

    #[rstest]
    fn test_decode_splits_on_first_equals() {
        let map = AttributeMap::decode("Note=a=b");
        assert_eq!(map.get("Note"), Some("a=b"));
    }

    #[rstest]
    fn test_decode_flag_piece_maps_to_itself() {
        let map = AttributeMap::decode("ID=x;circular");
        assert_eq!(map.get("circular"), Some("circular"));
        assert_eq!(map.len(), 2);
    }

    #[rstest]
    fn test_decode_trailing_semicolon() {
        let map = AttributeMap::decode("ID=YAL069W;Name=YAL069W;");
        assert_eq!(map.len(), 2);
    }

    #[rstest]
    fn test_decode_unescapes_values() {
        let map = AttributeMap::decode("Note=one%3Btwo%2C%20three;Target=EST%2023 1 21");
        assert_eq!(map.get("Note"), Some("one;two, three"));
        assert_eq!(map.get("Target"), Some("EST 23 1 21"));
    }

    #[rstest]
    fn test_decode_keeps_value_when_unescape_fails() {
        let map = AttributeMap::decode("Note=bad%FFbyte");
        assert_eq!(map.get("Note"), Some("bad%FFbyte"));
    }

    #[rstest]
    fn test_duplicate_key_last_wins() {
        let map = AttributeMap::decode("Name=a;Name=b");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("Name"), Some("b"));
    }

    #[rstest]
    fn test_get_values_splits_commas() {
        let map = AttributeMap::decode("Parent=AF2312,AB2812,abc-3");
        assert_eq!(map.get_values("Parent"), vec!["AF2312", "AB2812", "abc-3"]);
        assert!(map.get_values("ID").is_empty());
    }

    #[rstest]
    fn test_encode_reserved_first() {
        let map = AttributeMap::decode("color=red;Parent=g1;Name=n1;ID=t1");
        assert_eq!(map.encode(), "ID=t1;Name=n1;Parent=g1;color=red");
    }

    #[rstest]
    fn test_encode_escapes_grammar_characters() {
        let mut map = AttributeMap::new();
        map.insert("Note", "a;b=c&d 100%");
        assert_eq!(map.encode(), "Note=a%3Bb%3Dc%26d 100%25");
    }

    #[rstest]
    #[case("ID=gene1;Name=abc;Note=x%3By")]
    #[case("Parent=a,b;Dbxref=GO:0001;custom=%41%42")]
    #[case("circular;ID=c1;Note=50%")]
    #[case("Note=bad%FFbyte;Alias=z")]
    fn test_decode_encode_decode_is_stable(#[case] column: &str) {
        let first = AttributeMap::decode(column);
        let second = AttributeMap::decode(&first.encode());
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_display_empty_map_is_dot() {
        assert_eq!(AttributeMap::new().to_string(), ".");
    }
}
