//! Caller-selected output shapes for list operations.
//!
//! Every list operation yields exactly one of: hydrated entities (default),
//! raw dictionaries, or a tabular frame. The two selection flags are
//! normalized into [`ListingFormat`] up front, so requesting both is a
//! configuration error raised before any network I/O.

use serde_json::Value;

use mstr_core::error::{MstrError, MstrResult};

use crate::frame::Frame;

/// Which output shape a list operation should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingFormat {
    /// Hydrated domain entities.
    #[default]
    Entities,
    /// Raw dictionaries as returned by the server.
    Dictionaries,
    /// Tabular frame projection.
    Frame,
}

impl ListingFormat {
    /// Normalize the two selection flags into a format.
    ///
    /// Exactly one mode is active per call; both flags set is a
    /// configuration error.
    pub fn from_flags(to_dictionary: bool, to_dataframe: bool) -> MstrResult<Self> {
        match (to_dictionary, to_dataframe) {
            (true, true) => Err(MstrError::Config(
                "select either to_dictionary or to_dataframe, but not both".into(),
            )),
            (true, false) => Ok(ListingFormat::Dictionaries),
            (false, true) => Ok(ListingFormat::Frame),
            (false, false) => Ok(ListingFormat::Entities),
        }
    }
}

/// The result of a list operation in the caller-selected shape.
#[derive(Debug, Clone)]
pub enum Listing<T> {
    /// Hydrated domain entities.
    Entities(Vec<T>),
    /// Raw dictionaries.
    Dictionaries(Vec<Value>),
    /// Tabular frame.
    Frame(Frame),
}

impl<T> Listing<T> {
    /// Project raw objects into the requested shape.
    pub fn from_raw(
        raw: Vec<Value>,
        format: ListingFormat,
        hydrate: impl Fn(Value) -> MstrResult<T>,
    ) -> MstrResult<Self> {
        match format {
            ListingFormat::Dictionaries => Ok(Listing::Dictionaries(raw)),
            ListingFormat::Frame => Ok(Listing::Frame(Frame::from_records(&raw))),
            ListingFormat::Entities => raw
                .into_iter()
                .map(hydrate)
                .collect::<MstrResult<Vec<_>>>()
                .map(Listing::Entities),
        }
    }

    /// Number of objects in the listing.
    pub fn len(&self) -> usize {
        match self {
            Listing::Entities(items) => items.len(),
            Listing::Dictionaries(items) => items.len(),
            Listing::Frame(frame) => frame.shape().0,
        }
    }

    /// Whether the listing holds no objects.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The entity list, if that shape was requested.
    pub fn into_entities(self) -> Option<Vec<T>> {
        match self {
            Listing::Entities(items) => Some(items),
            _ => None,
        }
    }

    /// The dictionary list, if that shape was requested.
    pub fn into_dictionaries(self) -> Option<Vec<Value>> {
        match self {
            Listing::Dictionaries(items) => Some(items),
            _ => None,
        }
    }

    /// The frame, if that shape was requested.
    pub fn into_frame(self) -> Option<Frame> {
        match self {
            Listing::Frame(frame) => Some(frame),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_both_flags_rejected() {
        let err = ListingFormat::from_flags(true, true).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("to_dictionary"));
    }

    #[test]
    fn test_flag_normalization() {
        assert_eq!(
            ListingFormat::from_flags(false, false).unwrap(),
            ListingFormat::Entities
        );
        assert_eq!(
            ListingFormat::from_flags(true, false).unwrap(),
            ListingFormat::Dictionaries
        );
        assert_eq!(
            ListingFormat::from_flags(false, true).unwrap(),
            ListingFormat::Frame
        );
    }

    #[test]
    fn test_from_raw_shapes() {
        let raw = vec![json!({"id": "a"}), json!({"id": "b"})];

        let dicts: Listing<Value> =
            Listing::from_raw(raw.clone(), ListingFormat::Dictionaries, Ok).unwrap();
        assert_eq!(dicts.len(), 2);
        assert!(dicts.clone().into_dictionaries().is_some());
        assert!(dicts.into_entities().is_none());

        let frame: Listing<Value> =
            Listing::from_raw(raw.clone(), ListingFormat::Frame, Ok).unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.into_frame().unwrap().columns(), ["id"]);
    }

    #[test]
    fn test_from_raw_hydration_failure_propagates() {
        let raw = vec![json!({"id": "a"})];
        let result: MstrResult<Listing<Value>> =
            Listing::from_raw(raw, ListingFormat::Entities, |_| {
                Err(MstrError::Serialization("bad object".into()))
            });
        assert!(result.is_err());
    }
}
