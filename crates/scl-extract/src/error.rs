// crates/scl-extract/src/error.rs

use alloc::fmt;
use alloc::string::String;
use core::str::Utf8Error;
use quick_xml::escape::EscapeError;
use quick_xml::events::attributes::AttrError;
use quick_xml::Error as XmlError;

/// Errors that can occur while parsing, extracting or serialising SCL.
#[derive(Debug)]
pub enum SclError {
    /// An error from the underlying `quick-xml` reader.
    XmlParsing(XmlError),

    /// An attribute list could not be parsed (malformed or duplicated
    /// attribute).
    InvalidAttribute(AttrError),

    /// An entity reference could not be resolved.
    Escape(EscapeError),

    /// Markup or character data was not valid UTF-8.
    Utf8(Utf8Error),

    /// An error occurred during string formatting (e.g., in the writer).
    FmtError(fmt::Error),

    /// The input is not a single well-formed document.
    IllFormed(&'static str),

    /// No `<IED>` with the requested `name` attribute exists.
    IedNotFound(String),
}

impl From<XmlError> for SclError {
    fn from(e: XmlError) -> Self {
        SclError::XmlParsing(e)
    }
}

impl From<AttrError> for SclError {
    fn from(e: AttrError) -> Self {
        SclError::InvalidAttribute(e)
    }
}

impl From<EscapeError> for SclError {
    fn from(e: EscapeError) -> Self {
        SclError::Escape(e)
    }
}

impl From<Utf8Error> for SclError {
    fn from(e: Utf8Error) -> Self {
        SclError::Utf8(e)
    }
}

impl From<fmt::Error> for SclError {
    fn from(e: fmt::Error) -> Self {
        SclError::FmtError(e)
    }
}

impl fmt::Display for SclError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SclError::XmlParsing(e) => write!(f, "XML parsing error: {}", e),
            SclError::InvalidAttribute(e) => write!(f, "Attribute parsing error: {}", e),
            SclError::Escape(e) => write!(f, "Entity escape error: {}", e),
            SclError::Utf8(e) => write!(f, "UTF-8 decoding error: {}", e),
            SclError::FmtError(e) => write!(f, "Formatting error: {}", e),
            SclError::IllFormed(msg) => write!(f, "Ill-formed document: {}", msg),
            SclError::IedNotFound(name) => {
                write!(f, "No IED named \"{}\" in the document", name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SclError;
    use alloc::string::ToString;
    use quick_xml::events::Event;
    use quick_xml::Reader;

    /// Drives the reader over broken markup until it reports an error.
    fn dummy_xml_error() -> quick_xml::Error {
        let mut reader = Reader::from_str("<unclosed");
        loop {
            match reader.read_event() {
                Err(e) => return e,
                Ok(Event::Eof) => panic!("expected a syntax error"),
                Ok(_) => {}
            }
        }
    }

    #[test]
    fn test_from_xml_error() {
        let scl_err: SclError = dummy_xml_error().into();
        assert!(matches!(scl_err, SclError::XmlParsing(_)));
    }

    #[test]
    fn test_from_attr_error() {
        // Attribute lists are parsed lazily, so the duplicate only shows up
        // when the attribute iterator runs.
        let mut reader = Reader::from_str(r#"<a b="1" b="2"/>"#);
        let attr_err = match reader.read_event().unwrap() {
            Event::Empty(e) => e
                .attributes()
                .find_map(|attribute| attribute.err())
                .expect("duplicate attribute should be rejected"),
            other => panic!("unexpected event: {:?}", other),
        };
        let scl_err: SclError = attr_err.into();
        assert!(matches!(scl_err, SclError::InvalidAttribute(_)));
    }

    #[test]
    fn test_from_escape_error() {
        let escape_err = quick_xml::escape::unescape("&nosuchentity;").unwrap_err();
        let scl_err: SclError = escape_err.into();
        assert!(matches!(scl_err, SclError::Escape(_)));
    }

    #[test]
    fn test_from_utf8_error() {
        let utf8_err = core::str::from_utf8(&[0xFF]).unwrap_err();
        let scl_err: SclError = utf8_err.into();
        assert!(matches!(scl_err, SclError::Utf8(_)));
    }

    #[test]
    fn test_from_fmt_error() {
        let scl_err: SclError = core::fmt::Error.into();
        assert!(matches!(scl_err, SclError::FmtError(_)));
    }

    #[test]
    fn test_display_of_hand_rolled_variants() {
        let err = SclError::IllFormed("more than one root element");
        assert_eq!(
            err.to_string(),
            "Ill-formed document: more than one root element"
        );

        let err = SclError::IedNotFound("Relay1".to_string());
        assert_eq!(err.to_string(), "No IED named \"Relay1\" in the document");
    }
}
