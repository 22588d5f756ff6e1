//! Parser for word lists returned by the vision model.
//!
//! # Format
//! ```text
//! Sure, here are the words:
//! {
//!   "languages": { "a": "nl", "b": "de" },
//!   "items": [
//!     { "a": "hond", "b": ["Hund"] },
//!     { "a": "lopen", "b": ["laufen", "gehen"] }
//!   ]
//! }
//! ```
//! Models tend to wrap the object in prose or code fences, so everything
//! before the first `{` and after the last `}` is ignored.

use crate::error::ParseError;
use crate::types::WordList;

/// Parse model output into a validated word list.
pub fn parse_extraction(text: &str) -> Result<WordList, ParseError> {
    let json = json_object_slice(text).ok_or(ParseError::NoJsonObject)?;
    let list: WordList = serde_json::from_str(json)?;
    Ok(list.validate()?)
}

fn json_object_slice(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::WordPair;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_plain_json() {
        let input = r#"{"languages":{"a":"nl","b":"de"},"items":[{"a":"hond","b":["Hund"]}]}"#;
        let list = parse_extraction(input).unwrap();
        assert_eq!(list.languages.a, "nl");
        assert_eq!(list.languages.b, "de");
        assert_eq!(list.items, vec![WordPair::new("hond", ["Hund"])]);
    }

    #[test]
    fn parse_json_wrapped_in_prose() {
        let input = "Here you go:\n```json\n{\"languages\":{\"a\":\"nl\",\"b\":\"en\"},\"items\":[{\"a\":\"lopen\",\"b\":[\"walk\",\"run\"]}]}\n```\nGood luck!";
        let list = parse_extraction(input).unwrap();
        assert_eq!(list.items[0].b, vec!["walk", "run"]);
    }

    #[test]
    fn parse_keeps_item_order() {
        let input = r#"{"languages":{"a":"nl","b":"fr"},"items":[
            {"a":"een","b":["un"]},
            {"a":"twee","b":["deux"]},
            {"a":"drie","b":["trois"]}
        ]}"#;
        let list = parse_extraction(input).unwrap();
        let terms: Vec<&str> = list.items.iter().map(|i| i.a.as_str()).collect();
        assert_eq!(terms, vec!["een", "twee", "drie"]);
    }

    #[test]
    fn parse_empty_item_list() {
        let input = r#"{"languages":{"a":"nl","b":"de"},"items":[]}"#;
        let list = parse_extraction(input).unwrap();
        assert!(list.items.is_empty());
    }

    #[test]
    fn reject_text_without_object() {
        let result = parse_extraction("I cannot read this photo.");
        assert!(matches!(result, Err(ParseError::NoJsonObject)));
    }

    #[test]
    fn reject_reversed_braces() {
        let result = parse_extraction("} nothing {");
        assert!(matches!(result, Err(ParseError::NoJsonObject)));
    }

    #[test]
    fn reject_malformed_json() {
        let result = parse_extraction(r#"{"languages": {"a": "nl"}"#);
        assert!(matches!(result, Err(ParseError::InvalidJson(_))));

        let result = parse_extraction(r#"{"languages": "nl", "items": []}"#);
        assert!(matches!(result, Err(ParseError::InvalidJson(_))));
    }

    #[test]
    fn reject_item_without_translations() {
        let input = r#"{"languages":{"a":"nl","b":"de"},"items":[{"a":"hond","b":[]}]}"#;
        let result = parse_extraction(input);
        assert!(matches!(
            result,
            Err(ParseError::Invalid(ValidationError::EmptyTranslations { index: 0 }))
        ));
    }

    #[test]
    fn reject_missing_language() {
        let input = r#"{"languages":{"a":"","b":"de"},"items":[]}"#;
        let result = parse_extraction(input);
        assert!(matches!(
            result,
            Err(ParseError::Invalid(ValidationError::MissingLanguage { side: "a" }))
        ));
    }
}
