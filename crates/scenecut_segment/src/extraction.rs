//! Tolerant parsing of scene JSON from model replies.
//!
//! Models often wrap JSON in prose or markdown fences. The payload is taken
//! from the first opening bracket to the last closing one, then validated
//! against the five-field scene shape.

use scenecut_core::Scene;
use scenecut_error::SegmentErrorKind;
use serde_json::Value;

/// The span from the first `[` to the last `]`, or the whole reply.
///
/// # Examples
///
/// ```
/// use scenecut_segment::extract_json_array;
///
/// let reply = "Here are the scenes:\n```json\n[{\"a\": 1}]\n```";
/// assert_eq!(extract_json_array(reply), "[{\"a\": 1}]");
/// assert_eq!(extract_json_array("no json"), "no json");
/// ```
pub fn extract_json_array(reply: &str) -> &str {
    delimited(reply, '[', ']')
}

/// The span from the first `{` to the last `}`, or the whole reply.
pub fn extract_json_object(reply: &str) -> &str {
    delimited(reply, '{', '}')
}

fn delimited(reply: &str, open: char, close: char) -> &str {
    match (reply.find(open), reply.rfind(close)) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => reply.trim(),
    }
}

/// At most `max_chars` characters of `text`, marked when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Parse a payload as an ordered list of scenes.
///
/// # Errors
///
/// [`SegmentErrorKind::Structural`] when the payload is not JSON or not an
/// array; [`SegmentErrorKind::Schema`] listing every element that is not a
/// valid scene.
///
/// # Examples
///
/// ```
/// use scenecut_error::SegmentErrorKind;
/// use scenecut_segment::parse_scenes;
///
/// let ok = parse_scenes(r#"[{"narrative_elements":"","characters":"Ada","setting":"","mood":"","current_action":""}]"#, 100);
/// assert_eq!(ok.unwrap()[0].characters(), "Ada");
///
/// let err = parse_scenes(r#"{"scenes": []}"#, 100).unwrap_err();
/// assert!(matches!(err, SegmentErrorKind::Structural { .. }));
/// ```
pub fn parse_scenes(payload: &str, preview_chars: usize) -> Result<Vec<Scene>, SegmentErrorKind> {
    let value: Value = serde_json::from_str(payload).map_err(|e| SegmentErrorKind::Structural {
        message: format!("invalid JSON: {}", e),
        payload_preview: preview(payload, preview_chars),
    })?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(SegmentErrorKind::Structural {
                message: format!("expected a JSON array, found {}", kind_name(&other)),
                payload_preview: preview(payload, preview_chars),
            });
        }
    };

    let mut scenes = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        match scene_from_value(item) {
            Ok(scene) => scenes.push(scene),
            Err(e) => errors.push(format!("scene {}: {}", index, e)),
        }
    }

    if errors.is_empty() {
        Ok(scenes)
    } else {
        Err(SegmentErrorKind::Schema {
            errors,
            payload_preview: preview(payload, preview_chars),
        })
    }
}

/// Parse a payload as exactly one scene object.
///
/// # Errors
///
/// [`SegmentErrorKind::Structural`] when the payload is not JSON;
/// [`SegmentErrorKind::Schema`] when it is not a valid scene object.
pub fn parse_scene(payload: &str, preview_chars: usize) -> Result<Scene, SegmentErrorKind> {
    let value: Value = serde_json::from_str(payload).map_err(|e| SegmentErrorKind::Structural {
        message: format!("invalid JSON: {}", e),
        payload_preview: preview(payload, preview_chars),
    })?;

    scene_from_value(value).map_err(|e| SegmentErrorKind::Schema {
        errors: vec![e],
        payload_preview: preview(payload, preview_chars),
    })
}

fn scene_from_value(value: Value) -> Result<Scene, String> {
    if !value.is_object() {
        return Err(format!("expected an object, found {}", kind_name(&value)));
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{"narrative_elements":"lantern","characters":"Mara","setting":"gallery","mood":"tense","current_action":"waiting"}"#;

    #[test]
    fn array_span_ignores_surrounding_prose() {
        let reply = format!("Sure! [{}] Hope that helps [sic].", SCENE);
        assert_eq!(
            extract_json_array(&reply),
            format!("[{}] Hope that helps [sic]", SCENE)
        );
    }

    #[test]
    fn reversed_brackets_fall_back_to_whole_reply() {
        assert_eq!(extract_json_array(" ] oops [ "), "] oops [");
    }

    #[test]
    fn object_span() {
        let reply = format!("```json\n{}\n```", SCENE);
        assert_eq!(extract_json_object(&reply), SCENE);
    }

    #[test]
    fn preview_is_char_safe() {
        assert_eq!(preview("héllo", 2), "hé...");
        assert_eq!(preview("hi", 5), "hi");
        assert_eq!(preview("", 0), "");
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_scenes("[]", 10).unwrap().is_empty());
    }

    #[test]
    fn schema_errors_are_listed_per_element() {
        let payload = format!(
            r#"[{}, 7, {{"narrative_elements":"","characters":"","setting":"","mood":""}}]"#,
            SCENE
        );
        match parse_scenes(&payload, 20).unwrap_err() {
            SegmentErrorKind::Schema {
                errors,
                payload_preview,
            } => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].starts_with("scene 1: expected an object"));
                assert!(errors[1].starts_with("scene 2:"));
                assert!(errors[1].contains("current_action"));
                assert!(payload_preview.ends_with("..."));
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn invalid_json_is_structural() {
        let err = parse_scenes("[{", 10).unwrap_err();
        assert!(err.is_repairable());
        assert!(matches!(err, SegmentErrorKind::Structural { .. }));
    }

    #[test]
    fn only_malformed_replies_are_repairable() {
        let schema = parse_scenes("[1]", 10).unwrap_err();
        assert!(schema.is_repairable());
        assert!(!SegmentErrorKind::InvalidInput("zero target".into()).is_repairable());
        assert!(!SegmentErrorKind::MergeSynthesis("bad".into()).is_repairable());
    }

    #[test]
    fn single_scene_rejects_arrays_and_extra_fields() {
        assert!(parse_scene(SCENE, 10).is_ok());
        assert!(matches!(
            parse_scene(&format!("[{}]", SCENE), 10),
            Err(SegmentErrorKind::Schema { .. })
        ));
        let extra = SCENE.replace("}", r#","tone":"grim"}"#);
        assert!(parse_scene(&extra, 10).is_err());
    }
}
