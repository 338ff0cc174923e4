//! Prompt text for every model call the pipeline makes.
//!
//! Each call pairs one of the fixed system instructions below with a prompt
//! built from the chunk or scenes at hand.

use scenecut_core::{Scene, SceneField};
use strum::IntoEnumIterator;

/// System instruction for scene extraction.
pub const EXTRACTION_SYSTEM: &str =
    "You are a literary analyst expert at identifying scene boundaries in fiction.";

/// System instruction for the repair call.
pub const REPAIR_SYSTEM: &str =
    "You are an assistant specialized in correcting malformed JSON so that it matches a fixed schema.";

/// System instruction for the continuation question.
pub const CONTINUATION_SYSTEM: &str =
    "You are a literary expert good at comparing scene descriptions.";

/// System instruction for merge synthesis.
pub const MERGE_SYSTEM: &str =
    "You are an expert literary analyst skilled at synthesizing scene descriptions into JSON.";

fn field_names() -> String {
    SceneField::iter()
        .map(|field| format!("`{}`", field))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Ask for the scenes in `text` as a JSON array.
pub fn extraction_prompt(text: &str) -> String {
    let fields: String = SceneField::iter()
        .map(|field| format!("  * `{}`: (string) {}\n", field, field.guidance()))
        .collect();

    format!(
        "You are an expert literary analyst and visual storyteller. Your task is to divide the \
following narrative text into individual scenes. For each scene, imagine taking a snapshot to be \
used by an image generation service.

For each scene, provide a detailed breakdown of its visual and narrative components with these keys:
{fields}
Format your answer as a JSON array. Each object in the array represents one scene and must contain \
ONLY the fields {names}.

Text to analyze:
{text}

Make sure scenes are complete and not cut off mid-sentence. Look for natural narrative breaks.
Focus on extracting visual and descriptive detail for each field.
Do NOT include the full text of the scene in your answer, only the requested structured data.",
        fields = fields,
        names = field_names(),
        text = text.trim(),
    )
}

/// Ask for a corrected array given the malformed payload and what was wrong with it.
pub fn repair_prompt(original_text: &str, malformed_payload: &str, errors: &str) -> String {
    let fields: String = SceneField::iter()
        .map(|field| format!("- `{}`\n", field))
        .collect();

    format!(
        "A previous attempt to extract scenes from a text produced JSON that failed validation.

Original text that was analyzed:
{original_text}

Malformed JSON received (or the whole reply if no JSON could be isolated):
{malformed_payload}

Validation errors:
{errors}

The correct format MUST be a JSON array of objects. Every object MUST contain EXACTLY these fields, \
each a string:
{fields}
Correct the malformed JSON so that it conforms strictly to this schema.
Return ONLY the corrected JSON array, with no additional text or explanation.
Do not invent information that is not present in the original text or the malformed JSON. Every \
required field must be present; use an empty string when its content cannot be derived.",
        original_text = original_text.trim(),
        malformed_payload = malformed_payload,
        errors = errors,
        fields = fields,
    )
}

fn describe(scene: &Scene) -> String {
    SceneField::iter()
        .map(|field| format!("{}: {}\n", field.label(), scene.field(field)))
        .collect()
}

/// Ask whether `b` continues `a`, expecting a bare yes or no.
pub fn continuation_prompt(a: &Scene, b: &Scene) -> String {
    format!(
        "You are given the descriptions of two scenes: Scene A (end of the previous segment) and \
Scene B (start of the current segment).

Decide whether Scene B is a direct continuation or the second half of Scene A. Consider whether they \
share main characters, setting, ongoing action and narrative focus, suggesting they should be one \
unified scene.

Scene A (end of the previous segment):
{a}
Scene B (start of the current segment):
{b}
Is Scene B a direct continuation or the second half of Scene A, meaning they should ideally be \
merged into a single scene? Answer with a simple 'Yes' or 'No'.",
        a = describe(a),
        b = describe(b),
    )
}

/// Ask for one scene object combining `a` and `b`.
pub fn merge_prompt(a: &Scene, b: &Scene) -> String {
    format!(
        "You are given the descriptions of two parts of what should be a single continuous scene. \
Scene A is the first part and Scene B is the second part.
Synthesize the two parts into one coherent scene description, combining their narrative elements, \
characters, setting, mood and action.

Scene A (first part):
{a}
Scene B (second part):
{b}
Provide the combined scene as a single JSON object with the fields {names}.
Return ONLY the JSON object, with no additional text, explanation or markdown.",
        a = describe(a),
        b = describe(b),
        names = field_names(),
    )
}
