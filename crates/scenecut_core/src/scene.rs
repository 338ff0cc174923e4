//! The scene record and its field vocabulary.

use serde::{Deserialize, Serialize};

/// One narrative moment described by five free-text fields.
///
/// Deserialization rejects missing and unknown fields, so a `Scene` that
/// exists has passed validation. Fields are private; a scene is replaced
/// wholesale rather than edited.
///
/// # Examples
///
/// ```
/// use scenecut_core::Scene;
///
/// let scene: Scene = serde_json::from_str(r#"{
///     "narrative_elements": "a brass key",
///     "characters": "Elena, flour on her hands",
///     "setting": "bakery before dawn",
///     "mood": "quiet",
///     "current_action": "kneading dough"
/// }"#).unwrap();
/// assert_eq!(scene.mood(), "quiet");
///
/// let missing = serde_json::from_str::<Scene>(r#"{"mood": "quiet"}"#);
/// assert!(missing.is_err());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_new::new,
)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    /// Notable objects or symbols present
    #[new(into)]
    narrative_elements: String,
    /// Who is present, with descriptive detail
    #[new(into)]
    characters: String,
    /// Place, time, atmosphere and environment
    #[new(into)]
    setting: String,
    /// Emotional tone
    #[new(into)]
    mood: String,
    /// Primary event or action unfolding
    #[new(into)]
    current_action: String,
}

impl Scene {
    /// Value of the given field.
    pub fn field(&self, field: SceneField) -> &str {
        match field {
            SceneField::NarrativeElements => &self.narrative_elements,
            SceneField::Characters => &self.characters,
            SceneField::Setting => &self.setting,
            SceneField::Mood => &self.mood,
            SceneField::CurrentAction => &self.current_action,
        }
    }
}

/// The five scene fields, in wire order.
///
/// `Display` yields the JSON key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum SceneField {
    /// `narrative_elements`
    NarrativeElements,
    /// `characters`
    Characters,
    /// `setting`
    Setting,
    /// `mood`
    Mood,
    /// `current_action`
    CurrentAction,
}

impl SceneField {
    /// What the model should put in this field.
    pub fn guidance(&self) -> &'static str {
        match self {
            SceneField::NarrativeElements => {
                "Key narrative elements present (significant objects, symbols)."
            }
            SceneField::Characters => {
                "Characters involved, with their appearance, expressions and any interactions described."
            }
            SceneField::Setting => {
                "The setting and environment (place, time of day, weather, specific details of the surroundings)."
            }
            SceneField::Mood => {
                "The overall mood of the scene (tense, mysterious, calm, joyful). If not explicit, infer it or write 'N/A'."
            }
            SceneField::CurrentAction => {
                "The main action, event or character poses unfolding in the scene."
            }
        }
    }

    /// Human label used when a scene is rendered into a prompt.
    pub fn label(&self) -> &'static str {
        match self {
            SceneField::NarrativeElements => "Narrative elements",
            SceneField::Characters => "Characters",
            SceneField::Setting => "Setting",
            SceneField::Mood => "Mood",
            SceneField::CurrentAction => "Current action",
        }
    }
}
