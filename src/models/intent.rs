use serde::{Deserialize, Serialize};

/// Categorical goal of a user message.
///
/// Categories are evaluated in declaration order by the intent engine;
/// earlier categories shadow later ones on overlapping vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ImageGeneration,
    ImageModification,
    NsfwFilter,
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::ImageGeneration => "image_generation",
            Intent::ImageModification => "image_modification",
            Intent::NsfwFilter => "nsfw_filter",
            Intent::General => "general",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Artistic,
    Realistic,
    Anime,
    Abstract,
    Default,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Artistic => "artistic",
            Style::Realistic => "realistic",
            Style::Anime => "anime",
            Style::Abstract => "abstract",
            Style::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModificationType {
    ColorAdjustment,
    BrightnessAdjustment,
    BackgroundChange,
    GeneralModification,
}

impl ModificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModificationType::ColorAdjustment => "color_adjustment",
            ModificationType::BrightnessAdjustment => "brightness_adjustment",
            ModificationType::BackgroundChange => "background_change",
            ModificationType::GeneralModification => "general_modification",
        }
    }
}

/// Parameters for queuing an image generation workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub prompt: String,
    pub style: Style,
    pub nsfw_filter: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModificationParameters {
    pub modification_type: ModificationType,
    pub prompt: String,
}

/// Intent-dependent parameter set, derived once per message and immutable
/// after extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Parameters {
    Generation(GenerationParameters),
    Modification(ModificationParameters),
    None,
}

impl Parameters {
    pub fn as_generation(&self) -> Option<&GenerationParameters> {
        match self {
            Parameters::Generation(params) => Some(params),
            _ => None,
        }
    }

    pub fn as_modification(&self) -> Option<&ModificationParameters> {
        match self {
            Parameters::Modification(params) => Some(params),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub intent: Intent,
    pub parameters: Parameters,
    pub original_message: String,
    /// Fixed scalar in the current rule-based engine; callers must not read
    /// meaning into its value beyond "a rule decided".
    pub confidence: f32,
}
