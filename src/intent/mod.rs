use crate::models::{
    ClassificationResult, GenerationParameters, Intent, ModificationParameters, ModificationType,
    Parameters, Style,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Category table evaluated in declaration order. Earlier categories shadow
/// later ones on overlapping vocabulary; the first matching pattern decides.
static INTENT_PATTERNS: Lazy<Vec<(Intent, Vec<Regex>)>> = Lazy::new(|| {
    let compile = |patterns: &[&str]| {
        patterns
            .iter()
            .map(|p| Regex::new(p).expect("hard-coded intent pattern"))
            .collect()
    };

    vec![
        (
            Intent::ImageGeneration,
            compile(&[
                r"generate.*image",
                r"create.*picture",
                r"make.*photo",
                r"draw.*",
                r"paint.*",
                r"render.*",
            ]),
        ),
        (
            Intent::ImageModification,
            compile(&[
                r"modify.*image",
                r"change.*picture",
                r"edit.*photo",
                r"adjust.*",
                r"alter.*",
            ]),
        ),
        (
            Intent::NsfwFilter,
            compile(&[
                r"safe.*work",
                r"filter.*nsfw",
                r"censor.*",
                r"family.*friendly",
            ]),
        ),
    ]
});

/// Connector words scanned in order; the prompt is everything after the
/// first one found in the message.
const PROMPT_CONNECTORS: [&str; 4] = ["of", "with", "showing", "featuring"];

/// Keyword lists scanned in order; the first style with any matching keyword
/// wins.
const STYLE_KEYWORDS: [(Style, &[&str]); 4] = [
    (Style::Artistic, &["artistic", "art", "painting"]),
    (Style::Realistic, &["realistic", "photo", "photograph"]),
    (Style::Anime, &["anime", "manga", "cartoon"]),
    (Style::Abstract, &["abstract", "surreal"]),
];

/// Plain keyword heuristic for "keep this safe for work" phrasing. Substring
/// matches, so unrelated uses of e.g. "work" also trip it; low recall is
/// accepted here.
const SAFETY_KEYWORDS: [&str; 5] = ["safe", "work", "family", "clean", "appropriate"];

/// Rule-based intent classification and parameter extraction.
///
/// Pure and synchronous: the same message always produces the same
/// classification, and nothing here touches the network.
#[derive(Debug, Default)]
pub struct IntentEngine;

impl IntentEngine {
    pub fn new() -> Self {
        IntentEngine
    }

    /// Classify a message and derive its intent-dependent parameters.
    pub fn process(&self, message: &str) -> ClassificationResult {
        let lowered = message.to_lowercase();

        let intent = self.classify(&lowered);
        let parameters = self.extract(&lowered, intent);

        ClassificationResult {
            intent,
            parameters,
            original_message: message.to_string(),
            confidence: 0.8,
        }
    }

    /// First category whose any pattern matches wins; no scoring beyond the
    /// boolean match. Falls back to `General`.
    pub fn classify(&self, message: &str) -> Intent {
        for (intent, patterns) in INTENT_PATTERNS.iter() {
            for pattern in patterns {
                if pattern.is_match(message) {
                    log::info!("Classified intent as: {}", intent.as_str());
                    return *intent;
                }
            }
        }

        log::info!("No specific intent classified, defaulting to general");
        Intent::General
    }

    pub fn extract(&self, message: &str, intent: Intent) -> Parameters {
        match intent {
            Intent::ImageGeneration => Parameters::Generation(GenerationParameters {
                prompt: extract_prompt(message),
                style: extract_style(message),
                nsfw_filter: should_apply_nsfw_filter(message),
            }),
            Intent::ImageModification => Parameters::Modification(ModificationParameters {
                modification_type: extract_modification_type(message),
                prompt: extract_prompt(message),
            }),
            _ => Parameters::None,
        }
    }
}

fn extract_prompt(message: &str) -> String {
    for connector in PROMPT_CONNECTORS {
        if let Some(index) = message.find(connector) {
            return message[index + connector.len()..].trim().to_string();
        }
    }

    message.trim().to_string()
}

fn extract_style(message: &str) -> Style {
    for (style, keywords) in STYLE_KEYWORDS {
        for keyword in keywords {
            if message.contains(keyword) {
                return style;
            }
        }
    }

    Style::Default
}

fn should_apply_nsfw_filter(message: &str) -> bool {
    SAFETY_KEYWORDS
        .iter()
        .any(|keyword| message.contains(keyword))
}

fn extract_modification_type(message: &str) -> ModificationType {
    if message.contains("color") || message.contains("colour") {
        ModificationType::ColorAdjustment
    } else if message.contains("bright") || message.contains("dark") {
        ModificationType::BrightnessAdjustment
    } else if message.contains("background") {
        ModificationType::BackgroundChange
    } else {
        ModificationType::GeneralModification
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_verbs_classify_as_generation() {
        let engine = IntentEngine::new();
        for message in [
            "generate an image for me",
            "draw a castle",
            "paint something moody",
            "please render a city at night",
        ] {
            assert_eq!(engine.classify(&message.to_lowercase()), Intent::ImageGeneration);
        }
    }

    #[test]
    fn test_no_match_falls_back_to_general() {
        let engine = IntentEngine::new();
        assert_eq!(engine.classify("hello there"), Intent::General);
    }

    #[test]
    fn test_process_generation_intent() {
        let engine = IntentEngine::new();
        let result = engine.process("Generate an image of a red sports car");

        assert_eq!(result.intent, Intent::ImageGeneration);
        let params = result.parameters.as_generation().unwrap();
        assert!(params.prompt.contains("red sports car"));
        assert_eq!(result.original_message, "Generate an image of a red sports car");
        assert!(result.confidence > 0.5);
    }

    #[test]
    fn test_extract_with_given_intent_keeps_whole_text() {
        // No connector word appears, so the prompt is the whole trimmed text.
        let engine = IntentEngine::new();
        let params = engine.extract("generate a red sports car", Intent::ImageGeneration);

        let params = params.as_generation().unwrap().clone();
        assert!(params.prompt.contains("red sports car"));
        assert_eq!(params.prompt, "generate a red sports car");
    }

    #[test]
    fn test_process_modification_intent() {
        let engine = IntentEngine::new();
        let result = engine.process("Modify the image to be more colorful");

        assert_eq!(result.intent, Intent::ImageModification);
        let params = result.parameters.as_modification().unwrap();
        assert_eq!(params.modification_type, ModificationType::ColorAdjustment);
    }

    #[test]
    fn test_prompt_after_first_connector() {
        assert_eq!(
            extract_prompt("create an artistic painting of a landscape"),
            "a landscape"
        );
    }

    #[test]
    fn test_prompt_without_connector_is_whole_text() {
        assert_eq!(extract_prompt("a red sports car"), "a red sports car");
    }

    #[test]
    fn test_extract_style_artistic() {
        assert_eq!(
            extract_style("create an artistic painting of a landscape"),
            Style::Artistic
        );
    }

    #[test]
    fn test_extract_style_realistic() {
        assert_eq!(
            extract_style("generate a realistic photo of a person"),
            Style::Realistic
        );
    }

    #[test]
    fn test_extract_style_default() {
        assert_eq!(extract_style("generate a red sports car"), Style::Default);
    }

    #[test]
    fn test_safety_keywords_enable_filter() {
        assert!(should_apply_nsfw_filter("create a safe for work image"));
    }

    #[test]
    fn test_plain_request_leaves_filter_off() {
        assert!(!should_apply_nsfw_filter("create an image"));
    }

    #[test]
    fn test_modification_type_chain() {
        assert_eq!(
            extract_modification_type("make it brighter"),
            ModificationType::BrightnessAdjustment
        );
        assert_eq!(
            extract_modification_type("swap the background"),
            ModificationType::BackgroundChange
        );
        assert_eq!(
            extract_modification_type("tweak it a little"),
            ModificationType::GeneralModification
        );
    }

    #[test]
    fn test_non_generation_intents_have_no_parameters() {
        let engine = IntentEngine::new();
        assert_eq!(engine.extract("hello there", Intent::General), Parameters::None);
    }
}
