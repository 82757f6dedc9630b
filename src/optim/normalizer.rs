use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::sync::LazyLock;

/// One model-produced recommendation for a meal slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub meal_type: String,
    pub action: String,
    pub impact: String,
}

/// The payload the model is instructed to return. A missing `suggestions`
/// key deserializes to an empty list, which downstream treats as the
/// non-error "no suggestions" outcome.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelReply {
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug)]
pub enum NormalizeError {
    NoJsonFound,
    Parse(serde_json::Error),
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeError::NoJsonFound => write!(f, "No JSON object found in model reply"),
            NormalizeError::Parse(err) => write!(f, "Model reply is not valid JSON: {}", err),
        }
    }
}

impl Error for NormalizeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NormalizeError::Parse(err) => Some(err),
            NormalizeError::NoJsonFound => None,
        }
    }
}

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\n?|\n?```").expect("fence pattern"));
static CONTROL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x1F\x7F-\x9F]").expect("control-char pattern"));
static TRAILING_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*[}\]])").expect("trailing-comma pattern"));

/// Converts the model's free-text reply into a structured payload, tolerant
/// of the formatting noise generative models routinely emit.
///
/// Transformation order matters: strip code fences, cut to the outermost
/// brace span, blank control characters, drop trailing commas, collapse
/// newlines, then parse. After parsing, every `mealType` is lower-cased.
pub fn parse_model_reply(raw: &str) -> Result<ModelReply, NormalizeError> {
    let unfenced = FENCE_RE.replace_all(raw.trim(), "");

    let start = unfenced.find('{').ok_or(NormalizeError::NoJsonFound)?;
    let end = unfenced.rfind('}').ok_or(NormalizeError::NoJsonFound)?;
    if end < start {
        return Err(NormalizeError::NoJsonFound);
    }
    let span = &unfenced[start..=end];

    let no_control = CONTROL_RE.replace_all(span, " ");
    let no_trailing_commas = TRAILING_COMMA_RE.replace_all(&no_control, "$1");
    let flattened = no_trailing_commas.replace('\n', " ");

    let mut reply: ModelReply =
        serde_json::from_str(flattened.trim()).map_err(NormalizeError::Parse)?;

    for suggestion in &mut reply.suggestions {
        suggestion.meal_type = suggestion.meal_type.to_lowercase();
    }
    Ok(reply)
}
