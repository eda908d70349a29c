//! Fixed vocabularies and word-boundary matching for caption text

/// AI-disclosure hashtags (lowercase, with leading '#')
pub const AI_HASHTAGS: &[&str] = &[
    "#aigenerated",
    "#sora",
    "#runwayml",
    "#midjourney",
    "#aiart",
    "#aivideo",
    "#generativeai",
    "#notreal",
    "#aianimals",
    "#digitalart",
];

/// Stylistic hint words suggesting synthetic or rendered content
pub const AI_HINT_WORDS: &[&str] = &[
    "cgi",
    "render",
    "rendered",
    "3d",
    "animation",
    "animated",
    "cartoon",
    "toon",
    "pixar",
    "unreal",
    "ai",
    "synthetic",
    "fake",
    "vfx",
    "deepfake",
    "doll",
    "toy",
    "illustration",
    "painting",
];

/// Stylisation phrases that raise CGI/animation likelihood
pub const STYLIZATION_PHRASES: &[&str] = &[
    "animated",
    "cartoon",
    "pixar",
    "disney",
    "cg",
    "cgi",
    "render",
    "rendered",
    "3d",
    "vfx",
    "superhero",
    "movie",
    "film scene",
];

/// Physically implausible claims
pub const IMPOSSIBLE_PHRASES: &[&str] = &[
    "floating",
    "defying gravity",
    "defies gravity",
    "standing upright",
    "animal using tools",
    "animal holding tools",
    "animal using computer",
    "animal holding computer",
    "tool use",
    "dog driving",
    "cat cooking",
];

/// Lowercase word tokens; anything not alphanumeric separates words
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Caption text normalised for phrase matching on word boundaries
#[derive(Debug, Clone)]
pub struct NormalizedText {
    /// Tokens joined by single spaces, padded with a space on each side
    padded: String,
}

impl NormalizedText {
    pub fn new(text: &str) -> Self {
        Self {
            padded: format!(" {} ", tokenize(text).join(" ")),
        }
    }

    /// Whether the phrase occurs as whole words
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        let needle = format!(" {} ", tokenize(phrase).join(" "));
        !needle.trim().is_empty() && self.padded.contains(&needle)
    }

    /// Phrases from `vocabulary` present in the text, in vocabulary order
    pub fn matches<'a>(&self, vocabulary: &[&'a str]) -> Vec<&'a str> {
        vocabulary
            .iter()
            .copied()
            .filter(|phrase| self.contains_phrase(phrase))
            .collect()
    }
}

/// Hashtags found inside free text (`#` followed by letters, digits or `_`), lowercased
pub fn extract_hashtags(text: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if c != '#' {
            continue;
        }
        let mut end = start + c.len_utf8();
        while let Some(&(idx, next)) = chars.peek() {
            if next.is_alphanumeric() || next == '_' {
                end = idx + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        if end > start + 1 {
            tags.push(text[start..end].to_lowercase());
        }
    }
    tags
}

/// Lowercase a hashtag and ensure the leading '#'
pub fn normalize_hashtag(tag: &str) -> String {
    let trimmed = tag.trim().to_lowercase();
    if trimmed.starts_with('#') {
        trimmed
    } else {
        format!("#{}", trimmed)
    }
}
