//! Built-in English vocabulary, grouped by topic. Used when a language has
//! no word list to draw from.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleCategory {
    Greetings,
    Family,
    Food,
    Numbers,
    Verbs,
    Nature,
    Body,
    Colors,
}

impl SampleCategory {
    pub const ALL: [SampleCategory; 8] = [
        SampleCategory::Greetings,
        SampleCategory::Family,
        SampleCategory::Food,
        SampleCategory::Numbers,
        SampleCategory::Verbs,
        SampleCategory::Nature,
        SampleCategory::Body,
        SampleCategory::Colors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SampleCategory::Greetings => "greetings",
            SampleCategory::Family => "family",
            SampleCategory::Food => "food",
            SampleCategory::Numbers => "numbers",
            SampleCategory::Verbs => "verbs",
            SampleCategory::Nature => "nature",
            SampleCategory::Body => "body",
            SampleCategory::Colors => "colors",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

pub fn sample_words(category: SampleCategory) -> &'static [&'static str] {
    match category {
        SampleCategory::Greetings => &[
            "hello",
            "goodbye",
            "good morning",
            "good afternoon",
            "thank you",
            "please",
            "welcome",
        ],
        SampleCategory::Family => &[
            "mother", "father", "brother", "sister", "child", "family", "friend",
        ],
        SampleCategory::Food => &[
            "water",
            "rice",
            "fish",
            "meat",
            "bread",
            "fruit",
            "vegetable",
        ],
        SampleCategory::Numbers => &[
            "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        ],
        SampleCategory::Verbs => &[
            "go",
            "come",
            "see",
            "hear",
            "speak",
            "understand",
            "know",
            "want",
        ],
        SampleCategory::Nature => &["sun", "moon", "star", "water", "fire", "tree", "rain", "wind"],
        SampleCategory::Body => &["head", "eye", "ear", "nose", "mouth", "hand", "foot", "heart"],
        SampleCategory::Colors => &["red", "blue", "green", "yellow", "black", "white", "brown"],
    }
}

/// Every sample word once, in category order
pub fn all_sample_words() -> Vec<&'static str> {
    let mut words: Vec<&'static str> = Vec::new();
    for category in SampleCategory::ALL {
        for word in sample_words(category) {
            if !words.contains(word) {
                words.push(word);
            }
        }
    }
    words
}
