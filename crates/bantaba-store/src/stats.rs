use bantaba_types::{LanguageCode, Translation, TranslationStatus};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub verified: usize,
    pub corrected: usize,
    pub pending: usize,
}

impl StatusCounts {
    fn add(&mut self, status: TranslationStatus) {
        self.total += 1;
        match status {
            TranslationStatus::Pending => self.pending += 1,
            TranslationStatus::Verified => self.verified += 1,
            TranslationStatus::Corrected => self.corrected += 1,
        }
    }

    /// Translations that received a verdict
    pub fn reviewed(&self) -> usize {
        self.verified + self.corrected
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageStats {
    pub language: LanguageCode,
    pub counts: StatusCounts,
}

/// Review progress, overall and per target language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub overall: StatusCounts,
    pub by_language: Vec<LanguageStats>,
}

impl StoreStats {
    pub fn from_translations(translations: &[Translation]) -> Self {
        let mut overall = StatusCounts::default();
        let mut by_language: Vec<LanguageStats> = LanguageCode::ALL
            .into_iter()
            .filter(|code| !code.is_source())
            .map(|language| LanguageStats {
                language,
                counts: StatusCounts::default(),
            })
            .collect();

        for translation in translations {
            overall.add(translation.status);

            if let Some(stats) = by_language
                .iter_mut()
                .find(|s| s.language == translation.target_language)
            {
                stats.counts.add(translation.status);
            }
        }

        Self {
            overall,
            by_language,
        }
    }

    pub fn for_language(&self, language: LanguageCode) -> StatusCounts {
        self.by_language
            .iter()
            .find(|s| s.language == language)
            .map(|s| s.counts)
            .unwrap_or_default()
    }
}
