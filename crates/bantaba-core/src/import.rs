use bantaba_types::{GeneratedBy, LanguageCode, Translation, TranslationStatus};
use chrono::Utc;
use uuid::Uuid;

/// Parse `source,target[,category]` lines into pending translations.
///
/// The first line is a header. Blank lines and lines missing either word
/// are skipped.
pub fn parse_csv(csv: &str, source: LanguageCode, target: LanguageCode) -> Vec<Translation> {
    let now = Utc::now();

    csv.lines()
        .filter(|line| !line.trim().is_empty())
        .skip(1)
        .filter_map(|line| {
            let mut fields = line.split(',').map(str::trim);
            let source_word = fields.next().filter(|s| !s.is_empty())?;
            let target_word = fields.next().filter(|s| !s.is_empty())?;
            let category = fields.next().filter(|s| !s.is_empty());

            Some(Translation {
                id: Uuid::new_v4().to_string(),
                source_word: source_word.to_string(),
                target_word: target_word.to_string(),
                source_language: source,
                target_language: target,
                status: TranslationStatus::Pending,
                generated_by: GeneratedBy::Api,
                created_at: now,
                verified_at: None,
                category: category.map(str::to_string),
                difficulty: None,
                remote_id: None,
            })
        })
        .collect()
}
