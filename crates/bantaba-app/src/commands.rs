use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, bail};
use bantaba_core::{LanguageRegistry, VerdictRequest, VerificationSession};
use bantaba_store::StatusCounts;
use bantaba_types::{LanguageCode, Translation};

use crate::cli::Command;

pub async fn run<W: Write>(
    session: &VerificationSession,
    command: Command,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::Languages => languages(session, out),
        Command::Next { language, category } => {
            next(session, target(language)?, category.as_deref(), out).await
        }
        Command::Resolve {
            language,
            words,
            category,
        } => resolve(session, target(language)?, &words, category.as_deref(), out).await,
        Command::Verify {
            id,
            correct,
            corrected_word,
            notes,
            verified_by,
        } => {
            let request = VerdictRequest {
                translation_id: id,
                is_correct: correct,
                corrected_word,
                notes,
                verified_by,
            };
            verify(session, request, out).await
        }
        Command::Stats => stats(session, out).await,
        Command::Export { out: path } => export(session, path.as_deref(), out).await,
        Command::Import { language, csv } => import(session, target(language)?, &csv, out).await,
        Command::RemoteRandom { language } => remote_random(session, target(language)?, out).await,
    }
}

fn target(language: LanguageCode) -> anyhow::Result<LanguageCode> {
    if language.is_source() {
        bail!("{language} is the source language, pick a target language");
    }
    Ok(language)
}

fn language_name(code: LanguageCode) -> &'static str {
    LanguageRegistry::lookup(code)
        .map(|lang| lang.name)
        .unwrap_or("Unknown")
}

fn print_translation<W: Write>(out: &mut W, t: &Translation) -> anyhow::Result<()> {
    writeln!(out, "id:       {}", t.id)?;
    writeln!(out, "english:  {}", t.source_word)?;
    let label = format!("{}:", language_name(t.target_language).to_lowercase());
    writeln!(out, "{label:<9} {}", t.target_word)?;
    writeln!(out, "status:   {}", t.status.as_str())?;
    if let Some(category) = &t.category {
        writeln!(out, "category: {category}")?;
    }
    if let Some(remote_id) = &t.remote_id {
        writeln!(out, "remote:   {remote_id}")?;
    }
    Ok(())
}

fn languages<W: Write>(session: &VerificationSession, out: &mut W) -> anyhow::Result<()> {
    let counts = session.dataset_stats();

    for lang in LanguageRegistry::list_target_languages() {
        let size = match counts.iter().find(|(code, _)| *code == lang.code) {
            Some((_, Ok(count))) => format!("{count} words"),
            Some((_, Err(e))) => format!("word list unreadable: {e}"),
            None => "no word list".to_string(),
        };
        writeln!(
            out,
            "{} {:<4} {} ({}), {}: {size}",
            lang.flag,
            lang.code.as_str(),
            lang.name,
            lang.native_name,
            lang.region
        )?;
    }
    Ok(())
}

async fn next<W: Write>(
    session: &VerificationSession,
    language: LanguageCode,
    category: Option<&str>,
    out: &mut W,
) -> anyhow::Result<()> {
    match session.next_translation(language, category).await {
        Ok(translation) => print_translation(out, &translation),
        Err(e) => {
            writeln!(
                out,
                "Could not produce a translation. Try again for another word, \
                 or enter the translation manually with `import`."
            )?;
            Err(e).context("Failed to prepare the next translation")
        }
    }
}

async fn resolve<W: Write>(
    session: &VerificationSession,
    language: LanguageCode,
    words: &[String],
    category: Option<&str>,
    out: &mut W,
) -> anyhow::Result<()> {
    let translations = session
        .present_batch(words, language, category)
        .await
        .context("Failed to resolve words")?;

    for (i, translation) in translations.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        print_translation(out, translation)?;
    }
    Ok(())
}

async fn verify<W: Write>(
    session: &VerificationSession,
    request: VerdictRequest,
    out: &mut W,
) -> anyhow::Result<()> {
    let id = request.translation_id.clone();
    let result = session
        .submit_verdict(request)
        .await
        .with_context(|| format!("Failed to record verdict for {id}"))?;

    let translation = session.store().find_translation(&id).await?;
    match translation {
        Some(t) => {
            writeln!(out, "Recorded verdict for {id}")?;
            print_translation(out, &t)?;
        }
        None => {
            writeln!(
                out,
                "Recorded verdict ({}) but no translation {id} is stored",
                if result.is_correct { "correct" } else { "incorrect" }
            )?;
        }
    }
    Ok(())
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

fn print_counts<W: Write>(out: &mut W, label: &str, counts: StatusCounts) -> anyhow::Result<()> {
    writeln!(
        out,
        "{label:<10} {:>5} total, {:>5} verified, {:>5} corrected, {:>5} pending ({:.0}% reviewed)",
        counts.total,
        counts.verified,
        counts.corrected,
        counts.pending,
        percent(counts.reviewed(), counts.total)
    )?;
    Ok(())
}

async fn stats<W: Write>(session: &VerificationSession, out: &mut W) -> anyhow::Result<()> {
    let stats = session.stats().await.context("Failed to read the local store")?;

    print_counts(out, "All", stats.overall)?;
    for lang in &stats.by_language {
        print_counts(out, language_name(lang.language), lang.counts)?;
    }
    Ok(())
}

async fn export<W: Write>(
    session: &VerificationSession,
    path: Option<&Path>,
    out: &mut W,
) -> anyhow::Result<()> {
    let export = session.export().await.context("Failed to read the local store")?;
    let json = serde_json::to_string_pretty(&export)?;

    match path {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write export to {}", path.display()))?;
            writeln!(
                out,
                "Exported {} translations and {} verifications to {}",
                export.translations.len(),
                export.verifications.len(),
                path.display()
            )?;
        }
        None => writeln!(out, "{json}")?,
    }
    Ok(())
}

async fn import<W: Write>(
    session: &VerificationSession,
    language: LanguageCode,
    csv: &Path,
    out: &mut W,
) -> anyhow::Result<()> {
    let contents = fs::read_to_string(csv)
        .with_context(|| format!("Failed to read {}", csv.display()))?;

    let count = session
        .import_csv(&contents, language)
        .await
        .context("Failed to save imported translations")?;

    writeln!(out, "Imported {count} {} translations", language_name(language))?;
    Ok(())
}

async fn remote_random<W: Write>(
    session: &VerificationSession,
    language: LanguageCode,
    out: &mut W,
) -> anyhow::Result<()> {
    match session.remote_random(language).await {
        Some(translation) => print_translation(out, &translation)?,
        None => writeln!(out, "No remote translation available for {language}")?,
    }
    Ok(())
}
