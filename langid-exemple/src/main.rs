use std::fs;

use langid_core::fixtures::{sample_language, sample_registry};
use langid_core::{IdPolicy, LanguageModel, LanguageRegistry, NgramEntry, ScoringOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Write the sample models into a fresh scratch directory
    // (one file per language, the file name does not matter)
    let dir = std::env::temp_dir().join(format!("langid-exemple-{}", std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir)?;
    }
    fs::create_dir_all(&dir)?;
    for mut language in sample_registry().iter().cloned().chain([sample_language()]) {
        // The fallback value for unknown n-grams is the smallest log-likelihood
        language.compute_default_log_lk_value()?;
        language.save(dir.join(format!("{}.lm", language.id())))?;
    }

    // A model without n-grams cannot compute its fallback value
    let mut empty = LanguageModel::new("zz");
    match empty.compute_default_log_lk_value() {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{e}"),
    }

    // Load every model of the directory, bad files are skipped
    let registry = LanguageRegistry::from_directory(&dir, IdPolicy::Lenient)?;
    println!("{registry}: {:?}", registry.ids());
    for language in registry.iter() {
        println!("  {language} dialect={}", language.is_dialect());
    }

    // Per n-gram lookups, unknown n-grams use the fallback value
    println!("testlang1/abc = {}", registry.loglk("testlang1", "abc")?);
    println!("testlang1/xyz = {}", registry.loglk("testlang1", "xyz")?);
    println!("{:?}", registry.get("aa-BB")?.lookup("abc").map(NgramEntry::to_string));

    // Score a phrase: dialects are skipped by default
    let options = ScoringOptions::default();
    println!("Tokens of 'abcd': {:?}", LanguageRegistry::tokenize("abcd", options.n));
    let scores = registry.score_phrase("abcd", &options)?;
    for (id, score) in &scores {
        println!("{id}: {score:.6}");
    }
    println!("Winner: {:?}", LanguageRegistry::winner(&scores));

    // Include dialects and restrict the candidates
    let options = ScoringOptions::default()
        .with_dialects(true)
        .with_candidates(["aa-BB", "testlang2"]);
    let result = registry.identify("bcde", &options)?;
    println!("{result:?}");

    // Phrases shorter than the n-gram window are rejected
    match registry.identify("ab", &ScoringOptions::default()) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{e}"),
    }

    fs::remove_dir_all(&dir)?;
    Ok(())
}
