//! Loads the test catalogs and prints a few translations.
//!
//! Run with `cargo run -p glossa-i18n --example basic -- fr-CA,es;q=0.5`.

use glossa_i18n::{t, I18n, LoaderConfig, Locale};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let header = std::env::args().nth(1).unwrap_or_else(|| "es-MX,en;q=0.5".to_string());

    let locales = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test-data/locales");
    let i18n = I18n::new(LoaderConfig::new(locales), Locale::parse("en")?);

    println!("=== Glossa i18n Example ===");
    println!("Available: {:?}", i18n.available()?.iter().map(ToString::to_string).collect::<Vec<_>>());

    let translator = i18n.translator_for_header(&header)?;
    println!("Accept-Language {header:?} -> {}", translator.locale());

    println!("{}", t!(translator, "app.name"));
    println!("{}", t!(translator, "greeting", name = "María"));
    for count in [0, 1, 2, 5, 21] {
        println!("{}", translator.translate_plural("file", count));
    }
    println!("{}", translator.translate_context("open", "menu"));
    println!("Missing key: '{}'", t!(translator, "missing.key"));

    Ok(())
}
