//! Integration tests against the catalogs under `test-data/locales`.

use glossa_i18n::{
    categories_for, discover_locales, load_all, load_catalog, parse_po_file, plural_rule_for_locale,
    to_nested_json, CatalogFormat, I18n, LoaderConfig, Locale, PluralCategory, PoWriter,
    Translations,
};
use glossa_test_utils::assert_ok;
use std::path::PathBuf;

fn locales_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test-data").join("locales")
}

fn locale(code: &str) -> Locale {
    Locale::parse(code).unwrap()
}

fn po_config() -> LoaderConfig {
    LoaderConfig::new(locales_dir())
}

#[test]
fn test_discover_fixture_locales() {
    let locales = assert_ok!(discover_locales(&po_config()));
    assert_eq!(
        locales,
        vec![locale("de"), locale("en"), locale("es"), locale("fr"), locale("ru")]
    );
}

#[test]
fn test_load_spanish_catalog() {
    let catalog = assert_ok!(load_catalog(&po_config(), &locale("es")));

    assert_eq!(catalog.get("app.name"), Some("Glossa"));
    assert_eq!(catalog.get("app.tagline"), Some("Traducciones sin complicaciones"));
    assert_eq!(catalog.get("open@menu"), Some("Abrir…"));
    assert_eq!(catalog.get("file.one"), Some("{count} archivo"));
    assert_eq!(catalog.get("multiline.test"), Some("Esta es una línea\nY esta es otra línea"));
    assert_eq!(catalog.get("escape.test"), Some("Dice \"hola\" al mundo"));
    assert_eq!(catalog.get("menu.edit"), None);
}

#[test]
fn test_load_json_catalog() {
    let config = po_config().with_format(CatalogFormat::Json);
    let catalog = assert_ok!(load_catalog(&config, &locale("de")));

    assert_eq!(catalog.get("app.tagline"), Some("Übersetzungen ohne Umstände"));
    assert_eq!(catalog.get("menu.file"), Some("Datei"));
    assert_eq!(catalog.get("file.other"), Some("{count} Dateien"));
}

#[test]
fn test_load_all_fixtures() {
    let locales = assert_ok!(discover_locales(&po_config()));
    let results = load_all(&po_config(), &locales);

    assert_eq!(results.len(), 5);
    for (locale, result) in &results {
        let catalog = result.as_ref().unwrap_or_else(|e| panic!("{locale}: {e}"));
        // German only ships JSON, so its PO catalog is empty.
        assert_eq!(catalog.is_empty(), locale.language() == "de");
    }
}

#[test]
fn test_header_fields() {
    let content = std::fs::read_to_string(locales_dir().join("ru/messages.po")).unwrap();
    let file = assert_ok!(parse_po_file(&content));
    let header = file.header.expect("fixture has a header");

    assert_eq!(header.language(), Some("ru"));
    assert!(header.plural_forms().unwrap().starts_with("nplurals=3;"));
}

#[test]
fn test_fuzzy_flag_survives_parsing() {
    let content = std::fs::read_to_string(locales_dir().join("es/messages.po")).unwrap();
    let file = assert_ok!(parse_po_file(&content));

    let fuzzy: Vec<_> = file.entries.iter().filter(|e| e.is_fuzzy()).map(|e| e.msgid.as_str()).collect();
    assert_eq!(fuzzy, vec!["file"]);
}

#[test]
fn test_russian_plural_forms() {
    let i18n = I18n::new(po_config(), locale("en"));
    let translator = assert_ok!(i18n.translator_for(&[locale("ru-RU")]));

    assert_eq!(translator.translate_plural("file", 1), "1 файл");
    assert_eq!(translator.translate_plural("file", 21), "21 файл");
    // `few` and `many` are not stored under their category names, so `other` is used.
    assert_eq!(translator.translate_plural("file", 3), "3 файла");
    assert_eq!(translator.translate_plural("file", 5), "5 файла");

    let categories = categories_for(plural_rule_for_locale(translator.locale()));
    assert!(categories.contains(&PluralCategory::Many));
}

#[test]
fn test_french_falls_back_to_english() {
    let i18n = I18n::new(po_config(), locale("en"));
    let translator = assert_ok!(i18n.translator_for_header("fr-CA,fr;q=0.9"));

    assert_eq!(translator.locale(), &locale("fr"));
    assert_eq!(translator.translate_plural("file", 0), "0 fichier");
    assert_eq!(translator.translate_with("greeting", &[("name", "Zoé")]), "Bonjour, Zoé !");
    assert_eq!(translator.translate("menu.edit"), "Edit");
    assert_eq!(translator.translate_context("open", "menu"), "Open…");
}

#[test]
fn test_po_to_json_and_back() {
    let catalog = assert_ok!(load_catalog(&po_config(), &locale("en")));

    let nested = assert_ok!(to_nested_json(&catalog));
    assert_eq!(nested["menu"]["edit"], "Edit");
    assert_eq!(nested["file"]["one"], "{count} file");

    let from_json = assert_ok!(Translations::from_json_str(&nested.to_string()));
    assert_eq!(from_json.to_map(), catalog.to_map());

    let po = assert_ok!(PoWriter::new().with_language(locale("en")).write(&from_json));
    let reparsed = assert_ok!(parse_po_file(&po));
    assert_eq!(
        Translations::from_entries(&reparsed.entries).to_map(),
        catalog.to_map()
    );
}
