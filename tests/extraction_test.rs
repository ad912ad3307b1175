mod common;

use common::FakePage;
use leetcode_uploader::infrastructure::ObservedElement;
use leetcode_uploader::services::language_detector::{LANGUAGE_INDICATOR, LANGUAGE_SELECT};
use leetcode_uploader::services::{CodeExtractor, LanguageDetector, EDITOR_STRATEGIES};

fn selector(name: &str) -> &'static str {
    EDITOR_STRATEGIES
        .iter()
        .find(|s| s.name == name)
        .map(|s| s.selector)
        .unwrap()
}

#[tokio::test]
async fn test_primary_editor_wins_over_legacy() {
    let page = FakePage::new();
    page.set(selector("CodeMirror"), vec![ObservedElement::with_text("legacy code")])
        .set(selector("Monaco"), vec![ObservedElement::with_value("modern code")]);

    let code = CodeExtractor::new().extract(&page).await;
    assert_eq!(code, "modern code");
}

#[tokio::test]
async fn test_blank_primary_falls_through() {
    let page = FakePage::new();
    page.set(selector("Monaco"), vec![ObservedElement::with_value("   \n")])
        .set(
            selector("CodeMirror"),
            vec![
                ObservedElement::with_text("def f():"),
                ObservedElement::with_text("    return 1"),
            ],
        );

    let code = CodeExtractor::new().extract(&page).await;
    assert_eq!(code, "def f():\n    return 1");
}

#[tokio::test]
async fn test_query_errors_are_treated_as_no_data() {
    let page = FakePage::new();
    page.fail_query(selector("Monaco"))
        .set(selector("Ace"), vec![ObservedElement::with_value("ace code\r\n")]);

    let code = CodeExtractor::new().extract(&page).await;
    assert_eq!(code, "ace code");
}

#[tokio::test]
async fn test_empty_editor_returns_empty() {
    let page = FakePage::new();
    let code = CodeExtractor::new().extract(&page).await;
    assert!(code.is_empty());
    // 每种策略都尝试过一次
    assert_eq!(page.queries().len(), EDITOR_STRATEGIES.len());
}

#[test]
fn test_detect_defaults_to_java() {
    let page = FakePage::new();
    let language = tokio_test::block_on(LanguageDetector::new().detect(&page));
    assert_eq!(language, "java");
}

#[test]
fn test_detect_unrecognized_label_defaults_to_java() {
    let page = FakePage::new();
    page.set(LANGUAGE_SELECT, vec![ObservedElement::with_text("Brainfuck")]);
    let language = tokio_test::block_on(LanguageDetector::new().detect(&page));
    assert_eq!(language, "java");
}

#[test]
fn test_detect_maps_synonyms() {
    let page = FakePage::new();
    page.set(LANGUAGE_SELECT, vec![ObservedElement::with_text("Python3")]);
    let language = tokio_test::block_on(LanguageDetector::new().detect(&page));
    assert_eq!(language, "python");
}

#[test]
fn test_detect_uses_indicator_fallback() {
    let page = FakePage::new();
    page.fail_query(LANGUAGE_SELECT)
        .set(LANGUAGE_INDICATOR, vec![ObservedElement::with_text("C++")]);
    let language = tokio_test::block_on(LanguageDetector::new().detect(&page));
    assert_eq!(language, "cpp");
}
