//! Offline resolution guarantees, exercised through the public API.

use backdrop::color::{self, Foreground, Rgb};
use backdrop::resolve::{Intent, ResolutionEngine};
use backdrop::textutil::escape_component;

#[tokio::test]
async fn every_name_resolves_to_a_bounded_non_empty_list() {
    let engine = ResolutionEngine::offline();
    let names = ["", "   ", "unknowntheme123", "синий", "Ёлка зимой", "🌅 sunset", "космос"];
    for name in names {
        for intent in [Intent::Color, Intent::Splash] {
            for max in [1usize, 2, 3, 5, 10] {
                let candidates = engine.resolve(name, intent, max).await;
                assert!(!candidates.is_empty(), "{name:?} {intent} {max}");
                assert!(candidates.len() <= max, "{name:?} {intent} {max}");
                assert!(candidates.iter().all(|c| c.origin == intent));
                assert!(candidates.iter().all(|c| c.url.starts_with("https://")));
            }
        }
    }
}

#[tokio::test]
async fn zero_limit_still_yields_one_candidate() {
    let engine = ResolutionEngine::offline();
    assert_eq!(engine.resolve("синий", Intent::Color, 0).await.len(), 1);
}

#[tokio::test]
async fn blue_falls_back_to_blue_placeholders() {
    let candidates = ResolutionEngine::offline()
        .resolve("синий", Intent::Color, 5)
        .await;
    assert_eq!(candidates.len(), 5);
    assert!(candidates.iter().all(|c| c.url.contains("0000FF")));
}

#[tokio::test]
async fn unknown_theme_gets_generic_urls_with_escaped_name() {
    let candidates = ResolutionEngine::offline()
        .resolve("unknowntheme123", Intent::Splash, 4)
        .await;
    assert_eq!(candidates.len(), 4);
    assert!(candidates.iter().all(|c| c.url.contains("unknowntheme123")));

    let escaped = escape_component("старый замок");
    let candidates = ResolutionEngine::offline()
        .resolve("Старый замок", Intent::Splash, 4)
        .await;
    assert!(candidates.iter().all(|c| c.url.contains(&escaped)));
    assert!(candidates.iter().all(|c| !c.url.contains(' ')));
}

#[tokio::test]
async fn offline_resolution_is_deterministic() {
    let engine = ResolutionEngine::offline();
    let first = engine.resolve("лес", Intent::Splash, 5).await;
    let second = engine.resolve("  ЛЕС ", Intent::Splash, 5).await;
    let urls = |list: &[backdrop::resolve::ImageCandidate]| {
        list.iter().map(|c| c.url.clone()).collect::<Vec<_>>()
    };
    assert_eq!(urls(&first), urls(&second));
}

#[test]
fn contrast_has_two_fixed_outcomes_and_is_idempotent() {
    let samples = [
        Rgb::new(0, 0, 0),
        Rgb::new(255, 255, 255),
        Rgb::new(0, 0, 255),
        Rgb::new(255, 255, 0),
        color::NEUTRAL_GRAY,
    ];
    for rgb in samples {
        let first = color::contrast(rgb);
        assert_eq!(first, color::contrast(rgb));
        assert!(matches!(first, Foreground::Light | Foreground::Dark));
    }
    assert_eq!(color::contrast(color::resolve("чёрный")), Foreground::Light);
    assert_eq!(color::contrast(color::resolve("белый")), Foreground::Dark);
}

#[test]
fn unknown_colors_resolve_to_neutral_gray() {
    assert_eq!(color::resolve("неизвестный"), color::NEUTRAL_GRAY);
    assert_eq!(color::resolve(""), color::NEUTRAL_GRAY);
    assert_eq!(color::resolve("Черный"), color::resolve("чёрный"));
}
