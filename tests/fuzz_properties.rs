//! Property tests over arbitrary names. Enabled with `--features fuzz-tests`.
#![cfg(feature = "fuzz-tests")]

use backdrop::color::{self, Foreground};
use backdrop::resolve::{fallback, Intent, ResolutionEngine};
use backdrop::store::PersistenceStore;
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
}

proptest! {
    #[test]
    fn resolution_is_never_empty_and_never_exceeds_limit(
        name in "\\PC{0,24}",
        max in 0usize..12,
        splash in any::<bool>(),
    ) {
        let intent = if splash { Intent::Splash } else { Intent::Color };
        let engine = ResolutionEngine::offline();
        let candidates = runtime().block_on(engine.resolve(&name, intent, max));
        prop_assert!(!candidates.is_empty());
        prop_assert!(candidates.len() <= max.max(1));
    }

    #[test]
    fn theme_samples_have_between_three_and_five_urls(name in "\\PC{0,24}") {
        let urls = fallback::theme_samples(&name);
        prop_assert!((3..=5).contains(&urls.len()));
        prop_assert!(urls.iter().all(|url| !url.contains(' ')));
    }

    #[test]
    fn contrast_is_total(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let fg = color::contrast(color::Rgb::new(r, g, b));
        prop_assert!(matches!(fg, Foreground::Light | Foreground::Dark));
    }

    #[test]
    fn background_round_trips_any_non_blank_pair(
        path in "[a-z0-9]{1,16}",
        label in "\\PC{0,20}",
    ) {
        let store = PersistenceStore::in_memory();
        let url = format!("https://img.example/{path}.jpg");
        store.set_current_background_image(&url, &label).expect("write");
        prop_assert_eq!(store.get_current_background(), Some((url, label.trim().to_string())));
    }
}
