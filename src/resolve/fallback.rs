//! Deterministic placeholder candidates.
//!
//! This is the correctness backstop for resolution: whenever live retrieval
//! yields nothing, these functions produce a non-empty list of 3–5 URLs
//! without touching the network.

use crate::color::{self, Rgb};
use crate::textutil::{escape_component, normalize_label};

/// Curated theme: accepted labels and its placeholder set.
struct ThemeSamples {
    labels: &'static [&'static str],
    urls: &'static [&'static str],
}

const THEMES: &[ThemeSamples] = &[
    ThemeSamples {
        labels: &["пустыня", "desert"],
        urls: &[
            "https://via.placeholder.com/1920x1080/F4A460/8B4513?text=Desert+Wallpaper+4K",
            "https://via.placeholder.com/2560x1440/DEB887/8B4513?text=Sand+Dunes+HD",
            "https://placehold.co/1920x1080/D2691E/FFE4B5?text=Sahara+Desert",
        ],
    },
    ThemeSamples {
        labels: &["джунгли", "jungle"],
        urls: &[
            "https://via.placeholder.com/1920x1080/228B22/006400?text=Jungle+Wallpaper+4K",
            "https://via.placeholder.com/2560x1440/32CD32/006400?text=Tropical+Forest+HD",
            "https://placehold.co/1920x1080/006400/98FB98?text=Rainforest",
        ],
    },
    ThemeSamples {
        labels: &["город", "city"],
        urls: &[
            "https://via.placeholder.com/1920x1080/708090/2F4F4F?text=City+Wallpaper+4K",
            "https://via.placeholder.com/2560x1440/696969/D3D3D3?text=Urban+Skyline+HD",
            "https://placehold.co/1920x1080/2F4F4F/F5F5F5?text=City+Night",
        ],
    },
    ThemeSamples {
        labels: &["океан", "ocean"],
        urls: &[
            "https://via.placeholder.com/1920x1080/1E90FF/00008B?text=Ocean+Wallpaper+4K",
            "https://via.placeholder.com/2560x1440/4169E1/000080?text=Blue+Ocean+HD",
            "https://placehold.co/1920x1080/00008B/87CEFA?text=Deep+Sea",
        ],
    },
    ThemeSamples {
        labels: &["горы", "mountains"],
        urls: &[
            "https://via.placeholder.com/1920x1080/A9A9A9/2F4F4F?text=Mountain+Wallpaper+4K",
            "https://via.placeholder.com/2560x1440/808080/FFFAF0?text=Snow+Peaks+HD",
            "https://placehold.co/1920x1080/696969/FFFFFF?text=Alpine+Range",
        ],
    },
    ThemeSamples {
        labels: &["космос", "space"],
        urls: &[
            "https://via.placeholder.com/1920x1080/000080/4169E1?text=Space+Wallpaper+4K",
            "https://via.placeholder.com/2560x1440/191970/9370DB?text=Galaxy+HD",
            "https://placehold.co/1920x1080/000000/E6E6FA?text=Nebula",
        ],
    },
    ThemeSamples {
        labels: &["деревня", "village"],
        urls: &[
            "https://via.placeholder.com/1920x1080/8B4513/F5DEB3?text=Village+Wallpaper+4K",
            "https://via.placeholder.com/2560x1440/A0522D/FFDEAD?text=Countryside+HD",
            "https://placehold.co/1920x1080/CD853F/FFE4B5?text=Rural+Village",
        ],
    },
    ThemeSamples {
        labels: &["лес", "forest"],
        urls: &[
            "https://via.placeholder.com/1920x1080/228B22/006400?text=Forest+Wallpaper+4K",
            "https://via.placeholder.com/2560x1440/2E8B57/90EE90?text=Green+Forest+HD",
            "https://placehold.co/1920x1080/3CB371/98FB98?text=Woods",
        ],
    },
    ThemeSamples {
        labels: &["пляж", "beach"],
        urls: &[
            "https://via.placeholder.com/1920x1080/87CEEB/F0E68C?text=Beach+Wallpaper+4K",
            "https://via.placeholder.com/2560x1440/87CEFA/FFE4B5?text=Sandy+Beach+HD",
            "https://placehold.co/1920x1080/00BFFF/F5DEB3?text=Tropical+Beach",
        ],
    },
    ThemeSamples {
        labels: &["закат", "sunset"],
        urls: &[
            "https://via.placeholder.com/1920x1080/FF4500/FFD700?text=Sunset+Wallpaper+4K",
            "https://via.placeholder.com/2560x1440/FF6347/FFA500?text=Beautiful+Sunset+HD",
            "https://placehold.co/1920x1080/FF7F50/FFDB58?text=Golden+Sunset",
        ],
    },
];

/// Placeholder set for a solid color: five sizes, color as both background
/// and foreground.
pub fn color_samples(rgb: Rgb) -> Vec<String> {
    let code = rgb.hex();
    vec![
        format!("https://via.placeholder.com/1920x1080/{code}/{code}?text=Wallpaper"),
        format!("https://via.placeholder.com/2560x1440/{code}/{code}?text=HD+Wallpaper"),
        format!("https://placehold.co/1920x1080/{code}/{code}?text=4K+Wallpaper"),
        format!("https://placehold.co/2560x1440/{code}/{code}?text=Ultra+HD"),
        format!("https://via.placeholder.com/3840x2160/{code}/{code}?text=4K+Ultra"),
    ]
}

/// Placeholder set for a theme name: curated when known, generic otherwise.
pub fn theme_samples(theme: &str) -> Vec<String> {
    let key = normalize_label(theme);
    if let Some(theme) = curated_theme(&key) {
        return theme.urls.iter().map(|url| url.to_string()).collect();
    }
    generic_samples(&key)
}

/// Dispatch on the key alone: a vocabulary hex gets color samples, anything
/// else is treated as a theme name.
pub fn generate(key: &str) -> Vec<String> {
    if color::is_vocabulary_hex(key) {
        if let Ok(rgb) = Rgb::parse_hex(key) {
            return color_samples(rgb);
        }
    }
    theme_samples(key)
}

fn curated_theme(key: &str) -> Option<&'static ThemeSamples> {
    THEMES.iter().find(|theme| theme.labels.contains(&key))
}

fn generic_samples(key: &str) -> Vec<String> {
    let text = escape_component(key);
    vec![
        format!("https://via.placeholder.com/1920x1080/607D8B/FFFFFF?text={text}+Wallpaper+4K"),
        format!("https://via.placeholder.com/2560x1440/546E7A/FFFFFF?text={text}+HD"),
        format!("https://placehold.co/1920x1080/455A64/FFFFFF?text={text}+UHD"),
        format!("https://placehold.co/2560x1440/37474F/FFFFFF?text={text}+4K"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_samples_embed_hex_in_every_url() {
        let urls = color_samples(color::resolve("синий"));
        assert_eq!(urls.len(), 5);
        assert!(urls.iter().all(|url| url.contains("0000FF")));
    }

    #[test]
    fn color_samples_are_differently_sized() {
        let urls = color_samples(color::NEUTRAL_GRAY);
        let sizes: std::collections::BTreeSet<_> = urls
            .iter()
            .map(|url| url.split('/').nth(3).unwrap_or_default().to_string())
            .collect();
        assert!(sizes.len() >= 3, "sizes: {sizes:?}");
    }

    #[test]
    fn curated_theme_matches_case_insensitively() {
        let urls = theme_samples("ПУСТЫНЯ");
        assert_eq!(urls.len(), 3);
        assert!(urls[0].contains("Desert"));
        assert_eq!(theme_samples("desert"), urls);
    }

    #[test]
    fn every_curated_theme_has_three_to_five_urls() {
        for theme in THEMES {
            assert!((3..=5).contains(&theme.urls.len()), "{:?}", theme.labels);
        }
    }

    #[test]
    fn unknown_theme_gets_four_generic_urls_with_escaped_key() {
        let urls = theme_samples("unknowntheme123");
        assert_eq!(urls.len(), 4);
        assert!(urls.iter().all(|url| url.contains("unknowntheme123")));
    }

    #[test]
    fn generic_urls_escape_spaces_and_non_ascii() {
        let urls = theme_samples("северное сияние");
        let escaped = escape_component("северное сияние");
        assert!(escaped.contains("%20"));
        assert!(urls.iter().all(|url| url.contains(&escaped)));
        assert!(urls.iter().all(|url| url.is_ascii()));
    }

    #[test]
    fn empty_key_still_yields_urls() {
        assert_eq!(theme_samples("").len(), 4);
        assert_eq!(generate("").len(), 4);
    }

    #[test]
    fn generate_dispatches_on_vocabulary_hex() {
        assert_eq!(generate("FF0000"), color_samples(color::resolve("красный")));
        assert_eq!(generate("космос"), theme_samples("космос"));
        // A hex-looking key outside the vocabulary is just a theme name.
        assert_eq!(generate("123456").len(), 4);
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate("лес"), generate("лес"));
        assert_eq!(generate("whatever"), generate("whatever"));
    }
}
