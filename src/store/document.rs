//! The persisted state document.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::rows::{ColorOption, Row, SavedBackground, SplashOption, Table};

/// Current on-disk document version.
pub const STATE_FILE_VERSION: u32 = 1;

pub(super) const PREF_CURRENT_COLOR: &str = "current_color";
pub(super) const PREF_CURRENT_SPLASH: &str = "current_splash";
pub(super) const PREF_CURRENT_SPLASH_IMAGE: &str = "current_splash_image";
pub(super) const PREF_CURRENT_BACKGROUND: &str = "current_background";

const DEFAULT_COLORS: [&str; 6] = [
    "розовый",
    "чёрный",
    "синий",
    "зелёный",
    "красный",
    "белый",
];

const DEFAULT_SPLASHES: [(&str, &str); 4] = [
    (
        "Логотип компании",
        "https://via.placeholder.com/800x600/4CAF50/FFFFFF?text=Company+Logo",
    ),
    (
        "Приветствие",
        "https://via.placeholder.com/800x600/2196F3/FFFFFF?text=Welcome",
    ),
    (
        "Загрузка",
        "https://via.placeholder.com/800x600/FF9800/FFFFFF?text=Loading...",
    ),
    (
        "Старт",
        "https://via.placeholder.com/800x600/9C27B0/FFFFFF?text=Start",
    ),
];

/// Everything the store persists, saved and loaded as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub version: u32,
    /// Preference slots, keyed by slot name.
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
    #[serde(default)]
    pub colors: Vec<ColorOption>,
    #[serde(default)]
    pub splashes: Vec<SplashOption>,
    #[serde(default)]
    pub backgrounds: Vec<SavedBackground>,
    /// Next id to hand out; ids are unique across all tables.
    #[serde(default)]
    pub next_id: u64,
}

impl StoreDocument {
    /// A fresh document seeded with the default catalogs.
    pub fn seeded() -> Self {
        let mut doc = Self {
            version: STATE_FILE_VERSION,
            next_id: 1,
            ..Self::default()
        };
        for name in DEFAULT_COLORS {
            let id = doc.allocate_id();
            doc.colors.push(ColorOption {
                id,
                color_name: name.to_string(),
                is_active: true,
            });
        }
        for (name, url) in DEFAULT_SPLASHES {
            let id = doc.allocate_id();
            doc.splashes.push(SplashOption {
                id,
                splash_name: name.to_string(),
                image_url: Some(url.to_string()),
                is_active: true,
            });
        }
        doc
    }

    pub(super) fn allocate_id(&mut self) -> u64 {
        // Documents edited by hand may carry a stale counter.
        let floor = self.max_id().saturating_add(1);
        let id = self.next_id.max(floor).max(1);
        self.next_id = id + 1;
        id
    }

    fn max_id(&self) -> u64 {
        let colors = self.colors.iter().map(|row| row.id);
        let splashes = self.splashes.iter().map(|row| row.id);
        let backgrounds = self.backgrounds.iter().map(|row| row.id);
        colors.chain(splashes).chain(backgrounds).max().unwrap_or(0)
    }

    pub(super) fn pref(&self, key: &str) -> Option<&str> {
        self.preferences
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub(super) fn set_pref(&mut self, key: &str, value: &str) {
        self.preferences.insert(key.to_string(), value.to_string());
    }

    pub(super) fn clear_pref(&mut self, key: &str) {
        self.preferences.remove(key);
    }

    /// The newest row flagged current, if any.
    pub(super) fn current_background_row(&self) -> Option<&SavedBackground> {
        self.backgrounds
            .iter()
            .filter(|row| row.is_current)
            .max_by_key(|row| (row.saved_at_millis, row.id))
    }

    /// Clears `is_current` on every saved background.
    pub(super) fn deactivate_backgrounds(&mut self) {
        for row in &mut self.backgrounds {
            row.is_current = false;
        }
    }

    /// Points the background mirror at the current row, or clears it.
    pub(super) fn sync_background_mirror(&mut self) {
        match self.current_background_row().map(|row| row.image_url.clone()) {
            Some(url) => self.set_pref(PREF_CURRENT_BACKGROUND, &url),
            None => self.clear_pref(PREF_CURRENT_BACKGROUND),
        }
    }

    pub(super) fn rows(&self, table: Table) -> Vec<Row> {
        match table {
            Table::Colors => self.colors.iter().cloned().map(Row::Color).collect(),
            Table::Splashes => self.splashes.iter().cloned().map(Row::Splash).collect(),
            Table::Backgrounds => self
                .backgrounds
                .iter()
                .cloned()
                .map(Row::Background)
                .collect(),
        }
    }

    pub(super) fn push_row(&mut self, row: Row) {
        match row {
            Row::Color(row) => self.colors.push(row),
            Row::Splash(row) => self.splashes.push(row),
            Row::Background(row) => self.backgrounds.push(row),
        }
    }

    /// Replaces the row with the same id and table. Returns false if absent.
    pub(super) fn replace_row(&mut self, row: Row) -> bool {
        match row {
            Row::Color(row) => replace_by_id(&mut self.colors, row, |r| r.id),
            Row::Splash(row) => replace_by_id(&mut self.splashes, row, |r| r.id),
            Row::Background(row) => replace_by_id(&mut self.backgrounds, row, |r| r.id),
        }
    }

    /// Removes the row. Returns false if absent.
    pub(super) fn remove_row(&mut self, table: Table, id: u64) -> bool {
        match table {
            Table::Colors => remove_by_id(&mut self.colors, id, |r| r.id),
            Table::Splashes => remove_by_id(&mut self.splashes, id, |r| r.id),
            Table::Backgrounds => remove_by_id(&mut self.backgrounds, id, |r| r.id),
        }
    }
}

fn replace_by_id<T>(rows: &mut [T], row: T, id_of: impl Fn(&T) -> u64) -> bool {
    let id = id_of(&row);
    match rows.iter_mut().find(|existing| id_of(existing) == id) {
        Some(slot) => {
            *slot = row;
            true
        }
        None => false,
    }
}

fn remove_by_id<T>(rows: &mut Vec<T>, id: u64, id_of: impl Fn(&T) -> u64) -> bool {
    let before = rows.len();
    rows.retain(|row| id_of(row) != id);
    rows.len() != before
}
