//! Durable user selections: current color, current image background, and
//! splash theme/image, plus the color/splash catalogs and saved backgrounds.
//!
//! The whole state is one [`StoreDocument`] held behind a mutex. Every
//! mutation runs against a clone, is saved through the [`StateBackend`], and
//! only then replaces the in-memory copy, so a failed write leaves both the
//! backend and later reads unchanged.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::StoreError;
use crate::textutil::normalize_label;

mod backend;
mod document;
mod rows;

pub use backend::{JsonFileBackend, MemoryBackend, StateBackend};
pub use document::{StoreDocument, STATE_FILE_VERSION};
pub use rows::{
    ColorOption, NewRow, Row, RowFilter, SavedBackground, SplashOption, Table,
    MAX_COLOR_NAME_CHARS, MAX_SPLASH_NAME_CHARS,
};

use document::{
    PREF_CURRENT_BACKGROUND, PREF_CURRENT_COLOR, PREF_CURRENT_SPLASH, PREF_CURRENT_SPLASH_IMAGE,
};

/// What the display should show at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentBackground {
    Empty,
    ColorOnly(String),
    ImageBackground { url: String, color_label: String },
}

impl CurrentBackground {
    pub fn image_url(&self) -> Option<&str> {
        match self {
            Self::ImageBackground { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Splash selections, independent of the background state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplashState {
    pub splash_name: Option<String>,
    pub splash_image_url: Option<String>,
}

pub struct PersistenceStore {
    backend: Box<dyn StateBackend>,
    state: Mutex<StoreDocument>,
}

impl std::fmt::Debug for PersistenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceStore")
            .field("backend", &self.backend.describe())
            .finish_non_exhaustive()
    }
}

impl PersistenceStore {
    /// Load state from `backend`, seeding and saving the default catalogs on
    /// first launch.
    pub fn open(backend: impl StateBackend + 'static) -> Result<Self, StoreError> {
        let doc = match backend.load()? {
            Some(doc) => doc,
            None => {
                let doc = StoreDocument::seeded();
                backend.save(&doc)?;
                tracing::info!(backend = %backend.describe(), "seeded default catalogs");
                doc
            }
        };
        Ok(Self {
            backend: Box::new(backend),
            state: Mutex::new(doc),
        })
    }

    /// Open (or create) a JSON state file.
    pub fn open_file(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::open(JsonFileBackend::new(path))
    }

    /// A seeded store that never touches disk.
    pub fn in_memory() -> Self {
        let doc = StoreDocument::seeded();
        Self {
            backend: Box::new(MemoryBackend::with_document(doc.clone())),
            state: Mutex::new(doc),
        }
    }

    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    // -----------------------------------------------------------------------
    // Color and background
    // -----------------------------------------------------------------------

    /// Records the chosen color name. An existing image background is kept.
    pub fn set_current_color_name(&self, name: &str) -> Result<(), StoreError> {
        let name = required("color name", name)?;
        self.mutate(|doc| {
            doc.set_pref(PREF_CURRENT_COLOR, name);
            Ok(())
        })
    }

    pub fn get_current_color_name(&self) -> Option<String> {
        self.read(|doc| doc.pref(PREF_CURRENT_COLOR).map(str::to_string))
    }

    /// Switches the display to a plain color, dropping any image background.
    pub fn set_color_only(&self, name: &str) -> Result<(), StoreError> {
        let name = required("color name", name)?;
        self.mutate(|doc| {
            doc.set_pref(PREF_CURRENT_COLOR, name);
            doc.deactivate_backgrounds();
            doc.sync_background_mirror();
            Ok(())
        })
    }

    /// Makes `url` the one current image background, labelled `color_label`.
    pub fn set_current_background_image(
        &self,
        url: &str,
        color_label: &str,
    ) -> Result<SavedBackground, StoreError> {
        let url = required("image url", url)?;
        self.mutate(|doc| {
            doc.deactivate_backgrounds();
            let id = doc.allocate_id();
            let row = SavedBackground {
                id,
                image_url: url.to_string(),
                color_name: color_label.trim().to_string(),
                is_current: true,
                saved_at_millis: now_unix_millis(),
            };
            doc.backgrounds.push(row.clone());
            doc.sync_background_mirror();
            Ok(row)
        })
    }

    /// The current image background as `(url, color_label)`.
    pub fn get_current_background(&self) -> Option<(String, String)> {
        match self.current_background() {
            CurrentBackground::ImageBackground { url, color_label } => Some((url, color_label)),
            _ => None,
        }
    }

    /// Image if either the current row or the mirror slot names one, else the
    /// color slot, else nothing.
    pub fn current_background(&self) -> CurrentBackground {
        self.read(|doc| {
            if let Some(row) = doc.current_background_row() {
                return CurrentBackground::ImageBackground {
                    url: row.image_url.clone(),
                    color_label: row.color_name.clone(),
                };
            }
            let color = doc.pref(PREF_CURRENT_COLOR).map(str::to_string);
            if let Some(url) = doc.pref(PREF_CURRENT_BACKGROUND) {
                return CurrentBackground::ImageBackground {
                    url: url.to_string(),
                    color_label: color.unwrap_or_default(),
                };
            }
            match color {
                Some(name) => CurrentBackground::ColorOnly(name),
                None => CurrentBackground::Empty,
            }
        })
    }

    /// Startup display state; same precedence as [`Self::current_background`].
    pub fn get_current_display(&self) -> CurrentBackground {
        self.current_background()
    }

    pub fn clear_current_color(&self) -> Result<(), StoreError> {
        self.mutate(|doc| {
            doc.clear_pref(PREF_CURRENT_COLOR);
            Ok(())
        })
    }

    // -----------------------------------------------------------------------
    // Splash
    // -----------------------------------------------------------------------

    pub fn set_current_splash_name(&self, name: &str) -> Result<(), StoreError> {
        let name = required("splash name", name)?;
        self.mutate(|doc| {
            doc.set_pref(PREF_CURRENT_SPLASH, name);
            Ok(())
        })
    }

    pub fn get_current_splash_name(&self) -> Option<String> {
        self.read(|doc| doc.pref(PREF_CURRENT_SPLASH).map(str::to_string))
    }

    pub fn set_current_splash_image(&self, url: &str) -> Result<(), StoreError> {
        let url = required("splash image url", url)?;
        self.mutate(|doc| {
            doc.set_pref(PREF_CURRENT_SPLASH_IMAGE, url);
            Ok(())
        })
    }

    pub fn get_current_splash_image(&self) -> Option<String> {
        self.read(|doc| doc.pref(PREF_CURRENT_SPLASH_IMAGE).map(str::to_string))
    }

    pub fn splash_state(&self) -> SplashState {
        self.read(|doc| SplashState {
            splash_name: doc.pref(PREF_CURRENT_SPLASH).map(str::to_string),
            splash_image_url: doc.pref(PREF_CURRENT_SPLASH_IMAGE).map(str::to_string),
        })
    }

    /// Forgets the splash name; an explicit splash image is kept.
    pub fn clear_current_splash(&self) -> Result<(), StoreError> {
        self.mutate(|doc| {
            doc.clear_pref(PREF_CURRENT_SPLASH);
            Ok(())
        })
    }

    /// The active splash option named by the saved splash, else the first
    /// active one.
    pub fn current_splash_option(&self) -> Option<SplashOption> {
        self.read(|doc| {
            let active = || doc.splashes.iter().filter(|row| row.is_active);
            doc.pref(PREF_CURRENT_SPLASH)
                .map(normalize_label)
                .and_then(|saved| {
                    active().find(|row| normalize_label(&row.splash_name) == saved)
                })
                .or_else(|| active().next())
                .cloned()
        })
    }

    /// The active color option named by the saved color, else the first
    /// active one.
    pub fn current_color_option(&self) -> Option<ColorOption> {
        self.read(|doc| {
            let active = || doc.colors.iter().filter(|row| row.is_active);
            doc.pref(PREF_CURRENT_COLOR)
                .map(normalize_label)
                .and_then(|saved| active().find(|row| normalize_label(&row.color_name) == saved))
                .or_else(|| active().next())
                .cloned()
        })
    }

    /// Clears every preference slot and the saved-background table. The
    /// color and splash catalogs remain.
    pub fn reset_all(&self) -> Result<(), StoreError> {
        self.mutate(|doc| {
            doc.preferences.clear();
            doc.backgrounds.clear();
            Ok(())
        })
    }

    // -----------------------------------------------------------------------
    // Row primitives
    // -----------------------------------------------------------------------

    pub fn list_rows(&self, table: Table, filter: RowFilter) -> Vec<Row> {
        self.read(|doc| {
            doc.rows(table)
                .into_iter()
                .filter(|row| filter == RowFilter::All || row.is_active())
                .collect()
        })
    }

    /// Inserts a row and returns it with its assigned id.
    pub fn insert_row(&self, new_row: NewRow) -> Result<Row, StoreError> {
        self.mutate(|doc| {
            let id = doc.allocate_id();
            let row = new_row.into_row(id, now_unix_millis());
            row.validate()?;
            if let Row::Background(background) = &row {
                if background.is_current {
                    doc.deactivate_backgrounds();
                }
            }
            doc.push_row(row.clone());
            if row.table() == Table::Backgrounds {
                doc.sync_background_mirror();
            }
            Ok(row)
        })
    }

    /// Replaces the row with the same table and id.
    pub fn update_row(&self, row: Row) -> Result<(), StoreError> {
        row.validate()?;
        self.mutate(|doc| {
            let table = row.table();
            let id = row.id();
            if let Row::Background(background) = &row {
                if background.is_current {
                    doc.deactivate_backgrounds();
                }
            }
            if !doc.replace_row(row) {
                return Err(StoreError::RowNotFound {
                    table: table.name(),
                    id,
                });
            }
            if table == Table::Backgrounds {
                doc.sync_background_mirror();
            }
            Ok(())
        })
    }

    pub fn delete_row(&self, table: Table, id: u64) -> Result<(), StoreError> {
        self.mutate(|doc| {
            if !doc.remove_row(table, id) {
                return Err(StoreError::RowNotFound {
                    table: table.name(),
                    id,
                });
            }
            if table == Table::Backgrounds {
                doc.sync_background_mirror();
            }
            Ok(())
        })
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn lock(&self) -> MutexGuard<'_, StoreDocument> {
        // The guarded document is only ever replaced by a fully saved copy.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read<T>(&self, f: impl FnOnce(&StoreDocument) -> T) -> T {
        f(&self.lock())
    }

    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut StoreDocument) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.lock();
        let mut next = guard.clone();
        let out = f(&mut next)?;
        self.backend.save(&next)?;
        *guard = next;
        Ok(out)
    }
}

fn required<'a>(what: &str, value: &'a str) -> Result<&'a str, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Invalid(format!("{what} cannot be empty")));
    }
    Ok(trimmed)
}

/// Current Unix timestamp in milliseconds.
fn now_unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::TestTempDir;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Memory backend whose saves can be made to fail.
    #[derive(Default)]
    struct FlakyBackend {
        inner: MemoryBackend,
        failing: Arc<AtomicBool>,
    }

    impl StateBackend for FlakyBackend {
        fn load(&self) -> Result<Option<StoreDocument>, StoreError> {
            self.inner.load()
        }

        fn save(&self, doc: &StoreDocument) -> Result<(), StoreError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk full",
                )));
            }
            self.inner.save(doc)
        }

        fn describe(&self) -> String {
            "flaky".to_string()
        }
    }

    fn current_rows(store: &PersistenceStore) -> Vec<Row> {
        store.list_rows(Table::Backgrounds, RowFilter::ActiveOnly)
    }

    #[test]
    fn fresh_store_is_seeded_and_empty() {
        let store = PersistenceStore::in_memory();
        assert_eq!(store.get_current_display(), CurrentBackground::Empty);
        assert_eq!(store.list_rows(Table::Colors, RowFilter::All).len(), 6);
        assert_eq!(store.list_rows(Table::Splashes, RowFilter::All).len(), 4);
        assert!(store.get_current_splash_name().is_none());
    }

    #[test]
    fn background_image_round_trips() {
        let store = PersistenceStore::in_memory();
        store
            .set_current_background_image("https://a.example/1.jpg", "синий")
            .unwrap();
        assert_eq!(
            store.get_current_background(),
            Some(("https://a.example/1.jpg".to_string(), "синий".to_string()))
        );
    }

    #[test]
    fn second_image_replaces_first_as_only_current_row() {
        let store = PersistenceStore::in_memory();
        store
            .set_current_background_image("https://a.example/1.jpg", "синий")
            .unwrap();
        let second = store
            .set_current_background_image("https://a.example/2.jpg", "красный")
            .unwrap();
        let current = current_rows(&store);
        assert_eq!(current, vec![Row::Background(second)]);
        assert_eq!(store.list_rows(Table::Backgrounds, RowFilter::All).len(), 2);
        assert_eq!(
            store.get_current_background().map(|(url, _)| url),
            Some("https://a.example/2.jpg".to_string())
        );
    }

    #[test]
    fn color_name_keeps_image_but_color_only_drops_it() {
        let store = PersistenceStore::in_memory();
        store
            .set_current_background_image("https://a.example/1.jpg", "синий")
            .unwrap();
        store.set_current_color_name("красный").unwrap();
        assert!(store.current_background().image_url().is_some());
        assert_eq!(store.get_current_color_name().as_deref(), Some("красный"));

        store.set_color_only("зелёный").unwrap();
        assert_eq!(
            store.current_background(),
            CurrentBackground::ColorOnly("зелёный".to_string())
        );
        assert!(current_rows(&store).is_empty());
    }

    #[test]
    fn mirror_alone_still_reads_as_image() {
        let mut doc = StoreDocument::seeded();
        doc.set_pref(PREF_CURRENT_BACKGROUND, "https://a.example/m.jpg");
        doc.set_pref(PREF_CURRENT_COLOR, "белый");
        let store = PersistenceStore::open(MemoryBackend::with_document(doc)).unwrap();
        assert_eq!(
            store.current_background(),
            CurrentBackground::ImageBackground {
                url: "https://a.example/m.jpg".to_string(),
                color_label: "белый".to_string(),
            }
        );
    }

    #[test]
    fn current_row_alone_still_reads_as_image() {
        let mut doc = StoreDocument::seeded();
        doc.backgrounds.push(SavedBackground {
            id: 50,
            image_url: "https://a.example/r.jpg".into(),
            color_name: "чёрный".into(),
            is_current: true,
            saved_at_millis: 1,
        });
        doc.set_pref(PREF_CURRENT_COLOR, "белый");
        let store = PersistenceStore::open(MemoryBackend::with_document(doc)).unwrap();
        assert_eq!(
            store.get_current_background(),
            Some(("https://a.example/r.jpg".to_string(), "чёрный".to_string()))
        );
    }

    #[test]
    fn reset_all_clears_every_getter() {
        let store = PersistenceStore::in_memory();
        store.set_current_color_name("синий").unwrap();
        store
            .set_current_background_image("https://a.example/1.jpg", "синий")
            .unwrap();
        store.set_current_splash_name("космос").unwrap();
        store
            .set_current_splash_image("https://a.example/s.jpg")
            .unwrap();

        store.reset_all().unwrap();
        assert!(store.get_current_color_name().is_none());
        assert!(store.get_current_background().is_none());
        assert!(store.get_current_splash_name().is_none());
        assert!(store.get_current_splash_image().is_none());
        assert_eq!(store.get_current_display(), CurrentBackground::Empty);
        assert!(store.list_rows(Table::Backgrounds, RowFilter::All).is_empty());
        assert_eq!(store.list_rows(Table::Colors, RowFilter::All).len(), 6);
    }

    #[test]
    fn failed_save_leaves_state_unchanged() {
        let failing = Arc::new(AtomicBool::new(false));
        let backend = FlakyBackend {
            inner: MemoryBackend::new(),
            failing: Arc::clone(&failing),
        };
        let store = PersistenceStore::open(backend).unwrap();
        store
            .set_current_background_image("https://a.example/1.jpg", "синий")
            .unwrap();

        failing.store(true, Ordering::SeqCst);
        assert!(store
            .set_current_background_image("https://a.example/2.jpg", "красный")
            .is_err());
        assert!(store.reset_all().is_err());

        assert_eq!(
            store.get_current_background(),
            Some(("https://a.example/1.jpg".to_string(), "синий".to_string()))
        );
        assert_eq!(current_rows(&store).len(), 1);
    }

    #[test]
    fn state_survives_reopen() {
        let tmp = TestTempDir::new("store-reopen");
        let path = tmp.child("state.json");
        {
            let store = PersistenceStore::open_file(&path).unwrap();
            store.set_current_splash_name("Старт").unwrap();
            store
                .set_current_background_image("https://a.example/1.jpg", "синий")
                .unwrap();
        }
        let store = PersistenceStore::open_file(&path).unwrap();
        assert_eq!(store.get_current_splash_name().as_deref(), Some("Старт"));
        assert_eq!(
            store.get_current_background().map(|(url, _)| url),
            Some("https://a.example/1.jpg".to_string())
        );
        assert_eq!(
            store.current_splash_option().map(|row| row.splash_name),
            Some("Старт".to_string())
        );
    }

    #[test]
    fn options_fall_back_to_first_active_row() {
        let store = PersistenceStore::in_memory();
        assert_eq!(
            store.current_color_option().map(|row| row.color_name),
            Some("розовый".to_string())
        );
        store.set_current_color_name("Синий").unwrap();
        assert_eq!(
            store.current_color_option().map(|row| row.color_name),
            Some("синий".to_string())
        );

        store.set_current_splash_name("не существует").unwrap();
        assert_eq!(
            store.current_splash_option().map(|row| row.splash_name),
            Some("Логотип компании".to_string())
        );
    }

    #[test]
    fn inactive_rows_are_skipped_by_option_lookup() {
        let store = PersistenceStore::in_memory();
        let first = store
            .list_rows(Table::Colors, RowFilter::All)
            .into_iter()
            .next()
            .unwrap();
        let Row::Color(mut color) = first else {
            panic!("expected a color row");
        };
        color.is_active = false;
        store.update_row(Row::Color(color)).unwrap();
        assert_eq!(
            store.current_color_option().map(|row| row.color_name),
            Some("чёрный".to_string())
        );
        assert_eq!(store.list_rows(Table::Colors, RowFilter::ActiveOnly).len(), 5);
    }

    #[test]
    fn row_primitives_enforce_limits_and_report_missing_rows() {
        let store = PersistenceStore::in_memory();
        let err = store
            .insert_row(NewRow::Color {
                color_name: "x".repeat(MAX_COLOR_NAME_CHARS + 1),
                is_active: true,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)), "got: {err}");

        let row = store
            .insert_row(NewRow::Splash {
                splash_name: "Океан".into(),
                image_url: None,
                is_active: true,
            })
            .unwrap();
        store.delete_row(Table::Splashes, row.id()).unwrap();
        let err = store.delete_row(Table::Splashes, row.id()).unwrap_err();
        assert_eq!(err.to_string(), format!("no row {} in splashes", row.id()));
    }

    #[test]
    fn inserting_current_background_row_keeps_single_current() {
        let store = PersistenceStore::in_memory();
        store
            .set_current_background_image("https://a.example/1.jpg", "синий")
            .unwrap();
        store
            .insert_row(NewRow::Background {
                image_url: "https://a.example/3.jpg".into(),
                color_name: "белый".into(),
                is_current: true,
            })
            .unwrap();
        assert_eq!(current_rows(&store).len(), 1);
        assert_eq!(
            store.get_current_background(),
            Some(("https://a.example/3.jpg".to_string(), "белый".to_string()))
        );
    }

    #[test]
    fn deleting_current_background_clears_image() {
        let store = PersistenceStore::in_memory();
        store.set_current_color_name("синий").unwrap();
        let row = store
            .set_current_background_image("https://a.example/1.jpg", "синий")
            .unwrap();
        store.delete_row(Table::Backgrounds, row.id).unwrap();
        assert_eq!(
            store.current_background(),
            CurrentBackground::ColorOnly("синий".to_string())
        );
    }

    #[test]
    fn blank_values_are_rejected() {
        let store = PersistenceStore::in_memory();
        assert!(store.set_current_color_name("  ").is_err());
        assert!(store.set_current_background_image("", "синий").is_err());
        assert!(store.set_current_splash_image(" ").is_err());
    }

    #[test]
    fn clear_helpers_touch_only_their_slot() {
        let store = PersistenceStore::in_memory();
        store.set_current_color_name("синий").unwrap();
        store.set_current_splash_name("лес").unwrap();
        store
            .set_current_splash_image("https://a.example/s.jpg")
            .unwrap();
        store.clear_current_splash().unwrap();
        assert_eq!(
            store.splash_state(),
            SplashState {
                splash_name: None,
                splash_image_url: Some("https://a.example/s.jpg".to_string()),
            }
        );
        store.clear_current_color().unwrap();
        assert!(store.get_current_color_name().is_none());
    }
}
