//! Font discovery and loading
//!
//! Families are resolved through a fontdb database (system fonts plus any
//! configured directories). Loading is raced against a timeout; a family
//! that is missing or slow falls back to a generic sans-serif face.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ab_glyph::{FontArc, FontVec};
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use futures::future::join_all;

/// Generic family appended after every requested family
pub const FALLBACK_FAMILY: &str = "sans-serif";

#[derive(Clone)]
pub struct FontCatalog {
    db: Arc<Database>,
}

impl FontCatalog {
    /// System fonts plus every font file under `font_dirs`
    pub fn system(font_dirs: &[PathBuf]) -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        for dir in font_dirs {
            db.load_fonts_dir(dir);
        }
        log::debug!("Font database holds {} faces", db.len());
        Self::from_database(db)
    }

    /// A catalog with no faces at all
    pub fn empty() -> Self {
        Self::from_database(Database::new())
    }

    pub fn from_database(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }

    /// Sorted, distinct family names known to the database
    pub fn families(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .db
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Blocking lookup of a single family
    pub fn resolve(&self, family: &str) -> Option<FontArc> {
        resolve_in(&self.db, family)
    }

    /// Load every family concurrently, each bounded by `timeout`.
    ///
    /// Failures are logged and tolerated; the returned set always carries a
    /// fallback face when the database has any face at all.
    pub async fn load(&self, families: &[String], timeout: Duration) -> FontSet {
        let tasks = families.iter().cloned().map(|family| {
            let db = Arc::clone(&self.db);
            async move {
                let task = tokio::task::spawn_blocking({
                    let family = family.clone();
                    move || resolve_in(&db, &family)
                });
                let font = match tokio::time::timeout(timeout, task).await {
                    Ok(Ok(Some(font))) => Some(font),
                    Ok(Ok(None)) => {
                        log::warn!("Font family {family:?} not found, using fallback");
                        None
                    }
                    Ok(Err(err)) => {
                        log::warn!("Loading font family {family:?} failed: {err}");
                        None
                    }
                    Err(_) => {
                        log::warn!("Timed out loading font family {family:?} after {timeout:?}");
                        None
                    }
                };
                (family, font)
            }
        });
        let loaded = join_all(tasks).await;

        let db = Arc::clone(&self.db);
        let fallback = tokio::task::spawn_blocking(move || fallback_in(&db))
            .await
            .ok()
            .flatten();
        if fallback.is_none() {
            log::warn!("No fallback font available; text without a loaded family is skipped");
        }

        let mut set = FontSet::default();
        for (family, font) in loaded {
            if let Some(font) = font {
                set.insert(family, font);
            }
        }
        if let Some(font) = fallback {
            set.set_fallback(font);
        }
        set
    }
}

/// Fonts loaded for one render
#[derive(Clone, Default)]
pub struct FontSet {
    fonts: HashMap<String, FontArc>,
    fallback: Option<FontArc>,
}

impl FontSet {
    pub fn insert(&mut self, family: impl Into<String>, font: FontArc) {
        self.fonts.insert(family.into(), font);
    }

    pub fn set_fallback(&mut self, font: FontArc) {
        self.fallback = Some(font);
    }

    pub fn contains(&self, family: &str) -> bool {
        self.fonts.contains_key(family)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// First loaded family of the chain, else the fallback face
    pub fn get(&self, families: &[String]) -> Option<&FontArc> {
        families
            .iter()
            .find_map(|family| self.fonts.get(family))
            .or(self.fallback.as_ref())
    }
}

fn resolve_in(db: &Database, family: &str) -> Option<FontArc> {
    let families = [match family.trim() {
        "" | FALLBACK_FAMILY => Family::SansSerif,
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        other => Family::Name(other),
    }];
    query_face(db, &families)
}

fn fallback_in(db: &Database) -> Option<FontArc> {
    query_face(db, &[Family::SansSerif])
        .or_else(|| db.faces().find_map(|face| load_face(db, face.id)))
}

fn query_face(db: &Database, families: &[Family<'_>]) -> Option<FontArc> {
    let query = Query {
        families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };
    let id = db.query(&query)?;
    load_face(db, id)
}

fn load_face(db: &Database, id: fontdb::ID) -> Option<FontArc> {
    db.with_face_data(id, |data, index| {
        FontVec::try_from_vec_and_index(data.to_vec(), index).ok()
    })
    .flatten()
    .map(FontArc::from)
}
