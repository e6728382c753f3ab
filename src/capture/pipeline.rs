//! Sequential capture pipeline
//!
//! Every capture runs the same steps in order, each awaited before the next:
//! enter capture mode and let the preview settle, load the fonts the text
//! overlays use, settle again, compute the export scale, snapshot the
//! composition, rasterize it on a blocking thread and write the PNG. The
//! capturing flag is cleared whatever the outcome.

use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};

use super::export::save_png_atomic;
use crate::config::PosterConfig;
use crate::fonts::FontCatalog;
use crate::render::{Basemap, render_scene};
use crate::session::PosterSession;

#[derive(Clone, Debug)]
pub struct CaptureSettings {
    /// Wait after entering capture mode
    pub capture_settle: Duration,
    /// Wait after fonts are loaded
    pub font_settle: Duration,
    /// Upper bound per font family
    pub font_timeout: Duration,
    pub out_dir: PathBuf,
}

impl CaptureSettings {
    pub fn from_config(config: &PosterConfig) -> anyhow::Result<Self> {
        let out_dir = config
            .save_location
            .dir()
            .context("could not determine the export directory")?;
        Ok(Self {
            capture_settle: config.capture_settle(),
            font_settle: config.font_settle(),
            font_timeout: config.font_load_timeout(),
            out_dir,
        })
    }

    pub fn with_out_dir(mut self, out_dir: PathBuf) -> Self {
        self.out_dir = out_dir;
        self
    }
}

/// Holds the session in capture mode until dropped
struct CapturingGuard<'a> {
    session: &'a mut PosterSession,
}

impl<'a> CapturingGuard<'a> {
    fn enter(session: &'a mut PosterSession) -> Self {
        session.set_capturing(true);
        Self { session }
    }
}

impl Deref for CapturingGuard<'_> {
    type Target = PosterSession;

    fn deref(&self) -> &PosterSession {
        self.session
    }
}

impl Drop for CapturingGuard<'_> {
    fn drop(&mut self) {
        self.session.set_capturing(false);
    }
}

pub struct CapturePipeline {
    settings: CaptureSettings,
    fonts: FontCatalog,
    basemap: Arc<Basemap>,
}

impl CapturePipeline {
    pub fn new(settings: CaptureSettings, fonts: FontCatalog, basemap: Arc<Basemap>) -> Self {
        Self {
            settings,
            fonts,
            basemap,
        }
    }

    pub fn settings(&self) -> &CaptureSettings {
        &self.settings
    }

    /// Capture and save the poster, logging any failure
    pub async fn capture(&self, session: &mut PosterSession) -> Option<PathBuf> {
        match self.try_capture(session).await {
            Ok(path) => {
                log::info!("Poster saved to {}", path.display());
                Some(path)
            }
            Err(err) => {
                log::error!("Poster capture failed: {err:#}");
                None
            }
        }
    }

    /// Capture and save the poster
    ///
    /// Rejected while another capture on the same session is running. The
    /// capturing flag is cleared on completion, failure or cancellation.
    pub async fn try_capture(&self, session: &mut PosterSession) -> anyhow::Result<PathBuf> {
        if session.is_capturing() {
            bail!("a capture is already running");
        }
        let guard = CapturingGuard::enter(session);
        self.run(&guard).await
    }

    async fn run(&self, session: &PosterSession) -> anyhow::Result<PathBuf> {
        tokio::time::sleep(self.settings.capture_settle).await;

        let families = session.model().font_families();
        log::debug!("Loading font families {families:?}");
        let fonts = self.fonts.load(&families, self.settings.font_timeout).await;

        tokio::time::sleep(self.settings.font_settle).await;

        let output = *session.output_size();
        let scale = session
            .viewport()
            .export_scale(output.pixel_width)
            .context("print viewport has no size")?;
        log::info!(
            "Capturing {} poster at {}x{} (scale {scale:.3})",
            output.name,
            output.pixel_width,
            output.pixel_height
        );

        let scene = session.snapshot(Arc::clone(&self.basemap));
        let image = tokio::task::spawn_blocking(move || {
            render_scene(&scene, output.pixel_width, output.pixel_height, &fonts, None)
        })
        .await
        .context("render task failed")??;

        let out_dir = self.settings.out_dir.clone();
        let file_name = output.export_file_name();
        tokio::task::spawn_blocking(move || save_png_atomic(&image, &out_dir, &file_name))
            .await
            .context("save task failed")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OUTPUT_SIZES, OverlayContent, OverlayStyle, Point, Size};
    use crate::fonts::testing::fallback_only;
    use crate::render::Drawable;
    use crate::render::primitive::export_drawables;

    fn settings(out_dir: PathBuf) -> CaptureSettings {
        CaptureSettings {
            capture_settle: Duration::ZERO,
            font_settle: Duration::ZERO,
            font_timeout: Duration::from_millis(10),
            out_dir,
        }
    }

    fn pipeline(out_dir: PathBuf) -> CapturePipeline {
        CapturePipeline::new(
            settings(out_dir),
            FontCatalog::empty(),
            Arc::new(Basemap::default()),
        )
    }

    fn session() -> PosterSession {
        let mut session = PosterSession::default();
        session.set_output_size(OUTPUT_SIZES[0]);
        session.resize_container(Point::default(), Size::new(1000.0, 500.0));
        session
    }

    #[test]
    fn test_settings_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = PosterConfig {
            save_location: crate::config::SaveLocation::Custom(dir.path().to_path_buf()),
            ..PosterConfig::default()
        };
        let settings = CaptureSettings::from_config(&config).unwrap();
        assert_eq!(settings.capture_settle, Duration::from_millis(300));
        assert_eq!(settings.font_settle, Duration::from_millis(100));
        assert_eq!(settings.font_timeout, Duration::from_secs(3));
        assert_eq!(settings.out_dir, dir.path());
    }

    #[tokio::test]
    async fn test_capture_writes_print_sized_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session();
        let center = session.viewport().center();
        session.add_overlay(
            OverlayContent::Icon("M0 0H24V24H0Z".into()),
            OverlayStyle::icon_default(),
            Some(center),
        );
        session.add_text("Paris");

        let path = pipeline(dir.path().to_path_buf())
            .capture(&mut session)
            .await
            .unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str(),
            Some("map_8x10_2400x3000_300dpi.png")
        );
        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (2400, 3000));
        assert_eq!(img.get_pixel(1200, 1500).0, [0x00, 0x66, 0xff, 255]);
        assert_eq!(img.get_pixel(5, 5).0, [255, 255, 255, 255]);
        assert!(!session.is_capturing());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_capture_rejected_while_running() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session();
        session.set_capturing(true);

        let result = pipeline(dir.path().to_path_buf())
            .try_capture(&mut session)
            .await;
        assert!(result.is_err());
        // The running capture still owns the flag
        assert!(session.is_capturing());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_failed_capture_clears_flag_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        // No container yet, so the viewport has no size
        let mut session = PosterSession::default();

        let path = pipeline(dir.path().to_path_buf())
            .capture(&mut session)
            .await;
        assert!(path.is_none());
        assert!(!session.is_capturing());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_abandoned_capture_clears_flag() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session();
        let slow = CapturePipeline::new(
            CaptureSettings {
                capture_settle: Duration::from_millis(500),
                ..settings(dir.path().to_path_buf())
            },
            FontCatalog::empty(),
            Arc::new(Basemap::default()),
        );

        // Dropped while waiting for the preview to settle
        let abandoned =
            tokio::time::timeout(Duration::from_millis(20), slow.try_capture(&mut session)).await;
        assert!(abandoned.is_err());
        assert!(!session.is_capturing());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        let path = pipeline(dir.path().to_path_buf())
            .try_capture(&mut session)
            .await
            .unwrap();
        assert!(path.is_file());
    }

    #[tokio::test]
    async fn test_exported_text_follows_display_then_export_scale() {
        // 8x10" is 2400px wide; a 600px viewport gives scale 4
        let mut session = session();
        session.resize_container(Point::default(), Size::new(1000.0, 2500.0 / 3.0));
        assert!((session.viewport().width() - 600.0).abs() < 0.01);
        let scale = session.viewport().export_scale(2400).unwrap();
        assert!((scale - 4.0).abs() < 1e-3);

        let style = OverlayStyle {
            size: 24.0,
            ..OverlayStyle::text_default()
        };
        let id = session.add_overlay(OverlayContent::Text("HHHH".into()), style, None);

        // nominal 24 shows at 14.4px on screen and exports at 57.6px
        let drawables = export_drawables(session.model().overlays(), session.viewport(), scale);
        let Drawable::Text(text) = &drawables[0] else {
            panic!("expected text");
        };
        assert_eq!(text.id, id);
        assert!((text.font_size - 57.6).abs() < 0.05);

        let scene = session.snapshot(Arc::new(Basemap::default()));
        let fonts = fallback_only();
        let image = tokio::task::spawn_blocking(move || {
            render_scene(&scene, 2400, 3000, &fonts, None).unwrap()
        })
        .await
        .unwrap();
        let rows: Vec<u32> = image
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0 != [255, 255, 255, 255])
            .map(|(_, y, _)| y)
            .collect();
        let height = rows.iter().max().unwrap() - rows.iter().min().unwrap();
        // Cap height of a 57.6px face
        assert!((30..=50).contains(&height), "ink height {height}");
    }
}
