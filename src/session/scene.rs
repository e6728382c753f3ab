//! Scene descriptions for headless rendering
//!
//! A scene file is JSON describing one composition: catalog selections, the
//! container the print viewport is fitted into, the basemap and the overlays.
//! Overlay positions are viewport-local pixels; omitted positions use the
//! default placement for the overlay kind.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::Deserialize;

use crate::config::{OverlayColor, PosterConfig};
use crate::domain::{
    ICON_SIZE_RANGE, IconChoice, MapStyle, OutputSize, OverlayContent, OverlayStyle, Point, Size,
    TEXT_SIZE_RANGE,
};
use crate::render::Basemap;
use crate::session::state::PosterSession;

/// Container used when a scene does not name one
pub const DEFAULT_CONTAINER: Size = Size::new(1000.0, 1000.0);

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub output_size: Option<String>,
    pub map_style: Option<String>,
    pub container: Size,
    /// Raster image of the map, relative to the scene file
    pub basemap: Option<PathBuf>,
    /// Flat color used when there is no basemap image
    pub background: Option<OverlayColor>,
    pub overlays: Vec<SceneOverlay>,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            output_size: None,
            map_style: None,
            container: DEFAULT_CONTAINER,
            basemap: None,
            background: None,
            overlays: Vec::new(),
        }
    }
}

/// One overlay; exactly one of `text` and `icon` must be set
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SceneOverlay {
    pub text: Option<String>,
    /// Icon catalog key or raw path data
    pub icon: Option<String>,
    pub position: Option<Point>,
    pub size: Option<f32>,
    pub color: Option<OverlayColor>,
    pub rotation: f32,
    pub font_family: Option<String>,
}

impl SceneOverlay {
    fn content_and_style(&self) -> anyhow::Result<(OverlayContent, OverlayStyle)> {
        let (content, mut style, (min, max)) = match (&self.text, &self.icon) {
            (Some(text), None) => {
                let mut style = OverlayStyle::text_default();
                if let Some(family) = &self.font_family {
                    style.font_family = family.clone();
                }
                (OverlayContent::Text(text.clone()), style, TEXT_SIZE_RANGE)
            }
            (None, Some(icon)) => {
                let path = IconChoice::find(icon)
                    .map(|choice| choice.path.to_string())
                    .unwrap_or_else(|| icon.clone());
                (
                    OverlayContent::Icon(path),
                    OverlayStyle::icon_default(),
                    ICON_SIZE_RANGE,
                )
            }
            (Some(_), Some(_)) => bail!("overlay has both text and icon"),
            (None, None) => bail!("overlay needs either text or icon"),
        };
        if let Some(size) = self.size {
            style.size = size.clamp(min, max);
        }
        if let Some(color) = self.color {
            style.color = color;
        }
        style.rotation = self.rotation;
        Ok((content, style))
    }
}

impl SceneDescription {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        Self::from_json(&data).with_context(|| format!("parsing scene {}", path.display()))
    }

    pub fn from_json(data: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Build an editing session holding this composition
    pub fn build(&self, config: PosterConfig) -> anyhow::Result<PosterSession> {
        let mut session = PosterSession::new(config);

        if let Some(name) = &self.output_size {
            let size = OutputSize::find(name)
                .with_context(|| format!("unknown output size {name:?}"))?;
            session.set_output_size(*size);
        }
        if let Some(name) = &self.map_style {
            let style =
                MapStyle::find(name).with_context(|| format!("unknown map style {name:?}"))?;
            session.set_map_style(*style);
        }

        session.resize_container(Point::default(), self.container);
        if session.viewport().size.is_empty() {
            bail!(
                "container {}x{} leaves no room for the print viewport",
                self.container.width,
                self.container.height
            );
        }

        for (index, overlay) in self.overlays.iter().enumerate() {
            let (content, style) = overlay
                .content_and_style()
                .with_context(|| format!("overlay {index}"))?;
            session.add_overlay(content, style, overlay.position);
        }
        log::debug!("Scene built with {} overlays", session.model().len());
        Ok(session)
    }

    /// The basemap, with a relative image path resolved against `base_dir`
    pub fn basemap(&self, base_dir: &Path) -> anyhow::Result<Basemap> {
        match &self.basemap {
            Some(path) => Basemap::open(&base_dir.join(path)),
            None => Ok(Basemap::Solid(
                self.background.unwrap_or(OverlayColor::WHITE),
            )),
        }
    }
}
