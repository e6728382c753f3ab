//! Fixed catalogs: print sizes, map styles, icons and fonts

/// Resolution every output size is exported at
pub const PRINT_DPI: u32 = 300;

/// A named physical print size and its raster dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutputSize {
    pub name: &'static str,
    /// Inches
    pub width: u32,
    pub height: u32,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl OutputSize {
    pub const fn new(name: &'static str, width: u32, height: u32) -> Self {
        Self {
            name,
            width,
            height,
            pixel_width: width * PRINT_DPI,
            pixel_height: height * PRINT_DPI,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Name with quote marks stripped, e.g. `18x24`
    pub fn label(&self) -> String {
        self.name.replace(['"', '\''], "")
    }

    /// File name for an exported poster, e.g. `map_18x24_5400x7200_300dpi.png`
    pub fn export_file_name(&self) -> String {
        format!(
            "map_{}_{}x{}_{}dpi.png",
            self.label(),
            self.pixel_width,
            self.pixel_height,
            PRINT_DPI
        )
    }

    /// Look up a catalog size by name or quote-less label
    pub fn find(name: &str) -> Option<&'static OutputSize> {
        let wanted = name.trim().replace(['"', '\''], "");
        OUTPUT_SIZES.iter().find(|s| s.label() == wanted)
    }
}

impl Default for OutputSize {
    fn default() -> Self {
        OUTPUT_SIZES[3]
    }
}

pub static OUTPUT_SIZES: [OutputSize; 5] = [
    OutputSize::new("8x10\"", 8, 10),
    OutputSize::new("11x14\"", 11, 14),
    OutputSize::new("16x20\"", 16, 20),
    OutputSize::new("18x24\"", 18, 24),
    OutputSize::new("24x36\"", 24, 36),
];

/// A tile source the basemap can be rendered from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapStyle {
    pub name: &'static str,
    /// XYZ tile URL template
    pub url: &'static str,
    pub attribution: &'static str,
}

impl MapStyle {
    pub fn find(name: &str) -> Option<&'static MapStyle> {
        MAP_STYLES
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
    }
}

impl Default for MapStyle {
    fn default() -> Self {
        MAP_STYLES[3]
    }
}

const STADIA_ATTRIBUTION: &str = "&copy; <a href=\"https://stadiamaps.com/\">Stadia Maps</a>, \
     &copy; <a href=\"https://openmaptiles.org/\">OpenMapTiles</a> \
     &copy; <a href=\"http://openstreetmap.org\">OpenStreetMap</a> contributors";

pub static MAP_STYLES: [MapStyle; 4] = [
    MapStyle {
        name: "OSM Default",
        url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors",
    },
    MapStyle {
        name: "OSM Bright",
        url: "https://tiles.stadiamaps.com/tiles/osm_bright/{z}/{x}/{y}{r}.png",
        attribution: STADIA_ATTRIBUTION,
    },
    MapStyle {
        name: "Dark Matter",
        url: "https://tiles.stadiamaps.com/tiles/alidade_smooth_dark/{z}/{x}/{y}{r}.png",
        attribution: STADIA_ATTRIBUTION,
    },
    MapStyle {
        name: "Positron",
        url: "https://tiles.stadiamaps.com/tiles/alidade_smooth/{z}/{x}/{y}{r}.png",
        attribution: STADIA_ATTRIBUTION,
    },
];

/// A pickable icon, path data in a 24x24 box
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconChoice {
    pub key: &'static str,
    pub name: &'static str,
    pub path: &'static str,
}

impl IconChoice {
    pub fn find(key: &str) -> Option<&'static IconChoice> {
        ICONS
            .iter()
            .find(|i| i.key.eq_ignore_ascii_case(key) || i.name.eq_ignore_ascii_case(key))
    }
}

pub static ICONS: [IconChoice; 4] = [
    IconChoice {
        key: "mapPin",
        name: "Map Pin",
        path: "M12 2C8.13 2 5 5.13 5 9c0 5.25 7 13 7 13s7-7.75 7-13c0-3.87-3.13-7-7-7zm0 9.5c-1.38 0-2.5-1.12-2.5-2.5s1.12-2.5 2.5-2.5 2.5 1.12 2.5 2.5-1.12 2.5-2.5 2.5z",
    },
    IconChoice {
        key: "heart",
        name: "Heart",
        path: "M12 21.35l-1.45-1.32C5.4 15.36 2 12.28 2 8.5 2 5.42 4.42 3 7.5 3c1.74 0 3.41.81 4.5 2.09C13.09 3.81 14.76 3 16.5 3 19.58 3 22 5.42 22 8.5c0 3.78-3.4 6.86-8.55 11.54L12 21.35z",
    },
    IconChoice {
        key: "star",
        name: "Star",
        path: "M12 17.27L18.18 21l-1.64-7.03L22 9.24l-7.19-.61L12 2 9.19 8.63 2 9.24l5.46 4.73L5.82 21z",
    },
    IconChoice {
        key: "graduation",
        name: "Graduation",
        path: "M5 13.18v4L12 21l7-3.82v-4L12 17l-7-3.82zM12 3L1 9l11 6 9-4.91V17h2V9L12 3z",
    },
];

/// Families offered by the style editor
pub static FONT_FAMILIES: [&str; 9] = [
    "Roboto",
    "Open Sans",
    "Lato",
    "Montserrat",
    "Raleway",
    "Poppins",
    "Playfair Display",
    "Source Sans Pro",
    "ABeeZee",
];
