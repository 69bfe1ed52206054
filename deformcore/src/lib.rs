//! deformcore — palettes and band layout for the deformed music visualizer

pub mod color;
pub mod config;
pub mod encoding;
pub mod error;
pub mod layout;
pub mod palette;
pub mod theme;
pub mod view;
pub mod widgets;

pub use color::Rgb;
pub use config::VisualizerConfig;
pub use encoding::NoteCounts;
pub use layout::{compute_bands, Band, Connector, Layout};
pub use palette::{generate_palette, PaletteCache};
pub use theme::DeformTheme;
pub use view::{Offset, Session, ViewState};
