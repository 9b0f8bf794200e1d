pub mod code_panel;
pub mod renderer;

pub use code_panel::{CodeLine, CodePanel, CodeSection};
pub use renderer::{PreviewLayout, PreviewRenderer, RendererError, TrackLabel};
