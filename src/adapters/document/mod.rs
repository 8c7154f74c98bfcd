//! Document adapters - Renderers for composed resolutions.
//!
//! Both renderers consume the same `ComposedDocument`:
//! - `HtmlPreviewRenderer` - Standalone print-ready HTML page
//! - `DocxExportService` - Office Open XML package (also serves HTML downloads)

mod docx_export;
mod html_preview;
mod wordml;

pub use docx_export::DocxExportService;
pub use html_preview::HtmlPreviewRenderer;
