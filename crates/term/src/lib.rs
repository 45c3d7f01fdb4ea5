//! Terminal score sheet module.
//!
//! Draws the classic paper score sheet: one box per frame with the marks along
//! the top and the running total underneath. Rendering goes into a plain
//! framebuffer first, which keeps the view pure and lets tests read it back as
//! text. Only [`renderer`] touches the terminal.

pub mod fb;
pub mod renderer;
pub mod sheet_view;

pub use bowling_core as core;
pub use bowling_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use sheet_view::{SheetView, SinkStatusView, Viewport};
