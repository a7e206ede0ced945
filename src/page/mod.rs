//! In-process model of the hosting page: elements and load lifecycle

pub mod canvas;
pub mod document;

pub use canvas::{Frame, RenderingContext2d};
pub use document::Document;
