use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Output a charting library leaves on a canvas
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Svg(String),
    Png(Vec<u8>),
    Html(String),
}

impl Frame {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Frame::Svg(_) => "image/svg+xml",
            Frame::Png(_) => "image/png",
            Frame::Html(_) => "text/html",
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Frame::Svg(s) | Frame::Html(s) => s.as_bytes(),
            Frame::Png(bytes) => bytes,
        }
    }

    /// Encode as a `data:` URI suitable for an `src` attribute
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), BASE64.encode(self.as_bytes()))
    }
}

/// 2D drawing context of a canvas element
#[derive(Debug, Clone)]
pub struct RenderingContext2d {
    element_id: String,
    width: u32,
    height: u32,
    frame: Option<Frame>,
}

impl RenderingContext2d {
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Replace whatever was drawn before
    pub fn present(&mut self, frame: Frame) {
        self.frame = Some(frame);
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn take_frame(&mut self) -> Option<Frame> {
        self.frame.take()
    }
}

/// A `<canvas>` element on the page
#[derive(Debug, Clone)]
pub struct Canvas {
    context: RenderingContext2d,
}

impl Canvas {
    pub fn new(id: &str, width: u32, height: u32) -> Self {
        Canvas {
            context: RenderingContext2d {
                element_id: id.to_string(),
                width,
                height,
                frame: None,
            },
        }
    }

    pub fn get_context_2d(&mut self) -> &mut RenderingContext2d {
        &mut self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri() {
        let frame = Frame::Svg("<svg/>".to_string());
        assert_eq!(frame.to_data_uri(), "data:image/svg+xml;base64,PHN2Zy8+");
    }

    #[test]
    fn test_present_replaces_frame() {
        let mut canvas = Canvas::new("stockChart", 800, 400);
        let ctx = canvas.get_context_2d();
        assert_eq!(ctx.size(), (800, 400));
        assert!(ctx.frame().is_none());

        ctx.present(Frame::Html("a".to_string()));
        ctx.present(Frame::Png(vec![1, 2, 3]));
        assert_eq!(ctx.take_frame(), Some(Frame::Png(vec![1, 2, 3])));
        assert!(ctx.frame().is_none());
    }
}
