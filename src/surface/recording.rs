//! Test surface that records every primitive call.

use super::RenderSurface;
use crate::color::Color;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawOp {
    GlobalAlpha(f32),
    FillStyle(Color, f32),
    Rect { x: f32, y: f32, w: f32, h: f32 },
    Circle { x: f32, y: f32, r: f32 },
}

pub(crate) struct RecordingSurface {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub(crate) fn circles(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. }))
            .count()
    }
}

impl RenderSurface for RecordingSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.ops.push(DrawOp::GlobalAlpha(alpha));
    }

    fn set_fill_style(&mut self, color: Color, alpha: f32) {
        self.ops.push(DrawOp::FillStyle(color, alpha));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            w: width,
            h: height,
        });
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32) {
        self.ops.push(DrawOp::Circle { x, y, r: radius });
    }
}
