use eframe::egui::{Color32, FontId, Painter, Vec2, vec2};

use crate::dataset::{NodeKind, NodeRecord};
use crate::util::truncate_chars;

pub(in crate::app) const LABEL_TRUNCATE_CHARS: usize = 12;
pub(in crate::app) const PILL_RADIUS: f32 = 30.0;

pub(in crate::app) trait TextMeasure {
    fn measure(&self, text: &str, font_size: f32) -> Option<Vec2>;
}

pub(in crate::app) struct PainterMeasure<'a> {
    painter: &'a Painter,
}

impl<'a> PainterMeasure<'a> {
    pub(in crate::app) fn new(painter: &'a Painter) -> Self {
        Self { painter }
    }
}

impl TextMeasure for PainterMeasure<'_> {
    fn measure(&self, text: &str, font_size: f32) -> Option<Vec2> {
        if text.is_empty() {
            return None;
        }

        let galley = self.painter.layout_no_wrap(
            text.to_owned(),
            FontId::proportional(font_size),
            Color32::WHITE,
        );
        let size = galley.size();
        (size.x.is_finite() && size.y.is_finite()).then_some(size)
    }
}

#[derive(Clone, Copy)]
struct KindMetrics {
    padding: f32,
    min_width: f32,
    min_height: f32,
    font_size: f32,
}

fn kind_metrics(kind: NodeKind) -> KindMetrics {
    match kind {
        NodeKind::Cluster => KindMetrics {
            padding: 20.0,
            min_width: 120.0,
            min_height: 50.0,
            font_size: 15.0,
        },
        NodeKind::Word => KindMetrics {
            padding: 15.0,
            min_width: 60.0,
            min_height: 30.0,
            font_size: 10.0,
        },
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) struct NodeShape {
    pub(in crate::app) label: String,
    pub(in crate::app) font_size: f32,
    pub(in crate::app) size: Vec2,
}

impl NodeShape {
    pub(in crate::app) fn half_size(&self) -> Vec2 {
        self.size * 0.5
    }

    pub(in crate::app) fn corner_radius(&self) -> f32 {
        PILL_RADIUS.min(self.size.y * 0.5)
    }
}

pub(in crate::app) fn label_text(record: &NodeRecord) -> String {
    if record.kind == NodeKind::Cluster || record.full_text_visible() {
        record.text.clone()
    } else {
        truncate_chars(&record.text, LABEL_TRUNCATE_CHARS)
    }
}

pub(in crate::app) fn node_shape(record: &NodeRecord, measure: &dyn TextMeasure) -> NodeShape {
    let metrics = kind_metrics(record.kind);
    let label = label_text(record);
    let minimum = vec2(metrics.min_width, metrics.min_height);

    let size = match measure.measure(&label, metrics.font_size) {
        Some(text_size) => {
            let padded = text_size + Vec2::splat(metrics.padding * 2.0);
            minimum.max(padded)
        }
        None => minimum,
    };

    NodeShape {
        label,
        font_size: metrics.font_size,
        size,
    }
}

#[cfg(test)]
pub(in crate::app) mod test_support {
    use super::*;

    pub(in crate::app) struct MonospaceMeasure;

    impl TextMeasure for MonospaceMeasure {
        fn measure(&self, text: &str, font_size: f32) -> Option<Vec2> {
            if text.is_empty() {
                return None;
            }
            Some(vec2(
                text.chars().count() as f32 * font_size * 0.6,
                font_size,
            ))
        }
    }

    pub(in crate::app) struct FailingMeasure;

    impl TextMeasure for FailingMeasure {
        fn measure(&self, _text: &str, _font_size: f32) -> Option<Vec2> {
            None
        }
    }
}
