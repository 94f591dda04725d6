use crate::geom::FULL_TURN;
use crate::item::Item;

/// One item's slice of the circle, in degrees clockwise from north before the wheel's
/// rotation is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Segment {
    pub fn width(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.width() / 2.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    segments: Vec<Segment>,
    angle_per_weight: f64,
    total_weight: f64,
}

impl Layout {
    /// Lays the items out clockwise in input order. The first segment starts at 0 and each
    /// following one starts where the previous ended. An empty list, or weights that sum to
    /// zero, produce a layout with no usable segments instead of dividing by zero.
    pub fn compute(items: &[Item]) -> Self {
        let total_weight: f64 = items.iter().map(|i| i.weight).sum();
        let angle_per_weight = if items.is_empty() || total_weight == 0.0 {
            0.0
        } else {
            FULL_TURN / total_weight
        };

        let mut last_end = 0.0;
        let segments = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let start_angle = last_end;
                last_end += item.weight * angle_per_weight;
                Segment {
                    index,
                    start_angle,
                    end_angle: last_end,
                }
            })
            .collect();

        log::debug!(
            "Laid out {} items, {:.3} deg per weight unit",
            items.len(),
            angle_per_weight
        );

        Self {
            segments,
            angle_per_weight,
            total_weight,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn angle_per_weight(&self) -> f64 {
        self.angle_per_weight
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn is_degenerate(&self) -> bool {
        self.angle_per_weight == 0.0
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
