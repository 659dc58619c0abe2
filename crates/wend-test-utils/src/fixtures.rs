//! Fixture catalogs and path builders.

use wend_core::{
    CellPos, CellVec, Direction, TemplateCatalog, TemplateId, TemplateSegment, TerrainTemplate,
};

fn filled(id: u32, width: i32, height: i32) -> TerrainTemplate {
    let tiles = (0..width * height).map(|i| Some(i as u16)).collect();
    TerrainTemplate::new(TemplateId(id), CellVec::new(width, height), tiles).unwrap()
}

fn seg(start: &str, end: &str, points: &[(i32, i32)]) -> TemplateSegment {
    TemplateSegment::new(
        start,
        end,
        points.iter().map(|&(x, y)| CellVec::new(x, y)).collect(),
    )
    .unwrap()
}

/// The minimal beach catalog: a 3-step horizontal straight, a 3-step
/// vertical straight, and a right-to-down bend.
pub fn beach_catalog() -> TemplateCatalog {
    TemplateCatalog::new(vec![
        filled(1, 4, 1).with_segment(seg(
            "Beach.R",
            "Beach.R",
            &[(0, 0), (1, 0), (2, 0), (3, 0)],
        )),
        filled(2, 1, 4).with_segment(seg(
            "Beach.D",
            "Beach.D",
            &[(0, 0), (0, 1), (0, 2), (0, 3)],
        )),
        filled(3, 2, 3).with_segment(seg(
            "Beach.R",
            "Beach.D",
            &[(0, 0), (1, 0), (1, 1), (1, 2)],
        )),
    ])
    .unwrap()
}

/// A loop-capable beach catalog: 1-step straights and 2-step bends in
/// all four clockwise travel directions.
pub fn beach_loop_catalog() -> TemplateCatalog {
    TemplateCatalog::new(vec![
        filled(1, 2, 1).with_segment(seg("Beach.R", "Beach.R", &[(0, 0), (1, 0)])),
        filled(2, 1, 2).with_segment(seg("Beach.D", "Beach.D", &[(0, 0), (0, 1)])),
        filled(3, 2, 1).with_segment(seg("Beach.L", "Beach.L", &[(1, 0), (0, 0)])),
        filled(4, 1, 2).with_segment(seg("Beach.U", "Beach.U", &[(0, 1), (0, 0)])),
        filled(5, 2, 2).with_segment(seg("Beach.R", "Beach.D", &[(0, 0), (1, 0), (1, 1)])),
        filled(6, 2, 2).with_segment(seg("Beach.D", "Beach.L", &[(1, 0), (1, 1), (0, 1)])),
        filled(7, 2, 2).with_segment(seg("Beach.L", "Beach.U", &[(1, 1), (0, 1), (0, 0)])),
        filled(8, 2, 2).with_segment(seg("Beach.U", "Beach.R", &[(0, 1), (0, 0), (1, 0)])),
    ])
    .unwrap()
}

/// `steps + 1` points marching from `from` in `direction`.
pub fn straight_points(from: CellPos, direction: Direction, steps: usize) -> Vec<CellPos> {
    (0..=steps as i32)
        .map(|i| from + direction.offset() * i)
        .collect()
}

/// A clockwise unit-step ring around a `width x height` cell rectangle
/// anchored at `origin`, closed by repeating the first point.
///
/// # Panics
///
/// Panics when either extent is below 2; a ring needs area.
pub fn rectilinear_ring(origin: CellPos, width: i32, height: i32) -> Vec<CellPos> {
    assert!(width >= 2 && height >= 2, "ring needs at least 2x2 cells");
    let mut points = Vec::with_capacity((2 * (width + height) - 4) as usize + 1);
    for x in 0..width {
        points.push(origin + CellVec::new(x, 0));
    }
    for y in 1..height {
        points.push(origin + CellVec::new(width - 1, y));
    }
    for x in (0..width - 1).rev() {
        points.push(origin + CellVec::new(x, height - 1));
    }
    for y in (1..height - 1).rev() {
        points.push(origin + CellVec::new(0, y));
    }
    points.push(origin);
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_build() {
        assert_eq!(beach_catalog().templates().len(), 3);
        assert_eq!(beach_loop_catalog().templates().len(), 8);
    }

    #[test]
    fn straight_points_march() {
        let pts = straight_points(CellPos::new(2, 2), Direction::Down, 3);
        assert_eq!(pts.len(), 4);
        assert_eq!(pts[0], CellPos::new(2, 2));
        assert_eq!(pts[3], CellPos::new(2, 5));
    }

    #[test]
    fn ring_is_closed_unit_step_and_duplicate_free() {
        let ring = rectilinear_ring(CellPos::new(1, 1), 4, 3);
        assert_eq!(ring.first(), ring.last());
        // 2*(4+3) - 4 = 10 distinct cells plus the closer.
        assert_eq!(ring.len(), 11);
        for pair in ring.windows(2) {
            let step = pair[1] - pair[0];
            assert_eq!(step.chebyshev_len(), 1);
            assert!(step.x == 0 || step.y == 0);
        }
        let mut cells = ring[..ring.len() - 1].to_vec();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 10);
    }
}
