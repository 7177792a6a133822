/// Overlay slots and formatting for the info panel and planet labels.

use glam::{Vec2, Vec3};
use orrery_engine::TextBlock;

use crate::bodies::PlanetDescriptor;

/// Host element ids the overlay writes into.
pub const INFO_SLOT: &str = "info";
pub const SPEED_SLOT: &str = "speedValue";
pub const FOLLOW_SELECTOR_SLOT: &str = "objectSelector";

pub const PLACEHOLDER_TITLE: &str = "Wanna See Info?";
pub const PLACEHOLDER_LINE: &str = "Hover over an object to see information";

/// Info panel contents for the hovered planet, or the placeholder.
pub fn info_panel(planet: Option<&PlanetDescriptor>) -> TextBlock {
    match planet {
        Some(p) => TextBlock::new(p.name.as_str())
            .with_line(format!("Radius: {:.1} units", p.radius))
            .with_line(format!("Distance from Sun: {} units", p.distance))
            .with_line(format!("Orbital Period: {:.2} Earth years", p.period)),
        None => TextBlock::new(PLACEHOLDER_TITLE).with_line(PLACEHOLDER_LINE),
    }
}

/// Label anchor in viewport pixels for a world position.
///
/// Uses world X/Y directly, offset to the viewport center, rather than a
/// camera projection. Labels therefore track the ecliptic layout, not the
/// on-screen sphere.
pub fn label_position(world: Vec3, viewport: Vec2) -> Vec2 {
    Vec2::new(world.x + viewport.x / 2.0, -world.y + viewport.y / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::PlanetTable;

    #[test]
    fn info_for_earth() {
        let table = PlanetTable::builtin().unwrap();
        let block = info_panel(table.get(2));
        assert_eq!(block.title, "Earth");
        assert_eq!(
            block.lines,
            vec![
                "Radius: 2.0 units".to_string(),
                "Distance from Sun: 60 units".to_string(),
                "Orbital Period: 1.00 Earth years".to_string(),
            ]
        );
    }

    #[test]
    fn info_rounds_mercury() {
        let table = PlanetTable::builtin().unwrap();
        let block = info_panel(table.get(0));
        assert_eq!(block.lines[0], "Radius: 1.5 units");
        assert_eq!(block.lines[2], "Orbital Period: 0.24 Earth years");
    }

    #[test]
    fn placeholder_when_nothing_hovered() {
        let block = info_panel(None);
        assert_eq!(block.title, "Wanna See Info?");
        assert_eq!(block.lines, vec![PLACEHOLDER_LINE.to_string()]);
    }

    #[test]
    fn label_offsets_from_center() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(label_position(Vec3::ZERO, viewport), Vec2::new(400.0, 300.0));
        assert_eq!(label_position(Vec3::new(60.0, 10.0, -5.0), viewport), Vec2::new(460.0, 290.0));
    }
}
