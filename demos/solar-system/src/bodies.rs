/// Planet table: visual and orbital properties of the eight planets.
///
/// Units are scene units, not astronomical ones. Periods are in Earth years
/// and only set relative revolution rates.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TableError;

/// Embedded default table.
const DEFAULT_TABLE: &str = include_str!("../data/planets.json");

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_NAME: &str = "Sun";
pub const SUN_RADIUS: f32 = 10.0;
pub const SUN_TEXTURE: &str = "images/sun.png";

// ── Planet material ──────────────────────────────────────────────────

pub const PLANET_SPECULAR: u32 = 0x333333;
pub const PLANET_SHININESS: f32 = 5.0;

/// One planet. Immutable once the table is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetDescriptor {
    pub name: String,
    pub radius: f64,
    /// Orbit radius around the sun.
    pub distance: f64,
    /// Orbital period in Earth years.
    pub period: f64,
    /// 0xRRGGBB. Written as "#rrggbb" in JSON; plain integers are accepted too.
    #[serde(serialize_with = "write_hex", deserialize_with = "read_hex")]
    pub color: u32,
    /// Texture path, relative to the host's asset root.
    pub texture: String,
}

impl PlanetDescriptor {
    fn validate(&self) -> Result<(), TableError> {
        for (field, value) in [
            ("radius", self.radius),
            ("distance", self.distance),
            ("period", self.period),
        ] {
            if !value.is_finite() {
                return Err(TableError::NonFinite { planet: self.name.clone(), field });
            }
            if value <= 0.0 {
                return Err(TableError::NonPositive { planet: self.name.clone(), field, value });
            }
        }
        Ok(())
    }
}

/// Ordered planet table. Index `i` names the same planet everywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetTable {
    planets: Vec<PlanetDescriptor>,
}

impl PlanetTable {
    /// Parse and validate a JSON array of planets.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let planets: Vec<PlanetDescriptor> = serde_json::from_str(json)?;
        Self::new(planets)
    }

    /// Validate an already-built list.
    pub fn new(planets: Vec<PlanetDescriptor>) -> Result<Self, TableError> {
        if planets.is_empty() {
            return Err(TableError::Empty);
        }
        for planet in &planets {
            planet.validate()?;
        }
        Ok(Self { planets })
    }

    /// The table compiled into the binary.
    pub fn builtin() -> Result<Self, TableError> {
        Self::from_json(DEFAULT_TABLE)
    }

    pub fn get(&self, index: usize) -> Option<&PlanetDescriptor> {
        self.planets.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanetDescriptor> {
        self.planets.iter()
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }
}

/// Format a color as "#rrggbb".
pub fn hex_string(color: u32) -> String {
    format!("#{:06x}", color & 0xFF_FFFF)
}

fn write_hex<S: Serializer>(color: &u32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex_string(*color))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColor {
    Int(u32),
    Text(String),
}

fn read_hex<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    match RawColor::deserialize(deserializer)? {
        RawColor::Int(value) if value <= 0xFF_FFFF => Ok(value),
        RawColor::Int(value) => Err(serde::de::Error::custom(format!("color {value:#x} out of range"))),
        RawColor::Text(text) => {
            let digits = text.trim_start_matches('#').trim_start_matches("0x");
            if digits.len() != 6 {
                return Err(serde::de::Error::custom(format!("bad color {text:?}")));
            }
            u32::from_str_radix(digits, 16)
                .map_err(|_| serde::de::Error::custom(format!("bad color {text:?}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(name: &str, radius: f64, distance: f64, period: f64) -> PlanetDescriptor {
        PlanetDescriptor {
            name: name.to_string(),
            radius,
            distance,
            period,
            color: 0xffffff,
            texture: format!("images/{}.png", name.to_lowercase()),
        }
    }

    #[test]
    fn builtin_table_has_eight_planets_in_order() {
        let table = PlanetTable::builtin().unwrap();
        let names: Vec<&str> = table.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );
    }

    #[test]
    fn builtin_values_match_table() {
        let table = PlanetTable::builtin().unwrap();
        let earth = table.get(2).unwrap();
        assert_eq!(earth.radius, 2.0);
        assert_eq!(earth.distance, 60.0);
        assert_eq!(earth.period, 1.0);
        assert_eq!(earth.color, 0x6b93d6);
        assert_eq!(earth.texture, "images/earth.png");

        let neptune = table.get(7).unwrap();
        assert_eq!(neptune.distance, 175.0);
        assert_eq!(neptune.color, 0x3d5ef5);
    }

    #[test]
    fn empty_table_rejected() {
        assert!(matches!(PlanetTable::from_json("[]"), Err(TableError::Empty)));
    }

    #[test]
    fn zero_period_rejected() {
        let err = PlanetTable::new(vec![planet("Vulcan", 1.0, 10.0, 0.0)]).unwrap_err();
        match err {
            TableError::NonPositive { planet, field, value } => {
                assert_eq!(planet, "Vulcan");
                assert_eq!(field, "period");
                assert_eq!(value, 0.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_radius_rejected() {
        let err = PlanetTable::new(vec![planet("Vulcan", -1.0, 10.0, 1.0)]).unwrap_err();
        assert!(matches!(err, TableError::NonPositive { field: "radius", .. }));
    }

    #[test]
    fn nan_distance_rejected() {
        let err = PlanetTable::new(vec![planet("Vulcan", 1.0, f64::NAN, 1.0)]).unwrap_err();
        assert!(matches!(err, TableError::NonFinite { field: "distance", .. }));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(PlanetTable::from_json("{"), Err(TableError::Parse(_))));
    }

    #[test]
    fn colors_accept_hex_or_int() {
        let json = r##"[
            {"name":"A","radius":1,"distance":10,"period":1,"color":"#ff8000","texture":"a.png"},
            {"name":"B","radius":1,"distance":20,"period":2,"color":255,"texture":"b.png"}
        ]"##;
        let table = PlanetTable::from_json(json).unwrap();
        assert_eq!(table.get(0).unwrap().color, 0xff8000);
        assert_eq!(table.get(1).unwrap().color, 0x0000ff);
    }

    #[test]
    fn bad_color_is_parse_error() {
        let json = r##"[{"name":"A","radius":1,"distance":10,"period":1,"color":"#ff80","texture":"a.png"}]"##;
        assert!(matches!(PlanetTable::from_json(json), Err(TableError::Parse(_))));
    }

    #[test]
    fn hex_string_pads() {
        assert_eq!(hex_string(0x00ff00), "#00ff00");
    }
}
