//! Solar-system body table: display identity, size, orbit and textures.
//!
//! Distances and sizes are scene units, exaggerated for readability. Speeds
//! are radians per frame.

/// Index of Terra in `PLANETS`.
pub const TERRA: usize = 2;
pub const PLANET_COUNT: usize = 8;

/// One row of the planet table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetDesc {
    pub name: &'static str,
    pub fact: &'static str,
    /// Sphere radius.
    pub size: f32,
    /// Orbit radius around the sun.
    pub distance: f32,
    pub speed: f32,
    /// Fixed orbital tilt in degrees, applied once as a height offset.
    pub inclination_deg: f32,
    pub texture: &'static str,
    pub rings: bool,
}

impl PlanetDesc {
    /// Height above the ecliptic, fixed for the lifetime of the scene.
    pub fn height(&self) -> f32 {
        self.distance * self.inclination_deg.to_radians().tan()
    }
}

pub const PLANETS: [PlanetDesc; PLANET_COUNT] = [
    PlanetDesc {
        name: "Mercúrio",
        fact: "Um ano dura apenas 88 dias terrestres. Extremamente quente de dia (430°C) e congelante à noite (-180°C).",
        size: 4.0,
        distance: 60.0,
        speed: 0.02,
        inclination_deg: 7.0,
        texture: "mercury",
        rings: false,
    },
    PlanetDesc {
        name: "Vênus",
        fact: "Um dia em Vênus é mais longo que um ano! A atmosfera densa gera temperaturas de até 470°C.",
        size: 7.0,
        distance: 90.0,
        speed: 0.015,
        inclination_deg: 3.2,
        texture: "venus",
        rings: false,
    },
    PlanetDesc {
        name: "Terra",
        fact: "Nosso lar azul. Um ano tem 365,25 dias, e é o único planeta conhecido com vida.",
        size: 8.0,
        distance: 120.0,
        speed: 0.01,
        inclination_deg: 0.0,
        texture: "earth",
        rings: false,
    },
    PlanetDesc {
        name: "Marte",
        fact: "Um ano marciano tem 687 dias. Já teve água líquida e é o planeta mais explorado por robôs.",
        size: 6.0,
        distance: 160.0,
        speed: 0.008,
        inclination_deg: 1.8,
        texture: "mars",
        rings: false,
    },
    PlanetDesc {
        name: "Júpiter",
        fact: "Maior planeta do sistema solar. Um ano dura 12 anos terrestres. Tem uma tempestade gigante chamada Grande Mancha Vermelha.",
        size: 20.0,
        distance: 220.0,
        speed: 0.005,
        inclination_deg: 1.3,
        texture: "jupiter",
        rings: false,
    },
    PlanetDesc {
        name: "Saturno",
        fact: "Famoso por seus anéis espetaculares. Um ano lá dura cerca de 29 anos terrestres.",
        size: 18.0,
        distance: 280.0,
        speed: 0.004,
        inclination_deg: 2.5,
        texture: "saturn",
        rings: true,
    },
    PlanetDesc {
        name: "Urano",
        fact: "Gira praticamente de lado! Um ano dura 84 anos terrestres. Tem um tom azul-esverdeado por causa do metano.",
        size: 12.0,
        distance: 340.0,
        speed: 0.003,
        inclination_deg: 0.8,
        texture: "uranus",
        rings: false,
    },
    PlanetDesc {
        name: "Netuno",
        fact: "Ventos podem ultrapassar 2.000 km/h! Um ano dura 165 anos terrestres.",
        size: 12.0,
        distance: 400.0,
        speed: 0.002,
        inclination_deg: 1.8,
        texture: "neptune",
        rings: false,
    },
];

pub const PLANET_SEGMENTS: u32 = 32;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 40.0;
pub const SUN_SEGMENTS: u32 = 64;
pub const SUN_TEXTURE: &str = "sun";
pub const SUN_LIGHT_COLOR: u32 = 0xffaa00;
pub const SUN_LIGHT_INTENSITY: f32 = 5.0;
pub const SUN_LIGHT_DISTANCE: f32 = 2000.0;
pub const AMBIENT_COLOR: u32 = 0x333333;
pub const AMBIENT_INTENSITY: f32 = 2.0;

// ── Moon ─────────────────────────────────────────────────────────────

/// Index into `PLANETS` of the planet the moon orbits.
pub const MOON_PARENT: usize = TERRA;
pub const MOON_RADIUS: f32 = 2.0;
pub const MOON_SEGMENTS: u32 = 32;
pub const MOON_ORBIT_RADIUS: f32 = 15.0;
pub const MOON_SPEED: f32 = 0.03;
pub const MOON_TEXTURE: &str = "moon";

// ── Rings ────────────────────────────────────────────────────────────

pub const RING_INNER_FACTOR: f32 = 1.5;
pub const RING_OUTER_FACTOR: f32 = 2.5;
pub const RING_SEGMENTS: u32 = 128;
/// Tilt about the X axis, in radians.
pub const RING_TILT: f32 = -std::f32::consts::FRAC_PI_3;
pub const RING_TEXTURE: &str = "rings";

/// Default asset path for a texture key.
pub fn texture_path(key: &str) -> String {
    if key == RING_TEXTURE {
        format!("assets/texturas/{}.png", key)
    } else {
        format!("assets/texturas/{}.jpg", key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(name: &str) -> PlanetDesc {
        *PLANETS.iter().find(|p| p.name == name).unwrap()
    }

    #[test]
    fn table_is_ordered_outward() {
        for pair in PLANETS.windows(2) {
            assert!(pair[0].distance < pair[1].distance);
            assert!(pair[0].speed >= pair[1].speed);
        }
        assert_eq!(PLANETS[TERRA].name, "Terra");
        assert_eq!(PLANETS.iter().filter(|p| p.rings).count(), 1);
        assert!(planet("Saturno").rings);
    }

    #[test]
    fn heights_follow_inclination() {
        assert_eq!(PLANETS[TERRA].height(), 0.0);
        let mercurio = planet("Mercúrio").height();
        assert!((mercurio - 60.0 * 7f32.to_radians().tan()).abs() < 1e-4);
        assert!(PLANETS.iter().all(|p| p.height() >= 0.0));
    }

    #[test]
    fn texture_paths() {
        assert_eq!(texture_path("earth"), "assets/texturas/earth.jpg");
        assert_eq!(texture_path(RING_TEXTURE), "assets/texturas/rings.png");
    }
}
