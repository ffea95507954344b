//! Solar system scene: a textured sun, eight planets on circular orbits,
//! one moon around Terra and a ring around Saturno. Clicking a planet shows
//! its info card.

use glam::{Quat, Vec2, Vec3};
use astros_engine::{
    EngineContext, Entity, EntityId, Game, GameConfig, GameEvent, InfoCard, InputEvent,
    InputQueue, LocalTransform, MeshColor, MeshComponent, PointLight,
};

use crate::bodies::{self, PlanetDesc, PLANETS};
use crate::orbit::OrbitalBody;
use crate::picking::{pick_nearest, PickTarget, SelectionState};

/// Event kind emitted when the selection changes. Payload `a` is the planet
/// index, or -1 when cleared.
pub const EVENT_SELECTION: f32 = 1.0;

/// A planet or moon: its scene entity and orbit.
#[derive(Debug, Clone, Copy)]
struct Orbiter {
    entity: EntityId,
    orbit: OrbitalBody,
}

impl Orbiter {
    fn advance(&mut self, ctx: &mut EngineContext) {
        self.orbit.advance();
        ctx.graph.set_offset(self.entity, self.orbit.local_position());
    }
}

pub struct SolarScene {
    seed: u64,
    /// Indexed like `PLANETS`.
    planets: Vec<Orbiter>,
    moon: Option<Orbiter>,
    selection: SelectionState,
}

impl SolarScene {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            planets: Vec::with_capacity(bodies::PLANET_COUNT),
            moon: None,
            selection: SelectionState::new(),
        }
    }

    fn spawn_sun(&mut self, ctx: &mut EngineContext) {
        let tex = ctx.textures.request(bodies::SUN_TEXTURE, &bodies::texture_path(bodies::SUN_TEXTURE));
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag("sun")
                .with_mesh(MeshComponent::sphere(bodies::SUN_RADIUS, bodies::SUN_SEGMENTS).with_texture(tex)),
        );
        ctx.graph.register_with(id, LocalTransform::new());

        ctx.lights.add(PointLight::new(
            Vec3::ZERO,
            MeshColor::from_hex(bodies::SUN_LIGHT_COLOR),
            bodies::SUN_LIGHT_INTENSITY,
            bodies::SUN_LIGHT_DISTANCE,
        ));
        ctx.lights.set_ambient(MeshColor::from_hex(bodies::AMBIENT_COLOR), bodies::AMBIENT_INTENSITY);
    }

    fn spawn_planet(&mut self, ctx: &mut EngineContext, desc: &PlanetDesc) -> EntityId {
        let tex = ctx.textures.request(desc.texture, &bodies::texture_path(desc.texture));
        let id = ctx.next_id();
        // Placed on +X until the first advancement.
        let start = Vec3::new(desc.distance, desc.height(), 0.0);
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag(desc.name)
                .with_pos(start)
                .with_mesh(MeshComponent::sphere(desc.size, bodies::PLANET_SEGMENTS).with_texture(tex)),
        );
        ctx.graph.register_with(id, LocalTransform::from_offset(start));

        let angle = OrbitalBody::start_angle(ctx.rng.next_f32());
        self.planets.push(Orbiter {
            entity: id,
            orbit: OrbitalBody::new(desc.distance, desc.speed, angle, desc.height()),
        });
        id
    }

    fn spawn_moon(&mut self, ctx: &mut EngineContext, parent: EntityId) {
        let tex = ctx.textures.request(bodies::MOON_TEXTURE, &bodies::texture_path(bodies::MOON_TEXTURE));
        let id = ctx.next_id();
        let offset = Vec3::new(bodies::MOON_ORBIT_RADIUS, 0.0, 0.0);
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag("moon")
                .with_mesh(MeshComponent::sphere(bodies::MOON_RADIUS, bodies::MOON_SEGMENTS).with_texture(tex)),
        );
        ctx.graph.register_with(id, LocalTransform::from_offset(offset));
        ctx.graph.set_parent(id, Some(parent));

        let angle = OrbitalBody::start_angle(ctx.rng.next_f32());
        self.moon = Some(Orbiter {
            entity: id,
            orbit: OrbitalBody::new(bodies::MOON_ORBIT_RADIUS, bodies::MOON_SPEED, angle, 0.0),
        });
    }

    fn spawn_ring(&mut self, ctx: &mut EngineContext, parent: EntityId, planet_size: f32) {
        let inner = planet_size * bodies::RING_INNER_FACTOR;
        let outer = planet_size * bodies::RING_OUTER_FACTOR;
        let Some(geometry) = ctx.rings.add(inner, outer, bodies::RING_SEGMENTS) else {
            log::warn!("astros: ring around {:?} skipped, tessellation failed", parent);
            return;
        };
        let tex = ctx.textures.request(bodies::RING_TEXTURE, &bodies::texture_path(bodies::RING_TEXTURE));
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag("rings")
                .with_mesh(MeshComponent::ring(geometry).with_texture(tex).double_sided().transparent()),
        );
        ctx.graph.register_with(id, LocalTransform::new().with_rotation(Quat::from_rotation_x(bodies::RING_TILT)));
        ctx.graph.set_parent(id, Some(parent));
    }

    /// Planets as pick targets, at their last propagated positions.
    fn pick_targets(&self, ctx: &EngineContext) -> Vec<PickTarget> {
        self.planets
            .iter()
            .enumerate()
            .filter_map(|(index, planet)| {
                let entity = ctx.scene.get(planet.entity)?;
                Some(PickTarget {
                    index,
                    center: entity.pos,
                    radius: entity.bounding_radius()?,
                })
            })
            .collect()
    }

    fn handle_click(&mut self, ctx: &mut EngineContext, ndc: Vec2) {
        let targets = self.pick_targets(ctx);
        let picked = pick_nearest(&ctx.camera, ndc, &targets);
        if !self.selection.apply(picked) {
            return;
        }
        match picked {
            Some(index) => {
                log::debug!("astros: selected {}", PLANETS[index].name);
                ctx.emit_event(GameEvent::new(EVENT_SELECTION, index as f32));
            }
            None => {
                log::debug!("astros: selection cleared");
                ctx.emit_event(GameEvent::new(EVENT_SELECTION, -1.0));
            }
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selection.selected()
    }
}

impl Game for SolarScene {
    fn config(&self) -> GameConfig {
        GameConfig {
            seed: self.seed,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.spawn_sun(ctx);

        for (index, desc) in PLANETS.iter().enumerate() {
            let id = self.spawn_planet(ctx, desc);
            if index == bodies::MOON_PARENT {
                self.spawn_moon(ctx, id);
            }
            if desc.rings {
                self.spawn_ring(ctx, id, desc.size);
            }
        }

        log::info!(
            "astros: {} planets, {} entities, {} textures requested",
            self.planets.len(),
            ctx.scene.len(),
            ctx.textures.len()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        // Picks see the positions that were last rendered.
        for event in input.iter() {
            if let InputEvent::Click { ndc_x, ndc_y } = *event {
                self.handle_click(ctx, Vec2::new(ndc_x, ndc_y));
            }
        }

        for planet in &mut self.planets {
            planet.advance(ctx);
        }
        if let Some(moon) = &mut self.moon {
            moon.advance(ctx);
        }
    }

    fn info_card(&self) -> Option<InfoCard> {
        self.selection
            .card(|index| PLANETS.get(index).map(|p| (p.name, p.fact)))
    }

    fn teardown(&mut self, ctx: &mut EngineContext) {
        self.selection.clear();
        self.planets.clear();
        self.moon = None;
        ctx.scene.clear();
        ctx.graph.clear();
        ctx.rings.clear();
        ctx.lights.clear();
        log::info!("astros: scene released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astros_engine::{CameraConfig, MeshShape, PerspectiveCamera};

    fn setup() -> (SolarScene, EngineContext) {
        let mut game = SolarScene::new(7);
        let mut ctx = EngineContext::new(&game.config());
        game.init(&mut ctx);
        ctx.graph.propagate(&mut ctx.scene);
        (game, ctx)
    }

    fn height_of(name: &str) -> f32 {
        PLANETS.iter().find(|p| p.name == name).map_or(f32::NAN, |p| p.height())
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    fn aim(ctx: &mut EngineContext, position: Vec3, target: Vec3) {
        let config = CameraConfig { position, target, ..Default::default() };
        ctx.camera = PerspectiveCamera::new(&config, 800.0, 600.0);
    }

    fn click(ndc: (f32, f32)) -> InputQueue {
        let mut input = InputQueue::new();
        input.push(InputEvent::PointerMove { x: 0.0, y: 0.0, ndc: Some(ndc) });
        input.push_click();
        input
    }

    #[test]
    fn init_builds_the_whole_system() {
        let (game, ctx) = setup();
        // Sun, eight planets, moon, ring.
        assert_eq!(ctx.scene.len(), 11);
        assert_eq!(game.planets.len(), bodies::PLANET_COUNT);
        assert_eq!(ctx.lights.count(), 1);
        // sun, eight planet textures, moon, rings
        assert_eq!(ctx.textures.len(), 11);
        assert_eq!(ctx.textures.path(ctx.textures.id("rings").unwrap()), Some("assets/texturas/rings.png"));

        let terra = ctx.scene.find_by_tag("Terra").unwrap();
        assert!(close(terra.pos, Vec3::new(120.0, 0.0, 0.0)));
        let mercurio = ctx.scene.find_by_tag("Mercúrio").unwrap();
        assert!((mercurio.pos.y - height_of("Mercúrio")).abs() < 1e-4);
    }

    #[test]
    fn start_angles_follow_seed() {
        let (a, _) = setup();
        let (b, _) = setup();
        let angles = |g: &SolarScene| g.planets.iter().map(|p| p.orbit.angle).collect::<Vec<_>>();
        assert_eq!(angles(&a), angles(&b));
        assert!(angles(&a).iter().all(|&x| (0.0..std::f32::consts::TAU).contains(&x)));
    }

    #[test]
    fn planets_advance_on_their_circles() {
        let (mut game, mut ctx) = setup();
        let start = game.planets[bodies::TERRA].orbit.angle;
        let input = InputQueue::new();
        for _ in 0..10 {
            game.update(&mut ctx, &input);
        }
        ctx.graph.propagate(&mut ctx.scene);

        let angle = game.planets[bodies::TERRA].orbit.angle;
        assert!((angle - (start + 10.0 * 0.01)).abs() < 1e-5);
        let terra = ctx.scene.find_by_tag("Terra").unwrap();
        assert!(close(terra.pos, Vec3::new(120.0 * angle.cos(), 0.0, 120.0 * angle.sin())));

        // Inclined planets keep their fixed height.
        let netuno = ctx.scene.find_by_tag("Netuno").unwrap();
        assert!((netuno.pos.y - height_of("Netuno")).abs() < 1e-3);
    }

    #[test]
    fn moon_orbits_relative_to_terra() {
        let (mut game, mut ctx) = setup();
        let input = InputQueue::new();
        for _ in 0..3 {
            game.update(&mut ctx, &input);
        }
        ctx.graph.propagate(&mut ctx.scene);

        let moon = game.moon.unwrap();
        let terra = ctx.scene.find_by_tag("Terra").unwrap().pos;
        let world = ctx.scene.get(moon.entity).unwrap().pos;
        assert!(close(world, terra + moon.orbit.local_position()));
        assert!(((world - terra).length() - bodies::MOON_ORBIT_RADIUS).abs() < 1e-3);
    }

    #[test]
    fn ring_is_tilted_child_of_saturno() {
        let (_, ctx) = setup();
        let ring = ctx.scene.find_by_tag("rings").unwrap();
        let saturno = ctx.scene.find_by_tag("Saturno").unwrap();
        assert_eq!(ctx.graph.get_parent(ring.id), Some(saturno.id));
        assert!(close(ring.pos, saturno.pos));
        assert!(ring.rotation.dot(Quat::from_rotation_x(bodies::RING_TILT)).abs() > 0.9999);

        let mesh = ring.mesh.unwrap();
        assert!(mesh.material.transparent && mesh.material.double_sided);
        match mesh.shape {
            MeshShape::Ring(geometry) => {
                assert_eq!(geometry.inner, 27.0);
                assert_eq!(geometry.outer, 45.0);
                assert!(geometry.count > 0);
            }
            other => panic!("expected a ring, got {:?}", other),
        }
    }

    #[test]
    fn click_selects_planet_and_miss_clears() {
        let (mut game, mut ctx) = setup();
        aim(&mut ctx, Vec3::new(120.0, 0.0, 60.0), Vec3::new(120.0, 0.0, 0.0));

        game.update(&mut ctx, &click((0.0, 0.0)));
        assert_eq!(game.selected(), Some(bodies::TERRA));
        assert_eq!(ctx.events, vec![GameEvent::new(EVENT_SELECTION, 2.0)]);
        let card = game.info_card().unwrap();
        assert_eq!(card.name, "Terra");
        assert_eq!(card.fact, PLANETS[bodies::TERRA].fact);

        // Same selection again: no new event.
        ctx.clear_frame_data();
        ctx.graph.propagate(&mut ctx.scene);
        let terra = ctx.scene.find_by_tag("Terra").unwrap().pos;
        aim(&mut ctx, terra + Vec3::new(0.0, 0.0, 60.0), terra);
        game.update(&mut ctx, &click((0.0, 0.0)));
        assert_eq!(game.selected(), Some(bodies::TERRA));
        assert!(ctx.events.is_empty());

        // Looking away from the system: nothing to hit.
        ctx.clear_frame_data();
        aim(&mut ctx, Vec3::new(0.0, 0.0, 3000.0), Vec3::new(0.0, 0.0, 4000.0));
        game.update(&mut ctx, &click((0.0, 0.0)));
        assert_eq!(game.selected(), None);
        assert!(game.info_card().is_none());
        assert_eq!(ctx.events, vec![GameEvent::new(EVENT_SELECTION, -1.0)]);
    }

    #[test]
    fn sun_and_moon_are_not_pickable() {
        let (mut game, mut ctx) = setup();
        aim(&mut ctx, Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO);
        assert!(ctx.camera.ray_from_ndc(Vec2::ZERO).intersect_sphere(Vec3::ZERO, bodies::SUN_RADIUS).is_some());
        game.update(&mut ctx, &click((0.0, 0.0)));
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn moon_is_not_pickable() {
        let (mut game, mut ctx) = setup();
        let moon = ctx.scene.find_by_tag("moon").unwrap().pos;
        // From above and slightly behind: the ray passes through the moon and
        // then keeps clear of Terra and every other planet.
        aim(&mut ctx, moon + Vec3::new(0.0, 40.0, 5.0), moon);
        assert!(ctx.camera.ray_from_ndc(Vec2::ZERO).intersect_sphere(moon, bodies::MOON_RADIUS).is_some());
        let ndc = ctx.camera.project(moon).unwrap();
        game.update(&mut ctx, &click((ndc.x, ndc.y)));
        assert_eq!(game.selected(), None);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn remount_rebuilds_the_system() {
        let mut runner = astros_web::GameRunner::new(SolarScene::new(7));
        runner.init();
        assert!(runner.start());
        assert!(runner.tick());
        assert_eq!(runner.body_count(), 11);

        runner.teardown();
        assert!(runner.game().planets.is_empty());
        assert!(runner.start());
        assert!(runner.tick());
        assert_eq!(runner.body_count(), 11);
        assert_eq!(runner.game().planets.len(), bodies::PLANET_COUNT);
        assert!(runner.game().moon.is_some());
        assert_eq!(runner.context().textures.len(), 11);
    }

    #[test]
    fn teardown_releases_scene() {
        let (mut game, mut ctx) = setup();
        game.teardown(&mut ctx);
        assert!(ctx.scene.is_empty());
        assert!(ctx.graph.is_empty());
        assert_eq!(ctx.rings.vertex_count(), 0);
        assert!(game.info_card().is_none());
    }
}
