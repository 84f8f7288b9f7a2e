//! Bevy 2D viewer
//!
//! A thin adapter over [`SimulationRun`]: one `tick` per rendered frame,
//! bodies drawn as labelled circles, trails drawn as gizmo line strips. The
//! run starts paused. Simulation y grows downward on screen.
//!
//! Controls: Space play/pause, R reset, Up/Down speed, 1/2 load a preset.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::sprite::{Anchor, MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;
use log::{info, warn};

use crate::simulation::run::SimulationRun;
use crate::simulation::scenario::Preset;
use crate::simulation::states::{Body, NVec2};

/// Reference viewport used to frame a scenario
pub const VIEW_WIDTH: f64 = 800.0;
pub const VIEW_HEIGHT: f64 = 600.0;

const TRAIL_ALPHA: f32 = 0.7;
const SPEED_FACTOR: f64 = 1.25;
const LABEL_FONT_SIZE: f32 = 11.0;
const LABEL_GAP: f32 = 5.0;

#[derive(Component)]
struct BodyIndex(pub usize);

#[derive(Component)]
struct BodyLabel(pub usize);

/// Four-line readout drawn next to a body
pub fn body_label(body: &Body) -> String {
    format!(
        "{}\nMass: {:.1}\nPos: ({:.1}, {:.1})\nVel: ({:.1}, {:.1})",
        body.name, body.m, body.x.x, body.x.y, body.v.x, body.v.y
    )
}

/// World-to-screen mapping fixed when a run is (re)initialized
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFrame {
    pub center: NVec2,
    pub scale: f64,
}

impl ViewFrame {
    /// Centre on the bounding box of `bodies` and zoom out until it fits in
    /// two thirds of the viewport. Never zooms in past 1:1.
    pub fn fit(bodies: &[Body]) -> Self {
        if bodies.is_empty() {
            return Self { center: NVec2::zeros(), scale: 1.0 };
        }

        let (min, max) = bodies.iter().fold(
            (NVec2::repeat(f64::INFINITY), NVec2::repeat(f64::NEG_INFINITY)),
            |(min, max), b| (min.inf(&b.x), max.sup(&b.x)),
        );

        let center = (min + max) * 0.5;
        let spread_x = (max.x - min.x).max(1.0);
        let spread_y = (max.y - min.y).max(1.0);

        let scale_x = VIEW_WIDTH / (spread_x * 1.5);
        let scale_y = VIEW_HEIGHT / (spread_y * 1.5);

        Self {
            center,
            scale: scale_x.min(scale_y).min(1.0),
        }
    }

    /// Screen position relative to the window centre, bevy y-up
    pub fn to_screen(&self, p: &NVec2) -> Vec2 {
        let s = (p - self.center) * self.scale;
        Vec2::new(s.x as f32, -s.y as f32)
    }

    /// On-screen radius; grows with the square root of the zoom
    pub fn screen_radius(&self, radius: f64) -> f32 {
        (radius * self.scale.sqrt()) as f32
    }
}

#[derive(Resource)]
struct Viewer {
    run: SimulationRun,
    frame: ViewFrame,
}

impl Viewer {
    fn refit(&mut self) {
        if let Some(system) = self.run.snapshot() {
            self.frame = ViewFrame::fit(&system.bodies);
        }
    }
}

pub fn run_2d(run: SimulationRun) {
    let bodies = run.snapshot().map_or(0, |s| s.bodies.len());
    info!("run_2d: starting Bevy 2D viewer with {bodies} bodies");

    let mut viewer = Viewer {
        run,
        frame: ViewFrame { center: NVec2::zeros(), scale: 1.0 },
    };
    viewer.refit();

    App::new()
        .insert_resource(viewer)
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "tbsim".into(),
                        resolution: (VIEW_WIDTH as f32, VIEW_HEIGHT as f32).into(),
                        ..default()
                    }),
                    ..default()
                })
                // logging goes through env_logger
                .disable::<LogPlugin>(),
        )
        .add_systems(Startup, setup_system)
        .add_systems(
            Update,
            (
                controls_system,
                physics_step_system,
                sync_transforms_system,
                draw_trails_system,
            )
                .chain(),
        )
        .run();
}

fn setup_system(
    mut commands: Commands,
    viewer: Res<Viewer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2dBundle::default());
    spawn_bodies(&mut commands, &viewer, &mut meshes, &mut materials);
}

fn spawn_bodies(
    commands: &mut Commands,
    viewer: &Viewer,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
) {
    let Some(system) = viewer.run.snapshot() else {
        return;
    };

    for (i, body) in system.bodies.iter().enumerate() {
        let [r, g, b] = body.color;
        let p = viewer.frame.to_screen(&body.x);
        let radius = viewer.frame.screen_radius(body.radius);

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(radius))),
                material: materials.add(ColorMaterial::from(Color::srgb(r, g, b))),
                transform: Transform::from_xyz(p.x, p.y, 1.0),
                ..Default::default()
            },
            BodyIndex(i),
        ));

        commands.spawn((
            Text2dBundle {
                text: Text::from_section(
                    body_label(body),
                    TextStyle {
                        font_size: LABEL_FONT_SIZE,
                        color: Color::srgba(0.85, 0.87, 0.9, 0.9),
                        ..default()
                    },
                ),
                text_anchor: Anchor::CenterLeft,
                transform: Transform::from_xyz(p.x + radius + LABEL_GAP, p.y, 2.0),
                ..default()
            },
            BodyLabel(i),
        ));
    }
}

fn controls_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut viewer: ResMut<Viewer>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    spawned: Query<Entity, Or<(With<BodyIndex>, With<BodyLabel>)>>,
) {
    if keys.just_pressed(KeyCode::Space) {
        if let Err(e) = viewer.run.toggle() {
            warn!("play/pause ignored: {e}");
        }
    }

    if keys.just_pressed(KeyCode::ArrowUp) || keys.just_pressed(KeyCode::ArrowDown) {
        let factor = if keys.just_pressed(KeyCode::ArrowUp) { SPEED_FACTOR } else { 1.0 / SPEED_FACTOR };
        let requested = viewer.run.speed() * factor;
        match viewer.run.set_speed(requested) {
            Ok(speed) => info!("speed {speed:.2}x"),
            Err(e) => warn!("speed change ignored: {e}"),
        }
    }

    let reload = if keys.just_pressed(KeyCode::KeyR) {
        viewer.run.reset()
    } else if keys.just_pressed(KeyCode::Digit1) {
        viewer.run.load(Preset::SunAndTwoPlanets.conditions())
    } else if keys.just_pressed(KeyCode::Digit2) {
        viewer.run.load(Preset::FigureEight.conditions())
    } else {
        return;
    };

    if let Err(e) = reload {
        warn!("reload failed: {e}");
        return;
    }

    // masses may have changed, so rebuild the meshes
    viewer.refit();
    for entity in &spawned {
        commands.entity(entity).despawn();
    }
    spawn_bodies(&mut commands, &viewer, &mut meshes, &mut materials);
}

fn physics_step_system(mut viewer: ResMut<Viewer>) {
    viewer.run.tick();
}

fn sync_transforms_system(
    viewer: Res<Viewer>,
    mut bodies: Query<(&BodyIndex, &mut Transform), Without<BodyLabel>>,
    mut labels: Query<(&BodyLabel, &mut Transform, &mut Text), Without<BodyIndex>>,
) {
    let Some(system) = viewer.run.snapshot() else {
        return;
    };
    for (BodyIndex(i), mut transform) in &mut bodies {
        if let Some(b) = system.bodies.get(*i) {
            let p = viewer.frame.to_screen(&b.x);
            transform.translation.x = p.x;
            transform.translation.y = p.y;
        }
    }
    for (BodyLabel(i), mut transform, mut text) in &mut labels {
        if let Some(b) = system.bodies.get(*i) {
            let p = viewer.frame.to_screen(&b.x);
            transform.translation.x = p.x + viewer.frame.screen_radius(b.radius) + LABEL_GAP;
            transform.translation.y = p.y;
            if let Some(section) = text.sections.first_mut() {
                section.value = body_label(b);
            }
        }
    }
}

fn draw_trails_system(viewer: Res<Viewer>, mut gizmos: Gizmos) {
    let Some(system) = viewer.run.snapshot() else {
        return;
    };
    for b in &system.bodies {
        if b.trail.len() < 2 {
            continue;
        }
        let [r, g, bl] = b.color;
        gizmos.linestrip_2d(
            b.trail.iter().map(|p| viewer.frame.to_screen(p)),
            Color::srgba(r, g, bl, TRAIL_ALPHA),
        );
    }
}
