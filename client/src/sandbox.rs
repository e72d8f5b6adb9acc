//! Local stand-in for the replicated world.
//!
//! Spawns a few structures and lets the keyboard play the part of the replication layer:
//! `G` flips every structure's ghost flag, `Up`/`Down` change the ghost transparency and `F`
//! flips the feature switch used by the hover hint.

use crate::ghost::{GhostCapability, GhostVisualSettings, ReplicatedGhost, ReplicatedPolicy};
use bevy::prelude::*;
use shared::{CapabilityKind, Toggle};

const TRANSPARENCY_STEP: f32 = 0.1;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, setup);
    app.add_systems(Update, (toggle_ghosts, adjust_transparency, toggle_feature));
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    info!("Sandbox setup");

    commands.spawn((
        Transform::from_xyz(0., 0., 0.),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(50., 50.).build())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::linear_rgb(0.2, 0.3, 0.25),
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        })),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let wood = materials.add(Color::srgb_u8(150, 111, 51));
    let stone = materials.add(Color::srgb_u8(128, 128, 128));
    let ember = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.4, 0.1),
        emissive: LinearRgba::rgb(4.0, 1.2, 0.2),
        ..default()
    });
    let wall = meshes.add(Cuboid::new(2.0, 2.0, 0.2));
    let hearth = meshes.add(Cuboid::new(1.0, 0.4, 1.0));
    let flame = meshes.add(Sphere::new(0.2));

    for x in [-3.0, 0.0] {
        commands.spawn((
            Name::new("wood_wall"),
            ReplicatedGhost(false),
            Pickable::default(),
            Transform::from_xyz(x, 1.0, 0.0),
            Visibility::default(),
            children![(Mesh3d(wall.clone()), MeshMaterial3d(wood.clone()))],
        ));
    }

    commands.spawn((
        Name::new("fireplace"),
        ReplicatedGhost(false),
        Pickable::default(),
        Transform::from_xyz(4.0, 0.2, 0.0),
        Visibility::default(),
        children![
            (Mesh3d(hearth), MeshMaterial3d(stone)),
            (
                GhostCapability(CapabilityKind::ParticleEmitter),
                Mesh3d(flame),
                MeshMaterial3d(ember),
                Transform::from_xyz(0.0, 0.4, 0.0),
            ),
            (
                GhostCapability(CapabilityKind::Light),
                PointLight {
                    color: Color::srgb(1.0, 0.6, 0.3),
                    intensity: 80_000.0,
                    ..default()
                },
                Transform::from_xyz(0.0, 0.8, 0.0),
            ),
        ],
    ));
}

fn toggle_ghosts(keys: Res<ButtonInput<KeyCode>>, mut structures: Query<&mut ReplicatedGhost>) {
    if !keys.just_pressed(KeyCode::KeyG) {
        return;
    }
    for mut flag in &mut structures {
        flag.0 = !flag.0;
    }
}

fn adjust_transparency(keys: Res<ButtonInput<KeyCode>>, mut settings: ResMut<GhostVisualSettings>) {
    let step = if keys.just_pressed(KeyCode::ArrowUp) {
        TRANSPARENCY_STEP
    } else if keys.just_pressed(KeyCode::ArrowDown) {
        -TRANSPARENCY_STEP
    } else {
        return;
    };
    settings.transparency = (settings.transparency + step).clamp(0.0, 1.0);
    debug!("ghost transparency {:.1}", settings.transparency);
}

fn toggle_feature(keys: Res<ButtonInput<KeyCode>>, mut policy: ResMut<ReplicatedPolicy>) {
    if !keys.just_pressed(KeyCode::KeyF) {
        return;
    }
    policy.0.enabled = Toggle::from(!policy.0.enabled.is_on());
    info!("ghost feature enabled: {}", policy.0.enabled.is_on());
}
