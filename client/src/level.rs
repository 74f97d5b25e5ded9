//! Level geometry: rendered meshes and the matching Rapier query world.
//!
//! Each [`LevelPiece`] is spawned as a mesh and converted to a [`WorldStaticDef`], so what the
//! player sees and what the controller collides with come from the same data. The query world
//! is built once; level geometry never moves.

use bevy::prelude::*;
use fps_controller::{
    ColliderShapeDef, CollisionLayer, LayerMask, RapierQueryWorld, WorldStaticDef,
};

use crate::bridge::{to_na_quat, to_na_vec3};

/// Collision world for the level, queried by the player every frame.
#[derive(Resource)]
pub struct LevelCollision(pub RapierQueryWorld);

#[derive(Clone, Copy, Debug)]
struct LevelPiece {
    id: u32,
    /// Full box size in meters.
    size: Vec3,
    transform: Transform,
    layer: CollisionLayer,
    color: Color,
}

impl LevelPiece {
    fn to_static_def(self) -> WorldStaticDef {
        WorldStaticDef {
            id: self.id,
            translation: to_na_vec3(self.transform.translation),
            rotation: to_na_quat(self.transform.rotation),
            shape: ColliderShapeDef::Cuboid {
                half_extents: to_na_vec3(self.size * 0.5),
            },
            layers: LayerMask::layer(self.layer),
        }
    }
}

fn level_pieces() -> Vec<LevelPiece> {
    let ground = Color::linear_rgb(0.2, 0.3, 0.25);
    let crate_color = Color::srgb_u8(124, 144, 255);
    let ledge = Color::srgb_u8(180, 150, 110);

    vec![
        // 50 x 50 floor slab, top face at y = 0.
        LevelPiece {
            id: 1,
            size: Vec3::new(50.0, 1.0, 50.0),
            transform: Transform::from_xyz(0.0, -0.5, 0.0),
            layer: CollisionLayer::Ground,
            color: ground,
        },
        // Crates to jump on.
        LevelPiece {
            id: 2,
            size: Vec3::splat(1.0),
            transform: Transform::from_xyz(5.0, 0.5, 0.0),
            layer: CollisionLayer::Ground,
            color: crate_color,
        },
        LevelPiece {
            id: 3,
            size: Vec3::splat(1.0),
            transform: Transform::from_xyz(6.0, 1.5, 1.5),
            layer: CollisionLayer::Ground,
            color: crate_color,
        },
        // A low ceiling to crouch under.
        LevelPiece {
            id: 4,
            size: Vec3::new(4.0, 0.4, 4.0),
            transform: Transform::from_xyz(-6.0, 1.6, -4.0),
            layer: CollisionLayer::Ground,
            color: ledge,
        },
        // A tilted prop on its own layer: it blocks movement but never counts as ground.
        LevelPiece {
            id: 5,
            size: Vec3::new(3.0, 0.3, 3.0),
            transform: Transform::from_xyz(0.0, 0.6, -8.0)
                .with_rotation(Quat::from_rotation_x(0.35)),
            layer: CollisionLayer::Prop,
            color: ledge,
        },
    ]
}

pub(super) fn plugin(app: &mut App) {
    let defs = level_pieces()
        .into_iter()
        .map(LevelPiece::to_static_def)
        .collect();
    app.insert_resource(LevelCollision(RapierQueryWorld::build(defs)));

    app.add_systems(Startup, spawn_level);
}

fn spawn_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for piece in level_pieces() {
        commands.spawn((
            Name::new(format!("LevelPiece{}", piece.id)),
            Mesh3d(meshes.add(Cuboid::from_size(piece.size))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: piece.color,
                perceptual_roughness: 1.0,
                metallic: 0.0,
                ..default()
            })),
            piece.transform,
        ));
    }

    // light
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0),
    ));
}
