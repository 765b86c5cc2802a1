//! Movement domain: debug-only test room and player spawn.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{Character, GameLayer, Ground, Player, Wall};

const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);

pub(crate) fn spawn_player(mut commands: Commands) {
    let start = Vec2::new(-200.0, -150.0);
    commands.spawn((
        Player,
        Character::new(start, PLAYER_SIZE * 0.5, true),
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(start.x, start.y, 1.0),
        // Moved by the movement engines; the physics step never integrates it
        RigidBody::Kinematic,
        Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
        CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Wall]),
    ));
    info!("Spawned player with mag-grip at {:?}", start);
}

#[derive(Clone, Copy)]
enum Surface {
    Floor,
    Climbable,
}

fn spawn_block(commands: &mut Commands, surface: Surface, center: Vec2, size: Vec2) {
    let (layer, color) = match surface {
        Surface::Floor => (GameLayer::Ground, Color::srgb(0.4, 0.5, 0.4)),
        Surface::Climbable => (GameLayer::Wall, Color::srgb(0.3, 0.3, 0.4)),
    };
    let mut block = commands.spawn((
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(layer, [GameLayer::Player]),
    ));
    match surface {
        Surface::Floor => block.insert(Ground),
        Surface::Climbable => block.insert(Wall),
    };
}

pub(crate) fn spawn_test_room(mut commands: Commands) {
    // Floor, split in two tiles so seams are exercised
    spawn_block(
        &mut commands,
        Surface::Floor,
        Vec2::new(-200.0, -200.0),
        Vec2::new(400.0, 40.0),
    );
    spawn_block(
        &mut commands,
        Surface::Floor,
        Vec2::new(200.0, -200.0),
        Vec2::new(400.0, 40.0),
    );

    // Outer walls
    spawn_block(
        &mut commands,
        Surface::Climbable,
        Vec2::new(-420.0, 50.0),
        Vec2::new(40.0, 500.0),
    );
    spawn_block(
        &mut commands,
        Surface::Climbable,
        Vec2::new(420.0, 50.0),
        Vec2::new(40.0, 500.0),
    );

    // Thin platforms: too short to grab, fine to land on
    spawn_block(
        &mut commands,
        Surface::Floor,
        Vec2::new(-250.0, -50.0),
        Vec2::new(150.0, 20.0),
    );
    spawn_block(
        &mut commands,
        Surface::Floor,
        Vec2::new(250.0, 50.0),
        Vec2::new(150.0, 20.0),
    );

    // Climbing pillar with a vaultable top
    spawn_block(
        &mut commands,
        Surface::Climbable,
        Vec2::new(-60.0, -80.0),
        Vec2::new(60.0, 200.0),
    );

    // Raised step for climbing up from a hang
    spawn_block(
        &mut commands,
        Surface::Climbable,
        Vec2::new(120.0, -140.0),
        Vec2::new(80.0, 80.0),
    );
}
