//! Headless demo: a glider flies forward under gravity through the sphere ring scene,
//! bouncing off the ground and the spheres.
//!
//! ```text
//! cargo run --example glider
//! ```

use bevy::prelude::*;
use sdf_collide::{
    SdfCollisionPlugin,
    plugin::{Contact, SceneField, SdfCollider, SdfCollisionSet},
    resolver::ContactState,
    scene::SphereRing,
};

const DT: f32 = 1.0 / 60.0;
const FRAMES: usize = 600;
const GRAVITY: f32 = -9.81;
/// Speed added along the contact normal for each resolved contact.
const BOUNCE: f32 = 1.0;

#[derive(Component)]
struct Velocity(Vec3);

fn main() {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        bevy::log::LogPlugin::default(),
        SdfCollisionPlugin::default(),
    ))
    .insert_resource(SceneField::new(SphereRing::default()))
    .add_systems(Startup, setup)
    .add_systems(
        Update,
        (
            glide.before(SdfCollisionSet::Resolve),
            apply_impulses.after(SdfCollisionSet::Resolve),
        ),
    );

    for frame in 0..FRAMES {
        app.update();
        if frame % 60 == 0 {
            report(&mut app, frame);
        }
    }
}

fn setup(mut commands: Commands) {
    info!("Glider demo");

    commands.spawn((
        SdfCollider::new(0.5),
        Transform::from_xyz(-6.0, 3.0, 4.0),
        Velocity(Vec3::new(3.0, 0.0, 0.0)),
    ));
}

fn glide(mut query: Query<(&mut Transform, &mut Velocity)>) {
    for (mut transform, mut velocity) in query.iter_mut() {
        velocity.0.y += GRAVITY * DT;
        transform.translation += velocity.0 * DT;
    }
}

fn apply_impulses(mut query: Query<(&Contact, &mut Velocity)>) {
    for (contact, mut velocity) in query.iter_mut() {
        if contact.state == ContactState::Penetrating {
            // Drop the inward component, then kick outwards along the normal.
            let into_surface = velocity.0.dot(contact.impulse).min(0.0);
            velocity.0 += contact.impulse * (BOUNCE - into_surface);
        }
    }
}

fn report(app: &mut App, frame: usize) {
    let mut query = app
        .world_mut()
        .query::<(&Transform, &Velocity, &Contact)>();
    for (transform, velocity, contact) in query.iter(app.world()) {
        info!(
            frame,
            position = ?transform.translation,
            velocity = ?velocity.0,
            state = ?contact.state,
            "glider"
        );
    }
}
