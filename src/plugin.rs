use std::sync::Arc;

use bevy::prelude::*;
use tracing::warn;

use crate::{
    resolver::{CollisionBody, ContactState, Resolution, Resolver, ResolverConfig},
    types::Field,
    utils::{to_point, to_vec3},
};

/// System sets for the collision pipeline.
///
/// Order your integrator against these so it sees this frame's contacts:
///
/// ```rust,ignore
/// app.add_systems(Update, apply_impulses.after(SdfCollisionSet::Resolve));
/// ```
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SdfCollisionSet {
    /// Pushes every [`SdfCollider`] out of the [`SceneField`] and updates its [`Contact`].
    Resolve,
}

/// The distance field colliders are resolved against.
///
/// Insert it as a resource to enable resolution. Replace it to swap the scene;
/// colliders pick up the new field on the next frame.
///
/// ```rust,ignore
/// app.insert_resource(SceneField::new(SphereRing::default()));
/// ```
#[derive(Resource, Clone)]
pub struct SceneField(pub Arc<dyn Field>);

impl SceneField {
    pub fn new<F: Field + 'static>(field: F) -> Self {
        Self(Arc::new(field))
    }
}

/// A spherical collider of `radius` centred on the entity's [`Transform`] translation.
///
/// The scene field lives in world space, so only root entities are resolved.
/// Colliders with a [`ChildOf`] parent are skipped.
#[derive(Component, Debug, Clone, Copy)]
#[require(Transform, Contact)]
pub struct SdfCollider {
    pub radius: f32,
}

impl SdfCollider {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

/// Result of the most recent resolution step for a collider.
///
/// `impulse` is the unit surface normal when a penetration was resolved this frame
/// and zero otherwise. The plugin owns no velocity; apply the impulse in your own
/// integrator.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Contact {
    pub state: ContactState,
    pub impulse: Vec3,
}

/// Runtime configuration for collision resolution.
///
/// Inserted as a resource by [`SdfCollisionPlugin`]. Replace `resolver` with a
/// value from [`ResolverConfig::new`] to retune at runtime.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SdfCollisionConfig {
    pub resolver: ResolverConfig,
}

/// Bevy plugin that keeps [`SdfCollider`]s out of the [`SceneField`].
///
/// With the `auto_resolve` feature enabled, colliders are resolved once per
/// `Update`, in parallel across entities:
///
/// ```text
/// SceneField inserted
///   → resolve_colliders              (SdfCollisionSet::Resolve)
///       Transform pushed out of the surface
///       Contact { state, impulse } rewritten
///   → [your integrator reads Contact]
/// ```
///
/// Without the feature, schedule [`resolve_colliders`] yourself.
pub struct SdfCollisionPlugin {
    /// Initial value for the resolver's finite-difference probe offset.
    pub probe_offset: f32,
}

impl Default for SdfCollisionPlugin {
    fn default() -> Self {
        Self {
            probe_offset: ResolverConfig::default().probe_offset(),
        }
    }
}

impl Plugin for SdfCollisionPlugin {
    fn build(&self, app: &mut App) {
        let resolver = ResolverConfig::new(self.probe_offset).unwrap_or_else(|err| {
            warn!(%err, "invalid probe offset, falling back to the default");
            ResolverConfig::default()
        });
        app.insert_resource(SdfCollisionConfig { resolver });

        #[cfg(feature = "auto_resolve")]
        app.configure_sets(Update, SdfCollisionSet::Resolve).add_systems(
            Update,
            resolve_colliders
                .in_set(SdfCollisionSet::Resolve)
                .run_if(resource_exists::<SceneField>),
        );
    }
}

/// Resolves every [`SdfCollider`] against the [`SceneField`].
///
/// Each entity is written by exactly one task, so the query runs in parallel.
/// Transforms are only touched when a penetration was actually corrected. Child
/// entities are skipped, since their `Transform` is not in world space.
pub fn resolve_colliders(
    config: Res<SdfCollisionConfig>,
    scene: Res<SceneField>,
    mut query: Query<(&SdfCollider, &mut Transform, &mut Contact), Without<ChildOf>>,
) {
    let resolver = Resolver::new(config.resolver);
    let field: &dyn Field = scene.0.as_ref();

    query
        .par_iter_mut()
        .for_each(|(collider, mut transform, mut contact)| {
            let mut body = CollisionBody::new(to_point(transform.translation), collider.radius);
            let resolution = resolver.resolve(&mut body, field);

            if let Resolution::Resolved { correction, .. } = resolution {
                transform.translation += to_vec3(correction);
            }

            let next = Contact {
                state: resolution.state(),
                impulse: to_vec3(resolution.impulse()),
            };
            contact.set_if_neq(next);
        });
}
