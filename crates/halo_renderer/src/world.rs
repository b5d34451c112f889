//! Turn a scene description into intersectable geometry.

use halo_core::SceneDescription;

use crate::{HittableList, Material, RenderResult, Sphere};

/// Build the world for a scene description.
///
/// The returned list owns every sphere and material; it is read-only for
/// the rest of the render and dropped as a unit afterwards.
pub fn build_world(scene: &SceneDescription) -> RenderResult<HittableList> {
    let mut world = HittableList::new();
    for sphere in &scene.spheres {
        let material: Box<dyn Material> = (&sphere.material).into();
        world.add(Box::new(Sphere::new(sphere.center, sphere.radius, material)?));
    }
    log::debug!("Built world '{}' with {} spheres", scene.name, world.len());
    Ok(world)
}
