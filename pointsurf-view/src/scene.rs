//! The viewer's model registry

use pointsurf_core::{Aabb, Model};

/// Handle to a model held by a [`Scene`]. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(u64);

/// How a model's geometry is colored
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColoringMethod {
    /// One color for the whole model
    Uniform([f32; 3]),
    /// Blue-to-red ramp along the y axis
    Height,
}

/// Per-model rendering settings
#[derive(Debug, Clone)]
pub struct DrawSettings {
    pub coloring: ColoringMethod,
    pub visible: bool,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            coloring: ColoringMethod::Height,
            visible: true,
        }
    }
}

/// An entry in the registry: the model plus its rendering settings
#[derive(Debug, Clone)]
pub struct ModelEntry {
    pub model: Model,
    pub settings: DrawSettings,
}

/// The registry of models currently displayed, plus the redraw flag the
/// render loop polls.
#[derive(Debug, Default)]
pub struct Scene {
    entries: Vec<(ModelId, ModelEntry)>,
    next_id: u64,
    redraw_requested: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model to the registry, taking ownership, and request a redraw
    pub fn add_model(&mut self, model: Model) -> ModelId {
        let id = ModelId(self.next_id);
        self.next_id += 1;
        self.entries.push((
            id,
            ModelEntry {
                model,
                settings: DrawSettings::default(),
            },
        ));
        self.redraw_requested = true;
        id
    }

    /// Remove a model. Returns false if the id is not in the registry.
    pub fn delete_model(&mut self, id: ModelId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(eid, _)| *eid != id);
        let removed = self.entries.len() != before;
        if removed {
            self.redraw_requested = true;
        }
        removed
    }

    /// Look up a model by id
    pub fn get(&self, id: ModelId) -> Option<&Model> {
        self.entries
            .iter()
            .find(|(eid, _)| *eid == id)
            .map(|(_, entry)| &entry.model)
    }

    /// Mutable model lookup
    pub fn get_mut(&mut self, id: ModelId) -> Option<&mut Model> {
        self.entries
            .iter_mut()
            .find(|(eid, _)| *eid == id)
            .map(|(_, entry)| &mut entry.model)
    }

    /// Rendering settings for a model
    pub fn settings_mut(&mut self, id: ModelId) -> Option<&mut DrawSettings> {
        self.entries
            .iter_mut()
            .find(|(eid, _)| *eid == id)
            .map(|(_, entry)| &mut entry.settings)
    }

    /// Iterate over all entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (ModelId, &ModelEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    /// Number of models in the registry
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bounding box of all models, if any
    pub fn bounding_box(&self) -> Option<Aabb> {
        self.entries
            .iter()
            .map(|(_, entry)| entry.model.bounding_box())
            .reduce(|a, b| a.union(&b))
    }

    /// Ask the render loop for a fresh frame
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Consume the redraw flag
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointsurf_core::{Point3f, PointCloud, TriangleMesh};

    fn cloud() -> Model {
        Model::PointCloud(PointCloud::from_points(vec![Point3f::origin()]))
    }

    #[test]
    fn add_and_delete() {
        let mut scene = Scene::new();
        let id = scene.add_model(cloud());
        assert_eq!(scene.len(), 1);
        assert!(scene.get(id).is_some());

        assert!(scene.delete_model(id));
        assert!(scene.is_empty());
        assert!(scene.get(id).is_none());
        // deleting again is a no-op
        assert!(!scene.delete_model(id));
    }

    #[test]
    fn ids_are_never_reused() {
        let mut scene = Scene::new();
        let a = scene.add_model(cloud());
        scene.delete_model(a);
        let b = scene.add_model(cloud());
        assert_ne!(a, b);
    }

    #[test]
    fn mutations_request_redraw() {
        let mut scene = Scene::new();
        assert!(!scene.take_redraw_request());

        let id = scene.add_model(cloud());
        assert!(scene.take_redraw_request());

        scene.delete_model(id);
        assert!(scene.take_redraw_request());
        assert!(!scene.take_redraw_request());
    }

    #[test]
    fn settings_are_per_model() {
        let mut scene = Scene::new();
        let a = scene.add_model(cloud());
        let b = scene.add_model(Model::Mesh(TriangleMesh::new()));

        scene.settings_mut(a).unwrap().coloring = ColoringMethod::Uniform([1.0, 0.0, 0.0]);
        let b_settings = scene.settings_mut(b).unwrap();
        assert_eq!(b_settings.coloring, ColoringMethod::Height);
    }

    #[test]
    fn scene_bounds_cover_all_models() {
        let mut scene = Scene::new();
        assert!(scene.bounding_box().is_none());

        scene.add_model(Model::PointCloud(PointCloud::from_points(vec![
            Point3f::new(-1.0, 0.0, 0.0),
        ])));
        scene.add_model(Model::PointCloud(PointCloud::from_points(vec![
            Point3f::new(2.0, 3.0, 0.0),
        ])));
        let bb = scene.bounding_box().unwrap();
        assert_eq!(bb.min.x, -1.0);
        assert_eq!(bb.max.y, 3.0);
    }
}
