use crate::animation::AnimationState;
use crate::transform::{Rider, model_matrix, model_view};
use carousel_common::MeshId;
use glam::Mat4;
use serde::Serialize;

/// One draw call: which mesh, and the modelview matrix to upload for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawItem {
    pub mesh: MeshId,
    pub model_view: Mat4,
}

/// The ordered draw calls for one view of one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawList {
    items: Vec<DrawItem>,
}

impl DrawList {
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawItem> {
        self.items.iter()
    }

    pub fn push(&mut self, mesh: MeshId, model_view: Mat4) {
        self.items.push(DrawItem { mesh, model_view });
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawItem;
    type IntoIter = std::slice::Iter<'a, DrawItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Build the frame's draw list for `view`.
///
/// The roof, ground and poles share `view × spin`; each rider then gets
/// `view × spin × model` with its current bob offset.
pub fn compose_frame(view: Mat4, state: &AnimationState, riders: &[Rider]) -> DrawList {
    let spin = state.spin_matrix();
    let structure = view * spin;

    let mut list = DrawList {
        items: Vec::with_capacity(3 + riders.len()),
    };
    for mesh in [MeshId::Roof, MeshId::Ground, MeshId::Poles] {
        list.push(mesh, structure);
    }
    for (i, rider) in riders.iter().enumerate() {
        let model = model_matrix(rider, state.offset(i));
        list.push(MeshId::Animal(rider.animal), model_view(view, spin, model));
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use carousel_common::Animal;
    use glam::Vec3;

    fn riders() -> Vec<Rider> {
        vec![
            Rider::new(Animal::Cow, Vec3::new(0.0, 0.0, 4.0), 3.6),
            Rider::new(Animal::Hippo, Vec3::new(4.0, 0.0, 0.0), 1.2),
            Rider::new(Animal::Lion, Vec3::new(-4.0, 0.0, 0.0), 3.6),
            Rider::new(Animal::Skeleton, Vec3::new(0.0, 0.0, -4.0), 2.4),
        ]
    }

    #[test]
    fn order_is_structure_then_riders() {
        let riders = riders();
        let state = AnimationState::new(45.0, riders.iter().map(|r| r.phase).collect());
        let list = compose_frame(Mat4::IDENTITY, &state, &riders);
        let meshes: Vec<MeshId> = list.iter().map(|d| d.mesh).collect();
        assert_eq!(meshes, MeshId::ALL.to_vec());
    }

    #[test]
    fn structure_uses_view_times_spin() {
        let riders = riders();
        let mut state = AnimationState::new(45.0, vec![0.0; 4]);
        state.update(1.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        let list = compose_frame(view, &state, &riders);
        let expected = view * state.spin_matrix();
        for item in &list.items()[..3] {
            assert_eq!(item.model_view, expected);
        }
    }

    #[test]
    fn riders_pick_up_their_offsets() {
        let riders = riders();
        let mut state = AnimationState::new(45.0, riders.iter().map(|r| r.phase).collect());
        state.update(0.0);
        let list = compose_frame(Mat4::IDENTITY, &state, &riders);
        let cow = list.items()[3].model_view.w_axis.truncate();
        assert!((cow - Vec3::new(0.0, state.offset(0), 4.0)).length() < 1e-5);
        let skel = list.items()[6].model_view.w_axis.truncate();
        assert!((skel.y - (state.offset(3) + 0.4)).abs() < 1e-5);
    }

    #[test]
    fn empty_rider_list_draws_only_structure() {
        let state = AnimationState::new(45.0, Vec::new());
        let list = compose_frame(Mat4::IDENTITY, &state, &[]);
        assert_eq!(list.len(), 3);
    }
}
