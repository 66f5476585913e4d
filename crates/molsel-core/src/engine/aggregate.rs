use super::manager::StructureSelectionManager;
use crate::core::geometry::boundary::{Boundary, Box3D};
use crate::core::geometry::principal_axes::PrincipalAxes;
use tracing::instrument;

impl StructureSelectionManager {
    /// Total number of selected elements across all structures.
    pub fn element_count(&self) -> usize {
        self.entries.values().map(|e| e.selection().size()).sum()
    }

    /// Bounding box and enclosing sphere of everything selected.
    ///
    /// The per-structure spheres are merged with the manager's own [`BoundaryHelper`], so this
    /// takes `&mut self`. With nothing selected the box is inverted and the sphere is the zero
    /// sphere.
    ///
    /// [`BoundaryHelper`]: crate::core::geometry::boundary::BoundaryHelper
    #[instrument(skip_all, name = "selection_boundary")]
    pub fn get_boundary(&mut self) -> Boundary {
        let boundaries: Vec<Boundary> = self
            .entries
            .values()
            .map(|e| e.selection())
            .filter(|sel| !sel.is_empty())
            .map(|sel| sel.boundary())
            .collect();

        let mut bounding_box = Box3D::empty();
        let helper = &mut self.boundary_helper;
        helper.reset();
        for b in &boundaries {
            bounding_box.union(&b.bounding_box);
            helper.include_position_radius(&b.sphere.center, b.sphere.radius);
        }
        helper.finished_include_step();
        for b in &boundaries {
            helper.radius_position_radius(&b.sphere.center, b.sphere.radius);
        }

        Boundary {
            bounding_box,
            sphere: helper.sphere(),
        }
    }

    /// Principal axes of all selected positions, or `None` when nothing is selected.
    #[instrument(skip_all, name = "selection_principal_axes")]
    pub fn get_principal_axes(&self) -> Option<PrincipalAxes> {
        let mut positions = vec![0.0; 3 * self.element_count()];
        let mut offset = 0;
        for entry in self.entries.values() {
            offset += 3 * entry.selection().to_positions_array(&mut positions, offset);
        }
        PrincipalAxes::of_positions(&positions[..offset])
    }
}
