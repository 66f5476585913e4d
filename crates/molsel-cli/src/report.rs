use molsel::engine::manager::StructureSelectionManager;
use nalgebra::{Point3, Vector3};

fn point(p: &Point3<f64>) -> String {
    format!("({:.3}, {:.3}, {:.3})", p.x, p.y, p.z)
}

fn vector(v: &Vector3<f64>) -> String {
    format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z)
}

/// Human-readable summary of the manager's selection, history and geometry.
pub fn render(manager: &mut StructureSelectionManager) -> String {
    let stats = manager.stats().clone();
    let mut lines = vec![
        format!("Selection: {}", stats.label),
        format!(
            "Structures: {}, elements: {}",
            stats.structure_count, stats.element_count
        ),
    ];

    let history = manager.additions_history();
    if history.is_empty() {
        lines.push("History: (empty)".to_string());
    } else {
        lines.push("History:".to_string());
        for (i, entry) in history.iter().enumerate() {
            lines.push(format!("  {}. {}", i, entry.label));
        }
    }

    let boundary = manager.get_boundary();
    if boundary.bounding_box.is_empty() {
        lines.push("Boundary: (none)".to_string());
    } else {
        lines.push(format!(
            "Bounding box: {} - {}",
            point(&boundary.bounding_box.min),
            point(&boundary.bounding_box.max)
        ));
        lines.push(format!(
            "Bounding sphere: center {}, radius {:.3}",
            point(&boundary.sphere.center),
            boundary.sphere.radius
        ));
    }

    match manager.get_principal_axes() {
        Some(axes) => {
            let m = axes.moments_axes;
            lines.push(format!(
                "Principal axes: origin {}, a {}, b {}, c {}",
                point(&m.origin),
                vector(&m.dir_a),
                vector(&m.dir_b),
                vector(&m.dir_c)
            ));
        }
        None => lines.push("Principal axes: (none)".to_string()),
    }

    lines.join("\n")
}
