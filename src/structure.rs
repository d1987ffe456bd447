//! Validated, immutable description of a beam structure.

use log::{debug, warn};
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::bounds::Bounds;
use crate::errors::GeometryError;
use crate::frame::{LocalFrame, ReferenceHandling, FRAME_TOLERANCE};
use crate::geometry::{Element, Point};
use crate::placement::element_endpoints;

/// Node positions and element connectivity that passed validation.
///
/// Every element references existing nodes, has non-zero length and a
/// reference vector that is not parallel to its axis, so placement and strip
/// generation on a `Structure` cannot fail for geometric reasons.
#[derive(Clone, Debug)]
pub struct Structure {
    /// Node positions, indexed by node number.
    nodes: Vec<Point>,
    /// Elements in input order.
    elements: Vec<Element>,
    /// Connectivity graph; node weights are node numbers, edge weights element positions.
    topology: UnGraph<usize, usize>,
}

impl Structure {
    /// Validate and store a structure.
    ///
    /// # Errors
    ///
    /// Returns the first [`GeometryError`] found, tagged with the offending
    /// element: [`GeometryError::UnknownNode`], [`GeometryError::ZeroLengthElement`]
    /// or [`GeometryError::DegenerateFrame`].
    ///
    /// # Examples
    /// ```
    /// use nalgebra::Vector3;
    /// use trussview::{point, Element, GeometryError, Structure};
    ///
    /// let nodes = vec![point(0.0, 0.0, 0.0), point(0.0, 0.0, 2.0)];
    /// let error = Structure::new(nodes, vec![Element::new(0, 1, Vector3::z())])
    ///     .expect_err("reference vector along the axis");
    /// assert_eq!(error, GeometryError::DegenerateFrame { element: 0 });
    /// ```
    pub fn new(nodes: Vec<Point>, elements: Vec<Element>) -> Result<Self, GeometryError> {
        let mut skewed = 0;
        for (index, element) in elements.iter().enumerate() {
            let (start, end) = element_endpoints(index, element, &nodes)?;
            let axis = end - start;
            if axis.norm() == 0.0 {
                return Err(GeometryError::ZeroLengthElement { element: index });
            }
            let frame = LocalFrame::new(axis, element.reference, ReferenceHandling::AsGiven)
                .ok_or(GeometryError::DegenerateFrame { element: index })?;
            if frame.skew().abs() > FRAME_TOLERANCE {
                skewed += 1;
            }
        }
        if skewed > 0 {
            warn!(
                "{skewed} of {} elements have reference vectors that are not perpendicular to their axis",
                elements.len()
            );
        }

        let mut topology = UnGraph::with_capacity(nodes.len(), elements.len());
        for node in 0..nodes.len() {
            topology.add_node(node);
        }
        for (index, element) in elements.iter().enumerate() {
            topology.add_edge(
                NodeIndex::new(element.start),
                NodeIndex::new(element.end),
                index,
            );
        }

        let structure = Self {
            nodes,
            elements,
            topology,
        };
        let isolated = structure.isolated_nodes();
        if !isolated.is_empty() {
            warn!("{} nodes are not used by any element", isolated.len());
        }
        debug!(
            "validated structure with {} nodes and {} elements",
            structure.node_count(),
            structure.element_count()
        );
        Ok(structure)
    }

    /// Node positions in node order.
    #[must_use]
    pub fn nodes(&self) -> &[Point] {
        &self.nodes
    }

    /// Elements in input order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Return the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Length of every element, in element order.
    #[must_use]
    pub fn element_lengths(&self) -> Vec<f32> {
        self.elements
            .iter()
            .map(|element| {
                (self.nodes[element.end].to_vector() - self.nodes[element.start].to_vector())
                    .norm()
            })
            .collect()
    }

    /// Positions of the elements attached to `node`, in ascending order.
    #[must_use]
    pub fn elements_at(&self, node: usize) -> Vec<usize> {
        if node >= self.nodes.len() {
            return Vec::new();
        }
        let mut attached: Vec<usize> = self
            .topology
            .edges(NodeIndex::new(node))
            .map(|edge| *edge.weight())
            .collect();
        attached.sort_unstable();
        attached.dedup();
        attached
    }

    /// Nodes that no element references.
    #[must_use]
    pub fn isolated_nodes(&self) -> Vec<usize> {
        self.topology
            .node_indices()
            .filter(|&node| self.topology.neighbors(node).next().is_none())
            .map(|node| self.topology[node])
            .collect()
    }

    /// Number of disconnected parts, counting isolated nodes as parts.
    #[must_use]
    pub fn component_count(&self) -> usize {
        connected_components(&self.topology)
    }

    /// Bounding box and centering offset of all nodes.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_nodes(&self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;
    use nalgebra::Vector3;

    fn portal() -> Structure {
        let nodes = vec![
            point(0.0, 0.0, 0.0),
            point(0.0, 3.0, 0.0),
            point(4.0, 3.0, 0.0),
            point(4.0, 0.0, 0.0),
            point(9.0, 9.0, 9.0),
        ];
        let elements = vec![
            Element::new(0, 1, Vector3::x()),
            Element::new(1, 2, Vector3::y()),
            Element::new(2, 3, Vector3::x()),
        ];
        Structure::new(nodes, elements).expect("valid portal frame")
    }

    #[test]
    fn reports_topology() {
        let structure = portal();
        assert_eq!(structure.node_count(), 5);
        assert_eq!(structure.element_count(), 3);
        assert_eq!(structure.elements_at(1), vec![0, 1]);
        assert_eq!(structure.elements_at(3), vec![2]);
        assert!(structure.elements_at(42).is_empty());
        assert_eq!(structure.isolated_nodes(), vec![4]);
        assert_eq!(structure.component_count(), 2);
        assert_eq!(structure.element_lengths(), vec![3.0, 4.0, 3.0]);
    }

    #[test]
    fn rejects_unknown_nodes() {
        let error = Structure::new(
            vec![point(0.0, 0.0, 0.0)],
            vec![Element::new(0, 3, Vector3::y())],
        )
        .expect_err("missing node detected");
        assert_eq!(error, GeometryError::UnknownNode { element: 0, node: 3 });
    }

    #[test]
    fn rejects_zero_length_elements() {
        let nodes = vec![point(1.0, 1.0, 1.0), point(2.0, 1.0, 1.0)];
        let elements = vec![
            Element::new(0, 1, Vector3::y()),
            Element::new(1, 1, Vector3::y()),
        ];
        let error = Structure::new(nodes, elements).expect_err("zero length detected");
        assert_eq!(error, GeometryError::ZeroLengthElement { element: 1 });
    }

    #[test]
    fn rejects_degenerate_reference_vectors() {
        let nodes = vec![point(0.0, 0.0, 0.0), point(1.0, 1.0, 0.0)];
        let elements = vec![Element::new(0, 1, Vector3::new(-2.0, -2.0, 0.0))];
        let error = Structure::new(nodes, elements).expect_err("parallel reference detected");
        assert_eq!(error, GeometryError::DegenerateFrame { element: 0 });
    }
}
