//! # Design Graph
//!
//! Nodes and beams as the player edits them. Every mutation goes through
//! [`Design`], which keeps two invariants: a beam never joins a node to
//! itself, and no unordered node pair is joined twice.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DesignError;
use crate::material::Material;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BeamId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for BeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// A joint of the structure, in world meters (y up).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
    /// Anchors are bolted to the terrain and never move.
    pub anchor: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    pub id: BeamId,
    pub a: NodeId,
    pub b: NodeId,
    pub material: Material,
}

impl Beam {
    /// Whether this beam joins `p` and `q`, in either order.
    #[must_use]
    pub fn joins(&self, p: NodeId, q: NodeId) -> bool {
        (self.a == p && self.b == q) || (self.a == q && self.b == p)
    }

    #[must_use]
    pub fn touches(&self, node: NodeId) -> bool {
        self.a == node || self.b == node
    }
}

/// The player's structure: the only input the simulation takes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Design {
    nodes: Vec<Node>,
    beams: Vec<Beam>,
    next_id: u32,
}

impl Design {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a design from records produced elsewhere, without any
    /// checking. Beams may reference nodes that do not exist; the
    /// simulation skips those.
    #[must_use]
    pub fn from_raw_parts(nodes: Vec<Node>, beams: Vec<Beam>) -> Self {
        let next_id = nodes
            .iter()
            .map(|n| n.id.0)
            .chain(beams.iter().map(|b| b.id.0))
            .max()
            .map_or(0, |max| max + 1);
        Self {
            nodes,
            beams,
            next_id,
        }
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn beams(&self) -> &[Beam] {
        &self.beams
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    #[must_use]
    pub fn beam(&self, id: BeamId) -> Option<&Beam> {
        self.beams.iter().find(|b| b.id == id)
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn add_node(&mut self, x: f32, y: f32, anchor: bool) -> NodeId {
        let id = NodeId(self.allocate_id());
        self.nodes.push(Node { id, x, y, anchor });
        id
    }

    /// Connect two existing nodes.
    ///
    /// # Errors
    ///
    /// [`DesignError::SelfLoop`], [`DesignError::UnknownNode`] or
    /// [`DesignError::DuplicateBeam`] when the beam would break the graph
    /// invariants; the design is left untouched.
    pub fn add_beam(&mut self, a: NodeId, b: NodeId, material: Material) -> Result<BeamId, DesignError> {
        if a == b {
            return Err(DesignError::SelfLoop(a));
        }
        for id in [a, b] {
            if self.node(id).is_none() {
                return Err(DesignError::UnknownNode(id));
            }
        }
        if self.beams.iter().any(|beam| beam.joins(a, b)) {
            return Err(DesignError::DuplicateBeam(a, b));
        }

        let id = BeamId(self.allocate_id());
        self.beams.push(Beam { id, a, b, material });
        Ok(id)
    }

    /// Delete a node together with every beam touching it. Returns the ids
    /// of the removed beams.
    ///
    /// # Errors
    ///
    /// [`DesignError::UnknownNode`] if there is no such node.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Vec<BeamId>, DesignError> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or(DesignError::UnknownNode(id))?;
        self.nodes.remove(index);

        let removed: Vec<BeamId> = self
            .beams
            .iter()
            .filter(|beam| beam.touches(id))
            .map(|beam| beam.id)
            .collect();
        self.beams.retain(|beam| !beam.touches(id));
        tracing::debug!(node = %id, cascaded = removed.len(), "node removed");
        Ok(removed)
    }

    /// # Errors
    ///
    /// [`DesignError::UnknownBeam`] if there is no such beam.
    pub fn remove_beam(&mut self, id: BeamId) -> Result<Beam, DesignError> {
        let index = self
            .beams
            .iter()
            .position(|b| b.id == id)
            .ok_or(DesignError::UnknownBeam(id))?;
        Ok(self.beams.remove(index))
    }

    /// Distance between the beam's endpoints, `None` if one is missing.
    #[must_use]
    pub fn beam_length(&self, beam: &Beam) -> Option<f32> {
        let a = self.node(beam.a)?;
        let b = self.node(beam.b)?;
        Some((b.x - a.x).hypot(b.y - a.y))
    }

    #[must_use]
    pub fn beam_cost(&self, beam: &Beam) -> f32 {
        self.beam_length(beam)
            .map_or(0.0, |length| beam.material.cost(length))
    }

    #[must_use]
    pub fn total_cost(&self) -> f32 {
        self.beams.iter().map(|beam| self.beam_cost(beam)).sum()
    }

    #[must_use]
    pub fn has_road(&self) -> bool {
        self.beams.iter().any(|beam| beam.material.is_road())
    }

    /// The editor's gate in front of "Play Test": the design must fit the
    /// budget and carry at least one road beam. The simulation itself never
    /// looks at cost.
    ///
    /// # Errors
    ///
    /// [`DesignError::OverBudget`] or [`DesignError::NoRoad`].
    pub fn validate_for_play(&self, budget: f32) -> Result<(), DesignError> {
        let cost = self.total_cost();
        if cost > budget {
            return Err(DesignError::OverBudget { cost, budget });
        }
        if !self.has_road() {
            return Err(DesignError::NoRoad);
        }
        Ok(())
    }
}
