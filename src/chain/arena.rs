use glam::Vec3;

use super::node::{ChainHead, ChainNode, NodeId, NodeKind};
use crate::math::{OrthonormalFrame, VectorExt};

/// What to do when removing a node would leave its neighbours with clashing axes
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RemovalPolicy {
    /// Leave the chain untouched and keep the node
    #[default]
    Reject,
    /// Drop the node and everything after it
    ForceTruncate,
}

/// Result of [`ChainArena::remove`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Removal {
    /// Interior or tail node removed; `prev` now links to `next`
    Relinked { prev: NodeId, next: Option<NodeId> },
    /// Relink clashed and the caller forced removal; `dropped` nodes were released
    Truncated { prev: NodeId, dropped: usize },
    /// Relink clashed; nothing changed
    Rejected,
    /// A head was removed and its successor took over as head
    Promoted { new_head: NodeId },
    /// A lone head was removed; its pipe no longer exists
    Emptied,
    /// The handle no longer refers to a live node
    Missing,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<ChainNode>,
}

/// Storage for every node of every pipe.
///
/// `next` links own their target: whatever is unlinked from a forward link is
/// released. `prev` links are plain handles checked on every access.
#[derive(Debug, Default)]
pub struct ChainArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl ChainArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn insert(&mut self, node: ChainNode) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index: (self.slots.len() - 1) as u32,
                generation: 0,
            }
        }
    }

    pub fn spawn_head(&mut self, position: Vec3) -> NodeId {
        self.insert(ChainNode::head(position))
    }

    pub fn spawn_segment(&mut self, angle: f32, axis: Vec3) -> NodeId {
        self.insert(ChainNode::segment(angle, axis))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&ChainNode> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ChainNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn head(&self, id: NodeId) -> Option<&ChainHead> {
        self.get(id).and_then(ChainNode::as_head)
    }

    pub fn head_mut(&mut self, id: NodeId) -> Option<&mut ChainHead> {
        self.get_mut(id).and_then(ChainNode::as_head_mut)
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.next.filter(|next| self.contains(*next))
    }

    /// Predecessor, only if it is still alive and still links forward to `id`
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        let prev = self.get(id)?.prev?;
        (self.get(prev)?.next == Some(id)).then_some(prev)
    }

    /// Replaces the forward link of `id`.
    ///
    /// `None` always succeeds and releases the old remainder of the chain.
    /// `Some(candidate)` fails, leaving everything unchanged, when the candidate
    /// is `id` itself, a head, already upstream of `id`, or would sit back
    /// inside `id` (its axis is the negation of `id`'s axis).
    pub fn set_next(&mut self, id: NodeId, candidate: Option<NodeId>) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };
        let old = node.next;
        if let Some(candidate) = candidate {
            if !self.accepts_next(id, node.axis, candidate) {
                return false;
            }
        }
        if old == candidate {
            return true;
        }

        if let Some(candidate) = candidate {
            if let Some(owner) = self.owner_of(candidate) {
                if let Some(owner) = self.get_mut(owner) {
                    owner.next = None;
                }
            }
        }
        if let Some(node) = self.get_mut(id) {
            node.next = candidate;
        }
        if let Some(old) = old {
            self.release_until(old, candidate);
        }
        true
    }

    /// Installs `candidate` as the back-reference of `id`, but only if the
    /// candidate's forward link already resolves to `id`.
    pub fn set_prev(&mut self, id: NodeId, candidate: Option<NodeId>) -> bool {
        let Some(candidate) = candidate else {
            return false;
        };
        let links_here = self
            .get(candidate)
            .is_some_and(|prev| prev.next == Some(id));
        match self.get_mut(id) {
            Some(node) if links_here => {
                node.prev = Some(candidate);
                true
            }
            _ => false,
        }
    }

    /// Forward link followed by the matching back-reference
    pub fn link(&mut self, prev: NodeId, next: NodeId) -> bool {
        self.set_next(prev, Some(next)) && self.set_prev(next, Some(prev))
    }

    fn accepts_next(&self, id: NodeId, axis: Vec3, candidate: NodeId) -> bool {
        if candidate == id {
            return false;
        }
        let Some(node) = self.get(candidate) else {
            return false;
        };
        if node.is_head() || node.axis.approx_eq(&-axis) {
            return false;
        }
        !self.iter_from(candidate).any(|downstream| downstream == id)
    }

    fn owner_of(&self, id: NodeId) -> Option<NodeId> {
        if let Some(prev) = self.prev(id) {
            return Some(prev);
        }
        self.slots.iter().enumerate().find_map(|(index, slot)| {
            let node = slot.node.as_ref()?;
            (node.next == Some(id)).then_some(NodeId {
                index: index as u32,
                generation: slot.generation,
            })
        })
    }

    fn free_slot(&mut self, id: NodeId) -> Option<ChainNode> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(node)
    }

    fn release_until(&mut self, start: NodeId, stop: Option<NodeId>) -> usize {
        let mut released = 0;
        let mut cursor = Some(start);
        while let Some(id) = cursor {
            if Some(id) == stop {
                break;
            }
            match self.free_slot(id) {
                Some(node) => {
                    released += 1;
                    cursor = node.next;
                }
                None => break,
            }
        }
        released
    }

    /// Releases `start` and every node after it. Returns how many were freed.
    pub fn release_chain(&mut self, start: NodeId) -> usize {
        if let Some(owner) = self.owner_of(start) {
            if let Some(owner) = self.get_mut(owner) {
                owner.next = None;
            }
        }
        self.release_until(start, None)
    }

    /// Twists a segment about its own axis. Heads have no axis and are left alone.
    pub fn rotate(&mut self, id: NodeId, delta: f32) -> bool {
        match self.get_mut(id) {
            Some(node) if node.axis != Vec3::ZERO => {
                node.angle += delta;
                true
            }
            _ => false,
        }
    }

    pub fn set_active(&mut self, id: NodeId, active: bool) {
        if let Some(node) = self.get_mut(id) {
            node.active = active;
        }
    }

    /// Walks forward links starting at (and including) `start`
    pub fn iter_from(&self, start: NodeId) -> ChainIter<'_> {
        ChainIter {
            arena: self,
            cursor: self.contains(start).then_some(start),
        }
    }

    pub fn tail(&self, start: NodeId) -> Option<NodeId> {
        self.iter_from(start).last()
    }

    /// Walks back-references until a node without a valid predecessor
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.contains(id).then_some(id)?;
        while let Some(prev) = self.prev(current) {
            current = prev;
        }
        Some(current)
    }

    /// Removes one node, relinking its neighbours.
    ///
    /// Heads hand over to their successor; segments ask their predecessor to
    /// adopt their successor and fall back to `policy` if that clashes.
    pub fn remove(&mut self, id: NodeId, policy: RemovalPolicy) -> Removal {
        let Some(node) = self.get(id) else {
            return Removal::Missing;
        };
        let next = self.next(id);

        if node.is_head() {
            return match next {
                Some(successor) => {
                    self.promote(id, successor);
                    Removal::Promoted {
                        new_head: successor,
                    }
                }
                None => {
                    self.free_slot(id);
                    Removal::Emptied
                }
            };
        }

        let Some(prev) = self.owner_of(id) else {
            // Orphaned segment, not reachable from any head
            let dropped = self.release_chain(id);
            log::debug!("released {} orphaned node(s)", dropped);
            return Removal::Emptied;
        };

        if self.set_next(prev, next) {
            if let Some(next) = next {
                self.set_prev(next, Some(prev));
            }
            return Removal::Relinked { prev, next };
        }

        match policy {
            RemovalPolicy::Reject => Removal::Rejected,
            RemovalPolicy::ForceTruncate => {
                let dropped = self.release_chain(id);
                Removal::Truncated { prev, dropped }
            }
        }
    }

    /// Turns `successor` into the head of the chain, keeping its world placement,
    /// and frees the old head.
    fn promote(&mut self, old_head: NodeId, successor: NodeId) {
        let Some(head) = self.head(old_head).copied() else {
            return;
        };
        let Some(node) = self.get(successor) else {
            return;
        };
        let basis = head.rotation_matrix();
        let local = node.local_rotation();
        let position = head.position() + basis.transform_vector3(node.axis);
        let forward = basis.transform_vector3(local.rotate(Vec3::Z));
        let right = basis.transform_vector3(local.rotate(Vec3::X));
        let promoted = ChainHead::with_frame(
            position,
            OrthonormalFrame::from_forward_right(forward, right),
        );

        if let Some(old) = self.get_mut(old_head) {
            old.next = None;
        }
        self.free_slot(old_head);

        if let Some(node) = self.get_mut(successor) {
            node.kind = NodeKind::Head(promoted);
            node.axis = Vec3::ZERO;
            node.angle = 0.0;
            node.prev = None;
        }
    }
}

/// Forward iterator over node handles
pub struct ChainIter<'a> {
    arena: &'a ChainArena,
    cursor: Option<NodeId>,
}

impl Iterator for ChainIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.cursor?;
        self.cursor = self.arena.next(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(arena: &mut ChainArena, axes: &[Vec3]) -> (NodeId, Vec<NodeId>) {
        let head = arena.spawn_head(Vec3::ZERO);
        let mut last = head;
        let mut nodes = Vec::new();
        for axis in axes {
            let node = arena.spawn_segment(0.0, *axis);
            assert!(arena.link(last, node), "failed to link {:?}", axis);
            nodes.push(node);
            last = node;
        }
        (head, nodes)
    }

    #[test]
    fn test_insert_and_get() {
        let mut arena = ChainArena::new();
        let id = arena.spawn_segment(0.5, Vec3::Y);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(id).unwrap().angle(), 0.5);
    }

    #[test]
    fn test_stale_handle_after_slot_reuse() {
        let mut arena = ChainArena::new();
        let head = arena.spawn_head(Vec3::ZERO);
        assert_eq!(arena.remove(head, RemovalPolicy::Reject), Removal::Emptied);
        let reused = arena.spawn_head(Vec3::ONE);
        assert_eq!(reused.index, head.index);
        assert!(arena.get(head).is_none());
        assert!(arena.get(reused).is_some());
    }

    #[test]
    fn test_self_link_rejected() {
        let mut arena = ChainArena::new();
        let node = arena.spawn_segment(0.0, Vec3::Y);
        assert!(!arena.set_next(node, Some(node)));
        assert_eq!(arena.next(node), None);
    }

    #[test]
    fn test_negated_axis_rejected() {
        let mut arena = ChainArena::new();
        let a = arena.spawn_segment(0.0, Vec3::X);
        let b = arena.spawn_segment(0.0, Vec3::NEG_X);
        assert!(!arena.set_next(a, Some(b)));
        assert_eq!(arena.next(a), None);
        assert_eq!(arena.prev(b), None);
    }

    #[test]
    fn test_head_cannot_be_linked() {
        let mut arena = ChainArena::new();
        let a = arena.spawn_segment(0.0, Vec3::X);
        let head = arena.spawn_head(Vec3::ZERO);
        assert!(!arena.set_next(a, Some(head)));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut arena = ChainArena::new();
        let (_, nodes) = chain(&mut arena, &[Vec3::Y, Vec3::Z, Vec3::X]);
        assert!(!arena.set_next(nodes[2], Some(nodes[0])));
        assert_eq!(arena.next(nodes[2]), None);
    }

    #[test]
    fn test_sever_releases_remainder() {
        let mut arena = ChainArena::new();
        let (head, nodes) = chain(&mut arena, &[Vec3::Y, Vec3::Z, Vec3::X]);
        assert_eq!(arena.len(), 4);
        assert!(arena.set_next(nodes[0], None));
        assert_eq!(arena.len(), 2);
        assert!(!arena.contains(nodes[1]));
        assert!(!arena.contains(nodes[2]));
        assert_eq!(arena.iter_from(head).count(), 2);
    }

    #[test]
    fn test_set_prev_requires_forward_link() {
        let mut arena = ChainArena::new();
        let a = arena.spawn_segment(0.0, Vec3::Y);
        let b = arena.spawn_segment(0.0, Vec3::Z);
        assert!(!arena.set_prev(b, Some(a)));
        assert!(!arena.set_prev(b, None));
        assert!(arena.set_next(a, Some(b)));
        assert!(arena.set_prev(b, Some(a)));
        assert_eq!(arena.prev(b), Some(a));
    }

    #[test]
    fn test_relinking_transfers_ownership() {
        let mut arena = ChainArena::new();
        let (_, nodes) = chain(&mut arena, &[Vec3::Y, Vec3::Z]);
        let other = arena.spawn_head(Vec3::ONE);
        assert!(arena.link(other, nodes[1]));
        assert_eq!(arena.next(nodes[0]), None);
        assert_eq!(arena.prev(nodes[1]), Some(other));
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn test_rotate_ignores_head() {
        let mut arena = ChainArena::new();
        let (head, nodes) = chain(&mut arena, &[Vec3::Y]);
        assert!(!arena.rotate(head, 1.0));
        assert!(arena.rotate(nodes[0], 1.0));
        assert!(arena.rotate(nodes[0], -0.25));
        assert_eq!(arena.get(nodes[0]).unwrap().angle(), 0.75);
    }

    #[test]
    fn test_remove_interior_relinks() {
        let mut arena = ChainArena::new();
        let (head, nodes) = chain(&mut arena, &[Vec3::Y, Vec3::Z, Vec3::X]);
        let removal = arena.remove(nodes[1], RemovalPolicy::Reject);
        assert_eq!(
            removal,
            Removal::Relinked {
                prev: nodes[0],
                next: Some(nodes[2])
            }
        );
        let visited: Vec<_> = arena.iter_from(head).collect();
        assert_eq!(visited, vec![head, nodes[0], nodes[2]]);
        assert_eq!(arena.prev(nodes[2]), Some(nodes[0]));
    }

    #[test]
    fn test_remove_clash_rejected_by_default() {
        let mut arena = ChainArena::new();
        // Removing the +z node would make +x follow -x
        let (head, nodes) = chain(&mut arena, &[Vec3::NEG_X, Vec3::Z, Vec3::X]);
        assert_eq!(arena.remove(nodes[1], RemovalPolicy::Reject), Removal::Rejected);
        assert_eq!(arena.iter_from(head).count(), 4);
    }

    #[test]
    fn test_remove_clash_forced_truncates() {
        let mut arena = ChainArena::new();
        let (head, nodes) = chain(&mut arena, &[Vec3::NEG_X, Vec3::Z, Vec3::X, Vec3::Y]);
        let removal = arena.remove(nodes[1], RemovalPolicy::ForceTruncate);
        assert_eq!(
            removal,
            Removal::Truncated {
                prev: nodes[0],
                dropped: 3
            }
        );
        assert_eq!(arena.iter_from(head).count(), 2);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_remove_tail() {
        let mut arena = ChainArena::new();
        let (head, nodes) = chain(&mut arena, &[Vec3::Y, Vec3::Z]);
        let removal = arena.remove(nodes[1], RemovalPolicy::Reject);
        assert_eq!(
            removal,
            Removal::Relinked {
                prev: nodes[0],
                next: None
            }
        );
        assert_eq!(arena.tail(head), Some(nodes[0]));
    }

    #[test]
    fn test_remove_head_promotes_successor() {
        let mut arena = ChainArena::new();
        let (head, nodes) = chain(&mut arena, &[Vec3::Y, Vec3::Z]);
        let removal = arena.remove(head, RemovalPolicy::Reject);
        assert_eq!(removal, Removal::Promoted { new_head: nodes[0] });
        assert!(!arena.contains(head));

        let promoted = arena.get(nodes[0]).unwrap();
        assert!(promoted.is_head());
        assert_eq!(promoted.axis(), Vec3::ZERO);
        assert!(promoted.as_head().unwrap().position().approx_eq(&Vec3::Y));
        assert_eq!(arena.prev(nodes[0]), None);
        assert_eq!(arena.iter_from(nodes[0]).count(), 2);
    }

    #[test]
    fn test_promotion_keeps_twist() {
        let mut arena = ChainArena::new();
        let (head, nodes) = chain(&mut arena, &[Vec3::Y, Vec3::Z]);
        arena.rotate(nodes[0], std::f32::consts::FRAC_PI_2);
        arena.remove(head, RemovalPolicy::Reject);
        let promoted = arena.head(nodes[0]).unwrap();
        // Quarter turn about +y carries forward (+z) onto +x
        assert!(promoted.forward().approx_eq(&Vec3::X));
        assert!(promoted.frame().is_orthonormal(1e-4));
    }

    #[test]
    fn test_root_of_walks_back() {
        let mut arena = ChainArena::new();
        let (head, nodes) = chain(&mut arena, &[Vec3::Y, Vec3::Z, Vec3::X]);
        assert_eq!(arena.root_of(nodes[2]), Some(head));
        assert_eq!(arena.root_of(head), Some(head));
    }
}
