use crate::node::{Cell, Header, HeaderId, Links, Node, NodeId};

/// Arena holding the headers and nodes of a toroidal doubly linked list.
///
/// Every node belongs to exactly one horizontal and one vertical cycle. A
/// node can leave either cycle in O(1) while remembering its old neighbors,
/// and later step back into the exact same position. Remove/reinsert calls
/// touching the same neighborhood must be strictly nested: reinserting out
/// of order, removing twice or inserting a node that already sits in a
/// larger cycle silently corrupts the structure. Debug builds catch some of
/// these mistakes.
///
/// Headers own the nodes they mint. All of them live here and are dropped
/// with the arena.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DancingLinks<T> {
    cells: Vec<Cell<T>>,
}

impl<T> Default for DancingLinks<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DancingLinks<T> {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Number of records, headers included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Creates a header whose links and header back-reference all point at
    /// itself, with a count of zero.
    pub fn new_header(&mut self) -> HeaderId {
        let id = NodeId::new(self.cells.len());
        self.cells.push(Cell::Header(Header::new(id)));
        HeaderId::new(id)
    }

    /// Mints a node owned by `header` and appends it to the bottom of the
    /// header's vertical cycle, so that afterwards `up(header)` is the new
    /// node. Increments the header's count.
    ///
    /// The returned node is still alone in its horizontal cycle.
    pub fn new_node(&mut self, header: HeaderId) -> NodeId {
        let id = NodeId::new(self.cells.len());
        self.cells.push(Cell::Element(Node::new(id, header)));
        self.insert_up_of(id, header);

        let header = self.header_mut(header);
        header.members.push(id);
        header.count += 1;
        id
    }

    /// Splices `node` into the horizontal cycle of `other`, immediately to
    /// its left. Afterwards `left(other) == node` and `right(node) == other`.
    ///
    /// `node` must be alone in its horizontal cycle.
    pub fn insert_left_of(&mut self, node: impl Into<NodeId>, other: impl Into<NodeId>) {
        let (node, other) = (node.into(), other.into());
        debug_assert!(
            self.right(node) == node && self.left(node) == node,
            "{node:?} is already part of a horizontal cycle"
        );

        let other_left = self.left(other);
        self.links_mut(other_left).right = node;
        self.links_mut(node).left = other_left;

        self.links_mut(other).left = node;
        self.links_mut(node).right = other;
    }

    /// Splices `node` immediately to the right of `other`.
    pub fn insert_right_of(&mut self, node: impl Into<NodeId>, other: impl Into<NodeId>) {
        let other_right = self.right(other);
        self.insert_left_of(node, other_right);
    }

    /// Splices `node` into the vertical cycle of `other`, immediately above
    /// it. Afterwards `up(other) == node` and `down(node) == other`.
    ///
    /// `node` must be alone in its vertical cycle.
    pub fn insert_up_of(&mut self, node: impl Into<NodeId>, other: impl Into<NodeId>) {
        let (node, other) = (node.into(), other.into());
        debug_assert!(
            self.down(node) == node && self.up(node) == node,
            "{node:?} is already part of a vertical cycle"
        );

        let other_up = self.up(other);
        self.links_mut(other_up).down = node;
        self.links_mut(node).up = other_up;

        self.links_mut(other).up = node;
        self.links_mut(node).down = other;
    }

    /// Joins `nodes` into one horizontal cycle in the given order, rooted at
    /// the first node.
    pub fn make_row(&mut self, nodes: &[NodeId]) {
        if let Some((&root, rest)) = nodes.split_first() {
            for &node in rest {
                self.insert_left_of(node, root);
            }
        }
    }

    /// Unlinks `node` from its horizontal cycle. The node keeps its own
    /// `left`/`right` links so [`reinsert_horizontal`](Self::reinsert_horizontal)
    /// can undo this.
    pub fn remove_horizontal(&mut self, node: impl Into<NodeId>) {
        let node = node.into();
        let links = self.links(node);
        self.links_mut(links.right).left = links.left;
        self.links_mut(links.left).right = links.right;
    }

    /// Puts `node` back between the neighbors it had when it was removed.
    pub fn reinsert_horizontal(&mut self, node: impl Into<NodeId>) {
        let node = node.into();
        let links = self.links(node);
        self.links_mut(links.left).right = node;
        self.links_mut(links.right).left = node;
    }

    /// Unlinks `node` from its vertical cycle, keeping its own `up`/`down`
    /// links. The owning header's count is left alone.
    pub fn remove_vertical(&mut self, node: impl Into<NodeId>) {
        let node = node.into();
        let links = self.links(node);
        self.links_mut(links.up).down = links.down;
        self.links_mut(links.down).up = links.up;
    }

    /// Puts `node` back between the vertical neighbors it had when it was
    /// removed. The owning header's count is left alone.
    pub fn reinsert_vertical(&mut self, node: impl Into<NodeId>) {
        let node = node.into();
        let links = self.links(node);
        self.links_mut(links.up).down = node;
        self.links_mut(links.down).up = node;
    }

    pub fn left(&self, node: impl Into<NodeId>) -> NodeId {
        self.links(node.into()).left
    }

    pub fn right(&self, node: impl Into<NodeId>) -> NodeId {
        self.links(node.into()).right
    }

    pub fn up(&self, node: impl Into<NodeId>) -> NodeId {
        self.links(node.into()).up
    }

    pub fn down(&self, node: impl Into<NodeId>) -> NodeId {
        self.links(node.into()).down
    }

    /// The header owning `node`. A header is its own header.
    pub fn header(&self, node: impl Into<NodeId>) -> HeaderId {
        self.links(node.into()).header
    }

    pub fn is_header(&self, node: impl Into<NodeId>) -> bool {
        matches!(self.cells[node.into().index()], Cell::Header(_))
    }

    pub fn data(&self, node: impl Into<NodeId>) -> Option<&T> {
        self.cells[node.into().index()].node().data.as_ref()
    }

    pub fn data_mut(&mut self, node: impl Into<NodeId>) -> Option<&mut T> {
        self.cells[node.into().index()].node_mut().data.as_mut()
    }

    /// Stores `data` on `node`, returning the payload it replaces.
    pub fn set_data(&mut self, node: impl Into<NodeId>, data: T) -> Option<T> {
        self.cells[node.into().index()].node_mut().data.replace(data)
    }

    pub fn take_data(&mut self, node: impl Into<NodeId>) -> Option<T> {
        self.cells[node.into().index()].node_mut().data.take()
    }

    /// Logical number of nodes in the column of `header`.
    ///
    /// Only [`new_node`](Self::new_node), [`inc_count`](Self::inc_count) and
    /// [`dec_count`](Self::dec_count) change it.
    pub fn count(&self, header: HeaderId) -> usize {
        self.header_ref(header).count
    }

    pub fn inc_count(&mut self, header: HeaderId) {
        self.header_mut(header).count += 1;
    }

    /// Decrements the count of `header`. It must not already be zero.
    pub fn dec_count(&mut self, header: HeaderId) {
        self.header_mut(header).count -= 1;
    }

    /// Nodes minted by `header`, oldest first, whether currently linked in
    /// or not.
    pub fn members(&self, header: HeaderId) -> &[NodeId] {
        &self.header_ref(header).members
    }

    /// Walks the horizontal cycle of `start` to the right, yielding every
    /// other member once.
    pub fn iter_right(&self, start: impl Into<NodeId>) -> Walk<'_, T> {
        Walk::new(self, start.into(), Direction::Right)
    }

    pub fn iter_left(&self, start: impl Into<NodeId>) -> Walk<'_, T> {
        Walk::new(self, start.into(), Direction::Left)
    }

    /// Walks the vertical cycle of `start` downwards, yielding every other
    /// member once.
    pub fn iter_down(&self, start: impl Into<NodeId>) -> Walk<'_, T> {
        Walk::new(self, start.into(), Direction::Down)
    }

    pub fn iter_up(&self, start: impl Into<NodeId>) -> Walk<'_, T> {
        Walk::new(self, start.into(), Direction::Up)
    }

    fn links(&self, node: NodeId) -> Links {
        self.cells[node.index()].node().links
    }

    fn links_mut(&mut self, node: NodeId) -> &mut Links {
        &mut self.cells[node.index()].node_mut().links
    }

    fn header_ref(&self, header: HeaderId) -> &Header<T> {
        match &self.cells[header.node().index()] {
            Cell::Header(header) => header,
            Cell::Element(_) => unreachable!("{header:?} does not refer to a header"),
        }
    }

    fn header_mut(&mut self, header: HeaderId) -> &mut Header<T> {
        match &mut self.cells[header.node().index()] {
            Cell::Header(header) => header,
            Cell::Element(_) => unreachable!("{header:?} does not refer to a header"),
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Iterator over one cycle, excluding the node it started from.
///
/// The walk follows links lazily, so it sees the structure as it is at each
/// step.
pub struct Walk<'a, T> {
    links: &'a DancingLinks<T>,
    start: NodeId,
    current: NodeId,
    direction: Direction,
}

impl<'a, T> Walk<'a, T> {
    fn new(links: &'a DancingLinks<T>, start: NodeId, direction: Direction) -> Self {
        Self {
            links,
            start,
            current: start,
            direction,
        }
    }
}

impl<T> Iterator for Walk<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let next = match self.direction {
            Direction::Left => self.links.left(self.current),
            Direction::Right => self.links.right(self.current),
            Direction::Up => self.links.up(self.current),
            Direction::Down => self.links.down(self.current),
        };

        if next == self.start {
            return None;
        }

        self.current = next;
        Some(next)
    }
}
