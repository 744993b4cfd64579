/// Handle to a node stored in a [`DancingLinks`](crate::DancingLinks) arena.
///
/// Handles are plain indices: they do not keep the node alive and are only
/// meaningful for the arena that minted them.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Position of the node in its arena.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Handle to a column header.
///
/// A header is itself a node, so every `HeaderId` converts into the
/// [`NodeId`] of its own record and can be passed to any link primitive.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct HeaderId(NodeId);

impl HeaderId {
    pub(crate) const fn new(node: NodeId) -> Self {
        Self(node)
    }

    /// The node record backing this header.
    pub const fn node(self) -> NodeId {
        self.0
    }
}

impl From<HeaderId> for NodeId {
    fn from(header: HeaderId) -> Self {
        header.0
    }
}

impl PartialEq<NodeId> for HeaderId {
    fn eq(&self, other: &NodeId) -> bool {
        self.0 == *other
    }
}

impl PartialEq<HeaderId> for NodeId {
    fn eq(&self, other: &HeaderId) -> bool {
        *self == other.0
    }
}

/// The four neighbor links plus the owning header.
///
/// A freshly created record points at itself in every direction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Links {
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) up: NodeId,
    pub(crate) down: NodeId,
    pub(crate) header: HeaderId,
}

impl Links {
    pub(crate) const fn singleton(id: NodeId, header: HeaderId) -> Self {
        Self {
            left: id,
            right: id,
            up: id,
            down: id,
            header,
        }
    }
}

/// A matrix element: links and an optional payload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Node<T> {
    pub(crate) links: Links,
    pub(crate) data: Option<T>,
}

impl<T> Node<T> {
    pub(crate) const fn new(id: NodeId, header: HeaderId) -> Self {
        Self {
            links: Links::singleton(id, header),
            data: None,
        }
    }
}

/// A column header: a node that also owns the nodes minted into its
/// vertical cycle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Header<T> {
    pub(crate) node: Node<T>,
    /// Logical column size. Raw vertical removal never touches it.
    pub(crate) count: usize,
    /// Minted nodes, oldest first.
    pub(crate) members: Vec<NodeId>,
}

impl<T> Header<T> {
    pub(crate) const fn new(id: NodeId) -> Self {
        Self {
            node: Node::new(id, HeaderId::new(id)),
            count: 0,
            members: Vec::new(),
        }
    }
}

/// One arena slot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Cell<T> {
    Element(Node<T>),
    Header(Header<T>),
}

impl<T> Cell<T> {
    pub(crate) const fn node(&self) -> &Node<T> {
        match self {
            Self::Element(node) => node,
            Self::Header(header) => &header.node,
        }
    }

    pub(crate) fn node_mut(&mut self) -> &mut Node<T> {
        match self {
            Self::Element(node) => node,
            Self::Header(header) => &mut header.node,
        }
    }
}
