//! Node/link network container produced by the section decoders.

use std::{
    collections::HashSet,
    fmt::{Display, Formatter},
};

use tsplib_derive::TsplibKeyword;

use crate::keyword::YesNo;

const NODES_HEADER: &str = "NODES";
const LINKS_HEADER: &str = "LINKS";

/// Depot/client classification of a node.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, TsplibKeyword)]
#[tsplib(keyword = "NODE_TYPE")]
pub enum NodeKind {
    Depot,
    Client,
}

impl NodeKind {
    /// A node is a depot iff its id is listed in `DEPOT_SECTION`.
    pub fn classify(id: usize, depots: &HashSet<usize>) -> Self {
        if depots.contains(&id) {
            Self::Depot
        } else {
            Self::Client
        }
    }

    /// Numeric node type used by network exchange formats: 0 depot, 1 client.
    pub fn type_code(self) -> u8 {
        match self {
            Self::Depot => 0,
            Self::Client => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub id: usize,
    pub kind: NodeKind,
    pub coords: Option<(f64, f64)>,
}

impl Node {
    pub const fn new(id: usize, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            coords: None,
        }
    }

    pub const fn with_coords(id: usize, kind: NodeKind, x: f64, y: f64) -> Self {
        Self {
            id,
            kind,
            coords: Some((x, y)),
        }
    }

    pub fn is_depot(&self) -> bool {
        self.kind == NodeKind::Depot
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.id, self.kind)?;
        if let Some((x, y)) = self.coords {
            write!(f, " {x} {y}")?;
        }
        Ok(())
    }
}

/// Directed link `tail -> head`; `tail != head` always holds for decoded links.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub tail: usize,
    pub head: usize,
    pub weight: f64,
}

impl Link {
    pub const fn new(tail: usize, head: usize, weight: f64) -> Self {
        Self { tail, head, weight }
    }
}

impl Display for Link {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.tail, self.head, self.weight)
    }
}

/// Link list plus the flag telling whether `(i, j)` and `(j, i)` share a weight.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Links {
    pub symmetric: bool,
    pub links: Vec<Link>,
}

impl Links {
    pub fn new(symmetric: bool, links: Vec<Link>) -> Self {
        Self { symmetric, links }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Weight of `tail -> head`. Symmetric link lists also answer for the
    /// reverse direction.
    pub fn weight(&self, tail: usize, head: usize) -> Option<f64> {
        self.links
            .iter()
            .find(|link| {
                (link.tail == tail && link.head == head)
                    || (self.symmetric && link.tail == head && link.head == tail)
            })
            .map(|link| link.weight)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Network {
    pub name: Option<String>,
    pub nodes: Vec<Node>,
    pub links: Option<Links>,
    /// Set when link weights are implied by euclidean node coordinates.
    pub euclidean: bool,
    pub decimals: Option<u32>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn set_links(&mut self, links: Links) {
        self.links = Some(links);
    }

    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn depots(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| node.is_depot())
    }

    pub fn link_count(&self) -> usize {
        self.links.as_ref().map_or(0, Links::len)
    }

    pub fn is_symmetric(&self) -> Option<bool> {
        self.links.as_ref().map(|links| links.symmetric)
    }
}

/// Writes a header line followed by one record per line; empty blocks are
/// left out entirely.
fn write_records<T: Display>(
    f: &mut Formatter<'_>,
    header: &str,
    records: &[T],
) -> std::fmt::Result {
    if records.is_empty() {
        return Ok(());
    }
    writeln!(f, "{header}")?;
    for record in records {
        writeln!(f, "{record}")?;
    }
    Ok(())
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(name) = &self.name {
            writeln!(f, "NAME: {name}")?;
        }
        if self.euclidean {
            writeln!(f, "EUCLIDEAN: {}", YesNo::Yes)?;
        }
        if let Some(decimals) = self.decimals {
            writeln!(f, "DECIMALS: {decimals}")?;
        }
        if let Some(symmetric) = self.is_symmetric() {
            writeln!(f, "SYMMETRIC: {}", YesNo::from(symmetric))?;
        }
        write_records(f, NODES_HEADER, &self.nodes)?;
        if let Some(links) = &self.links {
            write_records(f, LINKS_HEADER, &links.links)?;
        }
        Ok(())
    }
}
