//! `NODE_COORD_SECTION` decoding for `EUC_2D` instances.
//!
//! Only nodes are produced: weights stay implicit in the coordinates and the
//! network is flagged euclidean.

use std::collections::HashSet;

use crate::{
    EdgeWeightType, TsplibError, TsplibResult,
    network::{Network, Node, NodeKind},
    values,
};

/// Decimal places carried by euclidean networks.
pub const EUCLIDEAN_DECIMALS: u32 = 2;

/// Decodes `id x y` lines into classified nodes. Lines without exactly three
/// fields are skipped.
pub fn decode_node_coords(
    text: &str,
    edge_weight_type: &str,
    depots: &HashSet<usize>,
) -> TsplibResult<Network> {
    if EdgeWeightType::parse(edge_weight_type)? != EdgeWeightType::Euc2d {
        return Err(TsplibError::unsupported_format(
            EdgeWeightType::KEYWORD,
            edge_weight_type.trim(),
        ));
    }

    let mut network = Network::new();
    for line in text.lines() {
        let Some(coord) = values::parse_coord_line(line)? else {
            if !line.trim().is_empty() {
                log::debug!("coords.skip: line={:?}", line.trim());
            }
            continue;
        };
        let kind = NodeKind::classify(coord.id, depots);
        network.add_node(Node::with_coords(coord.id, kind, coord.x, coord.y));
    }
    network.euclidean = true;
    network.decimals = Some(EUCLIDEAN_DECIMALS);

    log::debug!("coords.done: nodes={}", network.nodes.len());
    Ok(network)
}
