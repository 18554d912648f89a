//! Scalar converters for header values and section tokens.

use crate::{Keyword, TsplibError, TsplibResult};

/// Terminator closing id-list sections such as `DEPOT_SECTION`.
pub const SECTION_END_MARKER: &str = "-1";

/// Splits section text on runs of whitespace, newlines included.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Parses a non-negative integer header value such as `DIMENSION`.
pub fn parse_usize(keyword: Keyword, raw: &str) -> TsplibResult<usize> {
    let value = raw.trim();
    value
        .parse::<usize>()
        .map_err(|e| TsplibError::invalid_value(keyword.to_string(), value, e))
}

/// Parses a TSPLIB node id; ids are 1-based, so zero is rejected.
pub fn parse_node_id(keyword: Keyword, raw: &str) -> TsplibResult<usize> {
    let id = parse_usize(keyword, raw)?;
    if id == 0 {
        return Err(TsplibError::invalid_value(
            keyword.to_string(),
            raw.trim(),
            "node ids start at 1",
        ));
    }
    Ok(id)
}

/// Parses an edge weight or coordinate.
pub fn parse_f64(keyword: Keyword, raw: &str) -> TsplibResult<f64> {
    let value = raw.trim();
    value
        .parse::<f64>()
        .map_err(|e| TsplibError::invalid_value(keyword.to_string(), value, e))
}

/// Parses a `-1` terminated id list. Tokens after the terminator are ignored,
/// and a missing terminator is tolerated.
pub fn parse_id_list(keyword: Keyword, text: &str) -> TsplibResult<Vec<usize>> {
    let mut ids = Vec::new();
    for token in text.split_whitespace() {
        if token == SECTION_END_MARKER {
            break;
        }
        ids.push(parse_node_id(keyword, token)?);
    }
    Ok(ids)
}

/// One `NODE_COORD_SECTION` line: `id x y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordLine {
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

/// Parses a two-dimensional coordinate line. Returns `Ok(None)` when the line
/// does not have exactly three fields.
pub fn parse_coord_line(line: &str) -> TsplibResult<Option<CoordLine>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [id, x, y] = fields.as_slice() else {
        return Ok(None);
    };

    Ok(Some(CoordLine {
        id: parse_node_id(Keyword::NodeCoordSection, id)?,
        x: parse_f64(Keyword::NodeCoordSection, x)?,
        y: parse_f64(Keyword::NodeCoordSection, y)?,
    }))
}
