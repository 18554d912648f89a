//! `EDGE_WEIGHT_SECTION` decoding for `EDGE_WEIGHT_TYPE: EXPLICIT` instances.
//!
//! The section is a flat stream of numeric tokens. A [`MatrixLayout`] fixes
//! the order in which matrix cells appear in that stream; decoding walks the
//! layout's cells with a single cursor into the token list, consuming exactly
//! one token per visited cell. Diagonal cells are consumed and dropped.
//!
//! Tokens left over once the layout is exhausted do not fail the decode: they
//! are logged and reported as a [`DecodeWarning`].

use std::{
    collections::HashSet,
    fmt::{Display, Formatter},
};

use tsplib_derive::WithMethods;

use crate::{
    EdgeWeightFormat, EdgeWeightType, Keyword, TsplibError, TsplibResult,
    layout::{Cell, MatrixLayout},
    network::{Link, Links, Network, Node, NodeKind},
    values,
};

/// Header values the decoder needs, as read from the instance header.
#[derive(Clone, Debug, Default, Eq, PartialEq, WithMethods)]
pub struct DecodeContext {
    pub dimension: usize,
    pub edge_weight_type: String,
    pub edge_weight_format: String,
    #[with(skip)]
    pub depots: HashSet<usize>,
}

impl DecodeContext {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            edge_weight_type: EdgeWeightType::Explicit.to_string(),
            ..Self::default()
        }
    }

    pub fn with_depots(mut self, depots: impl IntoIterator<Item = usize>) -> Self {
        self.depots = depots.into_iter().collect();
        self
    }

    /// Checks the edge weight type and format before anything is decoded.
    pub fn layout(&self) -> TsplibResult<MatrixLayout> {
        if EdgeWeightType::parse(&self.edge_weight_type)? != EdgeWeightType::Explicit {
            return Err(TsplibError::unsupported_format(
                EdgeWeightType::KEYWORD,
                self.edge_weight_type.trim(),
            ));
        }
        let format = EdgeWeightFormat::parse(&self.edge_weight_format)?;
        MatrixLayout::try_from(format).map_err(|_| {
            TsplibError::unsupported_format(
                EdgeWeightFormat::KEYWORD,
                self.edge_weight_format.trim(),
            )
        })
    }
}

/// Non-fatal irregularities found while decoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DecodeWarning {
    /// The stream held more tokens than the layout visits.
    LeftoverTokens { count: usize, first: String },
}

impl Display for DecodeWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LeftoverTokens { count, first } => write!(
                f,
                "{count} token(s) left in {} after decoding, starting at '{first}'",
                Keyword::EdgeWeightSection
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DecodedMatrix {
    pub layout: MatrixLayout,
    /// Ids `1..=dimension` in order.
    pub nodes: Vec<Node>,
    /// Links in layout visitation order.
    pub links: Vec<Link>,
    pub symmetric: bool,
    pub warnings: Vec<DecodeWarning>,
}

impl DecodedMatrix {
    pub fn into_network(self) -> Network {
        Network {
            nodes: self.nodes,
            links: Some(Links::new(self.symmetric, self.links)),
            ..Network::default()
        }
    }
}

struct TokenCursor<'a, S> {
    tokens: &'a [S],
    pos: usize,
}

impl<'a, S: AsRef<str>> TokenCursor<'a, S> {
    fn new(tokens: &'a [S]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn take(&mut self, cell: Cell) -> TsplibResult<&'a str> {
        let Some(token) = self.tokens.get(self.pos) else {
            return Err(TsplibError::invalid_data(format!(
                "{} ended after {} token(s); cell ({}, {}) has no value",
                Keyword::EdgeWeightSection,
                self.pos,
                cell.row,
                cell.col
            )));
        };
        self.pos += 1;
        Ok(token.as_ref())
    }

    fn leftover(&self) -> Option<DecodeWarning> {
        let rest = &self.tokens[self.pos.min(self.tokens.len())..];
        let first = rest.first()?;
        Some(DecodeWarning::LeftoverTokens {
            count: rest.len(),
            first: first.as_ref().to_string(),
        })
    }
}

/// Emits nodes `1..=dimension`, classified against the depot set.
pub fn classify_nodes(dimension: usize, depots: &HashSet<usize>) -> Vec<Node> {
    (1..=dimension)
        .map(|id| Node::new(id, NodeKind::classify(id, depots)))
        .collect()
}

/// Decodes an already tokenized `EDGE_WEIGHT_SECTION`.
pub fn decode<S: AsRef<str>>(tokens: &[S], ctx: &DecodeContext) -> TsplibResult<DecodedMatrix> {
    let layout = ctx.layout()?;
    let n = ctx.dimension;
    log::debug!(
        "decoder.start: layout={} n={n} tokens={} depots={}",
        EdgeWeightFormat::from(layout),
        tokens.len(),
        ctx.depots.len()
    );

    // `dimension` comes from the header; only the stream bounds allocation.
    let mut cursor = TokenCursor::new(tokens);
    let mut links = Vec::with_capacity(layout.link_count(n).min(tokens.len()));
    for cell in layout.cells(n) {
        let token = cursor.take(cell)?;
        if !cell.emits() {
            continue;
        }
        let weight = values::parse_f64(Keyword::EdgeWeightSection, token)?;
        links.push(Link::new(cell.row, cell.col, weight));
    }

    let nodes = classify_nodes(n, &ctx.depots);

    let mut warnings = Vec::new();
    if let Some(warning) = cursor.leftover() {
        log::warn!("decoder.leftover: {warning}");
        warnings.push(warning);
    }

    log::debug!(
        "decoder.done: layout={} nodes={} links={}",
        EdgeWeightFormat::from(layout),
        nodes.len(),
        links.len()
    );

    Ok(DecodedMatrix {
        layout,
        nodes,
        links,
        symmetric: layout.is_symmetric(),
        warnings,
    })
}

/// Tokenizes raw section text on whitespace runs and decodes it.
pub fn decode_section(text: &str, ctx: &DecodeContext) -> TsplibResult<DecodedMatrix> {
    decode(&values::tokenize(text), ctx)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::{DecodeContext, DecodeWarning, decode, decode_section};
    use crate::{
        EdgeWeightFormat, TsplibError,
        layout::MatrixLayout,
        network::{Link, Node, NodeKind},
    };

    fn ctx(dimension: usize, format: &str) -> DecodeContext {
        DecodeContext::new(dimension).with_edge_weight_format(format)
    }

    fn triples(links: &[Link]) -> Vec<(usize, usize, f64)> {
        links.iter().map(|l| (l.tail, l.head, l.weight)).collect()
    }

    #[test]
    fn upper_row_with_depot() {
        let ctx = ctx(3, "UPPER_ROW").with_depots([1]);
        let decoded = decode(&["10", "20", "30"], &ctx).expect("decode");

        assert_eq!(
            triples(&decoded.links),
            vec![(1, 2, 10.0), (1, 3, 20.0), (2, 3, 30.0)]
        );
        assert!(decoded.symmetric);
        assert_eq!(
            decoded.nodes,
            vec![
                Node::new(1, NodeKind::Depot),
                Node::new(2, NodeKind::Client),
                Node::new(3, NodeKind::Client),
            ]
        );
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn full_matrix_keeps_both_directions_and_is_asymmetric() {
        let decoded = decode(&["0", "5", "7", "0"], &ctx(2, "FULL_MATRIX")).expect("decode");
        assert_eq!(triples(&decoded.links), vec![(1, 2, 5.0), (2, 1, 7.0)]);
        assert!(!decoded.symmetric);
    }

    #[test]
    fn lower_diag_col_skips_diagonal_tokens() {
        let decoded = decode(&["0", "1", "2", "0", "3", "0"], &ctx(3, "LOWER_DIAG_COL"))
            .expect("decode");
        assert_eq!(
            triples(&decoded.links),
            vec![(2, 1, 1.0), (3, 1, 2.0), (3, 2, 3.0)]
        );
        assert!(decoded.symmetric);
    }

    #[test]
    fn every_layout_of_the_same_matrix_agrees() {
        // Symmetric 4x4 matrix with w(i, j) = 10 * min + max.
        let w = |i: usize, j: usize| (10 * i.min(j) + i.max(j)) as f64;
        for layout in MatrixLayout::ALL {
            let tokens: Vec<String> = layout
                .cells(4)
                .map(|c| if c.emits() { w(c.row, c.col).to_string() } else { "0".to_string() })
                .collect();
            let format = EdgeWeightFormat::from(layout).to_string();
            let decoded = decode(&tokens, &ctx(4, &format)).expect("decode");

            assert_eq!(decoded.links.len(), layout.link_count(4), "{format}");
            for link in &decoded.links {
                assert_eq!(link.weight, w(link.tail, link.head), "{format}");
            }
        }
    }

    #[test]
    fn unknown_format_fails_before_emitting_anything() {
        let err = decode(&["1", "2"], &ctx(2, "FOO")).expect_err("unknown format");
        match err {
            TsplibError::UnsupportedFormat { keyword, value } => {
                assert_eq!(keyword, "EDGE_WEIGHT_FORMAT");
                assert_eq!(value, "FOO");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn lowercase_tags_are_unsupported() {
        let err = decode(&["5"], &ctx(2, "upper_row")).expect_err("lowercase format");
        assert!(matches!(
            err,
            TsplibError::UnsupportedFormat { ref keyword, ref value }
                if keyword == "EDGE_WEIGHT_FORMAT" && value == "upper_row"
        ));

        let ctx = ctx(2, "UPPER_ROW").with_edge_weight_type("explicit");
        let err = decode(&["5"], &ctx).expect_err("lowercase type");
        assert!(matches!(
            err,
            TsplibError::UnsupportedFormat { ref keyword, ref value }
                if keyword == "EDGE_WEIGHT_TYPE" && value == "explicit"
        ));
    }

    #[test]
    fn function_format_is_unsupported() {
        let err = decode(&["1"], &ctx(2, "FUNCTION")).expect_err("no matrix");
        assert!(matches!(err, TsplibError::UnsupportedFormat { .. }));
    }

    #[test]
    fn non_explicit_type_is_unsupported() {
        let ctx = ctx(2, "UPPER_ROW").with_edge_weight_type("EUC_2D");
        let err = decode(&["1"], &ctx).expect_err("computed weights");
        match err {
            TsplibError::UnsupportedFormat { keyword, value } => {
                assert_eq!(keyword, "EDGE_WEIGHT_TYPE");
                assert_eq!(value, "EUC_2D");
            }
            other => panic!("unexpected error: {other}"),
        }

        let ctx = DecodeContext::new(2)
            .with_edge_weight_type("BOGUS")
            .with_edge_weight_format("UPPER_ROW");
        assert!(matches!(
            decode(&["1"], &ctx),
            Err(TsplibError::UnsupportedFormat { ref keyword, .. }) if keyword == "EDGE_WEIGHT_TYPE"
        ));
    }

    #[test]
    fn leftover_tokens_are_a_warning() {
        let decoded = decode(&["5", "99"], &ctx(2, "UPPER_ROW")).expect("decode");
        assert_eq!(triples(&decoded.links), vec![(1, 2, 5.0)]);
        assert_eq!(
            decoded.warnings,
            vec![DecodeWarning::LeftoverTokens {
                count: 1,
                first: "99".to_string()
            }]
        );
    }

    #[test]
    fn short_stream_is_an_error() {
        let err = decode(&["1", "2"], &ctx(3, "UPPER_ROW")).expect_err("missing token");
        assert!(matches!(err, TsplibError::InvalidData(_)));
    }

    #[test]
    fn large_dimension_with_short_stream_is_an_error() {
        let err = decode(&["1"], &ctx(1 << 22, "FULL_MATRIX")).expect_err("missing tokens");
        assert!(matches!(err, TsplibError::InvalidData(_)));

        for layout in MatrixLayout::ALL {
            let format = EdgeWeightFormat::from(layout).to_string();
            let err = decode(&["1", "2"], &ctx(usize::MAX / 2, &format)).expect_err("missing tokens");
            assert!(matches!(err, TsplibError::InvalidData(_)), "{format}");
        }
    }

    #[test]
    fn non_numeric_weight_is_an_error() {
        let err = decode(&["1", "x", "3"], &ctx(3, "LOWER_ROW")).expect_err("bad weight");
        match err {
            TsplibError::InvalidValue { keyword, value, .. } => {
                assert_eq!(keyword, "EDGE_WEIGHT_SECTION");
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn diagonal_tokens_are_not_parsed() {
        let decoded = decode(&["-", "4", "-"], &ctx(2, "UPPER_DIAG_ROW")).expect("decode");
        assert_eq!(triples(&decoded.links), vec![(1, 2, 4.0)]);
    }

    #[test]
    fn decode_section_splits_multiline_text() {
        let text = "\n  0 1 2\n 0 3\n\t0\n";
        let decoded = decode_section(text, &ctx(3, "UPPER_DIAG_ROW")).expect("decode");
        assert_eq!(
            triples(&decoded.links),
            vec![(1, 2, 1.0), (1, 3, 2.0), (2, 3, 3.0)]
        );
    }

    #[test]
    fn into_network_carries_symmetry() {
        let network = decode(&["0", "5", "7", "0"], &ctx(2, "FULL_MATRIX"))
            .expect("decode")
            .into_network();
        assert_eq!(network.nodes.len(), 2);
        assert_eq!(network.is_symmetric(), Some(false));
        assert_eq!(network.link_count(), 2);
    }

    fn layout_strategy() -> impl Strategy<Value = MatrixLayout> {
        prop::sample::select(MatrixLayout::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn decoded_shape_follows_layout(
            layout in layout_strategy(),
            n in 0usize..12,
            depots in prop::collection::hash_set(1usize..16, 0..4),
        ) {
            let tokens: Vec<String> = (0..layout.cell_count(n)).map(|k| k.to_string()).collect();
            let format = EdgeWeightFormat::from(layout).to_string();
            let ctx = ctx(n, &format).with_depots(depots.iter().copied());
            let decoded = decode(&tokens, &ctx).expect("decode");

            let ids: Vec<usize> = decoded.nodes.iter().map(|node| node.id).collect();
            prop_assert_eq!(ids, (1..=n).collect::<Vec<_>>());
            for node in &decoded.nodes {
                prop_assert_eq!(node.is_depot(), depots.contains(&node.id));
            }

            let expected = if layout == MatrixLayout::FullMatrix { n * n - n } else { n * n.saturating_sub(1) / 2 };
            prop_assert_eq!(decoded.links.len(), expected);
            prop_assert!(decoded.links.iter().all(|link| link.tail != link.head));
            prop_assert_eq!(decoded.symmetric, layout != MatrixLayout::FullMatrix);
            prop_assert!(decoded.warnings.is_empty());

            let distinct: HashSet<(usize, usize)> =
                decoded.links.iter().map(|link| (link.tail, link.head)).collect();
            prop_assert_eq!(distinct.len(), decoded.links.len());
        }

        #[test]
        fn each_token_is_consumed_once_in_order(layout in layout_strategy(), n in 1usize..10) {
            let tokens: Vec<String> = (0..layout.cell_count(n)).map(|k| k.to_string()).collect();
            let format = EdgeWeightFormat::from(layout).to_string();
            let decoded = decode(&tokens, &ctx(n, &format)).expect("decode");

            let expected: Vec<f64> = layout
                .cells(n)
                .enumerate()
                .filter(|(_, cell)| cell.emits())
                .map(|(k, _)| k as f64)
                .collect();
            let weights: Vec<f64> = decoded.links.iter().map(|link| link.weight).collect();
            prop_assert_eq!(weights, expected);
        }
    }
}
