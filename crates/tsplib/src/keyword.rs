//! TSPLIB95 keywords and the typed values of the header fields the decoder
//! depends on.

use tsplib_derive::TsplibKeyword;

/// Header and section keywords recognized by the instance reader.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, TsplibKeyword)]
#[tsplib(keyword = "KEYWORD")]
pub enum Keyword {
    Name,
    Type,
    Comment,
    Dimension,
    Capacity,
    EdgeWeightType,
    EdgeWeightFormat,
    EdgeDataFormat,
    NodeCoordType,
    DisplayDataType,
    NodeCoordSection,
    DepotSection,
    DemandSection,
    EdgeDataSection,
    FixedEdgesSection,
    DisplayDataSection,
    TourSection,
    EdgeWeightSection,
    Eof,
}

impl Keyword {
    /// Section keywords stand alone on a line and own the data lines after them.
    pub fn is_section(self) -> bool {
        matches!(
            self,
            Self::NodeCoordSection
                | Self::DepotSection
                | Self::DemandSection
                | Self::EdgeDataSection
                | Self::FixedEdgesSection
                | Self::DisplayDataSection
                | Self::TourSection
                | Self::EdgeWeightSection
        )
    }
}

/// TSPLIB `TYPE` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, TsplibKeyword)]
#[tsplib(keyword = "TYPE")]
pub enum ProblemType {
    Tsp,
    Atsp,
    Sop,
    Hcp,
    Cvrp,
    Tour,
}

/// TSPLIB `EDGE_WEIGHT_TYPE` values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, TsplibKeyword)]
#[tsplib(keyword = "EDGE_WEIGHT_TYPE")]
pub enum EdgeWeightType {
    Explicit,
    #[tsplib("EUC_2D")]
    Euc2d,
    #[tsplib("EUC_3D")]
    Euc3d,
    #[tsplib("MAX_2D")]
    Max2d,
    #[tsplib("MAX_3D")]
    Max3d,
    #[tsplib("MAN_2D")]
    Man2d,
    #[tsplib("MAN_3D")]
    Man3d,
    #[tsplib("CEIL_2D")]
    Ceil2d,
    Geo,
    Att,
    Xray1,
    Xray2,
    Special,
}

/// TSPLIB `EDGE_WEIGHT_FORMAT` values.
///
/// `Function` is a valid keyword value but carries no matrix; see
/// [`crate::layout::MatrixLayout`] for the nine serialized layouts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, TsplibKeyword)]
#[tsplib(keyword = "EDGE_WEIGHT_FORMAT")]
pub enum EdgeWeightFormat {
    Function,
    FullMatrix,
    UpperRow,
    LowerRow,
    UpperDiagRow,
    LowerDiagRow,
    UpperCol,
    LowerCol,
    UpperDiagCol,
    LowerDiagCol,
}

/// Yes/No flag used in rendered network headers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, TsplibKeyword)]
#[tsplib(keyword = "FLAG")]
pub enum YesNo {
    Yes,
    No,
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

#[cfg(test)]
mod tests {
    use super::{EdgeWeightFormat, EdgeWeightType, Keyword, ProblemType, YesNo};
    use crate::TsplibError;

    #[test]
    fn display_uses_tsplib_spelling() {
        assert_eq!(EdgeWeightType::Euc2d.to_string(), "EUC_2D");
        assert_eq!(EdgeWeightType::Xray1.to_string(), "XRAY1");
        assert_eq!(EdgeWeightFormat::UpperDiagRow.to_string(), "UPPER_DIAG_ROW");
        assert_eq!(Keyword::EdgeWeightSection.to_string(), "EDGE_WEIGHT_SECTION");
        assert_eq!(ProblemType::Cvrp.to_string(), "CVRP");
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(
            EdgeWeightFormat::parse("  LOWER_DIAG_COL \n").expect("parse format"),
            EdgeWeightFormat::LowerDiagCol
        );
        assert_eq!(
            EdgeWeightType::parse("EXPLICIT").expect("parse type"),
            EdgeWeightType::Explicit
        );
    }

    #[test]
    fn parse_is_case_sensitive() {
        for raw in ["lower_diag_col", "Upper_Row", "full_MATRIX"] {
            match EdgeWeightFormat::parse(raw) {
                Err(TsplibError::UnsupportedFormat { keyword, value }) => {
                    assert_eq!(keyword, "EDGE_WEIGHT_FORMAT");
                    assert_eq!(value, raw);
                }
                other => panic!("{raw} should be rejected, got {other:?}"),
            }
        }
        assert!(EdgeWeightType::parse("explicit").is_err());
        assert!(Keyword::parse("edge_weight_section").is_err());
    }

    #[test]
    fn parse_unknown_value_names_keyword_and_value() {
        let err = EdgeWeightFormat::parse(" FOO ").expect_err("FOO is not a format");
        match err {
            TsplibError::UnsupportedFormat { keyword, value } => {
                assert_eq!(keyword, "EDGE_WEIGHT_FORMAT");
                assert_eq!(value, "FOO");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn values_list_every_variant() {
        assert_eq!(EdgeWeightFormat::VALUES.len(), 10);
        assert!(EdgeWeightFormat::VALUES.contains(&"FULL_MATRIX"));
        assert_eq!(EdgeWeightType::KEYWORD, "EDGE_WEIGHT_TYPE");
    }

    #[test]
    fn only_sections_are_flagged_as_sections() {
        assert!(Keyword::DepotSection.is_section());
        assert!(Keyword::EdgeWeightSection.is_section());
        assert!(!Keyword::Dimension.is_section());
        assert!(!Keyword::Eof.is_section());
    }

    #[test]
    fn yes_no_from_bool() {
        assert_eq!(YesNo::from(true).to_string(), "YES");
        assert_eq!(YesNo::from(false).to_string(), "NO");
    }
}
