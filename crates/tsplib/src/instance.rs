//! TSPLIB95 instance reader.
//!
//! Splits an instance file into `KEY : value` header entries and the bodies
//! of its `*_SECTION` blocks, then hands the relevant section to the matrix
//! or coordinate decoder. Parsing is permissive: unknown headers and stray
//! lines outside a section are ignored.

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};

use crate::{
    EdgeWeightType, Keyword, ProblemType, TsplibError, TsplibResult, coords,
    decoder::{self, DecodeContext, DecodeWarning},
    network::Network,
    values,
};

/// Header values looked up by keyword.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TsplibHeader {
    entries: HashMap<Keyword, String>,
    comments: Vec<String>,
}

impl TsplibHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a header value. `COMMENT` may repeat; any other keyword keeps
    /// its last value.
    pub fn insert(&mut self, keyword: Keyword, value: impl Into<String>) {
        let value = value.into();
        if keyword == Keyword::Comment {
            self.comments.push(value);
        } else {
            self.entries.insert(keyword, value);
        }
    }

    pub fn get(&self, keyword: Keyword) -> Option<&str> {
        self.entries.get(&keyword).map(String::as_str)
    }

    pub fn require(&self, keyword: Keyword) -> TsplibResult<&str> {
        self.get(keyword)
            .ok_or_else(|| TsplibError::missing_keyword(keyword.to_string()))
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn name(&self) -> Option<&str> {
        self.get(Keyword::Name)
    }

    pub fn problem_type(&self) -> TsplibResult<Option<ProblemType>> {
        self.get(Keyword::Type).map(ProblemType::parse).transpose()
    }

    pub fn dimension(&self) -> TsplibResult<usize> {
        values::parse_usize(Keyword::Dimension, self.require(Keyword::Dimension)?)
    }

    pub fn edge_weight_type(&self) -> TsplibResult<EdgeWeightType> {
        EdgeWeightType::parse(self.require(Keyword::EdgeWeightType)?)
    }
}

/// Network decoded from an instance, with any non-fatal warnings.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedNetwork {
    pub network: Network,
    pub warnings: Vec<DecodeWarning>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TsplibInstance {
    pub header: TsplibHeader,
    sections: HashMap<Keyword, String>,
}

impl TsplibInstance {
    /// Reads and splits a TSPLIB95 instance file.
    pub fn from_file(path: impl AsRef<Path>) -> TsplibResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        log::debug!("instance.read: path={} bytes={}", path.display(), text.len());
        Self::from_text(&text)
    }

    /// Splits instance text into header entries and section bodies.
    pub fn from_text(text: &str) -> TsplibResult<Self> {
        let mut instance = Self::default();
        let mut current: Option<Keyword> = None;

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(keyword) = standalone_keyword(line) {
                if keyword == Keyword::Eof {
                    break;
                }
                if keyword.is_section() {
                    instance.sections.entry(keyword).or_default();
                    current = Some(keyword);
                    continue;
                }
            }

            if let Some((key, value)) = line.split_once(':')
                && is_keyword_like(key.trim())
            {
                match Keyword::parse(key) {
                    Ok(keyword) if !keyword.is_section() => {
                        instance.header.insert(keyword, value.trim());
                    }
                    _ => log::debug!("instance.skip: unknown header {:?}", key.trim()),
                }
                current = None;
                continue;
            }

            match current {
                Some(section) => {
                    let body = instance.sections.entry(section).or_default();
                    body.push_str(line);
                    body.push('\n');
                }
                None => log::debug!("instance.skip: line={line:?}"),
            }
        }

        Ok(instance)
    }

    pub fn section(&self, keyword: Keyword) -> Option<&str> {
        self.sections.get(&keyword).map(String::as_str)
    }

    pub fn require_section(&self, keyword: Keyword) -> TsplibResult<&str> {
        self.section(keyword)
            .ok_or_else(|| TsplibError::missing_keyword(keyword.to_string()))
    }

    /// Depot ids from `DEPOT_SECTION`; empty when the section is absent.
    pub fn depots(&self) -> TsplibResult<HashSet<usize>> {
        let Some(text) = self.section(Keyword::DepotSection) else {
            return Ok(HashSet::new());
        };
        Ok(values::parse_id_list(Keyword::DepotSection, text)?
            .into_iter()
            .collect())
    }

    /// Collects the header values the matrix decoder depends on.
    pub fn decode_context(&self) -> TsplibResult<DecodeContext> {
        Ok(DecodeContext::new(self.header.dimension()?)
            .with_edge_weight_type(self.header.require(Keyword::EdgeWeightType)?)
            .with_edge_weight_format(self.header.require(Keyword::EdgeWeightFormat)?)
            .with_depots(self.depots()?))
    }

    /// Builds the network: `EXPLICIT` instances decode `EDGE_WEIGHT_SECTION`,
    /// `EUC_2D` instances decode `NODE_COORD_SECTION`.
    pub fn decode(&self) -> TsplibResult<DecodedNetwork> {
        let raw_type = self.header.require(Keyword::EdgeWeightType)?;

        let (mut network, warnings) = match self.header.edge_weight_type()? {
            EdgeWeightType::Explicit => {
                let ctx = self.decode_context()?;
                let section = self.require_section(Keyword::EdgeWeightSection)?;
                let mut decoded = decoder::decode_section(section, &ctx)?;
                let warnings = std::mem::take(&mut decoded.warnings);
                (decoded.into_network(), warnings)
            }
            EdgeWeightType::Euc2d => {
                let section = self.require_section(Keyword::NodeCoordSection)?;
                let network = coords::decode_node_coords(section, raw_type, &self.depots()?)?;
                (network, Vec::new())
            }
            _ => {
                return Err(TsplibError::unsupported_format(
                    EdgeWeightType::KEYWORD,
                    raw_type.trim(),
                ));
            }
        };

        if let Some(name) = self.header.name() {
            network.set_name(name);
        }

        Ok(DecodedNetwork { network, warnings })
    }
}

fn standalone_keyword(line: &str) -> Option<Keyword> {
    Keyword::parse(line.trim_end_matches(':')).ok()
}

fn is_keyword_like(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        && key.chars().any(|c| c.is_ascii_alphabetic())
}
