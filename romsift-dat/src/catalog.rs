use std::io::{BufRead, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use romsift_core::{RegionRanker, UNKNOWN_RANK, split_attributes};

use crate::category::Category;
use crate::error::CatalogError;

/// A parsed catalog document, normalized into [`CatalogEntry`] records.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub name: String,
    pub description: String,
    pub version: String,
    /// Shape of the first record seen. Informational only; entries look the
    /// same whichever taxonomy produced them.
    pub taxonomy: Option<Taxonomy>,
    pub entries: Vec<CatalogEntry>,
}

/// The two catalog document shapes the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Taxonomy {
    /// No-Intro parent/clone XMDB: `<zoned>` records nesting `<bias>` and
    /// `<clone>` elements.
    Grouped,
    /// Redump datfile: one `<game>` record per release with a `<category>`.
    Flat,
}

/// One logical game as described by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Naming candidates with their region, used to derive the canonical name.
    pub variants: Vec<Variant>,
    /// Expected file stems for every known release of the game.
    pub clones: Vec<String>,
    pub category: Category,
}

/// A release name paired with its region token, if known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub region: Option<String>,
}

impl Variant {
    pub fn new(name: impl Into<String>, region: Option<&str>) -> Self {
        Self {
            name: name.into(),
            region: region.map(str::to_string),
        }
    }
}

impl CatalogEntry {
    /// Region tokens of the variants, in order.
    pub fn regions(&self) -> impl Iterator<Item = Option<&str>> {
        self.variants.iter().map(|v| v.region.as_deref())
    }

    /// Clone names with duplicates removed, first occurrence kept.
    pub fn distinct_clones(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.clones
            .iter()
            .map(String::as_str)
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

/// Pick the region of a release from its own attributes: the best-ranked
/// attribute wins, earliest on ties. `None` if no attribute is a known region.
pub fn infer_region(name: &str, ranker: &RegionRanker<'_>) -> Option<String> {
    let split = split_attributes(name);
    let (rank, index) = ranker.best_region(split.attributes.iter().map(|a| Some(a.as_str())))?;
    if rank == UNKNOWN_RANK {
        return None;
    }
    split.attributes.into_iter().nth(index)
}

/// Parse a catalog document in either supported taxonomy.
///
/// The ranker is used to infer regions for flat-taxonomy records.
pub fn parse_catalog<R: BufRead>(
    mut reader: R,
    ranker: &RegionRanker<'_>,
) -> Result<Catalog, CatalogError> {
    // Peek at the first non-whitespace byte
    let mut first_bytes = Vec::new();
    let mut buf = [0u8; 1];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            return Err(CatalogError::invalid("Empty catalog document"));
        }
        first_bytes.push(buf[0]);
        if !buf[0].is_ascii_whitespace() {
            break;
        }
    }
    if buf[0] != b'<' {
        return Err(CatalogError::invalid("Catalog is not an XML document"));
    }

    let chain = std::io::Cursor::new(first_bytes).chain(reader);
    parse_xml(std::io::BufReader::new(chain), ranker)
}

/// Parse a catalog document from a file path.
pub fn parse_catalog_file(
    path: &std::path::Path,
    ranker: &RegionRanker<'_>,
) -> Result<Catalog, CatalogError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    parse_catalog(reader, ranker)
}

// ---------------------------------------------------------------------------
// Format adapters
// ---------------------------------------------------------------------------

/// A `<zoned>` record under construction.
#[derive(Default)]
struct ZonedRecord {
    variants: Vec<Variant>,
    clones: Vec<String>,
}

impl ZonedRecord {
    fn into_entry(self) -> Option<CatalogEntry> {
        if self.clones.is_empty() && self.variants.is_empty() {
            return None;
        }
        let clones = if self.clones.is_empty() {
            self.variants.iter().map(|v| v.name.clone()).collect()
        } else {
            self.clones
        };
        let variants = if self.variants.is_empty() {
            clones.iter().map(|c| Variant::new(c.as_str(), None)).collect()
        } else {
            self.variants
        };
        Some(CatalogEntry {
            variants,
            clones,
            category: Category::Games,
        })
    }
}

/// A `<game>` record under construction.
struct GameRecord {
    name: String,
    category: Option<String>,
}

impl GameRecord {
    fn into_entry(self, ranker: &RegionRanker<'_>) -> Option<CatalogEntry> {
        if self.name.is_empty() {
            return None;
        }
        let region = infer_region(&self.name, ranker);
        let category = self
            .category
            .as_deref()
            .map_or(Category::Unknown, Category::from_label);
        Some(CatalogEntry {
            variants: vec![Variant {
                name: self.name.clone(),
                region,
            }],
            clones: vec![self.name],
            category,
        })
    }
}

enum Record {
    Grouped(ZonedRecord),
    Flat(GameRecord),
}

// ---------------------------------------------------------------------------
// XML walker
// ---------------------------------------------------------------------------

fn parse_xml<R: BufRead>(reader: R, ranker: &RegionRanker<'_>) -> Result<Catalog, CatalogError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut catalog = Catalog {
        name: String::new(),
        description: String::new(),
        version: String::new(),
        taxonomy: None,
        entries: Vec::new(),
    };

    let mut in_header = false;
    let mut current_tag = String::new();
    let mut record: Option<Record> = None;

    loop {
        let event = xml.read_event_into(&mut buf)?;
        let is_empty = matches!(event, Event::Empty(_));
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag_name.as_str() {
                    "header" => in_header = !is_empty,
                    "zoned" => {
                        catalog.taxonomy.get_or_insert(Taxonomy::Grouped);
                        if is_empty {
                            log::debug!("Skipping empty zoned record");
                        } else {
                            record = Some(Record::Grouped(ZonedRecord::default()));
                        }
                    }
                    "bias" => {
                        if let Some(Record::Grouped(ref mut zoned)) = record {
                            let name = attr_value(e, b"name")?.unwrap_or_default();
                            let zone = attr_value(e, b"zone")?;
                            if !name.is_empty() {
                                zoned.variants.push(Variant { name, region: zone });
                            }
                        }
                    }
                    "clone" => {
                        if let Some(Record::Grouped(ref mut zoned)) = record {
                            if let Some(name) = attr_value(e, b"name")? {
                                zoned.clones.push(name);
                            }
                        }
                    }
                    "game" | "machine" if record.is_none() => {
                        catalog.taxonomy.get_or_insert(Taxonomy::Flat);
                        let game = GameRecord {
                            name: attr_value(e, b"name")?.unwrap_or_default(),
                            category: None,
                        };
                        if is_empty {
                            catalog.entries.extend(game.into_entry(ranker));
                        } else {
                            record = Some(Record::Flat(game));
                        }
                    }
                    _ => {
                        if !is_empty {
                            current_tag = tag_name.clone();
                        }
                    }
                }
            }
            Event::Text(ref e) => {
                let text = e.unescape()?.to_string();
                if in_header {
                    match current_tag.as_str() {
                        "name" => catalog.name = text,
                        "description" => catalog.description = text,
                        "version" => catalog.version = text,
                        _ => {}
                    }
                } else if current_tag == "category" {
                    if let Some(Record::Flat(ref mut game)) = record {
                        game.category = Some(text);
                    }
                }
            }
            Event::End(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag_name.as_str() {
                    "header" => in_header = false,
                    "zoned" => {
                        if let Some(Record::Grouped(zoned)) = record.take() {
                            catalog.entries.extend(zoned.into_entry());
                        }
                    }
                    "game" | "machine" => {
                        if let Some(Record::Flat(game)) = record.take() {
                            catalog.entries.extend(game.into_entry(ranker));
                        }
                    }
                    _ => current_tag.clear(),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if catalog.name.is_empty() && catalog.entries.is_empty() {
        return Err(CatalogError::invalid(
            "No header or records found in catalog document",
        ));
    }

    log::debug!(
        "Parsed {} catalog entries from \"{}\" ({:?})",
        catalog.entries.len(),
        catalog.name,
        catalog.taxonomy,
    );

    Ok(catalog)
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, CatalogError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
