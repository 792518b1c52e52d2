use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::document::DocumentError;
use crate::locator::{text_content, LocatorResult, Selector};
use crate::model::TypedProperty;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Row {row} has no node matching the name locator")]
    MissingName { row: usize },
    #[error(transparent)]
    Document(#[from] DocumentError),
}

pub type ExtractResult<T> = Result<T, ExtractError>;

/// The six locators describing where entities live in a document.
///
/// Keys match the original `config.json` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// One match per entity.
    #[serde(rename = "objectRowSelector")]
    pub row: String,
    #[serde(rename = "objectRowToNameSelector")]
    pub name: String,
    #[serde(rename = "objectRowToPropertiesSelector")]
    pub properties: String,
    #[serde(rename = "objectRowToInheritanceSelector")]
    pub inheritance: String,
    #[serde(rename = "propertyRowToNameSelector")]
    pub property_name: String,
    #[serde(rename = "propertyRowToTypeSelector")]
    pub property_type: String,
}

/// An entity as scraped, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntity {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: Option<Vec<TypedProperty>>,
    #[serde(default)]
    pub inherits: Option<String>,
}

/// Compiled locators, ready to run against any number of documents.
#[derive(Debug, Clone)]
pub struct StructuralExtractor {
    row: Selector,
    name: Selector,
    properties: Selector,
    inheritance: Selector,
    property_name: Selector,
    property_type: Selector,
}

impl StructuralExtractor {
    pub fn new(config: &LocatorConfig) -> LocatorResult<Self> {
        Ok(Self {
            row: Selector::parse(&config.row)?,
            name: Selector::parse(&config.name)?,
            properties: Selector::parse(&config.properties)?,
            inheritance: Selector::parse(&config.inheritance)?,
            property_name: Selector::parse(&config.property_name)?,
            property_type: Selector::parse(&config.property_type)?,
        })
    }

    /// Parses `source` as HTML and extracts one record per row, in document order.
    ///
    /// Parsing never fails: markup errors are recovered the way browsers do.
    pub fn extract(&self, source: &str) -> ExtractResult<Vec<RawEntity>> {
        let document = Html::parse_document(source);
        if !document.errors.is_empty() {
            debug!(errors = document.errors.len(), "recovered from markup errors");
        }
        self.extract_from(&document)
    }

    pub fn extract_from(&self, document: &Html) -> ExtractResult<Vec<RawEntity>> {
        self.row
            .select_document(document)
            .into_iter()
            .enumerate()
            .map(|(index, row)| self.extract_row(index, row))
            .collect()
    }

    fn extract_row(&self, index: usize, row: ElementRef<'_>) -> ExtractResult<RawEntity> {
        let name_node = self
            .name
            .select_first(row)
            .ok_or(ExtractError::MissingName { row: index })?;

        let properties = self
            .properties
            .select_all(row)
            .into_iter()
            .filter_map(|property| self.extract_property(index, property))
            .collect();

        let inherits = self.inheritance.select_first(row).map(text_content);

        Ok(RawEntity {
            name: Some(text_content(name_node)),
            properties: Some(properties),
            inherits,
        })
    }

    /// A property row lacking either its name or its type node does not exist.
    fn extract_property(&self, row: usize, property: ElementRef<'_>) -> Option<TypedProperty> {
        let name = self.property_name.select_first(property);
        let type_name = self.property_type.select_first(property);

        match (name, type_name) {
            (Some(name), Some(type_name)) => {
                Some(TypedProperty::new(text_content(name), text_content(type_name)))
            }
            _ => {
                debug!(row, "skipping property row without name or type node");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_locators() -> LocatorConfig {
        LocatorConfig {
            row: "body table#objects > tbody > tr".into(),
            name: "td:first-child".into(),
            properties: "td:last-child > table > tbody > tr".into(),
            inheritance: "td > span".into(),
            property_name: "td:first-child".into(),
            property_type: "td:last-child".into(),
        }
    }

    const DOC: &str = r#"<!DOCTYPE html>
<html>
  <body>
    <table id="objects">
      <tbody>
        <tr>
          <td>Frame</td>
          <td><span>Node</span></td>
          <td>
            <table><tbody>
              <tr><td>children</td><td>Node[]</td></tr>
              <tr><th>orphan</th></tr>
              <tr><td>  clips
                content </td><td>Boolean</td></tr>
            </tbody></table>
          </td>
        </tr>
        <tr>
          <td>Paint</td>
          <td></td>
          <td><table><tbody></tbody></table></td>
        </tr>
      </tbody>
    </table>
  </body>
</html>"#;

    #[test]
    fn test_extracts_rows_in_order() {
        let extractor = StructuralExtractor::new(&table_locators()).unwrap();
        let records = extractor.extract(DOC).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name.as_deref(), Some("Frame"));
        assert_eq!(records[0].inherits.as_deref(), Some("Node"));
        assert_eq!(records[1].name.as_deref(), Some("Paint"));
        assert_eq!(records[1].inherits, None);
        assert_eq!(records[1].properties, Some(Vec::new()));
    }

    #[test]
    fn test_skips_incomplete_property_rows() {
        let extractor = StructuralExtractor::new(&table_locators()).unwrap();
        let records = extractor.extract(DOC).unwrap();

        assert_eq!(
            records[0].properties,
            Some(vec![
                TypedProperty::new("children", "Node[]"),
                TypedProperty::new("clips content", "Boolean"),
            ])
        );
    }

    #[test]
    fn test_missing_name_is_fatal() {
        let locators = LocatorConfig {
            name: "td.name".into(),
            ..table_locators()
        };
        let extractor = StructuralExtractor::new(&locators).unwrap();

        assert!(matches!(
            extractor.extract(DOC),
            Err(ExtractError::MissingName { row: 0 })
        ));
    }

    #[test]
    fn test_extracts_from_plain_html() {
        let page = r#"<!doctype html>
<html lang=en>
<head><meta charset="utf-8"><title>Figma API</title></head>
<body>
<table id=objects>
  <tr>
    <td>Frame<br>
    <td><span>Node</span>
    <td><table>
      <tr><td>clips&nbsp;content<td>Boolean
      <tr><td>effects<td>Effect[]
    </table>
</table>
</body>
</html>"#;
        let extractor = StructuralExtractor::new(&table_locators()).unwrap();
        let records = extractor.extract(page).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_deref(), Some("Frame"));
        assert_eq!(records[0].inherits.as_deref(), Some("Node"));
        assert_eq!(
            records[0].properties,
            Some(vec![
                TypedProperty::new("clips content", "Boolean"),
                TypedProperty::new("effects", "Effect[]"),
            ])
        );
    }

    #[test]
    fn test_property_row_without_type_node_is_dropped() {
        let page = r#"<html><body><table id="objects"><tbody>
<tr>
  <td>Frame</td>
  <td><table><tbody>
    <tr><td class="name">children</td><td class="type">Node[]</td></tr>
    <tr><td class="name">locked</td><td>Boolean</td></tr>
    <tr><td>orphan</td><td class="type">String</td></tr>
    <tr><td class="name">visible</td><td class="type">Boolean</td></tr>
  </tbody></table></td>
</tr>
</tbody></table></body></html>"#;
        let locators = LocatorConfig {
            property_name: "td.name".into(),
            property_type: "td.type".into(),
            ..table_locators()
        };
        let extractor = StructuralExtractor::new(&locators).unwrap();
        let records = extractor.extract(page).unwrap();

        assert_eq!(
            records[0].properties,
            Some(vec![
                TypedProperty::new("children", "Node[]"),
                TypedProperty::new("visible", "Boolean"),
            ])
        );
    }

    #[test]
    fn test_no_rows() {
        let extractor = StructuralExtractor::new(&table_locators()).unwrap();
        let records = extractor.extract("<html><body></body></html>").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_invalid_locator() {
        let locators = LocatorConfig {
            property_type: "td:last-child >".into(),
            ..table_locators()
        };
        assert!(StructuralExtractor::new(&locators).is_err());
    }

    #[test]
    fn test_locator_config_uses_original_keys() {
        let json = serde_json::to_value(table_locators()).unwrap();
        assert_eq!(json["objectRowSelector"], "body table#objects > tbody > tr");
        assert_eq!(json["propertyRowToTypeSelector"], "td:last-child");
    }

    #[test]
    fn test_raw_entity_fields_optional_in_json() {
        let raw: RawEntity = serde_json::from_str(r#"{ "name": "Frame" }"#).unwrap();
        assert_eq!(raw.name.as_deref(), Some("Frame"));
        assert_eq!(raw.properties, None);
        assert_eq!(raw.inherits, None);
    }
}
