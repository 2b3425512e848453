//! Diagram document model
//!
//! This module mirrors the shape of a class diagram exported by the host
//! modelling tool: a list of views, each carrying a model element. Elements
//! are kept exactly as the tool describes them (free-text classification,
//! attribute types that are either a name or a reference object). They are
//! resolved into typed [`Schema`](crate::Schema) entities by
//! [`Schema::from_diagram`](crate::Schema::from_diagram).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// Diagram
// ============================================================================

/// A class diagram: the root of a diagram document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    /// Diagram name (informational)
    #[serde(default)]
    pub name: String,

    /// Views placed on the diagram, in diagram order
    #[serde(default)]
    pub views: Vec<View>,
}

impl Diagram {
    /// Create an empty diagram
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            views: Vec::new(),
        }
    }

    /// Add a view wrapping the given model element
    pub fn with_element(mut self, model: ModelElement) -> Self {
        self.views.push(View { model });
        self
    }

    /// Iterate over the class elements on this diagram
    pub fn classes(&self) -> impl Iterator<Item = &ClassElement> {
        self.views.iter().filter_map(|view| match &view.model {
            ModelElement::Class(class) => Some(class),
            _ => None,
        })
    }

    /// Iterate over the enumeration elements on this diagram
    pub fn enumerations(&self) -> impl Iterator<Item = &EnumerationElement> {
        self.views.iter().filter_map(|view| match &view.model {
            ModelElement::Enumeration(enumeration) => Some(enumeration),
            _ => None,
        })
    }
}

/// A view on the diagram canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// The model element this view displays
    pub model: ModelElement,
}

/// A model element displayed by a view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ModelElement {
    /// A class; becomes a table when classified as "Table"
    Class(ClassElement),
    /// An enumeration with literals
    Enumeration(EnumerationElement),
    /// Notes, packages and anything else the compiler does not read
    #[serde(other)]
    Other,
}

// ============================================================================
// Classes
// ============================================================================

/// A class element and its attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassElement {
    /// Element id, unique within the diagram
    pub id: String,

    /// Display name
    pub name: String,

    /// Free-text classification (stereotype), e.g. "Table"
    #[serde(default, deserialize_with = "lenient_text")]
    pub classification: String,

    /// Attributes in declaration order
    #[serde(default)]
    pub attributes: Vec<AttributeElement>,

    /// Elements owned by this class (associations among them)
    #[serde(default)]
    pub owned_elements: Vec<OwnedElement>,
}

impl ClassElement {
    /// Create a class element
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a class element classified as a table
    pub fn table(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name).classified("Table")
    }

    /// Set the classification
    pub fn classified(mut self, classification: impl Into<String>) -> Self {
        self.classification = classification.into();
        self
    }

    /// Add an attribute
    pub fn with_attribute(mut self, attribute: AttributeElement) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add an owned association
    pub fn with_association(mut self, association: AssociationElement) -> Self {
        self.owned_elements
            .push(OwnedElement::Association(association));
        self
    }

    /// Whether this class is classified for schema generation
    pub fn is_table(&self) -> bool {
        self.classification.trim().eq_ignore_ascii_case("table")
    }
}

/// A class attribute (a column once resolved)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeElement {
    /// Attribute name
    pub name: String,

    /// Declared type: a type name or a reference to another element
    #[serde(rename = "type", default)]
    pub attribute_type: AttributeType,

    /// Size/precision text, e.g. "255" or "8..2"
    #[serde(default, deserialize_with = "lenient_optional_text")]
    pub multiplicity: Option<String>,

    /// Part of the primary key
    #[serde(default, alias = "isID")]
    pub is_id: bool,

    /// Unique constraint
    #[serde(default)]
    pub is_unique: bool,

    /// Default value text; "null" marks the column nullable
    #[serde(default, deserialize_with = "lenient_text")]
    pub default_value: String,

    /// Documentation text
    #[serde(default, deserialize_with = "lenient_text")]
    pub documentation: String,

    /// Free-text classification, e.g. "index"
    #[serde(default, deserialize_with = "lenient_text")]
    pub classification: String,
}

impl AttributeElement {
    /// Create an attribute with a named type
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute_type: AttributeType::Name(type_name.into()),
            ..Default::default()
        }
    }

    /// Create an attribute typed by a reference to another element
    pub fn referencing(name: impl Into<String>, element_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute_type: AttributeType::Reference {
                reference: element_id.into(),
            },
            ..Default::default()
        }
    }

    /// Mark as (part of) the primary key
    pub fn id(mut self) -> Self {
        self.is_id = true;
        self
    }

    /// Mark as unique
    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    /// Set the multiplicity
    pub fn with_multiplicity(mut self, multiplicity: impl Into<String>) -> Self {
        self.multiplicity = Some(multiplicity.into());
        self
    }

    /// Set the default value
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Set the documentation
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    /// Set the classification
    pub fn classified(mut self, classification: impl Into<String>) -> Self {
        self.classification = classification.into();
        self
    }
}

/// The declared type of an attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeType {
    /// A type typed in as text
    Name(String),
    /// A reference to another element of the diagram (an enumeration)
    Reference {
        #[serde(rename = "$ref")]
        reference: String,
    },
    /// Anything else the tool may write (`null`, numbers, foreign objects)
    Other(Value),
}

impl Default for AttributeType {
    fn default() -> Self {
        AttributeType::Name(String::new())
    }
}

// ============================================================================
// Lenient text fields
// ============================================================================

/// Free-text fields accept `null` (empty), strings, and scalars written
/// without quotes. Other shapes read as empty text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_text(deserializer)?.unwrap_or_default())
}

fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    })
}

// ============================================================================
// Owned elements and associations
// ============================================================================

/// An element owned by a class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OwnedElement {
    /// A binary association between two classes
    Association(AssociationElement),
    /// Generalizations, dependencies, operations and the like
    #[serde(other)]
    Other,
}

/// An association between two classes.
///
/// `end1` is the referencing side (the column holding the foreign key),
/// `end2` the referenced side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationElement {
    /// Element id, unique within the diagram
    #[serde(default)]
    pub id: String,

    /// Referencing end
    pub end1: AssociationEnd,

    /// Referenced end
    pub end2: AssociationEnd,
}

impl AssociationElement {
    /// Create an association from `(column, class id)` on each end
    pub fn new(
        id: impl Into<String>,
        referencing: (&str, &str),
        referenced: (&str, &str),
    ) -> Self {
        Self {
            id: id.into(),
            end1: AssociationEnd::new(referencing.0, referencing.1),
            end2: AssociationEnd::new(referenced.0, referenced.1),
        }
    }
}

/// One end of an association
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationEnd {
    /// Column name on this end
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,

    /// Id of the class owning this end
    pub reference: String,
}

impl AssociationEnd {
    /// Create an association end
    pub fn new(name: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reference: reference.into(),
        }
    }
}

/// An enumeration element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumerationElement {
    /// Element id, unique within the diagram
    pub id: String,

    /// Display name
    pub name: String,

    /// Literals in declaration order
    #[serde(default)]
    pub literals: Vec<LiteralElement>,
}

impl EnumerationElement {
    /// Create an enumeration from literal names
    pub fn new(id: impl Into<String>, name: impl Into<String>, literals: &[&str]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            literals: literals
                .iter()
                .map(|l| LiteralElement {
                    name: l.to_string(),
                    documentation: String::new(),
                })
                .collect(),
        }
    }
}

/// An enumeration literal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiteralElement {
    /// Literal name
    pub name: String,

    /// Documentation text
    #[serde(default, deserialize_with = "lenient_text")]
    pub documentation: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_table_ignores_case_and_whitespace() {
        assert!(ClassElement::new("c1", "User").classified("Table").is_table());
        assert!(ClassElement::new("c1", "User").classified(" TABLE ").is_table());
        assert!(!ClassElement::new("c1", "User").classified("View").is_table());
        assert!(!ClassElement::new("c1", "User").is_table());
    }

    #[test]
    fn test_deserialize_document() {
        let json = r#"{
            "name": "Shop",
            "views": [
                { "model": {
                    "kind": "class", "id": "c1", "name": "Customer",
                    "classification": "Table",
                    "attributes": [
                        { "name": "id", "type": "bigIncrements", "isID": true },
                        { "name": "status", "type": { "$ref": "e1" } }
                    ],
                    "ownedElements": [
                        { "kind": "generalization", "source": "c1" },
                        { "kind": "association", "id": "a1",
                          "end1": { "name": "customer_id", "reference": "o1" },
                          "end2": { "name": "id", "reference": "c1" } }
                    ]
                } },
                { "model": { "kind": "note", "text": "ignored" } },
                { "model": { "kind": "enumeration", "id": "e1", "name": "Status",
                    "literals": [ { "name": "Active" } ] } }
            ]
        }"#;

        let diagram: Diagram = serde_json::from_str(json).unwrap();
        assert_eq!(diagram.name, "Shop");
        assert_eq!(diagram.views.len(), 3);
        assert_eq!(diagram.views[1].model, ModelElement::Other);

        let customer = diagram.classes().next().unwrap();
        assert!(customer.is_table());
        assert!(customer.attributes[0].is_id);
        assert_eq!(
            customer.attributes[1].attribute_type,
            AttributeType::Reference {
                reference: "e1".to_string()
            }
        );
        assert_eq!(customer.owned_elements[0], OwnedElement::Other);
        assert!(matches!(
            customer.owned_elements[1],
            OwnedElement::Association(_)
        ));

        let status = diagram.enumerations().next().unwrap();
        assert_eq!(status.literals[0].name, "Active");
        assert!(status.literals[0].documentation.is_empty());
    }

    #[test]
    fn test_deserialize_tolerates_odd_attribute_values() {
        let json = r#"{
            "name": "Odd",
            "views": [
                { "model": {
                    "kind": "class", "id": "c1", "name": "Thing", "classification": null,
                    "attributes": [
                        { "name": "a", "type": null, "defaultValue": null, "documentation": null },
                        { "name": "b", "type": 42, "multiplicity": 191, "defaultValue": 0 },
                        { "name": "c", "type": { "name": "Foreign" }, "classification": null }
                    ]
                } },
                { "model": { "kind": "enumeration", "id": "e1", "name": "Status",
                    "literals": [ { "name": "Active", "documentation": null } ] } }
            ]
        }"#;

        let diagram: Diagram = serde_json::from_str(json).unwrap();
        let thing = diagram.classes().next().unwrap();
        assert!(thing.classification.is_empty());

        let [a, b, c] = &thing.attributes[..] else {
            panic!("expected three attributes");
        };
        assert_eq!(a.attribute_type, AttributeType::Other(Value::Null));
        assert!(a.default_value.is_empty());
        assert!(a.documentation.is_empty());
        assert!(matches!(b.attribute_type, AttributeType::Other(_)));
        assert_eq!(b.multiplicity.as_deref(), Some("191"));
        assert_eq!(b.default_value, "0");
        assert!(matches!(c.attribute_type, AttributeType::Other(_)));
        assert!(c.classification.is_empty());
    }

    #[test]
    fn test_builders() {
        let attr = AttributeElement::new("price", "decimal")
            .with_multiplicity("8..2")
            .with_default("0")
            .unique();
        assert_eq!(attr.multiplicity.as_deref(), Some("8..2"));
        assert_eq!(attr.default_value, "0");
        assert!(attr.is_unique);
        assert!(!attr.is_id);

        let class = ClassElement::table("o1", "Order").with_association(
            AssociationElement::new("a1", ("customer_id", "o1"), ("id", "c1")),
        );
        assert_eq!(class.owned_elements.len(), 1);
    }
}
