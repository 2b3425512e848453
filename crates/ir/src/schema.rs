//! Resolved schema model
//!
//! A [`Schema`] is the typed snapshot the compiler works on. It is extracted
//! once from a [`Diagram`]: only classes classified as tables become
//! [`Table`]s, attribute types are resolved to [`ColumnType`], defaults to
//! [`DefaultValue`], and associations between two tables become
//! [`Association`] edges.

use crate::diagram::{
    AssociationElement, AttributeElement, AttributeType, ClassElement, Diagram,
    EnumerationElement, OwnedElement,
};
use crate::naming;
use schemaforge_core::{ColumnKind, SizeArgs};
use std::collections::{HashMap, HashSet};

/// Column names handled by the `timestamps()` convenience statement
pub const TIMESTAMP_COLUMNS: [&str; 2] = ["created_at", "updated_at"];

// ============================================================================
// Schema
// ============================================================================

/// Typed tables, enumerations and foreign-key edges of one diagram
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Diagram name
    pub name: String,

    /// Tables in diagram order
    pub tables: Vec<Table>,

    /// Enumerations in diagram order
    pub enumerations: Vec<Enumeration>,

    /// Associations where both ends are tables
    pub associations: Vec<Association>,
}

impl Schema {
    /// Extract the schema from a diagram.
    ///
    /// Classes whose classification is not "table" are ignored, as are
    /// associations touching them. Unrecognized attribute types degrade to
    /// `text` columns. Elements repeated on several views are read once.
    pub fn from_diagram(diagram: &Diagram) -> Schema {
        let mut seen_classes: HashSet<&str> = HashSet::new();
        let table_classes: Vec<&ClassElement> = diagram
            .classes()
            .filter(|c| c.is_table())
            .filter(|c| seen_classes.insert(c.id.as_str()))
            .collect();

        let mut seen_enums: HashSet<&str> = HashSet::new();
        let enumerations: Vec<Enumeration> = diagram
            .enumerations()
            .filter(|e| seen_enums.insert(e.id.as_str()))
            .map(Enumeration::from_element)
            .collect();

        let enum_by_id: HashMap<&str, &str> = enumerations
            .iter()
            .map(|e| (e.id.as_str(), e.name.as_str()))
            .collect();

        let tables: Vec<Table> = table_classes
            .iter()
            .map(|class| Table {
                id: class.id.clone(),
                name: class.name.clone(),
                columns: class
                    .attributes
                    .iter()
                    .map(|attr| Column::from_element(attr, &enum_by_id))
                    .collect(),
            })
            .collect();

        let table_names: HashMap<&str, &str> = tables
            .iter()
            .map(|t| (t.id.as_str(), t.name.as_str()))
            .collect();

        let mut seen_assocs: HashSet<String> = HashSet::new();
        let mut associations = Vec::new();
        for class in &table_classes {
            for owned in &class.owned_elements {
                let OwnedElement::Association(element) = owned else {
                    continue;
                };
                if !element.id.is_empty() && !seen_assocs.insert(element.id.clone()) {
                    continue;
                }
                match Association::from_element(element, &table_names) {
                    Some(assoc) => associations.push(assoc),
                    None => tracing::debug!(
                        association = %element.id,
                        "association does not connect two tables; skipped"
                    ),
                }
            }
        }

        tracing::debug!(
            tables = tables.len(),
            enumerations = enumerations.len(),
            associations = associations.len(),
            "schema extracted from diagram"
        );

        Schema {
            name: diagram.name.clone(),
            tables,
            enumerations,
            associations,
        }
    }

    /// Get a table by id
    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// Get an enumeration by name
    pub fn enumeration(&self, name: &str) -> Option<&Enumeration> {
        self.enumerations.iter().find(|e| e.name == name)
    }

    /// Associations where the given table holds the foreign key
    pub fn outgoing(&self, table_id: &str) -> Vec<&Association> {
        self.associations
            .iter()
            .filter(|a| a.referencing_table == table_id)
            .collect()
    }

    /// Whether the schema has anything to compile
    pub fn has_tables(&self) -> bool {
        !self.tables.is_empty()
    }
}

// ============================================================================
// Table
// ============================================================================

/// A diagram class classified as a table
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Element id
    pub id: String,

    /// Display name
    pub name: String,

    /// Columns in attribute order
    pub columns: Vec<Column>,
}

impl Table {
    /// Columns flagged as (part of) the primary key, in attribute order
    pub fn primary_key_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_primary_key).collect()
    }

    /// Number of primary-key columns
    pub fn primary_key_count(&self) -> usize {
        self.columns.iter().filter(|c| c.is_primary_key).count()
    }

    /// Whether a `created_at` or `updated_at` column is present
    pub fn has_timestamps(&self) -> bool {
        self.columns.iter().any(Column::is_timestamp)
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of the enumerations referenced by this table's columns,
    /// in first-use order
    pub fn referenced_enums(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for column in &self.columns {
            if let ColumnType::EnumRef(name) = &column.column_type {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}

// ============================================================================
// Column
// ============================================================================

/// A table column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name
    pub name: String,

    /// Resolved type
    pub column_type: ColumnType,

    /// Part of the primary key
    pub is_primary_key: bool,

    /// Unique constraint
    pub is_unique: bool,

    /// Default value, if any
    pub default_value: Option<DefaultValue>,

    /// Documentation, rendered as a column comment
    pub documentation: Option<String>,

    /// Free-text classification ("index" requests a secondary index)
    pub classification: String,
}

impl Column {
    /// Create a column of a primitive kind without size arguments
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Primitive { kind, args: None },
            is_primary_key: false,
            is_unique: false,
            default_value: None,
            documentation: None,
            classification: String::new(),
        }
    }

    fn from_element(attr: &AttributeElement, enum_by_id: &HashMap<&str, &str>) -> Self {
        let documentation = attr.documentation.trim();
        Self {
            name: attr.name.clone(),
            column_type: ColumnType::resolve(attr, enum_by_id),
            is_primary_key: attr.is_id,
            is_unique: attr.is_unique,
            default_value: DefaultValue::parse(&attr.default_value),
            documentation: (!documentation.is_empty()).then(|| documentation.to_string()),
            classification: attr.classification.trim().to_string(),
        }
    }

    /// `created_at` or `updated_at`
    pub fn is_timestamp(&self) -> bool {
        TIMESTAMP_COLUMNS.contains(&self.name.as_str())
    }

    /// Whether the classification requests a secondary index
    pub fn wants_index(&self) -> bool {
        let tag = self.classification.as_str();
        tag.eq_ignore_ascii_case("index") || tag.eq_ignore_ascii_case("in")
    }

    /// Whether the classification encodes a foreign key
    /// (`fk`, `fk:table.column`, `foreign ...`)
    pub fn has_foreign_key_tag(&self) -> bool {
        let tag = self.classification.to_ascii_lowercase();
        tag == "fk" || tag.starts_with("fk:") || tag.starts_with("foreign")
    }

    /// Name of the referenced enumeration, if enum-typed
    pub fn enum_name(&self) -> Option<&str> {
        match &self.column_type {
            ColumnType::EnumRef(name) => Some(name.as_str()),
            ColumnType::Primitive { .. } => None,
        }
    }
}

/// A column type resolved from the diagram
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
    /// A schema-builder column kind with optional size arguments
    Primitive {
        kind: ColumnKind,
        args: Option<SizeArgs>,
    },
    /// A column restricted to the literals of an enumeration
    EnumRef(String),
}

impl ColumnType {
    fn resolve(attr: &AttributeElement, enum_by_id: &HashMap<&str, &str>) -> Self {
        let args = attr.multiplicity.as_deref().and_then(SizeArgs::parse);

        match &attr.attribute_type {
            AttributeType::Reference { reference } => match enum_by_id.get(reference.as_str()) {
                Some(name) => ColumnType::EnumRef(name.to_string()),
                None => {
                    tracing::debug!(
                        column = %attr.name,
                        reference = %reference,
                        "type reference is not an enumeration; falling back to text"
                    );
                    ColumnType::text()
                }
            },
            AttributeType::Name(type_name) => {
                if let Some(kind) = ColumnKind::parse(type_name) {
                    return ColumnType::Primitive { kind, args };
                }
                if let Some(name) = enum_by_id.values().find(|n| **n == type_name.trim()) {
                    return ColumnType::EnumRef(name.to_string());
                }
                tracing::debug!(
                    column = %attr.name,
                    type_name = %type_name,
                    "unrecognized column type; falling back to text"
                );
                ColumnType::text()
            }
            AttributeType::Other(value) => {
                tracing::debug!(
                    column = %attr.name,
                    declared = %value,
                    "unreadable column type; falling back to text"
                );
                ColumnType::text()
            }
        }
    }

    /// The generic fallback kind
    pub fn text() -> Self {
        ColumnType::Primitive {
            kind: ColumnKind::Text,
            args: None,
        }
    }
}

/// A column default
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// The `null` sentinel: the column is nullable
    Null,
    /// Literal default text, emitted verbatim
    Literal(String),
}

impl DefaultValue {
    /// Parse default text. Blank text means no default.
    pub fn parse(text: &str) -> Option<DefaultValue> {
        let text = text.trim();
        if text.is_empty() {
            None
        } else if text.eq_ignore_ascii_case("null") {
            Some(DefaultValue::Null)
        } else {
            Some(DefaultValue::Literal(text.to_string()))
        }
    }
}

// ============================================================================
// Enumeration
// ============================================================================

/// An enumeration and its literals
#[derive(Debug, Clone, PartialEq)]
pub struct Enumeration {
    /// Element id
    pub id: String,

    /// Display name
    pub name: String,

    /// Literals in declaration order
    pub literals: Vec<Literal>,
}

impl Enumeration {
    fn from_element(element: &EnumerationElement) -> Self {
        Self {
            id: element.id.clone(),
            name: element.name.clone(),
            literals: element
                .literals
                .iter()
                .map(|l| Literal {
                    name: l.name.clone(),
                    documentation: {
                        let doc = l.documentation.trim();
                        (!doc.is_empty()).then(|| doc.to_string())
                    },
                })
                .collect(),
        }
    }

    /// Literal names in declaration order
    pub fn literal_names(&self) -> Vec<&str> {
        self.literals.iter().map(|l| l.name.as_str()).collect()
    }
}

/// An enumeration literal
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// Literal name; also its value
    pub name: String,

    /// Documentation, rendered as a doc block
    pub documentation: Option<String>,
}

// ============================================================================
// Association
// ============================================================================

/// A foreign-key edge between two tables
#[derive(Debug, Clone, PartialEq)]
pub struct Association {
    /// Element id
    pub id: String,

    /// Id of the table holding the foreign key
    pub referencing_table: String,

    /// Foreign-key column on the referencing table
    pub referencing_column: String,

    /// Id of the referenced table
    pub referenced_table: String,

    /// Referenced column
    pub referenced_column: String,
}

impl Association {
    fn from_element(
        element: &AssociationElement,
        table_names: &HashMap<&str, &str>,
    ) -> Option<Self> {
        table_names.get(element.end1.reference.as_str())?;
        let referenced_name = table_names.get(element.end2.reference.as_str())?;

        let referencing_column = match element.end1.name.trim() {
            "" => naming::foreign_key_column(referenced_name),
            name => name.to_string(),
        };
        let referenced_column = match element.end2.name.trim() {
            "" => "id".to_string(),
            name => name.to_string(),
        };

        Some(Self {
            id: element.id.clone(),
            referencing_table: element.end1.reference.clone(),
            referencing_column,
            referenced_table: element.end2.reference.clone(),
            referenced_column,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{AssociationElement, ClassElement, EnumerationElement, ModelElement};
    use pretty_assertions::assert_eq;

    fn shop_diagram() -> Diagram {
        Diagram::new("Shop")
            .with_element(ModelElement::Class(
                ClassElement::table("o1", "Order")
                    .with_attribute(AttributeElement::new("id", "bigIncrements").id())
                    .with_attribute(AttributeElement::new("customer_id", "unsignedBigInteger"))
                    .with_attribute(AttributeElement::referencing("status", "e1").with_default("Active"))
                    .with_association(AssociationElement::new(
                        "a1",
                        ("customer_id", "o1"),
                        ("id", "c1"),
                    )),
            ))
            .with_element(ModelElement::Class(
                ClassElement::table("c1", "Customer")
                    .with_attribute(AttributeElement::new("id", "bigIncrements").id())
                    .with_attribute(AttributeElement::new("bio", "text").with_default("NULL")),
            ))
            .with_element(ModelElement::Class(
                ClassElement::new("x1", "Helper").classified("Service"),
            ))
            .with_element(ModelElement::Enumeration(EnumerationElement::new(
                "e1",
                "Status",
                &["Active", "Archived"],
            )))
    }

    #[test]
    fn test_only_tables_are_extracted() {
        let schema = Schema::from_diagram(&shop_diagram());
        let names: Vec<&str> = schema.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Order", "Customer"]);
        assert_eq!(schema.enumerations.len(), 1);
    }

    #[test]
    fn test_enum_reference_resolution() {
        let schema = Schema::from_diagram(&shop_diagram());
        let order = schema.table("o1").unwrap();
        let status = order.column("status").unwrap();
        assert_eq!(status.column_type, ColumnType::EnumRef("Status".to_string()));
        assert_eq!(
            status.default_value,
            Some(DefaultValue::Literal("Active".to_string()))
        );
        assert_eq!(order.referenced_enums(), vec!["Status"]);
    }

    #[test]
    fn test_enum_name_typed_as_text_resolves_to_enum() {
        let diagram = Diagram::new("d")
            .with_element(ModelElement::Enumeration(EnumerationElement::new(
                "e1",
                "Status",
                &["Active"],
            )))
            .with_element(ModelElement::Class(
                ClassElement::table("t1", "Post").with_attribute(AttributeElement::new("state", "Status")),
            ));
        let schema = Schema::from_diagram(&diagram);
        assert_eq!(
            schema.tables[0].columns[0].column_type,
            ColumnType::EnumRef("Status".to_string())
        );
    }

    #[test]
    fn test_unknown_type_falls_back_to_text() {
        let diagram = Diagram::new("d").with_element(ModelElement::Class(
            ClassElement::table("t1", "Post")
                .with_attribute(AttributeElement::new("body", "VARCHAR2"))
                .with_attribute(AttributeElement::new("misc", ""))
                .with_attribute(AttributeElement::referencing("owner", "t1")),
        ));
        let schema = Schema::from_diagram(&diagram);
        for column in &schema.tables[0].columns {
            assert_eq!(column.column_type, ColumnType::text(), "{}", column.name);
        }
    }

    #[test]
    fn test_multiplicity_resolution() {
        let diagram = Diagram::new("d").with_element(ModelElement::Class(
            ClassElement::table("t1", "Product")
                .with_attribute(AttributeElement::new("price", "decimal").with_multiplicity("8..2"))
                .with_attribute(AttributeElement::new("sku", "string").with_multiplicity("64")),
        ));
        let schema = Schema::from_diagram(&diagram);
        let columns = &schema.tables[0].columns;
        assert_eq!(
            columns[0].column_type,
            ColumnType::Primitive {
                kind: ColumnKind::Decimal,
                args: Some(SizeArgs::Pair("8".to_string(), "2".to_string())),
            }
        );
        assert_eq!(
            columns[1].column_type,
            ColumnType::Primitive {
                kind: ColumnKind::String,
                args: Some(SizeArgs::Raw("64".to_string())),
            }
        );
    }

    #[test]
    fn test_default_value_parsing() {
        assert_eq!(DefaultValue::parse(""), None);
        assert_eq!(DefaultValue::parse("  "), None);
        assert_eq!(DefaultValue::parse("null"), Some(DefaultValue::Null));
        assert_eq!(DefaultValue::parse("NuLL"), Some(DefaultValue::Null));
        assert_eq!(
            DefaultValue::parse("'draft'"),
            Some(DefaultValue::Literal("'draft'".to_string()))
        );
    }

    #[test]
    fn test_associations_between_tables_only() {
        let diagram = shop_diagram().with_element(ModelElement::Class(
            ClassElement::table("p1", "Payment").with_association(AssociationElement::new(
                "a2",
                ("helper_id", "p1"),
                ("id", "x1"),
            )),
        ));
        let schema = Schema::from_diagram(&diagram);
        assert_eq!(schema.associations.len(), 1);

        let assoc = &schema.associations[0];
        assert_eq!(assoc.referencing_table, "o1");
        assert_eq!(assoc.referencing_column, "customer_id");
        assert_eq!(assoc.referenced_table, "c1");
        assert_eq!(assoc.referenced_column, "id");
        assert_eq!(schema.outgoing("o1").len(), 1);
        assert!(schema.outgoing("c1").is_empty());
    }

    #[test]
    fn test_association_listed_twice_is_read_once() {
        let assoc = AssociationElement::new("a1", ("customer_id", "o1"), ("id", "c1"));
        let diagram = Diagram::new("d")
            .with_element(ModelElement::Class(
                ClassElement::table("o1", "Order").with_association(assoc.clone()),
            ))
            .with_element(ModelElement::Class(
                ClassElement::table("c1", "Customer").with_association(assoc),
            ));
        assert_eq!(Schema::from_diagram(&diagram).associations.len(), 1);
    }

    #[test]
    fn test_association_default_column_names() {
        let diagram = Diagram::new("d")
            .with_element(ModelElement::Class(
                ClassElement::table("o1", "Order")
                    .with_association(AssociationElement::new("a1", ("", "o1"), ("", "c1"))),
            ))
            .with_element(ModelElement::Class(ClassElement::table("c1", "BlogPost")));
        let schema = Schema::from_diagram(&diagram);
        assert_eq!(schema.associations[0].referencing_column, "blog_post_id");
        assert_eq!(schema.associations[0].referenced_column, "id");
    }

    #[test]
    fn test_column_tags() {
        let mut column = Column::new("email", ColumnKind::String);
        column.classification = "INDEX".to_string();
        assert!(column.wants_index());
        column.classification = "In".to_string();
        assert!(column.wants_index());
        column.classification = "inline".to_string();
        assert!(!column.wants_index());

        column.classification = "FK:customer.id".to_string();
        assert!(column.has_foreign_key_tag());
        column.classification = "index".to_string();
        assert!(!column.has_foreign_key_tag());
    }

    #[test]
    fn test_primary_keys_and_timestamps() {
        let mut a = Column::new("order_id", ColumnKind::UnsignedBigInteger);
        a.is_primary_key = true;
        let mut b = Column::new("product_id", ColumnKind::UnsignedBigInteger);
        b.is_primary_key = true;
        let table = Table {
            id: "t1".to_string(),
            name: "OrderLine".to_string(),
            columns: vec![a, b, Column::new("updated_at", ColumnKind::Timestamp)],
        };
        assert_eq!(table.primary_key_count(), 2);
        let names: Vec<&str> = table
            .primary_key_columns()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["order_id", "product_id"]);
        assert!(table.has_timestamps());
    }
}
