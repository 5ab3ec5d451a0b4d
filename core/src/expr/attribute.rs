use super::{CallSite, DataType, Describable, ExprId, HasMeta, MetaMap, Validation, Value};

/// An attribute: a named, typed piece of data.
///
/// Object attributes own their fields as child attributes, in declaration
/// order. Duplicate field names are kept so the validate phase can report
/// them.
#[derive(Debug, Clone)]
pub struct AttributeExpr {
    /// `None` for the root attribute of a type, payload, result or body.
    pub name: Option<String>,
    pub data_type: DataType,
    pub description: Option<String>,
    pub fields: Vec<(String, ExprId)>,
    pub validation: Validation,
    pub default_value: Option<Value>,
    pub example: Option<Value>,
    pub meta: MetaMap,
    pub location: CallSite,
}

impl AttributeExpr {
    pub fn new(name: Option<String>, data_type: DataType, location: CallSite) -> Self {
        Self {
            name,
            data_type,
            description: None,
            fields: Vec::new(),
            validation: Validation::default(),
            default_value: None,
            example: None,
            meta: MetaMap::default(),
            location,
        }
    }

    /// Look up a field by name. The first declaration wins.
    pub fn field(&self, name: &str) -> Option<ExprId> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, id)| *id)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.validation.required.iter().any(|r| r == name)
    }
}

impl HasMeta for AttributeExpr {
    fn meta(&self) -> &MetaMap {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut MetaMap {
        &mut self.meta
    }
}

impl Describable for AttributeExpr {
    fn set_description(&mut self, description: String) {
        self.description = Some(description);
    }
}
