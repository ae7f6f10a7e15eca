use super::Field;
use crate::{
    sql::{placeholders, Comma, Ident},
    Error, Result,
};

use indexmap::IndexMap;
use tracing::info;

/// Table mapping of one model, derived once at registration.
#[derive(Debug, Clone)]
pub struct TableSchema {
    /// Name of the model the schema was reflected from
    pub name: String,

    /// Table the model maps to
    pub table: String,

    /// Attribute name to field descriptor, in declaration order
    pub mappings: IndexMap<String, Field>,

    /// Attribute name of the primary key
    pub primary_key: String,

    /// Non-key attribute names, in declaration order
    pub fields: Vec<String>,

    /// Pre-generated statements
    pub templates: Templates,
}

/// The four canonical statements of a table, using `?` placeholders.
///
/// `update` has an empty `set` list when the table has no non-key fields and
/// must not be run in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub select: String,
    pub insert: String,
    pub update: String,
    pub delete: String,
}

impl TableSchema {
    /// Reflects a model declaration into its table schema.
    ///
    /// `declared` lists `(attribute, field)` pairs in declaration order. The
    /// table name is `table` when given, otherwise the model name. Exactly one
    /// field must be flagged as the primary key.
    pub fn reflect(
        model: &str,
        table: Option<&str>,
        declared: impl IntoIterator<Item = (impl Into<String>, Field)>,
    ) -> Result<TableSchema> {
        let table = table.unwrap_or(model).to_string();
        info!(model, table = %table, "found model");

        let mut mappings = IndexMap::new();
        let mut primary_key = None;
        let mut fields = vec![];

        for (attr, field) in declared {
            let attr = attr.into();
            info!(model, "  found mapping: {attr} ==> {field}");

            if mappings.contains_key(&attr) {
                return Err(Error::invalid_schema(format!(
                    "attribute `{attr}` declared more than once (model: {model})"
                )));
            }

            if field.primary_key {
                if primary_key.is_some() {
                    return Err(Error::duplicate_primary_key(model, attr));
                }
                primary_key = Some(attr.clone());
            } else {
                fields.push(attr.clone());
            }

            mappings.insert(attr, field);
        }

        let Some(primary_key) = primary_key else {
            return Err(Error::missing_primary_key(model));
        };

        let templates = Templates::generate(&table, &mappings, &primary_key, &fields);

        Ok(TableSchema {
            name: model.to_string(),
            table,
            mappings,
            primary_key,
            fields,
            templates,
        })
    }

    /// Returns the descriptor of `attr`.
    pub fn field(&self, attr: &str) -> Option<&Field> {
        self.mappings.get(attr)
    }

    /// Returns the descriptor of the primary key.
    pub fn primary_key_field(&self) -> &Field {
        &self.mappings[&self.primary_key]
    }

    /// Returns the column the primary key is stored in.
    pub fn primary_key_column(&self) -> &str {
        self.primary_key_field().column_name(&self.primary_key)
    }

    /// Returns the column `attr` is stored in.
    pub fn column(&self, attr: &str) -> Option<&str> {
        self.mappings
            .get_key_value(attr)
            .map(|(attr, field)| field.column_name(attr))
    }
}

impl Templates {
    fn generate(
        table: &str,
        mappings: &IndexMap<String, Field>,
        primary_key: &str,
        fields: &[String],
    ) -> Templates {
        let column = |attr: &str| Ident(mappings[attr].column_name(attr).to_string());

        // Renamed columns are aliased back so result rows are keyed by attribute.
        let selected = |attr: &str| {
            let name = mappings[attr].column_name(attr);
            if name == attr {
                Ident(attr).to_string()
            } else {
                format!("{} as {}", Ident(name), Ident(attr))
            }
        };

        let pk = column(primary_key);
        let table = Ident(table);

        let select_list = std::iter::once(primary_key)
            .chain(fields.iter().map(String::as_str))
            .map(selected)
            .collect::<Vec<_>>();

        let insert_columns = fields
            .iter()
            .map(|attr| column(attr))
            .chain(std::iter::once(column(primary_key)))
            .collect::<Vec<_>>();

        let assignments = fields
            .iter()
            .map(|attr| format!("{}=?", column(attr)))
            .collect::<Vec<_>>();

        Templates {
            select: format!("select {} from {table}", Comma(&select_list)),
            insert: format!(
                "insert into {table} ({}) values ({})",
                Comma(&insert_columns),
                placeholders(fields.len() + 1)
            ),
            update: format!(
                "update {table} set {} where {pk}=?",
                Comma(&assignments)
            ),
            delete: format!("delete from {table} where {pk}=?"),
        }
    }
}
