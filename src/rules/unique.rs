use super::{ Error, FieldValue, FormContext, Result, Rule, RuleContext, require_parameters };

/// A uniqueness lookup handed to a [`PresenceVerifier`].
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueQuery<'a> {
    /// Named connection, when the table parameter was `connection.table`.
    pub connection: Option<&'a str>,
    pub table: &'a str,
    pub column: &'a str,
    pub value: &'a FieldValue,
    /// Row id to leave out of the count, typically the record being updated.
    pub exclude_id: Option<String>,
    pub id_column: Option<&'a str>,
}

/// Counts matching rows in some durable store. Implemented by the host.
pub trait PresenceVerifier {
    fn count(&self, query: &UniqueQuery<'_>) -> Result<u64>;
}

/// `dynamic_unique:table[,column[,id[,id_column]]]`: no other row in `table`
/// may hold this value in `column`.
///
/// `table` may name a connection as `connection.table`. `column` defaults to
/// the attribute name and `id_column` to `id`. An `id` written as `[field]`
/// is taken from that field of the submitted form, so the record being
/// edited can exclude itself; an id of `null` excludes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicUnique;

impl Rule for DynamicUnique {
    fn name(&self) -> &str {
        "dynamic_unique"
    }

    fn message(&self) -> Option<&str> {
        Some("The :attribute has already been taken.")
    }

    fn validate(
        &self,
        attribute: &str,
        value: &FieldValue,
        parameters: &[&str],
        context: &mut RuleContext<'_>,
    ) -> Result<bool> {
        require_parameters(self.name(), parameters, 1)?;
        let verifier = context
            .verifier
            .ok_or_else(|| Error::MissingVerifier(self.name().to_string()))?;

        let (connection, table) = split_table(parameters[0]);
        let column = parameters.get(1).copied().unwrap_or(attribute);
        let (exclude_id, id_column) = match parameters.get(2) {
            Some(id) => (
                resolve_id(id, context.form),
                Some(parameters.get(3).copied().unwrap_or("id")),
            ),
            None => (None, None),
        };

        let query = UniqueQuery { connection, table, column, value, exclude_id, id_column };
        let count = verifier.count(&query)?;
        tracing::trace!(rule = self.name(), attribute, table, column, count, "unique lookup");
        Ok(count == 0)
    }
}

fn split_table(table: &str) -> (Option<&str>, &str) {
    match table.split_once('.') {
        Some((connection, table)) => (Some(connection), table),
        None => (None, table),
    }
}

fn resolve_id(id: &str, form: &FormContext) -> Option<String> {
    let id = match (id.find('['), id.rfind(']')) {
        (Some(open), Some(close)) if open < close => {
            form.value(&id[open + 1..close])?.to_scalar_string()?
        }
        _ => id.to_string(),
    };
    if id.eq_ignore_ascii_case("null") { None } else { Some(id) }
}
