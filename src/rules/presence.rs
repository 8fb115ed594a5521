use super::{
    FieldValue,
    Result,
    Rule,
    RuleContext,
    is_present,
    is_present_allow_empty_collection,
    require_parameters,
};

/// `required_or_empty_array`: the value must be present, but an empty list
/// or map is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredOrEmptyArray;

impl Rule for RequiredOrEmptyArray {
    fn name(&self) -> &str {
        "required_or_empty_array"
    }

    fn implicit(&self) -> bool {
        true
    }

    fn message(&self) -> Option<&str> {
        Some("The :attribute field is required.")
    }

    fn validate(
        &self,
        _attribute: &str,
        value: &FieldValue,
        _parameters: &[&str],
        _context: &mut RuleContext<'_>,
    ) -> Result<bool> {
        Ok(is_present_allow_empty_collection(value))
    }
}

/// `required_xor:other`: exactly one of this attribute and `other` must be
/// present.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredXor;

impl Rule for RequiredXor {
    fn name(&self) -> &str {
        "required_xor"
    }

    fn implicit(&self) -> bool {
        true
    }

    fn message(&self) -> Option<&str> {
        Some("Exactly one of the :attribute or :values fields must be present.")
    }

    fn validate(
        &self,
        _attribute: &str,
        value: &FieldValue,
        parameters: &[&str],
        context: &mut RuleContext<'_>,
    ) -> Result<bool> {
        require_parameters(self.name(), parameters, 1)?;
        let other_present = context.form.value(parameters[0]).is_some_and(is_present);
        Ok(is_present(value) != other_present)
    }
}
