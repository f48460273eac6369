//! The form state container: field values, the error map and the submission
//! status of one mounted form.

use std::collections::BTreeMap;

use crate::error::FormError;
use crate::value::{Attachment, FieldValue};

/// Reserved error-map key for messages that concern the whole form.
pub const GENERAL: &str = "general";

/// Lifecycle stage of one submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

/// Values of every declared field, in declaration order.
///
/// Keys are fixed when the state is built from a schema: values can be
/// replaced but fields are never added or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    entries: Vec<(&'static str, FieldValue)>,
}

impl FormState {
    pub(crate) const fn from_entries(entries: Vec<(&'static str, FieldValue)>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Text held by `name`, or `""` when the field is missing or not textual.
    #[must_use]
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FieldValue::as_text).unwrap_or("")
    }

    /// Whether the checkbox `name` is ticked.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.get(name)
            .and_then(FieldValue::as_bool)
            .unwrap_or(false)
    }

    /// Files attached to `name`, empty when the field is missing or not a file field.
    #[must_use]
    pub fn files(&self, name: &str) -> &[Attachment] {
        self.get(name).and_then(FieldValue::as_files).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn slot_mut(&mut self, name: &str) -> Result<&mut FieldValue, FormError> {
        self.entries
            .iter_mut()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
            .ok_or_else(|| FormError::UnknownField(name.to_owned()))
    }
}

/// Current error per field, plus the reserved [`GENERAL`] entry.
///
/// Entries only appear through a validation pass, a submission failure or an
/// explicit [`set`](Self::set); they only disappear through a validation pass
/// or an explicit [`clear`](Self::clear).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: BTreeMap<String, String>,
}

impl ErrorMap {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn general(&self) -> Option<&str> {
        self.get(GENERAL)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn set(&mut self, field: &str, message: impl Into<String>) {
        self.entries.insert(field.to_owned(), message.into());
    }

    /// Removes the entry for `field` only, returning the message it held.
    pub fn clear(&mut self, field: &str) -> Option<String> {
        self.entries.remove(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

/// Single source of truth for one form's values, errors and status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormStore {
    values: FormState,
    errors: ErrorMap,
    status: SubmissionStatus,
}

impl FormStore {
    #[must_use]
    pub fn new(defaults: FormState) -> Self {
        Self {
            values: defaults,
            errors: ErrorMap::default(),
            status: SubmissionStatus::Idle,
        }
    }

    #[must_use]
    pub const fn values(&self) -> &FormState {
        &self.values
    }

    #[must_use]
    pub const fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    #[must_use]
    pub const fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Overwrites the value of `name` and clears that field's error, if any.
    ///
    /// Other errors and the submission status are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if `name` is not declared,
    /// [`FormError::KindMismatch`] if `value` has a different shape than the
    /// field holds and [`FormError::FilesNeedSelection`] for a file list, which
    /// only [`FormStore::set_files`] may write.
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        let value = value.into();
        let slot = self.values.slot_mut(name)?;
        if value.as_files().is_some() && slot.as_files().is_some() {
            return Err(FormError::FilesNeedSelection(name.to_owned()));
        }
        if !slot.same_kind(&value) {
            return Err(FormError::KindMismatch {
                field: name.to_owned(),
                expected: slot.kind_name(),
                found: value.kind_name(),
            });
        }
        *slot = value;
        self.errors.clear(name);
        Ok(())
    }

    /// Replaces the files of `name` with a whole new selection.
    ///
    /// A selection larger than `max_count` is rejected as a whole, see
    /// [`FormStore::admit_selection`]. Returns whether the selection was
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if `name` is not declared and
    /// [`FormError::NotAFileField`] if it does not hold files.
    pub fn set_files(
        &mut self,
        name: &str,
        files: Vec<Attachment>,
        max_count: Option<usize>,
    ) -> Result<bool, FormError> {
        if !self.admit_selection(name, files.len(), max_count)? {
            return Ok(false);
        }

        if let FieldValue::Files(current) = self.values.slot_mut(name)? {
            *current = files;
        }
        self.errors.clear(name);
        Ok(true)
    }

    /// Checks the size of a selection of `count` files before its contents are
    /// read.
    ///
    /// Over `max_count` the field is emptied and a single error naming the
    /// limit is recorded. Returns whether the selection may be read.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if `name` is not declared and
    /// [`FormError::NotAFileField`] if it does not hold files.
    pub fn admit_selection(
        &mut self,
        name: &str,
        count: usize,
        max_count: Option<usize>,
    ) -> Result<bool, FormError> {
        let FieldValue::Files(current) = self.values.slot_mut(name)? else {
            return Err(FormError::NotAFileField(name.to_owned()));
        };

        match max_count {
            Some(max_count) if count > max_count => {
                current.clear();
                self.errors
                    .set(name, format!("You can select at most {max_count} files."));
                Ok(false)
            }
            _ => Ok(true),
        }
    }

    /// Restores every field to `defaults`.
    pub fn reset(&mut self, defaults: FormState) {
        self.values = defaults;
    }

    /// Replaces the whole error map with the result of a validation pass.
    pub fn replace_errors(&mut self, errors: ErrorMap) {
        self.errors = errors;
    }

    pub fn set_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.set(field, message);
    }

    pub fn clear_error(&mut self, field: &str) -> Option<String> {
        self.errors.clear(field)
    }

    pub fn set_status(&mut self, status: SubmissionStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn store() -> FormStore {
        FormStore::new(FormState::from_entries(vec![
            ("fullName", FieldValue::Text(String::new())),
            ("email", FieldValue::Text(String::new())),
            ("privacyAccepted", FieldValue::Bool(false)),
            ("photos", FieldValue::Files(Vec::new())),
        ]))
    }

    fn photos(count: usize) -> Vec<Attachment> {
        (0..count)
            .map(|i| Attachment::new(format!("photo-{i}.jpg"), "image/jpeg", vec![0_u8; 4]))
            .collect()
    }

    #[test]
    fn test_set_field_clears_only_its_own_error() {
        let mut store = store();
        store.set_error("fullName", "Full name is required.");
        store.set_error("email", "Email is required.");

        store.set_field("email", "someone@agency.fr").unwrap();
        assert!(!store.errors().contains("email"));
        assert_eq!(store.errors().get("fullName"), Some("Full name is required."));
    }

    #[test]
    fn test_set_field_on_unrelated_field_keeps_existing_error() {
        let mut store = store();
        store.set_error("fullName", "Full name is required.");

        store.set_field("privacyAccepted", true).unwrap();
        assert_eq!(store.errors().len(), 1);
        assert!(store.values().flag("privacyAccepted"));
    }

    #[test]
    fn test_set_field_rejects_unknown_and_mismatched_fields() {
        let mut store = store();
        assert_matches!(
            store.set_field("budget", "100"),
            Err(FormError::UnknownField(name)) if name == "budget"
        );
        assert_matches!(
            store.set_field("privacyAccepted", "yes"),
            Err(FormError::KindMismatch { expected: "boolean", found: "text", .. })
        );
        assert_eq!(store.values().len(), 4);
    }

    #[test]
    fn test_set_field_does_not_touch_status() {
        let mut store = store();
        store.set_status(SubmissionStatus::Submitting);
        store.set_field("fullName", "Jeanne").unwrap();
        assert_eq!(store.status(), SubmissionStatus::Submitting);
    }

    #[test]
    fn test_set_field_refuses_file_lists() {
        let mut store = store();
        assert_matches!(
            store.set_field("photos", photos(11)),
            Err(FormError::FilesNeedSelection(name)) if name == "photos"
        );
        assert!(store.values().files("photos").is_empty());
    }

    #[test]
    fn test_admit_selection_checks_count_only() {
        let mut store = store();
        store.set_files("photos", photos(2), Some(10)).unwrap();

        assert!(store.admit_selection("photos", 10, Some(10)).unwrap());
        assert_eq!(store.values().files("photos").len(), 2);

        assert!(!store.admit_selection("photos", 11, Some(10)).unwrap());
        assert!(store.values().files("photos").is_empty());
        assert!(store.errors().get("photos").unwrap().contains("10"));
        assert_matches!(
            store.admit_selection("email", 1, None),
            Err(FormError::NotAFileField(_))
        );
    }

    #[test]
    fn test_set_files_accepts_exactly_max_count() {
        let mut store = store();
        store.set_error("photos", "Please upload at least one photo.");

        let accepted = store.set_files("photos", photos(10), Some(10)).unwrap();
        assert!(accepted);
        assert_eq!(store.values().files("photos").len(), 10);
        assert!(!store.errors().contains("photos"));
    }

    #[test]
    fn test_set_files_rejects_whole_selection_over_limit() {
        let mut store = store();
        store.set_files("photos", photos(2), Some(10)).unwrap();

        let accepted = store.set_files("photos", photos(11), Some(10)).unwrap();
        assert!(!accepted);
        assert!(store.values().files("photos").is_empty());
        assert_eq!(store.errors().len(), 1);
        assert!(store.errors().get("photos").unwrap().contains("10"));
    }

    #[test]
    fn test_set_files_without_limit() {
        let mut store = store();
        assert!(store.set_files("photos", photos(40), None).unwrap());
        assert_eq!(store.values().files("photos").len(), 40);
    }

    #[test]
    fn test_set_files_on_text_field_fails() {
        let mut store = store();
        assert_matches!(
            store.set_files("email", photos(1), None),
            Err(FormError::NotAFileField(_))
        );
    }

    #[test]
    fn test_reset_restores_defaults_including_files() {
        let mut store = store();
        let defaults = store.values().clone();
        store.set_field("fullName", "Jeanne Martin").unwrap();
        store.set_field("privacyAccepted", true).unwrap();
        store.set_files("photos", photos(3), None).unwrap();

        store.reset(defaults.clone());
        assert_eq!(store.values(), &defaults);
        assert!(store.values().files("photos").is_empty());
    }

    #[test]
    fn test_error_map_general_entry() {
        let mut errors = ErrorMap::default();
        assert!(errors.general().is_none());
        errors.set(GENERAL, "Invalid email or password.");
        assert_eq!(errors.general(), Some("Invalid email or password."));
        assert_eq!(errors.clear(GENERAL).as_deref(), Some("Invalid email or password."));
        assert!(errors.is_empty());
    }
}
