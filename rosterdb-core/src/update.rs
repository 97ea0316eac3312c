//! Update documents: `$push` and `$pull` on array fields.
//!
//! Every `$push` entry is applied before any `$pull` entry, whatever order the operators
//! appear in. Other operators are reported back as ignored so the caller can log them.

use bson::{Bson, Document};

use crate::error::{DocumentStoreError, DocumentStoreResult};

pub const PUSH: &str = "$push";
pub const PULL: &str = "$pull";

/// A single array mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOp {
    /// Append `value`, creating the array when the field is absent.
    Push { field: String, value: Bson },
    /// Remove the first element equal to `value`, if any.
    Pull { field: String, value: Bson },
}

/// A parsed update document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    /// Operations in application order.
    pub ops: Vec<UpdateOp>,
    /// Operators present in the document that this store does not implement.
    pub ignored: Vec<String>,
}

impl Update {
    pub fn builder() -> UpdateBuilder {
        UpdateBuilder::new()
    }

    /// Parses an update document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidUpdate`] if `$push` or `$pull` is not a document.
    pub fn parse(update: &Document) -> DocumentStoreResult<Self> {
        let mut pushes = Vec::new();
        let mut pulls = Vec::new();
        let mut ignored = Vec::new();

        for (operator, fields) in update {
            let target = match operator.as_str() {
                PUSH => &mut pushes,
                PULL => &mut pulls,
                _ => {
                    ignored.push(operator.clone());
                    continue;
                }
            };

            let fields = fields.as_document().ok_or_else(|| {
                DocumentStoreError::InvalidUpdate(
                    operator.clone(),
                    format!("expected a document of field/value pairs, got {fields}"),
                )
            })?;

            for (field, value) in fields {
                target.push((field.clone(), value.clone()));
            }
        }

        let ops = pushes
            .into_iter()
            .map(|(field, value)| UpdateOp::Push { field, value })
            .chain(
                pulls
                    .into_iter()
                    .map(|(field, value)| UpdateOp::Pull { field, value })
            )
            .collect();

        Ok(Update { ops, ignored })
    }

    /// Applies the operations to a record's fields.
    ///
    /// The record is only modified when every operation succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidUpdate`] if a target field exists but is not an array.
    pub fn apply(&self, fields: &mut Document) -> DocumentStoreResult<()> {
        let mut staged = fields.clone();

        for op in &self.ops {
            match op {
                UpdateOp::Push { field, value } => {
                    if !staged.contains_key(field) {
                        staged.insert(field.clone(), Bson::Array(Vec::new()));
                    }

                    array_mut(&mut staged, field)?
                        .push(value.clone());
                }
                UpdateOp::Pull { field, value } => {
                    if !staged.contains_key(field) {
                        continue;
                    }

                    let array = array_mut(&mut staged, field)?;

                    if let Some(position) = array.iter().position(|item| item == value) {
                        array.remove(position);
                    }
                }
            }
        }

        *fields = staged;

        Ok(())
    }
}

fn array_mut<'a>(fields: &'a mut Document, field: &str) -> DocumentStoreResult<&'a mut Vec<Bson>> {
    match fields.get_mut(field) {
        Some(Bson::Array(array)) => Ok(array),
        Some(other) => Err(DocumentStoreError::InvalidUpdate(
            field.to_string(),
            format!("expected an array, found {:?}", other.element_type()),
        )),
        None => Err(DocumentStoreError::InvalidUpdate(
            field.to_string(),
            "field is missing".to_string(),
        )),
    }
}

/// Fluent builder producing an update document.
///
/// ```ignore
/// let update = Update::builder()
///     .push("participants", "b@x.edu")
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct UpdateBuilder {
    pushes: Document,
    pulls: Document,
}

impl UpdateBuilder {
    pub fn new() -> Self {
        UpdateBuilder::default()
    }

    pub fn push(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.pushes.insert(field.into(), value.into());
        self
    }

    pub fn pull(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.pulls.insert(field.into(), value.into());
        self
    }

    pub fn build(self) -> Document {
        let mut update = Document::new();

        if !self.pushes.is_empty() {
            update.insert(PUSH, self.pushes);
        }

        if !self.pulls.is_empty() {
            update.insert(PULL, self.pulls);
        }

        update
    }
}
