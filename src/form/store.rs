use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use gpui::SharedString;

use crate::path::FieldPath;
use crate::schema::Property;
use crate::value::Value;

use super::validation::{AsyncPathValidatorEntry, SyncPathValidatorFn, ValidationTicket};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationMode {
    OnChange,
    OnBlur,
    Manual,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FormOptions {
    pub validate_mode: ValidationMode,
    pub validate_first_error_only: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            validate_mode: ValidationMode::OnChange,
            validate_first_error_only: false,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FormError {
    StatePoisoned(&'static str),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::StatePoisoned(context) => {
                write!(f, "form state lock poisoned while {context}")
            }
        }
    }
}

impl std::error::Error for FormError {}

pub type FormResult<T> = Result<T, FormError>;

#[derive(Clone, Debug)]
pub struct FormSnapshot {
    pub value: Value,
    pub is_dirty: bool,
    pub is_valid: bool,
    pub touched: BTreeSet<FieldPath>,
    pub errors: BTreeMap<FieldPath, Vec<SharedString>>,
}

pub(super) struct StoreState {
    pub(super) schema: Property,
    pub(super) initial: Value,
    pub(super) value: Value,
    pub(super) touched: BTreeSet<FieldPath>,
    pub(super) dirty: BTreeSet<FieldPath>,
    pub(super) errors: BTreeMap<FieldPath, Vec<SharedString>>,
    pub(super) async_errors: BTreeMap<FieldPath, Vec<SharedString>>,
    pub(super) tickets: BTreeMap<FieldPath, ValidationTicket>,
}

/// Path-keyed form state: the value tree, per-path touched flags, and per-path
/// validation errors. Cheap to clone; all mutation funnels through this
/// handle, including the array surface the ArrayField widget uses.
#[derive(Clone)]
pub struct FormStateStore {
    pub(super) options: FormOptions,
    pub(super) state: Arc<RwLock<StoreState>>,
    pub(super) sync_validators: Arc<RwLock<BTreeMap<FieldPath, Vec<SyncPathValidatorFn>>>>,
    pub(super) async_validators: Arc<RwLock<BTreeMap<FieldPath, Vec<AsyncPathValidatorEntry>>>>,
}

impl FormStateStore {
    /// Passing `Value::Null` as `initial` starts from the schema's value
    /// skeleton.
    pub fn new(schema: Property, initial: Value, options: FormOptions) -> Self {
        let initial = if initial == Value::Null {
            schema.initial_value()
        } else {
            initial
        };
        Self {
            options,
            state: Arc::new(RwLock::new(StoreState {
                value: initial.clone(),
                initial,
                schema,
                touched: BTreeSet::new(),
                dirty: BTreeSet::new(),
                errors: BTreeMap::new(),
                async_errors: BTreeMap::new(),
                tickets: BTreeMap::new(),
            })),
            sync_validators: Arc::new(RwLock::new(BTreeMap::new())),
            async_validators: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub fn from_schema(schema: Property, options: FormOptions) -> Self {
        Self::new(schema, Value::Null, options)
    }

    pub fn options(&self) -> FormOptions {
        self.options
    }

    pub fn value_at(&self, path: &FieldPath) -> FormResult<Option<Value>> {
        Ok(read_lock(&self.state, "reading value")?.value.at(path).cloned())
    }

    pub fn touched_at(&self, path: &FieldPath) -> FormResult<bool> {
        Ok(read_lock(&self.state, "reading touched flag")?
            .touched
            .contains(path))
    }

    pub fn errors_at(&self, path: &FieldPath) -> FormResult<Vec<SharedString>> {
        Ok(merged_errors(
            &*read_lock(&self.state, "reading errors")?,
            path,
        ))
    }

    pub fn error_at(&self, path: &FieldPath) -> FormResult<Option<SharedString>> {
        Ok(self.errors_at(path)?.into_iter().next())
    }

    /// Error text gated for display: present only when the path is touched
    /// and an error exists. Untouched invalid fields stay quiet.
    pub fn display_error(&self, path: &FieldPath) -> FormResult<Option<SharedString>> {
        let state = read_lock(&self.state, "reading display error")?;
        if !state.touched.contains(path) {
            return Ok(None);
        }
        Ok(merged_errors(&state, path).into_iter().next())
    }

    pub fn schema_at(&self, path: &FieldPath) -> FormResult<Option<Property>> {
        Ok(read_lock(&self.state, "reading schema")?
            .schema
            .at(path)
            .cloned())
    }

    pub fn title_at(&self, path: &FieldPath) -> FormResult<Option<SharedString>> {
        Ok(self.schema_at(path)?.and_then(|property| property.title))
    }

    pub fn description_at(&self, path: &FieldPath) -> FormResult<Option<SharedString>> {
        Ok(self
            .schema_at(path)?
            .and_then(|property| property.description))
    }

    pub fn is_required(&self, path: &FieldPath) -> FormResult<bool> {
        Ok(self
            .schema_at(path)?
            .is_some_and(|property| property.validation.required))
    }

    pub fn set_value(&self, path: &FieldPath, value: Value) -> FormResult<()> {
        {
            let mut state = write_lock(&self.state, "writing value")?;
            state.value.set_at(path, value);
            update_dirty(&mut state, path);
        }
        if self.options.validate_mode == ValidationMode::OnChange {
            self.validate_path(path)?;
        }
        Ok(())
    }

    pub fn touch(&self, path: &FieldPath) -> FormResult<()> {
        {
            let mut state = write_lock(&self.state, "touching path")?;
            state.touched.insert(path.clone());
        }
        if self.options.validate_mode == ValidationMode::OnBlur {
            self.validate_path(path)?;
        }
        Ok(())
    }

    /// Appends one element to the array at `path`, creating the array when
    /// the value was absent.
    pub fn array_push(&self, path: &FieldPath, item: Value) -> FormResult<()> {
        {
            let mut state = write_lock(&self.state, "pushing array element")?;
            state.value.array_push(path, item);
            update_dirty(&mut state, path);
        }
        self.revalidate_array(path)
    }

    /// Removes the element at `index`; following rows shift up by one.
    pub fn array_remove(&self, path: &FieldPath, index: usize) -> FormResult<()> {
        {
            let mut state = write_lock(&self.state, "removing array element")?;
            state.value.array_remove(path, index);
            update_dirty(&mut state, path);
            prune_row_state(&mut state, path);
        }
        self.revalidate_array(path)
    }

    /// Inserts at `index` (clamped to the length); following rows shift down.
    pub fn array_insert(&self, path: &FieldPath, index: usize, item: Value) -> FormResult<()> {
        {
            let mut state = write_lock(&self.state, "inserting array element")?;
            state.value.array_insert(path, index, item);
            update_dirty(&mut state, path);
            prune_row_state(&mut state, path);
        }
        self.revalidate_array(path)
    }

    pub fn reset_to_initial(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "resetting form")?;
        state.value = state.initial.clone();
        state.touched.clear();
        state.dirty.clear();
        state.errors.clear();
        state.async_errors.clear();
        state.tickets.clear();
        Ok(())
    }

    pub fn clear_errors(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "clearing errors")?;
        state.errors.clear();
        state.async_errors.clear();
        Ok(())
    }

    pub fn snapshot(&self) -> FormResult<FormSnapshot> {
        let state = read_lock(&self.state, "creating snapshot")?;
        let mut errors = state.errors.clone();
        for (path, more) in &state.async_errors {
            errors
                .entry(path.clone())
                .or_default()
                .extend(more.iter().cloned());
        }
        Ok(FormSnapshot {
            value: state.value.clone(),
            is_dirty: !state.dirty.is_empty(),
            is_valid: errors.values().all(Vec::is_empty),
            touched: state.touched.clone(),
            errors,
        })
    }

    fn revalidate_array(&self, path: &FieldPath) -> FormResult<()> {
        if self.options.validate_mode == ValidationMode::OnChange {
            self.validate_path(path)?;
        }
        Ok(())
    }
}

fn update_dirty(state: &mut StoreState, path: &FieldPath) {
    let is_dirty = state.value.at(path) != state.initial.at(path);
    if is_dirty {
        state.dirty.insert(path.clone());
    } else {
        state.dirty.remove(path);
    }
}

/// Row paths are positional, so touched/error entries recorded under old
/// indices go stale the moment the array shifts. Drop them; revalidation
/// recomputes current row errors.
fn prune_row_state(state: &mut StoreState, path: &FieldPath) {
    state
        .touched
        .retain(|candidate| candidate == path || !candidate.starts_with(path));
    state
        .errors
        .retain(|candidate, _| candidate == path || !candidate.starts_with(path));
    state
        .async_errors
        .retain(|candidate, _| candidate == path || !candidate.starts_with(path));
}

/// Schema-rule and sync-validator errors live beside the async validators'
/// results; readers see both, rule errors first.
fn merged_errors(state: &StoreState, path: &FieldPath) -> Vec<SharedString> {
    let mut errors = state.errors.get(path).cloned().unwrap_or_default();
    if let Some(more) = state.async_errors.get(path) {
        errors.extend(more.iter().cloned());
    }
    errors
}

pub(super) fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| FormError::StatePoisoned(context))
}

pub(super) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| FormError::StatePoisoned(context))
}
