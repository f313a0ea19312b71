use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures_timer::Delay;
use gpui::SharedString;

use crate::path::FieldPath;
use crate::schema::{DataType, Property};
use crate::value::Value;

use super::store::{FormResult, FormStateStore, ValidationMode, read_lock, write_lock};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ValidationTicket(pub u64);

/// Sync validator over (root value, value at the registered path).
pub(super) type SyncPathValidatorFn =
    Arc<dyn Fn(&Value, &Value) -> Result<(), SharedString> + Send + Sync>;

pub(super) type AsyncPathValidatorFn = Arc<
    dyn Fn(Value, Value) -> Pin<Box<dyn Future<Output = Result<(), SharedString>> + Send + 'static>>
        + Send
        + Sync,
>;

#[derive(Clone)]
pub(super) struct AsyncPathValidatorEntry {
    pub(super) debounce: Duration,
    pub(super) validator: AsyncPathValidatorFn,
}

impl FormStateStore {
    pub fn register_validator(
        &self,
        path: FieldPath,
        validator: impl Fn(&Value, &Value) -> Result<(), SharedString> + Send + Sync + 'static,
    ) -> FormResult<()> {
        let mut validators = write_lock(&self.sync_validators, "registering validator")?;
        validators
            .entry(path)
            .or_default()
            .push(Arc::new(validator));
        Ok(())
    }

    pub fn register_async_validator<F, Fut>(&self, path: FieldPath, validator: F) -> FormResult<()>
    where
        F: Fn(Value, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), SharedString>> + Send + 'static,
    {
        self.register_async_validator_with_debounce(path, 0, validator)
    }

    pub fn register_async_validator_with_debounce<F, Fut>(
        &self,
        path: FieldPath,
        debounce_ms: u64,
        validator: F,
    ) -> FormResult<()>
    where
        F: Fn(Value, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), SharedString>> + Send + 'static,
    {
        let wrapped: AsyncPathValidatorFn =
            Arc::new(move |root, value| Box::pin(validator(root, value)));
        let entry = AsyncPathValidatorEntry {
            debounce: Duration::from_millis(debounce_ms),
            validator: wrapped,
        };
        let mut validators = write_lock(&self.async_validators, "registering async validator")?;
        validators.entry(path).or_default().push(entry);
        Ok(())
    }

    /// Runs the schema rules and registered sync validators for every path in
    /// the form. Returns overall validity.
    pub fn validate_all(&self) -> FormResult<bool> {
        self.validate_path(&FieldPath::default())
    }

    /// Revalidates the subtree rooted at `path`: schema rules for every
    /// addressable descendant (array rows included) plus any sync validators
    /// registered inside the subtree. Errors outside the subtree are kept.
    pub fn validate_path(&self, path: &FieldPath) -> FormResult<bool> {
        let first_only = self.options.validate_first_error_only;
        let (schema_node, root_value) = {
            let state = read_lock(&self.state, "reading state for validation")?;
            (state.schema.at(path).cloned(), state.value.clone())
        };

        let mut computed = BTreeMap::<FieldPath, Vec<SharedString>>::new();
        if let Some(node) = schema_node {
            walk_rules(&node, &root_value, path.clone(), first_only, &mut computed);
        }

        let validators = read_lock(&self.sync_validators, "reading validators")?.clone();
        for (candidate, fns) in validators {
            if !candidate.starts_with(path) {
                continue;
            }
            let at_value = root_value.at(&candidate).cloned().unwrap_or_default();
            for validator in fns {
                if let Err(message) = validator(&root_value, &at_value) {
                    computed.entry(candidate.clone()).or_default().push(message);
                    if first_only {
                        break;
                    }
                }
            }
        }

        let mut state = write_lock(&self.state, "applying validation result")?;
        state.errors.retain(|candidate, _| !candidate.starts_with(path));
        let mut subtree_valid = true;
        for (candidate, errors) in computed {
            if errors.is_empty() {
                continue;
            }
            subtree_valid = false;
            state.errors.insert(candidate, errors);
        }
        Ok(subtree_valid)
    }

    /// Runs the async validators registered for `path`, debounced per entry.
    /// Only the latest in-flight run per path lands its result.
    pub async fn validate_path_async(
        &self,
        path: &FieldPath,
    ) -> FormResult<Vec<ValidationTicket>> {
        let (root_value, at_value) = {
            let state = read_lock(&self.state, "reading state for async validation")?;
            (
                state.value.clone(),
                state.value.at(path).cloned().unwrap_or_default(),
            )
        };
        let validators = read_lock(&self.async_validators, "reading async validators")?
            .get(path)
            .cloned()
            .unwrap_or_default();

        let mut tickets = Vec::with_capacity(validators.len());
        for entry in validators {
            let ticket = {
                let mut state = write_lock(&self.state, "starting async validation")?;
                let next = ValidationTicket(
                    state
                        .tickets
                        .get(path)
                        .copied()
                        .unwrap_or(ValidationTicket(0))
                        .0
                        + 1,
                );
                state.tickets.insert(path.clone(), next);
                next
            };

            if !entry.debounce.is_zero() {
                Delay::new(entry.debounce).await;
                if !self.is_latest_ticket(path, ticket)? {
                    continue;
                }
            }

            let result = (entry.validator)(root_value.clone(), at_value.clone()).await;
            self.finish_async_validation(path, ticket, result)?;
            tickets.push(ticket);
        }
        Ok(tickets)
    }

    pub async fn set_value_async(&self, path: &FieldPath, value: Value) -> FormResult<()> {
        self.set_value(path, value)?;
        if self.options.validate_mode == ValidationMode::OnChange {
            let _ = self.validate_path_async(path).await?;
        }
        Ok(())
    }

    pub async fn touch_async(&self, path: &FieldPath) -> FormResult<()> {
        self.touch(path)?;
        if self.options.validate_mode == ValidationMode::OnBlur {
            let _ = self.validate_path_async(path).await?;
        }
        Ok(())
    }

    fn is_latest_ticket(&self, path: &FieldPath, ticket: ValidationTicket) -> FormResult<bool> {
        Ok(read_lock(&self.state, "checking latest validation ticket")?
            .tickets
            .get(path)
            .copied()
            == Some(ticket))
    }

    fn finish_async_validation(
        &self,
        path: &FieldPath,
        ticket: ValidationTicket,
        result: Result<(), SharedString>,
    ) -> FormResult<()> {
        let mut state = write_lock(&self.state, "finishing async validation")?;
        if state.tickets.get(path).copied() != Some(ticket) {
            return Ok(());
        }
        // Async results only own their channel; rule and sync-validator
        // errors at the same path survive an Ok.
        match result {
            Ok(()) => {
                state.async_errors.remove(path);
            }
            Err(message) => {
                state.async_errors.insert(path.clone(), vec![message]);
            }
        }
        Ok(())
    }
}

fn walk_rules(
    property: &Property,
    root: &Value,
    base: FieldPath,
    first_only: bool,
    out: &mut BTreeMap<FieldPath, Vec<SharedString>>,
) {
    let current = root.at(&base);
    let errors = evaluate_rules(property, current, first_only);
    if !errors.is_empty() {
        out.insert(base.clone(), errors);
    }

    match &property.data_type {
        DataType::Map { properties } => {
            for (name, child) in properties {
                walk_rules(child, root, base.key(name.clone()), first_only, out);
            }
        }
        DataType::Array { of } => {
            if let Some(Value::Array(items)) = current {
                for index in 0..items.len() {
                    walk_rules(of, root, base.index(index), first_only, out);
                }
            }
        }
        DataType::Text | DataType::Number | DataType::Boolean => {}
    }
}

fn evaluate_rules(
    property: &Property,
    value: Option<&Value>,
    first_only: bool,
) -> Vec<SharedString> {
    let rules = &property.validation;
    let mut errors = Vec::new();

    let is_empty = value.is_none_or(Value::is_empty_value);
    if rules.required && is_empty {
        let message = rules
            .required_message
            .clone()
            .unwrap_or_else(|| SharedString::from("Required"));
        errors.push(message);
        if first_only {
            return errors;
        }
    }

    let Some(value) = value else {
        return errors;
    };

    match value {
        Value::Text(text) => {
            let length = text.as_ref().chars().count();
            if let Some(min) = rules.min_length {
                if length < min {
                    errors.push(format!("Must be at least {min} characters").into());
                    if first_only {
                        return errors;
                    }
                }
            }
            if let Some(max) = rules.max_length {
                if length > max {
                    errors.push(format!("Must be at most {max} characters").into());
                }
            }
        }
        Value::Number(number) => {
            if let Some(min) = rules.min {
                if *number < min {
                    errors.push(format!("Must be greater than or equal to {min}").into());
                    if first_only {
                        return errors;
                    }
                }
            }
            if let Some(max) = rules.max {
                if *number > max {
                    errors.push(format!("Must be less than or equal to {max}").into());
                }
            }
        }
        Value::Array(items) => {
            if let Some(min) = rules.min_items {
                if items.len() < min {
                    errors.push(format!("Should have at least {min} entries").into());
                    if first_only {
                        return errors;
                    }
                }
            }
            if let Some(max) = rules.max_items {
                if items.len() > max {
                    errors.push(format!("Should have at most {max} entries").into());
                }
            }
        }
        Value::Null | Value::Bool(_) | Value::Map(_) => {}
    }

    errors
}
