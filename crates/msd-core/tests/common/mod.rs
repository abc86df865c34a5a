//! In-memory repository shared by the integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use msd_core::{ApiError, CollectionSummary, FieldType, MetadataField, MetadataRepository, NewField};

/// A recorded repository call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListCollections,
    ListFields(String),
    CreateField { collection: String, field: NewField },
    AddOptions { field_id: String, options: Vec<String> },
}

#[derive(Default)]
struct Inner {
    collections: BTreeMap<String, (String, Vec<MetadataField>)>,
    calls: Vec<Call>,
    mutations: usize,
    fail_on_mutation: Option<(usize, ApiError)>,
    next_id: usize,
}

#[derive(Default)]
pub struct InMemoryRepository {
    inner: Mutex<Inner>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(self, id: &str, name: &str, fields: Vec<MetadataField>) -> Self {
        self.inner
            .lock()
            .unwrap()
            .collections
            .insert(id.to_string(), (name.to_string(), fields));
        self
    }

    /// Makes the `nth` create/add call (1-based) fail with `error`.
    pub fn fail_on_mutation(&self, nth: usize, error: ApiError) {
        self.inner.lock().unwrap().fail_on_mutation = Some((nth, error));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn mutation_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::CreateField { .. } | Call::AddOptions { .. }))
            .collect()
    }

    pub fn fields(&self, collection_id: &str) -> Vec<MetadataField> {
        self.inner
            .lock()
            .unwrap()
            .collections
            .get(collection_id)
            .map(|(_, fields)| fields.clone())
            .unwrap_or_default()
    }

    pub fn fields_named(&self, collection_id: &str, name: &str) -> Vec<MetadataField> {
        self.fields(collection_id)
            .into_iter()
            .filter(|f| f.name == name)
            .collect()
    }

    fn check_failure(inner: &mut Inner) -> Result<(), ApiError> {
        inner.mutations += 1;
        match &inner.fail_on_mutation {
            Some((nth, error)) if *nth == inner.mutations => Err(error.clone()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl MetadataRepository for InMemoryRepository {
    async fn list_collections_with_metadata(&self) -> Result<Vec<CollectionSummary>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::ListCollections);
        Ok(inner
            .collections
            .iter()
            .filter(|(_, (_, fields))| !fields.is_empty())
            .map(|(id, (name, _))| CollectionSummary::new(id.clone(), name.clone()))
            .collect())
    }

    async fn list_fields(&self, collection_id: &str) -> Result<Vec<MetadataField>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::ListFields(collection_id.to_string()));
        inner
            .collections
            .get(collection_id)
            .map(|(_, fields)| fields.clone())
            .ok_or_else(|| ApiError::NotFound(collection_id.to_string()))
    }

    async fn create_field(
        &self,
        collection_id: &str,
        field: &NewField,
    ) -> Result<String, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::CreateField {
            collection: collection_id.to_string(),
            field: field.clone(),
        });
        Self::check_failure(&mut inner)?;

        inner.next_id += 1;
        let id = format!("new-{}", inner.next_id);
        let (_, fields) = inner
            .collections
            .get_mut(collection_id)
            .ok_or_else(|| ApiError::NotFound(collection_id.to_string()))?;
        fields.push(MetadataField::new(
            id.clone(),
            field.name.clone(),
            field.field_type.clone(),
            field.options.clone(),
        ));
        Ok(id)
    }

    async fn add_options(&self, field_id: &str, options: &[String]) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::AddOptions {
            field_id: field_id.to_string(),
            options: options.to_vec(),
        });
        Self::check_failure(&mut inner)?;

        let field = inner
            .collections
            .values_mut()
            .flat_map(|(_, fields)| fields.iter_mut())
            .find(|f| f.id == field_id)
            .ok_or_else(|| ApiError::NotFound(field_id.to_string()))?;
        field.options.extend(options.iter().cloned());
        Ok(())
    }
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

pub fn select(id: &str, name: &str, options: &[&str]) -> MetadataField {
    MetadataField::new(id, name, FieldType::Select, strings(options))
}

pub fn multi_select(id: &str, name: &str, options: &[&str]) -> MetadataField {
    MetadataField::new(id, name, FieldType::MultiSelect, strings(options))
}

pub fn text(id: &str, name: &str) -> MetadataField {
    MetadataField::new(id, name, FieldType::Text, Vec::new())
}
