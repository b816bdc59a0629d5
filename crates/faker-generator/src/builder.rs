//! Recursive model builder.

use crate::classify::{classify, Shape, Unrecognized};
use crate::config::FakerConfig;
use crate::error::FakerError;
use crate::generators::{choice, collection, generate_primitive};
use crate::hook::PreConstructionHook;
use crate::registry::{Generator, GeneratorRegistry};
use faker_core::{FakeValue, FieldMap, Model, Record, RecordSchema, SchemaCatalog, TypeExpr};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::debug;

/// Builds fake instances of the records in a catalog.
///
/// The faker owns its random source. With a seed in the configuration the
/// sequence of built records is reproducible across runs.
pub struct ModelFaker {
    /// Record schemas available for building and nesting
    catalog: Arc<SchemaCatalog>,
    /// Caller overrides, consulted before the built-in generators
    registry: Arc<GeneratorRegistry>,
    /// Collection sizes and recursion limit
    config: FakerConfig,
    /// Random source for every generated value
    rng: StdRng,
}

impl ModelFaker {
    /// Create a faker over a catalog with built-in generators only.
    pub fn new(
        catalog: impl Into<Arc<SchemaCatalog>>,
        config: FakerConfig,
    ) -> Result<Self, FakerError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            catalog: catalog.into(),
            registry: Arc::new(GeneratorRegistry::new()),
            config,
            rng,
        })
    }

    /// Create a faker over the catalog of a typed model.
    pub fn for_model<M: Model>(config: FakerConfig) -> Result<Self, FakerError> {
        Self::new(M::catalog()?, config)
    }

    /// Use the given overrides.
    pub fn with_registry(mut self, registry: impl Into<Arc<GeneratorRegistry>>) -> Self {
        self.registry = registry.into();
        self
    }

    /// Get a reference to the catalog.
    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    /// Get a reference to the override registry.
    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &FakerConfig {
        &self.config
    }

    /// Build one instance of the named record.
    ///
    /// Every field is generated, the hook (if any) transforms the top-level
    /// field map once, and the record is constructed from the result.
    pub fn build(
        &mut self,
        record: &str,
        hook: Option<&dyn PreConstructionHook>,
    ) -> Result<Record, FakerError> {
        let fields = self.build_fields(record)?;
        let fields = match hook {
            Some(hook) => hook.apply(fields),
            None => fields,
        };

        let schema = self.require_record(record)?;
        let built = construct_record(schema, fields)?;
        debug!(
            "Built record '{}' with {} fields",
            built.schema,
            built.fields.len()
        );
        Ok(built)
    }

    /// Generate the field map of the named record without constructing it.
    pub fn build_fields(&mut self, record: &str) -> Result<FieldMap, FakerError> {
        let schema = self
            .catalog
            .get_record(record)
            .ok_or_else(|| FakerError::RecordNotFound(record.to_string()))?;

        let mut ctx = BuildContext {
            catalog: &self.catalog,
            registry: &self.registry,
            config: &self.config,
            rng: &mut self.rng,
        };
        ctx.record_fields(schema, &schema.name, 0)
    }

    /// Build one instance of a typed model.
    ///
    /// The generated record is handed to `Model::construct`; a rejection
    /// there is reported like any other construction failure.
    pub fn build_model<M: Model>(
        &mut self,
        hook: Option<&dyn PreConstructionHook>,
    ) -> Result<M, FakerError> {
        let record = self.build(M::NAME, hook)?;
        M::construct(record.into_fields()).map_err(|reason| FakerError::ConstructionRejected {
            record: M::NAME.to_string(),
            reason,
        })
    }

    /// Lazily build `count` instances of the named record.
    pub fn records<'a>(
        &'a mut self,
        record: &str,
        count: u64,
        hook: Option<&'a dyn PreConstructionHook>,
    ) -> Result<RecordIterator<'a>, FakerError> {
        self.require_record(record)?;

        Ok(RecordIterator {
            faker: self,
            record: record.to_string(),
            hook,
            remaining: count,
        })
    }

    fn require_record(&self, record: &str) -> Result<&RecordSchema, FakerError> {
        self.catalog
            .get_record(record)
            .ok_or_else(|| FakerError::RecordNotFound(record.to_string()))
    }
}

/// Iterator that lazily builds records.
pub struct RecordIterator<'a> {
    faker: &'a mut ModelFaker,
    record: String,
    hook: Option<&'a dyn PreConstructionHook>,
    remaining: u64,
}

impl Iterator for RecordIterator<'_> {
    type Item = Result<Record, FakerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.faker.build(&self.record, self.hook))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Construct a record from a complete field map.
///
/// Missing optional fields become null. Unknown fields, missing or null
/// required fields and violated constraints reject the map.
pub fn construct_record(schema: &RecordSchema, mut fields: FieldMap) -> Result<Record, FakerError> {
    let reject = |reason: String| FakerError::ConstructionRejected {
        record: schema.name.clone(),
        reason,
    };

    let mut unknown: Vec<&String> = fields
        .keys()
        .filter(|name| schema.get_field(name).is_none())
        .collect();
    unknown.sort();
    if let Some(name) = unknown.first() {
        return Err(reject(format!("unknown field '{name}'")));
    }

    for field in &schema.fields {
        let nullable = field.field_type.is_nullable();
        match fields.get(&field.name) {
            None if nullable => {
                fields.insert(field.name.clone(), FakeValue::Null);
            }
            None => return Err(reject(format!("missing required field '{}'", field.name))),
            Some(value) if value.is_null() && !nullable => {
                return Err(reject(format!("field '{}' is not optional", field.name)));
            }
            Some(_) => {}
        }
    }

    schema.check_constraints(&fields).map_err(reject)?;
    Ok(Record::new(schema.name.clone(), fields))
}

/// Borrowed state of one top-level build.
struct BuildContext<'a> {
    catalog: &'a SchemaCatalog,
    registry: &'a GeneratorRegistry,
    config: &'a FakerConfig,
    rng: &'a mut StdRng,
}

impl BuildContext<'_> {
    fn rng(&mut self) -> &mut StdRng {
        self.rng
    }

    /// Generate every field of a record, in declaration order.
    fn record_fields(
        &mut self,
        schema: &RecordSchema,
        path: &str,
        depth: usize,
    ) -> Result<FieldMap, FakerError> {
        if depth > self.config.max_depth {
            return Err(FakerError::RecursionLimitExceeded {
                path: path.to_string(),
                limit: self.config.max_depth,
            });
        }

        let mut fields = FieldMap::with_capacity(schema.fields.len());
        for field in &schema.fields {
            let field_path = format!("{path}.{}", field.name);
            let value = self.generate(&field.field_type, &field_path, depth)?;
            fields.insert(field.name.clone(), value);
        }
        Ok(fields)
    }

    /// Generate one value of a declared type.
    fn generate(
        &mut self,
        expr: &TypeExpr,
        path: &str,
        depth: usize,
    ) -> Result<FakeValue, FakerError> {
        let unrecognized = |ty: &TypeExpr| FakerError::UnrecognizedType {
            path: path.to_string(),
            type_expr: ty.to_string(),
        };

        let shape = classify(expr, self.catalog, self.registry)
            .map_err(|Unrecognized(ty)| unrecognized(&ty))?;

        match shape {
            Shape::Optional(inner) => self.generate(&inner, path, depth),

            Shape::Union(alternatives) => {
                let chosen =
                    choice::pick(self.rng(), alternatives).ok_or_else(|| unrecognized(expr))?;
                self.generate(chosen, path, depth)
            }

            Shape::Sequence(element) => {
                let len = self.collection_len();
                let mut items = Vec::with_capacity(len);
                for i in 0..len {
                    items.push(self.generate(element, &format!("{path}[{i}]"), depth)?);
                }
                Ok(FakeValue::Sequence(items))
            }

            Shape::Mapping { key, value } => {
                let len = self.collection_len();
                let key_path = format!("{path}.<key>");
                let keys =
                    collection::collect_unique(len, || self.generate(key, &key_path, depth))?;

                let mut entries = Vec::with_capacity(keys.len());
                for k in keys {
                    let label = k.key_string().unwrap_or_else(|| k.to_string());
                    let v = self.generate(value, &format!("{path}[\"{label}\"]"), depth)?;
                    entries.push((k, v));
                }
                Ok(FakeValue::Mapping(entries))
            }

            leaf => match self.registry.resolve(&leaf) {
                Some(Generator::Override(generate)) => Ok(generate(self.rng())),
                Some(Generator::Primitive(kind)) => Ok(generate_primitive(kind, self.rng())),
                Some(Generator::Enum(e)) => {
                    choice::pick_label(self.rng(), e).ok_or_else(|| unrecognized(expr))
                }
                Some(Generator::Record(schema)) => {
                    let fields = self.record_fields(schema, path, depth + 1)?;
                    construct_record(schema, fields).map(FakeValue::Record)
                }
                None => Err(unrecognized(expr)),
            },
        }
    }

    fn collection_len(&mut self) -> usize {
        let (min, max) = (
            self.config.min_collection_len,
            self.config.max_collection_len,
        );
        collection::pick_length(self.rng(), min, max)
    }
}
