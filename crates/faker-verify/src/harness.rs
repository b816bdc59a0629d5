//! Round-trip harness.
//!
//! Builds an instance, encodes it with the codec under test, decodes the
//! bytes back against the same schema and compares the two structurally.

use crate::codec::Codec;
use crate::compare::{compare_records, compare_values, CompareResult};
use crate::error::VerifyError;
use crate::report::{ErrorInfo, MismatchInfo, RoundTripReport};
use faker_core::{Model, Record};
use faker_generator::{ModelFaker, PreConstructionHook};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Placeholder shown for a value lost in the round trip.
const MISSING: &str = "<missing>";

/// Round-trip verifier for one codec.
pub struct RoundTripHarness<C: Codec> {
    faker: ModelFaker,
    codec: C,
}

impl<C: Codec> RoundTripHarness<C> {
    /// Create a harness drawing instances from `faker`.
    pub fn new(faker: ModelFaker, codec: C) -> Self {
        Self { faker, codec }
    }

    /// Get a reference to the faker.
    pub fn faker(&self) -> &ModelFaker {
        &self.faker
    }

    /// Get a mutable reference to the faker.
    pub fn faker_mut(&mut self) -> &mut ModelFaker {
        &mut self.faker
    }

    /// Get a reference to the codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Build one instance of `record` and check that it survives the codec.
    ///
    /// Returns the verified instance.
    pub fn verify(
        &mut self,
        record: &str,
        hook: Option<&dyn PreConstructionHook>,
    ) -> Result<Record, VerifyError> {
        let original = self.faker.build(record, hook)?;
        let decoded = self.round_trip(&original)?;
        ensure_match(
            &original.schema,
            compare_records(&original, &decoded, self.faker.catalog()),
        )?;
        Ok(original)
    }

    /// Build one instance of a typed model and check that it survives the codec.
    ///
    /// The original and decoded instances are compared structurally first,
    /// so a difference is reported with its field path; `PartialEq` has the
    /// final word.
    pub fn verify_model<M: Model>(
        &mut self,
        hook: Option<&dyn PreConstructionHook>,
    ) -> Result<M, VerifyError> {
        let original = self.faker.build_model::<M>(hook)?;
        let bytes = self.codec.encode(&original)?;
        let decoded: M = self.codec.decode(&bytes)?;

        let catalog = self.faker.catalog();
        let expected = original.to_structure(catalog)?;
        let actual = decoded.to_structure(catalog)?;
        ensure_match(M::NAME, compare_values(&expected, &actual, catalog))?;

        if original != decoded {
            return Err(VerifyError::RoundTripMismatch {
                record: M::NAME.to_string(),
                path: "$".to_string(),
                expected: format!("{original:?}"),
                actual: format!("{decoded:?}"),
            });
        }
        Ok(decoded)
    }

    /// Round-trip `iterations` fresh instances of each named record.
    ///
    /// Failures are collected in the report rather than returned.
    pub fn verify_many(
        &mut self,
        records: &[&str],
        iterations: u64,
        hook: Option<&dyn PreConstructionHook>,
    ) -> RoundTripReport {
        let start_time = Instant::now();
        let mut report = RoundTripReport {
            codec: self.codec.name().to_string(),
            ..Default::default()
        };

        info!(
            "Starting {} round trip of {} records x {} iterations",
            self.codec.name(),
            records.len(),
            iterations
        );

        let mut generation_time = Duration::ZERO;
        let mut codec_time = Duration::ZERO;
        let mut compare_time = Duration::ZERO;

        for record in records {
            for iteration in 0..iterations {
                report.checked += 1;

                let gen_start = Instant::now();
                let built = self.faker.build(record, hook);
                generation_time += gen_start.elapsed();

                let codec_start = Instant::now();
                let decoded = built
                    .map_err(VerifyError::from)
                    .and_then(|original| Ok((self.round_trip(&original)?, original)));
                codec_time += codec_start.elapsed();

                let (decoded, original) = match decoded {
                    Ok(pair) => pair,
                    Err(e) => {
                        warn!("Round trip of '{}' #{} failed: {}", record, iteration, e);
                        report.errored += 1;
                        report.errors.push(ErrorInfo {
                            record: record.to_string(),
                            iteration,
                            message: e.to_string(),
                        });
                        continue;
                    }
                };

                let compare_start = Instant::now();
                let result = compare_records(&original, &decoded, self.faker.catalog());
                compare_time += compare_start.elapsed();

                match result {
                    CompareResult::Match => report.matched += 1,
                    CompareResult::Mismatch {
                        path,
                        expected,
                        actual,
                    } => {
                        warn!(
                            "Round trip of '{}' #{} diverged at {}: expected {}, got {}",
                            record, iteration, path, expected, actual
                        );
                        report.mismatched += 1;
                        report.mismatches.push(MismatchInfo {
                            record: record.to_string(),
                            iteration,
                            path,
                            expected,
                            actual,
                        });
                    }
                    CompareResult::Missing { path } => {
                        warn!(
                            "Round trip of '{}' #{} lost field {}",
                            record, iteration, path
                        );
                        report.mismatched += 1;
                        report.mismatches.push(MismatchInfo {
                            record: record.to_string(),
                            iteration,
                            path,
                            expected: "<present>".to_string(),
                            actual: MISSING.to_string(),
                        });
                    }
                }
            }
            debug!("Verified {} iterations of '{}'", iterations, record);
        }

        report.total_duration = start_time.elapsed();
        report.generation_duration = generation_time;
        report.codec_duration = codec_time;
        report.compare_duration = compare_time;

        info!(
            "Round trip complete: {} instances checked in {:?} - {} matched, {} mismatched, {} errored",
            report.checked,
            report.total_duration,
            report.matched,
            report.mismatched,
            report.errored
        );

        report
    }

    /// Encode a record, decode the bytes and rebuild it against its schema.
    ///
    /// Custom named types decode as the types their overrides declare.
    fn round_trip(&self, original: &Record) -> Result<Record, VerifyError> {
        let bytes = self.codec.encode(&original.to_json())?;
        let value: Value = self.codec.decode(&bytes)?;

        let catalog = self.faker.catalog();
        let schema = catalog.require_record(&original.schema)?;
        let named = self.faker.registry().named_types();
        Ok(Record::from_json_with(&value, schema, catalog, &named)?)
    }
}

/// Turn a comparison result into a verification outcome.
fn ensure_match(record: &str, result: CompareResult) -> Result<(), VerifyError> {
    match result {
        CompareResult::Match => Ok(()),
        CompareResult::Mismatch {
            path,
            expected,
            actual,
        } => Err(VerifyError::RoundTripMismatch {
            record: record.to_string(),
            path,
            expected,
            actual,
        }),
        CompareResult::Missing { path } => Err(VerifyError::RoundTripMismatch {
            record: record.to_string(),
            path,
            expected: "<present>".to_string(),
            actual: MISSING.to_string(),
        }),
    }
}
