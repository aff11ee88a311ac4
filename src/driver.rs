//! Generator driver: elaborates proxy modules and feeds the resolved
//! descriptors to a [`Generator`].
//!
//! A run is `initialize`, then one elaboration step per module, then
//! `finalize`. Each module's classes are emitted completely, in registration
//! order, before the next module is described. Any failure stops elaboration
//! and the generator is finalized with `success = false`.

use crate::descriptor::{ClassDescriptor, MethodDescriptor};
use crate::error::{GeneratorError, Result};
use crate::i18n::{FunctionLocalization, LocaleCatalog};
use crate::naming;
use crate::registration::{ElaborationSession, Registrar};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, error, info};

pub type DescribeFn = fn(&mut dyn Registrar) -> Result<()>;

/// A unit of elaboration input: a named set of proxy definitions.
#[derive(Debug, Clone, Copy)]
pub struct ProxyModule {
    pub name: &'static str,
    pub describe: DescribeFn,
}

/// Per-function data computed by the driver for the emission hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyFunction {
    /// Emitted (disambiguated) name.
    pub name: String,
    pub namespace: Option<String>,
    /// Keyed by locale code; empty when no catalog is attached.
    pub localizations: BTreeMap<String, FunctionLocalization>,
}

impl ProxyFunction {
    pub fn qualified_name(&self) -> String {
        naming::qualified_name(self.namespace.as_deref(), &self.name)
    }

    pub fn localization(&self, locale_code: &str) -> Option<&FunctionLocalization> {
        self.localizations.get(locale_code)
    }
}

/// Hooks implemented by concrete emitters.
pub trait Generator {
    fn initialize(&mut self) -> Result<()>;

    fn create_proxy_object(&mut self, class: &ClassDescriptor) -> Result<()>;

    fn create_proxy_function(
        &mut self,
        class: &ClassDescriptor,
        method: &MethodDescriptor,
        function: &ProxyFunction,
    ) -> Result<()>;

    /// Always called once per run; `success` is false when elaboration failed.
    fn finalize(&mut self, success: bool) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub modules: usize,
    pub classes: usize,
    pub functions: usize,
}

pub struct GeneratorDriver<'a> {
    modules: Vec<ProxyModule>,
    catalog: Option<&'a LocaleCatalog>,
}

impl<'a> GeneratorDriver<'a> {
    pub fn new(modules: Vec<ProxyModule>) -> Self {
        Self {
            modules,
            catalog: None,
        }
    }

    /// Localize every emitted function against `catalog`.
    pub fn with_catalog(mut self, catalog: &'a LocaleCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn run(&self, generator: &mut dyn Generator) -> Result<GenerationSummary> {
        let result = match generator.initialize() {
            Ok(()) => self.elaborate_all(generator),
            Err(e) => Err(e),
        };

        match result {
            Ok(summary) => {
                generator.finalize(true)?;
                info!(
                    "Generated {} functions from {} classes in {} modules",
                    summary.functions, summary.classes, summary.modules
                );
                Ok(summary)
            }
            Err(e) => {
                error!("Generation failed: {}", e);
                if let Err(finalize_error) = generator.finalize(false) {
                    error!("Finalize after failure also failed: {}", finalize_error);
                }
                Err(e)
            }
        }
    }

    fn elaborate_all(&self, generator: &mut dyn Generator) -> Result<GenerationSummary> {
        let mut session = ElaborationSession::new();
        let mut emitted = HashSet::new();
        let mut summary = GenerationSummary::default();

        for module in &self.modules {
            info!("Elaborating module {}", module.name);
            (module.describe)(&mut session)?;

            let dangling = session.pending_parameter_count();
            if dangling > 0 {
                return Err(GeneratorError::DanglingParameters {
                    module: module.name.to_string(),
                    count: dangling,
                });
            }

            for class in session.take_pending_classes() {
                self.emit_class(generator, &class, &mut emitted, &mut summary)?;
                summary.classes += 1;
            }
            summary.modules += 1;
        }

        Ok(summary)
    }

    fn emit_class(
        &self,
        generator: &mut dyn Generator,
        class: &ClassDescriptor,
        emitted: &mut HashSet<String>,
        summary: &mut GenerationSummary,
    ) -> Result<()> {
        debug!("Creating proxy object for {}", class.name);
        generator.create_proxy_object(class)?;

        for method in &class.method_descriptors {
            let name = naming::function_name(class.method_infix.as_deref(), method)?;
            let qualified = naming::qualified_name(class.namespace.as_deref(), &name);
            if !emitted.insert(qualified.clone()) {
                return Err(GeneratorError::DuplicateFunctionName(qualified));
            }

            let localizations = match self.catalog {
                Some(catalog) if !method.is_hidden => catalog.localize_function(
                    class.namespace.as_deref(),
                    &name,
                    &method.parameter_descriptors,
                )?,
                _ => BTreeMap::new(),
            };

            debug!("Creating proxy function {} for {}.{}", qualified, class.name, method.name);
            generator.create_proxy_function(
                class,
                method,
                &ProxyFunction {
                    name,
                    namespace: class.namespace.clone(),
                    localizations,
                },
            )?;
            summary.functions += 1;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Multiplicity, ParameterDescriptor, ValueType};
    use crate::i18n::{Locale, LookupPolicy};
    use crate::registration::{ClassBuilder, MethodBuilder};
    use serde_json::json;

    /// Records every hook invocation in order.
    #[derive(Default)]
    struct RecordingGenerator {
        events: Vec<String>,
        fail_on_object: Option<&'static str>,
    }

    impl Generator for RecordingGenerator {
        fn initialize(&mut self) -> Result<()> {
            self.events.push("initialize".to_string());
            Ok(())
        }

        fn create_proxy_object(&mut self, class: &ClassDescriptor) -> Result<()> {
            if self.fail_on_object == Some(class.name.as_str()) {
                return Err(GeneratorError::InvalidClassName(class.name.clone()));
            }
            self.events.push(format!("object {}", class.name));
            Ok(())
        }

        fn create_proxy_function(
            &mut self,
            _class: &ClassDescriptor,
            method: &MethodDescriptor,
            function: &ProxyFunction,
        ) -> Result<()> {
            self.events
                .push(format!("function {} ({})", function.qualified_name(), method.name));
            Ok(())
        }

        fn finalize(&mut self, success: bool) -> Result<()> {
            self.events.push(format!("finalize {}", success));
            Ok(())
        }
    }

    fn s() -> ParameterDescriptor {
        ParameterDescriptor::new("s", ValueType::String, Multiplicity::Matrix, true)
    }

    fn describe_base(registrar: &mut dyn Registrar) -> Result<()> {
        ClassBuilder::new("CharacterSetProxy").declare(registrar);
        MethodBuilder::new("CharacterSetProxy", "validate", ValueType::String, Multiplicity::Matrix)
            .parameter(&s())
            .register(registrar)?;
        MethodBuilder::new(
            "CharacterSetProxy",
            "createSequence",
            ValueType::String,
            Multiplicity::Matrix,
        )
        .infix_before("Sequence")
        .register(registrar)?;
        ClassBuilder::new("NumericProxy")
            .extends("CharacterSetProxy")
            .method_infix("Numeric")
            .register(registrar)
    }

    fn describe_check(registrar: &mut dyn Registrar) -> Result<()> {
        MethodBuilder::new("CheckProxy", "checkDigit", ValueType::String, Multiplicity::Matrix)
            .parameter(&s())
            .register(registrar)?;
        ClassBuilder::new("CheckProxy")
            .namespace("GS1")
            .register(registrar)
    }

    fn describe_duplicate(registrar: &mut dyn Registrar) -> Result<()> {
        ClassBuilder::new("OtherCheckProxy")
            .extends("CheckProxy")
            .namespace("GS1")
            .register(registrar)
    }

    fn describe_broken(registrar: &mut dyn Registrar) -> Result<()> {
        registrar.register_method(
            "BrokenProxy",
            "broken",
            1,
            crate::descriptor::MethodOptions::returns(ValueType::String, Multiplicity::Matrix),
        )
    }

    fn describe_dangling(registrar: &mut dyn Registrar) -> Result<()> {
        registrar.register_parameter(0, s());
        Ok(())
    }

    fn describe_later(registrar: &mut dyn Registrar) -> Result<()> {
        registrar.register_method(
            "LaterProxy",
            "later",
            1,
            crate::descriptor::MethodOptions::returns(ValueType::String, Multiplicity::Matrix),
        )?;
        ClassBuilder::new("LaterProxy").register(registrar)
    }

    fn module(name: &'static str, describe: DescribeFn) -> ProxyModule {
        ProxyModule { name, describe }
    }

    // ==================== Run Sequence Tests ====================

    #[test]
    fn test_run_invokes_hooks_in_order() {
        let driver = GeneratorDriver::new(vec![
            module("character-set", describe_base),
            module("check", describe_check),
        ]);
        let mut generator = RecordingGenerator::default();

        let summary = driver.run(&mut generator).expect("Should generate");

        assert_eq!(
            generator.events,
            vec![
                "initialize",
                "object NumericProxy",
                "function validateNumeric (validate)",
                "function createNumericSequence (createSequence)",
                "object CheckProxy",
                "function GS1.checkDigit (checkDigit)",
                "finalize true",
            ]
        );
        assert_eq!(
            summary,
            GenerationSummary {
                modules: 2,
                classes: 2,
                functions: 3
            }
        );
    }

    #[test]
    fn test_run_failure_finalizes_unsuccessfully() {
        let driver = GeneratorDriver::new(vec![
            module("check", describe_check),
            module("broken", describe_broken),
            module("character-set", describe_base),
        ]);
        let mut generator = RecordingGenerator::default();

        let result = driver.run(&mut generator);

        assert!(matches!(
            result,
            Err(GeneratorError::MissingDescriptor { .. })
        ));
        assert_eq!(generator.events.last().unwrap(), "finalize false");
        assert!(!generator.events.iter().any(|e| e.contains("NumericProxy")));
    }

    #[test]
    fn test_run_hook_failure_aborts() {
        let driver = GeneratorDriver::new(vec![
            module("character-set", describe_base),
            module("check", describe_check),
        ]);
        let mut generator = RecordingGenerator {
            fail_on_object: Some("NumericProxy"),
            ..Default::default()
        };

        assert!(driver.run(&mut generator).is_err());
        assert_eq!(generator.events, vec!["initialize", "finalize false"]);
    }

    #[test]
    fn test_run_dangling_parameter_fails_module() {
        let driver = GeneratorDriver::new(vec![
            module("dangling", describe_dangling),
            module("later", describe_later),
        ]);
        let mut generator = RecordingGenerator::default();

        match driver.run(&mut generator) {
            Err(GeneratorError::DanglingParameters { module, count }) => {
                assert_eq!(module, "dangling");
                assert_eq!(count, 1);
            }
            other => panic!("Expected DanglingParameters, got {:?}", other),
        }
        assert_eq!(generator.events, vec!["initialize", "finalize false"]);
    }

    #[test]
    fn test_run_duplicate_function_name() {
        let driver = GeneratorDriver::new(vec![
            module("check", describe_check),
            module("duplicate", describe_duplicate),
        ]);
        let mut generator = RecordingGenerator::default();

        match driver.run(&mut generator) {
            Err(GeneratorError::DuplicateFunctionName(name)) => {
                assert_eq!(name, "GS1.checkDigit")
            }
            other => panic!("Expected DuplicateFunctionName, got {:?}", other),
        }
    }

    // ==================== Localization Tests ====================

    #[derive(Default)]
    struct CapturingGenerator {
        functions: Vec<ProxyFunction>,
    }

    impl Generator for CapturingGenerator {
        fn initialize(&mut self) -> Result<()> {
            Ok(())
        }

        fn create_proxy_object(&mut self, _class: &ClassDescriptor) -> Result<()> {
            Ok(())
        }

        fn create_proxy_function(
            &mut self,
            _class: &ClassDescriptor,
            _method: &MethodDescriptor,
            function: &ProxyFunction,
        ) -> Result<()> {
            self.functions.push(function.clone());
            Ok(())
        }

        fn finalize(&mut self, _success: bool) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_run_with_catalog_localizes_functions() {
        let mut catalog = LocaleCatalog::new(LookupPolicy::BestEffort);
        catalog.insert(
            Locale::from_code("fr").unwrap(),
            json!({
                "Parameters": { "s": { "name": "chaîne", "description": "Chaîne" } },
                "Functions": { "GS1": { "checkDigit": { "name": "chiffreDeControle", "description": "Calcule" } } }
            }),
        );

        let driver =
            GeneratorDriver::new(vec![module("check", describe_check)]).with_catalog(&catalog);
        let mut generator = CapturingGenerator::default();
        driver.run(&mut generator).expect("Should generate");

        let function = &generator.functions[0];
        let fr = function.localization("fr").expect("Should be localized");
        assert_eq!(fr.name, "chiffreDeControle");
        assert_eq!(fr.parameters[0].name, "chaîne");
    }

    #[test]
    fn test_run_with_strict_catalog_reports_missing_localization() {
        let mut catalog = LocaleCatalog::new(LookupPolicy::Strict);
        catalog.insert(Locale::from_code("fr").unwrap(), json!({}));

        let driver =
            GeneratorDriver::new(vec![module("check", describe_check)]).with_catalog(&catalog);
        let mut generator = CapturingGenerator::default();

        assert!(matches!(
            driver.run(&mut generator),
            Err(GeneratorError::MissingLocalization { .. })
        ));
    }
}
