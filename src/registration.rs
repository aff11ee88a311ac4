//! Registration engine.
//!
//! Proxy definitions describe themselves through the [`Registrar`] interface:
//! classes are declared with an explicit base, parameters are registered by
//! index, then the owning method, and finally concrete classes. Each run owns
//! its own [`ElaborationSession`], so separate runs never share pending state.
//!
//! Class registration flattens the declared hierarchy, most distant ancestor
//! first, so an override replaces its ancestor's entry while keeping the
//! ancestor's position in the resolved method order.

use crate::descriptor::{
    ClassDescriptor, ClassOptions, MethodDescriptor, MethodOptions, Multiplicity,
    ParameterDescriptor, ReplaceParameterDescriptor, ValueType,
};
use crate::error::{GeneratorError, Result};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Callback interface used by proxy definitions.
pub trait Registrar {
    /// Record a class and its direct base; `None` means the class derives
    /// directly from the universal proxy base.
    fn declare_class(&mut self, class_name: &str, base_class_name: Option<&str>);

    /// Record a parameter descriptor for the method registered next.
    fn register_parameter(&mut self, index: usize, descriptor: ParameterDescriptor);

    /// Register a method of `class_name` taking `arity` parameters.
    fn register_method(
        &mut self,
        class_name: &str,
        method_name: &str,
        arity: usize,
        options: MethodOptions,
    ) -> Result<()>;

    /// Resolve a concrete class and queue it for emission.
    fn register_class(&mut self, class_name: &str, options: ClassOptions) -> Result<()>;
}

/// Per-run registration state.
#[derive(Debug, Default)]
pub struct ElaborationSession {
    pending_parameters: Vec<Option<ParameterDescriptor>>,
    /// Methods keyed by the class that declares them, in declaration order.
    declared_methods: HashMap<String, Vec<MethodDescriptor>>,
    base_classes: HashMap<String, Option<String>>,
    pending_classes: Vec<ClassDescriptor>,
}

impl ElaborationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the classes registered since the last call.
    pub fn take_pending_classes(&mut self) -> Vec<ClassDescriptor> {
        std::mem::take(&mut self.pending_classes)
    }

    /// Number of parameters registered since the last method.
    pub fn pending_parameter_count(&self) -> usize {
        self.pending_parameters.iter().flatten().count()
    }

    /// The class followed by its ancestors, nearest first.
    fn lineage(&self, class_name: &str) -> Result<Vec<String>> {
        let mut lineage: Vec<String> = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(class_name.to_string());

        while let Some(name) = current {
            if !visited.insert(name.clone()) {
                return Err(GeneratorError::HierarchyCycle(class_name.to_string()));
            }

            let base = match self.base_classes.get(&name) {
                Some(base) => base.clone(),
                None => {
                    return Err(match lineage.last() {
                        None => GeneratorError::UnknownClass(name),
                        Some(derived) => GeneratorError::UnknownBaseClass {
                            class_name: derived.clone(),
                            base_class_name: name,
                        },
                    })
                }
            };

            lineage.push(name);
            current = base;
        }

        Ok(lineage)
    }
}

impl Registrar for ElaborationSession {
    fn declare_class(&mut self, class_name: &str, base_class_name: Option<&str>) {
        self.base_classes
            .insert(class_name.to_string(), base_class_name.map(str::to_string));
    }

    fn register_parameter(&mut self, index: usize, descriptor: ParameterDescriptor) {
        if self.pending_parameters.len() <= index {
            self.pending_parameters.resize(index + 1, None);
        }
        self.pending_parameters[index] = Some(descriptor);
    }

    fn register_method(
        &mut self,
        class_name: &str,
        method_name: &str,
        arity: usize,
        options: MethodOptions,
    ) -> Result<()> {
        let mut pending = std::mem::take(&mut self.pending_parameters);

        let mut parameter_descriptors = Vec::with_capacity(arity);
        for index in 0..arity {
            match pending.get_mut(index).and_then(Option::take) {
                Some(descriptor) => parameter_descriptors.push(descriptor),
                None => {
                    return Err(GeneratorError::MissingDescriptor {
                        class_name: class_name.to_string(),
                        method_name: method_name.to_string(),
                        index,
                    })
                }
            }
        }

        validate_parameters(class_name, method_name, &parameter_descriptors)?;

        debug!(
            "Registered method {}.{} ({} parameters)",
            class_name, method_name, arity
        );

        self.declared_methods
            .entry(class_name.to_string())
            .or_default()
            .push(MethodDescriptor::new(method_name, options, parameter_descriptors));

        Ok(())
    }

    fn register_class(&mut self, class_name: &str, options: ClassOptions) -> Result<()> {
        let lineage = self.lineage(class_name)?;

        let mut methods: IndexMap<String, MethodDescriptor> = IndexMap::new();
        for level in lineage.iter().rev() {
            if let Some(declared) = self.declared_methods.get(level) {
                for method in declared {
                    // Overwriting keeps the ancestor's slot.
                    methods.insert(method.name.clone(), method.clone());
                }
            }
        }

        let mut method_descriptors: Vec<MethodDescriptor> = methods.into_values().collect();
        if !options.replace_parameter_descriptors.is_empty() {
            for method in &mut method_descriptors {
                replace_parameters(method, &options.replace_parameter_descriptors);
                validate_parameters(class_name, &method.name, &method.parameter_descriptors)?;
            }
        }

        debug!(
            "Registered class {} ({} methods)",
            class_name,
            method_descriptors.len()
        );

        let base_class_name = lineage.get(1).cloned();
        self.pending_classes.push(ClassDescriptor {
            name: class_name.to_string(),
            base_class_name,
            namespace: options.namespace,
            method_infix: options.method_infix,
            replace_parameter_descriptors: options.replace_parameter_descriptors,
            method_descriptors,
        });

        Ok(())
    }
}

/// Parameter names must be unique and no required parameter may follow an
/// optional one.
fn validate_parameters(
    class_name: &str,
    method_name: &str,
    parameters: &[ParameterDescriptor],
) -> Result<()> {
    let mut seen = HashSet::new();
    let mut first_optional_seen = false;

    for (index, parameter) in parameters.iter().enumerate() {
        if !seen.insert(parameter.name()) {
            return Err(GeneratorError::DuplicateParameterName {
                class_name: class_name.to_string(),
                method_name: method_name.to_string(),
                parameter: parameter.name().to_string(),
            });
        }

        if parameter.is_required() {
            if first_optional_seen {
                return Err(GeneratorError::OrderingViolation {
                    class_name: class_name.to_string(),
                    method_name: method_name.to_string(),
                    parameter: parameter.name().to_string(),
                    predecessor: parameters[index - 1].name().to_string(),
                });
            }
        } else {
            first_optional_seen = true;
        }
    }

    Ok(())
}

/// Substitute parameters by effective name; the source descriptors are
/// never modified.
fn replace_parameters(method: &mut MethodDescriptor, replacements: &[ReplaceParameterDescriptor]) {
    for parameter in &mut method.parameter_descriptors {
        if let Some(replace) = replacements
            .iter()
            .find(|replace| replace.name == parameter.name())
        {
            *parameter = replace.replacement.clone();
        }
    }
}

/// Registers a method's parameters in order followed by the method itself.
#[derive(Debug, Clone)]
pub struct MethodBuilder {
    class_name: String,
    method_name: String,
    options: MethodOptions,
    parameters: Vec<ParameterDescriptor>,
}

impl MethodBuilder {
    pub fn new(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        value_type: ValueType,
        multiplicity: Multiplicity,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            options: MethodOptions::returns(value_type, multiplicity),
            parameters: Vec::new(),
        }
    }

    pub fn parameter(mut self, descriptor: &ParameterDescriptor) -> Self {
        self.parameters.push(descriptor.clone());
        self
    }

    pub fn asynchronous(mut self) -> Self {
        self.options.is_async = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.options.is_hidden = true;
        self
    }

    pub fn stream(mut self) -> Self {
        self.options.is_stream = true;
        self
    }

    pub fn requires_context(mut self) -> Self {
        self.options.requires_context = true;
        self
    }

    pub fn no_infix(mut self) -> Self {
        self.options.no_infix = true;
        self
    }

    pub fn infix_before(mut self, anchor: impl Into<String>) -> Self {
        self.options.infix_before = Some(anchor.into());
        self
    }

    pub fn register(self, registrar: &mut dyn Registrar) -> Result<()> {
        let arity = self.parameters.len();
        for (index, parameter) in self.parameters.into_iter().enumerate() {
            registrar.register_parameter(index, parameter);
        }
        registrar.register_method(&self.class_name, &self.method_name, arity, self.options)
    }
}

/// Declares a class and, for concrete classes, registers it.
#[derive(Debug, Clone)]
pub struct ClassBuilder {
    class_name: String,
    base_class_name: Option<String>,
    options: ClassOptions,
}

impl ClassBuilder {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            base_class_name: None,
            options: ClassOptions::default(),
        }
    }

    pub fn extends(mut self, base_class_name: impl Into<String>) -> Self {
        self.base_class_name = Some(base_class_name.into());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.options.namespace = Some(namespace.into());
        self
    }

    pub fn method_infix(mut self, infix: impl Into<String>) -> Self {
        self.options.method_infix = Some(infix.into());
        self
    }

    pub fn replace_parameter(mut self, name: impl Into<String>, replacement: &ParameterDescriptor) -> Self {
        self.options
            .replace_parameter_descriptors
            .push(ReplaceParameterDescriptor {
                name: name.into(),
                replacement: replacement.clone(),
            });
        self
    }

    /// Declare an abstract class; its methods are only emitted through
    /// concrete descendants.
    pub fn declare(self, registrar: &mut dyn Registrar) {
        registrar.declare_class(&self.class_name, self.base_class_name.as_deref());
    }

    /// Declare and register a concrete class. Methods must already be
    /// registered for the class and its ancestors.
    pub fn register(self, registrar: &mut dyn Registrar) -> Result<()> {
        registrar.declare_class(&self.class_name, self.base_class_name.as_deref());
        registrar.register_class(&self.class_name, self.options)
    }
}
