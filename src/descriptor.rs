//! Descriptor model: plain data describing proxy parameters, methods and classes.
//!
//! Parameter descriptors form families through extends-chains. An extended
//! descriptor overlays whatever fields it defines onto its base, so the
//! *effective* descriptor is always computed by walking the chain back to its
//! root. Chains are built bottom-up from immutable values and therefore can
//! never be cyclic.

use std::fmt;
use std::sync::Arc;

/// Value type accepted or returned by a proxy function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Any,
}

/// Shape of a value: scalar, one-dimensional or two-dimensional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    Singleton,
    Array,
    Matrix,
}

/// A root parameter descriptor with every field defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseParameterDescriptor {
    pub name: String,
    pub value_type: ValueType,
    pub multiplicity: Multiplicity,
    pub is_required: bool,
}

/// A parameter descriptor that inherits unset fields from another descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendsParameterDescriptor {
    pub extends_descriptor: Arc<ParameterDescriptor>,
    pub name: Option<String>,
    pub value_type: Option<ValueType>,
    pub multiplicity: Option<Multiplicity>,
    pub is_required: Option<bool>,
    /// Display ordering among siblings sharing a base; documentation only.
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterDescriptor {
    Base(BaseParameterDescriptor),
    Extends(ExtendsParameterDescriptor),
}

/// Fully resolved view of a parameter descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveParameter {
    pub name: String,
    pub value_type: ValueType,
    pub multiplicity: Multiplicity,
    pub is_required: bool,
}

impl ParameterDescriptor {
    pub fn new(
        name: impl Into<String>,
        value_type: ValueType,
        multiplicity: Multiplicity,
        is_required: bool,
    ) -> Self {
        ParameterDescriptor::Base(BaseParameterDescriptor {
            name: name.into(),
            value_type,
            multiplicity,
            is_required,
        })
    }

    /// Start an extends-descriptor based on this one.
    pub fn extend(&self) -> ExtendsParameterDescriptor {
        ExtendsParameterDescriptor {
            extends_descriptor: Arc::new(self.clone()),
            name: None,
            value_type: None,
            multiplicity: None,
            is_required: None,
            sort_order: None,
        }
    }

    /// Overlay each level of the chain onto its base's effective descriptor.
    pub fn effective(&self) -> EffectiveParameter {
        match self {
            ParameterDescriptor::Base(base) => EffectiveParameter {
                name: base.name.clone(),
                value_type: base.value_type,
                multiplicity: base.multiplicity,
                is_required: base.is_required,
            },
            ParameterDescriptor::Extends(extends) => {
                let base = extends.extends_descriptor.effective();
                EffectiveParameter {
                    name: extends.name.clone().unwrap_or(base.name),
                    value_type: extends.value_type.unwrap_or(base.value_type),
                    multiplicity: extends.multiplicity.unwrap_or(base.multiplicity),
                    is_required: extends.is_required.unwrap_or(base.is_required),
                }
            }
        }
    }

    /// Effective name, without resolving the other fields.
    pub fn name(&self) -> &str {
        match self {
            ParameterDescriptor::Base(base) => &base.name,
            ParameterDescriptor::Extends(extends) => match &extends.name {
                Some(name) => name,
                None => extends.extends_descriptor.name(),
            },
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            ParameterDescriptor::Base(base) => base.is_required,
            ParameterDescriptor::Extends(extends) => extends
                .is_required
                .unwrap_or_else(|| extends.extends_descriptor.is_required()),
        }
    }

    /// Sort order defined on this descriptor itself (never inherited).
    pub fn sort_order(&self) -> Option<i32> {
        match self {
            ParameterDescriptor::Base(_) => None,
            ParameterDescriptor::Extends(extends) => extends.sort_order,
        }
    }

    /// The descriptor this one extends, if any.
    pub fn base(&self) -> Option<&ParameterDescriptor> {
        match self {
            ParameterDescriptor::Base(_) => None,
            ParameterDescriptor::Extends(extends) => Some(&extends.extends_descriptor),
        }
    }

    /// The extends-chain, root first, ending with this descriptor.
    pub fn chain(&self) -> Vec<&ParameterDescriptor> {
        let mut chain = vec![self];
        let mut current = self;
        while let Some(base) = current.base() {
            chain.push(base);
            current = base;
        }
        chain.reverse();
        chain
    }

    /// Canonical localization identity: the distinct names along the chain,
    /// root first, each paired with the sort order of the level that
    /// introduced it.
    ///
    /// Levels that do not rename the parameter share their base's identity.
    pub fn identity_path(&self) -> Vec<(String, Option<i32>)> {
        let mut path: Vec<(String, Option<i32>)> = Vec::new();
        for level in self.chain() {
            let name = level.name();
            if path.last().map(|(last, _)| last.as_str()) != Some(name) {
                path.push((name.to_string(), level.sort_order()));
            }
        }
        path
    }
}

impl ExtendsParameterDescriptor {
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    pub fn multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.multiplicity = Some(multiplicity);
        self
    }

    pub fn required(mut self, is_required: bool) -> Self {
        self.is_required = Some(is_required);
        self
    }

    pub fn sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = Some(sort_order);
        self
    }
}

impl From<ExtendsParameterDescriptor> for ParameterDescriptor {
    fn from(extends: ExtendsParameterDescriptor) -> Self {
        ParameterDescriptor::Extends(extends)
    }
}

impl fmt::Display for ParameterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Method-level fields supplied at registration; name and parameters are
/// filled in by the registration engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodOptions {
    pub value_type: ValueType,
    pub multiplicity: Multiplicity,
    pub is_async: bool,
    pub is_hidden: bool,
    pub is_stream: bool,
    pub requires_context: bool,
    pub no_infix: bool,
    pub infix_before: Option<String>,
}

impl MethodOptions {
    pub fn returns(value_type: ValueType, multiplicity: Multiplicity) -> Self {
        Self {
            value_type,
            multiplicity,
            is_async: false,
            is_hidden: false,
            is_stream: false,
            requires_context: false,
            no_infix: false,
            infix_before: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub value_type: ValueType,
    pub multiplicity: Multiplicity,
    pub parameter_descriptors: Vec<ParameterDescriptor>,
    pub is_async: bool,
    pub is_hidden: bool,
    pub is_stream: bool,
    pub requires_context: bool,
    pub no_infix: bool,
    /// Substring marking where a class infix is spliced into the name.
    pub infix_before: Option<String>,
}

impl MethodDescriptor {
    pub fn new(
        name: impl Into<String>,
        options: MethodOptions,
        parameter_descriptors: Vec<ParameterDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            value_type: options.value_type,
            multiplicity: options.multiplicity,
            parameter_descriptors,
            is_async: options.is_async,
            is_hidden: options.is_hidden,
            is_stream: options.is_stream,
            requires_context: options.requires_context,
            no_infix: options.no_infix,
            infix_before: options.infix_before,
        }
    }
}

/// Substitutes the parameter descriptor with the given effective name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceParameterDescriptor {
    pub name: String,
    pub replacement: ParameterDescriptor,
}

/// Class-level fields supplied at registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassOptions {
    pub namespace: Option<String>,
    pub method_infix: Option<String>,
    pub replace_parameter_descriptors: Vec<ReplaceParameterDescriptor>,
}

/// A registered class with its inheritance-flattened method set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    pub name: String,
    pub base_class_name: Option<String>,
    pub namespace: Option<String>,
    pub method_infix: Option<String>,
    pub replace_parameter_descriptors: Vec<ReplaceParameterDescriptor>,
    pub method_descriptors: Vec<MethodDescriptor>,
}
