//! Parameter descriptors shared across proxy definitions.
//!
//! Families are built by extension so that every variant localizes under its
//! root entry.

use crate::descriptor::{Multiplicity, ParameterDescriptor, ValueType};

// ==================== String ====================

pub fn s() -> ParameterDescriptor {
    ParameterDescriptor::new("s", ValueType::String, Multiplicity::Matrix, true)
}

pub fn exclusion() -> ParameterDescriptor {
    ParameterDescriptor::new("exclusion", ValueType::Number, Multiplicity::Singleton, false)
}

pub fn tweak() -> ParameterDescriptor {
    ParameterDescriptor::new("tweak", ValueType::Number, Multiplicity::Singleton, false)
}

// ==================== Sequence ====================

pub fn length() -> ParameterDescriptor {
    ParameterDescriptor::new("length", ValueType::Number, Multiplicity::Singleton, true)
}

pub fn value() -> ParameterDescriptor {
    ParameterDescriptor::new("value", ValueType::Number, Multiplicity::Matrix, true)
}

pub fn start_value() -> ParameterDescriptor {
    value()
        .extend()
        .named("startValue")
        .multiplicity(Multiplicity::Singleton)
        .into()
}

pub fn count() -> ParameterDescriptor {
    ParameterDescriptor::new("count", ValueType::Number, Multiplicity::Singleton, true)
}

pub fn sparse() -> ParameterDescriptor {
    ParameterDescriptor::new("sparse", ValueType::Boolean, Multiplicity::Singleton, false)
}

// ==================== Identifier ====================

pub fn identifier() -> ParameterDescriptor {
    ParameterDescriptor::new("identifier", ValueType::String, Multiplicity::Matrix, true)
}

pub fn gtin() -> ParameterDescriptor {
    identifier().extend().named("gtin").sort_order(1).into()
}

pub fn gln() -> ParameterDescriptor {
    identifier().extend().named("gln").sort_order(2).into()
}

pub fn validation() -> ParameterDescriptor {
    ParameterDescriptor::new("validation", ValueType::Number, Multiplicity::Singleton, false)
}

pub fn prefix() -> ParameterDescriptor {
    ParameterDescriptor::new("prefix", ValueType::String, Multiplicity::Singleton, true)
}

pub fn prefix_matrix() -> ParameterDescriptor {
    prefix().extend().multiplicity(Multiplicity::Matrix).into()
}

pub fn item_reference() -> ParameterDescriptor {
    value().extend().named("itemReference").sort_order(1).into()
}

pub fn location_reference() -> ParameterDescriptor {
    value().extend().named("locationReference").sort_order(2).into()
}

pub fn indicator_digit() -> ParameterDescriptor {
    ParameterDescriptor::new("indicatorDigit", ValueType::String, Multiplicity::Singleton, true)
}

// ==================== Utility ====================

pub fn matrix() -> ParameterDescriptor {
    ParameterDescriptor::new("matrix", ValueType::Any, Multiplicity::Matrix, true)
}

pub fn interval() -> ParameterDescriptor {
    ParameterDescriptor::new("interval", ValueType::Number, Multiplicity::Singleton, false)
}
