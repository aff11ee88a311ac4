//! GS1 check digit and check character pair functions.

use super::parameters::s;
use super::STRING_PROXY;
use crate::descriptor::{Multiplicity, ValueType};
use crate::error::Result;
use crate::registration::{ClassBuilder, MethodBuilder, Registrar};

const CHECK: &str = "CheckProxy";

pub fn describe(registrar: &mut dyn Registrar) -> Result<()> {
    let methods = [
        ("checkDigit", ValueType::String),
        ("hasValidCheckDigit", ValueType::Boolean),
        ("priceOrWeightCheckDigit", ValueType::String),
        ("checkCharacterPair", ValueType::String),
        ("hasValidCheckCharacterPair", ValueType::Boolean),
    ];
    for (method_name, value_type) in methods {
        MethodBuilder::new(CHECK, method_name, value_type, Multiplicity::Matrix)
            .parameter(&s())
            .register(registrar)?;
    }

    ClassBuilder::new(CHECK)
        .extends(STRING_PROXY)
        .namespace("GS1")
        .register(registrar)
}
