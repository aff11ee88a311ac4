//! Character set validation and creation, one concrete class per set.

use super::parameters::{count, exclusion, length, s, start_value, tweak, value};
use super::STRING_PROXY;
use crate::descriptor::{Multiplicity, ValueType};
use crate::error::Result;
use crate::registration::{ClassBuilder, MethodBuilder, Registrar};

const CHARACTER_SET: &str = "CharacterSetProxy";

pub fn describe(registrar: &mut dyn Registrar) -> Result<()> {
    ClassBuilder::new(CHARACTER_SET)
        .extends(STRING_PROXY)
        .declare(registrar);

    MethodBuilder::new(CHARACTER_SET, "validate", ValueType::String, Multiplicity::Matrix)
        .parameter(&s())
        .parameter(&exclusion())
        .register(registrar)?;

    MethodBuilder::new(CHARACTER_SET, "isValid", ValueType::Boolean, Multiplicity::Matrix)
        .parameter(&s())
        .parameter(&exclusion())
        .register(registrar)?;

    MethodBuilder::new(CHARACTER_SET, "create", ValueType::String, Multiplicity::Matrix)
        .parameter(&length())
        .parameter(&value())
        .parameter(&exclusion())
        .parameter(&tweak())
        .register(registrar)?;

    MethodBuilder::new(CHARACTER_SET, "createSequence", ValueType::String, Multiplicity::Matrix)
        .parameter(&length())
        .parameter(&start_value())
        .parameter(&count())
        .parameter(&exclusion())
        .parameter(&tweak())
        .infix_before("Sequence")
        .register(registrar)?;

    MethodBuilder::new(CHARACTER_SET, "valueFor", ValueType::Number, Multiplicity::Matrix)
        .parameter(&s())
        .parameter(&exclusion())
        .parameter(&tweak())
        .register(registrar)?;

    for infix in ["Numeric", "Hexadecimal", "Alphanumeric"] {
        ClassBuilder::new(format!("{}Proxy", infix))
            .extends(CHARACTER_SET)
            .method_infix(infix)
            .register(registrar)?;
    }

    Ok(())
}
