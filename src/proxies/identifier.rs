//! GS1 identifier validation, creation and company prefix lookup.

use super::parameters::{
    count, gln, gtin, identifier, indicator_digit, item_reference, location_reference, prefix,
    prefix_matrix, sparse, start_value, validation, value,
};
use crate::descriptor::{Multiplicity, ValueType};
use crate::error::Result;
use crate::registration::{ClassBuilder, MethodBuilder, Registrar};

const GS1: &str = "GS1";
const VALIDATOR: &str = "IdentifierValidatorProxy";
const CREATOR: &str = "IdentifierCreatorProxy";
const GTIN_CREATOR: &str = "GTINCreatorProxy";
const GCP_LENGTH: &str = "GCPLengthProxy";

fn describe_validators(registrar: &mut dyn Registrar) -> Result<()> {
    ClassBuilder::new(VALIDATOR).declare(registrar);

    MethodBuilder::new(VALIDATOR, "validate", ValueType::String, Multiplicity::Matrix)
        .parameter(&identifier())
        .parameter(&validation())
        .register(registrar)?;

    MethodBuilder::new(VALIDATOR, "isValid", ValueType::Boolean, Multiplicity::Matrix)
        .parameter(&identifier())
        .register(registrar)?;

    for key in ["GTIN13", "GTIN12"] {
        ClassBuilder::new(format!("{}ValidatorProxy", key))
            .extends(VALIDATOR)
            .namespace(GS1)
            .method_infix(key)
            .replace_parameter("identifier", &gtin())
            .register(registrar)?;
    }

    ClassBuilder::new("GLNValidatorProxy")
        .extends(VALIDATOR)
        .namespace(GS1)
        .method_infix("GLN")
        .replace_parameter("identifier", &gln())
        .register(registrar)
}

fn describe_creators(registrar: &mut dyn Registrar) -> Result<()> {
    ClassBuilder::new(CREATOR).declare(registrar);

    MethodBuilder::new(CREATOR, "create", ValueType::String, Multiplicity::Matrix)
        .parameter(&prefix())
        .parameter(&value())
        .parameter(&sparse())
        .register(registrar)?;

    MethodBuilder::new(CREATOR, "createSequence", ValueType::String, Multiplicity::Matrix)
        .parameter(&prefix())
        .parameter(&start_value())
        .parameter(&count())
        .parameter(&sparse())
        .infix_before("Sequence")
        .register(registrar)?;

    MethodBuilder::new(GTIN_CREATOR, "createGTIN14", ValueType::String, Multiplicity::Matrix)
        .parameter(&indicator_digit())
        .parameter(&gtin())
        .no_infix()
        .register(registrar)?;

    ClassBuilder::new(GTIN_CREATOR)
        .extends(CREATOR)
        .namespace(GS1)
        .method_infix("GTIN")
        .replace_parameter("value", &item_reference())
        .register(registrar)?;

    ClassBuilder::new("GLNCreatorProxy")
        .extends(CREATOR)
        .namespace(GS1)
        .method_infix("GLN")
        .replace_parameter("value", &location_reference())
        .register(registrar)
}

fn describe_gcp_length(registrar: &mut dyn Registrar) -> Result<()> {
    MethodBuilder::new(GCP_LENGTH, "gcpLength", ValueType::Number, Multiplicity::Matrix)
        .parameter(&prefix_matrix())
        .asynchronous()
        .requires_context()
        .register(registrar)?;

    // Cache timestamp of the prefix length data; internal only.
    MethodBuilder::new(GCP_LENGTH, "gcpLengthDateTime", ValueType::String, Multiplicity::Singleton)
        .asynchronous()
        .hidden()
        .register(registrar)?;

    ClassBuilder::new(GCP_LENGTH).namespace(GS1).register(registrar)
}

pub fn describe(registrar: &mut dyn Registrar) -> Result<()> {
    describe_validators(registrar)?;
    describe_creators(registrar)?;
    describe_gcp_length(registrar)
}
