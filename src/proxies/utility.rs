//! Application-level utility functions.

use super::parameters::{interval, matrix};
use crate::descriptor::{Multiplicity, ValueType};
use crate::error::Result;
use crate::registration::{ClassBuilder, MethodBuilder, Registrar};

const APP_UTILITY: &str = "AppUtilityProxy";

pub fn describe(registrar: &mut dyn Registrar) -> Result<()> {
    MethodBuilder::new(APP_UTILITY, "version", ValueType::String, Multiplicity::Singleton)
        .register(registrar)?;

    MethodBuilder::new(APP_UTILITY, "watchVersion", ValueType::String, Multiplicity::Singleton)
        .parameter(&interval())
        .stream()
        .register(registrar)?;

    MethodBuilder::new(APP_UTILITY, "vSpill", ValueType::Any, Multiplicity::Matrix)
        .parameter(&matrix())
        .asynchronous()
        .requires_context()
        .register(registrar)?;

    MethodBuilder::new(APP_UTILITY, "hSpill", ValueType::Any, Multiplicity::Matrix)
        .parameter(&matrix())
        .asynchronous()
        .requires_context()
        .register(registrar)?;

    // Used by the add-in's own diagnostics pane, never listed to users.
    MethodBuilder::new(APP_UTILITY, "diagnostics", ValueType::String, Multiplicity::Matrix)
        .hidden()
        .register(registrar)?;

    ClassBuilder::new(APP_UTILITY).register(registrar)
}
