//! Proxy definitions elaborated by the generator.
//!
//! Each submodule describes one group of proxy classes. The list returned
//! by [`modules`] is the elaboration order; shared abstract bases are
//! declared by every module that extends them.

mod character_set;
mod check;
mod identifier;
mod parameters;
mod utility;

use crate::driver::ProxyModule;
use crate::error::Result;
use crate::registration::{ClassBuilder, Registrar};

/// Abstract base of every string-oriented proxy.
pub(crate) const STRING_PROXY: &str = "StringProxy";

fn describe_utility(registrar: &mut dyn Registrar) -> Result<()> {
    utility::describe(registrar)
}

fn describe_character_set(registrar: &mut dyn Registrar) -> Result<()> {
    ClassBuilder::new(STRING_PROXY).declare(registrar);
    character_set::describe(registrar)
}

fn describe_check(registrar: &mut dyn Registrar) -> Result<()> {
    ClassBuilder::new(STRING_PROXY).declare(registrar);
    check::describe(registrar)
}

fn describe_identifier(registrar: &mut dyn Registrar) -> Result<()> {
    identifier::describe(registrar)
}

pub fn modules() -> Vec<ProxyModule> {
    vec![
        ProxyModule {
            name: "utility",
            describe: describe_utility,
        },
        ProxyModule {
            name: "character-set",
            describe: describe_character_set,
        },
        ProxyModule {
            name: "check",
            describe: describe_check,
        },
        ProxyModule {
            name: "identifier",
            describe: describe_identifier,
        },
    ]
}
