//! Naming and disambiguation of emitted identifiers.

use crate::descriptor::MethodDescriptor;
use crate::error::{GeneratorError, Result};
use regex::Regex;
use std::sync::OnceLock;

// Head is an acronym with optional digits ("GTIN13") or a capitalized word
// ("Check"); the tail, if any, starts with an uppercase letter.
static CLASS_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn class_name_regex() -> &'static Regex {
    CLASS_NAME_REGEX
        .get_or_init(|| Regex::new(r"^([A-Z]+[0-9]*|[A-Z][^A-Z]*)([A-Z].*)?$").unwrap())
}

/// Derive the variable name of a proxy object from its PascalCase class name.
///
/// `GTIN13ValidatorProxy` becomes `gtin13ValidatorProxy` and
/// `CheckProxy` becomes `checkProxy`.
pub fn object_name(class_name: &str) -> Result<String> {
    let captures = class_name_regex()
        .captures(class_name)
        .ok_or_else(|| GeneratorError::InvalidClassName(class_name.to_string()))?;

    let head = captures.get(1).map_or("", |m| m.as_str());
    let tail = captures.get(2).map_or("", |m| m.as_str());

    Ok(format!("{}{}", head.to_lowercase(), tail))
}

/// Compute the emitted function name of a method, splicing in the class
/// infix when one applies.
pub fn function_name(method_infix: Option<&str>, method: &MethodDescriptor) -> Result<String> {
    let infix = match method_infix {
        Some(infix) if !method.no_infix => infix,
        _ => return Ok(method.name.clone()),
    };

    match &method.infix_before {
        None => Ok(format!("{}{}", method.name, infix)),
        Some(anchor) => {
            let position =
                method
                    .name
                    .find(anchor.as_str())
                    .ok_or_else(|| GeneratorError::InfixAnchorNotFound {
                        method_name: method.name.clone(),
                        anchor: anchor.clone(),
                    })?;

            let (before, after) = method.name.split_at(position);
            Ok(format!("{}{}{}", before, infix, after))
        }
    }
}

/// Namespace-qualified function name, used to detect collisions.
pub fn qualified_name(namespace: Option<&str>, function_name: &str) -> String {
    match namespace {
        Some(namespace) => format!("{}.{}", namespace, function_name),
        None => function_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{MethodOptions, Multiplicity, ValueType};
    use proptest::prelude::*;

    fn method(name: &str) -> MethodDescriptor {
        MethodDescriptor::new(
            name,
            MethodOptions::returns(ValueType::String, Multiplicity::Matrix),
            Vec::new(),
        )
    }

    // ==================== Object Name Tests ====================

    #[test]
    fn test_object_name_capitalized_word() {
        assert_eq!(object_name("CheckProxy").unwrap(), "checkProxy");
    }

    #[test]
    fn test_object_name_acronym_with_digits() {
        assert_eq!(
            object_name("GTIN13ValidatorProxy").unwrap(),
            "gtin13ValidatorProxy"
        );
        assert_eq!(object_name("AI82Proxy").unwrap(), "ai82Proxy");
    }

    #[test]
    fn test_object_name_acronym_followed_by_word() {
        assert_eq!(object_name("GCPLengthProxy").unwrap(), "gcpLengthProxy");
    }

    #[test]
    fn test_object_name_single_word() {
        assert_eq!(object_name("Proxy").unwrap(), "proxy");
        assert_eq!(object_name("GTIN").unwrap(), "gtin");
    }

    #[test]
    fn test_object_name_invalid() {
        assert!(matches!(
            object_name(""),
            Err(GeneratorError::InvalidClassName(_))
        ));
        assert!(matches!(
            object_name("checkProxy"),
            Err(GeneratorError::InvalidClassName(_))
        ));
        assert!(matches!(
            object_name("9Proxy"),
            Err(GeneratorError::InvalidClassName(_))
        ));
    }

    // ==================== Function Name Tests ====================

    #[test]
    fn test_function_name_without_class_infix() {
        assert_eq!(
            function_name(None, &method("checkDigit")).unwrap(),
            "checkDigit"
        );
    }

    #[test]
    fn test_function_name_appends_infix() {
        assert_eq!(function_name(Some("GLN"), &method("create")).unwrap(), "createGLN");
    }

    #[test]
    fn test_function_name_splices_before_anchor() {
        let mut create_sequence = method("createSequence");
        create_sequence.infix_before = Some("Sequence".to_string());

        assert_eq!(
            function_name(Some("GTIN"), &create_sequence).unwrap(),
            "createGTINSequence"
        );
    }

    #[test]
    fn test_function_name_uses_first_anchor_occurrence() {
        let mut method = method("isValidValid");
        method.infix_before = Some("Valid".to_string());

        assert_eq!(
            function_name(Some("GTIN"), &method).unwrap(),
            "isGTINValidValid"
        );
    }

    #[test]
    fn test_function_name_no_infix_flag() {
        let mut create_sequence = method("createSequence");
        create_sequence.infix_before = Some("Sequence".to_string());
        create_sequence.no_infix = true;

        assert_eq!(
            function_name(Some("GTIN"), &create_sequence).unwrap(),
            "createSequence"
        );
    }

    #[test]
    fn test_function_name_missing_anchor() {
        let mut create = method("create");
        create.infix_before = Some("Sequence".to_string());

        match function_name(Some("GTIN"), &create) {
            Err(GeneratorError::InfixAnchorNotFound {
                method_name,
                anchor,
            }) => {
                assert_eq!(method_name, "create");
                assert_eq!(anchor, "Sequence");
            }
            other => panic!("Expected InfixAnchorNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_function_name_anchor_ignored_without_infix() {
        let mut create = method("create");
        create.infix_before = Some("Sequence".to_string());

        assert_eq!(function_name(None, &create).unwrap(), "create");
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(qualified_name(Some("GS1"), "checkDigit"), "GS1.checkDigit");
        assert_eq!(qualified_name(None, "checkDigit"), "checkDigit");
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_object_name_keeps_tail(head in "[A-Z][a-z]{0,6}", tail in "[A-Z][a-zA-Z0-9]{0,10}") {
            let class_name = format!("{}{}", head, tail);
            let derived = object_name(&class_name).unwrap();
            prop_assert!(derived.starts_with(|c: char| c.is_ascii_lowercase()));
            prop_assert_eq!(derived.len(), class_name.len());
            prop_assert_eq!(derived.to_lowercase(), class_name.to_lowercase());
        }
    }
}
