//! Microsoft Excel emitter.
//!
//! Produces a TypeScript source that binds every visible proxy function to
//! an error-wrapped implementation via `CustomFunctions.associate`, and the
//! JSON function metadata manifest Excel loads for the add-in.

use crate::descriptor::{ClassDescriptor, MethodDescriptor, Multiplicity, ValueType};
use crate::driver::{Generator, ProxyFunction};
use crate::error::Result;
use crate::i18n::LOCALIZATION_REQUIRED;
use crate::naming;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct MicrosoftGeneratorOptions {
    pub source_path: PathBuf,
    pub manifest_path: PathBuf,
    /// Locale whose localized names populate the manifest.
    pub default_locale: String,
    pub proxy_module: String,
    pub app_extension_class: String,
    pub app_extension_module: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionsManifest {
    pub functions: Vec<FunctionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionEntry {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "helpUrl", skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,
    pub parameters: Vec<ParameterEntry>,
    pub result: ResultEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<FunctionOptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub value_type: &'static str,
    pub dimensionality: &'static str,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEntry {
    #[serde(rename = "type")]
    pub value_type: &'static str,
    pub dimensionality: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionOptions {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub requires_address: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cancelable: bool,
}

impl FunctionOptions {
    fn for_method(method: &MethodDescriptor) -> Option<Self> {
        let options = Self {
            requires_address: method.requires_context,
            stream: method.is_stream,
            cancelable: method.is_stream,
        };
        (options != Self::default()).then_some(options)
    }
}

pub fn manifest_type(value_type: ValueType) -> &'static str {
    match value_type {
        ValueType::String => "string",
        ValueType::Number => "number",
        ValueType::Boolean => "boolean",
        ValueType::Any => "any",
    }
}

pub fn manifest_dimensionality(multiplicity: Multiplicity) -> &'static str {
    match multiplicity {
        Multiplicity::Singleton => "scalar",
        Multiplicity::Array | Multiplicity::Matrix => "matrix",
    }
}

fn typescript_type(value_type: ValueType, multiplicity: Multiplicity) -> String {
    let scalar = match value_type {
        ValueType::String => "string",
        ValueType::Number => "number",
        ValueType::Boolean => "boolean",
        ValueType::Any => "unknown",
    };
    match multiplicity {
        Multiplicity::Singleton => scalar.to_string(),
        Multiplicity::Array | Multiplicity::Matrix => format!("{}[][]", scalar),
    }
}

pub struct MicrosoftGenerator {
    options: MicrosoftGeneratorOptions,
    class_names: Vec<String>,
    objects: String,
    functions: String,
    manifest: FunctionsManifest,
    current_object: Option<String>,
}

impl MicrosoftGenerator {
    pub fn new(options: MicrosoftGeneratorOptions) -> Self {
        Self {
            options,
            class_names: Vec::new(),
            objects: String::new(),
            functions: String::new(),
            manifest: FunctionsManifest {
                functions: Vec::new(),
            },
            current_object: None,
        }
    }

    pub fn manifest(&self) -> &FunctionsManifest {
        &self.manifest
    }

    /// The TypeScript source accumulated so far.
    pub fn source(&self) -> String {
        let mut source = String::new();
        source.push_str("// Generated by proxy-generator. Do not edit.\n\n");
        let _ = writeln!(
            source,
            "import {{ {} }} from \"{}\";",
            self.options.app_extension_class, self.options.app_extension_module
        );
        if !self.class_names.is_empty() {
            let _ = writeln!(
                source,
                "import {{ {} }} from \"{}\";",
                self.class_names.join(", "),
                self.options.proxy_module
            );
        }
        let _ = writeln!(
            source,
            "\nconst appExtension = new {}();\n",
            self.options.app_extension_class
        );
        source.push_str(&self.objects);
        source.push_str(&self.functions);
        source
    }

    fn function_id(function: &ProxyFunction) -> String {
        function.qualified_name().to_uppercase()
    }

    fn manifest_entry(&self, method: &MethodDescriptor, function: &ProxyFunction) -> FunctionEntry {
        let localization = function.localization(&self.options.default_locale);
        if localization.is_none() && !function.localizations.is_empty() {
            warn!(
                "{} has no {} localization",
                function.qualified_name(),
                self.options.default_locale
            );
        }

        let parameters = method
            .parameter_descriptors
            .iter()
            .enumerate()
            .map(|(index, parameter)| {
                let effective = parameter.effective();
                let localized = localization.and_then(|l| l.parameters.get(index));
                ParameterEntry {
                    name: localized
                        .map(|l| l.name.as_str())
                        .filter(|name| *name != LOCALIZATION_REQUIRED)
                        .unwrap_or(effective.name.as_str())
                        .to_string(),
                    description: localized.map(|l| l.description.clone()),
                    value_type: manifest_type(effective.value_type),
                    dimensionality: manifest_dimensionality(effective.multiplicity),
                    optional: !effective.is_required,
                }
            })
            .collect();

        FunctionEntry {
            id: Self::function_id(function),
            name: localization
                .map(|l| l.name.as_str())
                .filter(|name| *name != LOCALIZATION_REQUIRED)
                .unwrap_or(function.name.as_str())
                .to_uppercase(),
            description: localization.map(|l| l.description.clone()),
            help_url: localization.and_then(|l| l.documentation_url.clone()),
            parameters,
            result: ResultEntry {
                value_type: manifest_type(method.value_type),
                dimensionality: manifest_dimensionality(method.multiplicity),
            },
            options: FunctionOptions::for_method(method),
        }
    }

    fn write_function(&mut self, object: &str, method: &MethodDescriptor, function: &ProxyFunction) {
        let identifier = match &function.namespace {
            Some(namespace) => format!("{}_{}", namespace.to_lowercase(), function.name),
            None => function.name.clone(),
        };
        let result_type = typescript_type(method.value_type, method.multiplicity);
        // A trailing invocation parameter rules out `?` on earlier parameters.
        let has_invocation = method.is_stream || method.requires_context;

        let mut parameters: Vec<String> = method
            .parameter_descriptors
            .iter()
            .map(|parameter| {
                let effective = parameter.effective();
                let value_type = typescript_type(effective.value_type, effective.multiplicity);
                match (effective.is_required, has_invocation) {
                    (true, _) => format!("{}: {}", effective.name, value_type),
                    (false, false) => format!("{}?: {}", effective.name, value_type),
                    (false, true) => format!("{}: {} | undefined", effective.name, value_type),
                }
            })
            .collect();
        let mut arguments: Vec<String> = method
            .parameter_descriptors
            .iter()
            .map(|parameter| parameter.name().to_string())
            .collect();

        let f = &mut self.functions;
        if method.is_stream {
            parameters.push(format!(
                "invocation: CustomFunctions.StreamingInvocation<{}>",
                result_type
            ));
            if method.requires_context {
                arguments.push("invocation".to_string());
            }
            let _ = writeln!(f, "function {}({}): void {{", identifier, parameters.join(", "));
            let _ = writeln!(
                f,
                "    appExtension.wrapStream(invocation, () => {}.{}({}));",
                object,
                method.name,
                arguments.join(", ")
            );
        } else {
            if method.requires_context {
                parameters.push("invocation: CustomFunctions.Invocation".to_string());
                arguments.push("invocation".to_string());
            }
            let (return_type, wrapper) = if method.is_async {
                (format!("Promise<{}>", result_type), "wrapAsync")
            } else {
                (result_type, "wrap")
            };
            let _ = writeln!(
                f,
                "function {}({}): {} {{",
                identifier,
                parameters.join(", "),
                return_type
            );
            let _ = writeln!(
                f,
                "    return appExtension.{}(() => {}.{}({}));",
                wrapper,
                object,
                method.name,
                arguments.join(", ")
            );
        }
        let _ = writeln!(f, "}}");
        let _ = writeln!(
            f,
            "CustomFunctions.associate(\"{}\", {});\n",
            Self::function_id(function),
            identifier
        );
    }

    fn write_outputs(&self) -> Result<()> {
        write_file(&self.options.source_path, &self.source())?;

        let manifest = format!("{}\n", serde_json::to_string_pretty(&self.manifest)?);
        write_file(&self.options.manifest_path, &manifest)?;

        info!(
            "Wrote {} and {} ({} functions)",
            self.options.source_path.display(),
            self.options.manifest_path.display(),
            self.manifest.functions.len()
        );
        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

impl Generator for MicrosoftGenerator {
    fn initialize(&mut self) -> Result<()> {
        self.class_names.clear();
        self.objects.clear();
        self.functions.clear();
        self.manifest.functions.clear();
        self.current_object = None;
        Ok(())
    }

    fn create_proxy_object(&mut self, class: &ClassDescriptor) -> Result<()> {
        let object = naming::object_name(&class.name)?;
        let _ = writeln!(
            self.objects,
            "const {} = new {}(appExtension);",
            object, class.name
        );
        self.class_names.push(class.name.clone());
        self.current_object = Some(object);
        Ok(())
    }

    fn create_proxy_function(
        &mut self,
        class: &ClassDescriptor,
        method: &MethodDescriptor,
        function: &ProxyFunction,
    ) -> Result<()> {
        if method.is_hidden {
            debug!("Skipping hidden function {}", function.qualified_name());
            return Ok(());
        }

        let object = match &self.current_object {
            Some(object) => object.clone(),
            None => naming::object_name(&class.name)?,
        };

        self.write_function(&object, method, function);
        let entry = self.manifest_entry(method, function);
        self.manifest.functions.push(entry);
        Ok(())
    }

    fn finalize(&mut self, success: bool) -> Result<()> {
        if !success {
            warn!("Generation failed; Excel outputs not written");
            return Ok(());
        }
        self.write_outputs()
    }
}
