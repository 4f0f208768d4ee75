use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::carray::Element;
use crate::{FfiMathError, Result};

/// Array wrapper kinds that can be emitted into the bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayType {
    Double,
    Float,
    Int,
    Unsigned,
}

impl ArrayType {
    pub const ALL: [ArrayType; 4] = [
        ArrayType::Double,
        ArrayType::Float,
        ArrayType::Int,
        ArrayType::Unsigned,
    ];

    pub fn c_type(self) -> &'static str {
        match self {
            ArrayType::Double => <f64 as Element>::C_TYPE,
            ArrayType::Float => <f32 as Element>::C_TYPE,
            ArrayType::Int => <i32 as Element>::C_TYPE,
            ArrayType::Unsigned => <u32 as Element>::C_TYPE,
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            ArrayType::Double => <f64 as Element>::CLASS_NAME,
            ArrayType::Float => <f32 as Element>::CLASS_NAME,
            ArrayType::Int => <i32 as Element>::CLASS_NAME,
            ArrayType::Unsigned => <u32 as Element>::CLASS_NAME,
        }
    }

    /// Prefix of the C ABI handle functions, e.g. `double_array`.
    pub fn symbol_prefix(self) -> &'static str {
        match self {
            ArrayType::Double => "double_array",
            ArrayType::Float => "float_array",
            ArrayType::Int => "int_array",
            ArrayType::Unsigned => "unsigned_array",
        }
    }
}

/// Settings for the generated header and SWIG interface file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    pub module_name: String,
    pub header_name: String,
    pub output_dir: PathBuf,
    pub include_arrays: bool,
    pub array_types: Vec<ArrayType>,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            module_name: "example".to_string(),
            header_name: "example.h".to_string(),
            output_dir: PathBuf::from("."),
            include_arrays: true,
            array_types: ArrayType::ALL.to_vec(),
        }
    }
}

impl BindingConfig {
    /// Parses a standalone TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BindingConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading binding config");
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reads `[package.metadata.ffimath]` from a Cargo manifest, falling back
    /// to defaults when the table is absent.
    pub fn from_cargo_manifest(manifest_path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(manifest_path.as_ref())?;

        #[derive(Deserialize)]
        struct CargoToml {
            package: Package,
        }

        #[derive(Deserialize)]
        struct Package {
            #[serde(default)]
            metadata: Metadata,
        }

        #[derive(Deserialize, Default)]
        struct Metadata {
            ffimath: Option<BindingConfig>,
        }

        let cargo_toml: CargoToml = toml::from_str(&content)?;
        let config = cargo_toml.package.metadata.ffimath.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Resolves the config for a run: an explicit path wins (a `Cargo.toml`
    /// is read through its metadata table), then `dir/Cargo.toml`, then
    /// defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return if path.file_name().is_some_and(|name| name == "Cargo.toml") {
                Self::from_cargo_manifest(path)
            } else {
                Self::from_file(path)
            };
        }

        let manifest = dir.join("Cargo.toml");
        if manifest.exists() {
            Self::from_cargo_manifest(manifest)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        let valid_identifier = !self.module_name.is_empty()
            && !self.module_name.starts_with(|c: char| c.is_ascii_digit())
            && self
                .module_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_identifier {
            return Err(FfiMathError::InvalidConfig(format!(
                "module_name '{}' is not a valid C identifier",
                self.module_name
            )));
        }

        if !self.header_name.ends_with(".h") {
            return Err(FfiMathError::InvalidConfig(format!(
                "header_name '{}' must end in .h",
                self.header_name
            )));
        }

        Ok(())
    }

    /// Include guard derived from the module name, e.g. `EXAMPLE_H`.
    pub fn include_guard(&self) -> String {
        format!("{}_H", self.module_name.to_ascii_uppercase())
    }

    pub fn interface_name(&self) -> String {
        format!("{}.i", self.module_name)
    }

    /// Array types to emit, empty when arrays are disabled.
    pub fn enabled_array_types(&self) -> &[ArrayType] {
        if self.include_arrays {
            &self.array_types
        } else {
            &[]
        }
    }
}
