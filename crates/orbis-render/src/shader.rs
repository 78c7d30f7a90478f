//! Shader module loading and caching.

use log::{debug, info};
use std::{collections::HashMap, sync::Arc};
use thiserror::Error;
use wgpu::naga::{
    self,
    valid::{Capabilities, ValidationFlags, Validator},
};
use wgpu::{ShaderModuleDescriptor, ShaderSource};

/// Error types for shader loading operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShaderError {
    #[error("shader '{name}' failed to parse:\n{message}")]
    Parse { name: String, message: String },

    #[error("shader '{name}' failed validation:\n{message}")]
    Invalid { name: String, message: String },

    #[error("shader '{name}' is missing entry point '{entry_point}'")]
    MissingEntryPoint { name: String, entry_point: String },

    #[error("shader '{name}' not found in library")]
    NotLoaded { name: String },
}

/// Vertex and fragment entry point names used by every scene shader.
pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Registry of compiled shader modules keyed by name.
///
/// Every program is parsed and validated with naga before it reaches the
/// device, so malformed WGSL fails with a diagnostic instead of a device
/// error.
#[derive(Default)]
pub struct ShaderLibrary {
    modules: HashMap<String, Arc<wgpu::ShaderModule>>,
}

impl ShaderLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a vertex+fragment program from WGSL source.
    pub fn load_program(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        source: &str,
    ) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        parse_program(name, source)?;
        debug!("Compiling shader '{}'", name);

        let module = device.create_shader_module(ShaderModuleDescriptor {
            label: Some(name),
            source: ShaderSource::Wgsl(source.into()),
        });

        let module = Arc::new(module);
        if self
            .modules
            .insert(name.to_string(), Arc::clone(&module))
            .is_some()
        {
            info!("Replaced shader '{}'", name);
        } else {
            info!("Loaded shader '{}'", name);
        }
        Ok(module)
    }

    /// Get a previously loaded shader by name.
    pub fn get(&self, name: &str) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        self.modules
            .get(name)
            .cloned()
            .ok_or_else(|| ShaderError::NotLoaded {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Parse and validate a vertex+fragment program without a device.
///
/// Returns the naga module so callers can inspect the IR.
pub fn parse_program(name: &str, source: &str) -> Result<naga::Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Parse {
        name: name.to_string(),
        message: e.emit_to_string(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::default())
        .validate(&module)
        .map_err(|e| ShaderError::Invalid {
            name: name.to_string(),
            message: e.emit_to_string(source),
        })?;

    check_entry_point(name, &module, VERTEX_ENTRY, naga::ShaderStage::Vertex)?;
    check_entry_point(name, &module, FRAGMENT_ENTRY, naga::ShaderStage::Fragment)?;
    Ok(module)
}

fn check_entry_point(
    name: &str,
    module: &naga::Module,
    entry_point: &str,
    stage: naga::ShaderStage,
) -> Result<(), ShaderError> {
    let declared = module
        .entry_points
        .iter()
        .any(|ep| ep.name == entry_point && ep.stage == stage);
    if declared {
        Ok(())
    } else {
        Err(ShaderError::MissingEntryPoint {
            name: name.to_string(),
            entry_point: entry_point.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::create_test_device_queue;

    const VALID_SHADER: &str = r#"
        @vertex
        fn vs_main(@builtin(vertex_index) idx: u32) -> @builtin(position) vec4<f32> {
            return vec4<f32>(0.0, 0.0, 0.0, 1.0);
        }

        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(1.0, 0.0, 0.0, 1.0);
        }
    "#;

    #[test]
    fn test_valid_program_parses() {
        let module = parse_program("ok", VALID_SHADER).unwrap();
        assert_eq!(module.entry_points.len(), 2);
    }

    #[test]
    fn test_missing_fragment_entry_point() {
        let source = r#"
            @vertex
            fn vs_main() -> @builtin(position) vec4<f32> {
                return vec4<f32>(0.0, 0.0, 0.0, 1.0);
            }
        "#;
        let err = parse_program("half", source).unwrap_err();
        assert_eq!(
            err,
            ShaderError::MissingEntryPoint {
                name: "half".to_string(),
                entry_point: "fs_main".to_string(),
            }
        );
    }

    #[test]
    fn test_entry_point_must_have_matching_stage() {
        let source = r#"
            @fragment
            fn vs_main() -> @location(0) vec4<f32> {
                return vec4<f32>(1.0);
            }

            @fragment
            fn fs_main() -> @location(0) vec4<f32> {
                return vec4<f32>(1.0);
            }
        "#;
        assert!(matches!(
            parse_program("swapped", source),
            Err(ShaderError::MissingEntryPoint { entry_point, .. }) if entry_point == "vs_main"
        ));
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let source = "@vertex fn vs_main( -> {";
        assert!(matches!(
            parse_program("broken", source),
            Err(ShaderError::Parse { name, .. }) if name == "broken"
        ));
    }

    #[test]
    fn test_type_error_is_reported() {
        let source = r#"
            @vertex
            fn vs_main() -> @builtin(position) vec4<f32> {
                return vec3<f32>(0.0);
            }

            @fragment
            fn fs_main() -> @location(0) vec4<f32> {
                return vec4<f32>(1.0);
            }
        "#;
        let err = parse_program("mismatch", source).unwrap_err();
        assert!(matches!(
            err,
            ShaderError::Parse { .. } | ShaderError::Invalid { .. }
        ));
    }

    #[test]
    fn test_get_nonexistent_shader_returns_error() {
        let library = ShaderLibrary::new();
        assert!(library.is_empty());
        assert!(matches!(
            library.get("nonexistent"),
            Err(ShaderError::NotLoaded { .. })
        ));
    }

    #[test]
    fn test_load_valid_program() {
        let Some((device, _queue)) = create_test_device_queue() else {
            return;
        };
        let mut library = ShaderLibrary::new();
        let module = library.load_program(&device, "test", VALID_SHADER).unwrap();
        let cached = library.get("test").unwrap();
        assert!(Arc::ptr_eq(&module, &cached));
        assert_eq!(library.len(), 1);
    }
}
