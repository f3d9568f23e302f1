//! Shader module loading and caching.

use log::{debug, info};
use std::{collections::HashMap, path::Path, path::PathBuf, sync::Arc};
use thiserror::Error;
use wgpu::{ShaderModuleDescriptor, ShaderSource};

/// Built-in WGSL for the body pipeline.
pub const PLANET_SHADER_SOURCE: &str = include_str!("planet.wgsl");

/// Name the body pipeline's shader is registered under.
pub const PLANET_SHADER_NAME: &str = "planet";

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read shader file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Registry of compiled shader modules keyed by name.
#[derive(Default)]
pub struct ShaderLibrary {
    modules: HashMap<String, Arc<wgpu::ShaderModule>>,
}

impl ShaderLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile WGSL source and register it under `name`, replacing any previous module.
    pub fn load_from_source(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        source: &str,
    ) -> Arc<wgpu::ShaderModule> {
        debug!("Loading shader '{}' from source", name);

        let module = Arc::new(device.create_shader_module(ShaderModuleDescriptor {
            label: Some(name),
            source: ShaderSource::Wgsl(source.into()),
        }));
        let replaced = self
            .modules
            .insert(name.to_string(), Arc::clone(&module))
            .is_some();

        if replaced {
            info!("Replaced shader '{}'", name);
        } else {
            info!("Loaded shader '{}'", name);
        }
        module
    }

    /// Read a `.wgsl` file and register it under `name`.
    pub fn load_from_file(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        path: &Path,
    ) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        if !path.exists() {
            return Err(ShaderError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let source = std::fs::read_to_string(path)?;
        debug!("Read shader '{}' from {}", name, path.display());
        Ok(self.load_from_source(device, name, &source))
    }

    /// Load the body shader, from `override_path` when given, else the built-in source.
    pub fn load_planet_shader(
        &mut self,
        device: &wgpu::Device,
        override_path: Option<&Path>,
    ) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        match override_path {
            Some(path) => self.load_from_file(device, PLANET_SHADER_NAME, path),
            None => Ok(self.load_from_source(device, PLANET_SHADER_NAME, PLANET_SHADER_SOURCE)),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<wgpu::ShaderModule>> {
        self.modules.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
