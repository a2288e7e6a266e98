//! # Validation Configuration Module
//!
//! Tunables for the traversal engine and the options bundle passed to every
//! validation call.

use crate::registry::{EmptyResolver, Resolver};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::sync::Arc;

/// Engine tunables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Frames reserved up front; deeper nesting grows the stack on the heap
    pub initial_frame_capacity: usize,

    /// Emit a debug event explaining every `Invalid`/`Unknown` result
    pub trace_rejections: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            initial_frame_capacity: 16, // Covers typical shallow nesting
            trace_rejections: true,
        }
    }
}

impl ValidationConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            initial_frame_capacity: env::var("PBCHECK_INITIAL_FRAME_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.initial_frame_capacity),
            trace_rejections: env::var("PBCHECK_TRACE_REJECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.trace_rejections),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_frame_capacity == 0 {
            return Err("initial_frame_capacity must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Per-call options: the injected resolver plus engine tunables
#[derive(Clone)]
pub struct UnmarshalOptions {
    pub resolver: Arc<dyn Resolver>,
    pub config: ValidationConfig,
}

impl UnmarshalOptions {
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self {
            resolver,
            config: ValidationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for UnmarshalOptions {
    fn default() -> Self {
        Self::new(Arc::new(EmptyResolver))
    }
}

impl fmt::Debug for UnmarshalOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnmarshalOptions")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
