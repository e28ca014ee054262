//! Built-in generators.

pub mod fabric;

use std::sync::Arc;

use crate::registry::Generator;

/// Generators installed by [`crate::registry::init`].
pub fn builtin_generators() -> Vec<Arc<dyn Generator>> {
    vec![Arc::new(fabric::FabricGenerator::new())]
}
