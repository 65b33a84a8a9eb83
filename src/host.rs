//! Hook surfaces of the host pipelines the plugin plugs into.
//!
//! The hosts own module graphs, resolution and caching; these types only
//! describe the callbacks they invoke.

/// Incremental, on-demand compiler (`setup` / `onLoad`)
mod esbuild;
/// Single-pass bundler (`load` / `transform`)
mod rollup;

pub use esbuild::{
    EsbuildPlugin,
    Loader,
    OnLoadArgs,
    OnLoadCallback,
    OnLoadOptions,
    OnLoadResult,
    PluginBuild,
};
pub use rollup::{
    BundlerPlugin,
    Enforce,
    TransformResult,
};
