use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use futures::StreamExt;
use ignore::WalkBuilder;

use super::{
    CliError,
    Pipeline,
    RewriteArgs,
};
use crate::config::{
    FileMatcher,
    NlsOptions,
};
use crate::error::NlsError;
use crate::host::{
    BundlerPlugin,
    PluginBuild,
};
use crate::mapping::LocaleMapping;
use crate::plugin::{
    self,
    EsbuildNlsPlugin,
    RollupNlsPlugin,
};

/// Counts of files written by [`rewrite_package`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Files served or rewritten by the plugin
    pub localized: usize,
    /// Files copied unchanged
    pub copied: usize,
}

/// 1ファイルの処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// プラグインが内容を返した
    Localized,
    /// そのままコピーした
    Copied,
}

/// Drives one of the adapters the way its host would.
enum PackageLoader {
    /// `onLoad` interception only
    Incremental(PluginBuild),
    /// `load` then `transform`
    SinglePass(RollupNlsPlugin),
}

impl PackageLoader {
    /// Sets up the adapter selected by `pipeline`.
    fn new(pipeline: Pipeline, mapping: Arc<LocaleMapping>) -> Self {
        match pipeline {
            Pipeline::Incremental => {
                Self::Incremental(PluginBuild::with_plugin(&EsbuildNlsPlugin::from_mapping(mapping)))
            }
            Pipeline::SinglePass => Self::SinglePass(RollupNlsPlugin::from_mapping(mapping)),
        }
    }

    /// Writes the localized (or untouched) `source` to `target`.
    fn process(&self, source: &Path, target: &Path) -> Result<Outcome, NlsError> {
        let id = source.to_string_lossy();
        match self {
            Self::Incremental(build) => match build.load(&id)? {
                Some(result) => {
                    write_output(target, &result.contents)?;
                    Ok(Outcome::Localized)
                }
                None => copy_output(source, target),
            },
            Self::SinglePass(plugin) => {
                if let Some(code) = plugin.load(&id)? {
                    write_output(target, &code)?;
                    return Ok(Outcome::Localized);
                }
                if source.extension().is_none_or(|ext| ext != "js") {
                    return copy_output(source, target);
                }

                let code = plugin::read_module(source)?;
                let Some(result) = plugin.transform(&code, &id)? else {
                    return copy_output(source, target);
                };

                let file_name = target
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let map_name = format!("{file_name}.map");
                let mut code = result.code;
                if let Some(mut map) = result.map {
                    map.file = Some(file_name);
                    write_output(&target.with_file_name(&map_name), &map.to_json()?)?;
                    code.push_str(&format!("\n//# sourceMappingURL={map_name}\n"));
                }
                write_output(target, &code)?;
                Ok(Outcome::Localized)
            }
        }
    }
}

/// Reads `args`, resolves options and rewrites the package.
pub async fn run(args: &RewriteArgs) -> Result<RewriteSummary, CliError> {
    let options = super::resolve_options(&args.shared)?;
    let jobs = args.jobs.unwrap_or_else(super::default_jobs).max(1);
    rewrite_package(&options, &args.package_dir, &args.out_dir, args.pipeline, jobs).await
}

/// Localizes every matched file under `package_dir` into `out_dir`, keeping
/// relative paths.
///
/// Files are processed `jobs` at a time on the blocking pool. Files outside
/// the include/exclude patterns are not written.
pub async fn rewrite_package(
    options: &NlsOptions,
    package_dir: &Path,
    out_dir: &Path,
    pipeline: Pipeline,
    jobs: usize,
) -> Result<RewriteSummary, CliError> {
    let package_dir = std::fs::canonicalize(package_dir)
        .map_err(|source| NlsError::ModuleRead { path: package_dir.to_path_buf(), source })?;
    let matcher = FileMatcher::new(package_dir.clone(), options).map_err(NlsError::from)?;
    let mapping = plugin::load_mapping(options)?;
    let loader = Arc::new(PackageLoader::new(pipeline, mapping));

    let files = find_package_files(&matcher);
    tracing::info!(
        package_dir = %package_dir.display(),
        files = files.len(),
        %pipeline,
        jobs,
        "Rewriting package"
    );

    let tasks = files.into_iter().filter_map(|file| {
        let relative = file.strip_prefix(&package_dir).ok()?.to_path_buf();
        let target = out_dir.join(relative);
        let loader = Arc::clone(&loader);
        Some(async move {
            let outcome =
                tokio::task::spawn_blocking(move || loader.process(&file, &target)).await??;
            Ok::<_, CliError>(outcome)
        })
    });
    let outcomes: Vec<_> =
        futures::stream::iter(tasks).buffer_unordered(jobs.max(1)).collect().await;

    let mut summary = RewriteSummary::default();
    for outcome in outcomes {
        match outcome? {
            Outcome::Localized => summary.localized += 1,
            Outcome::Copied => summary.copied += 1,
        }
    }

    tracing::info!(localized = summary.localized, copied = summary.copied, "Package rewritten");
    Ok(summary)
}

/// パッケージ内の対象ファイルを検索
fn find_package_files(matcher: &FileMatcher) -> Vec<PathBuf> {
    let mut found_files = Vec::new();

    // node_modules 配下なので .gitignore は見ない
    for result in WalkBuilder::new(matcher.root())
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if matcher.is_match(entry.path()) {
            found_files.push(entry.path().to_path_buf());
        }
    }

    found_files.sort();
    found_files
}

/// Writes `contents`, creating parent directories.
fn write_output(target: &Path, contents: &str) -> Result<(), NlsError> {
    let write = || {
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(target, contents)
    };
    write().map_err(|source| NlsError::OutputWrite { path: target.to_path_buf(), source })
}

/// Copies `source` verbatim.
fn copy_output(source: &Path, target: &Path) -> Result<Outcome, NlsError> {
    let copy = || {
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(source, target)
    };
    copy().map_err(|err| NlsError::OutputWrite { path: target.to_path_buf(), source: err })?;
    Ok(Outcome::Copied)
}
