//! Directory-wide extraction
//!
//! Walks every loot table and recipe file of one game version, turning each
//! into a [`ResourceSource`]. Files are parsed on tokio's blocking pool, since
//! cross-file references read from disk mid-parse.
//!
//! Layout on disk:
//! ```text
//! <base>/<version>/
//!   assets/minecraft/lang/en_us.json
//!   data/minecraft/loot_table/...   (loot_tables before 1.21)
//!   data/minecraft/recipe/...       (recipes before 1.21)
//! ```

use crate::content::{ContentProvider, DirectoryProvider};
use crate::error::{Cause, FileError, ManifestError, Result};
use crate::graph::ItemSourceGraph;
use crate::loot::LootTableParser;
use crate::names::NameCache;
use crate::recipe::parse_recipe;
use crate::resource::ResourceSource;
use crate::version::GameVersion;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::{JoinError, JoinSet};

/// Default number of files parsed at once
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Where one version's data lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    base: PathBuf,
    version: GameVersion,
}

impl DataLayout {
    pub fn new<P: AsRef<Path>>(base: P, version: GameVersion) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
            version,
        }
    }

    pub fn version(&self) -> GameVersion {
        self.version
    }

    /// `<base>/<version>`
    pub fn version_dir(&self) -> PathBuf {
        self.base.join(self.version.to_string())
    }

    fn data_dir(&self) -> PathBuf {
        self.version_dir().join("data").join("minecraft")
    }

    /// Root of the loot table tree
    pub fn loot_table_root(&self) -> PathBuf {
        self.pick_dir("loot_table", "loot_tables")
    }

    /// Root of the recipe tree
    pub fn recipe_root(&self) -> PathBuf {
        self.pick_dir("recipe", "recipes")
    }

    /// English language file
    pub fn lang_file(&self) -> PathBuf {
        self.version_dir()
            .join("assets")
            .join("minecraft")
            .join("lang")
            .join("en_us.json")
    }

    /// Directory name the version should use, or the other spelling if only
    /// that one exists
    fn pick_dir(&self, singular: &str, plural: &str) -> PathBuf {
        let data = self.data_dir();
        let (preferred, other) = if self.version.uses_singular_dirs() {
            (data.join(singular), data.join(plural))
        } else {
            (data.join(plural), data.join(singular))
        };
        if !preferred.is_dir() && other.is_dir() {
            return other;
        }
        preferred
    }
}

/// Which parser a file goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileKind {
    LootTable,
    Recipe,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::LootTable => write!(f, "loot table"),
            FileKind::Recipe => write!(f, "recipe"),
        }
    }
}

/// What to do when a file fails to extract
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the failure and keep going
    #[default]
    Skip,
    /// Stop at the first failure
    Abort,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(FailurePolicy::Skip),
            "abort" => Ok(FailurePolicy::Abort),
            other => Err(format!("unknown failure policy '{}' (expected skip or abort)", other)),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Skip => write!(f, "skip"),
            FailurePolicy::Abort => write!(f, "abort"),
        }
    }
}

/// Knobs for [`Extractor::extract_all`]
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    pub concurrency: usize,
    pub policy: FailurePolicy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            policy: FailurePolicy::default(),
        }
    }
}

/// Outcome of a full extraction pass
#[derive(Debug, Default)]
pub struct Extraction {
    /// Sorted by node key
    pub sources: Vec<ResourceSource>,
    /// Display name of every item the sources mention
    pub names: BTreeMap<String, String>,
    /// Files skipped under [`FailurePolicy::Skip`], sorted by filename
    pub failures: Vec<FileError>,
    /// Files deliberately excluded (special recipes)
    pub ignored: usize,
}

impl Extraction {
    /// Freeze the sources into a graph
    pub fn graph(&self) -> ItemSourceGraph {
        ItemSourceGraph::from_sources(&self.sources)
    }

    /// Serializable form, without the failures
    pub fn into_manifest(self, version: GameVersion) -> SourcesManifest {
        SourcesManifest {
            version,
            sources: self.sources,
            names: self.names,
        }
    }
}

/// Extracts one version's data directory
///
/// Cheap to clone; every clone shares the same providers and name cache.
#[derive(Clone)]
pub struct Extractor {
    version: GameVersion,
    loot: LootTableParser,
    recipes: Arc<dyn ContentProvider>,
    files: Arc<[(FileKind, String)]>,
    names: Arc<NameCache>,
}

/// What one extraction task hands back; the permit is released once the
/// result has been recorded
type TaskOutput = (String, Result<Option<ResourceSource>>, OwnedSemaphorePermit);

impl Extractor {
    /// Index the version's files and load its names
    ///
    /// Everything shared between extraction tasks is filled in here, before
    /// any task runs.
    pub fn open(layout: DataLayout) -> Self {
        let loot_tables = Arc::new(DirectoryProvider::open(layout.loot_table_root()));
        let recipes = Arc::new(DirectoryProvider::open(layout.recipe_root()));

        let names = NameCache::load(layout.lang_file()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not load language file, using fallback names");
            NameCache::new()
        });

        tracing::debug!(
            version = %layout.version(),
            loot_tables = loot_tables.list_files().len(),
            recipes = recipes.list_files().len(),
            "Indexed data files"
        );

        let files = loot_tables
            .list_files()
            .iter()
            .map(|f| (FileKind::LootTable, f.clone()))
            .chain(recipes.list_files().iter().map(|f| (FileKind::Recipe, f.clone())))
            .collect();

        Self::with_providers(layout.version(), loot_tables, recipes, files, names)
    }

    /// Extractor over arbitrary providers
    ///
    /// `files` is extracted in the order given.
    pub fn with_providers(
        version: GameVersion,
        loot_tables: Arc<dyn ContentProvider>,
        recipes: Arc<dyn ContentProvider>,
        files: Vec<(FileKind, String)>,
        names: NameCache,
    ) -> Self {
        Self {
            version,
            loot: LootTableParser::new(loot_tables, version),
            recipes,
            files: files.into(),
            names: Arc::new(names),
        }
    }

    pub fn version(&self) -> GameVersion {
        self.version
    }

    pub fn names(&self) -> &NameCache {
        &self.names
    }

    /// Every file to extract, loot tables first
    pub fn files(&self) -> &[(FileKind, String)] {
        &self.files
    }

    /// Extract one file; `None` for deliberately ignored files
    pub fn extract_file(&self, kind: FileKind, filename: &str) -> Result<Option<ResourceSource>> {
        tracing::debug!(filename, %kind, "Extracting");
        match kind {
            FileKind::LootTable => self.loot.parse_file(filename).map(Some),
            FileKind::Recipe => {
                let content = self
                    .recipes
                    .read(filename)
                    .map_err(|e| FileError::new(filename, Cause::Read(e)))?;
                parse_recipe(&content, filename)
            }
        }
    }

    /// Extract every file, at most `options.concurrency` at a time
    ///
    /// Under [`FailurePolicy::Abort`] no new file is started once a failure
    /// has been seen.
    pub async fn extract_all(&self, options: ExtractOptions) -> Result<Extraction> {
        let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));
        let mut tasks: JoinSet<TaskOutput> = JoinSet::new();
        let mut extraction = Extraction::default();

        for (kind, filename) in self.files.iter().cloned() {
            // Permits come back only as results are recorded, so a failure
            // is always seen before the next file starts
            let permit = loop {
                tokio::select! {
                    acquired = semaphore.clone().acquire_owned() => {
                        break acquired.map_err(|e| {
                            FileError::new(filename.as_str(), Cause::Task(e.to_string()))
                        })?;
                    }
                    Some(joined) = tasks.join_next() => {
                        if let Err(e) = record(&mut extraction, joined, options.policy) {
                            tasks.abort_all();
                            return Err(e);
                        }
                    }
                }
            };

            let extractor = self.clone();
            tasks.spawn_blocking(move || {
                let result = extractor.extract_file(kind, &filename);
                (filename, result, permit)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = record(&mut extraction, joined, options.policy) {
                tasks.abort_all();
                return Err(e);
            }
        }

        extraction.sources.sort_by_key(|s| s.key());
        extraction.failures.sort_by(|a, b| a.filename.cmp(&b.filename));
        extraction.names = self
            .names
            .names_for(extraction.sources.iter().flat_map(|s| s.required.iter().chain(&s.produced)));

        tracing::info!(
            version = %self.version,
            sources = extraction.sources.len(),
            ignored = extraction.ignored,
            failures = extraction.failures.len(),
            "Extraction finished"
        );

        Ok(extraction)
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("version", &self.version)
            .field("files", &self.files.len())
            .finish_non_exhaustive()
    }
}

/// Fold one finished task into the extraction; `Err` means stop
fn record(
    extraction: &mut Extraction,
    joined: std::result::Result<TaskOutput, JoinError>,
    policy: FailurePolicy,
) -> Result<()> {
    let (filename, result, _permit) =
        joined.map_err(|e| FileError::new("<task>", Cause::Task(e.to_string())))?;
    match result {
        Ok(Some(source)) => extraction.sources.push(source),
        Ok(None) => extraction.ignored += 1,
        Err(e) => match policy {
            FailurePolicy::Abort => return Err(e),
            FailurePolicy::Skip => {
                tracing::warn!(filename = %filename, error = %e.cause, "Skipping file");
                extraction.failures.push(e);
            }
        },
    }
    Ok(())
}

/// Extraction results persisted as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesManifest {
    pub version: GameVersion,
    pub sources: Vec<ResourceSource>,
    #[serde(default)]
    pub names: BTreeMap<String, String>,
}

impl SourcesManifest {
    pub fn load<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), ManifestError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn graph(&self) -> ItemSourceGraph {
        ItemSourceGraph::from_sources(&self.sources)
    }

    /// Display name for an id, falling back to one derived from the id
    pub fn name(&self, id: &str) -> String {
        self.names
            .get(id)
            .cloned()
            .unwrap_or_else(|| crate::item::humanize(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemoryProvider;
    use crate::error::ContentError;
    use crate::source_type::SourceType;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const V1_21: GameVersion = GameVersion::new(1, 21, 4);

    fn write(root: &Path, relative: &str, value: serde_json::Value) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, value.to_string()).unwrap();
    }

    /// A small 1.21.4 tree: one block table, one chest that pulls in
    /// another table, two recipes and one special recipe
    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let version = dir.path().join("1.21.4");
        let data = version.join("data/minecraft");

        write(
            &data,
            "loot_table/blocks/oak_log.json",
            json!({"type": "minecraft:block", "pools": [{"entries": [
                {"type": "minecraft:item", "name": "minecraft:oak_log"}
            ]}]}),
        );
        write(
            &data,
            "loot_table/chests/village/shared.json",
            json!({"type": "minecraft:chest", "pools": [{"entries": [
                {"type": "minecraft:item", "name": "minecraft:bread"}
            ]}]}),
        );
        write(
            &data,
            "loot_table/chests/village/village_plains_house.json",
            json!({"type": "minecraft:chest", "pools": [{"entries": [
                {"type": "minecraft:item", "name": "minecraft:wheat"},
                {"type": "minecraft:loot_table", "value": "minecraft:chests/village/shared"}
            ]}]}),
        );
        write(
            &data,
            "recipe/oak_planks.json",
            json!({
                "type": "minecraft:crafting_shapeless",
                "ingredients": ["#minecraft:oak_logs"],
                "result": {"id": "minecraft:oak_planks", "count": 4}
            }),
        );
        write(
            &data,
            "recipe/stick.json",
            json!({
                "type": "minecraft:crafting_shaped",
                "pattern": ["#", "#"],
                "key": {"#": "#minecraft:planks"},
                "result": {"id": "minecraft:stick", "count": 4}
            }),
        );
        write(
            &data,
            "recipe/armor_dye.json",
            json!({"type": "minecraft:crafting_special_armordye"}),
        );
        write(
            &version,
            "assets/minecraft/lang/en_us.json",
            json!({"item.minecraft.stick": "Stick", "block.minecraft.oak_log": "Oak Log"}),
        );
        dir
    }

    #[test]
    fn test_layout_picks_directory_names() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let modern = DataLayout::new(dir.path(), V1_21);
        assert!(modern.loot_table_root().ends_with("data/minecraft/loot_table"));

        let legacy = DataLayout::new(dir.path(), GameVersion::new(1, 20, 4));
        assert!(legacy.recipe_root().ends_with("data/minecraft/recipes"));

        // Only the singular spelling exists on disk
        std::fs::create_dir_all(legacy.version_dir().join("data/minecraft/recipe"))?;
        assert!(legacy.recipe_root().ends_with("data/minecraft/recipe"));
        assert!(legacy.lang_file().ends_with("1.20.4/assets/minecraft/lang/en_us.json"));
        Ok(())
    }

    #[test]
    fn test_failure_policy_parse() {
        assert_eq!("skip".parse::<FailurePolicy>(), Ok(FailurePolicy::Skip));
        assert_eq!("Abort".parse::<FailurePolicy>(), Ok(FailurePolicy::Abort));
        assert!("retry".parse::<FailurePolicy>().is_err());
        assert_eq!(FailurePolicy::Abort.to_string(), "abort");
    }

    #[test]
    fn test_extract_file_follows_references() {
        let dir = fixture();
        let extractor = Extractor::open(DataLayout::new(dir.path(), V1_21));
        let source = extractor
            .extract_file(FileKind::LootTable, "chests/village/village_plains_house.json")
            .unwrap()
            .unwrap();
        assert_eq!(source.source_type, SourceType::Chest);
        assert!(source.produced.contains("minecraft:wheat"));
        assert!(source.produced.contains("minecraft:bread"));
    }

    #[test]
    fn test_extract_file_ignored_recipe() {
        let dir = fixture();
        let extractor = Extractor::open(DataLayout::new(dir.path(), V1_21));
        let result = extractor.extract_file(FileKind::Recipe, "armor_dye.json").unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_extract_all() -> anyhow::Result<()> {
        let dir = fixture();
        let extractor = Extractor::open(DataLayout::new(dir.path(), V1_21));
        assert_eq!(extractor.files().len(), 6);

        let extraction = extractor.extract_all(ExtractOptions::default()).await?;
        assert_eq!(extraction.sources.len(), 5);
        assert_eq!(extraction.ignored, 1);
        assert!(extraction.failures.is_empty());

        let keys: Vec<String> = extraction.sources.iter().map(|s| s.key()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        assert_eq!(extraction.names["minecraft:stick"], "Stick");
        assert_eq!(extraction.names["minecraft:oak_log"], "Oak Log");
        assert_eq!(extraction.names["minecraft:oak_planks"], "Oak Planks");
        assert_eq!(extraction.names["#minecraft:planks"], "Any Planks");

        let graph = extraction.graph();
        let sources = graph.get_sources_for_item("minecraft:stick");
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].source_type(), SourceType::CraftingShaped);
        Ok(())
    }

    #[tokio::test]
    async fn test_failure_policies() -> anyhow::Result<()> {
        let dir = fixture();
        write(
            &dir.path().join("1.21.4/data/minecraft"),
            "loot_table/entities/broken.json",
            json!({"type": "minecraft:entity", "pools": [{"entries": [
                {"type": "minecraft:dynamic", "name": "minecraft:mystery"}
            ]}]}),
        );
        let extractor = Extractor::open(DataLayout::new(dir.path(), V1_21));

        let skipped = extractor
            .extract_all(ExtractOptions {
                concurrency: 2,
                policy: FailurePolicy::Skip,
            })
            .await?;
        assert_eq!(skipped.sources.len(), 5);
        assert_eq!(skipped.failures.len(), 1);
        assert_eq!(skipped.failures[0].filename, "entities/broken.json");

        let aborted = extractor
            .extract_all(ExtractOptions {
                concurrency: 2,
                policy: FailurePolicy::Abort,
            })
            .await;
        let err = aborted.unwrap_err();
        assert_eq!(err.filename, "entities/broken.json");
        assert!(matches!(err.cause, Cause::UnhandledDynamic(_)));
        Ok(())
    }

    /// Memory provider that counts reads
    struct CountingProvider {
        inner: MemoryProvider,
        reads: AtomicUsize,
    }

    impl ContentProvider for CountingProvider {
        fn read(&self, path: &str) -> std::result::Result<String, ContentError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.read(path)
        }
    }

    fn counting_extractor(tables: usize) -> (Arc<CountingProvider>, Extractor) {
        let mut inner = MemoryProvider::new().with(
            "blocks/a_broken.json",
            json!({"type": "minecraft:block", "pools": [{"entries": [
                {"type": "minecraft:dynamic", "name": "minecraft:mystery"}
            ]}]})
            .to_string(),
        );
        let mut files = vec![(FileKind::LootTable, "blocks/a_broken.json".to_string())];
        for i in 0..tables {
            let filename = format!("blocks/block_{:02}.json", i);
            inner.insert(
                filename.clone(),
                json!({"type": "minecraft:block", "pools": [{"entries": [
                    {"type": "minecraft:item", "name": format!("minecraft:block_{:02}", i)}
                ]}]})
                .to_string(),
            );
            files.push((FileKind::LootTable, filename));
        }

        let provider = Arc::new(CountingProvider {
            inner,
            reads: AtomicUsize::new(0),
        });
        let extractor = Extractor::with_providers(
            V1_21,
            provider.clone(),
            Arc::new(MemoryProvider::new()),
            files,
            NameCache::new(),
        );
        (provider, extractor)
    }

    #[tokio::test]
    async fn test_abort_starts_nothing_after_failure() {
        let (provider, extractor) = counting_extractor(20);
        let err = extractor
            .extract_all(ExtractOptions {
                concurrency: 1,
                policy: FailurePolicy::Abort,
            })
            .await
            .unwrap_err();
        assert_eq!(err.filename, "blocks/a_broken.json");
        assert_eq!(provider.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_skip_reads_every_file() -> anyhow::Result<()> {
        let (provider, extractor) = counting_extractor(20);
        let extraction = extractor
            .extract_all(ExtractOptions {
                concurrency: 3,
                policy: FailurePolicy::Skip,
            })
            .await?;
        assert_eq!(extraction.sources.len(), 20);
        assert_eq!(extraction.failures.len(), 1);
        assert_eq!(provider.reads.load(Ordering::SeqCst), 21);
        Ok(())
    }

    #[tokio::test]
    async fn test_manifest_round_trip() -> anyhow::Result<()> {
        let dir = fixture();
        let extractor = Extractor::open(DataLayout::new(dir.path(), V1_21));
        let manifest = extractor
            .extract_all(ExtractOptions::default())
            .await?
            .into_manifest(V1_21);

        let path = dir.path().join("out/sources.json");
        manifest.save(&path)?;
        let loaded = SourcesManifest::load(&path)?;
        assert_eq!(loaded, manifest);
        assert_eq!(loaded.name("minecraft:stick"), "Stick");
        assert_eq!(loaded.name("minecraft:dirt"), "Dirt");
        assert_eq!(loaded.graph().source_count(), 5);
        Ok(())
    }

    #[test]
    fn test_manifest_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = SourcesManifest::load(dir.path().join("nope.json"));
        assert!(matches!(result, Err(ManifestError::Io(_))));
    }
}
