use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::archive::{ArchivePackager, ClipArchive};
use crate::cache::{ArtifactStore, DiskArtifactStore, OutputKeyDeriver};
use crate::config::Settings;
use crate::engine::{mask_file_name, materialize_mask, CancelFlag, EngineFactory, ExtractionEngine};
use crate::errors::{ClipError, ClipResult};
use crate::guard::SizeGuard;
use crate::preview::PreviewContext;
use crate::response::ClipResponse;
use crate::selection::{QueryParams, Selection, SelectionParser};
use crate::source::{LayerResolver, RasterSource, SourceLocator};
use crate::utils::path_utils::is_plain_file_name;
use crate::utils::{Clock, SystemClock};

/// A derived clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipJob {
    /// File name handed back to clients for the download request
    pub file_name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    /// `true` when no extraction ran for this request
    pub cache_hit: bool,
}

/// Main interface to the clip pipeline
///
/// One instance serves any number of concurrent requests; every
/// collaborator is shared read-only.
pub struct ClipService {
    settings: Settings,
    locator: SourceLocator,
    keys: OutputKeyDeriver,
    store: Box<dyn ArtifactStore>,
    engine: Box<dyn ExtractionEngine>,
    clock: Box<dyn Clock>,
    guard: SizeGuard,
    packager: ArchivePackager,
}

impl ClipService {
    /// Create a service with the GDAL engine and the system clock
    ///
    /// # Arguments
    /// * `settings` - Loaded configuration
    /// * `resolver` - Authorized layer lookup
    ///
    /// # Returns
    /// A ClipService instance or an error if the cache directory cannot be created
    pub fn new(settings: Settings, resolver: Box<dyn LayerResolver>) -> ClipResult<Self> {
        let store = DiskArtifactStore::new(settings.cache_directory())?;
        let engine = EngineFactory::create(&settings.tools);

        Ok(ClipService {
            locator: SourceLocator::new(resolver, settings.fallback_directory()),
            keys: OutputKeyDeriver::new(settings.cache_key),
            store: Box::new(store),
            engine,
            clock: Box::new(SystemClock),
            guard: SizeGuard::new(settings.maximum_clip_size),
            packager: ArchivePackager::new(),
            settings,
        })
    }

    /// Replace the extraction engine
    pub fn with_engine(mut self, engine: Box<dyn ExtractionEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the clock used for timestamps
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the artifact store
    pub fn with_store(mut self, store: Box<dyn ArtifactStore>) -> Self {
        self.store = store;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Derive a clip of `layer_name` for the selection in `params`
    ///
    /// Reuses an existing output with the same key; otherwise runs the
    /// extraction engine. The result is checked against the size limit
    /// whether it was cached or freshly made.
    pub fn derive(&self, layer_name: &str, params: &QueryParams) -> ClipResult<ClipJob> {
        self.derive_with_cancel(layer_name, params, &CancelFlag::new())
    }

    /// [`derive`](Self::derive) with a flag that stops this request's
    /// extraction when raised
    ///
    /// Other requests on the same service are unaffected.
    pub fn derive_with_cancel(&self, layer_name: &str, params: &QueryParams, cancel: &CancelFlag) -> ClipResult<ClipJob> {
        info!("Deriving clip of {}", layer_name);

        let selection = SelectionParser::parse(params)?;
        let source = self.locator.locate(layer_name)?;
        let timestamp = self.clock.timestamp();
        let key = self.keys.derive(&source, &selection, &timestamp);

        let artifact = self.store.get_or_create(&key.file_name, &mut |output| {
            self.extract(&source, &selection, output, &timestamp, cancel)
        })?;

        let size_bytes = self.guard.check(&artifact.path)?;
        info!("Clip {} ready ({} bytes, cached: {})", key.file_name, size_bytes, !artifact.created);

        Ok(ClipJob {
            file_name: key.file_name,
            path: artifact.path,
            size_bytes,
            cache_hit: !artifact.created,
        })
    }

    /// Derive and shape the outcome into a status and JSON body
    pub fn derive_response(&self, layer_name: &str, params: &QueryParams) -> ClipResponse {
        let result = self.derive(layer_name, params);
        if let Err(e) = &result {
            warn!("Derive of {} failed: {}", layer_name, e);
        }
        ClipResponse::from_result(&result)
    }

    /// Package a previously derived clip for download
    pub fn fetch_archive(&self, layer_name: &str, clip_filename: &str) -> ClipResult<ClipArchive> {
        info!("Fetching {} for {}", clip_filename, layer_name);

        let source = self.locator.locate(layer_name)?;
        if !is_plain_file_name(clip_filename) {
            warn!("Refusing clip file name {:?}", clip_filename);
            return Err(ClipError::InvalidClipFilename(clip_filename.to_string()));
        }

        let output = self.store.lookup(clip_filename)
            .ok_or_else(|| ClipError::ClipNotFound(clip_filename.to_string()))?;

        self.packager.package(&source, &output, &self.clock.timestamp())
    }

    /// Context for the preview page of `geotiff_name`
    pub fn preview(&self, geotiff_name: &str) -> PreviewContext {
        PreviewContext::new(&self.settings.geoserver_public_location, geotiff_name)
    }

    fn extract(
        &self,
        source: &RasterSource,
        selection: &Selection,
        output: &Path,
        timestamp: &str,
        cancel: &CancelFlag,
    ) -> ClipResult<()> {
        info!("Running {} extraction for {}", self.engine.name(), source.raster_path.display());

        match selection {
            Selection::BoundingBox(bbox) => {
                self.engine.windowed_extract(&source.raster_path, &bbox.projection_window(), output, cancel)?;
            },
            Selection::PolygonMask(geojson) => {
                let mask_path = self.store.scratch_path(&mask_file_name(&source.basename(), timestamp));
                let mask = materialize_mask(&mask_path, geojson)?;
                self.engine.cutline_mask(&source.raster_path, &mask, output, cancel)?;
            },
        }
        Ok(())
    }
}
