use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{LayerclockError, LayerclockResult};
use crate::scene::model::SceneNode;

/// Input boundary: a loaded scene tree ready to be handed to a controller.
///
/// The JSON shape is simply a serialized [`SceneNode`] under a `root` key.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AnimationArchive {
    /// Root of the scene tree.
    pub root: SceneNode,
}

impl AnimationArchive {
    /// Wrap an already built tree, validating it.
    pub fn new(root: SceneNode) -> LayerclockResult<Self> {
        root.validate()?;
        Ok(Self { root })
    }

    /// Parse an archive from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> LayerclockResult<Self> {
        let archive: Self = serde_json::from_reader(r)
            .map_err(|e| LayerclockError::serde(format!("parse archive JSON: {e}")))?;
        archive.root.validate()?;
        Ok(archive)
    }

    /// Parse an archive from a JSON string.
    pub fn from_json_str(s: &str) -> LayerclockResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse an archive from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> LayerclockResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open archive '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Take ownership of the root node.
    pub fn into_root(self) -> SceneNode {
        self.root
    }
}
