//! Scene directory layout and population.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::SceneError;
use crate::probe;

/// Paths and layout operations for one named scene.
///
/// A scene is rooted at `<scenes_root>/<name>/`. The layout is created
/// lazily and idempotently; external tools write their own outputs
/// (`sparse/`, model checkpoints) into the root, which this type treats as
/// opaque.
#[derive(Debug, Clone)]
pub struct SceneLayout {
    root: PathBuf,
}

impl SceneLayout {
    /// Scene rooted at `<scenes_root>/<name>/`.
    pub fn new(scenes_root: &Path, name: &str) -> Self {
        Self {
            root: scenes_root.join(name),
        }
    }

    /// Scene at an explicit root path.
    pub fn at(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Source photographs.
    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    /// What the reconstruction tool reads; a link or copy of `images/`.
    pub fn input_dir(&self) -> PathBuf {
        self.root.join("input")
    }

    /// Per-step tool logs.
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn reconstruction_log(&self) -> PathBuf {
        self.logs_dir().join("reconstruction.log")
    }

    pub fn training_log(&self) -> PathBuf {
        self.logs_dir().join("training.log")
    }

    /// Create `images/` and `logs/` if absent. Idempotent.
    pub fn ensure_layout(&self) -> Result<(), SceneError> {
        fs::create_dir_all(self.images_dir())?;
        fs::create_dir_all(self.logs_dir())?;
        debug!("Scene layout ready at {}", self.root.display());
        Ok(())
    }

    /// Copy every regular file directly under `source` into `images/`.
    ///
    /// Filenames are preserved and collisions overwrite. Subdirectories of
    /// `source` are never descended into. Returns the number of files
    /// copied.
    pub fn populate_images(&self, source: &Path) -> Result<usize, SceneError> {
        if !source.is_dir() {
            return Err(SceneError::MissingSource {
                path: source.to_path_buf(),
            });
        }
        self.ensure_layout()?;

        let images = self.images_dir();
        let mut copied = 0;
        for entry in fs::read_dir(source)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            fs::copy(entry.path(), images.join(entry.file_name()))?;
            copied += 1;
        }
        info!("Copied {} files into {}", copied, images.display());
        Ok(copied)
    }

    /// Materialize `input/` from `images/` if it does not exist yet.
    ///
    /// Prefers a symbolic link when the filesystem supports one (probed
    /// explicitly, so unrelated IO failures are not mistaken for "links
    /// unsupported"); otherwise performs a full recursive copy. If `input/`
    /// already exists this is a no-op, stale or not.
    pub fn link_or_copy_input(&self) -> Result<(), SceneError> {
        let input = self.input_dir();
        if input.exists() {
            debug!("{} already exists, leaving it alone", input.display());
            return Ok(());
        }

        let images = self.images_dir();
        if !images.is_dir() {
            return Err(SceneError::MissingImages { path: images });
        }

        if probe::symlinks_supported(&self.root) {
            info!("Linking {} -> {}", input.display(), images.display());
            probe::symlink_dir(&images, &input)?;
        } else {
            info!(
                "Symlinks unsupported under {}, copying images instead",
                self.root.display()
            );
            copy_dir_recursive(&images, &input)?;
        }
        Ok(())
    }

    /// Check the scene is runnable: root and `images/` exist, and `images/`
    /// holds at least one entry.
    pub fn verify(&self) -> Result<(), SceneError> {
        let images = self.images_dir();
        if !images.is_dir() {
            return Err(SceneError::MissingImages { path: images });
        }
        if fs::read_dir(&images)?.next().is_none() {
            return Err(SceneError::EmptyImages { path: images });
        }
        Ok(())
    }
}

/// Copy `src` into `dst` recursively, creating `dst`.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<(), std::io::Error> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_root(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("splatrun-scene-{}-{}", tag, std::process::id()));
        if dir.exists() {
            fs::remove_dir_all(&dir).unwrap();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn list_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_ensure_layout_idempotent() {
        let root = scratch_root("layout");
        let scene = SceneLayout::new(&root, "demo");

        scene.ensure_layout().unwrap();
        let first = list_names(scene.root());
        scene.ensure_layout().unwrap();
        let second = list_names(scene.root());

        assert_eq!(first, second);
        assert!(scene.images_dir().is_dir());
        assert!(scene.logs_dir().is_dir());
    }

    #[test]
    fn test_populate_images_never_recurses() {
        let root = scratch_root("populate");
        let source = root.join("shoot");
        fs::create_dir_all(source.join("rejects")).unwrap();
        fs::write(source.join("a.jpg"), b"a").unwrap();
        fs::write(source.join("b.jpg"), b"b").unwrap();
        fs::write(source.join("rejects").join("c.jpg"), b"c").unwrap();

        let scene = SceneLayout::new(&root, "demo");
        let copied = scene.populate_images(&source).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(list_names(&scene.images_dir()), vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_populate_images_overwrites_on_collision() {
        let root = scratch_root("overwrite");
        let source = root.join("shoot");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("a.jpg"), b"new").unwrap();

        let scene = SceneLayout::new(&root, "demo");
        scene.ensure_layout().unwrap();
        fs::write(scene.images_dir().join("a.jpg"), b"old").unwrap();

        scene.populate_images(&source).unwrap();
        assert_eq!(fs::read(scene.images_dir().join("a.jpg")).unwrap(), b"new");
    }

    #[test]
    fn test_populate_images_missing_source() {
        let root = scratch_root("nosource");
        let scene = SceneLayout::new(&root, "demo");
        let err = scene.populate_images(&root.join("nope")).unwrap_err();
        assert!(matches!(err, SceneError::MissingSource { .. }));
    }

    #[test]
    fn test_link_or_copy_input_noop_when_present() {
        let root = scratch_root("noop");
        let scene = SceneLayout::new(&root, "demo");
        scene.ensure_layout().unwrap();
        fs::write(scene.images_dir().join("a.jpg"), b"a").unwrap();

        // Pre-existing input/ with different content stays untouched.
        fs::create_dir_all(scene.input_dir()).unwrap();
        fs::write(scene.input_dir().join("stale.jpg"), b"stale").unwrap();

        scene.link_or_copy_input().unwrap();
        assert_eq!(list_names(&scene.input_dir()), vec!["stale.jpg"]);
    }

    #[test]
    fn test_link_or_copy_input_materializes_images() {
        let root = scratch_root("link");
        let scene = SceneLayout::new(&root, "demo");
        scene.ensure_layout().unwrap();
        fs::write(scene.images_dir().join("a.jpg"), b"a").unwrap();
        fs::write(scene.images_dir().join("b.jpg"), b"b").unwrap();

        scene.link_or_copy_input().unwrap();

        // Link or copy, the tool-visible file set is the same.
        assert_eq!(list_names(&scene.input_dir()), vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_link_or_copy_input_requires_images() {
        let root = scratch_root("noimages");
        let scene = SceneLayout::new(&root, "demo");
        let err = scene.link_or_copy_input().unwrap_err();
        assert!(matches!(err, SceneError::MissingImages { .. }));
    }

    #[test]
    fn test_copy_dir_recursive_preserves_tree() {
        let root = scratch_root("copytree");
        let src = root.join("src");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("top.txt"), b"top").unwrap();
        fs::write(src.join("nested").join("deep.txt"), b"deep").unwrap();

        let dst = root.join("dst");
        copy_dir_recursive(&src, &dst).unwrap();

        assert_eq!(fs::read(dst.join("top.txt")).unwrap(), b"top");
        assert_eq!(fs::read(dst.join("nested").join("deep.txt")).unwrap(), b"deep");
    }

    #[test]
    fn test_verify() {
        let root = scratch_root("verify");
        let scene = SceneLayout::new(&root, "demo");

        assert!(matches!(
            scene.verify().unwrap_err(),
            SceneError::MissingImages { .. }
        ));

        scene.ensure_layout().unwrap();
        assert!(matches!(
            scene.verify().unwrap_err(),
            SceneError::EmptyImages { .. }
        ));

        fs::write(scene.images_dir().join("a.jpg"), b"a").unwrap();
        scene.verify().unwrap();
    }
}
