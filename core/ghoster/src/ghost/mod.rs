mod navigation;

use crate::appearance::{Appearance, Rgb};
use crate::GhosterSettings;
use ghoster_traits::scene::*;
use serde::Serialize;
use std::collections::BTreeSet;
pub use navigation::*;

const SOURCE_LIST_SEPARATOR: char = ',';

/// Snapshot of a source object at a single frame
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Ghost {
    pub name: String,
    pub source: String,
    pub frame: i32,
}

pub fn ghost_name(source: &str, frame: i32) -> String {
    format!("{source}_{frame}")
}

pub fn material_name(ghost: &str) -> String {
    format!("{ghost}_mat")
}

pub fn shading_engine_name(ghost: &str) -> String {
    format!("{ghost}_sg")
}

/// Splits a persisted source list. Names containing the separator can't round-trip.
pub fn parse_source_list(value: &str) -> BTreeSet<String> {
    value
        .split(SOURCE_LIST_SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_owned())
        .collect()
}

pub fn join_source_list(sources: &BTreeSet<String>) -> String {
    sources
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(&SOURCE_LIST_SEPARATOR.to_string())
}

/// Tracks ghosts of a set of source objects under a single group node.
///
/// The host scene is the source of truth for which ghosts exist. The store
/// holds the source set and the appearance shared by every ghost, and owns the
/// host for the lifetime of the session. Host failures never propagate: they
/// are logged and the affected ghost is skipped.
pub struct GhostStore<H: SceneHost> {
    host: H,
    settings: GhosterSettings,
    sources: BTreeSet<String>,
    appearance: Appearance,
}

impl<H: SceneHost> GhostStore<H> {
    /// Opens a session, creating the group node on first use or restoring
    /// the persisted source set when it already exists
    pub fn new(host: H, settings: GhosterSettings) -> GhostStore<H> {
        let mut store = GhostStore {
            host,
            appearance: settings.appearance,
            settings,
            sources: BTreeSet::new(),
        };

        store.init_group();
        store
    }

    pub fn close(self) -> H {
        log::info!("Closing ghost session with {} source(s)", self.sources.len());
        self.host
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn settings(&self) -> &GhosterSettings {
        &self.settings
    }

    pub fn sources(&self) -> &BTreeSet<String> {
        &self.sources
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    fn init_group(&mut self) {
        let group = &self.settings.group_name;
        let source_attr = &self.settings.source_attr;

        if self.host.object_exists(group) {
            if let Ok(AttrValue::Text(stored)) = self.host.get_attr(group, source_attr) {
                self.sources = parse_source_list(&stored);
            }

            log::info!("Found existing group \"{group}\" with {} source(s)", self.sources.len());
            return;
        }

        let created = self.host
            .create_transform(group)
            .and_then(|_| self.host.add_attr(group, source_attr, AttrValue::Text(String::new())));

        match created {
            Ok(_) => log::info!("Created ghost group \"{group}\""),
            Err(err) => log::warn!("Unable to create ghost group \"{group}\": {err}"),
        }
    }

    /// Replaces the source set and persists it on the group
    pub fn set_sources<I, S>(&mut self, ids: I) where I: IntoIterator<Item = S>, S: Into<String> {
        self.sources = ids
            .into_iter()
            .map(|s| s.into())
            .collect();

        let joined = join_source_list(&self.sources);
        let result = ensure_attr(&mut self.host, &self.settings.group_name, &self.settings.source_attr, AttrValue::Text(joined));

        if let Err(err) = result {
            log::warn!("Unable to persist source list: {err}");
        }
    }

    /// Uses the current host selection, keeping only objects with a mesh shape
    pub fn set_selected_as_sources(&mut self) {
        let meshes = self.host
            .selection()
            .into_iter()
            .filter(|sel| self.host
                .shapes(sel)
                .map(|shapes| shapes.contains(&ObjectKind::Mesh))
                .unwrap_or(false))
            .collect::<Vec<_>>();

        log::info!("Using {} selected mesh(es) as sources", meshes.len());
        self.set_sources(meshes);
    }

    pub fn select_sources(&mut self, ids: &[String]) {
        self.host.select(ids);
    }

    pub fn ghosts(&self) -> Vec<Ghost> {
        let group = &self.settings.group_name;

        let children = match self.host.children(group) {
            Ok(children) => children,
            Err(err) => {
                log::debug!("No ghosts to list: {err}");
                return Vec::new();
            }
        };

        children
            .into_iter()
            .filter_map(|name| {
                let Some(frame) = self.host
                    .get_attr(&name, &self.settings.frame_attr)
                    .ok()
                    .and_then(|v| v.as_int()) else {
                    log::debug!("\"{name}\" has no frame tag, skipping");
                    return None;
                };

                let source = self.host
                    .get_attr(&name, &self.settings.source_attr)
                    .ok()
                    .and_then(|v| v.as_text().map(|s| s.to_owned()))
                    .or_else(|| name.rsplit_once('_').map(|(src, _)| src.to_owned()))
                    .unwrap_or_default();

                Some(Ghost { name, source, frame })
            })
            .collect()
    }

    pub fn ghost_frames_sorted(&self) -> Vec<i32> {
        sorted_frames(self.ghosts().iter().map(|g| g.frame))
    }

    /// Creates one ghost per source at `frame`, replacing any already there
    pub fn add_ghost(&mut self, frame: i32) {
        if self.sources.is_empty() {
            log::debug!("No sources set, nothing to ghost");
            return;
        }

        if !self.host.object_exists(&self.settings.group_name) {
            log::warn!("Ghost group \"{}\" is missing", self.settings.group_name);
            return;
        }

        let sources = self.sources.iter().cloned().collect::<Vec<_>>();
        for source in sources {
            if let Err(err) = self.create_ghost(&source, frame) {
                // Untagged leftovers would be invisible to ghosts()
                self.delete_ghost(&ghost_name(&source, frame));
                log::warn!("Unable to ghost \"{source}\" at frame {frame}: {err}");
            }
        }
    }

    pub fn add_ghost_at_playhead(&mut self) {
        self.add_ghost(self.host.current_time());
    }

    fn create_ghost(&mut self, source: &str, frame: i32) -> SceneResult<()> {
        let ghost = ghost_name(source, frame);
        if self.host.object_exists(&ghost) {
            self.delete_ghost(&ghost);
        }

        self.host.duplicate(source, &ghost)?;
        self.host.parent(&ghost, &self.settings.group_name)?;
        ensure_attr(&mut self.host, &ghost, &self.settings.frame_attr, AttrValue::Int(frame))?;
        ensure_attr(&mut self.host, &ghost, &self.settings.source_attr, AttrValue::Text(source.to_owned()))?;

        let mat = material_name(&ghost);
        if !self.host.object_exists(&mat) {
            self.host.create_material(&mat)?;
        }

        let sg = shading_engine_name(&ghost);
        if !self.host.object_exists(&sg) {
            self.host.create_shading_engine(&sg)?;
        }

        self.host.assign_material(&mat, &sg, &ghost)?;
        self.host.set_attr(&mat, MATERIAL_COLOR_ATTR, AttrValue::Double3(self.appearance.color.to_array()))?;

        let transparency = self.appearance.transparency(frame, frame);
        self.host.set_attr(&mat, MATERIAL_TRANSPARENCY_ATTR, AttrValue::Double3([transparency; 3]))?;

        log::debug!("Created ghost \"{ghost}\"");
        Ok(())
    }

    // Material and shading engine go with it
    pub fn delete_ghost(&mut self, ghost: &str) {
        let names = [material_name(ghost), shading_engine_name(ghost), ghost.to_owned()];

        for name in names.iter().filter(|n| self.host.object_exists(n)).collect::<Vec<_>>() {
            if let Err(err) = self.host.delete(name) {
                log::warn!("Unable to delete \"{name}\": {err}");
            }
        }
    }

    pub fn delete_ghost_at(&mut self, frame: i32) {
        let ghosts = self.ghosts();

        for ghost in ghosts.iter().filter(|g| g.frame == frame) {
            self.delete_ghost(&ghost.name);
        }
    }

    pub fn delete_ghost_at_playhead(&mut self) {
        self.delete_ghost_at(self.host.current_time());
    }

    pub fn delete_all(&mut self) {
        let ghosts = self.ghosts();
        log::info!("Deleting {} ghost(s)", ghosts.len());

        for ghost in ghosts.iter() {
            self.delete_ghost(&ghost.name);
        }
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.appearance.color = color;

        for ghost in self.ghosts() {
            self.set_material_attr(&ghost.name, MATERIAL_COLOR_ATTR, color.to_array());
        }
    }

    /// Expects a positive range
    pub fn set_transparency_range(&mut self, range: f64) {
        self.appearance.transparency_range = range;
        self.on_time_changed(self.host.current_time());
    }

    /// Expects an offset in `[0, 1]`
    pub fn set_transparency_offset(&mut self, offset: f64) {
        self.appearance.transparency_offset = offset;
        self.on_time_changed(self.host.current_time());
    }

    pub fn set_transparency_range_from_slider(&mut self, value: i32) {
        self.appearance.set_range_from_slider(value);
        self.on_time_changed(self.host.current_time());
    }

    pub fn set_transparency_offset_percent(&mut self, value: i32) {
        self.appearance.set_offset_from_slider(value);
        self.on_time_changed(self.host.current_time());
    }

    pub fn on_time_changed(&mut self, current_frame: i32) {
        for ghost in self.ghosts() {
            let transparency = self.appearance.transparency(ghost.frame, current_frame);
            self.set_material_attr(&ghost.name, MATERIAL_TRANSPARENCY_ATTR, [transparency; 3]);
        }
    }

    fn set_material_attr(&mut self, ghost: &str, attr: &str, value: [f64; 3]) {
        let mat = material_name(ghost);
        if !self.host.object_exists(&mat) {
            return;
        }

        if let Err(err) = self.host.set_attr(&mat, attr, AttrValue::Double3(value)) {
            log::warn!("Unable to update \"{mat}\": {err}");
        }
    }

    pub fn next_ghost_frame(&self, current_frame: i32) -> Option<i32> {
        next_frame(&self.ghost_frames_sorted(), current_frame)
    }

    pub fn prev_ghost_frame(&self, current_frame: i32) -> Option<i32> {
        prev_frame(&self.ghost_frames_sorted(), current_frame)
    }

    pub fn go_to_next_ghost(&mut self) -> Option<i32> {
        let frame = self.next_ghost_frame(self.host.current_time())?;
        self.move_playhead(frame);
        Some(frame)
    }

    pub fn go_to_prev_ghost(&mut self) -> Option<i32> {
        let frame = self.prev_ghost_frame(self.host.current_time())?;
        self.move_playhead(frame);
        Some(frame)
    }

    fn move_playhead(&mut self, frame: i32) {
        self.host.set_current_time(frame);
        self.on_time_changed(frame);
    }
}

/// Sets an attribute, adding it first if the object doesn't have it yet
fn ensure_attr<H: SceneHost>(host: &mut H, name: &str, attr: &str, value: AttrValue) -> SceneResult<()> {
    match host.get_attr(name, attr) {
        Ok(_) => host.set_attr(name, attr, value),
        Err(SceneError::AttrNotFound { .. }) => host.add_attr(name, attr, value),
        Err(err) => Err(err),
    }
}
