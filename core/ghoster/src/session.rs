use crate::appearance::{Appearance, Rgb};
use crate::ghost::{material_name, GhostStore};
use crate::scene::MemoryScene;
use crate::GhosterSettings;
use ghoster_traits::scene::*;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error("Unable to parse session script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Command {index} failed: {source}")]
    Scene {
        index: usize,
        source: SceneError
    },
}

/// User action or host notification, applied in order
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    AddMesh { name: String },
    Select { ids: Vec<String> },
    SetSources { ids: Vec<String> },
    SetSourcesFromSelection,
    /// Playhead moved
    SetTime { frame: i32 },
    AddGhost,
    DeleteGhost,
    DeleteAll,
    SetColor { color: Rgb },
    SetTransparencyRange { range: f64 },
    SetTransparencyOffset { offset: f64 },
    NextGhost,
    PrevGhost,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GhostReport {
    pub name: String,
    pub source: String,
    pub frame: i32,
    pub color: Option<[f64; 3]>,
    pub transparency: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionReport {
    pub playhead: i32,
    pub sources: Vec<String>,
    pub appearance: Appearance,
    pub ghosts: Vec<GhostReport>,
}

/// Drives a ghost store over an in-memory scene
pub struct Session {
    store: GhostStore<MemoryScene>,
}

impl Session {
    pub fn new(scene: MemoryScene, settings: GhosterSettings) -> Session {
        Session {
            store: GhostStore::new(scene, settings)
        }
    }

    pub fn parse_script(json: &str) -> Result<Vec<Command>, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn store(&self) -> &GhostStore<MemoryScene> {
        &self.store
    }

    pub fn run(&mut self, commands: &[Command]) -> Result<(), SessionError> {
        for (index, command) in commands.iter().enumerate() {
            self.apply(command)
                .map_err(|source| SessionError::Scene { index, source })?;
        }

        Ok(())
    }

    pub fn apply(&mut self, command: &Command) -> SceneResult<()> {
        log::debug!("Applying {command:?}");

        match command {
            Command::AddMesh { name } => self.store.host_mut().add_mesh(name)?,
            Command::Select { ids } => self.store.select_sources(ids),
            Command::SetSources { ids } => self.store.set_sources(ids.iter().cloned()),
            Command::SetSourcesFromSelection => self.store.set_selected_as_sources(),
            Command::SetTime { frame } => {
                self.store.host_mut().set_current_time(*frame);
                self.store.on_time_changed(*frame);
            },
            Command::AddGhost => self.store.add_ghost_at_playhead(),
            Command::DeleteGhost => self.store.delete_ghost_at_playhead(),
            Command::DeleteAll => self.store.delete_all(),
            Command::SetColor { color } => self.store.set_color(*color),
            Command::SetTransparencyRange { range } => self.store.set_transparency_range(*range),
            Command::SetTransparencyOffset { offset } => self.store.set_transparency_offset(*offset),
            Command::NextGhost => { self.store.go_to_next_ghost(); },
            Command::PrevGhost => { self.store.go_to_prev_ghost(); },
        }

        Ok(())
    }

    pub fn report(&self) -> SessionReport {
        let scene = self.store.host();

        let ghosts = self.store
            .ghosts()
            .into_iter()
            .map(|g| {
                let mat = material_name(&g.name);
                let read = |attr: &str| scene
                    .get_attr(&mat, attr)
                    .ok()
                    .and_then(|v| v.as_double3());

                GhostReport {
                    color: read(MATERIAL_COLOR_ATTR),
                    transparency: read(MATERIAL_TRANSPARENCY_ATTR).map(|[t, _, _]| t),
                    name: g.name,
                    source: g.source,
                    frame: g.frame,
                }
            })
            .collect();

        SessionReport {
            playhead: scene.current_time(),
            sources: self.store.sources().iter().cloned().collect(),
            appearance: *self.store.appearance(),
            ghosts,
        }
    }

    pub fn close(self) -> MemoryScene {
        self.store.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_from_tagged_json() {
        let commands = Session::parse_script(r#"[
            { "op": "add_mesh", "name": "A" },
            { "op": "set_time", "frame": 5 },
            { "op": "add_ghost" },
            { "op": "set_color", "color": { "r": 1.0, "g": 0.0, "b": 0.0 } }
        ]"#).unwrap();

        assert_eq!(commands, vec![
            Command::AddMesh { name: "A".into() },
            Command::SetTime { frame: 5 },
            Command::AddGhost,
            Command::SetColor { color: Rgb::new(1.0, 0.0, 0.0) },
        ]);
    }

    #[test]
    fn unknown_op_is_rejected() {
        assert!(matches!(Session::parse_script(r#"[{ "op": "explode" }]"#), Err(SessionError::Parse(_))));
    }

    #[test]
    fn failing_command_reports_its_index() {
        let mut session = Session::new(MemoryScene::new(), GhosterSettings::default());
        let commands = vec![
            Command::AddMesh { name: "A".into() },
            Command::AddMesh { name: "A".into() },
        ];

        let err = session.run(&commands).unwrap_err();
        assert!(matches!(err, SessionError::Scene { index: 1, source: SceneError::ObjectExists { .. } }));
    }
}
