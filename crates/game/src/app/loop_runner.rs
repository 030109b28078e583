use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use quest_engine::{
    InventoryStore, RegistryError, Scene, SceneContext, SceneRegistry, SceneTransition,
    WindowMode,
};
use tracing::{error, info, warn};

use super::bootstrap::{AppWiring, GameConfig};
use super::commands::{parse_command, DriverCommand, HELP_TEXT};
use super::save::{JsonSaveStore, SaveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// One play-through: the live scene, the graph it came from, and the save file.
pub(crate) struct Session {
    registry: SceneRegistry,
    store: JsonSaveStore,
    scene: Scene,
    move_step: f32,
}

impl Session {
    /// Resumes the saved scene when there is one, otherwise starts at the
    /// configured scene.
    pub(crate) fn start(
        config: &GameConfig,
        mut registry: SceneRegistry,
        store: JsonSaveStore,
    ) -> Result<Self, RegistryError> {
        let saved_scene = match store.load_game() {
            Ok(data) => data.scene,
            Err(error) => {
                warn!(%error, "save_load_failed");
                if matches!(error, SaveError::Parse { .. }) {
                    match store.set_aside() {
                        Ok(backup) => {
                            warn!(backup = %backup.display(), "corrupt_save_set_aside")
                        }
                        Err(error) => warn!(%error, "corrupt_save_set_aside_failed"),
                    }
                }
                None
            }
        };

        let resumed = match saved_scene.as_deref() {
            Some(name) => match registry.resolve(name) {
                Some(key) => Some(registry.get_or_create(key)?),
                None => {
                    warn!(scene = name, "saved_scene_unknown");
                    None
                }
            },
            None => None,
        };
        let mut scene = match resumed {
            Some(scene) => scene,
            None => registry.get_or_create_by_name(&config.start_scene)?,
        };
        scene.update_hint();
        info!(scene = %scene.key(), "session_started");

        Ok(Self {
            registry,
            store,
            scene,
            move_step: config.move_step,
        })
    }

    pub(crate) fn apply(&mut self, command: DriverCommand, out: &mut impl Write) -> io::Result<Flow> {
        match command {
            DriverCommand::MoveForward => self.scene.move_forward(self.move_step),
            DriverCommand::MoveBack => self.scene.move_back(self.move_step),
            DriverCommand::MoveLeft => self.scene.move_left(self.move_step),
            DriverCommand::MoveRight => self.scene.move_right(self.move_step),
            DriverCommand::Interact => self.interact(),
            DriverCommand::ToggleInventory => {
                self.scene.toggle_inventory();
                if self.scene.inventory_open() {
                    let words: Vec<String> = self
                        .store
                        .load_inventory()
                        .into_iter()
                        .map(|item| item.word)
                        .collect();
                    writeln!(out, "inventory: [{}]", words.join(", "))?;
                }
            }
            DriverCommand::Click { x, y } => {
                let outcome = self.scene.process_click(x, y, &mut self.store);
                match (&outcome.word, &outcome.voice) {
                    (Some(word), Some(voice)) => writeln!(out, "click: {word} voice={voice}")?,
                    (Some(word), None) => writeln!(out, "click: {word}")?,
                    _ => writeln!(out, "click: nothing")?,
                }
            }
            DriverCommand::Draw => {
                let data = self.scene.draw_data(&self.store);
                serde_json::to_writer(&mut *out, &data).map_err(io::Error::from)?;
                writeln!(out)?;
                return Ok(Flow::Continue);
            }
            DriverCommand::Scene => {}
            DriverCommand::Help => {
                writeln!(out, "{HELP_TEXT}")?;
                return Ok(Flow::Continue);
            }
            DriverCommand::Quit => {
                if self.save() {
                    writeln!(out, "saved {}", self.scene.name())?;
                } else {
                    writeln!(out, "error: could not save {}", self.scene.name())?;
                }
                return Ok(Flow::Quit);
            }
        }

        writeln!(out, "{}", self.status_line())?;
        Ok(Flow::Continue)
    }

    fn interact(&mut self) {
        let transition = {
            let mut ctx = SceneContext::new(&mut self.registry, &mut self.store);
            self.scene.interact(&mut ctx)
        };
        if let SceneTransition::TransitionTo(next) = transition {
            let previous = std::mem::replace(&mut self.scene, *next);
            self.registry.park(previous);
        }
    }

    fn save(&self) -> bool {
        match self.store.save_game(self.scene.name(), None) {
            Ok(()) => {
                info!(
                    scene = self.scene.name(),
                    path = %self.store.path().display(),
                    "game_saved"
                );
                true
            }
            Err(error) => {
                warn!(%error, "game_save_failed");
                false
            }
        }
    }

    pub(crate) fn status_line(&self) -> String {
        let position = self.scene.player_position();
        let mut line = format!(
            "{} pos=({:.1},{:.1})",
            self.scene.name(),
            position.x,
            position.y
        );
        let window = self.scene.text_window();
        let label = match window.mode() {
            WindowMode::Hidden => None,
            WindowMode::Hint => Some("hint"),
            WindowMode::Dialog => Some("dialog"),
        };
        if let Some(label) = label {
            line.push_str(&format!(
                " {label}[{}]: {}",
                window.source_object_id().unwrap_or("-"),
                window.text()
            ));
            if let Some(voice) = window.voice_path() {
                line.push_str(&format!(" voice={voice}"));
            }
        }
        if self.scene.inventory_open() {
            line.push_str(" inventory=open");
        }
        line
    }
}

/// Feeds line commands to the session until `quit` or end of input; both save.
pub(crate) fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut out: W,
) -> io::Result<()> {
    writeln!(out, "{}", session.status_line())?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(command) => {
                if session.apply(command, &mut out)? == Flow::Quit {
                    out.flush()?;
                    return Ok(());
                }
            }
            Err(err) => writeln!(out, "error: {err}")?,
        }
        out.flush()?;
    }

    if !session.save() {
        writeln!(out, "error: could not save {}", session.scene.name())?;
    }
    Ok(())
}

pub(crate) fn run(app: AppWiring) -> ExitCode {
    let AppWiring {
        config,
        registry,
        store,
    } = app;
    let mut session = match Session::start(&config, registry, store) {
        Ok(session) => session,
        Err(err) => {
            error!(error = %err, "startup_failed");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = run_session(&mut session, stdin.lock(), stdout.lock()) {
        error!(error = %err, "driver_io_failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
