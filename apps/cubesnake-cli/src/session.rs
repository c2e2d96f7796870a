use cubesnake_input::Action;
use cubesnake_kernel::{GameConfig, GameController, GameEvent, GameState};
use cubesnake_render::{RenderView, Renderer, SceneMirror, ViewRig};

/// One headless play session: the controller plus the presentation it feeds.
///
/// The game is held paused while the view turns to a new face and resumed
/// when the turn ends.
pub struct Session {
    game: GameController,
    scene: SceneMirror,
    rig: ViewRig,
    paused_by_view: bool,
}

impl Session {
    pub fn new(config: GameConfig) -> anyhow::Result<Self> {
        let rig = ViewRig::new(config.face_count);
        let game = GameController::new(config)?;
        Ok(Self {
            game,
            scene: SceneMirror::new(),
            rig,
            paused_by_view: false,
        })
    }

    pub fn game(&self) -> &GameController {
        &self.game
    }

    pub fn scene(&self) -> &SceneMirror {
        &self.scene
    }

    /// Apply player input. Rejected transitions are logged and dropped.
    pub fn apply(&mut self, action: Action) {
        if let Err(err) = self.game.apply(action) {
            tracing::warn!(?action, %err, "input ignored");
        }
    }

    /// Run one frame and return the events it produced.
    pub fn frame(&mut self, dt: f32) -> anyhow::Result<Vec<GameEvent>> {
        self.game.update(dt);
        let events = self.game.drain_events();
        self.scene.apply_all(self.game.topology(), &events)?;
        for event in &events {
            self.rig.observe(event);
        }

        if self.rig.is_turning() && self.game.state() == GameState::Running {
            self.game.pause()?;
            self.paused_by_view = true;
        }
        self.rig.update(dt);
        if !self.rig.is_turning() && self.paused_by_view {
            self.paused_by_view = false;
            if self.game.state() == GameState::Paused {
                self.game.resume()?;
            }
        }
        Ok(events)
    }

    pub fn render<R: Renderer>(&self, renderer: &R) -> R::Output {
        renderer.render(&self.game, &RenderView::from_rig(&self.rig))
    }
}
