//! Shared test helpers.

#![expect(dead_code, reason = "each test binary uses a different subset of these helpers")]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bjbot::{
    Control, GameSession, GameView, Outcome, PlayerId, Presenter, Rank, SurfaceError, SurfaceId,
    TableOptions,
};

/// Something the engine asked the presenter to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Render(GameView),
    Update(SurfaceId, GameView),
    Controls(SurfaceId, Vec<Control>),
    Rejected(SurfaceId, PlayerId),
    Close(SurfaceId, Outcome),
}

/// Presenter that records every call; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
    surface: u64,
    fail_render: bool,
    fail_updates: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            surface: 100,
            ..Self::default()
        }
    }

    pub fn with_surface(surface: u64) -> Self {
        Self {
            surface,
            ..Self::default()
        }
    }

    pub fn failing_render() -> Self {
        Self {
            fail_render: true,
            ..Self::new()
        }
    }

    pub fn failing_updates() -> Self {
        Self {
            fail_updates: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn updates(&self) -> Vec<GameView> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Update(_, view) => Some(view),
                _ => None,
            })
            .collect()
    }

    pub fn rejections(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Rejected(..)))
            .count()
    }

    pub fn last_controls(&self) -> Option<Vec<Control>> {
        self.calls().into_iter().rev().find_map(|call| match call {
            Call::Controls(_, controls) => Some(controls),
            _ => None,
        })
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Presenter for Recorder {
    async fn render_surface(&mut self, view: &GameView) -> Result<SurfaceId, SurfaceError> {
        if self.fail_render {
            return Err(SurfaceError::new("channel unavailable"));
        }
        self.record(Call::Render(view.clone()));
        Ok(SurfaceId(self.surface))
    }

    async fn update_surface(
        &mut self,
        surface: SurfaceId,
        view: &GameView,
    ) -> Result<(), SurfaceError> {
        self.record(Call::Update(surface, view.clone()));
        if self.fail_updates {
            return Err(SurfaceError::new("message deleted"));
        }
        Ok(())
    }

    async fn set_controls(
        &mut self,
        surface: SurfaceId,
        controls: &[Control],
    ) -> Result<(), SurfaceError> {
        self.record(Call::Controls(surface, controls.to_vec()));
        Ok(())
    }

    async fn notify_input_rejected(
        &mut self,
        surface: SurfaceId,
        actor: PlayerId,
    ) -> Result<(), SurfaceError> {
        self.record(Call::Rejected(surface, actor));
        Ok(())
    }

    async fn close_surface(
        &mut self,
        surface: SurfaceId,
        _view: &GameView,
        outcome: Outcome,
    ) -> Result<(), SurfaceError> {
        self.record(Call::Close(surface, outcome));
        Ok(())
    }
}

pub const PLAYER: PlayerId = PlayerId(7);
pub const STRANGER: PlayerId = PlayerId(8);
pub const SURFACE: SurfaceId = SurfaceId(100);

pub fn fast_options() -> TableOptions {
    TableOptions::default()
        .with_deal_delay(Duration::ZERO)
        .with_seed(Some(1))
}

/// An idle session whose next game draws `draws` first.
pub fn session_with_draws(draws: &[Rank]) -> (GameSession<Recorder>, Recorder) {
    let recorder = Recorder::new();
    let mut session = GameSession::new(fast_options(), recorder.clone());
    session.deck_mut().prearrange(draws.iter().copied());
    (session, recorder)
}
